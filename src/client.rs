//! Caching API client
//!
//! Read-through caching in front of the transport: reads consult the cache
//! first and populate it on miss; mutations always hit the wire and then
//! invalidate the whole resource family by key prefix. The client performs
//! no retries and no request de-duplication; transport errors surface to the
//! caller unchanged and are never cached.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheCategory, CacheStore, Params, TtlPolicy, derive_key};
use crate::error::Result;
use crate::transport::{ApiRequest, MultipartForm, Transport};

/// Options for a cached read
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Explicit TTL; overrides the category TTL when non-zero
    pub ttl: Option<Duration>,
    /// Endpoint category used to pick the default TTL
    pub category: CacheCategory,
    /// Bypass the cache and overwrite it with the fresh result
    pub force_refresh: bool,
}

impl ReadOptions {
    /// Options for a category with no explicit TTL
    #[must_use]
    pub fn category(category: CacheCategory) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    /// Set an explicit TTL
    #[must_use]
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Bypass the cache for this read
    #[must_use]
    pub fn force_refresh(mut self) -> Self {
        self.force_refresh = true;
        self
    }
}

/// Read-through caching client over a [`Transport`]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    store: Arc<CacheStore>,
    ttl_policy: TtlPolicy,
    cache_enabled: bool,
}

impl ApiClient {
    /// Create a client with caching on
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, store: Arc<CacheStore>, ttl_policy: TtlPolicy) -> Self {
        Self {
            transport,
            store,
            ttl_policy,
            cache_enabled: true,
        }
    }

    /// Toggle caching; with it off every read goes to the transport
    #[must_use]
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Cached GET
    ///
    /// On a valid cache hit the transport is not touched at all: at most one
    /// fetch happens per key per TTL window (barring concurrent misses,
    /// which may each fetch; the last write wins).
    pub async fn read(&self, path: &str, params: &Params, options: ReadOptions) -> Result<Value> {
        let key = derive_key(path, params);

        if self.cache_enabled && !options.force_refresh {
            if let Some(payload) = self.store.get(&key) {
                debug!(key = %key, "cache hit");
                return Ok(payload);
            }
        }

        let request = ApiRequest::get(path).query(query_pairs(params));
        let payload = self.transport.send(request).await?.into_json()?;

        if self.cache_enabled {
            let ttl = self.ttl_policy.resolve(options.ttl, options.category);
            self.store.put(&key, payload.clone(), ttl);
            debug!(key = %key, ttl_secs = ttl.as_secs(), "cache fill");
        }

        Ok(payload)
    }

    /// Cached read of a paginated listing
    pub async fn read_list(&self, path: &str, params: &Params) -> Result<Value> {
        self.read(path, params, ReadOptions::category(CacheCategory::List))
            .await
    }

    /// Cached read of a single resource
    pub async fn read_detail(&self, path: &str) -> Result<Value> {
        self.read(path, &Params::new(), ReadOptions::category(CacheCategory::Detail))
            .await
    }

    /// Uncached mutation; invalidates the resource family on success
    ///
    /// A failed mutation leaves the cache untouched.
    pub async fn mutate(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let mut request = ApiRequest::new(method, path);
        if let Some(body) = body {
            request = request.json(body);
        }

        let payload = self.transport.send(request).await?.into_json()?;

        let prefix = family_prefix(path);
        let removed = self.store.delete_by_prefix(prefix);
        debug!(path = %path, prefix = %prefix, removed, "invalidated after mutation");

        Ok(payload)
    }

    /// POST convenience
    pub async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.mutate(Method::POST, path, Some(body)).await
    }

    /// PUT convenience
    pub async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.mutate(Method::PUT, path, Some(body)).await
    }

    /// DELETE convenience
    pub async fn delete(&self, path: &str, body: Option<Value>) -> Result<Value> {
        self.mutate(Method::DELETE, path, body).await
    }

    /// Multipart upload; invalidates like any other mutation
    pub async fn upload(&self, method: Method, path: &str, form: MultipartForm) -> Result<Value> {
        let request = ApiRequest::new(method, path).multipart(form);
        let payload = self.transport.send(request).await?.into_json()?;

        let prefix = family_prefix(path);
        let removed = self.store.delete_by_prefix(prefix);
        debug!(path = %path, prefix = %prefix, removed, "invalidated after upload");

        Ok(payload)
    }

    /// Raw byte download (exports, documents); never cached
    pub async fn download(&self, path: &str) -> Result<Bytes> {
        let request = ApiRequest::get(path).bytes_response();
        self.transport.send(request).await?.into_bytes()
    }

    /// Whether a valid cached payload exists for this path and params
    pub fn is_cached(&self, path: &str, params: &Params) -> bool {
        self.store.is_valid(&derive_key(path, params))
    }

    /// Cached payload for this path and params, if valid
    pub fn cached(&self, path: &str, params: &Params) -> Option<Value> {
        self.store.get(&derive_key(path, params))
    }

    /// Manually seed the cache
    pub fn put_cached(
        &self,
        path: &str,
        params: &Params,
        payload: Value,
        ttl: Option<Duration>,
        category: CacheCategory,
    ) {
        let key = derive_key(path, params);
        let ttl = self.ttl_policy.resolve(ttl, category);
        self.store.put(&key, payload, ttl);
    }

    /// Drop every cached entry for a resource family
    pub fn invalidate(&self, path: &str) {
        self.store.delete_by_prefix(path);
    }

    /// Drop the entire cache
    pub fn clear_cache(&self) {
        self.store.clear_all();
    }

    /// Shared handle to the underlying store
    #[must_use]
    pub fn store(&self) -> Arc<CacheStore> {
        self.store.clone()
    }

    /// Direct access to the transport for calls that must bypass the cache
    /// entirely (status polling and the like)
    #[must_use]
    pub fn transport(&self) -> Arc<dyn Transport> {
        self.transport.clone()
    }
}

/// Resource-family prefix used for invalidation after a mutation
///
/// A write anywhere in a family (`services/42`, `services/42/toggle`) must
/// force refetches across the whole family: the listing at `services`, the
/// page caches at `services?page=N`, and every sibling detail entry. The
/// first path segment is the family root all those keys share.
fn family_prefix(path: &str) -> &str {
    let trimmed = path.trim_start_matches('/');
    trimmed.split('/').next().unwrap_or(trimmed)
}

/// Serialize params for the wire
///
/// Unlike cache-key derivation this keeps values verbatim (no date
/// collapsing); normalization exists to stop cache fragmentation, not to
/// rewrite what the server receives.
fn query_pairs(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| {
            let repr = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (name.clone(), repr)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn family_prefix_is_the_first_path_segment() {
        assert_eq!(family_prefix("services"), "services");
        assert_eq!(family_prefix("services/42"), "services");
        assert_eq!(family_prefix("services/42/toggle"), "services");
        assert_eq!(family_prefix("/services/42"), "services");
    }

    #[test]
    fn query_pairs_skip_nulls_and_keep_values_verbatim() {
        let params = json!({
            "page": 2,
            "is_active": true,
            "q": null,
            "start_date": "2024-01-05T10:00:00Z"
        })
        .as_object()
        .cloned()
        .expect("object");

        let mut pairs = query_pairs(&params);
        pairs.sort();

        assert_eq!(
            pairs,
            vec![
                ("is_active".to_string(), "true".to_string()),
                ("page".to_string(), "2".to_string()),
                // the wire sees the full timestamp; only the cache key collapses it
                ("start_date".to_string(), "2024-01-05T10:00:00Z".to_string()),
            ]
        );
    }
}
