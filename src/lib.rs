//! HomeServe Client Library
//!
//! Caching REST API client for the HomeServe household-services platform:
//! customers request services, professionals fulfil them, admins moderate.
//!
//! # Features
//!
//! - **Read-through cache**: deterministic keys, per-category TTLs, prefix
//!   invalidation on mutation, periodic expiry sweep
//! - **Interceptor pipeline**: bearer-token attachment with pre-flight
//!   expiry check; unified failure classification with notification,
//!   session-clearing, and redirect side effects
//! - **Typed resource clients**: auth, services, requests, professionals,
//!   customers, stats, exports
//!
//! UI concerns stay behind the [`notify::Notifier`], [`navigate::Navigator`]
//! and [`session::Session`] collaborator traits.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod cache;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod navigate;
pub mod notify;
pub mod session;
pub mod token;
pub mod transport;

pub use client::{ApiClient, ReadOptions};
pub use config::ClientConfig;
pub use error::{Error, Result};

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cache::{CacheStore, TtlPolicy, spawn_sweeper};
use clock::{Clock, SystemClock};
use interceptor::{AuthInterceptor, ErrorInterceptor};
use navigate::Navigator;
use notify::Notifier;
use session::Session;
use transport::HttpTransport;

/// Setup tracing/logging
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        Some("json") => {
            subscriber.with(fmt::layer().json()).init();
        }
        _ => {
            subscriber.with(fmt::layer()).init();
        }
    }

    Ok(())
}

/// Wire up a production client
///
/// Builds the HTTP transport with the auth and error interceptors, the cache
/// store on the system clock, and (when caching is enabled) spawns the
/// periodic expiry sweep. Must be called from within a tokio runtime.
///
/// # Errors
///
/// Returns an error if the configured base URL is invalid or the HTTP client
/// cannot be constructed.
pub fn build_client(
    config: &ClientConfig,
    session: Arc<dyn Session>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
) -> Result<Arc<ApiClient>> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let transport = HttpTransport::new(config)?
        .with_request_interceptor(Arc::new(AuthInterceptor::new(
            session.clone(),
            navigator.clone(),
            clock.clone(),
        )))
        .with_response_interceptor(Arc::new(ErrorInterceptor::new(
            session, notifier, navigator,
        )));

    let store = Arc::new(CacheStore::new(clock));
    let ttl_policy = TtlPolicy::from_config(&config.cache.ttl);

    if config.cache.enabled {
        spawn_sweeper(store.clone(), config.cache.sweep_interval);
    }

    let client = ApiClient::new(Arc::new(transport), store, ttl_policy)
        .with_cache_enabled(config.cache.enabled);
    Ok(Arc::new(client))
}
