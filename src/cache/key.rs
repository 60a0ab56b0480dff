//! Cache key derivation
//!
//! Keys are the request path plus a canonical query string: null parameters
//! dropped, names sorted, values percent-encoded. Two parameter sets that
//! are equal as unordered mappings always derive the same key, and the path
//! is a literal prefix of the key so mutations can invalidate a whole
//! resource family by prefix.

use chrono::{DateTime, NaiveDateTime};
use serde_json::{Map, Value};

/// Request parameters as an unordered name/value mapping
pub type Params = Map<String, Value>;

/// Derive the canonical cache key for `path` and `params`
///
/// Pure and deterministic; no I/O.
#[must_use]
pub fn derive_key(path: &str, params: &Params) -> String {
    let mut names: Vec<&String> = params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, _)| name)
        .collect();
    names.sort_unstable();

    if names.is_empty() {
        return path.to_string();
    }

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for name in names {
        serializer.append_pair(name, &key_repr(&params[name.as_str()]));
    }

    format!("{path}?{}", serializer.finish())
}

/// Canonical value representation used inside keys
///
/// Date-like strings collapse to their calendar date so a timestamp that
/// merely differs in time-of-day does not fragment the cache.
fn key_repr(value: &Value) -> String {
    match value {
        Value::String(s) => normalize_date(s).unwrap_or_else(|| s.clone()),
        other => other.to_string(),
    }
}

/// Date-only portion of an ISO-8601 datetime string, if it is one
fn normalize_date(s: &str) -> Option<String> {
    if !s.contains('T') {
        return None;
    }

    let date = DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .or_else(|_| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date())
        })
        .ok()?;

    Some(date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn params(value: Value) -> Params {
        value.as_object().cloned().expect("object literal")
    }

    #[test]
    fn key_without_params_is_the_path() {
        assert_eq!(derive_key("services", &Params::new()), "services");
    }

    #[test]
    fn key_is_insertion_order_independent() {
        let a = params(json!({"page": 1, "per_page": 10}));
        let b = params(json!({"per_page": 10, "page": 1}));
        assert_eq!(derive_key("services", &a), derive_key("services", &b));
    }

    #[test]
    fn names_are_sorted_lexicographically() {
        let p = params(json!({"zeta": "z", "alpha": "a"}));
        assert_eq!(derive_key("services", &p), "services?alpha=a&zeta=z");
    }

    #[test]
    fn null_params_are_excluded() {
        let p = params(json!({"page": 1, "is_active": null}));
        assert_eq!(derive_key("services", &p), "services?page=1");

        let only_null = params(json!({"is_active": null}));
        assert_eq!(derive_key("services", &only_null), "services");
    }

    #[test]
    fn datetime_values_collapse_to_date() {
        let timestamped = params(json!({"start_date": "2024-01-05T10:00:00Z"}));
        let date_only = params(json!({"start_date": "2024-01-05"}));
        assert_eq!(
            derive_key("exports/service-requests", &timestamped),
            derive_key("exports/service-requests", &date_only),
        );
    }

    #[test]
    fn naive_datetime_also_collapses() {
        let p = params(json!({"end_date": "2024-03-31T23:59:59.999"}));
        assert_eq!(derive_key("exports", &p), "exports?end_date=2024-03-31");
    }

    #[test]
    fn non_date_strings_pass_through_encoded() {
        let p = params(json!({"q": "deep clean & polish"}));
        assert_eq!(derive_key("services", &p), "services?q=deep+clean+%26+polish");
    }

    #[test]
    fn path_is_a_literal_prefix_of_the_key() {
        let p = params(json!({"page": 2}));
        let key = derive_key("services", &p);
        assert!(key.starts_with("services"));
    }

    #[test]
    fn distinct_paths_never_collide() {
        let p = params(json!({"page": 1}));
        assert_ne!(derive_key("services", &p), derive_key("customers", &p));
    }
}
