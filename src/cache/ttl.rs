//! TTL policy
//!
//! Each endpoint kind maps to a fixed TTL; an explicit per-call TTL wins
//! over the category. Durations are set once at construction and are not
//! runtime-mutable.

use std::time::Duration;

use crate::config::CacheTtlConfig;

/// Logical classification of an endpoint, used to pick a default TTL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheCategory {
    /// Paginated listings
    List,
    /// Single-resource detail views
    Detail,
    /// Search results
    Search,
    /// Dropdown and other near-static data
    Dropdown,
    /// Dashboard statistics
    Dashboard,
    /// Everything else
    #[default]
    Default,
}

/// Resolves the effective TTL for a cache write
#[derive(Debug, Clone)]
pub struct TtlPolicy {
    list: Duration,
    detail: Duration,
    search: Duration,
    dropdown: Duration,
    dashboard: Duration,
    default: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            list: Duration::from_secs(2 * 60),
            detail: Duration::from_secs(5 * 60),
            search: Duration::from_secs(60),
            dropdown: Duration::from_secs(15 * 60),
            dashboard: Duration::from_secs(60),
            default: Duration::from_secs(3 * 60),
        }
    }
}

impl TtlPolicy {
    /// Build a policy from configured durations
    #[must_use]
    pub fn from_config(config: &CacheTtlConfig) -> Self {
        Self {
            list: config.list,
            detail: config.detail,
            search: config.search,
            dropdown: config.dropdown,
            dashboard: config.dashboard,
            default: config.default,
        }
    }

    /// TTL configured for a category
    #[must_use]
    pub fn for_category(&self, category: CacheCategory) -> Duration {
        match category {
            CacheCategory::List => self.list,
            CacheCategory::Detail => self.detail,
            CacheCategory::Search => self.search,
            CacheCategory::Dropdown => self.dropdown,
            CacheCategory::Dashboard => self.dashboard,
            CacheCategory::Default => self.default,
        }
    }

    /// Effective TTL: the explicit value when given and non-zero, otherwise
    /// the category default
    #[must_use]
    pub fn resolve(&self, explicit: Option<Duration>, category: CacheCategory) -> Duration {
        match explicit {
            Some(ttl) if !ttl.is_zero() => ttl,
            _ => self.for_category(category),
        }
    }
}
