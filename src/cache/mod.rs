//! Read-through response cache
//!
//! Key derivation, the TTL-bounded store, the category-to-TTL policy, and
//! the periodic expiry sweep. The caching client in [`crate::client`] ties
//! these together in front of the HTTP transport.

pub mod key;
pub mod store;
pub mod sweeper;
pub mod ttl;

pub use key::{Params, derive_key};
pub use store::{CacheStore, CacheStatsSnapshot};
pub use sweeper::spawn_sweeper;
pub use ttl::{CacheCategory, TtlPolicy};
