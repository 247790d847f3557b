//! Query cache
//!
//! Read-through cache for GET responses with typed keys and per-key stale
//! times. Services call [`QueryCache::apply`] after every successful write.

pub mod keys;
pub mod store;

pub use keys::{CacheKey, CacheScope, Mutation};
pub use store::{CacheEntry, QueryCache};
