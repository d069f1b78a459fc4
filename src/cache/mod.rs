//! Named request/response caches backing the offline agent.
//!
//! A cache is a durable map from request identity (method + URL) to a full
//! response record, identified by a name that doubles as the versioning
//! token. This module provides:
//! - The `CacheStorage` backend trait with SQLite and in-memory backends
//! - The `Cache` handle bound to one cache name, with lookup and bulk
//!   populate operations

mod handle;
mod storage;
mod traits;

pub use handle::Cache;
pub use storage::{MemoryStorage, SqliteStorage};
pub use traits::{CacheStorage, CachedResponse};
