//! Storage interface for named request/response caches.

use chrono::{DateTime, Utc};
use color_eyre::Result;

use crate::http::{Request, Response};

/// A response record as it came back out of storage.
#[derive(Debug, Clone)]
pub struct CachedResponse {
  /// The stored response, byte for byte as it was written
  pub response: Response,
  /// When the entry was written
  pub cached_at: DateTime<Utc>,
}

/// Backend for named caches: a durable map from (cache name, request
/// identity) to full response records.
///
/// Implementations serialize their own access; callers never lock. Writes
/// replace any previous entry under the same identity, which is what keeps
/// re-running installs idempotent.
pub trait CacheStorage: Send + Sync {
  /// Look up a stored response by request identity.
  fn get(&self, cache_name: &str, request: &Request) -> Result<Option<CachedResponse>>;

  /// Store a response under the request's identity, replacing any previous
  /// entry.
  fn put(&self, cache_name: &str, request: &Request, response: &Response) -> Result<()>;

  /// Number of entries in the named cache.
  fn count(&self, cache_name: &str) -> Result<usize>;
}
