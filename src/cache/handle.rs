//! Handle to one named cache.

use color_eyre::{eyre::eyre, Result};
use std::sync::Arc;
use tracing::debug;

use super::traits::CacheStorage;
use crate::http::{Request, Response};
use crate::net::Network;

/// One named cache opened against a storage backend.
///
/// The name is the versioning token: a handle only ever sees entries written
/// under the same name, so bumping the name orphans the previous cache.
pub struct Cache<S: CacheStorage> {
  storage: Arc<S>,
  name: String,
}

impl<S: CacheStorage> Cache<S> {
  /// Open (or create) the cache called `name`. Creation is lazy; an empty
  /// cache has no backing rows.
  pub fn open(storage: Arc<S>, name: impl Into<String>) -> Self {
    Self {
      storage,
      name: name.into(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Look up a stored response by request identity.
  pub fn matching(&self, request: &Request) -> Result<Option<Response>> {
    Ok(
      self
        .storage
        .get(&self.name, request)?
        .map(|cached| cached.response),
    )
  }

  /// Store one response under the request's identity.
  pub fn put(&self, request: &Request, response: &Response) -> Result<()> {
    self.storage.put(&self.name, request, response)
  }

  /// Fetch every path over the network and store the result, failing fast.
  ///
  /// A transport error or non-OK status on any path aborts the whole
  /// operation. Entries stored before the failure are left in place; the next
  /// attempt overwrites them.
  pub async fn add_all(&self, network: &dyn Network, paths: &[String]) -> Result<()> {
    for path in paths {
      let request = Request::get(path.clone());
      let response = network.fetch(&request).await?;

      if !response.is_ok() {
        return Err(eyre!("Fetch of {} returned status {}", path, response.status));
      }

      self.put(&request, &response)?;
      debug!(cache = %self.name, path = %path, "cached asset");
    }

    Ok(())
  }

  /// Number of stored entries.
  pub fn len(&self) -> Result<usize> {
    self.storage.count(&self.name)
  }
}

impl<S: CacheStorage> Clone for Cache<S> {
  fn clone(&self) -> Self {
    Self {
      storage: Arc::clone(&self.storage),
      name: self.name.clone(),
    }
  }
}
