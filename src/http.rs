//! Request and response records.
//!
//! The agent treats both as opaque beyond identity: a request is looked up by
//! method + URL, a response is stored and replayed as-is.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A request to be answered by the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
  pub method: String,
  pub url: String,
}

impl Request {
  /// A GET request for the given URL or relative path.
  pub fn get(url: impl Into<String>) -> Self {
    Self {
      method: "GET".to_string(),
      url: url.into(),
    }
  }

  /// Stable fixed-length key for this request's identity (method + URL).
  pub fn cache_key(&self) -> String {
    // SHA256 hash for stable, fixed-length keys
    let mut hasher = Sha256::new();
    hasher.update(self.method.as_bytes());
    hasher.update(b" ");
    hasher.update(self.url.as_bytes());
    hex::encode(hasher.finalize())
  }
}

/// A full response record: status, headers and body. Stored and returned
/// verbatim, never transformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
  pub status: u16,
  pub headers: Vec<(String, String)>,
  pub body: Vec<u8>,
}

impl Response {
  /// Whether the status is in the success class.
  pub fn is_ok(&self) -> bool {
    (200..300).contains(&self.status)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cache_key_is_stable() {
    let a = Request::get("index.html");
    let b = Request::get("index.html");
    assert_eq!(a.cache_key(), b.cache_key());
  }

  #[test]
  fn test_cache_key_varies_by_url() {
    assert_ne!(
      Request::get("index.html").cache_key(),
      Request::get("index.css").cache_key()
    );
  }

  #[test]
  fn test_cache_key_varies_by_method() {
    let get = Request::get("index.html");
    let head = Request {
      method: "HEAD".to_string(),
      url: "index.html".to_string(),
    };
    assert_ne!(get.cache_key(), head.cache_key());
  }

  #[test]
  fn test_status_classes() {
    let mut response = Response {
      status: 200,
      headers: vec![],
      body: vec![],
    };
    assert!(response.is_ok());
    response.status = 304;
    assert!(!response.is_ok());
    response.status = 404;
    assert!(!response.is_ok());
  }
}
