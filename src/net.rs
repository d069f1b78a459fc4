//! The network interface the agent consumes on install and on cache misses.

use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use url::Url;

use crate::http::{Request, Response};

/// The network the agent fetches from and forwards to.
///
/// Transport failures are `Err`; HTTP error statuses are ordinary responses
/// and left to the caller to interpret.
#[async_trait]
pub trait Network: Send + Sync {
  async fn fetch(&self, request: &Request) -> Result<Response>;
}

/// HTTP client that resolves the manifest's relative paths against the
/// deployed origin.
pub struct HttpNetwork {
  client: reqwest::Client,
  origin: Url,
}

impl HttpNetwork {
  pub fn new(origin: &str) -> Result<Self> {
    let origin = Url::parse(origin).map_err(|e| eyre!("Invalid origin URL {}: {}", origin, e))?;

    Ok(Self {
      client: reqwest::Client::new(),
      origin,
    })
  }

  /// Resolve a manifest path against the origin. Absolute URLs pass through.
  fn resolve(&self, url: &str) -> Result<Url> {
    self
      .origin
      .join(url)
      .map_err(|e| eyre!("Cannot resolve {} against {}: {}", url, self.origin, e))
  }
}

#[async_trait]
impl Network for HttpNetwork {
  async fn fetch(&self, request: &Request) -> Result<Response> {
    let url = self.resolve(&request.url)?;
    let method = reqwest::Method::from_bytes(request.method.as_bytes())
      .map_err(|e| eyre!("Invalid method {}: {}", request.method, e))?;

    let response = self
      .client
      .request(method, url.clone())
      .send()
      .await
      .map_err(|e| eyre!("Request for {} failed: {}", url, e))?;

    let status = response.status().as_u16();
    let headers = response
      .headers()
      .iter()
      .map(|(name, value)| {
        (
          name.to_string(),
          String::from_utf8_lossy(value.as_bytes()).into_owned(),
        )
      })
      .collect();
    let body = response
      .bytes()
      .await
      .map_err(|e| eyre!("Failed to read body of {}: {}", url, e))?
      .to_vec();

    Ok(Response {
      status,
      headers,
      body,
    })
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_resolve_relative_path() {
    let network = HttpNetwork::new("https://app.example.net/").unwrap();
    let url = network.resolve("index.html").unwrap();
    assert_eq!(url.as_str(), "https://app.example.net/index.html");
  }

  #[test]
  fn test_resolve_dot_slash() {
    let network = HttpNetwork::new("https://app.example.net/").unwrap();
    let url = network.resolve("./assets/pico.min.css").unwrap();
    assert_eq!(url.as_str(), "https://app.example.net/assets/pico.min.css");
  }

  #[test]
  fn test_resolve_absolute_url_passes_through() {
    let network = HttpNetwork::new("https://app.example.net/").unwrap();
    let url = network.resolve("https://cdn.example.net/font.woff2").unwrap();
    assert_eq!(url.as_str(), "https://cdn.example.net/font.woff2");
  }

  #[test]
  fn test_invalid_origin_is_rejected() {
    assert!(HttpNetwork::new("not a url").is_err());
  }
}
