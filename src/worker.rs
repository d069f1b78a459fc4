//! The offline agent: install-time cache population and cache-first request
//! interception.

use color_eyre::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cache::{Cache, CacheStorage};
use crate::event::LifecycleEvent;
use crate::http::{Request, Response};
use crate::manifest::Manifest;
use crate::net::Network;

/// The agent: one manifest, one named cache, one network.
pub struct Worker<S: CacheStorage, N: Network> {
  manifest: Manifest,
  cache: Cache<S>,
  network: Arc<N>,
}

impl<S, N> Worker<S, N>
where
  S: CacheStorage + 'static,
  N: Network + 'static,
{
  pub fn new(manifest: Manifest, cache_name: &str, storage: Arc<S>, network: Arc<N>) -> Self {
    Self {
      manifest,
      cache: Cache::open(storage, cache_name),
      network,
    }
  }

  /// Install: populate the named cache with every manifest path.
  ///
  /// All-or-nothing: the first path that fails to fetch or store fails the
  /// whole install, and the failure is reported to whoever delivered the
  /// signal. Entries stored before the failure stay behind; a retried
  /// install re-stores them.
  pub async fn handle_install(&self) -> Result<()> {
    info!(cache = %self.cache.name(), assets = self.manifest.len(), "installing");

    self
      .cache
      .add_all(self.network.as_ref(), self.manifest.paths())
      .await?;

    info!(cache = %self.cache.name(), "install complete");
    Ok(())
  }

  /// Fetch: answer cache-first.
  ///
  /// A hit is returned verbatim, with no freshness check and no network
  /// contact. A miss goes to the network unmodified and the result, success
  /// or failure, comes back as-is; miss responses are never cached, so the
  /// cache only ever holds what install put there.
  pub async fn handle_fetch(&self, request: &Request) -> Result<Response> {
    if let Some(response) = self.cache.matching(request)? {
      debug!(url = %request.url, "cache hit");
      return Ok(response);
    }

    debug!(url = %request.url, "cache miss, forwarding to network");
    self.network.fetch(request).await
  }

  /// Event loop: consume lifecycle signals until the channel closes.
  ///
  /// Every signal is handled on its own task. Fetches are independent of
  /// each other and may race a still-running install; a transient miss
  /// before the install settles only degrades first-load behavior.
  pub async fn run(self, mut events: mpsc::UnboundedReceiver<LifecycleEvent>) {
    let worker = Arc::new(self);

    while let Some(event) = events.recv().await {
      match event {
        LifecycleEvent::Install { done } => {
          let worker = Arc::clone(&worker);
          tokio::spawn(async move {
            let result = worker.handle_install().await;
            if let Err(err) = &result {
              warn!("install failed: {:#}", err);
            }
            let _ = done.send(result);
          });
        }
        LifecycleEvent::Fetch {
          request,
          respond_to,
        } => {
          let worker = Arc::clone(&worker);
          tokio::spawn(async move {
            let _ = respond_to.send(worker.handle_fetch(&request).await);
          });
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::MemoryStorage;
  use crate::event::lifecycle_channel;
  use crate::net::testing::StaticNetwork;

  const TEST_CACHE: &str = "appshell-test";
  const TEST_MANIFEST: &[&str] = &["./", "index.html", "app.js"];

  fn worker_with(
    network: StaticNetwork,
  ) -> (
    Worker<MemoryStorage, StaticNetwork>,
    Arc<MemoryStorage>,
    Arc<StaticNetwork>,
  ) {
    let storage = Arc::new(MemoryStorage::new());
    let network = Arc::new(network);
    let worker = Worker::new(
      Manifest::from_paths(TEST_MANIFEST.iter().copied()),
      TEST_CACHE,
      Arc::clone(&storage),
      Arc::clone(&network),
    );
    (worker, storage, network)
  }

  #[tokio::test]
  async fn test_install_caches_every_manifest_path() {
    let (worker, storage, network) = worker_with(StaticNetwork::serving(TEST_MANIFEST));

    worker.handle_install().await.unwrap();
    assert_eq!(storage.count(TEST_CACHE).unwrap(), 3);

    // Every path is answerable with the network down, without touching it
    network.set_offline(true);
    let calls_before = network.calls();
    for path in TEST_MANIFEST {
      let response = worker.handle_fetch(&Request::get(*path)).await.unwrap();
      assert_eq!(response.status, 200);
    }
    assert_eq!(network.calls(), calls_before);
  }

  #[tokio::test]
  async fn test_single_404_fails_whole_install() {
    // "app.js" is not served and 404s; the preceding paths succeed
    let (worker, storage, _network) = worker_with(StaticNetwork::serving(&["./", "index.html"]));

    assert!(worker.handle_install().await.is_err());
    assert!(storage.count(TEST_CACHE).unwrap() <= 2);
  }

  #[tokio::test]
  async fn test_transport_error_fails_whole_install() {
    let (worker, _storage, network) = worker_with(StaticNetwork::serving(TEST_MANIFEST));
    network.set_offline(true);

    assert!(worker.handle_install().await.is_err());
  }

  #[tokio::test]
  async fn test_reinstall_is_idempotent() {
    let (worker, storage, _network) = worker_with(StaticNetwork::serving(TEST_MANIFEST));

    worker.handle_install().await.unwrap();
    worker.handle_install().await.unwrap();

    assert_eq!(storage.count(TEST_CACHE).unwrap(), 3);
  }

  #[tokio::test]
  async fn test_miss_passes_through_unmodified() {
    let network = StaticNetwork::serving(TEST_MANIFEST).route(
      "unknown.png",
      Response {
        status: 200,
        headers: vec![],
        body: b"png bytes".to_vec(),
      },
    );
    let (worker, storage, _network) = worker_with(network);
    worker.handle_install().await.unwrap();

    let response = worker.handle_fetch(&Request::get("unknown.png")).await.unwrap();
    assert_eq!(response.body, b"png bytes");

    // The miss result is not cached; growth is bounded to the manifest
    assert_eq!(storage.count(TEST_CACHE).unwrap(), 3);
  }

  #[tokio::test]
  async fn test_miss_network_failure_propagates() {
    let (worker, _storage, network) = worker_with(StaticNetwork::serving(TEST_MANIFEST));
    worker.handle_install().await.unwrap();
    network.set_offline(true);

    assert!(worker.handle_fetch(&Request::get("unknown.png")).await.is_err());
  }

  #[tokio::test]
  async fn test_cached_reads_are_idempotent() {
    let (worker, _storage, network) = worker_with(StaticNetwork::serving(TEST_MANIFEST));
    worker.handle_install().await.unwrap();

    let first = worker.handle_fetch(&Request::get("app.js")).await.unwrap();
    network.set_offline(true);
    let second = worker.handle_fetch(&Request::get("app.js")).await.unwrap();

    assert_eq!(first, second);
  }

  #[tokio::test]
  async fn test_fetch_before_install_falls_through_to_network() {
    let (worker, _storage, network) = worker_with(StaticNetwork::serving(TEST_MANIFEST));

    let response = worker.handle_fetch(&Request::get("index.html")).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(network.calls(), 1);
  }

  #[tokio::test]
  async fn test_event_loop_answers_install_and_fetch() {
    let (worker, _storage, _network) = worker_with(StaticNetwork::serving(TEST_MANIFEST));
    let (handle, events) = lifecycle_channel();
    tokio::spawn(worker.run(events));

    handle.install().await.unwrap();

    let response = handle.fetch(Request::get("index.html")).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"contents of index.html");
  }

  #[tokio::test]
  async fn test_event_loop_reports_install_failure() {
    let (worker, _storage, _network) = worker_with(StaticNetwork::serving(&["./"]));
    let (handle, events) = lifecycle_channel();
    tokio::spawn(worker.run(events));

    assert!(handle.install().await.is_err());
  }
}
