//! Lifecycle signals delivered to the worker.
//!
//! The host side holds a `LifecycleHandle` and the worker consumes the
//! receiving end of the channel, so tests can drive install and fetch
//! signals without a real platform runtime.

use color_eyre::{eyre::eyre, Result};
use tokio::sync::{mpsc, oneshot};

use crate::http::{Request, Response};

/// A signal from the host platform.
#[derive(Debug)]
pub enum LifecycleEvent {
  /// Install: `done` resolves once cache population finishes, so the host
  /// can defer activation until the cache is warm.
  Install { done: oneshot::Sender<Result<()>> },
  /// Fetch: the handler supplies the response instead of the default
  /// network path.
  Fetch {
    request: Request,
    respond_to: oneshot::Sender<Result<Response>>,
  },
}

/// Sending side of the lifecycle channel.
#[derive(Clone)]
pub struct LifecycleHandle {
  tx: mpsc::UnboundedSender<LifecycleEvent>,
}

impl LifecycleHandle {
  /// Deliver an install signal and wait until population resolves or fails.
  pub async fn install(&self) -> Result<()> {
    let (done, completion) = oneshot::channel();

    self
      .tx
      .send(LifecycleEvent::Install { done })
      .map_err(|_| eyre!("Worker is gone"))?;

    completion
      .await
      .map_err(|_| eyre!("Worker dropped the install signal"))?
  }

  /// Deliver a fetch signal and wait for the substituted response.
  pub async fn fetch(&self, request: Request) -> Result<Response> {
    let (respond_to, response) = oneshot::channel();

    self
      .tx
      .send(LifecycleEvent::Fetch {
        request,
        respond_to,
      })
      .map_err(|_| eyre!("Worker is gone"))?;

    response
      .await
      .map_err(|_| eyre!("Worker dropped the fetch signal"))?
  }
}

/// Create the lifecycle channel: a handle for the host and a receiver for
/// the worker's event loop.
pub fn lifecycle_channel() -> (LifecycleHandle, mpsc::UnboundedReceiver<LifecycleEvent>) {
  let (tx, rx) = mpsc::unbounded_channel();
  (LifecycleHandle { tx }, rx)
}
