mod cache;
mod config;
mod event;
mod http;
mod manifest;
mod net;
mod worker;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::cache::{Cache, SqliteStorage};
use crate::event::lifecycle_channel;
use crate::http::Request;
use crate::manifest::{Manifest, CACHE_NAME};
use crate::net::HttpNetwork;
use crate::worker::Worker;

#[derive(Parser, Debug)]
#[command(name = "appshell")]
#[command(about = "Cache-first offline agent for single-page app shells")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/appshell/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Populate the cache with every asset in the manifest
  Install,
  /// Resolve one request through the agent, cache-first
  Fetch {
    /// Relative path to request, e.g. "index.html"
    path: String,
    /// Write the response body here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// Report cache name, entry count and manifest size
  Status,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  let config = config::Config::load(args.config.as_deref())?;

  let storage = Arc::new(match &config.cache_db {
    Some(path) => SqliteStorage::open_at(path)?,
    None => SqliteStorage::open()?,
  });

  match args.command {
    Command::Install => {
      let network = Arc::new(HttpNetwork::new(&config.origin)?);
      let worker = Worker::new(Manifest::app_shell(), CACHE_NAME, storage, network);
      let (handle, events) = lifecycle_channel();
      tokio::spawn(worker.run(events));

      handle.install().await?;
      println!("cache {} is warm", CACHE_NAME);
    }
    Command::Fetch { path, output } => {
      let network = Arc::new(HttpNetwork::new(&config.origin)?);
      let worker = Worker::new(Manifest::app_shell(), CACHE_NAME, storage, network);
      let (handle, events) = lifecycle_channel();
      tokio::spawn(worker.run(events));

      let response = handle.fetch(Request::get(path)).await?;
      match output {
        Some(out) => std::fs::write(&out, &response.body)?,
        None => std::io::stdout().write_all(&response.body)?,
      }
    }
    Command::Status => {
      let manifest = Manifest::app_shell();
      let cache = Cache::open(storage, CACHE_NAME);
      println!("cache:    {}", CACHE_NAME);
      println!("entries:  {}", cache.len()?);
      println!("manifest: {} assets", manifest.len());
    }
  }

  Ok(())
}
