use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Host-side configuration: where the application is deployed and where the
/// cache database lives.
///
/// The cache name and the asset manifest are compile-time constants, not
/// configuration; this file only wires up the agent's collaborators.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  /// Origin the manifest's relative paths resolve against,
  /// e.g. "https://app.example.net/"
  pub origin: String,
  /// Override for the cache database path (default: XDG data dir)
  pub cache_db: Option<PathBuf>,
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./appshell.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/appshell/config.yaml
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Err(eyre!(
        "No configuration file found. Create one at ~/.config/appshell/config.yaml\n\
                 with at least an `origin:` entry."
      )),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("appshell.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("appshell").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str("origin: https://app.example.net/").unwrap();
    assert_eq!(config.origin, "https://app.example.net/");
    assert!(config.cache_db.is_none());
  }

  #[test]
  fn test_parse_config_with_cache_db() {
    let config: Config = serde_yaml::from_str(
      "origin: https://app.example.net/\ncache_db: /tmp/appshell/cache.db\n",
    )
    .unwrap();
    assert_eq!(
      config.cache_db,
      Some(PathBuf::from("/tmp/appshell/cache.db"))
    );
  }

  #[test]
  fn test_explicit_missing_path_is_an_error() {
    assert!(Config::load(Some(Path::new("/nonexistent/appshell.yaml"))).is_err());
  }
}
