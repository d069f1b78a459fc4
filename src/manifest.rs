//! The asset manifest: the fixed, ordered list of relative paths the app
//! shell needs offline, plus the cache-name token used to version the store.

/// Name of the cache this agent owns.
///
/// Bumping the version suffix orphans the previous cache's entries. Orphaned
/// caches are not reclaimed; versioning is manual.
pub const CACHE_NAME: &str = "appshell-v1";

/// Application shell: entry page, PWA manifest, compiled bundle with its
/// binary payload, stylesheets, and this agent's own script entry.
const SHELL_FILES: &[&str] = &[
  "./",
  "index.html",
  "manifest.json",
  "appshell.js",
  "index.css",
  "pico.min.css",
  "app.js",
  "app_bg.wasm",
];

/// Everything under the deployed assets directory.
const ASSET_FILES: &[&str] = &[
  "./assets/fontawesome/css/all.css",
  "./assets/fontawesome/css/all.min.css",
  "./assets/fontawesome/css/brands.css",
  "./assets/fontawesome/css/brands.min.css",
  "./assets/fontawesome/css/fontawesome.css",
  "./assets/fontawesome/css/fontawesome.min.css",
  "./assets/fontawesome/css/regular.css",
  "./assets/fontawesome/css/regular.min.css",
  "./assets/fontawesome/css/solid.css",
  "./assets/fontawesome/css/solid.min.css",
  "./assets/fontawesome/webfonts/fa-brands-400.ttf",
  "./assets/fontawesome/webfonts/fa-brands-400.woff2",
  "./assets/fontawesome/webfonts/fa-regular-400.ttf",
  "./assets/fontawesome/webfonts/fa-regular-400.woff2",
  "./assets/fontawesome/webfonts/fa-solid-900.ttf",
  "./assets/fontawesome/webfonts/fa-solid-900.woff2",
  "./assets/icons/maskable_icon_x48.png",
  "./assets/icons/maskable_icon_x96.png",
  "./assets/icons/maskable_icon_x128.png",
  "./assets/icons/maskable_icon_x192.png",
  "./assets/icons/maskable_icon_x384.png",
  "./assets/icons/maskable_icon_x512.png",
  "./assets/icons/maskable_icon_x512.icns",
  "./assets/icons/maskable_icon_x512.ico",
  "./assets/minimal-theme-switcher.js",
  "./assets/pico.min.css",
];

/// Ordered list of relative asset paths to preload at install time.
///
/// Immutable after construction. Duplicates are tolerated; they just get
/// fetched and stored twice.
#[derive(Debug, Clone)]
pub struct Manifest {
  paths: Vec<String>,
}

impl Manifest {
  /// The deployed application's manifest: shell files first, then the
  /// expanded assets directory.
  pub fn app_shell() -> Self {
    Self::from_paths(SHELL_FILES.iter().chain(ASSET_FILES.iter()).copied())
  }

  /// Build a manifest from an explicit path list, preserving order.
  pub fn from_paths<I, S>(paths: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      paths: paths.into_iter().map(Into::into).collect(),
    }
  }

  pub fn paths(&self) -> &[String] {
    &self.paths
  }

  pub fn len(&self) -> usize {
    self.paths.len()
  }

  pub fn is_empty(&self) -> bool {
    self.paths.is_empty()
  }

  pub fn contains(&self, path: &str) -> bool {
    self.paths.iter().any(|p| p == path)
  }
}
