//! # Router Configuration
//!
//! Controls whether the compiled route table is persisted between runs.
//!
//! ## Environment Variables
//!
//! ### `ROUTEMAP_CACHE`
//!
//! Enables the route cache when set to `1`, `true`, `on` or `yes`
//! (case-insensitive). Anything else, or unset, disables it.
//!
//! ### `ROUTEMAP_CACHE_FILE`
//!
//! Location of the cache file. Default: `data/cache/routes.cache.json`.
//! The directory must already exist; it is never created.
//!
//! ## Usage
//!
//! ```rust
//! use routemap::config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! if config.cache_enabled {
//!     println!("route cache at {}", config.cache_file.display());
//! }
//! ```

use std::env;
use std::path::PathBuf;

/// Default location of the route cache file.
pub const DEFAULT_CACHE_FILE: &str = "data/cache/routes.cache.json";

/// Caching behavior of a [`Router`](crate::router::Router).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Load from / save to `cache_file` instead of always compiling
    pub cache_enabled: bool,
    /// Path of the JSON cache file
    pub cache_file: PathBuf,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cache_enabled: false,
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
        }
    }
}

impl RouterConfig {
    /// Caching enabled at `cache_file`
    pub fn cached(cache_file: impl Into<PathBuf>) -> Self {
        Self {
            cache_enabled: true,
            cache_file: cache_file.into(),
        }
    }

    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let cache_enabled = env::var("ROUTEMAP_CACHE")
            .map(|val| matches!(val.to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes"))
            .unwrap_or(false);
        let cache_file = env::var_os("ROUTEMAP_CACHE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_FILE));
        RouterConfig {
            cache_enabled,
            cache_file,
        }
    }
}
