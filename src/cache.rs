//! # Route Cache
//!
//! Persists a [`CompiledRouteSet`] as JSON so later processes can skip
//! compilation.
//!
//! ## Format
//!
//! ```json
//! {
//!   "routes": { "<name>": { "alternatives": [...], "methods": [...], ... } },
//!   "dispatch_data": { "methods": [...], "static_routes": {...}, "variable_routes": {...} }
//! }
//! ```
//!
//! Loading checks the top-level shape before decoding the records, so a cache
//! written by something else fails with [`RouterError::CacheCorrupt`] instead
//! of a bare serde error. The decoded dispatch table is then compared with the
//! one rebuilt from the route map; any difference is also corruption.
//!
//! ## Staleness
//!
//! A cache is never compared against the current route definitions. Delete
//! the file to pick up changed routes.

use crate::compiler::CompiledRouteSet;
use crate::error::{Result, RouterError};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Write `set` to `path`.
///
/// # Errors
///
/// [`RouterError::CacheWriteError`] if the parent directory does not exist, is
/// read-only, or the write itself fails.
pub fn save(path: impl AsRef<Path>, set: &CompiledRouteSet) -> Result<()> {
    let path = path.as_ref();
    let dir = cache_dir(path);

    let writable = fs::metadata(&dir)
        .map(|meta| meta.is_dir() && !meta.permissions().readonly())
        .unwrap_or(false);
    if !writable {
        return Err(RouterError::CacheWriteError { dir, source: None });
    }

    let json = serde_json::to_vec_pretty(set).map_err(|e| RouterError::CacheWriteError {
        dir: dir.clone(),
        source: Some(e.into()),
    })?;
    fs::write(path, json).map_err(|e| RouterError::CacheWriteError {
        dir,
        source: Some(e),
    })?;

    info!(
        cache_file = %path.display(),
        routes_count = set.routes.len(),
        "Route cache written"
    );
    Ok(())
}

/// Read a compiled route set from `path`.
///
/// # Errors
///
/// - [`RouterError::CacheReadError`] if the file cannot be read
/// - [`RouterError::CacheCorrupt`] if the content is not a well-formed route set
pub fn load(path: impl AsRef<Path>) -> Result<CompiledRouteSet> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| RouterError::CacheReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let set = decode(&bytes)
        .and_then(verify)
        .map_err(|reason| RouterError::CacheCorrupt {
            path: path.to_path_buf(),
            reason,
        })?;

    info!(
        cache_file = %path.display(),
        routes_count = set.routes.len(),
        "Route cache loaded"
    );
    Ok(set)
}

fn decode(bytes: &[u8]) -> std::result::Result<CompiledRouteSet, String> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| format!("not JSON: {e}"))?;
    let object = value.as_object().ok_or("top-level value is not an object")?;
    for key in ["routes", "dispatch_data"] {
        match object.get(key) {
            Some(Value::Object(_)) => {}
            Some(_) => return Err(format!("\"{key}\" is not an object")),
            None => return Err(format!("missing \"{key}\"")),
        }
    }
    debug!("Route cache shape validated");
    serde_json::from_value(value).map_err(|e| format!("malformed route records: {e}"))
}

/// The dispatch table must be exactly the one the route map compiles to.
fn verify(set: CompiledRouteSet) -> std::result::Result<CompiledRouteSet, String> {
    let rebuilt = set
        .rebuild_dispatch_data()
        .map_err(|e| format!("routes do not compile: {e}"))?;
    if rebuilt != set.dispatch_data {
        return Err("dispatch_data does not match routes".to_string());
    }
    Ok(set)
}

/// Directory the cache file lives in; a bare file name means the working
/// directory.
fn cache_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
