//! File access for catalog loading
//!
//! The loader never touches the filesystem directly; it goes through a [`FileProvider`] so the
//! capability can be swapped out or left absent entirely.

use bevy::prelude::*;
use directories::ProjectDirs;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable overriding the catalog location.
pub const CATALOG_ENV_VAR: &str = "BEVYSTARS_CATALOG";
pub const CATALOG_FILE_NAME: &str = "catalog.json";

/// Text file access used by the catalog loader
pub trait FileProvider: Send + Sync {
    fn read_file(&self, path: &Path) -> io::Result<String>;
}

/// Reads UTF-8 files from the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFileProvider;

impl FileProvider for FsFileProvider {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// Where and how to read the catalog
#[derive(Resource, Clone)]
pub struct CatalogSettings {
    pub path: PathBuf,
    /// `None` when no file access is available; the fallback catalog is used.
    pub provider: Option<Arc<dyn FileProvider>>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: resolve_catalog_path(),
            provider: Some(Arc::new(FsFileProvider)),
        }
    }
}

/// Resolve the catalog path from the environment and the platform data directory.
///
/// - Linux: ~/.local/share/bevystars/catalog.json
/// - macOS: ~/Library/Application Support/bevystars/catalog.json
/// - Windows: %APPDATA%\bevystars\data\catalog.json
pub fn resolve_catalog_path() -> PathBuf {
    let data_dir_candidate = ProjectDirs::from("", "", "bevystars")
        .map(|dirs| dirs.data_dir().join(CATALOG_FILE_NAME));
    resolve_catalog_path_from(std::env::var_os(CATALOG_ENV_VAR), data_dir_candidate)
}

/// Precedence: explicit override, then an existing data-dir file, then `assets/catalog.json`.
pub fn resolve_catalog_path_from(
    env_override: Option<OsString>,
    data_dir_candidate: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = env_override.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    if let Some(path) = data_dir_candidate.filter(|p| p.is_file()) {
        return path;
    }
    Path::new("assets").join(CATALOG_FILE_NAME)
}
