//! Star catalog data types and communication structures

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::{
    Arc, Mutex,
    mpsc::{Receiver, Sender},
};

/// Harvard spectral sequence, hottest first.
pub const SPECTRAL_CLASSES: [char; 7] = ['O', 'B', 'A', 'F', 'G', 'K', 'M'];

/// Catalog identifier; files use either numeric or string ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StarId {
    Number(i64),
    Text(String),
}

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarId::Number(n) => write!(f, "{}", n),
            StarId::Text(s) => f.write_str(s),
        }
    }
}

/// One catalog entry. Every field is optional; missing data is derived when the scene is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarRecord {
    pub id: Option<StarId>,
    #[serde(alias = "proper")]
    pub name: Option<String>,
    /// Right ascension in hours [0, 24)
    pub ra: Option<f32>,
    /// Declination in degrees [-90, 90]
    pub dec: Option<f32>,
    /// Apparent magnitude
    #[serde(alias = "magnitude")]
    pub mag: Option<f32>,
    /// B-V color index
    #[serde(alias = "ci", alias = "b_v")]
    pub bv: Option<f32>,
    /// Distance in parsecs
    #[serde(alias = "distance")]
    pub dist: Option<f32>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
    #[serde(alias = "spectral_class", alias = "spectralClass")]
    pub spectral: Option<String>,
}

impl StarRecord {
    /// Name shown in the overlay, falling back to the id.
    pub fn display_name(&self) -> String {
        match (&self.name, &self.id) {
            (Some(name), _) if !name.trim().is_empty() => name.clone(),
            (_, Some(id)) => format!("Star {}", id),
            _ => "Unnamed star".to_string(),
        }
    }
}

/// Where the active catalog came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Generated,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Generated => f.write_str("generated"),
        }
    }
}

/// Result of one load attempt. Always carries a non-empty catalog.
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub records: Vec<StarRecord>,
    pub source: CatalogSource,
    /// Informational message when the file could not be used
    pub notice: Option<String>,
}

/// Commands for the catalog worker thread
#[derive(Debug)]
pub enum CatalogCommand {
    Load,
}

/// Resource containing channels for communicating with the catalog worker thread
#[derive(Resource)]
pub struct CatalogChannels {
    pub cmd_tx: Sender<CatalogCommand>,
    pub res_rx: Arc<Mutex<Receiver<CatalogLoad>>>,
}

/// Loading lifecycle. The scene only exists while `Ready`.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CatalogState {
    #[default]
    Loading,
    Ready,
}

/// The loaded catalog; star entities index into `records`.
#[derive(Resource, Debug, Default, Deref)]
pub struct StarCatalog {
    pub records: Vec<StarRecord>,
}

impl StarCatalog {
    pub fn new(records: Vec<StarRecord>) -> Self {
        Self { records }
    }
}

/// Load status surfaced in the overlay
#[derive(Resource, Debug)]
pub struct CatalogStatus {
    pub loading: bool,
    pub star_count: usize,
    pub source: Option<CatalogSource>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

impl Default for CatalogStatus {
    fn default() -> Self {
        Self {
            loading: true,
            star_count: 0,
            source: None,
            notice: None,
            error: None,
        }
    }
}

impl CatalogStatus {
    pub fn begin_loading(&mut self) {
        *self = Self::default();
    }

    pub fn finish(&mut self, load: &CatalogLoad) {
        self.loading = false;
        self.star_count = load.records.len();
        self.source = Some(load.source.clone());
        self.notice = load.notice.clone();
    }
}
