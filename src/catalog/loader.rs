//! Catalog loading and the background loader worker

use bevy::log::{info, warn};
use rand::Rng;
use std::path::Path;
use std::sync::{Arc, Mutex, mpsc};
use std::thread;

use crate::catalog::fallback::fallback_catalog;
use crate::catalog::parser::{CatalogError, parse_catalog};
use crate::catalog::provider::{CatalogSettings, FileProvider};
use crate::catalog::types::{
    CatalogChannels, CatalogCommand, CatalogLoad, CatalogSource, StarRecord,
};

/// Read and parse the catalog through the provider.
pub fn read_catalog(
    provider: Option<&dyn FileProvider>,
    path: &Path,
) -> Result<Vec<StarRecord>, CatalogError> {
    let provider = provider.ok_or(CatalogError::ProviderUnavailable)?;
    let text = provider
        .read_file(path)
        .map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    parse_catalog(&text)
}

/// Load the catalog, substituting the generated one on any failure. Never fails.
pub fn load_catalog<R: Rng + ?Sized>(
    provider: Option<&dyn FileProvider>,
    path: &Path,
    rng: &mut R,
) -> CatalogLoad {
    match read_catalog(provider, path) {
        Ok(records) => {
            info!(
                "[CATALOG] loaded {} stars from {}",
                records.len(),
                path.display()
            );
            CatalogLoad {
                records,
                source: CatalogSource::File(path.to_path_buf()),
                notice: None,
            }
        }
        Err(err) => {
            warn!("[CATALOG] {} unavailable: {}", path.display(), err);
            generated_catalog_load(rng, Some(format!("Catalog unavailable ({})", err)))
        }
    }
}

/// A load result backed by the fallback catalog.
pub fn generated_catalog_load<R: Rng + ?Sized>(rng: &mut R, notice: Option<String>) -> CatalogLoad {
    let records = fallback_catalog(rng);
    info!("[CATALOG] generated fallback catalog with {} stars", records.len());
    CatalogLoad {
        records,
        source: CatalogSource::Generated,
        notice,
    }
}

/// Start the background catalog worker thread
pub fn start_catalog_worker(settings: CatalogSettings) -> anyhow::Result<CatalogChannels> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<CatalogCommand>();
    let (res_tx, res_rx) = mpsc::channel::<CatalogLoad>();

    thread::Builder::new()
        .name("catalog-loader".to_string())
        .spawn(move || {
            let mut rng = rand::thread_rng();
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    CatalogCommand::Load => {
                        let load =
                            load_catalog(settings.provider.as_deref(), &settings.path, &mut rng);
                        if res_tx.send(load).is_err() {
                            break;
                        }
                    }
                }
            }
        })?;

    Ok(CatalogChannels {
        cmd_tx,
        res_rx: Arc::new(Mutex::new(res_rx)),
    })
}
