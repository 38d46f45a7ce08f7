//! Catalog loading systems

use bevy::prelude::*;
use std::sync::mpsc::TryRecvError;

use crate::catalog::loader::{generated_catalog_load, start_catalog_worker};
use crate::catalog::provider::CatalogSettings;
use crate::catalog::types::{
    CatalogChannels, CatalogCommand, CatalogLoad, CatalogState, CatalogStatus, StarCatalog,
};

/// Message shown when loading fails for a reason other than a missing or invalid file.
pub const UNEXPECTED_LOAD_ERROR: &str = "Failed to load star catalog";

/// Start the catalog worker and request the first load
pub fn setup_catalog_worker(mut commands: Commands, settings: Res<CatalogSettings>) {
    match start_catalog_worker(settings.clone()) {
        Ok(channels) => {
            info!(
                "[INIT] catalog worker started (path: {})",
                settings.path.display()
            );
            if let Err(e) = channels.cmd_tx.send(CatalogCommand::Load) {
                error!("[CATALOG] failed to request load: {}", e);
            }
            commands.insert_resource(channels);
        }
        Err(e) => error!("[INIT] failed to start catalog worker: {:#}", e),
    }
}

/// Next worker result, or `None` while the load is still running.
fn next_result(channels: &CatalogChannels) -> Option<Result<CatalogLoad, &'static str>> {
    let Ok(guard) = channels.res_rx.lock() else {
        return Some(Err("catalog result channel poisoned"));
    };
    match guard.try_recv() {
        Ok(load) => Some(Ok(load)),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => Some(Err("catalog worker stopped")),
    }
}

/// Drain the worker result and switch to `Ready`.
///
/// A missing, disconnected or poisoned worker channel counts as an unexpected failure: the
/// generated catalog is substituted and a generic error is surfaced.
pub fn process_catalog_results_system(
    mut commands: Commands,
    channels: Option<Res<CatalogChannels>>,
    mut status: ResMut<CatalogStatus>,
    mut next_state: ResMut<NextState<CatalogState>>,
) {
    let received = match channels {
        Some(channels) => match next_result(&channels) {
            Some(result) => result,
            None => return,
        },
        None => Err("catalog worker unavailable"),
    };

    let load = received.unwrap_or_else(|reason| {
        error!("[CATALOG] {}; using generated catalog", reason);
        status.error = Some(UNEXPECTED_LOAD_ERROR.to_string());
        generated_catalog_load(&mut rand::thread_rng(), None)
    });

    status.finish(&load);
    info!(
        "[CATALOG] ready: {} stars ({})",
        load.records.len(),
        load.source
    );
    commands.insert_resource(StarCatalog::new(load.records));
    next_state.set(CatalogState::Ready);
}

/// F5 reloads the catalog; the scene is rebuilt when the new load arrives.
pub fn reload_catalog_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    channels: Option<Res<CatalogChannels>>,
    mut status: ResMut<CatalogStatus>,
    mut next_state: ResMut<NextState<CatalogState>>,
) {
    if !keys.just_pressed(KeyCode::F5) {
        return;
    }
    if let Some(channels) = channels
        && let Err(e) = channels.cmd_tx.send(CatalogCommand::Load)
    {
        warn!("[CATALOG] reload request failed: {}", e);
    }
    info!("[CATALOG] reloading");
    status.begin_loading();
    next_state.set(CatalogState::Loading);
}
