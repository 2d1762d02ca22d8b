//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use pixmerge_core::constants::OUTPUT_ROUTE;
use pixmerge_core::Config;
use pixmerge_storage::LocalStorage;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Create the upload and output directories before accepting requests
    let uploads = LocalStorage::new(
        config.upload_dir().clone(),
        format!("{}/uploads", config.public_base_url()),
    )
    .await
    .context("Failed to prepare upload directory")?;

    let outputs = LocalStorage::new(
        config.output_dir().clone(),
        format!("{}{}", config.public_base_url(), OUTPUT_ROUTE),
    )
    .await
    .context("Failed to prepare output directory")?;

    tracing::info!(
        upload_dir = %uploads.base_path().display(),
        output_dir = %outputs.base_path().display(),
        public_base_url = %config.public_base_url(),
        "Storage directories ready"
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        uploads,
        outputs,
    });

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
