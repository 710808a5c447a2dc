//! Interactive app launcher.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use gymtrack_core::api::ApiClient;
use gymtrack_core::config::Config;
use gymtrack_core::core::session::SessionHolder;

/// Starts every run signed out; sessions are not persisted.
pub async fn run(config: &Config, log_path: &Path) -> Result<()> {
    let api = ApiClient::from_config(config)?;
    let session = Arc::new(SessionHolder::new(Arc::new(api.clone())));

    gymtrack_tui::run_tui(config, session, api, Some(log_path))
        .await
        .context("interactive app failed")
}
