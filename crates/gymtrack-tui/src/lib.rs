//! Full-screen TUI for gymtrack.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
pub use features::{auth, form, history, home, profile, toast};
use gymtrack_core::api::ApiClient;
use gymtrack_core::config::{Config, paths};
use gymtrack_core::core::session::SessionHolder;
pub use runtime::TuiRuntime;

/// Runs the interactive app until the user quits.
///
/// # Errors
/// Returns an error when stderr is not a terminal or terminal I/O fails.
pub async fn run_tui(
    config: &Config,
    session: Arc<SessionHolder>,
    api: ApiClient,
    log_path: Option<&Path>,
) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive app requires a terminal.\n\
             Use `gymtrack history --email ...` for non-interactive use."
        );
    }

    // Print pre-TUI info to stderr (will be replaced by alternate screen)
    let mut err = stderr();
    writeln!(err, "gymtrack")?;
    writeln!(err, "API: {}", api.base_url())?;
    let config_path = paths::config_path();
    if config_path.exists() {
        writeln!(err, "Config file: {}", config_path.display())?;
    }
    if let Some(path) = log_path {
        writeln!(err, "Log file: {}", path.display())?;
    }
    err.flush()?;

    let mut runtime = TuiRuntime::new(config, session, api)?;
    runtime.run()?;
    drop(runtime);

    // Print goodbye after TUI exits (terminal restored)
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
