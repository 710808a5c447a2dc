//! CLI command handlers.

pub mod account;
pub mod app;
pub mod config;

use std::io::Read;

use anyhow::{Context, Result};

/// Reads the password from stdin, dropping the trailing newline.
pub fn read_password() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_to_string(&mut input)
        .context("read password from stdin")?;
    let password = input.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        anyhow::bail!("No password provided on stdin");
    }
    Ok(password.to_string())
}
