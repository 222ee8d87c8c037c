//! Checksum command: compute SHA-256 of a file.

use anyhow::{Context, Result};
use libguard_core::digest;
use std::path::PathBuf;

use crate::cli::EXIT_OK;

/// Compute and print SHA-256 of the given file, `sha256sum` style.
pub async fn run_checksum(path: PathBuf) -> Result<u8> {
    let digest = {
        let path = path.clone();
        tokio::task::spawn_blocking(move || digest::sha256_path(&path))
            .await
            .context("checksum task")??
    };
    println!("{}  {}", digest, path.display());
    Ok(EXIT_OK)
}
