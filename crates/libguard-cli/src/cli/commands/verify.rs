//! Verify command: compare a file against an expected digest.

use anyhow::{Context, Result};
use libguard_core::VerificationRequest;
use std::path::PathBuf;

use crate::cli::{EXIT_FAILED, EXIT_OK};

/// Hash `path` off the async runtime and report match or mismatch.
///
/// Missing or unreadable files are returned as errors, never as a mismatch.
pub async fn run_verify(path: PathBuf, expected: String, json: bool) -> Result<u8> {
    let req = VerificationRequest::new(path, expected);
    let display = req.file_path.display().to_string();
    let res = tokio::task::spawn_blocking(move || req.verify())
        .await
        .context("verify task")??;

    if json {
        println!("{}", serde_json::to_string_pretty(&res)?);
    } else {
        let status = if res.matched { "OK" } else { "FAILED" };
        println!("{}  {}: {}", res.computed_digest_hex, display, status);
    }

    Ok(if res.matched { EXIT_OK } else { EXIT_FAILED })
}
