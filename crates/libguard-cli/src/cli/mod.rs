//! CLI for libguard.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use libguard_core::config::{self, GuardConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use commands::{run_check, run_checksum, run_root_check, run_verify};

/// Integrity verified (or device clean).
pub const EXIT_OK: u8 = 0;
/// Digest mismatch, rooted device, or a failed check under the configured policy.
pub const EXIT_FAILED: u8 = 1;
/// Could not determine: missing file, read error, bad config.
pub const EXIT_ERROR: u8 = 2;

/// Top-level CLI for libguard.
#[derive(Debug, Parser)]
#[command(name = "libguard")]
#[command(about = "libguard: integrity checks for installed native libraries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Verify a file against a known-good SHA-256 digest.
    Verify {
        /// Path to the file.
        path: String,
        /// Expected SHA-256 in hex (either case).
        expected: String,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compute SHA-256 of a file.
    Checksum {
        /// Path to the file.
        path: String,
    },

    /// Run all checks from the configuration file.
    Check {
        /// Config file (default: ~/.config/libguard/config.toml).
        #[arg(long, value_name = "PATH")]
        config: Option<String>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run only the configured root detector.
    RootCheck {
        /// Config file (default: ~/.config/libguard/config.toml).
        #[arg(long, value_name = "PATH")]
        config: Option<String>,
    },
}

fn load_config(path: Option<&str>) -> Result<GuardConfig> {
    let cfg = match path {
        Some(p) => config::load_from(Path::new(p)).with_context(|| format!("load config {p}"))?,
        None => config::load_or_init().context("load default config")?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

impl CliCommand {
    pub async fn run_from_args() -> Result<ExitCode> {
        let cli = Cli::parse();

        let code = match cli.command {
            CliCommand::Verify {
                path,
                expected,
                json,
            } => run_verify(PathBuf::from(path), expected, json).await?,
            CliCommand::Checksum { path } => run_checksum(PathBuf::from(path)).await?,
            CliCommand::Check { config, json } => {
                let cfg = load_config(config.as_deref())?;
                run_check(cfg, json).await?
            }
            CliCommand::RootCheck { config } => {
                let cfg = load_config(config.as_deref())?;
                run_root_check(cfg).await?
            }
        };

        Ok(ExitCode::from(code))
    }
}

#[cfg(test)]
mod tests;
