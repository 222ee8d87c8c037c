//! Root-check command: run only the external root detector.

use anyhow::{bail, Context, Result};
use libguard_core::checks::{self, RootOutcome};
use libguard_core::config::GuardConfig;
use libguard_core::root::RootStatus;

use crate::cli::{EXIT_FAILED, EXIT_OK};

pub async fn run_root_check(cfg: GuardConfig) -> Result<u8> {
    let Some(detector) = checks::detector_from_config(&cfg) else {
        bail!("no root_detector configured");
    };
    let report = tokio::task::spawn_blocking(move || checks::check_root(&detector))
        .await
        .context("root check task")?;

    match report.outcome {
        RootOutcome::Checked {
            status: RootStatus::Rooted,
        } => {
            println!("rooted");
            Ok(EXIT_FAILED)
        }
        RootOutcome::Checked {
            status: RootStatus::NotRooted,
        } => {
            println!("not rooted");
            Ok(EXIT_OK)
        }
        RootOutcome::Failed { error } => bail!("root check via {}: {}", report.detector, error),
    }
}
