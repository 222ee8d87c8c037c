//! Check command: run every configured check and print a report.

use anyhow::{Context, Result};
use libguard_core::checks::{self, RootOutcome, SecurityReport, Verdict};
use libguard_core::config::GuardConfig;
use libguard_core::root::RootDetector;

use crate::cli::{EXIT_ERROR, EXIT_FAILED, EXIT_OK};

pub async fn run_check(cfg: GuardConfig, json: bool) -> Result<u8> {
    if cfg.artifacts.is_empty() && cfg.root_detector.is_none() {
        tracing::warn!("no artifacts or root detector configured; nothing to check");
        eprintln!(
            "libguard: nothing to check; add [[artifacts]] or [root_detector] to the config"
        );
        return Ok(EXIT_ERROR);
    }
    let policy = cfg.on_unreadable;
    let report = tokio::task::spawn_blocking(move || {
        let detector = checks::detector_from_config(&cfg);
        checks::run_checks(&cfg, detector.as_ref().map(|d| d as &dyn RootDetector))
    })
    .await
    .context("check task")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    let passed = report.passed(policy);
    tracing::info!("check finished: passed={} policy={:?}", passed, policy);
    Ok(if passed { EXIT_OK } else { EXIT_FAILED })
}

fn print_report(report: &SecurityReport) {
    for a in &report.artifacts {
        match &a.verdict {
            Verdict::Trusted { computed } => println!("{}  {}: OK", computed, a.file_name),
            Verdict::Tampered { computed, expected } => println!(
                "{}  {}: FAILED (expected {})",
                computed, a.file_name, expected
            ),
            Verdict::Unreadable { error, .. } => {
                println!("{}: UNREADABLE ({})", a.file_name, error)
            }
        }
    }
    if let Some(root) = &report.root {
        match &root.outcome {
            RootOutcome::Checked { status } => println!("root ({}): {:?}", root.detector, status),
            RootOutcome::Failed { error } => {
                println!("root ({}): ERROR ({})", root.detector, error)
            }
        }
    }
}
