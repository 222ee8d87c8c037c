//! Root-detection interface.
//!
//! Heuristics live in an external, separately maintained tool. This crate only
//! depends on the [`RootDetector`] trait and never guesses on its own.

use serde::{Deserialize, Serialize};
use std::process::Command;
use thiserror::Error;

/// Whether the device's access controls appear to have been bypassed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RootStatus {
    Rooted,
    NotRooted,
}

impl From<bool> for RootStatus {
    fn from(rooted: bool) -> Self {
        if rooted {
            RootStatus::Rooted
        } else {
            RootStatus::NotRooted
        }
    }
}

#[derive(Debug, Error)]
pub enum RootCheckError {
    #[error("spawn root detector {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("root detector {program} exited with {status}")]
    Failed { program: String, status: String },
    #[error("root detector {program} printed {output:?}, expected true or false")]
    UnexpectedOutput { program: String, output: String },
}

/// Trait implemented by root-detection backends.
pub trait RootDetector {
    /// Short name for logs and reports.
    fn name(&self) -> &str;
    fn is_rooted(&self) -> Result<RootStatus, RootCheckError>;
}

/// Runs an external program that prints `true` (rooted) or `false` on stdout.
#[derive(Debug, Clone)]
pub struct CommandDetector {
    program: String,
    args: Vec<String>,
}

impl CommandDetector {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl RootDetector for CommandDetector {
    fn name(&self) -> &str {
        &self.program
    }

    fn is_rooted(&self) -> Result<RootStatus, RootCheckError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|source| RootCheckError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(RootCheckError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_verdict(stdout.trim()).ok_or_else(|| RootCheckError::UnexpectedOutput {
            program: self.program.clone(),
            output: stdout.trim().to_string(),
        })
    }
}

fn parse_verdict(s: &str) -> Option<RootStatus> {
    if s.eq_ignore_ascii_case("true") {
        Some(RootStatus::Rooted)
    } else if s.eq_ignore_ascii_case("false") {
        Some(RootStatus::NotRooted)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_verdict_accepts_booleans_only() {
        assert_eq!(parse_verdict("true"), Some(RootStatus::Rooted));
        assert_eq!(parse_verdict("FALSE"), Some(RootStatus::NotRooted));
        assert_eq!(parse_verdict(""), None);
        assert_eq!(parse_verdict("1"), None);
        assert_eq!(parse_verdict("rooted"), None);
    }

    #[test]
    fn root_status_from_bool() {
        assert_eq!(RootStatus::from(true), RootStatus::Rooted);
        assert_eq!(RootStatus::from(false), RootStatus::NotRooted);
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let d = CommandDetector::new("/nonexistent/libguard-root-detector", vec![]);
        assert_eq!(d.name(), "/nonexistent/libguard-root-detector");
        assert!(matches!(d.is_rooted(), Err(RootCheckError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn command_output_is_interpreted() {
        let rooted = CommandDetector::new("sh", vec!["-c".into(), "echo true".into()]);
        assert_eq!(rooted.is_rooted().unwrap(), RootStatus::Rooted);

        let clean = CommandDetector::new("sh", vec!["-c".into(), "echo ' false '".into()]);
        assert_eq!(clean.is_rooted().unwrap(), RootStatus::NotRooted);

        let noisy = CommandDetector::new("sh", vec!["-c".into(), "echo maybe".into()]);
        assert!(matches!(
            noisy.is_rooted(),
            Err(RootCheckError::UnexpectedOutput { .. })
        ));

        let failing = CommandDetector::new("sh", vec!["-c".into(), "exit 3".into()]);
        assert!(matches!(
            failing.is_rooted(),
            Err(RootCheckError::Failed { .. })
        ));
    }
}
