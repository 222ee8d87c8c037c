//! Configured security checks: artifact integrity plus optional root detection.
//!
//! `verify` never decides what an unreadable artifact means. That decision is
//! made here, explicitly, through [`UnreadablePolicy`].

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{ArtifactConfig, GuardConfig, UnreadablePolicy};
use crate::root::{CommandDetector, RootDetector, RootStatus};
use crate::verify::{self, VerifyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnreadableKind {
    FileNotFound,
    ReadError,
    InvalidExpectedDigest,
    /// Relative artifact name with no library directory to resolve it against.
    Unresolved,
}

impl From<&VerifyError> for UnreadableKind {
    fn from(e: &VerifyError) -> Self {
        match e {
            VerifyError::FileNotFound { .. } => UnreadableKind::FileNotFound,
            VerifyError::ReadError { .. } => UnreadableKind::ReadError,
            VerifyError::InvalidExpectedDigest => UnreadableKind::InvalidExpectedDigest,
        }
    }
}

/// Outcome of checking one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "kebab-case")]
pub enum Verdict {
    Trusted { computed: String },
    /// Content differs from the known-good digest.
    Tampered { computed: String, expected: String },
    /// Could not determine; see [`UnreadablePolicy`].
    Unreadable { kind: UnreadableKind, error: String },
}

impl Verdict {
    pub fn passes(&self, policy: UnreadablePolicy) -> bool {
        match self {
            Verdict::Trusted { .. } => true,
            Verdict::Tampered { .. } => false,
            Verdict::Unreadable { .. } => policy == UnreadablePolicy::FailOpen,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactReport {
    pub file_name: String,
    pub path: Option<PathBuf>,
    #[serde(flatten)]
    pub verdict: Verdict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum RootOutcome {
    Checked { status: RootStatus },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootReport {
    pub detector: String,
    #[serde(flatten)]
    pub outcome: RootOutcome,
}

impl RootReport {
    pub fn passes(&self, policy: UnreadablePolicy) -> bool {
        match &self.outcome {
            RootOutcome::Checked { status } => *status == RootStatus::NotRooted,
            RootOutcome::Failed { .. } => policy == UnreadablePolicy::FailOpen,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityReport {
    pub artifacts: Vec<ArtifactReport>,
    pub root: Option<RootReport>,
}

impl SecurityReport {
    /// True if every artifact and the root check pass under `policy`.
    pub fn passed(&self, policy: UnreadablePolicy) -> bool {
        self.artifacts.iter().all(|a| a.verdict.passes(policy))
            && self.root.as_ref().map_or(true, |r| r.passes(policy))
    }
}

/// Verify a single file and classify the outcome.
pub fn check_artifact(path: &Path, expected: &str, buf_size: usize) -> Verdict {
    match verify::verify_with_buffer(path, expected, buf_size) {
        Ok(res) => {
            tracing::info!("{} SHA-256: {}", path.display(), res.computed_digest_hex);
            if res.matched {
                Verdict::Trusted {
                    computed: res.computed_digest_hex,
                }
            } else {
                tracing::warn!(
                    "{} digest mismatch: expected {}",
                    path.display(),
                    expected.trim()
                );
                Verdict::Tampered {
                    computed: res.computed_digest_hex,
                    expected: expected.trim().to_ascii_lowercase(),
                }
            }
        }
        Err(e) => {
            tracing::error!("integrity check of {} failed: {}", path.display(), e);
            Verdict::Unreadable {
                kind: UnreadableKind::from(&e),
                error: e.to_string(),
            }
        }
    }
}

/// Check one configured artifact, resolving its path against `library_dir`.
pub fn check_configured_artifact(cfg: &GuardConfig, artifact: &ArtifactConfig) -> ArtifactReport {
    let path = cfg.artifact_path(artifact);
    let verdict = match &path {
        Some(p) => check_artifact(p, &artifact.expected_sha256, cfg.read_buffer_bytes),
        None => Verdict::Unreadable {
            kind: UnreadableKind::Unresolved,
            error: format!("{} is relative and library_dir is not set", artifact.file_name),
        },
    };
    ArtifactReport {
        file_name: artifact.file_name.clone(),
        path,
        verdict,
    }
}

/// Run the root detector and capture its outcome.
pub fn check_root(detector: &dyn RootDetector) -> RootReport {
    let outcome = match detector.is_rooted() {
        Ok(status) => {
            if status == RootStatus::Rooted {
                tracing::warn!("root detector {} reports a rooted device", detector.name());
            } else {
                tracing::debug!("root detector {}: not rooted", detector.name());
            }
            RootOutcome::Checked { status }
        }
        Err(e) => {
            tracing::error!("root check failed: {}", e);
            RootOutcome::Failed {
                error: e.to_string(),
            }
        }
    };
    RootReport {
        detector: detector.name().to_string(),
        outcome,
    }
}

/// Detector described by the config, if any.
pub fn detector_from_config(cfg: &GuardConfig) -> Option<CommandDetector> {
    cfg.root_detector
        .as_ref()
        .map(|d| CommandDetector::new(d.program.clone(), d.args.clone()))
}

/// Run every configured artifact check and, when given, the root detector.
pub fn run_checks(cfg: &GuardConfig, detector: Option<&dyn RootDetector>) -> SecurityReport {
    let artifacts = cfg
        .artifacts
        .iter()
        .map(|a| check_configured_artifact(cfg, a))
        .collect();
    let root = detector.map(check_root);
    SecurityReport { artifacts, root }
}
