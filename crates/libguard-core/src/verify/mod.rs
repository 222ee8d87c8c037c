//! Integrity verifier: hash a file and compare against a known-good digest.

mod error;

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::digest;

pub use error::VerifyError;

/// Path plus the reference digest it is expected to hash to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub file_path: PathBuf,
    /// Hex SHA-256, either case.
    pub expected_digest_hex: String,
}

impl VerificationRequest {
    pub fn new(file_path: impl Into<PathBuf>, expected_digest_hex: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            expected_digest_hex: expected_digest_hex.into(),
        }
    }

    pub fn verify(&self) -> Result<VerificationResult, VerifyError> {
        verify(&self.file_path, &self.expected_digest_hex)
    }
}

/// Outcome of a completed verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    /// Lowercase hex SHA-256 of the file contents.
    pub computed_digest_hex: String,
    pub matched: bool,
}

/// Hash `path` with the default chunk size and compare against `expected_digest_hex`.
///
/// `matched` is true iff the computed digest equals the expected value after
/// trimming surrounding whitespace, ignoring ASCII case. Missing or
/// unreadable files are errors, never a mismatch.
pub fn verify(path: &Path, expected_digest_hex: &str) -> Result<VerificationResult, VerifyError> {
    verify_with_buffer(path, expected_digest_hex, digest::BUF_SIZE)
}

/// Like [`verify`] with an explicit read chunk size.
///
/// The comparison ignores ASCII case and surrounding whitespace of the
/// expected value. Blocks the calling thread for the whole read.
pub fn verify_with_buffer(
    path: &Path,
    expected_digest_hex: &str,
    buf_size: usize,
) -> Result<VerificationResult, VerifyError> {
    let expected = expected_digest_hex.trim();
    if expected.is_empty() {
        return Err(VerifyError::InvalidExpectedDigest);
    }

    let computed_digest_hex = digest::sha256_file(path, buf_size)?;
    let matched = computed_digest_hex.eq_ignore_ascii_case(expected);
    tracing::debug!(
        "verify {}: computed={} matched={}",
        path.display(),
        computed_digest_hex,
        matched
    );

    Ok(VerificationResult {
        computed_digest_hex,
        matched,
    })
}
