//! Error types for integrity verification.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a digest could not be computed or compared.
///
/// A content mismatch is not an error: it is a successful
/// [`VerificationResult`](super::VerificationResult) with `matched == false`.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Path does not exist or is not a regular file.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    /// Opening or reading an existing file failed.
    #[error("read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The reference digest was empty.
    #[error("expected digest is empty")]
    InvalidExpectedDigest,
}

impl VerifyError {
    /// Path the error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            VerifyError::FileNotFound { path } | VerifyError::ReadError { path, .. } => {
                Some(path.as_path())
            }
            VerifyError::InvalidExpectedDigest => None,
        }
    }
}
