//! Integrity verification core.
//!
//! [`verify::verify`] hashes an installed file with SHA-256 and compares it to a
//! known-good digest, keeping "could not read" distinct from "content differs".
//! [`checks`] composes configured artifact checks with an external
//! [`root::RootDetector`] and applies the caller's unreadable-file policy.

pub mod config;
pub mod logging;

pub mod checks;
pub mod digest;
pub mod root;
pub mod verify;

pub use verify::{verify, VerificationRequest, VerificationResult, VerifyError};
