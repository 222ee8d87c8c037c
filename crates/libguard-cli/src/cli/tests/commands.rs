//! Command handlers against scratch files.

use crate::cli::commands::{run_check, run_checksum, run_root_check, run_verify};
use crate::cli::{EXIT_ERROR, EXIT_FAILED, EXIT_OK};
use libguard_core::config::{ArtifactConfig, DetectorConfig, GuardConfig, UnreadablePolicy};
use libguard_core::VerifyError;
use std::fs;

const ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

fn lib_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("libflutter.so"), b"abc").unwrap();
    dir
}

fn cfg(dir: &std::path::Path, expected: &str, policy: UnreadablePolicy) -> GuardConfig {
    GuardConfig {
        library_dir: Some(dir.to_path_buf()),
        on_unreadable: policy,
        artifacts: vec![ArtifactConfig {
            file_name: "libflutter.so".to_string(),
            expected_sha256: expected.to_string(),
        }],
        ..GuardConfig::default()
    }
}

#[tokio::test]
async fn verify_exit_codes() {
    let dir = lib_dir();
    let lib = dir.path().join("libflutter.so");
    assert_eq!(
        run_verify(lib.clone(), ABC.to_uppercase(), false).await.unwrap(),
        EXIT_OK
    );
    assert_eq!(
        run_verify(lib, EMPTY.to_string(), true).await.unwrap(),
        EXIT_FAILED
    );
}

#[tokio::test]
async fn verify_missing_file_is_error_not_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_verify(dir.path().join("gone.so"), ABC.to_string(), false)
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VerifyError>(),
        Some(VerifyError::FileNotFound { .. })
    ));
}

#[tokio::test]
async fn checksum_prints_and_succeeds() {
    let dir = lib_dir();
    assert_eq!(
        run_checksum(dir.path().join("libflutter.so")).await.unwrap(),
        EXIT_OK
    );
    assert!(run_checksum(dir.path().join("nope")).await.is_err());
}

#[tokio::test]
async fn check_applies_policy() {
    let dir = lib_dir();
    assert_eq!(
        run_check(cfg(dir.path(), ABC, UnreadablePolicy::FailClosed), false)
            .await
            .unwrap(),
        EXIT_OK
    );
    assert_eq!(
        run_check(cfg(dir.path(), EMPTY, UnreadablePolicy::FailOpen), true)
            .await
            .unwrap(),
        EXIT_FAILED
    );

    let empty = tempfile::tempdir().unwrap();
    assert_eq!(
        run_check(cfg(empty.path(), ABC, UnreadablePolicy::FailClosed), false)
            .await
            .unwrap(),
        EXIT_FAILED
    );
    assert_eq!(
        run_check(cfg(empty.path(), ABC, UnreadablePolicy::FailOpen), false)
            .await
            .unwrap(),
        EXIT_OK
    );
}

#[tokio::test]
async fn check_with_nothing_configured_is_error_exit() {
    assert_eq!(
        run_check(GuardConfig::default(), false).await.unwrap(),
        EXIT_ERROR
    );
}

#[tokio::test]
async fn root_check_requires_detector() {
    assert!(run_root_check(GuardConfig::default()).await.is_err());
}

#[cfg(unix)]
#[tokio::test]
async fn root_check_exit_codes() {
    let with = |script: &str| GuardConfig {
        root_detector: Some(DetectorConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
        }),
        ..GuardConfig::default()
    };
    assert_eq!(run_root_check(with("echo false")).await.unwrap(), EXIT_OK);
    assert_eq!(run_root_check(with("echo true")).await.unwrap(), EXIT_FAILED);
    assert!(run_root_check(with("exit 1")).await.is_err());
}
