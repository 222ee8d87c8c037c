//! Streaming SHA-256 of files and readers.
//!
//! Files are hashed in fixed-size chunks so memory use stays bounded by the
//! buffer, not the artifact size.

use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, ErrorKind, Read};
use std::path::Path;

use crate::verify::VerifyError;

/// Default read chunk size.
pub const BUF_SIZE: usize = 64 * 1024;

/// Largest read chunk actually allocated; bigger requests are clamped.
pub const MAX_BUF_SIZE: usize = 8 * 1024 * 1024;

/// Length of a SHA-256 digest rendered as hex.
pub const SHA256_HEX_LEN: usize = 64;

/// Hash everything `reader` yields and return the digest as lowercase hex.
/// `buf_size` is clamped to `1..=MAX_BUF_SIZE`.
pub fn sha256_reader<R: Read>(reader: &mut R, buf_size: usize) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; buf_size.clamp(1, MAX_BUF_SIZE)];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Compute SHA-256 of a regular file with the given chunk size.
///
/// A missing path or a path that is not a regular file yields
/// [`VerifyError::FileNotFound`]; any failure while opening or reading an
/// existing file yields [`VerifyError::ReadError`].
pub fn sha256_file(path: &Path, buf_size: usize) -> Result<String, VerifyError> {
    let mut f = open_regular(path)?;
    hash_opened(path, &mut f, buf_size)
}

/// Hash an already opened `path`; read failures become [`VerifyError::ReadError`].
fn hash_opened<R: Read>(
    path: &Path,
    reader: &mut R,
    buf_size: usize,
) -> Result<String, VerifyError> {
    sha256_reader(reader, buf_size).map_err(|source| VerifyError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

/// Compute SHA-256 of a file with the default chunk size.
pub fn sha256_path(path: &Path) -> Result<String, VerifyError> {
    sha256_file(path, BUF_SIZE)
}

/// True if `s` is exactly 64 hex digits (either case).
pub fn is_sha256_hex(s: &str) -> bool {
    s.len() == SHA256_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

fn open_regular(path: &Path) -> Result<File, VerifyError> {
    let not_found = || VerifyError::FileNotFound {
        path: path.to_path_buf(),
    };
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
        Err(source) => {
            return Err(VerifyError::ReadError {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if !meta.is_file() {
        return Err(not_found());
    }
    File::open(path).map_err(|source| match source.kind() {
        // Removed between the metadata probe and the open.
        ErrorKind::NotFound => not_found(),
        _ => VerifyError::ReadError {
            path: path.to_path_buf(),
            source,
        },
    })
}
