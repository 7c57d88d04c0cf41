//! SHA-256 content verification.
//!
//! Downloaded layer blobs are verified against their manifest digests
//! before extraction; nothing is re-verified at mount time.

use std::io::Read;
use std::path::Path;

use sha2::{Digest as _, Sha256};
use vessel_common::error::{Result, VesselError};
use vessel_common::types::Digest;

/// Computes the SHA-256 digest of a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn hash_file(path: &Path) -> Result<Digest> {
    let mut file = std::fs::File::open(path).map_err(|e| VesselError::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf).map_err(|e| VesselError::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Digest::from_hex(format!("{:x}", hasher.finalize()))
}

/// Validates that a file matches the expected digest.
///
/// # Errors
///
/// Returns [`VesselError::DigestMismatch`] if the computed digest differs,
/// or an I/O error if the file cannot be read.
pub fn verify_digest(path: &Path, expected: &Digest) -> Result<()> {
    let actual = hash_file(path)?;
    if actual != *expected {
        return Err(VesselError::DigestMismatch {
            resource: path.display().to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    tracing::debug!(path = %path.display(), digest = %expected, "digest verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_file_matches_known_digest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data");
        std::fs::write(&path, b"abc").expect("write failed");
        let digest = hash_file(&path).expect("hash failed");
        // sha256("abc")
        assert_eq!(
            digest.hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn verify_digest_accepts_matching_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data");
        std::fs::write(&path, b"abc").expect("write failed");
        let expected = Digest::from_hex(
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        )
        .expect("digest");
        verify_digest(&path, &expected).expect("verify failed");
    }

    #[test]
    fn verify_digest_rejects_mismatched_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data");
        std::fs::write(&path, b"not abc").expect("write failed");
        let expected = Digest::from_hex(
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        )
        .expect("digest");
        let err = verify_digest(&path, &expected).expect_err("should mismatch");
        assert!(matches!(err, VesselError::DigestMismatch { .. }));
    }

    #[test]
    fn hash_missing_file_returns_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(hash_file(&dir.path().join("missing")).is_err());
    }
}
