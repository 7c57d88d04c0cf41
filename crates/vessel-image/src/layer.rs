//! Filesystem layer extraction.
//!
//! Registry layers arrive as gzip-compressed tar archives and are
//! extracted, in manifest order, into the image's shared contents
//! directory. Later layers overwrite earlier ones, flattening the image
//! into a single ready-to-mount tree.

use std::path::Path;

use vessel_common::error::{Result, VesselError};

/// Extracts a tar archive into the target directory.
///
/// Supports both plain `.tar` and gzip-compressed `.tar.gz` / `.tgz`
/// archives, and returns the archive size in bytes.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened or extraction fails.
pub fn extract_layer(archive_path: &Path, target: &Path) -> Result<u64> {
    tracing::info!(
        archive = %archive_path.display(),
        target = %target.display(),
        "extracting layer"
    );

    std::fs::create_dir_all(target).map_err(|e| VesselError::io(target, e))?;

    let file = std::fs::File::open(archive_path).map_err(|e| VesselError::io(archive_path, e))?;
    let size_bytes = file
        .metadata()
        .map_err(|e| VesselError::io(archive_path, e))?
        .len();

    if is_gzip_archive(archive_path) {
        let decoder = flate2::read::GzDecoder::new(file);
        let mut archive = tar::Archive::new(decoder);
        archive
            .unpack(target)
            .map_err(|e| VesselError::io(target, e))?;
    } else {
        let mut archive = tar::Archive::new(file);
        archive
            .unpack(target)
            .map_err(|e| VesselError::io(target, e))?;
    }

    tracing::debug!(size = size_bytes, "layer extracted");
    Ok(size_bytes)
}

/// Determines whether the archive is gzip-compressed based on extension.
fn is_gzip_archive(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz") || ext.eq_ignore_ascii_case("tgz"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_tar(dir: &Path) -> std::path::PathBuf {
        let tar_path = dir.join("layer.tar");
        let file = std::fs::File::create(&tar_path).expect("failed to create tar file");
        let mut builder = tar::Builder::new(file);
        let data = b"hello from layer";
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, "hello.txt", &data[..])
            .expect("failed to append data");
        builder.finish().expect("failed to finish tar");
        tar_path
    }

    fn create_test_tar_gz(dir: &Path) -> std::path::PathBuf {
        let tar_gz_path = dir.join("layer.tar.gz");
        let file = std::fs::File::create(&tar_gz_path).expect("failed to create tar.gz");
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        let data = b"hello from gzipped layer";
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, "gzhello.txt", &data[..])
            .expect("failed to append data");
        let encoder = builder.into_inner().expect("failed to finish encoder");
        let _ = encoder.finish().expect("failed to finish gzip");
        tar_gz_path
    }

    #[test]
    fn extract_plain_tar_creates_expected_files() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let tar_path = create_test_tar(dir.path());
        let target = dir.path().join("extracted");

        let size = extract_layer(&tar_path, &target).expect("extract failed");
        assert!(size > 0);

        let content = std::fs::read_to_string(target.join("hello.txt")).expect("read failed");
        assert_eq!(content, "hello from layer");
    }

    #[test]
    fn extract_gzip_tar_creates_expected_files() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let tar_gz_path = create_test_tar_gz(dir.path());
        let target = dir.path().join("extracted_gz");

        let size = extract_layer(&tar_gz_path, &target).expect("extract failed");
        assert!(size > 0);

        let content = std::fs::read_to_string(target.join("gzhello.txt")).expect("read failed");
        assert_eq!(content, "hello from gzipped layer");
    }

    #[test]
    fn later_layers_overwrite_earlier_files() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let target = dir.path().join("contents");

        let first = create_test_tar(dir.path());
        extract_layer(&first, &target).expect("extract failed");

        let second_path = dir.path().join("second.tar");
        let file = std::fs::File::create(&second_path).expect("create failed");
        let mut builder = tar::Builder::new(file);
        let data = b"overwritten";
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, "hello.txt", &data[..])
            .expect("append failed");
        builder.finish().expect("finish failed");

        extract_layer(&second_path, &target).expect("extract failed");
        let content = std::fs::read_to_string(target.join("hello.txt")).expect("read failed");
        assert_eq!(content, "overwritten");
    }

    #[test]
    fn extract_nonexistent_archive_returns_error() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let result = extract_layer(&dir.path().join("missing.tar"), &dir.path().join("out"));
        assert!(result.is_err());
    }

    #[test]
    fn is_gzip_archive_detects_extensions() {
        assert!(is_gzip_archive(Path::new("layer.tar.gz")));
        assert!(is_gzip_archive(Path::new("layer.tgz")));
        assert!(!is_gzip_archive(Path::new("layer.tar")));
        assert!(!is_gzip_archive(Path::new("layer.zip")));
    }
}
