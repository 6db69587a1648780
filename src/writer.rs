//! Atomic file output

use std::io::Write;
use std::path::Path;
use log::{debug, trace};
use tempfile::NamedTempFile;
use crate::error::PDFWriteResult;

/// Replace `path` with `bytes`
///
/// The bytes go to a temporary file in the destination directory which is
/// renamed over the target once fully written and synced. On failure the
/// temporary file is removed and `path` is left untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> PDFWriteResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    trace!("Staging {} bytes in {}", bytes.len(), dir.display());
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path)?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PDFWriteError;
    use std::fs;
    use test_log::test;

    #[test]
    fn test_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");

        write_atomic(&path, b"%PDF-1.4\n").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4\n");
    }

    #[test]
    fn test_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        fs::write(&path, b"old contents that are longer").unwrap();

        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.pdf");

        let err = write_atomic(&path, b"data").unwrap_err();
        assert!(matches!(err, PDFWriteError::IoError(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_no_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        write_atomic(&path, b"data").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.pdf")]);
    }
}
