// crates/network/src/download.rs
//! Streaming response bodies to disk

use crate::error::{NetworkError, NetworkResult};
use crate::progress::ProgressTracker;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

const CHUNK_SIZE: usize = 8192;

/// Copies `reader` into `destination` in fixed-size chunks
///
/// Bytes are staged in a temporary file next to `destination` and moved into
/// place only once the body is complete, so a failed download leaves any
/// existing file untouched.
pub fn stream_to_file<R: Read>(
    mut reader: R,
    destination: &Path,
    progress: Option<&ProgressTracker>,
) -> NetworkResult<u64> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            parent
        }
        _ => Path::new("."),
    };

    let mut writer = BufWriter::new(NamedTempFile::new_in(dir)?);
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(NetworkError::DownloadFailed(e.to_string())),
        };

        writer.write_all(&buffer[..read])?;

        total += read as u64;
        if let Some(tracker) = progress {
            tracker.update(read as u64);
        }
    }

    let staged = writer.into_inner().map_err(|e| NetworkError::Io(e.into_error()))?;
    staged
        .persist(destination)
        .map_err(|e| NetworkError::Io(e.error))?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.served {
                Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "reset",
                ))
            } else {
                self.served = true;
                buf[..4].copy_from_slice(b"%PDF");
                Ok(4)
            }
        }
    }

    #[test]
    fn test_stream_writes_all_bytes() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("book.pdf");
        let body = vec![7u8; CHUNK_SIZE * 2 + 13];

        let tracker = ProgressTracker::new(Some(body.len() as u64));
        let written = stream_to_file(Cursor::new(body.clone()), &dest, Some(&tracker)).unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(std::fs::read(&dest).unwrap(), body);
        assert!(tracker.is_complete());
    }

    #[test]
    fn test_stream_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("nested/out/book.txt");

        stream_to_file(Cursor::new(b"hello".to_vec()), &dest, None).unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "hello");
    }

    #[test]
    fn test_failed_stream_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("partial.pdf");

        let err = stream_to_file(FailingReader { served: false }, &dest, None).unwrap_err();
        assert!(matches!(err, NetworkError::DownloadFailed(_)));
        assert!(!dest.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_stream_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("middlemarch.pdf");
        std::fs::write(&dest, b"%PDF-1.4 earlier download").unwrap();

        assert!(stream_to_file(FailingReader { served: false }, &dest, None).is_err());

        assert_eq!(std::fs::read(&dest).unwrap(), b"%PDF-1.4 earlier download");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_completed_stream_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("middlemarch.pdf");
        std::fs::write(&dest, b"old").unwrap();

        stream_to_file(Cursor::new(b"new".to_vec()), &dest, None).unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
    }
}
