//! Bounded prefix reads ("byte windows").
//!
//! Header parsing only ever looks at the start of a file, so the reader
//! pulls at most `limit` bytes no matter how large the file is. One file
//! handle is opened and closed per call; nothing is cached.
//!
//! The [`WindowReader`] trait is the seam between the metadata facade and
//! the filesystem. Production code uses [`FsReader`]; tests substitute a
//! recording mock.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Default window: enough for the header of every supported format and for
/// the JPEG marker walk in typical files.
pub const DEFAULT_WINDOW_SIZE: usize = 64 * 1024;

/// Source of leading file bytes.
///
/// `Sync` so one reader can be shared across rayon workers.
pub trait WindowReader: Sync {
    /// Return the first `min(limit, file size)` bytes of `path`.
    fn read_window(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>>;
}

/// Reads windows straight from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl WindowReader for FsReader {
    fn read_window(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>> {
        read_window(path, limit)
    }
}

/// Read up to `limit` leading bytes of a file.
///
/// Fails if the file is missing, unreadable, or a directory.
pub fn read_window(path: &Path, limit: usize) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    let capacity = usize::try_from(len).map_or(limit, |len| len.min(limit));

    let mut buf = Vec::with_capacity(capacity);
    file.take(limit as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Mock reader that serves canned bytes and records every request.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    #[derive(Default)]
    pub struct MockReader {
        pub files: HashMap<PathBuf, Vec<u8>>,
        pub requests: Mutex<Vec<(PathBuf, usize)>>,
    }

    impl MockReader {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(mut self, path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
            self.files.insert(path.into(), bytes);
            self
        }

        pub fn requested_paths(&self) -> Vec<PathBuf> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|(p, _)| p.clone())
                .collect()
        }
    }

    impl WindowReader for MockReader {
        fn read_window(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>> {
            self.requests
                .lock()
                .unwrap()
                .push((path.to_path_buf(), limit));

            self.files
                .get(path)
                .map(|bytes| bytes[..bytes.len().min(limit)].to_vec())
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no mock file"))
        }
    }

    #[test]
    fn reads_whole_small_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "a.gif", &gif_bytes(3, 4));
        assert_eq!(read_window(&path, DEFAULT_WINDOW_SIZE).unwrap(), gif_bytes(3, 4));
    }

    #[test]
    fn never_reads_past_limit() {
        let tmp = TempDir::new().unwrap();
        let big = vec![0xABu8; DEFAULT_WINDOW_SIZE * 3];
        let path = write_file(tmp.path(), "big.bin", &big);

        let window = read_window(&path, DEFAULT_WINDOW_SIZE).unwrap();
        assert_eq!(window.len(), DEFAULT_WINDOW_SIZE);

        let small = read_window(&path, 10).unwrap();
        assert_eq!(small, vec![0xAB; 10]);
    }

    #[test]
    fn empty_file_gives_empty_window() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "empty.png", &[]);
        assert!(read_window(&path, DEFAULT_WINDOW_SIZE).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_window(Path::new("/nonexistent/image.png"), 16).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn directory_is_io_error() {
        let tmp = TempDir::new().unwrap();
        assert!(read_window(tmp.path(), 16).is_err());
    }

    #[test]
    fn mock_records_requests() {
        let reader = MockReader::new().with_file("/x.png", png_bytes(2, 2));
        let bytes = reader.read_window(Path::new("/x.png"), 8).unwrap();
        assert_eq!(bytes.len(), 8);
        assert!(reader.read_window(Path::new("/missing.png"), 8).is_err());
        assert_eq!(
            reader.requested_paths(),
            vec![PathBuf::from("/x.png"), PathBuf::from("/missing.png")]
        );
    }
}
