//! Abstractions for filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait lets the pipeline work against the real disk in
//! production and against an in-memory `MockFs` in tests.

use std::io;
use std::path::{Path, PathBuf};

/// Abstraction for the whole-file text operations the pipeline needs.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as UTF-8 text.
    ///
    /// Fails with `ErrorKind::NotFound` if the file no longer exists and with
    /// `ErrorKind::InvalidData` if the content is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replaces the contents of a file, creating it if needed.
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists the regular files directly inside a directory.
    ///
    /// The listing is shallow: subdirectories are neither returned nor
    /// descended into. Order is whatever the underlying source yields.
    fn list_files(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path)?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry_path = entry?.path();
            // Follows symlinks, so a link to a regular file counts as a file.
            if entry_path.is_file() {
                paths.push(entry_path);
            }
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_real_fs_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.txt");

        let mut fs = RealFs::new();
        fs.write(&path, "first\nsecond\n").unwrap();

        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_real_fs_list_files_is_shallow() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.txt"), "c").unwrap();

        let fs = RealFs::new();
        let mut files = fs.list_files(dir.path()).unwrap();
        files.sort();

        assert_eq!(
            files,
            vec![dir.path().join("a.txt"), dir.path().join("b.txt")]
        );
    }

    #[test]
    fn test_real_fs_is_dir() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();

        let fs = RealFs::new();
        assert!(fs.is_dir(dir.path()));
        assert!(!fs.is_dir(&file));
        assert!(!fs.is_dir(Path::new("/nonexistent/path/12345")));
    }

    #[test]
    fn test_real_fs_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, [0x63, 0x61, 0xE4, 0x0A]).unwrap();

        let err = RealFs::new().read_to_string(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
