//! File System Trait
//!
//! The output writer only talks to the destination tree through [`FileSystem`],
//! so conflict handling can be tested against an in-memory tree.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Abstract file system interface for the templates tree
pub trait FileSystem {
    /// Read raw file bytes
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write file content atomically, replacing any existing file
    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if a directory exists at `path`
    fn is_dir(&self, path: &Path) -> bool;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Local disk implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()> {
        use std::io::Write;

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        // Temp file in the same directory so the rename stays on one filesystem
        let mut tmp = temp_file_in(&parent)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;

        // A replaced template keeps its mode; a new one gets the umask default
        if let Ok(existing) = std::fs::metadata(path) {
            tmp.as_file().set_permissions(existing.permissions())?;
        }

        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// Temp file created with mode 0666 so the umask applies, like a plain create
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

/// Mock file system for testing
///
/// Uses `Arc<Mutex<>>` internally so it can be cloned and shared.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockFileSystem {
    pub files: std::sync::Arc<std::sync::Mutex<std::collections::HashMap<PathBuf, Vec<u8>>>>,
    pub dirs: std::sync::Arc<std::sync::Mutex<std::collections::HashSet<PathBuf>>>,
    /// Paths whose writes fail with `PermissionDenied`
    pub read_only: std::sync::Arc<std::sync::Mutex<std::collections::HashSet<PathBuf>>>,
}

#[cfg(test)]
impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.files.lock().unwrap().insert(path.into(), content.into());
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    pub fn deny_writes(&self, path: impl Into<PathBuf>) {
        self.read_only.lock().unwrap().insert(path.into());
    }
}

#[cfg(test)]
impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let files = self.files.lock().unwrap();
        files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "File not found"))
    }

    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()> {
        if self.read_only.lock().unwrap().contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        let mut files = self.files.lock().unwrap();
        files.insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }
}
