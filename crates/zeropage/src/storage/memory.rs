use crate::error::{Result, ZeroPageError};
use crate::storage::StorageProvider;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// In-memory storage with injectable failures, compiled for tests and the
/// `testing` feature.
///
/// Folders map to sets of file names. Deletions and listings can be made to
/// fail for individual paths.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    folders: Mutex<BTreeMap<PathBuf, BTreeSet<String>>>,
    failing_deletes: BTreeSet<PathBuf>,
    failing_listings: BTreeSet<PathBuf>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_folder<I, S>(mut self, dir: impl Into<PathBuf>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let folders = self.folders.get_mut().unwrap_or_else(|e| e.into_inner());
        folders
            .entry(dir.into())
            .or_default()
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn fail_delete(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing_deletes.insert(path.into());
        self
    }

    pub fn fail_listing(mut self, dir: impl Into<PathBuf>) -> Self {
        self.failing_listings.insert(dir.into());
        self
    }

    /// Remaining file names in `dir`, sorted.
    pub fn files_in(&self, dir: &Path) -> Vec<String> {
        let folders = self.folders.lock().unwrap_or_else(|e| e.into_inner());
        folders
            .get(dir)
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl StorageProvider for MemoryStorage {
    fn exists(&self, dir: &Path) -> bool {
        let folders = self.folders.lock().unwrap_or_else(|e| e.into_inner());
        folders.contains_key(dir)
    }

    fn list_directory(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if self.failing_listings.contains(dir) {
            return Err(ZeroPageError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot list {}", dir.display()),
            )));
        }

        let folders = self.folders.lock().unwrap_or_else(|e| e.into_inner());
        let names = folders
            .get(dir)
            .ok_or_else(|| ZeroPageError::DirectoryNotFound(dir.to_path_buf()))?;

        Ok(names.iter().map(|name| dir.join(name)).collect())
    }

    fn delete(&self, path: &Path) -> Result<()> {
        if self.failing_deletes.contains(path) {
            return Err(ZeroPageError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot delete {}", path.display()),
            )));
        }

        let not_found = || {
            ZeroPageError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            ))
        };

        let parent = path.parent().ok_or_else(not_found)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(not_found)?;

        let mut folders = self.folders.lock().unwrap_or_else(|e| e.into_inner());
        let removed = folders
            .get_mut(parent)
            .map(|names| names.remove(&name))
            .unwrap_or(false);

        if removed {
            Ok(())
        } else {
            Err(not_found())
        }
    }
}
