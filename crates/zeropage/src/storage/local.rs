use crate::error::{Result, ZeroPageError};
use crate::storage::StorageProvider;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Storage backed by the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl StorageProvider for LocalStorage {
    fn exists(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    fn list_directory(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.exists() {
            return Err(ZeroPageError::DirectoryNotFound(dir.to_path_buf()));
        }

        // Canonical folder paths make listed paths comparable across spellings
        // such as `master` and `master/../master`.
        let dir = fs::canonicalize(dir)?;

        let walker = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            let file_type = entry.file_type();
            // Symlinks count when they resolve to a regular file; the link itself is listed.
            if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    fn delete(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)?;
        log::debug!("Removed {}", path.display());
        Ok(())
    }
}
