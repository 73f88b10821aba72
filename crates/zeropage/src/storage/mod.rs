pub mod local;
#[cfg(any(test, feature = "testing"))]
pub mod memory;

use crate::error::Result;
use std::path::{Path, PathBuf};

pub use local::LocalStorage;
#[cfg(any(test, feature = "testing"))]
pub use memory::MemoryStorage;

/// Access to the folders a cleanup step works on.
///
/// Listing is flat: only regular files directly inside `dir` are returned.
/// Returned paths must be canonical, so one file listed through two spellings
/// of the same folder yields the same path.
pub trait StorageProvider {
    fn exists(&self, dir: &Path) -> bool;
    fn list_directory(&self, dir: &Path) -> Result<Vec<PathBuf>>;
    fn delete(&self, path: &Path) -> Result<()>;
}
