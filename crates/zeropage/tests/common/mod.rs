#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zeropage_lib::Result;

/// A process directory with a master and a media image folder, the way a
/// digitization workflow lays out one scanned book.
pub struct BookFixture {
    pub temp_dir: TempDir,
    pub master: PathBuf,
    pub media: PathBuf,
}

impl BookFixture {
    pub fn new(title: &str) -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let images = temp_dir.path().join("images");
        let master = images.join(format!("{}_master", title));
        let media = images.join(format!("{}_media", title));
        fs::create_dir_all(&master)?;
        fs::create_dir_all(&media)?;
        let master = fs::canonicalize(master)?;
        let media = fs::canonicalize(media)?;

        Ok(Self {
            temp_dir,
            master,
            media,
        })
    }

    pub fn folders(&self) -> Vec<PathBuf> {
        vec![self.master.clone(), self.media.clone()]
    }

    pub fn add_master(&self, names: &[&str]) -> Result<()> {
        create_images(&self.master, names)
    }

    pub fn add_media(&self, names: &[&str]) -> Result<()> {
        create_images(&self.media, names)
    }

    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join("zeropage.toml");
        fs::write(&path, content)?;
        Ok(path)
    }
}

pub fn create_images(dir: &Path, names: &[&str]) -> Result<()> {
    for name in names {
        fs::write(dir.join(name), b"II*\0")?;
    }
    Ok(())
}

pub fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
