//! One pass of placeholder cleanup over a set of image folders.
//!
//! The step lists every folder through a [`StorageProvider`], classifies the
//! merged listing with a [`PlaceholderFilter`] and deletes the placeholder
//! pages. Missing folders, unreadable folders, malformed names and failed
//! deletions are logged and recorded in the [`CleanupReport`]; none of them
//! stops the run.

use crate::classify::{PlaceholderFilter, Verdict};
use crate::storage::StorageProvider;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CleanupOptions {
    pub dry_run: bool,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self { dry_run: true }
    }
}

/// A path together with the error that prevented acting on it.
#[derive(Debug, Clone, Serialize)]
pub struct FailedPath {
    pub path: PathBuf,
    pub error: String,
}

/// Listing and classification of the folders, before anything is deleted.
#[derive(Debug, Clone)]
pub struct CleanupPlan {
    pub started_at: DateTime<Utc>,
    pub folders_scanned: Vec<PathBuf>,
    pub missing_folders: Vec<PathBuf>,
    pub failed_folders: Vec<FailedPath>,
    pub files_seen: usize,
    pub placeholders: Vec<PathBuf>,
    pub kept: usize,
    pub malformed: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CleanupSummary {
    pub deleted: usize,
    pub kept: usize,
    pub malformed: usize,
    pub failed: usize,
}

/// Structured result of a cleanup run.
#[derive(Debug, Clone, Serialize)]
pub struct CleanupReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    pub splitter: String,
    pub folders_scanned: Vec<PathBuf>,
    pub missing_folders: Vec<PathBuf>,
    pub failed_folders: Vec<FailedPath>,
    pub files_seen: usize,
    /// Deleted paths, or the paths a dry run would delete.
    pub deleted: Vec<PathBuf>,
    pub kept: usize,
    pub malformed: Vec<PathBuf>,
    pub failed: Vec<FailedPath>,
}

impl CleanupReport {
    pub fn summary(&self) -> CleanupSummary {
        CleanupSummary {
            deleted: self.deleted.len(),
            kept: self.kept,
            malformed: self.malformed.len(),
            failed: self.failed.len(),
        }
    }

    /// True when every folder could be listed and every deletion succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.failed_folders.is_empty()
    }
}

pub struct CleanupStep<'a, S: StorageProvider + ?Sized> {
    storage: &'a S,
    filter: PlaceholderFilter,
    options: CleanupOptions,
}

impl<'a, S: StorageProvider + ?Sized> CleanupStep<'a, S> {
    pub fn new(storage: &'a S, filter: PlaceholderFilter, options: CleanupOptions) -> Self {
        Self {
            storage,
            filter,
            options,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.options.dry_run
    }

    /// List and classify, then delete.
    pub fn run(&self, folders: &[PathBuf]) -> CleanupReport {
        let plan = self.scan(folders);
        self.execute(plan, |_| {})
    }

    /// List every folder and classify the merged listing.
    ///
    /// A path that shows up more than once (the same folder passed twice) is
    /// classified once.
    pub fn scan(&self, folders: &[PathBuf]) -> CleanupPlan {
        log::info!(
            "Placeholder cleanup started on {} folder(s), splitter '{}'",
            folders.len(),
            self.filter.splitter()
        );

        let mut plan = CleanupPlan {
            started_at: Utc::now(),
            folders_scanned: Vec::new(),
            missing_folders: Vec::new(),
            failed_folders: Vec::new(),
            files_seen: 0,
            placeholders: Vec::new(),
            kept: 0,
            malformed: Vec::new(),
        };

        let mut seen = HashSet::new();

        for folder in folders {
            if !self.storage.exists(folder) {
                log::info!("Folder {} does not exist, skipping", folder.display());
                plan.missing_folders.push(folder.clone());
                continue;
            }

            let files = match self.storage.list_directory(folder) {
                Ok(files) => files,
                Err(e) => {
                    log::error!("Failed to list {}: {}", folder.display(), e);
                    plan.failed_folders.push(FailedPath {
                        path: folder.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            plan.folders_scanned.push(folder.clone());

            for path in files {
                if !seen.insert(path.clone()) {
                    continue;
                }
                plan.files_seen += 1;
                self.classify_path(path, &mut plan);
            }
        }

        plan
    }

    fn classify_path(&self, path: PathBuf, plan: &mut CleanupPlan) {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => {
                plan.malformed.push(path);
                return;
            }
        };

        match self.filter.verdict(&name) {
            Ok(Verdict::Placeholder) => plan.placeholders.push(path),
            Ok(Verdict::Keep) => plan.kept += 1,
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                plan.malformed.push(path);
            }
        }
    }

    /// Delete the placeholders of `plan`, calling `on_progress` after each one.
    ///
    /// In dry-run mode nothing is removed and the report lists what would be.
    pub fn execute<F>(&self, plan: CleanupPlan, mut on_progress: F) -> CleanupReport
    where
        F: FnMut(&Path),
    {
        let mut deleted = Vec::new();
        let mut failed = Vec::new();

        for path in plan.placeholders {
            if self.options.dry_run {
                log::info!("DRY RUN: Would delete {}", path.display());
                on_progress(&path);
                deleted.push(path);
                continue;
            }

            match self.storage.delete(&path) {
                Ok(()) => {
                    log::info!("Deleted placeholder {}", path.display());
                    on_progress(&path);
                    deleted.push(path);
                }
                Err(e) => {
                    log::error!("Failed to delete {}: {}", path.display(), e);
                    on_progress(&path);
                    failed.push(FailedPath {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        }

        let report = CleanupReport {
            started_at: plan.started_at,
            finished_at: Utc::now(),
            dry_run: self.options.dry_run,
            splitter: self.filter.splitter().to_string(),
            folders_scanned: plan.folders_scanned,
            missing_folders: plan.missing_folders,
            failed_folders: plan.failed_folders,
            files_seen: plan.files_seen,
            deleted,
            kept: plan.kept,
            malformed: plan.malformed,
            failed,
        };

        let summary = report.summary();
        log::info!(
            "Placeholder cleanup finished: {} deleted, {} kept, {} malformed, {} failed",
            summary.deleted,
            summary.kept,
            summary.malformed,
            summary.failed
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const MASTER: &str = "/process/images/book_master";
    const MEDIA: &str = "/process/images/book_media";

    fn folders() -> Vec<PathBuf> {
        vec![PathBuf::from(MASTER), PathBuf::from(MEDIA)]
    }

    fn book_storage() -> MemoryStorage {
        MemoryStorage::new()
            .with_folder(MASTER, ["book_00.tif", "book_01.tif", "book_02.tif"])
            .with_folder(MEDIA, ["book_00.tif", "book_01.tif", "notes"])
    }

    fn execute_options() -> CleanupOptions {
        CleanupOptions { dry_run: false }
    }

    #[test]
    fn test_deletes_placeholders_from_all_folders() {
        let storage = book_storage();
        let step = CleanupStep::new(&storage, PlaceholderFilter::default(), execute_options());

        let report = step.run(&folders());

        assert_eq!(
            report.deleted,
            vec![
                Path::new(MASTER).join("book_00.tif"),
                Path::new(MEDIA).join("book_00.tif"),
            ]
        );
        assert_eq!(storage.files_in(Path::new(MASTER)), vec!["book_01.tif", "book_02.tif"]);
        assert_eq!(storage.files_in(Path::new(MEDIA)), vec!["book_01.tif", "notes"]);

        let summary = report.summary();
        assert_eq!(summary.deleted, 2);
        assert_eq!(summary.kept, 3);
        assert_eq!(summary.malformed, 1);
        assert_eq!(summary.failed, 0);
        assert!(report.is_clean());
        assert_eq!(report.files_seen, 6);
    }

    #[test]
    fn test_default_options_are_dry_run() {
        let storage = book_storage();
        let step = CleanupStep::new(&storage, PlaceholderFilter::default(), CleanupOptions::default());

        assert!(step.is_dry_run());
        let report = step.run(&folders());

        assert!(report.dry_run);
        assert_eq!(report.deleted.len(), 2);
        assert_eq!(storage.files_in(Path::new(MASTER)).len(), 3);
        assert_eq!(storage.files_in(Path::new(MEDIA)).len(), 3);
    }

    #[test]
    fn test_missing_folder_is_skipped() {
        let storage = MemoryStorage::new().with_folder(MASTER, ["book_000.jpg"]);
        let step = CleanupStep::new(&storage, PlaceholderFilter::default(), execute_options());

        let report = step.run(&folders());

        assert_eq!(report.missing_folders, vec![PathBuf::from(MEDIA)]);
        assert_eq!(report.folders_scanned, vec![PathBuf::from(MASTER)]);
        assert_eq!(report.deleted.len(), 1);
        assert!(report.is_clean());
    }

    #[test]
    fn test_failed_listing_does_not_stop_run() {
        let storage = book_storage().fail_listing(MASTER);
        let step = CleanupStep::new(&storage, PlaceholderFilter::default(), execute_options());

        let report = step.run(&folders());

        assert_eq!(report.failed_folders.len(), 1);
        assert_eq!(report.failed_folders[0].path, PathBuf::from(MASTER));
        assert_eq!(report.deleted, vec![Path::new(MEDIA).join("book_00.tif")]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_failed_delete_does_not_stop_run() {
        let storage = book_storage().fail_delete(Path::new(MASTER).join("book_00.tif"));
        let step = CleanupStep::new(&storage, PlaceholderFilter::default(), execute_options());

        let report = step.run(&folders());

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].path, Path::new(MASTER).join("book_00.tif"));
        assert!(report.failed[0].error.contains("cannot delete"));
        assert_eq!(report.deleted, vec![Path::new(MEDIA).join("book_00.tif")]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_duplicate_folder_is_processed_once() {
        let storage = book_storage();
        let step = CleanupStep::new(&storage, PlaceholderFilter::default(), execute_options());

        let report = step.run(&[PathBuf::from(MASTER), PathBuf::from(MASTER)]);

        assert_eq!(report.files_seen, 3);
        assert_eq!(report.deleted.len(), 1);
        assert!(report.failed.is_empty());
    }

    #[test]
    fn test_progress_callback_sees_every_placeholder() {
        let storage = book_storage();
        let step = CleanupStep::new(&storage, PlaceholderFilter::default(), execute_options());

        let plan = step.scan(&folders());
        assert_eq!(plan.placeholders.len(), 2);

        let mut visited = Vec::new();
        let report = step.execute(plan, |path| visited.push(path.to_path_buf()));

        assert_eq!(visited, report.deleted);
    }

    #[test]
    fn test_custom_splitter() {
        let storage = MemoryStorage::new().with_folder(MASTER, ["book-00.tif", "book_00-01.tif"]);
        let filter = PlaceholderFilter::with_splitter("-").unwrap();
        let step = CleanupStep::new(&storage, filter, execute_options());

        let report = step.run(&[PathBuf::from(MASTER)]);

        assert_eq!(report.splitter, "-");
        assert_eq!(report.deleted, vec![Path::new(MASTER).join("book-00.tif")]);
        assert_eq!(storage.files_in(Path::new(MASTER)), vec!["book_00-01.tif"]);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let storage = book_storage();
        let step = CleanupStep::new(&storage, PlaceholderFilter::default(), CleanupOptions::default());

        let report = step.run(&folders());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["dry_run"], serde_json::Value::Bool(true));
        assert_eq!(json["splitter"], "_");
        assert_eq!(json["deleted"].as_array().unwrap().len(), 2);
    }
}
