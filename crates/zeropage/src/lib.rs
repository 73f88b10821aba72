pub mod classify;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod storage;
pub mod util;

pub use classify::{
    classify, Classification, NamePartSplitter, PlaceholderFilter, Verdict, DEFAULT_SPLITTER,
};
pub use cleanup::{CleanupOptions, CleanupPlan, CleanupReport, CleanupStep, CleanupSummary, FailedPath};
pub use config::{Config, StepConfig};
pub use error::{Result, ZeroPageError};
pub use storage::{LocalStorage, StorageProvider};
#[cfg(any(test, feature = "testing"))]
pub use storage::MemoryStorage;
