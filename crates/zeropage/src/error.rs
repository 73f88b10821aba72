use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZeroPageError {
    #[error("Malformed filename (no extension): {0}")]
    MalformedFilename(String),

    #[error("Name part splitter must not be empty")]
    EmptySplitter,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory listing error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("User input error: {0}")]
    UserInput(String),
}

impl From<dialoguer::Error> for ZeroPageError {
    fn from(err: dialoguer::Error) -> Self {
        ZeroPageError::UserInput(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ZeroPageError>;
