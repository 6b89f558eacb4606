use std::io;
use std::path::PathBuf;

/// Errors raised while checking or fixing license headers
#[derive(thiserror::Error, Debug)]
pub enum LicenseError {
    /// Root directory or configuration file cannot be used; aborts the run
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A single file could not be opened for read or write
    #[error("cannot access file: {0}")]
    FileAccess(#[from] io::Error),

    /// An explicitly requested or linked file is missing
    #[error("file does not exist")]
    NotFound,

    /// File has no line to anchor the header insertion
    #[error("file is empty, there is no line to anchor the license header")]
    MalformedFile,

    /// File is readable but carries no conforming header
    #[error("missing a license header")]
    ComplianceViolation,
}

impl LicenseError {
    pub fn root_not_found(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self::Configuration(format!("root directory {} does not exist or is not a directory", root.display()))
    }
}

pub type LicenseResult<T> = Result<T, LicenseError>;
