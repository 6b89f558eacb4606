use std::fmt;
use std::path::PathBuf;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use super::stats::ComplianceStats;
use crate::error::LicenseError;

/// Whether a run only reports or also rewrites files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Check,
    Fix,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Check => write!(f, "check"),
            Mode::Fix => write!(f, "fix"),
        }
    }
}

/// Category of a failed per-file result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingHeader,
    NotFound,
    FileAccess,
    MalformedFile,

    /// No header template could be resolved for the file
    Configuration,
}

impl ViolationKind {
    /// Map a per-file error onto its violation category
    pub fn from_error(error: &LicenseError) -> Self {
        match error {
            LicenseError::ComplianceViolation => ViolationKind::MissingHeader,
            LicenseError::NotFound => ViolationKind::NotFound,
            LicenseError::MalformedFile => ViolationKind::MalformedFile,
            LicenseError::FileAccess(_) => ViolationKind::FileAccess,
            LicenseError::Configuration(_) => ViolationKind::Configuration,
        }
    }
}

/// Outcome for one evaluated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// Absolute path of the file
    pub path: PathBuf,

    /// Path relative to the scanned root
    pub relative: PathBuf,

    pub ok: bool,

    /// Diagnostic when `ok` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ViolationKind>,

    /// The header was inserted during this run
    #[serde(default)]
    pub fixed: bool,
}

impl ComplianceResult {
    pub fn compliant(path: PathBuf, relative: PathBuf) -> Self {
        Self {
            path,
            relative,
            ok: true,
            reason: None,
            kind: None,
            fixed: false,
        }
    }

    pub fn fixed(path: PathBuf, relative: PathBuf) -> Self {
        Self {
            fixed: true,
            ..Self::compliant(path, relative)
        }
    }

    pub fn violation(path: PathBuf, relative: PathBuf, error: &LicenseError) -> Self {
        Self {
            path,
            relative,
            ok: false,
            reason: Some(error.to_string()),
            kind: Some(ViolationKind::from_error(error)),
            fixed: false,
        }
    }
}

/// Aggregated outcome of a check or fix run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub mode: Mode,

    /// True iff every result is ok; vacuously true for an empty run
    pub all_ok: bool,

    /// One entry per evaluated file, sorted by path
    pub results: Vec<ComplianceResult>,

    pub stats: ComplianceStats,

    pub generated_at: DateTime<Utc>,
}

impl Report {
    pub fn new(mode: Mode, mut results: Vec<ComplianceResult>) -> Self {
        results.sort_by(|a, b| a.path.cmp(&b.path));
        let all_ok = results.iter().all(|r| r.ok);
        let stats = ComplianceStats::from_results(&results);

        Self {
            mode,
            all_ok,
            results,
            stats,
            generated_at: Utc::now(),
        }
    }

    /// Results that failed the check
    pub fn violations(&self) -> impl Iterator<Item = &ComplianceResult> {
        self.results.iter().filter(|r| !r.ok)
    }

    /// Process exit code for the CLI
    pub fn exit_code(&self) -> u8 {
        match self.mode {
            Mode::Check if !self.all_ok => 1,
            _ => 0,
        }
    }
}
