use serde::{Serialize, Deserialize};

use super::types::{ComplianceResult, ViolationKind};

/// Counters for a compliance run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceStats {
    /// Total number of files evaluated
    pub total_files: usize,

    /// Files that already carried the header
    pub compliant_files: usize,

    /// Files without the header and not fixed
    pub missing_headers: usize,

    /// Files that received a header during this run
    pub fixed_files: usize,

    /// Files that could not be read, written or anchored
    pub error_files: usize,
}

impl ComplianceStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_results(results: &[ComplianceResult]) -> Self {
        let mut stats = Self::new();
        for result in results {
            stats.record(result);
        }
        stats
    }

    /// Count one result
    pub fn record(&mut self, result: &ComplianceResult) {
        self.total_files += 1;
        match (result.ok, result.fixed, result.kind) {
            (true, true, _) => self.fixed_files += 1,
            (true, false, _) => self.compliant_files += 1,
            (false, _, Some(ViolationKind::MissingHeader)) => self.missing_headers += 1,
            (false, _, _) => self.error_files += 1,
        }
    }

    /// Number of files that failed
    pub fn failed_files(&self) -> usize {
        self.missing_headers + self.error_files
    }
}
