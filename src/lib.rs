pub mod config;
pub mod error;
pub mod header;
pub mod report;
pub mod scanner;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export main types and functions for easier access
pub use config::{LicenseConfig, LicenseText, ScanOptions};
pub use error::{LicenseError, LicenseResult};
pub use header::{inject, is_compliant, HeaderTemplate, HeaderVariant, TemplateCatalog};
pub use report::{ComplianceReporter, ComplianceResult, ComplianceStats, Mode, Phase, Report, ViolationKind};
pub use scanner::{FileClassifier, FileDescriptor, LanguageClass};
