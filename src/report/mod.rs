pub mod types;
pub mod stats;
pub mod reporter;
pub mod output;

// Re-export the main API for easier access
pub use types::{ComplianceResult, Mode, Report, ViolationKind};
pub use stats::ComplianceStats;
pub use reporter::{ComplianceReporter, Phase};
