use std::path::{Path, PathBuf};
use log::{debug, info, warn};

use super::types::{ComplianceResult, Mode, Report};
use crate::config::{LicenseConfig, ScanOptions};
use crate::error::{LicenseError, LicenseResult};
use crate::header::{inject, is_compliant, HeaderTemplate, TemplateCatalog};
use crate::scanner::{canonical_root, FileClassifier, FileDescriptor, ProgressTracker};
use crate::utils::file_utils;

/// Where a reporter is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Scanning,
    Evaluating,
    CheckComplete,
    FixComplete,
    Done,
}

/// Drives classification, detection and injection over a tree
#[derive(Debug)]
pub struct ComplianceReporter {
    /// Configuration options for the run
    options: ScanOptions,

    /// Finds files and resolves their header variant
    classifier: FileClassifier,

    /// Rendered headers for every comment prefix
    catalog: TemplateCatalog,

    /// Progress display for the evaluation phase
    progress_tracker: ProgressTracker,

    /// Configured thread count, used when the options leave it open
    config_threads: Option<usize>,

    phase: Phase,
}

impl ComplianceReporter {
    pub fn new(config: &LicenseConfig, options: ScanOptions) -> Self {
        let catalog = TemplateCatalog::new(
            config.comment_styles.values().map(String::as_str),
            &config.license,
        );

        Self {
            progress_tracker: ProgressTracker::new(options.show_progress),
            options,
            classifier: FileClassifier::new(config),
            catalog,
            config_threads: config.parallel_threads,
            phase: Phase::Idle,
        }
    }

    /// Create a reporter with the default configuration
    pub fn with_defaults(mode: Mode) -> Self {
        let options = ScanOptions {
            mode,
            ..ScanOptions::default()
        };
        Self::new(&LicenseConfig::default(), options)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Walk `root` and check or fix every recognized file
    pub fn run(&mut self, root: impl AsRef<Path>) -> LicenseResult<Report> {
        let root = root.as_ref();
        info!("Running {} on {}", self.options.mode, root.display());

        self.phase = Phase::Scanning;
        let files = match self.classifier.collect_files(root) {
            Ok(files) => files,
            Err(e) => {
                self.phase = Phase::Idle;
                return Err(e);
            }
        };
        info!("Found {} files to check", files.len());

        Ok(self.evaluate_all(files))
    }

    /// Check or fix an explicit list of files, resolved against `root`
    ///
    /// Paths with an unrecognized extension or under an excluded directory are
    /// dropped; missing paths are reported as violations.
    pub fn run_paths(&mut self, root: impl AsRef<Path>, paths: &[PathBuf]) -> LicenseResult<Report> {
        self.phase = Phase::Scanning;
        let root = match canonical_root(root.as_ref()) {
            Ok(root) => root,
            Err(e) => {
                self.phase = Phase::Idle;
                return Err(e);
            }
        };

        let mut files: Vec<FileDescriptor> = paths
            .iter()
            .map(|path| self.classifier.classify(&root, path))
            .filter(|descriptor| !descriptor.excluded)
            .collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files.dedup_by(|a, b| a.path == b.path);
        info!("Checking {} of {} requested files", files.len(), paths.len());

        Ok(self.evaluate_all(files))
    }

    fn evaluate_all(&mut self, files: Vec<FileDescriptor>) -> Report {
        self.phase = Phase::Evaluating;
        let results = self.evaluate_files(&files);

        self.phase = match self.options.mode {
            Mode::Check => Phase::CheckComplete,
            Mode::Fix => Phase::FixComplete,
        };
        let report = Report::new(self.options.mode, results);
        info!(
            "Evaluated {} files: {} compliant, {} fixed, {} missing, {} errors",
            report.stats.total_files,
            report.stats.compliant_files,
            report.stats.fixed_files,
            report.stats.missing_headers,
            report.stats.error_files
        );

        self.phase = Phase::Done;
        report
    }

    fn evaluate_files(&self, files: &[FileDescriptor]) -> Vec<ComplianceResult> {
        let thread_count = self.options.parallel_threads.or(self.config_threads).unwrap_or_else(|| {
            let available = num_cpus::get();
            let used = std::cmp::max(1, available.saturating_sub(1));
            debug!("Using {} threads for evaluation (available: {})", used, available);
            used
        });

        let run = || self.progress_tracker.track_files(files, |file| self.evaluate_file(file));

        match rayon::ThreadPoolBuilder::new().num_threads(thread_count).build() {
            Ok(pool) => pool.install(run),
            Err(e) => {
                warn!("Failed to build thread pool, using the global pool: {}", e);
                run()
            }
        }
    }

    /// Evaluate one file, rewriting it in fix mode
    pub fn evaluate_file(&self, file: &FileDescriptor) -> ComplianceResult {
        debug!("Checking {}", file.relative.display());

        match self.evaluate(file) {
            Ok(true) => ComplianceResult::fixed(file.path.clone(), file.relative.clone()),
            Ok(false) => ComplianceResult::compliant(file.path.clone(), file.relative.clone()),
            Err(e) => {
                debug!("{}: {}", file.relative.display(), e);
                ComplianceResult::violation(file.path.clone(), file.relative.clone(), &e)
            }
        }
    }

    /// Returns whether the file was rewritten
    fn evaluate(&self, file: &FileDescriptor) -> LicenseResult<bool> {
        if !file.exists {
            return Err(LicenseError::NotFound);
        }

        let template = self.template_for(file)?;
        let content = file_utils::read_file_bytes(&file.path)?;

        if is_compliant(&content, template) {
            return Ok(false);
        }

        match self.options.mode {
            Mode::Check => Err(LicenseError::ComplianceViolation),
            Mode::Fix => {
                let updated = inject(&content, template)?;
                file_utils::write_bytes_to_file(&file.path, &updated)?;
                info!("Added {} license header to {}", template.variant(), file.relative.display());
                Ok(true)
            }
        }
    }

    /// Header template the descriptor must carry
    pub fn template_for(&self, file: &FileDescriptor) -> LicenseResult<&HeaderTemplate> {
        let language = file.language.as_ref().ok_or_else(|| {
            LicenseError::Configuration(format!("no comment style for {}", file.relative.display()))
        })?;

        self.catalog
            .get(&language.comment_prefix, file.required_variant)
            .ok_or_else(|| {
                LicenseError::Configuration(format!(
                    "no header template for prefix '{}'",
                    language.comment_prefix
                ))
            })
    }
}
