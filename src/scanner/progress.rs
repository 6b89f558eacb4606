use std::sync::atomic::{AtomicUsize, Ordering};

use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use rayon::prelude::*;

use super::FileDescriptor;

/// Below this many files no progress bar is drawn
const PROGRESS_THRESHOLD: usize = 10;

/// Progress tracker for displaying progress while files are evaluated
#[derive(Debug, Default)]
pub struct ProgressTracker {
    enabled: bool,
}

impl ProgressTracker {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Run `operation` on every descriptor in parallel, keeping input order
    pub fn track_files<F, R>(&self, files: &[FileDescriptor], operation: F) -> Vec<R>
    where
        F: Fn(&FileDescriptor) -> R + Sync + Send,
        R: Send,
    {
        let progress_bar = self.progress_bar(files.len());
        let processed_count = AtomicUsize::new(0);

        let results: Vec<R> = files
            .par_iter()
            .map(|file| {
                let current_count = processed_count.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(pb) = &progress_bar {
                    pb.set_position(current_count as u64);

                    // Update message occasionally to avoid too many updates
                    if current_count % 10 == 0 || current_count == 1 || current_count == files.len() {
                        if let Some(file_name) = file.path.file_name() {
                            pb.set_message(format!("Checking: {}", file_name.to_string_lossy()));
                        }
                    }
                }

                operation(file)
            })
            .collect();

        if let Some(pb) = progress_bar {
            pb.finish_with_message("Header check complete");
        }

        results
    }

    fn progress_bar(&self, len: usize) -> Option<ProgressBar> {
        if !self.enabled || len <= PROGRESS_THRESHOLD {
            return None;
        }

        let pb = ProgressBar::new(len as u64);
        match ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta}) {msg}",
        ) {
            Ok(style) => pb.set_style(style.progress_chars("#>-")),
            Err(e) => warn!("Invalid progress bar template: {}", e),
        }
        Some(pb)
    }
}
