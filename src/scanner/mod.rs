mod classifier;
mod progress;

// Re-export from submodules
pub use classifier::{FileClassifier, FileDescriptor, LanguageClass};
pub(crate) use classifier::canonical_root;
pub use progress::ProgressTracker;
