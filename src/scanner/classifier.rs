use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use log::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::LicenseConfig;
use crate::error::{LicenseError, LicenseResult};
use crate::header::HeaderVariant;

/// Language of a file as far as its comment syntax goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageClass {
    /// File extension without the dot
    pub extension: String,

    /// Line-comment prefix used for the header
    pub comment_prefix: String,
}

/// A file found during traversal, with the header it must carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Absolute location of the file
    pub path: PathBuf,

    /// Location relative to the scanned root, used in diagnostics
    pub relative: PathBuf,

    /// Language class, `None` when the extension is not recognized
    pub language: Option<LanguageClass>,

    /// Header variant selected by the file name
    pub required_variant: HeaderVariant,

    /// Under an excluded directory or not a recognized extension
    pub excluded: bool,

    /// False for dangling symlinks and missing explicit paths
    pub exists: bool,
}

/// Finds source files under a root and decides which header each one needs
#[derive(Debug, Clone)]
pub struct FileClassifier {
    comment_styles: BTreeMap<String, String>,
    excluded_dirs: Vec<String>,
    modification_suffixes: Vec<String>,
}

impl FileClassifier {
    pub fn new(config: &LicenseConfig) -> Self {
        Self {
            comment_styles: config.comment_styles.clone(),
            excluded_dirs: config.excluded_dirs.clone(),
            modification_suffixes: config.modification_suffixes.clone(),
        }
    }

    /// Resolve the language class for a path from its extension
    pub fn language_of(&self, path: &Path) -> Option<LanguageClass> {
        let ext = path.extension()?.to_str()?;
        self.comment_styles.get(ext).map(|prefix| LanguageClass {
            extension: ext.to_string(),
            comment_prefix: prefix.clone(),
        })
    }

    /// Select the header variant from the file name alone
    pub fn variant_of(&self, path: &Path) -> HeaderVariant {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        if self.modification_suffixes.iter().any(|suffix| name.ends_with(suffix.as_str())) {
            HeaderVariant::Modification
        } else {
            HeaderVariant::Standard
        }
    }

    /// True when `relative` lies under one of the excluded top-level directories
    pub fn is_excluded_path(&self, relative: &Path) -> bool {
        let mut components = relative.components().filter(|c| !matches!(c, Component::CurDir));
        match (components.next(), components.next()) {
            (Some(Component::Normal(first)), Some(_)) => self
                .excluded_dirs
                .iter()
                .any(|dir| first.to_str() == Some(dir.as_str())),
            _ => false,
        }
    }

    /// Classify a single path; relative paths are resolved against `root`
    ///
    /// `.` and `..` are resolved lexically first. Paths that end up outside
    /// `root` are excluded.
    pub fn classify(&self, root: &Path, path: &Path) -> FileDescriptor {
        let path = if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&root.join(path))
        };
        let (relative, inside_root) = match path.strip_prefix(root) {
            Ok(relative) => (relative.to_path_buf(), true),
            Err(_) => (path.clone(), false),
        };
        let language = self.language_of(&path);
        let excluded = !inside_root || language.is_none() || self.is_excluded_path(&relative);

        FileDescriptor {
            required_variant: self.variant_of(&path),
            exists: path.exists(),
            path,
            relative,
            language,
            excluded,
        }
    }

    /// Walk `root` and return every non-excluded file, sorted by path
    pub fn collect_files(&self, root: impl AsRef<Path>) -> LicenseResult<Vec<FileDescriptor>> {
        let root = canonical_root(root.as_ref())?;
        debug!("Collecting files from directory: {}", root.display());

        let mut files = Vec::new();

        let walker = WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
                continue;
            }

            let descriptor = self.classify(&root, entry.path());
            if descriptor.excluded {
                continue;
            }

            trace!("Found file: {}", descriptor.relative.display());
            files.push(descriptor);
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        debug!("Collected {} files for processing", files.len());
        Ok(files)
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        if entry.depth() != 1 || !entry.file_type().is_dir() {
            return false;
        }
        let excluded = entry
            .file_name()
            .to_str()
            .is_some_and(|name| self.excluded_dirs.iter().any(|dir| dir == name));
        if excluded {
            debug!("Skipping excluded directory: {}", entry.path().display());
        }
        excluded
    }
}

/// Drop `.` components and fold `..` into the preceding component
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Resolve the root to an absolute path, failing when it cannot be listed
pub(crate) fn canonical_root(root: &Path) -> LicenseResult<PathBuf> {
    let canonical = fs::canonicalize(root).map_err(|_| LicenseError::root_not_found(root))?;
    if !canonical.is_dir() {
        return Err(LicenseError::root_not_found(root));
    }
    fs::read_dir(&canonical).map_err(|e| {
        LicenseError::Configuration(format!("cannot read root directory {}: {}", canonical.display(), e))
    })?;
    Ok(canonical)
}
