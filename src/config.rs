use std::collections::BTreeMap;
use std::path::Path;
use std::fs;
use anyhow::{Result, Context};
use log::{debug, info};
use serde::{Serialize, Deserialize};

use crate::report::types::Mode;

/// File name looked up in the root directory when no config path is given
pub const CONFIG_FILE_NAME: &str = ".license-header.toml";

/// Text of the license header, shared by both variants except the first line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseText {
    /// First line of the header for originally authored files
    pub copyright: String,

    /// First line of the header for files adapted from another codebase
    pub modification_copyright: String,

    /// Remaining header lines; empty strings render as bare comment markers
    pub body: Vec<String>,
}

impl Default for LicenseText {
    fn default() -> Self {
        Self {
            copyright: "Copyright 2019 Preferred Networks, Inc.".to_string(),
            modification_copyright: "Modifications copyright 2019 Preferred Networks, Inc.".to_string(),
            body: [
                "",
                "Licensed under the Apache License, Version 2.0 (the \"License\");",
                "you may not use this file except in compliance with the License.",
                "You may obtain a copy of the License at",
                "",
                "    http://www.apache.org/licenses/LICENSE-2.0",
                "",
                "Unless required by applicable law or agreed to in writing, software",
                "distributed under the License is distributed on an \"AS IS\" BASIS,",
                "WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.",
                "See the License for the specific language governing permissions and",
                "limitations under the License.",
            ]
            .iter()
            .map(|line| line.to_string())
            .collect(),
        }
    }
}

/// Traversal and header rules for one source tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseConfig {
    /// Map of file extension (without the dot) to line-comment prefix
    pub comment_styles: BTreeMap<String, String>,

    /// Top-level directories skipped entirely during traversal
    pub excluded_dirs: Vec<String>,

    /// File name suffixes marking files adapted from an external codebase
    pub modification_suffixes: Vec<String>,

    /// Header text
    pub license: LicenseText,

    /// Number of threads used to evaluate files
    pub parallel_threads: Option<usize>,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        let comment_styles = [("go", "//"), ("py", "#"), ("sh", "#")]
            .iter()
            .map(|(ext, prefix)| (ext.to_string(), prefix.to_string()))
            .collect();

        Self {
            comment_styles,
            excluded_dirs: vec!["vendor".to_string()],
            modification_suffixes: vec!["_k8s.go".to_string()],
            license: LicenseText::default(),
            parallel_threads: None,
        }
    }
}

impl LicenseConfig {
    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse a configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: LicenseConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Use `<root>/.license-header.toml` when present, defaults otherwise
    pub fn discover(root: impl AsRef<Path>) -> Result<Self> {
        let candidate = root.as_ref().join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            info!("Using configuration file {}", candidate.display());
            Self::load(candidate)
        } else {
            debug!("No {} found, using default configuration", CONFIG_FILE_NAME);
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.comment_styles.is_empty() {
            anyhow::bail!("comment_styles must name at least one extension");
        }
        if let Some((ext, _)) = self.comment_styles.iter().find(|(_, prefix)| prefix.is_empty()) {
            anyhow::bail!("comment prefix for extension '{}' is empty", ext);
        }
        if self.parallel_threads == Some(0) {
            anyhow::bail!("parallel_threads must be at least 1");
        }
        Ok(())
    }
}

/// Per-run options for a compliance pass
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Check only, or insert missing headers
    pub mode: Mode,

    /// Number of parallel threads to use for evaluation
    pub parallel_threads: Option<usize>,

    /// Whether to draw a progress bar on large trees
    pub show_progress: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Check,
            parallel_threads: None,
            show_progress: false,
        }
    }
}

impl ScanOptions {
    pub fn fix() -> Self {
        Self {
            mode: Mode::Fix,
            ..Self::default()
        }
    }
}
