use std::collections::HashMap;
use std::fmt;
use serde::{Serialize, Deserialize};

use crate::config::LicenseText;

/// Which of the two header texts a file must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderVariant {
    /// Originally authored files
    Standard,

    /// Files adapted from an external codebase
    Modification,
}

impl fmt::Display for HeaderVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderVariant::Standard => write!(f, "standard"),
            HeaderVariant::Modification => write!(f, "modification"),
        }
    }
}

/// A license header for one comment prefix and variant
///
/// The rendered block is computed once at construction. Every body line `L`
/// becomes `prefix + " " + L`, or `prefix` alone when `L` is empty, and lines
/// are joined by `\n` without a trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
    comment_prefix: String,
    variant: HeaderVariant,
    lines: Vec<String>,
    rendered: String,
}

impl HeaderTemplate {
    pub fn new(comment_prefix: impl Into<String>, variant: HeaderVariant, text: &LicenseText) -> Self {
        let first = match variant {
            HeaderVariant::Standard => &text.copyright,
            HeaderVariant::Modification => &text.modification_copyright,
        };
        let lines: Vec<String> = std::iter::once(first.clone())
            .chain(text.body.iter().cloned())
            .collect();
        let comment_prefix = comment_prefix.into();
        let rendered = render(&comment_prefix, &lines);

        Self {
            comment_prefix,
            variant,
            lines,
            rendered,
        }
    }

    pub fn variant(&self) -> HeaderVariant {
        self.variant
    }

    /// Raw header lines, without comment prefixes
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The exact block that must appear in a conforming file
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.rendered.as_bytes()
    }
}

fn render(prefix: &str, lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| {
            if line.is_empty() {
                prefix.to_string()
            } else {
                format!("{} {}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// All templates needed for one run, keyed by comment prefix and variant
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: HashMap<(String, HeaderVariant), HeaderTemplate>,
}

impl TemplateCatalog {
    /// Build both variants for every distinct prefix
    pub fn new<'a>(prefixes: impl IntoIterator<Item = &'a str>, text: &LicenseText) -> Self {
        let mut templates = HashMap::new();
        for prefix in prefixes {
            for variant in [HeaderVariant::Standard, HeaderVariant::Modification] {
                templates
                    .entry((prefix.to_string(), variant))
                    .or_insert_with(|| HeaderTemplate::new(prefix, variant, text));
            }
        }
        Self { templates }
    }

    pub fn get(&self, prefix: &str, variant: HeaderVariant) -> Option<&HeaderTemplate> {
        self.templates.get(&(prefix.to_string(), variant))
    }
}
