//! The documentation build configuration value.
//!
//! Everything the documentation toolchain needs to render the SCOS2K plugin
//! manual lives here: project metadata, the extension list, and the LaTeX
//! output options. Only `version` and `release` vary between builds; they
//! are derived from the Maven descriptor by the loader. The value is
//! constructed once per build and read-only afterwards, so it can be handed
//! to any number of concurrent readers without synchronization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::latex::{LatexDocument, LatexShowUrls};

/// A shortened external link: URL template plus optional display caption.
///
/// The template carries exactly one `%s` placeholder the link target is
/// substituted into. Without a caption, the expanded URL itself is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtLink {
    pub url: String,
    pub caption: Option<String>,
}

impl ExtLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: None,
        }
    }

    pub fn with_caption(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: Some(caption.into()),
        }
    }
}

/// Complete configuration consumed by the documentation toolchain.
///
/// Field names follow the names the toolchain looks up, so a serialized
/// form maps one-to-one onto the values it expects. Mappings whose
/// declaration order matters (`extlinks`, `latex_elements`) use
/// [`IndexMap`] so iteration order is declaration order; `extensions` is
/// kept in declaration order because the toolchain loads extensions in
/// list order and some depend on their predecessors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsConfig {
    pub project: String,
    pub copyright: String,
    pub author: String,
    /// Project version, taken from the build descriptor.
    pub version: String,
    /// Full released version; always the same value as `version`.
    pub release: String,
    pub language: String,
    /// Glob patterns for sources the toolchain must skip.
    pub exclude_patterns: Vec<String>,
    pub pygments_style: String,
    /// Toolchain plugins to load, in order.
    pub extensions: Vec<String>,
    pub extlinks: IndexMap<String, ExtLink>,
    pub smartquotes: bool,
    pub latex_elements: IndexMap<String, String>,
    pub latex_documents: Vec<LatexDocument>,
    pub latex_show_urls: LatexShowUrls,
}

impl DocsConfig {
    /// Build the full configuration for a given project version.
    ///
    /// Everything except `version`/`release` is fixed at implementation
    /// time; both version fields receive the same value.
    pub fn with_version(version: impl Into<String>) -> Self {
        let version = version.into();
        Self {
            project: "yamcs-scos2k".to_string(),
            copyright: "2024-present, Space Applications Services".to_string(),
            author: "Yamcs Team".to_string(),
            release: version.clone(),
            version,
            language: "en".to_string(),
            exclude_patterns: vec![
                "_build".to_string(),
                "Thumbs.db".to_string(),
                ".DS_Store".to_string(),
            ],
            pygments_style: "sphinx".to_string(),
            extensions: vec![
                "sphinx.ext.extlinks".to_string(),
                "sphinxcontrib.fulltoc".to_string(),
                "sphinxcontrib.yamcs".to_string(),
            ],
            extlinks: IndexMap::from([(
                "yamcs-manual".to_string(),
                ExtLink::new("https://docs.yamcs.org/yamcs-server-manual/%s"),
            )]),
            // leave `--` sequences alone instead of turning them into en-dashes
            smartquotes: false,
            latex_elements: IndexMap::from([
                ("papersize".to_string(), "a4paper".to_string()),
                ("figure_align".to_string(), "htbp".to_string()),
                ("extraclassoptions".to_string(), "openany".to_string()),
            ]),
            latex_documents: vec![LatexDocument::new(
                "index",
                "yamcs-scos2k.tex",
                "Yamcs: SCOS2K plugin",
                "Space Applications Services",
                "manual",
            )],
            latex_show_urls: LatexShowUrls::Footnote,
        }
    }

    /// Check the configuration's internal invariants.
    ///
    /// The loader runs this before handing the value out. A failure names
    /// the offending field so whoever maintains the descriptor or the
    /// literals can fix it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "version must not be empty".to_string(),
            ));
        }
        if self.version != self.release {
            return Err(ConfigError::InvalidConfig(format!(
                "version ({}) and release ({}) must carry the same value",
                self.version, self.release
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for extension in &self.extensions {
            if !seen.insert(extension.as_str()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "extension '{}' is declared more than once",
                    extension
                )));
            }
        }

        for (name, link) in &self.extlinks {
            let placeholders = link.url.matches("%s").count();
            if placeholders != 1 {
                return Err(ConfigError::InvalidConfig(format!(
                    "extlink '{}' must carry exactly one %s placeholder, found {}",
                    name, placeholders
                )));
            }
        }

        for (idx, doc) in self.latex_documents.iter().enumerate() {
            for (field, value) in [
                ("start_doc", &doc.start_doc),
                ("target_name", &doc.target_name),
                ("title", &doc.title),
                ("author", &doc.author),
                ("doc_class", &doc.doc_class),
            ] {
                if value.is_empty() {
                    return Err(ConfigError::InvalidConfig(format!(
                        "latex_documents[{idx}] has an empty {field}"
                    )));
                }
            }
        }

        Ok(())
    }
}
