//! Error taxonomy for configuration production.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while producing the documentation build configuration.
///
/// Every variant is terminal for the invoking build: rendering documentation
/// with a wrong or missing version is worse than rendering none, so no
/// variant is retried and no partial configuration is ever handed out.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The project descriptor does not exist at the resolved path.
    #[error("project descriptor not found: {path}")]
    DescriptorNotFound { path: PathBuf },

    /// The project descriptor exists but could not be read.
    #[error("failed to read project descriptor {path}: {source}")]
    DescriptorRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The descriptor content is not a well-formed XML document.
    #[error("project descriptor {path} is not well-formed XML: {detail}")]
    Malformed { path: PathBuf, detail: String },

    /// No usable `<version>` element under the Maven POM namespace exists
    /// among the direct children of the document root.
    #[error("project descriptor {path} declares no <version> element under the Maven POM namespace")]
    MissingVersion { path: PathBuf },

    /// A populated configuration violated one of its invariants.
    #[error("invalid documentation configuration: {0}")]
    InvalidConfig(String),
}

impl ConfigError {
    pub(crate) fn malformed(path: &Path, detail: impl std::fmt::Display) -> Self {
        Self::Malformed {
            path: path.to_path_buf(),
            detail: detail.to_string(),
        }
    }
}
