//! Entry point that assembles the configuration for a build.
//!
//! The loader knows where the Maven descriptor lives relative to the
//! documentation sources, reads the project version out of it, and
//! combines that with the fixed configuration literals. It runs once at
//! the start of a build; any failure aborts the build before the
//! toolchain touches a single source file.

use std::path::{Path, PathBuf};

use crate::config::DocsConfig;
use crate::descriptor::ProjectDescriptor;
use crate::error::ConfigError;

/// Where the Maven descriptor sits relative to the documentation sources.
///
/// The manual lives in a `docs/` directory next to the plugin's
/// `pom.xml`, so from inside `docs/` the descriptor is one level up.
pub const DEFAULT_DESCRIPTOR_PATH: &str = "../pom.xml";

/// Loads the documentation configuration from a Maven project descriptor.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    descriptor_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader reading the descriptor at an explicit path.
    pub fn new(descriptor_path: impl Into<PathBuf>) -> Self {
        Self {
            descriptor_path: descriptor_path.into(),
        }
    }

    /// Create a loader for a documentation source directory, resolving
    /// the descriptor at its conventional location.
    pub fn for_docs_dir(docs_dir: &Path) -> Self {
        Self::new(docs_dir.join(DEFAULT_DESCRIPTOR_PATH))
    }

    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    /// Read the descriptor and produce the full build configuration.
    ///
    /// Fails fast: a missing descriptor, malformed XML, or an absent
    /// version element all surface as a [`ConfigError`] instead of a
    /// configuration with placeholder values.
    pub fn load(&self) -> Result<DocsConfig, ConfigError> {
        let descriptor = ProjectDescriptor::from_path(&self.descriptor_path)?;
        let config = DocsConfig::with_version(descriptor.version);
        config.validate()?;

        log::info!(
            "documentation configuration ready: {} {}",
            config.project,
            config.version
        );
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(DEFAULT_DESCRIPTOR_PATH)
    }
}
