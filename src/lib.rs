//! SCOS2K Documentation Config
//!
//! Typed build configuration for the SCOS2K plugin manual. The project
//! version is read from the plugin's Maven descriptor so the rendered
//! documentation always matches the artifact it ships with; everything
//! else is fixed at implementation time.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod latex;
pub mod loader;

pub use config::{DocsConfig, ExtLink};
pub use descriptor::{ProjectDescriptor, POM_NAMESPACE};
pub use error::ConfigError;
pub use latex::{LatexDocument, LatexShowUrls};
pub use loader::{ConfigLoader, DEFAULT_DESCRIPTOR_PATH};
