//! Reading project metadata out of the Maven build descriptor.
//!
//! The documentation must always show the version of the plugin it was built
//! from, so the version is read from `pom.xml` instead of being maintained in
//! two places. The descriptor is owned by the build system; it is consulted
//! once per documentation build and never written.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use regex::Regex;

use crate::error::ConfigError;

/// Namespace every Maven project descriptor declares its elements under.
pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

lazy_static! {
    /// Loose shape of a Maven version: numeric core, optional qualifiers.
    static ref MAVEN_VERSION: Regex =
        Regex::new(r"^[0-9]+(\.[0-9]+)*([.-][0-9A-Za-z]+)*$").unwrap();
}

/// Project metadata extracted from a Maven build descriptor.
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    /// Version exactly as declared by the descriptor, surrounding
    /// whitespace trimmed.
    pub version: String,
    /// Path the descriptor was read from.
    pub path: PathBuf,
}

impl ProjectDescriptor {
    /// Read the descriptor at `path` and extract the project version.
    ///
    /// Fails fast: a missing file, malformed XML, or an absent version is a
    /// build-correctness problem the caller needs to see immediately, never
    /// something to paper over with a default.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let xml = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::DescriptorNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::InvalidData => {
                ConfigError::malformed(path, "descriptor is not valid UTF-8")
            }
            _ => ConfigError::DescriptorRead {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let version = extract_version(&xml, path)?;

        if !MAVEN_VERSION.is_match(&version) {
            log::warn!(
                "version '{}' in {} does not look like a Maven version",
                version,
                path.display()
            );
        }
        log::debug!(
            "resolved project version {} from {}",
            version,
            path.display()
        );

        Ok(Self {
            version,
            path: path.to_path_buf(),
        })
    }
}

/// Extract the text of the `<version>` element sitting directly under the
/// document root, bound to the Maven POM namespace.
///
/// Versions nested deeper, such as `<parent><version>` or dependency
/// versions, never qualify. The first matching element wins, and only the
/// text before its first child element counts. The whole document is still
/// parsed so that malformed markup after the version is reported instead
/// of ignored.
fn extract_version(xml: &str, path: &Path) -> Result<String, ConfigError> {
    // UTF-8 BOM, if the descriptor was saved with one
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = NsReader::from_str(xml);

    let mut depth = 0usize;
    let mut saw_root = false;
    let mut found: Option<String> = None;
    let mut current: Option<String> = None;

    loop {
        let (resolve, event) = reader
            .read_resolved_event()
            .map_err(|e| ConfigError::malformed(path, e))?;

        match event {
            Event::Start(start) => {
                depth += 1;
                if depth == 1 {
                    if saw_root {
                        return Err(ConfigError::malformed(
                            path,
                            "content after the document root",
                        ));
                    }
                    saw_root = true;
                }
                // a child element ends the text segment the lookup reads
                if let Some(text) = current.take() {
                    found = Some(text);
                }
                // depth 2 means this element is a direct child of the root
                if depth == 2
                    && found.is_none()
                    && is_pom_version(&resolve, start.local_name().as_ref())
                {
                    current = Some(String::new());
                }
            }
            Event::Empty(empty) => {
                // self-closing element, no matching End event follows
                if depth == 0 {
                    if saw_root {
                        return Err(ConfigError::malformed(
                            path,
                            "content after the document root",
                        ));
                    }
                    saw_root = true;
                } else if depth == 1
                    && found.is_none()
                    && is_pom_version(&resolve, empty.local_name().as_ref())
                {
                    found = Some(String::new());
                } else if let Some(text) = current.take() {
                    // self-closing child inside the matched version element
                    found = Some(text);
                }
            }
            Event::Text(text) => {
                // every text node is unescaped, wherever it sits, so an
                // undefined entity anywhere makes the document malformed
                let unescaped = text
                    .unescape()
                    .map_err(|e| ConfigError::malformed(path, e))?;
                if depth == 0 {
                    if !unescaped.trim().is_empty() {
                        return Err(ConfigError::malformed(
                            path,
                            "text outside the document root",
                        ));
                    }
                } else if let Some(buf) = current.as_mut() {
                    buf.push_str(&unescaped);
                }
            }
            Event::CData(cdata) => {
                if let Some(buf) = current.as_mut() {
                    buf.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Event::End(_) => {
                if let Some(text) = current.take() {
                    found = Some(text);
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(ConfigError::malformed(path, "document has no root element"));
    }
    if depth != 0 {
        // quick-xml tolerates an EOF inside open elements; a build
        // descriptor truncated mid-write must not pass as valid
        return Err(ConfigError::malformed(
            path,
            "unexpected end of document inside an open element",
        ));
    }

    found
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingVersion {
            path: path.to_path_buf(),
        })
}

fn is_pom_version(resolve: &ResolveResult<'_>, local_name: &[u8]) -> bool {
    match resolve {
        ResolveResult::Bound(Namespace(ns)) => {
            *ns == POM_NAMESPACE.as_bytes() && local_name == b"version"
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
  <modelVersion>4.0.0</modelVersion>
  <groupId>org.yamcs</groupId>
  <artifactId>yamcs-scos2k</artifactId>
  <version>1.3.2</version>
  <packaging>jar</packaging>
</project>
"#;

    fn extract(xml: &str) -> Result<String, ConfigError> {
        extract_version(xml, Path::new("pom.xml"))
    }

    #[test]
    fn extracts_direct_child_version() {
        assert_eq!(extract(POM).unwrap(), "1.3.2");
    }

    #[test]
    fn accepts_prefixed_namespace() {
        let xml = r#"<m:project xmlns:m="http://maven.apache.org/POM/4.0.0">
            <m:version>4.2.1</m:version>
        </m:project>"#;
        assert_eq!(extract(xml).unwrap(), "4.2.1");
    }

    #[test]
    fn ignores_version_outside_pom_namespace() {
        let xml = "<project><version>9.9.9</version></project>";
        assert!(matches!(
            extract(xml),
            Err(ConfigError::MissingVersion { .. })
        ));
    }

    #[test]
    fn ignores_nested_versions() {
        let xml = r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
            <parent>
                <groupId>org.yamcs</groupId>
                <version>7.0.0</version>
            </parent>
            <dependencies>
                <dependency><version>2.1.0</version></dependency>
            </dependencies>
        </project>"#;
        assert!(matches!(
            extract(xml),
            Err(ConfigError::MissingVersion { .. })
        ));
    }

    #[test]
    fn nested_version_does_not_shadow_project_version() {
        let xml = r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
            <parent><version>7.0.0</version></parent>
            <version>1.0.0</version>
        </project>"#;
        assert_eq!(extract(xml).unwrap(), "1.0.0");
    }

    #[test]
    fn first_direct_child_version_wins() {
        let xml = r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
            <version>1.0.0</version>
            <version>2.0.0</version>
        </project>"#;
        assert_eq!(extract(xml).unwrap(), "1.0.0");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let xml = r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
            <version>
                1.3.2
            </version>
        </project>"#;
        assert_eq!(extract(xml).unwrap(), "1.3.2");
    }

    #[test]
    fn blank_version_is_missing() {
        let empty = r#"<project xmlns="http://maven.apache.org/POM/4.0.0"><version/></project>"#;
        assert!(matches!(
            extract(empty),
            Err(ConfigError::MissingVersion { .. })
        ));

        let blank =
            r#"<project xmlns="http://maven.apache.org/POM/4.0.0"><version>   </version></project>"#;
        assert!(matches!(
            extract(blank),
            Err(ConfigError::MissingVersion { .. })
        ));
    }

    #[test]
    fn rejects_document_without_root() {
        assert!(matches!(
            extract("this is not an XML document"),
            Err(ConfigError::Malformed { .. })
        ));
        assert!(matches!(extract(""), Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn rejects_mismatched_end_tag() {
        let xml = r#"<project xmlns="http://maven.apache.org/POM/4.0.0"><version>1.0</version></oops>"#;
        assert!(matches!(extract(xml), Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn rejects_truncated_document() {
        // the version element itself is fine, the document around it is not
        let xml = r#"<project xmlns="http://maven.apache.org/POM/4.0.0"><version>1.0</version>"#;
        assert!(matches!(extract(xml), Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn rejects_undefined_entity_in_version() {
        let xml =
            r#"<project xmlns="http://maven.apache.org/POM/4.0.0"><version>1.0&bogus;</version></project>"#;
        assert!(matches!(extract(xml), Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn rejects_undefined_entity_outside_version() {
        // the version itself is fine; the document as a whole is not
        let xml = r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
            <version>1.0.0</version>
            <name>scos2k &bogus; plugin</name>
        </project>"#;
        assert!(matches!(extract(xml), Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn mixed_content_stops_at_first_child_element() {
        let xml = r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
            <version>1.0<classifier/>2</version>
        </project>"#;
        assert_eq!(extract(xml).unwrap(), "1.0");
    }

    #[test]
    fn version_with_no_text_before_first_child_is_missing() {
        let xml = r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
            <version><classifier>rc1</classifier></version>
        </project>"#;
        assert!(matches!(
            extract(xml),
            Err(ConfigError::MissingVersion { .. })
        ));
    }

    #[test]
    fn unescapes_version_text() {
        let xml =
            r#"<project xmlns="http://maven.apache.org/POM/4.0.0"><version>1.0&#46;3</version></project>"#;
        assert_eq!(extract(xml).unwrap(), "1.0.3");
    }

    #[test]
    fn from_path_missing_file() {
        let result = ProjectDescriptor::from_path(Path::new("/definitely/not/here/pom.xml"));
        assert!(matches!(
            result,
            Err(ConfigError::DescriptorNotFound { .. })
        ));
    }

    #[test]
    fn from_path_reads_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pom.xml");
        std::fs::write(&path, POM).unwrap();

        let descriptor = ProjectDescriptor::from_path(&path).unwrap();
        assert_eq!(descriptor.version, "1.3.2");
        assert_eq!(descriptor.path, path);
    }

    #[test]
    fn maven_version_shapes() {
        assert!(MAVEN_VERSION.is_match("1.3.2"));
        assert!(MAVEN_VERSION.is_match("5.12.0-SNAPSHOT"));
        assert!(MAVEN_VERSION.is_match("2.0-beta1"));
        assert!(!MAVEN_VERSION.is_match("not a version"));
        assert!(!MAVEN_VERSION.is_match(""));
    }
}
