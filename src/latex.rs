//! LaTeX output options for the PDF side of the documentation build.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One LaTeX document target: which document tree becomes which `.tex` file.
///
/// Carries the five values the documentation toolchain expects for every
/// entry of `latex_documents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatexDocument {
    /// Document the LaTeX build starts from, without file extension.
    pub start_doc: String,
    /// Name of the generated `.tex` file.
    pub target_name: String,
    /// Title printed on the cover page.
    pub title: String,
    /// Author printed on the cover page.
    pub author: String,
    /// LaTeX document class, `manual` or `howto`.
    pub doc_class: String,
}

impl LatexDocument {
    pub fn new(
        start_doc: impl Into<String>,
        target_name: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        doc_class: impl Into<String>,
    ) -> Self {
        Self {
            start_doc: start_doc.into(),
            target_name: target_name.into(),
            title: title.into(),
            author: author.into(),
            doc_class: doc_class.into(),
        }
    }
}

/// How URLs encountered in the text are rendered in LaTeX output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatexShowUrls {
    /// URLs are not shown at all.
    #[default]
    No,
    /// URLs become footnotes on the page they appear on.
    Footnote,
    /// URLs are rendered inline next to the link text.
    Inline,
}

impl fmt::Display for LatexShowUrls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatexShowUrls::No => write!(f, "no"),
            LatexShowUrls::Footnote => write!(f, "footnote"),
            LatexShowUrls::Inline => write!(f, "inline"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_urls_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LatexShowUrls::Footnote).unwrap(),
            "\"footnote\""
        );
        assert_eq!(
            serde_json::from_str::<LatexShowUrls>("\"inline\"").unwrap(),
            LatexShowUrls::Inline
        );
    }

    #[test]
    fn show_urls_display_matches_serialization() {
        assert_eq!(LatexShowUrls::No.to_string(), "no");
        assert_eq!(LatexShowUrls::Footnote.to_string(), "footnote");
        assert_eq!(LatexShowUrls::Inline.to_string(), "inline");
    }

    #[test]
    fn document_constructor_fills_fields() {
        let doc = LatexDocument::new("index", "manual.tex", "Manual", "Team", "manual");
        assert_eq!(doc.start_doc, "index");
        assert_eq!(doc.target_name, "manual.tex");
        assert_eq!(doc.doc_class, "manual");
    }
}
