//! Core domain types for Varia.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for documents.
pub type DocumentId = String;

/// Unique identifier for lines.
pub type LineId = String;

/// Generate a new unique ID.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Review status of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineStatus {
    #[default]
    Pending,
    Validated,
}

impl LineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineStatus::Pending => "pending",
            LineStatus::Validated => "validated",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(LineStatus::Pending),
            "validated" => Some(LineStatus::Validated),
            _ => None,
        }
    }
}

impl std::fmt::Display for LineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An imported document with its canonical text.
///
/// The title is the external identifier from the import feed and is unique
/// across the store; the text is immutable once imported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub display_name: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            display_name: None,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Name shown to reviewers: display name when set, title otherwise.
    pub fn displayable_title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.title)
    }
}

/// One segment of a document's text, owned by exactly one document.
///
/// `canonical` is the verbatim text slice; `normalized` is the reviewer-facing
/// reading, empty when the segment had no witness coverage. Offsets and
/// lengths are character counts, not bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    pub document_id: DocumentId,
    pub start: usize,
    pub canonical: String,
    pub normalized: String,
    pub status: LineStatus,
    pub merge: bool,
}

impl Line {
    pub fn new(
        document_id: DocumentId,
        start: usize,
        canonical: impl Into<String>,
        normalized: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            document_id,
            start,
            canonical: canonical.into(),
            normalized: normalized.into(),
            status: LineStatus::Pending,
            merge: false,
        }
    }

    /// Character length of the canonical text.
    pub fn length(&self) -> usize {
        self.canonical.chars().count()
    }

    /// Offset one past the last character of this line.
    pub fn end(&self) -> usize {
        self.start + self.length()
    }

    /// A line synthesized to fill a gap between supplied spans.
    pub fn is_uncovered(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Partial update applied to a line by the reviewer operation.
///
/// Only present fields are written; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinePatch {
    pub normalized: Option<String>,
    pub merge: Option<bool>,
    pub status: Option<LineStatus>,
}

impl LinePatch {
    pub fn is_empty(&self) -> bool {
        self.normalized.is_none() && self.merge.is_none() && self.status.is_none()
    }
}

/// Download serialization of a document and its lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentExport {
    pub id: DocumentId,
    pub title: String,
    pub text: String,
    pub lines: Vec<LineExport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineExport {
    pub start: usize,
    pub canonical: String,
    pub normalized: String,
    pub status: LineStatus,
    pub merge: bool,
}

impl From<&Line> for LineExport {
    fn from(line: &Line) -> Self {
        Self {
            start: line.start,
            canonical: line.canonical.clone(),
            normalized: line.normalized.clone(),
            status: line.status,
            merge: line.merge,
        }
    }
}

impl DocumentExport {
    pub fn new(document: &Document, lines: &[Line]) -> Self {
        Self {
            id: document.id.clone(),
            title: document.title.clone(),
            text: document.text.clone(),
            lines: lines.iter().map(LineExport::from).collect(),
        }
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_documents: i64,
    pub total_lines: i64,
    pub pending_lines: i64,
    pub validated_lines: i64,
    pub uncovered_lines: i64,
    pub database_size_bytes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_length_and_end() {
        let line = Line::new("doc1".to_string(), 4, "hello", "hallo");
        assert_eq!(line.length(), 5);
        assert_eq!(line.end(), 9);
        assert_eq!(line.status, LineStatus::Pending);
        assert!(!line.merge);
    }

    #[test]
    fn test_line_length_is_char_count() {
        // Multi-byte characters count as one each
        let line = Line::new("doc1".to_string(), 0, "þæt wæs", "that was");
        assert_eq!(line.length(), 7);
        assert_eq!(line.end(), 7);
    }

    #[test]
    fn test_uncovered_line() {
        let covered = Line::new("doc1".to_string(), 0, "text", "reading");
        let uncovered = Line::new("doc1".to_string(), 4, " gap ", "");
        assert!(!covered.is_uncovered());
        assert!(uncovered.is_uncovered());
    }

    #[test]
    fn test_displayable_title() {
        let doc = Document::new("ms-cotton-vitellius-a15", "Hwæt");
        assert_eq!(doc.displayable_title(), "ms-cotton-vitellius-a15");

        let doc = doc.with_display_name("Beowulf manuscript");
        assert_eq!(doc.displayable_title(), "Beowulf manuscript");
        assert_eq!(doc.title, "ms-cotton-vitellius-a15");
    }

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(LineStatus::from_str("validated"), Some(LineStatus::Validated));
        assert_eq!(LineStatus::from_str("Pending"), Some(LineStatus::Pending));
        assert_eq!(LineStatus::from_str("unknown"), None);
        assert_eq!(LineStatus::default(), LineStatus::Pending);
    }

    #[test]
    fn test_line_patch_is_empty() {
        assert!(LinePatch::default().is_empty());
        let patch = LinePatch {
            status: Some(LineStatus::Validated),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_export_shape() {
        let doc = Document::new("doc-1", "AB CD");
        let lines = vec![
            Line::new(doc.id.clone(), 0, "AB", "ab"),
            Line::new(doc.id.clone(), 2, " CD", ""),
        ];
        let export = DocumentExport::new(&doc, &lines);

        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["title"], "doc-1");
        assert_eq!(json["lines"][0]["start"], 0);
        assert_eq!(json["lines"][0]["status"], "pending");
        assert_eq!(json["lines"][1]["normalized"], "");
        assert_eq!(json["lines"][1]["merge"], false);
    }
}
