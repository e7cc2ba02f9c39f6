//! Wire types for the ndjson import feed.
//!
//! One record per input line:
//! `{"id": "...", "text": "...", "lines": [{"begin": 0, "text": "...", "wits": [{"text": "..."}]}]}`

use serde::{Deserialize, Serialize};

/// One imported document record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRecord {
    /// External document identifier.
    pub id: String,
    /// Full canonical text of the document.
    pub text: String,
    /// Annotated line spans; may be unsorted and need not cover the text.
    pub lines: Vec<RawSpan>,
}

/// One annotated span of the document text.
///
/// Offsets are character offsets into the record's `text`. A span without
/// witnesses carries no normalized reading and is dropped before
/// segmentation; its range surfaces again through gap-filling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSpan {
    pub begin: usize,
    pub text: String,
    #[serde(default)]
    pub wits: Vec<Witness>,
}

/// A candidate reading of a span supplied by the alignment source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Witness {
    pub text: String,
}
