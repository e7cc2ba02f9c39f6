//! Varia Import - Document segmentation and ndjson import pipeline.
//!
//! This crate provides:
//! - The segmentation engine: reconciles a document's full text with a
//!   sparse set of annotated line spans into a gap-free, ordered partition
//! - The import coordinator: a lazy, cancellable event stream that persists
//!   documents and their lines as the consumer pulls progress events

mod error;
mod importer;
mod record;
mod segment;

pub use error::{ImportError, ImportResult};
pub use importer::{ImportStream, Importer};
pub use record::{ImportRecord, RawSpan, Witness};
pub use segment::{segment, Segment, SegmentKind};
