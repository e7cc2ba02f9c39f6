//! Import coordinator.
//!
//! Drives the segmentation engine over an ndjson feed and persists the
//! results, narrating progress as a pull-driven event stream: each record is
//! parsed, and each line written, only when the consumer asks for the next
//! event. Dropping the stream cancels the import; nothing further is
//! persisted and the underlying reader is released.

use crate::error::{ImportError, ImportResult};
use crate::record::ImportRecord;
use crate::segment::{segment, Segment, SegmentKind};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};
use varia_core::{Document, ImportEvent, Line};
use varia_db::Database;

/// Imports ndjson document records into the store.
pub struct Importer {
    db: Database,
}

impl Importer {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Import records from a reader, returning the lazy event stream.
    pub fn import<R: BufRead>(&self, reader: R) -> ImportStream<R> {
        ImportStream {
            db: self.db.clone(),
            input: reader.lines(),
            line_no: 0,
            state: State::NextRecord,
        }
    }

    /// Import records from an ndjson file on disk.
    pub fn import_path(&self, path: impl AsRef<Path>) -> ImportResult<ImportStream<BufReader<File>>> {
        let file = File::open(path)?;
        Ok(self.import(BufReader::new(file)))
    }
}

/// Lazy import progress stream.
///
/// Record-level failures (malformed JSON, storage errors) surface as `Err`
/// items and abort only their own record; the stream then continues with the
/// next one.
pub struct ImportStream<R> {
    db: Database,
    input: std::io::Lines<R>,
    line_no: usize,
    state: State,
}

enum State {
    /// Ready to read the next ndjson record.
    NextRecord,
    /// Persisting one record's segments, one per pulled event.
    Emitting {
        document: Document,
        segments: std::vec::IntoIter<Segment>,
    },
    Done,
}

impl<R: BufRead> Iterator for ImportStream<R> {
    type Item = ImportResult<ImportEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                State::Done => return None,

                State::Emitting { document, segments } => match segments.next() {
                    Some(seg) => {
                        let event = segment_event(&seg);
                        let line =
                            Line::new(document.id.clone(), seg.start, seg.canonical, seg.normalized);
                        if let Err(e) = self.db.create_line(&line) {
                            self.state = State::NextRecord;
                            return Some(Err(e.into()));
                        }
                        return Some(Ok(event));
                    }
                    None => {
                        let title = document.title.clone();
                        self.state = State::NextRecord;
                        return Some(Ok(ImportEvent::success(format!(
                            "Document {} import completed.",
                            title
                        ))));
                    }
                },

                State::NextRecord => {
                    let raw = match self.input.next() {
                        None => {
                            self.state = State::Done;
                            return None;
                        }
                        Some(Err(e)) => {
                            self.state = State::Done;
                            return Some(Err(e.into()));
                        }
                        Some(Ok(raw)) => raw,
                    };
                    self.line_no += 1;

                    if raw.trim().is_empty() {
                        continue;
                    }

                    let record: ImportRecord = match serde_json::from_str(&raw) {
                        Ok(record) => record,
                        Err(source) => {
                            return Some(Err(ImportError::Malformed {
                                line: self.line_no,
                                source,
                            }))
                        }
                    };

                    match self.db.find_document_by_title(&record.id) {
                        Ok(Some(_)) => {
                            debug!("Document {} already imported, skipping", record.id);
                            return Some(Ok(ImportEvent::warning(format!(
                                "Document with ID {} already exists. Skipping...",
                                record.id
                            ))
                            .strong()));
                        }
                        Ok(None) => {}
                        Err(e) => return Some(Err(e.into())),
                    }

                    let ImportRecord { id, text, lines } = record;
                    info!("Importing document: {}", id);

                    // Persist the document first so its identity is available
                    // for the owned lines.
                    let document = Document::new(id, text);
                    if let Err(e) = self.db.create_document(&document) {
                        return Some(Err(e.into()));
                    }

                    let segments = segment(&document.text, lines);
                    debug!(
                        "Segmented {} into {} lines",
                        document.title,
                        segments.len()
                    );

                    let event = ImportEvent::success(format!(
                        "Document {} created successfully.",
                        document.title
                    ))
                    .strong();
                    self.state = State::Emitting {
                        document,
                        segments: segments.into_iter(),
                    };
                    return Some(Ok(event));
                }
            }
        }
    }
}

fn segment_event(seg: &Segment) -> ImportEvent {
    match seg.kind {
        SegmentKind::Uncovered => ImportEvent::warning(format!(
            "Uncovered line added at position {} for `{}`",
            seg.start,
            seg.canonical.trim()
        )),
        SegmentKind::Mapped => ImportEvent::info(format!("Line added: {}", seg.canonical)),
    }
}
