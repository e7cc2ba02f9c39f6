//! Progress events emitted by the import coordinator.
//!
//! The import produces an ordered stream of these records; a presentation
//! layer (CLI, web view) renders them incrementally as they are pulled.

use serde::{Deserialize, Serialize};

/// How a consumer should weight an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Success,
}

/// Visual emphasis hint for document-level events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    #[default]
    None,
    Strong,
}

/// One step of import progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportEvent {
    pub message: String,
    pub severity: Severity,
    pub emphasis: Emphasis,
}

impl ImportEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn strong(mut self) -> Self {
        self.emphasis = Emphasis::Strong;
        self
    }

    fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            emphasis: Emphasis::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_builders() {
        let ev = ImportEvent::warning("already exists").strong();
        assert_eq!(ev.severity, Severity::Warning);
        assert_eq!(ev.emphasis, Emphasis::Strong);

        let ev = ImportEvent::info("line added");
        assert_eq!(ev.severity, Severity::Info);
        assert_eq!(ev.emphasis, Emphasis::None);
    }
}
