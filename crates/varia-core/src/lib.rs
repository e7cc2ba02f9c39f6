//! Varia Core - Domain types for the Varia alignment annotation store.

mod events;
mod types;

pub use events::{Emphasis, ImportEvent, Severity};
pub use types::*;
