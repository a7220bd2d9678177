//! Error types for table configuration and row rendering.

use std::any::Any;

use thiserror::Error;

/// A configuration problem that prevents the table from rendering at all.
///
/// These are detected when the table is built or when its columns change,
/// and are always returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Row height must be at least one unit.
    #[error("item height must be greater than zero (got {0})")]
    InvalidItemHeight(u32),

    /// Two columns share the same key.
    #[error("duplicate column key '{0}'")]
    DuplicateColumnKey(String),

    /// A column key was referenced that is not part of the table.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// Sorting was requested on a column that is not sortable.
    #[error("column '{0}' is not sortable")]
    NotSortable(String),
}

/// Error returned by a fallible cell render function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CellError(String);

impl CellError {
    /// Create a cell error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// A single row failed to render.
///
/// The row is replaced by a placeholder and the rest of the window still
/// renders; the fault is carried on the frame as a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {index}, column '{column}': {message}")]
pub struct RenderFault {
    /// Dataset index of the row.
    pub index: usize,
    /// Key of the column whose render function failed.
    pub column: String,
    /// Error or panic message.
    pub message: String,
}

/// Extract a human-readable message from a panic payload.
///
/// Panics can carry either `&str` or `String` payloads. Anything else falls
/// back to a generic message.
pub fn extract_panic_message(panic: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
