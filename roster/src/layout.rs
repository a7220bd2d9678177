//! Column layout shared by the header and every row.

use std::collections::HashSet;

use log::debug;

use crate::column::{Alignment, ColumnDef};
use crate::error::ConfigError;

/// One column after width resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub key: String,
    pub width: u16,
    pub align: Alignment,
}

/// Resolved widths for a column sequence at a given total width.
///
/// The header and all rows read from the same `Layout`, which is what keeps
/// them aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    columns: Vec<ResolvedColumn>,
    total_width: u16,
}

impl Layout {
    /// Resolved columns in display order.
    pub fn columns(&self) -> &[ResolvedColumn] {
        &self.columns
    }

    /// The width the layout was computed for.
    pub fn total_width(&self) -> u16 {
        self.total_width
    }

    /// Sum of all resolved widths. May exceed `total_width` when explicit or
    /// minimum widths do not fit.
    pub fn content_width(&self) -> usize {
        self.columns.iter().map(|c| c.width as usize).sum()
    }

    /// Resolved widths in order.
    pub fn widths(&self) -> Vec<u16> {
        self.columns.iter().map(|c| c.width).collect()
    }

    /// Position of a column by key.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Check that column keys are unique.
pub fn validate_columns<T>(columns: &[ColumnDef<T>]) -> Result<(), ConfigError> {
    let mut seen = HashSet::with_capacity(columns.len());
    for col in columns {
        if !seen.insert(col.key.as_str()) {
            return Err(ConfigError::DuplicateColumnKey(col.key.clone()));
        }
    }
    Ok(())
}

/// Validate the columns and resolve every column's width.
pub fn compute_layout<T>(columns: &[ColumnDef<T>], total_width: u16) -> Result<Layout, ConfigError> {
    validate_columns(columns)?;
    Ok(resolve_layout(columns, total_width))
}

/// Resolve every column's width for columns already known to be valid.
///
/// A column with an explicit width keeps it. Every other column gets
/// `total_width / column_count`, raised to its `min_width` if one is set.
pub fn resolve_layout<T>(columns: &[ColumnDef<T>], total_width: u16) -> Layout {
    let share = if columns.is_empty() {
        0
    } else {
        total_width / u16::try_from(columns.len()).unwrap_or(u16::MAX)
    };

    let resolved = columns
        .iter()
        .map(|col| {
            let width = match col.width {
                Some(w) => w,
                None => share.max(col.min_width.unwrap_or(0)),
            };
            ResolvedColumn {
                key: col.key.clone(),
                width,
                align: col.align,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        "Computed layout for {} columns at width {}: {:?}",
        resolved.len(),
        total_width,
        resolved.iter().map(|c| c.width).collect::<Vec<_>>()
    );

    Layout {
        columns: resolved,
        total_width,
    }
}
