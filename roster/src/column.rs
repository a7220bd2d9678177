//! Column definitions.

use std::fmt;
use std::sync::Arc;

use crate::error::CellError;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Render function for one cell: `(item, index) -> text`.
pub type CellRenderer<T> = Arc<dyn Fn(&T, usize) -> Result<String, CellError> + Send + Sync>;

/// A table column: header, sizing, alignment and a pure render function.
///
/// # Example
///
/// ```ignore
/// let columns = vec![
///     ColumnDef::new("id", "ID", |e: &Employee, _| e.id.to_string())
///         .width(8)
///         .align(Alignment::Right),
///     ColumnDef::new("name", "Name", |e: &Employee, _| e.name.clone()).sortable(),
///     ColumnDef::try_new("hours", "Hours", |e: &Employee, _| e.hours_label()).min_width(6),
/// ];
/// ```
pub struct ColumnDef<T> {
    /// Unique identifier for this column.
    pub key: String,
    /// Header text displayed at the top.
    pub header: String,
    /// Explicit width in cells. When absent the column gets an equal share.
    pub width: Option<u16>,
    /// Lower bound applied to the equal share.
    pub min_width: Option<u16>,
    /// Horizontal alignment of header and cells.
    pub align: Alignment,
    /// Whether the header can toggle a sort indicator for this column.
    pub sortable: bool,
    render: CellRenderer<T>,
}

impl<T> ColumnDef<T> {
    /// Create a column with an infallible render function.
    pub fn new<F, S>(key: impl Into<String>, header: impl Into<String>, render: F) -> Self
    where
        F: Fn(&T, usize) -> S + Send + Sync + 'static,
        S: Into<String>,
    {
        Self::from_renderer(
            key,
            header,
            Arc::new(move |item: &T, index: usize| -> Result<String, CellError> {
                Ok(render(item, index).into())
            }),
        )
    }

    /// Create a column whose render function can fail.
    ///
    /// A failure degrades only the row being rendered.
    pub fn try_new<F, S>(key: impl Into<String>, header: impl Into<String>, render: F) -> Self
    where
        F: Fn(&T, usize) -> Result<S, CellError> + Send + Sync + 'static,
        S: Into<String>,
    {
        Self::from_renderer(
            key,
            header,
            Arc::new(move |item: &T, index: usize| -> Result<String, CellError> {
                render(item, index).map(Into::into)
            }),
        )
    }

    fn from_renderer(
        key: impl Into<String>,
        header: impl Into<String>,
        render: CellRenderer<T>,
    ) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            width: None,
            min_width: None,
            align: Alignment::Left,
            sortable: false,
            render,
        }
    }

    /// Set a fixed width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the minimum width used when the width is shared.
    pub fn min_width(mut self, min_width: u16) -> Self {
        self.min_width = Some(min_width);
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Invoke the render function for one cell.
    pub fn render(&self, item: &T, index: usize) -> Result<String, CellError> {
        (self.render)(item, index)
    }
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            width: self.width,
            min_width: self.min_width,
            align: self.align,
            sortable: self.sortable,
            render: Arc::clone(&self.render),
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("min_width", &self.min_width)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}
