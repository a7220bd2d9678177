//! Rendering of a single row.
//!
//! Rows are independent: rendering one never reads another's state, and a
//! failing render function only degrades its own row.

use std::panic::{self, AssertUnwindSafe};

use log::warn;

use crate::column::ColumnDef;
use crate::error::{RenderFault, extract_panic_message};
use crate::layout::Layout;
use crate::text::fit;

/// Content of a materialized row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowBody {
    /// One fitted string per column, each exactly its resolved width.
    Cells(Vec<String>),
    /// A column failed; the row is shown as an error placeholder.
    Fault(RenderFault),
}

/// The visual form of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowVisual<K> {
    /// Dataset index.
    pub index: usize,
    /// Selection key of the row.
    pub key: K,
    /// Offset of the row's top edge from the top of the content.
    pub top: u64,
    /// Selection control state; `None` when the table has no selection control.
    pub selected: Option<bool>,
    pub body: RowBody,
}

impl<K> RowVisual<K> {
    pub fn fault(&self) -> Option<&RenderFault> {
        match &self.body {
            RowBody::Fault(fault) => Some(fault),
            RowBody::Cells(_) => None,
        }
    }

    pub fn cells(&self) -> &[String] {
        match &self.body {
            RowBody::Cells(cells) => cells,
            RowBody::Fault(_) => &[],
        }
    }
}

/// Inputs shared by every row in one render pass.
pub struct RowContext<'a, T> {
    pub columns: &'a [ColumnDef<T>],
    pub layout: &'a Layout,
    pub item_height: u32,
}

/// Render one row into a new visual.
pub fn render_row<T, K>(
    cx: &RowContext<'_, T>,
    item: &T,
    index: usize,
    key: K,
    selected: Option<bool>,
) -> RowVisual<K> {
    let mut row = RowVisual {
        index,
        key,
        top: 0,
        selected,
        body: RowBody::Cells(Vec::with_capacity(cx.columns.len())),
    };
    fill_row(cx, &mut row, item);
    row
}

/// Render one row into an existing visual, reusing its cell storage.
pub fn render_row_into<T, K>(
    cx: &RowContext<'_, T>,
    row: &mut RowVisual<K>,
    item: &T,
    index: usize,
    key: K,
    selected: Option<bool>,
) {
    row.index = index;
    row.key = key;
    row.selected = selected;
    fill_row(cx, row, item);
}

fn fill_row<T, K>(cx: &RowContext<'_, T>, row: &mut RowVisual<K>, item: &T) {
    let index = row.index;
    row.top = (index as u64).saturating_mul(u64::from(cx.item_height));

    let mut cells = match std::mem::replace(&mut row.body, RowBody::Cells(Vec::new())) {
        RowBody::Cells(mut cells) => {
            cells.clear();
            cells
        }
        RowBody::Fault(_) => Vec::with_capacity(cx.columns.len()),
    };

    for (col, resolved) in cx.columns.iter().zip(cx.layout.columns()) {
        match render_cell(col, item, index) {
            Ok(text) => cells.push(fit(&text, resolved.width as usize, resolved.align)),
            Err(message) => {
                let fault = RenderFault {
                    index,
                    column: col.key.clone(),
                    message,
                };
                warn!("Render fault: {}", fault);
                row.body = RowBody::Fault(fault);
                return;
            }
        }
    }

    row.body = RowBody::Cells(cells);
}

/// Run a column's render function, turning both errors and panics into a
/// message.
fn render_cell<T>(col: &ColumnDef<T>, item: &T, index: usize) -> Result<String, String> {
    match panic::catch_unwind(AssertUnwindSafe(|| col.render(item, index))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => Err(extract_panic_message(&payload)),
    }
}
