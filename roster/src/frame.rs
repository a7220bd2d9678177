//! The composited output of one render pass.

use std::hash::Hash;

use crate::column::Alignment;
use crate::display::DisplayState;
use crate::error::RenderFault;
use crate::row::{RowBody, RowVisual};
use crate::selection::{AggregateState, SelectionModel};
use crate::text::{display_width, fit};
use crate::window::VisibleRange;

/// Sort direction shown in a sortable column's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn indicator(self) -> char {
        match self {
            SortDirection::Ascending => '▲',
            SortDirection::Descending => '▼',
        }
    }
}

/// The column currently carrying a sort indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

/// One header cell, already fitted to its column width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub width: u16,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
}

/// Header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub cells: Vec<HeaderCell>,
    /// State of the "select all" control, present when rows are selectable.
    pub select_all: Option<AggregateState>,
}

impl Header {
    pub fn widths(&self) -> Vec<u16> {
        self.cells.iter().map(|c| c.width).collect()
    }
}

/// Body content for the current display state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body<K> {
    /// Placeholder rows while loading.
    Skeleton(usize),
    /// Static message when there are no rows.
    Message(String),
    /// Materialized rows of the visible range, in index order.
    Rows {
        range: VisibleRange,
        rows: Vec<RowVisual<K>>,
    },
}

/// Kind of a composed output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Row { index: usize, selected: Option<bool> },
    Fault { index: usize },
    Skeleton,
    Message,
}

/// One composed line of the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

/// Everything a host needs to paint the table once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<K> {
    pub state: DisplayState,
    pub header: Option<Header>,
    pub body: Body<K>,
    /// Column widths used for the body; identical to the header's.
    pub widths: Vec<u16>,
    pub scroll_offset: u32,
    pub viewport_height: u32,
    pub item_height: u32,
    /// Whether rows carry a selection control.
    pub selectable: bool,
}

impl<K> Default for Frame<K> {
    fn default() -> Self {
        Self {
            state: DisplayState::Empty,
            header: None,
            body: Body::Message(String::new()),
            widths: Vec::new(),
            scroll_offset: 0,
            viewport_height: 0,
            item_height: 1,
            selectable: false,
        }
    }
}

const CHECKED: &str = "[x] ";
const UNCHECKED: &str = "[ ] ";
const PARTIAL: &str = "[-] ";
const NO_GUTTER: &str = "    ";

impl<K> Frame<K> {
    /// Materialized rows (empty unless populated).
    pub fn rows(&self) -> &[RowVisual<K>] {
        match &self.body {
            Body::Rows { rows, .. } => rows,
            _ => &[],
        }
    }

    /// The materialized range (empty unless populated).
    pub fn range(&self) -> VisibleRange {
        match &self.body {
            Body::Rows { range, .. } => *range,
            _ => VisibleRange::empty(),
        }
    }

    /// Rows that failed to render in this frame.
    pub fn faults(&self) -> impl Iterator<Item = &RenderFault> {
        self.rows().iter().filter_map(RowVisual::fault)
    }

    /// Take the row storage for reuse, leaving the body empty.
    pub(crate) fn take_rows(&mut self) -> Vec<RowVisual<K>> {
        match std::mem::replace(&mut self.body, Body::Message(String::new())) {
            Body::Rows { rows, .. } => rows,
            _ => Vec::new(),
        }
    }

    fn content_width(&self) -> usize {
        self.widths.iter().map(|w| *w as usize).sum()
    }

    fn gutter(&self, state: Option<bool>) -> &'static str {
        match state {
            Some(true) => CHECKED,
            Some(false) => UNCHECKED,
            None if self.selectable => NO_GUTTER,
            None => "",
        }
    }

    /// Compose the frame into lines: the header (if any) followed by at most
    /// `viewport_height` body lines, clipped to the scroll offset.
    pub fn lines(&self) -> Vec<Line> {
        let mut out = Vec::new();
        let width = self.content_width();

        if let Some(header) = &self.header {
            let gutter = match header.select_all {
                Some(AggregateState::All) => CHECKED,
                Some(AggregateState::Some) => PARTIAL,
                Some(AggregateState::None) => UNCHECKED,
                None => self.gutter(None),
            };
            let mut text = String::from(gutter);
            for cell in &header.cells {
                text.push_str(&cell.label);
            }
            out.push(Line {
                kind: LineKind::Header,
                text,
            });
        }

        let max_lines = self.viewport_height as usize;
        let item_height = self.item_height.max(1) as usize;
        let blank = || " ".repeat(self.gutter(None).len() + width);

        match &self.body {
            Body::Skeleton(count) => {
                'skeleton: for _ in 0..*count {
                    let mut text = String::from(self.gutter(None));
                    for w in &self.widths {
                        let w = *w as usize;
                        text.push_str(&"░".repeat(w.saturating_sub(1)));
                        if w > 0 {
                            text.push(' ');
                        }
                    }
                    for line in 0..item_height {
                        if out.len() >= max_lines + usize::from(self.header.is_some()) {
                            break 'skeleton;
                        }
                        out.push(Line {
                            kind: LineKind::Skeleton,
                            text: if line == 0 { text.clone() } else { blank() },
                        });
                    }
                }
            }
            Body::Message(message) => {
                if max_lines > 0 {
                    let text = format!(
                        "{}{}",
                        self.gutter(None),
                        fit(message, width.max(display_width(message)), Alignment::Center)
                    );
                    out.push(Line {
                        kind: LineKind::Message,
                        text,
                    });
                }
            }
            Body::Rows { rows, .. } => {
                let top = u64::from(self.scroll_offset);
                let bottom = top + max_lines as u64;
                for row in rows {
                    let (kind, first) = match &row.body {
                        RowBody::Cells(cells) => {
                            let mut text = String::from(self.gutter(row.selected));
                            for cell in cells {
                                text.push_str(cell);
                            }
                            (
                                LineKind::Row {
                                    index: row.index,
                                    selected: row.selected,
                                },
                                text,
                            )
                        }
                        RowBody::Fault(fault) => {
                            let message = format!("⚠ {}", fault.message);
                            let text = format!(
                                "{}{}",
                                self.gutter(row.selected),
                                fit(&message, width, Alignment::Left)
                            );
                            (LineKind::Fault { index: row.index }, text)
                        }
                    };

                    for line in 0..item_height as u64 {
                        let y = row.top + line;
                        if y < top || y >= bottom {
                            continue;
                        }
                        out.push(Line {
                            kind,
                            text: if line == 0 { first.clone() } else { blank() },
                        });
                    }
                }
            }
        }

        out
    }
}

impl<K: Eq + Hash> Frame<K> {
    /// Bring the selection indicators of materialized rows in line with
    /// `selection`, without re-rendering any cell.
    ///
    /// Returns the dataset indices of rows whose indicator changed.
    pub fn sync_selection(&mut self, selection: &SelectionModel<K>) -> Vec<usize> {
        let mut changed = Vec::new();
        if let Body::Rows { rows, .. } = &mut self.body {
            for row in rows.iter_mut() {
                if let Some(current) = row.selected {
                    let now = selection.is_selected(&row.key);
                    if now != current {
                        row.selected = Some(now);
                        changed.push(row.index);
                    }
                }
            }
        }
        changed
    }

    /// Update the header's "select all" control.
    pub fn set_select_all(&mut self, state: AggregateState) {
        if let Some(header) = &mut self.header
            && header.select_all.is_some()
        {
            header.select_all = Some(state);
        }
    }
}
