//! Virtualized table engine.
//!
//! Renders only the rows inside the viewport, keeps header and rows on one
//! shared column layout, and tracks selection by key independently of which
//! rows are materialized.

pub mod column;
pub mod config;
pub mod display;
pub mod error;
pub mod frame;
pub mod layout;
pub mod row;
pub mod scroll;
pub mod selection;
pub mod table;
pub mod text;
pub mod window;

pub use column::{Alignment, ColumnDef};
pub use config::TableConfig;
pub use display::DisplayState;
pub use error::{CellError, ConfigError, RenderFault};
pub use frame::{Body, Frame, Header, HeaderCell, Line, LineKind, SortDirection, SortState};
pub use layout::{Layout, ResolvedColumn, compute_layout};
pub use row::{RowBody, RowVisual};
pub use scroll::{ScrollRequest, ScrollState};
pub use selection::{AggregateState, SelectionDelta, SelectionModel, SelectionSnapshot};
pub use table::VirtualizedTable;
pub use window::{VisibleRange, compute_visible_range, with_overscan};
