//! Virtualized table: ties window, layout, rows and selection together.
//!
//! The table only materializes rows in the visible range, so render cost
//! follows the viewport rather than the dataset. The dataset is borrowed per
//! call and never mutated; the selection is the only state that persists
//! between renders.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use log::{debug, trace};

use crate::column::ColumnDef;
use crate::config::{SELECTION_GUTTER, TableConfig};
use crate::display::DisplayState;
use crate::error::ConfigError;
use crate::frame::{Body, Frame, Header, HeaderCell, SortDirection, SortState};
use crate::layout::{Layout, resolve_layout, validate_columns};
use crate::row::{RowContext, render_row, render_row_into};
use crate::scroll::{ScrollRequest, ScrollState};
use crate::selection::{AggregateState, SelectionDelta, SelectionModel};
use crate::text::fit;
use crate::window::{VisibleRange, compute_visible_range, with_overscan};

/// Derives a row's selection key from the item and its index.
pub type KeyFn<T, K> = Arc<dyn Fn(&T, usize) -> K + Send + Sync>;
/// Called with `(item, index)` when a row is clicked.
pub type ClickHandler<T> = Arc<dyn Fn(&T, usize) + Send + Sync>;
/// Called with `(item, index, selected)` when a row's selection changes.
pub type SelectHandler<T> = Arc<dyn Fn(&T, usize, bool) + Send + Sync>;
/// Called with the new sort state when the sort indicator changes.
pub type SortHandler = Arc<dyn Fn(Option<&SortState>) + Send + Sync>;

/// Selected-row count for one dataset, identified by its address and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SelectionTally {
    data: (usize, usize),
    present: usize,
}

fn data_id<T>(data: &[T]) -> (usize, usize) {
    (data.as_ptr() as usize, data.len())
}

/// A virtualized table over borrowed rows of type `T`, selected by key `K`.
///
/// Keys are expected to be unique within a dataset. The number of selected
/// rows is counted once per dataset and then kept up to date from each
/// selection change, so rendering stays proportional to the window. Call
/// [`data_changed`](Self::data_changed) after replacing rows in place without
/// changing the dataset's length.
///
/// # Example
///
/// ```ignore
/// let mut table = VirtualizedTable::new(
///     TableConfig::new(1).viewport_height(20),
///     columns,
///     80,
///     |e: &Employee, _| e.id,
/// )?
/// .on_select(|e, _, selected| log::info!("{} selected={}", e.name, selected));
///
/// table.apply_scroll(ScrollRequest::PageDown, employees.len());
/// let frame = table.render(&employees, false);
/// ```
pub struct VirtualizedTable<T, K> {
    config: TableConfig,
    columns: Vec<ColumnDef<T>>,
    layout: Layout,
    total_width: u16,
    scroll: ScrollState,
    selection: SelectionModel<K>,
    sort: Option<SortState>,
    tally: Option<SelectionTally>,
    key_fn: KeyFn<T, K>,
    on_click: Option<ClickHandler<T>>,
    on_select: Option<SelectHandler<T>>,
    on_sort: Option<SortHandler>,
}

impl<T> VirtualizedTable<T, usize> {
    /// Create a table that identifies rows by position.
    ///
    /// Positional keys follow the position, not the item: if the dataset is
    /// reordered between renders, selection stays on the same indices.
    pub fn positional(
        config: TableConfig,
        columns: Vec<ColumnDef<T>>,
        total_width: u16,
    ) -> Result<Self, ConfigError> {
        Self::new(config, columns, total_width, |_: &T, index| index)
    }
}

impl<T, K: Clone + Eq + Hash> VirtualizedTable<T, K> {
    /// Create a table.
    ///
    /// Fails if the row height is zero or two columns share a key.
    pub fn new<F>(
        config: TableConfig,
        columns: Vec<ColumnDef<T>>,
        total_width: u16,
        key_fn: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&T, usize) -> K + Send + Sync + 'static,
    {
        config.validate()?;
        validate_columns(&columns)?;

        let scroll = ScrollState::new(config.item_height, config.viewport_height);
        let mut table = Self {
            config,
            columns,
            layout: Layout::default(),
            total_width,
            scroll,
            selection: SelectionModel::new(),
            sort: None,
            tally: None,
            key_fn: Arc::new(key_fn),
            on_click: None,
            on_select: None,
            on_sort: None,
        };
        table.relayout();
        Ok(table)
    }

    /// Start with an existing selection.
    pub fn with_selection(mut self, selection: SelectionModel<K>) -> Self {
        self.selection = selection;
        self.tally = None;
        self
    }

    /// Set the click callback.
    pub fn on_click(mut self, handler: impl Fn(&T, usize) + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(handler));
        self
    }

    /// Set the selection callback. Rows get a selection control once this is set.
    pub fn on_select(mut self, handler: impl Fn(&T, usize, bool) + Send + Sync + 'static) -> Self {
        self.on_select = Some(Arc::new(handler));
        self.relayout();
        self
    }

    /// Set the sort callback.
    pub fn on_sort(mut self, handler: impl Fn(Option<&SortState>) + Send + Sync + 'static) -> Self {
        self.on_sort = Some(Arc::new(handler));
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn selection(&self) -> &SelectionModel<K> {
        &self.selection
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Whether rows carry a selection control.
    pub fn is_selectable(&self) -> bool {
        self.on_select.is_some()
    }

    /// Selection key of the row at `index`.
    pub fn key_of(&self, item: &T, index: usize) -> K {
        (self.key_fn)(item, index)
    }

    fn keys<'a>(&'a self, data: &'a [T]) -> impl Iterator<Item = K> + 'a {
        data.iter()
            .enumerate()
            .map(move |(index, item)| (self.key_fn)(item, index))
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    fn relayout(&mut self) {
        let width = if self.is_selectable() {
            self.total_width.saturating_sub(SELECTION_GUTTER)
        } else {
            self.total_width
        };
        self.layout = resolve_layout(&self.columns, width);
    }

    /// Replace the column definitions.
    pub fn set_columns(&mut self, columns: Vec<ColumnDef<T>>) -> Result<(), ConfigError> {
        validate_columns(&columns)?;
        self.columns = columns;
        if let Some(sort) = &self.sort
            && !self.columns.iter().any(|c| c.key == sort.key && c.sortable)
        {
            debug!("Dropping sort on removed column '{}'", sort.key);
            self.sort = None;
        }
        self.relayout();
        Ok(())
    }

    /// Host resize event.
    ///
    /// The layout is recomputed only when the width changes.
    pub fn resize(&mut self, viewport_height: u32, total_width: u16) {
        self.scroll.set_viewport(viewport_height);
        if total_width != self.total_width {
            self.total_width = total_width;
            self.relayout();
        }
    }

    // -------------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------------

    /// The range to materialize for `item_count` rows at the current scroll
    /// position, overscan included.
    pub fn visible_range(&self, item_count: usize) -> VisibleRange {
        let range = compute_visible_range(
            self.scroll.offset,
            self.scroll.viewport,
            self.config.item_height,
            item_count,
        );
        with_overscan(range, self.config.overscan, item_count)
    }

    /// Apply a scroll event and return the new visible range.
    pub fn apply_scroll(&mut self, request: ScrollRequest, item_count: usize) -> VisibleRange {
        self.scroll.set_item_count(item_count);
        self.scroll.apply(request);
        let range = self.visible_range(item_count);
        trace!(
            "Scroll {:?} -> offset {} range {}..{}",
            request, self.scroll.offset, range.start, range.end
        );
        range
    }

    /// Scroll to an absolute offset.
    pub fn scroll_to(&mut self, offset: u32, item_count: usize) -> VisibleRange {
        self.apply_scroll(ScrollRequest::ToOffset(offset), item_count)
    }

    /// Scroll by a relative amount.
    pub fn scroll_by(&mut self, delta: i64, item_count: usize) -> VisibleRange {
        self.apply_scroll(ScrollRequest::Delta(delta), item_count)
    }

    /// Scroll just enough to show the row at `index`.
    pub fn scroll_into_view(&mut self, index: usize, item_count: usize) -> VisibleRange {
        self.apply_scroll(ScrollRequest::IntoView(index), item_count)
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Display state for the given inputs.
    pub fn display_state(&self, data: &[T], loading: bool) -> DisplayState {
        DisplayState::of(loading, data.len())
    }

    /// Render a fresh frame.
    pub fn render(&mut self, data: &[T], loading: bool) -> Frame<K> {
        let mut frame = Frame::default();
        self.render_into(data, loading, &mut frame);
        frame
    }

    /// Render into an existing frame, reusing its row storage.
    ///
    /// The frame never holds more rows than the visible range.
    pub fn render_into(&mut self, data: &[T], loading: bool, frame: &mut Frame<K>) {
        let state = DisplayState::of(loading, data.len());
        self.scroll.set_item_count(data.len());

        let mut rows = frame.take_rows();

        frame.state = state;
        frame.widths = self.layout.widths();
        frame.scroll_offset = self.scroll.offset;
        frame.viewport_height = self.scroll.viewport;
        frame.item_height = self.config.item_height;
        frame.selectable = self.is_selectable();
        let select_all = if self.is_selectable() && self.config.show_header {
            Some(if state.is_populated() {
                self.select_all_state(data)
            } else {
                AggregateState::None
            })
        } else {
            None
        };
        frame.header = self
            .config
            .show_header
            .then(|| self.build_header(select_all));

        frame.body = match state {
            DisplayState::Loading => Body::Skeleton(self.config.skeleton_rows),
            DisplayState::Empty => Body::Message(self.config.empty_message.clone()),
            DisplayState::Populated => {
                let range = self.visible_range(data.len());
                trace!("Rendering rows {}..{} of {}", range.start, range.end, data.len());

                let cx = RowContext {
                    columns: &self.columns,
                    layout: &self.layout,
                    item_height: self.config.item_height,
                };
                let selectable = self.is_selectable();

                let mut used = 0;
                for index in range.iter() {
                    let item = &data[index];
                    let key = (self.key_fn)(item, index);
                    let selected = selectable.then(|| self.selection.is_selected(&key));
                    match rows.get_mut(used) {
                        Some(slot) => render_row_into(&cx, slot, item, index, key, selected),
                        None => rows.push(render_row(&cx, item, index, key, selected)),
                    }
                    used += 1;
                }
                rows.truncate(used);

                Body::Rows { range, rows }
            }
        };
    }

    fn build_header(&self, select_all: Option<AggregateState>) -> Header {
        let cells = self
            .columns
            .iter()
            .zip(self.layout.columns())
            .map(|(col, resolved)| {
                let sort = self
                    .sort
                    .as_ref()
                    .filter(|s| s.key == col.key)
                    .map(|s| s.direction);
                let label = match sort {
                    Some(direction) => format!("{} {}", col.header, direction.indicator()),
                    None => col.header.clone(),
                };
                HeaderCell {
                    key: col.key.clone(),
                    label: fit(&label, resolved.width as usize, resolved.align),
                    width: resolved.width,
                    sortable: col.sortable,
                    sort,
                }
            })
            .collect();

        Header { cells, select_all }
    }

    /// Bring an already rendered frame up to date after a selection change.
    ///
    /// Only selection indicators are touched; no column render function runs.
    /// Returns the dataset indices of rows whose indicator changed.
    pub fn refresh_selection(&mut self, frame: &mut Frame<K>, data: &[T]) -> Vec<usize> {
        let changed = frame.sync_selection(&self.selection);
        if frame.state.is_populated() {
            frame.set_select_all(self.select_all_state(data));
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Selection counts
    // -------------------------------------------------------------------------

    /// Forget the selected-row count. Needed only when rows of the dataset
    /// were replaced without changing its length or address.
    pub fn data_changed(&mut self) {
        self.tally = None;
    }

    /// Number of rows in `data` whose key is selected.
    ///
    /// Counts the whole dataset the first time it is seen, then answers from
    /// the tally.
    fn present_count(&mut self, data: &[T]) -> usize {
        let id = data_id(data);
        if let Some(tally) = self.tally
            && tally.data == id
        {
            return tally.present;
        }

        let present = if self.selection.is_empty() {
            0
        } else {
            self.keys(data)
                .filter(|key| self.selection.is_selected(key))
                .count()
        };
        debug!("Counted {} selected rows of {}", present, data.len());
        self.tally = Some(SelectionTally { data: id, present });
        present
    }

    /// Apply a delta produced by rows of `data` to the tally.
    fn track(&mut self, data: &[T], delta: &SelectionDelta<K>) {
        if let Some(tally) = &mut self.tally
            && tally.data == data_id(data)
        {
            tally.present = (tally.present + delta.added.len()).saturating_sub(delta.removed.len());
        }
    }

    /// State of the "select all" control for `data`, from the tally.
    pub fn select_all_state(&mut self, data: &[T]) -> AggregateState {
        let present = self.present_count(data);
        AggregateState::from_counts(present, data.len())
    }

    /// Number of selected keys that match no row in `data`, from the tally.
    pub fn stale_count(&mut self, data: &[T]) -> usize {
        let present = self.present_count(data);
        self.selection.len().saturating_sub(present)
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Fire the click callback for the row at `index`. Returns false if the
    /// index is out of range.
    pub fn click_row(&self, data: &[T], index: usize) -> bool {
        let Some(item) = data.get(index) else {
            return false;
        };
        if let Some(handler) = &self.on_click {
            handler(item, index);
        }
        true
    }

    fn notify(&self, item: &T, index: usize, selected: bool) {
        if let Some(handler) = &self.on_select {
            handler(item, index, selected);
        }
    }

    /// Flip selection of the row at `index`.
    pub fn toggle_row(&mut self, data: &[T], index: usize) -> SelectionDelta<K> {
        let Some(item) = data.get(index) else {
            return SelectionDelta::default();
        };
        let key = (self.key_fn)(item, index);
        let delta = self.selection.toggle(key.clone());
        self.track(data, &delta);
        self.notify(item, index, self.selection.is_selected(&key));
        delta
    }

    /// Set selection of the row at `index`. No-op (and no callback) if the row
    /// is already in that state.
    pub fn set_row_selected(&mut self, data: &[T], index: usize, selected: bool) -> SelectionDelta<K> {
        let Some(item) = data.get(index) else {
            return SelectionDelta::default();
        };
        let key = (self.key_fn)(item, index);
        let delta = self.selection.set(key, selected);
        if !delta.is_empty() {
            self.track(data, &delta);
            self.notify(item, index, selected);
        }
        delta
    }

    /// The "select all" control: select every row in the whole dataset, or
    /// deselect them all if every row is already selected.
    pub fn toggle_all(&mut self, data: &[T]) -> SelectionDelta<K> {
        let target = self.select_all_state(data) != AggregateState::All;
        let mut delta = SelectionDelta::default();

        for (index, item) in data.iter().enumerate() {
            let key = (self.key_fn)(item, index);
            let change = self.selection.set(key, target);
            if !change.is_empty() {
                self.notify(item, index, target);
                delta.added.extend(change.added);
                delta.removed.extend(change.removed);
            }
        }

        self.tally = Some(SelectionTally {
            data: data_id(data),
            present: if target { data.len() } else { 0 },
        });

        debug!(
            "toggle_all over {} rows: +{} -{}",
            data.len(),
            delta.added.len(),
            delta.removed.len()
        );
        delta
    }

    /// Remove every key from the selection, stale keys included.
    pub fn clear_selection(&mut self, data: &[T]) -> SelectionDelta<K> {
        let delta = self.selection.clear();
        self.tally = Some(SelectionTally {
            data: data_id(data),
            present: 0,
        });
        if self.on_select.is_some() && !delta.removed.is_empty() {
            let removed: HashSet<&K> = delta.removed.iter().collect();
            for (index, item) in data.iter().enumerate() {
                if removed.contains(&(self.key_fn)(item, index)) {
                    self.notify(item, index, false);
                }
            }
        }
        delta
    }

    /// Summary of the selection against the keys of `data`.
    ///
    /// Scans the whole dataset; [`select_all_state`](Self::select_all_state)
    /// answers the same question from the tally.
    pub fn aggregate_state(&self, data: &[T]) -> AggregateState {
        if self.selection.is_empty() {
            return AggregateState::None;
        }
        let keys: Vec<K> = self.keys(data).collect();
        self.selection.aggregate_state(&keys)
    }

    /// Selected keys that no longer match any row in `data`.
    pub fn stale_selection(&self, data: &[T]) -> Vec<K> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        let keys: Vec<K> = self.keys(data).collect();
        self.selection.stale(&keys)
    }

    /// Drop selected keys that no longer match any row in `data`.
    pub fn reconcile_selection(&mut self, data: &[T]) -> SelectionDelta<K> {
        if self.selection.is_empty() {
            return SelectionDelta::default();
        }
        let keys: Vec<K> = self.keys(data).collect();
        self.selection.reconcile(&keys)
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Cycle the sort indicator on a sortable column: ascending, descending,
    /// then off. Selecting another column starts it at ascending.
    ///
    /// The table does not reorder data; the sort callback tells the data
    /// source what order to supply.
    pub fn toggle_sort(&mut self, key: &str) -> Result<Option<&SortState>, ConfigError> {
        let column = self
            .columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| ConfigError::UnknownColumn(key.to_string()))?;
        if !column.sortable {
            return Err(ConfigError::NotSortable(key.to_string()));
        }

        self.sort = match self.sort.take() {
            Some(SortState {
                key: current,
                direction: SortDirection::Ascending,
            }) if current == key => Some(SortState {
                key: current,
                direction: SortDirection::Descending,
            }),
            Some(SortState {
                key: current,
                direction: SortDirection::Descending,
            }) if current == key => None,
            _ => Some(SortState {
                key: key.to_string(),
                direction: SortDirection::Ascending,
            }),
        };

        debug!("Sort is now {:?}", self.sort);
        if let Some(handler) = &self.on_sort {
            handler(self.sort.as_ref());
        }
        Ok(self.sort.as_ref())
    }
}
