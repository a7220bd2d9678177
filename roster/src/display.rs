//! Which of loading / empty / populated the table shows.

/// Display state, derived from its inputs on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// Data is being fetched; a fixed skeleton is shown.
    Loading,
    /// Nothing to show; the empty message is shown.
    Empty,
    /// Rows are rendered through the visible window.
    Populated,
}

impl DisplayState {
    pub fn of(loading: bool, item_count: usize) -> Self {
        if loading {
            DisplayState::Loading
        } else if item_count == 0 {
            DisplayState::Empty
        } else {
            DisplayState::Populated
        }
    }

    pub fn is_populated(self) -> bool {
        self == DisplayState::Populated
    }
}
