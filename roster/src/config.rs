//! Table configuration.

use crate::error::ConfigError;

/// Width of the selection control drawn in front of each row (`"[x] "`).
pub const SELECTION_GUTTER: u16 = 4;

/// Fixed configuration for a [`VirtualizedTable`](crate::VirtualizedTable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Height of every row. Must be greater than zero.
    pub item_height: u32,
    /// Initial viewport height of the body (header excluded).
    pub viewport_height: u32,
    /// Extra rows rendered above and below the visible window.
    pub overscan: usize,
    /// Number of placeholder rows shown while loading.
    pub skeleton_rows: usize,
    /// Message shown when there are no rows.
    pub empty_message: String,
    /// Whether the header row is part of the frame.
    pub show_header: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            item_height: 1,
            viewport_height: 0,
            overscan: 0,
            skeleton_rows: 5,
            empty_message: "No data".to_string(),
            show_header: true,
        }
    }
}

impl TableConfig {
    /// Create a config with the given row height.
    pub fn new(item_height: u32) -> Self {
        Self {
            item_height,
            ..Default::default()
        }
    }

    pub fn viewport_height(mut self, height: u32) -> Self {
        self.viewport_height = height;
        self
    }

    pub fn overscan(mut self, rows: usize) -> Self {
        self.overscan = rows;
        self
    }

    pub fn skeleton_rows(mut self, rows: usize) -> Self {
        self.skeleton_rows = rows;
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn show_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    /// Check values that would make rendering impossible.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_height == 0 {
            return Err(ConfigError::InvalidItemHeight(self.item_height));
        }
        Ok(())
    }
}
