//! Vertical scroll state for the table body.
//!
//! Offsets and heights are in the same unit as the row height (terminal rows
//! for a terminal host, pixels for a graphical one).

/// A scroll action reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRequest {
    /// Scroll by a relative amount (positive = down).
    Delta(i64),
    /// Scroll to an absolute offset.
    ToOffset(u32),
    /// Scroll the minimum amount that makes the row at this index fully visible.
    IntoView(usize),
    /// Scroll up by one viewport.
    PageUp,
    /// Scroll down by one viewport.
    PageDown,
    /// Scroll to the top.
    Home,
    /// Scroll to the bottom.
    End,
}

/// Scroll offset, viewport and content size for fixed-height rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Current offset from the top of the content.
    pub offset: u32,
    /// Height of the visible body area.
    pub viewport: u32,
    /// Total content height (`item_count * item_height`, saturated).
    pub content_height: u32,
    item_height: u32,
}

impl ScrollState {
    pub fn new(item_height: u32, viewport: u32) -> Self {
        Self {
            offset: 0,
            viewport,
            content_height: 0,
            item_height,
        }
    }

    pub fn item_height(&self) -> u32 {
        self.item_height
    }

    /// Maximum scroll offset (`content_height - viewport`).
    pub fn max_offset(&self) -> u32 {
        self.content_height.saturating_sub(self.viewport)
    }

    /// Current scroll progress (0.0 = top, 1.0 = bottom).
    pub fn progress(&self) -> f32 {
        let max = self.max_offset();
        if max == 0 {
            0.0
        } else {
            self.offset as f32 / max as f32
        }
    }

    /// Whether content exceeds the viewport.
    pub fn can_scroll(&self) -> bool {
        self.content_height > self.viewport
    }

    /// Set the viewport height, clamping the offset.
    pub fn set_viewport(&mut self, height: u32) {
        self.viewport = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update content height from the row count, clamping the offset if the
    /// content shrank.
    pub fn set_item_count(&mut self, count: usize) {
        let height = (count as u64).saturating_mul(u64::from(self.item_height));
        self.content_height = u32::try_from(height).unwrap_or(u32::MAX);
        self.offset = self.offset.min(self.max_offset());
    }

    /// Apply a scroll request. Returns true if the offset changed.
    pub fn apply(&mut self, request: ScrollRequest) -> bool {
        let old = self.offset;
        let max = self.max_offset();

        self.offset = match request {
            ScrollRequest::Delta(d) => (i64::from(self.offset) + d).clamp(0, i64::from(max)) as u32,
            ScrollRequest::ToOffset(o) => o.min(max),
            ScrollRequest::IntoView(index) => self.offset_for_index(index).min(max),
            ScrollRequest::PageUp => self.offset.saturating_sub(self.viewport),
            ScrollRequest::PageDown => self.offset.saturating_add(self.viewport).min(max),
            ScrollRequest::Home => 0,
            ScrollRequest::End => max,
        };

        self.offset != old
    }

    fn offset_for_index(&self, index: usize) -> u32 {
        let h = u64::from(self.item_height);
        let top = (index as u64).saturating_mul(h);
        let bottom = top.saturating_add(h);
        let offset = u64::from(self.offset);
        let viewport = u64::from(self.viewport);

        let target = if top < offset {
            top
        } else if bottom > offset + viewport {
            bottom.saturating_sub(viewport)
        } else {
            offset
        };
        u32::try_from(target).unwrap_or(u32::MAX)
    }

    /// Scrollbar thumb position and length for a track of `track` cells.
    ///
    /// Returns `None` when the content fits in the viewport.
    pub fn thumb(&self, track: u16) -> Option<(u16, u16)> {
        if !self.can_scroll() || track == 0 {
            return None;
        }
        let track_f = f32::from(track);
        let len = ((self.viewport as f32 / self.content_height as f32) * track_f)
            .round()
            .clamp(1.0, track_f) as u16;
        let start = ((track - len) as f32 * self.progress()).round() as u16;
        Some((start, len))
    }
}
