//! Visible window calculation for fixed-height rows.

use std::ops::Range;

/// Half-open range `[start, end)` of dataset indices to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn iter(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<VisibleRange> for Range<usize> {
    fn from(range: VisibleRange) -> Self {
        range.start..range.end
    }
}

/// Compute the rows covered by a viewport.
///
/// `start` is the row containing the top edge of the viewport and `end` is
/// one past the row containing its bottom edge, both clamped to
/// `[0, item_count]`. At a row-aligned offset the range holds exactly
/// `ceil(viewport_height / item_height)` rows; otherwise it also holds the
/// partially visible trailing row.
///
/// An offset past the end of the content yields an empty range at
/// `item_count`. A zero `item_height` yields an empty range; tables reject
/// that configuration before it gets here.
pub fn compute_visible_range(
    scroll_offset: u32,
    viewport_height: u32,
    item_height: u32,
    item_count: usize,
) -> VisibleRange {
    if item_count == 0 || item_height == 0 {
        return VisibleRange::empty();
    }

    let h = u64::from(item_height);
    let top = u64::from(scroll_offset);
    let bottom = top + u64::from(viewport_height);
    let n = item_count as u64;

    let start = (top / h).min(n);
    let end = bottom.div_ceil(h).clamp(start, n);

    VisibleRange::new(start as usize, end as usize)
}

/// Widen a range by `overscan` rows on each side, clamped to the dataset.
pub fn with_overscan(range: VisibleRange, overscan: usize, item_count: usize) -> VisibleRange {
    if overscan == 0 || item_count == 0 {
        return range;
    }
    let start = range.start.saturating_sub(overscan).min(item_count);
    let end = range.end.saturating_add(overscan).min(item_count);
    VisibleRange::new(start, end)
}
