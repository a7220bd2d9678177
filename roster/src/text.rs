//! Display-width aware text fitting for table cells.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::column::Alignment;

/// Width of a string in terminal cells.
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Width of a single character in terminal cells.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Truncate a string so it fits in `max_width` cells, ending with `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }

    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width - 1;
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let w = char_width(ch);
        if width + w > target_width {
            break;
        }
        result.push(ch);
        width += w;
    }

    result.push('…');
    result
}

/// Fit text into exactly `width` cells: truncate if too long, pad according
/// to `align` if too short.
///
/// Only the first line of multi-line text is used.
pub fn fit(s: &str, width: usize, align: Alignment) -> String {
    let line = s.lines().next().unwrap_or("");
    let truncated = truncate_to_width(line, width);
    let slack = width.saturating_sub(display_width(&truncated));

    let (left, right) = match align {
        Alignment::Left => (0, slack),
        Alignment::Right => (slack, 0),
        Alignment::Center => (slack / 2, slack - slack / 2),
    };

    let mut out = String::with_capacity(truncated.len() + slack);
    out.extend(std::iter::repeat_n(' ', left));
    out.push_str(&truncated);
    out.extend(std::iter::repeat_n(' ', right));
    out
}
