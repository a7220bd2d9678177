use roster::Alignment;
use roster::text::{display_width, fit, truncate_to_width};

#[test]
fn test_display_width_wide_chars() {
    assert_eq!(display_width("abc"), 3);
    assert_eq!(display_width("日本"), 4);
}

#[test]
fn test_truncate_short_text_unchanged() {
    assert_eq!(truncate_to_width("hi", 5), "hi");
}

#[test]
fn test_truncate_adds_ellipsis() {
    assert_eq!(truncate_to_width("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_width() {
    assert_eq!(truncate_to_width("hello", 0), "");
}

#[test]
fn test_fit_alignment() {
    assert_eq!(fit("ab", 5, Alignment::Left), "ab   ");
    assert_eq!(fit("ab", 5, Alignment::Right), "   ab");
    assert_eq!(fit("ab", 5, Alignment::Center), " ab  ");
}

#[test]
fn test_fit_wide_chars_truncated_to_width() {
    let fitted = fit("日本語", 5, Alignment::Left);
    assert_eq!(fitted, "日本…");
    assert_eq!(display_width(&fitted), 5);
}

#[test]
fn test_fit_uses_first_line_only() {
    assert_eq!(fit("a\nb", 3, Alignment::Left), "a  ");
}
