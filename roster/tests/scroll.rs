use roster::{ScrollRequest, ScrollState};

fn state() -> ScrollState {
    let mut scroll = ScrollState::new(2, 10);
    scroll.set_item_count(100);
    scroll
}

#[test]
fn test_content_height_from_items() {
    let scroll = state();
    assert_eq!(scroll.content_height, 200);
    assert_eq!(scroll.max_offset(), 190);
    assert!(scroll.can_scroll());
}

#[test]
fn test_delta_clamps() {
    let mut scroll = state();
    assert!(!scroll.apply(ScrollRequest::Delta(-5)));
    assert_eq!(scroll.offset, 0);
    assert!(scroll.apply(ScrollRequest::Delta(1000)));
    assert_eq!(scroll.offset, 190);
}

#[test]
fn test_paging_and_ends() {
    let mut scroll = state();
    scroll.apply(ScrollRequest::PageDown);
    assert_eq!(scroll.offset, 10);
    scroll.apply(ScrollRequest::End);
    assert_eq!(scroll.offset, 190);
    scroll.apply(ScrollRequest::PageUp);
    assert_eq!(scroll.offset, 180);
    scroll.apply(ScrollRequest::Home);
    assert_eq!(scroll.offset, 0);
}

#[test]
fn test_into_view_moves_minimum_amount() {
    let mut scroll = state();
    // Row 10 occupies 20..22; viewport 0..10 must move so its bottom is visible.
    scroll.apply(ScrollRequest::IntoView(10));
    assert_eq!(scroll.offset, 12);
    // Already visible: no change.
    assert!(!scroll.apply(ScrollRequest::IntoView(8)));
    // Above the viewport: align to its top.
    scroll.apply(ScrollRequest::IntoView(2));
    assert_eq!(scroll.offset, 4);
}

#[test]
fn test_shrinking_content_clamps_offset() {
    let mut scroll = state();
    scroll.apply(ScrollRequest::End);
    scroll.set_item_count(10);
    assert_eq!(scroll.offset, 10);
    scroll.set_item_count(0);
    assert_eq!(scroll.offset, 0);
}

#[test]
fn test_growing_viewport_clamps_offset() {
    let mut scroll = state();
    scroll.apply(ScrollRequest::End);
    scroll.set_viewport(150);
    assert_eq!(scroll.offset, 50);
}

#[test]
fn test_thumb() {
    let mut scroll = state();
    assert_eq!(scroll.thumb(20), Some((0, 1)));
    scroll.apply(ScrollRequest::End);
    assert_eq!(scroll.thumb(20), Some((19, 1)));

    let mut small = ScrollState::new(1, 10);
    small.set_item_count(5);
    assert_eq!(small.thumb(20), None);
}
