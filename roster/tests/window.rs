use roster::{VisibleRange, compute_visible_range, with_overscan};

#[test]
fn test_range_at_top_is_exactly_one_viewport() {
    let range = compute_visible_range(0, 500, 50, 1000);
    assert_eq!(range, VisibleRange::new(0, 10));
    assert_eq!(range.len(), 10);
}

#[test]
fn test_range_size_does_not_depend_on_item_count() {
    for count in [20, 1_000, 100_000, 10_000_000] {
        let range = compute_visible_range(500, 500, 50, count);
        assert_eq!(range.len(), 10, "count {}", count);
    }
}

#[test]
fn test_range_empty_dataset() {
    assert!(compute_visible_range(0, 500, 50, 0).is_empty());
    assert!(compute_visible_range(1234, 500, 50, 0).is_empty());
}

#[test]
fn test_range_zero_item_height_is_empty() {
    assert!(compute_visible_range(0, 500, 0, 100).is_empty());
}

#[test]
fn test_range_unaligned_offset_includes_partial_row() {
    let range = compute_visible_range(25, 500, 50, 1000);
    assert_eq!(range, VisibleRange::new(0, 11));
}

#[test]
fn test_range_offset_past_end_is_empty_at_count() {
    let range = compute_visible_range(50_000, 500, 50, 1000);
    assert_eq!(range, VisibleRange::new(1000, 1000));
    assert!(range.is_empty());

    let range = compute_visible_range(u32::MAX, 500, 50, 1000);
    assert_eq!(range, VisibleRange::new(1000, 1000));
}

#[test]
fn test_range_clamps_at_end() {
    let range = compute_visible_range(49_800, 500, 50, 1000);
    assert_eq!(range, VisibleRange::new(996, 1000));
}

#[test]
fn test_range_is_pure() {
    let a = compute_visible_range(777, 333, 7, 5000);
    let b = compute_visible_range(777, 333, 7, 5000);
    assert_eq!(a, b);
}

#[test]
fn test_range_bounds_hold_over_input_grid() {
    for count in [0usize, 1, 7, 100, 1000] {
        for viewport in [1u32, 7, 50, 500, 999] {
            for item_height in [1u32, 3, 50] {
                for offset in [0u32, 1, 49, 50, 777, 100_000] {
                    let range = compute_visible_range(offset, viewport, item_height, count);
                    let limit = viewport.div_ceil(item_height) as usize + 1;
                    assert!(range.start <= range.end);
                    assert!(range.end <= count);
                    assert!(
                        range.len() <= limit,
                        "offset {} viewport {} height {} count {} -> {:?}",
                        offset,
                        viewport,
                        item_height,
                        count,
                        range
                    );
                }
            }
        }
    }
}

#[test]
fn test_overscan_widens_both_sides() {
    let range = with_overscan(VisibleRange::new(10, 20), 3, 1000);
    assert_eq!(range, VisibleRange::new(7, 23));
}

#[test]
fn test_overscan_clamps_to_dataset() {
    let range = with_overscan(VisibleRange::new(0, 10), 3, 12);
    assert_eq!(range, VisibleRange::new(0, 12));
}

#[test]
fn test_overscan_zero_is_identity() {
    let range = VisibleRange::new(4, 9);
    assert_eq!(with_overscan(range, 0, 100), range);
}

#[test]
fn test_visible_range_helpers() {
    let range = VisibleRange::new(3, 6);
    assert!(range.contains(3));
    assert!(range.contains(5));
    assert!(!range.contains(6));
    assert_eq!(range.iter().collect::<Vec<_>>(), vec![3, 4, 5]);
    let std_range: std::ops::Range<usize> = range.into();
    assert_eq!(std_range, 3..6);
    assert_eq!(VisibleRange::new(5, 2), VisibleRange::new(5, 5));
}
