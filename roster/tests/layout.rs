use roster::{Alignment, ColumnDef, ConfigError, compute_layout};

struct Row;

fn col(key: &str) -> ColumnDef<Row> {
    ColumnDef::new(key, key.to_uppercase(), |_: &Row, _| "")
}

#[test]
fn test_equal_distribution() {
    let layout = compute_layout(&[col("a"), col("b"), col("c")], 90).unwrap();
    assert_eq!(layout.widths(), vec![30, 30, 30]);
    assert_eq!(layout.content_width(), 90);
    assert_eq!(layout.total_width(), 90);
}

#[test]
fn test_explicit_width_and_min_width() {
    let columns = vec![col("a").width(10), col("b"), col("c").min_width(40)];
    let layout = compute_layout(&columns, 90).unwrap();
    assert_eq!(layout.widths(), vec![10, 30, 40]);
}

#[test]
fn test_min_width_below_share_is_ignored() {
    let layout = compute_layout(&[col("a").min_width(5), col("b")], 40).unwrap();
    assert_eq!(layout.widths(), vec![20, 20]);
}

#[test]
fn test_alignment_carried_through() {
    let columns = vec![col("a").align(Alignment::Right), col("b")];
    let layout = compute_layout(&columns, 20).unwrap();
    assert_eq!(layout.columns()[0].align, Alignment::Right);
    assert_eq!(layout.columns()[1].align, Alignment::Left);
    assert_eq!(layout.position("b"), Some(1));
    assert_eq!(layout.position("z"), None);
}

#[test]
fn test_duplicate_keys_rejected() {
    let result = compute_layout(&[col("a"), col("b"), col("a")], 90);
    assert_eq!(result, Err(ConfigError::DuplicateColumnKey("a".to_string())));
}

#[test]
fn test_no_columns() {
    let layout = compute_layout::<Row>(&[], 80).unwrap();
    assert!(layout.is_empty());
    assert_eq!(layout.content_width(), 0);
}

#[test]
fn test_layout_is_deterministic() {
    let columns = vec![col("a").width(7), col("b"), col("c").min_width(3)];
    let first = compute_layout(&columns, 61).unwrap();
    let second = compute_layout(&columns, 61).unwrap();
    assert_eq!(first, second);
}
