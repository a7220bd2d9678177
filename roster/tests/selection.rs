use roster::{AggregateState, Frame, SelectionModel};

fn ids(n: u32) -> Vec<u32> {
    (0..n).collect()
}

#[test]
fn test_toggle_twice_restores() {
    let mut selection = SelectionModel::new();
    for id in [0u32, 7, 42] {
        let before = selection.is_selected(&id);
        selection.toggle(id);
        assert_ne!(selection.is_selected(&id), before);
        selection.toggle(id);
        assert_eq!(selection.is_selected(&id), before);
    }

    let mut selection = SelectionModel::with_selected([5u32]);
    selection.toggle(5);
    selection.toggle(5);
    assert!(selection.is_selected(&5));
}

#[test]
fn test_toggle_reports_delta() {
    let mut selection = SelectionModel::new();
    let delta = selection.toggle("a");
    assert_eq!(delta.added, vec!["a"]);
    assert!(delta.removed.is_empty());

    let delta = selection.toggle("a");
    assert!(delta.added.is_empty());
    assert_eq!(delta.removed, vec!["a"]);
}

#[test]
fn test_set_same_state_is_noop() {
    let mut selection = SelectionModel::new();
    assert_eq!(selection.set(1u32, true).len(), 1);
    let replay = selection.set(1, true);
    assert!(replay.is_empty());
    assert!(selection.is_selected(&1));

    assert!(selection.set(2, false).is_empty());
    assert!(!selection.is_selected(&2));
}

#[test]
fn test_select_all_then_clear() {
    let all = ids(1000);
    let mut selection = SelectionModel::new();

    selection.select_all(all.iter().copied());
    assert_eq!(selection.aggregate_state(&all), AggregateState::All);
    assert_eq!(selection.len(), 1000);

    let delta = selection.clear();
    assert_eq!(delta.removed.len(), 1000);
    assert_eq!(selection.aggregate_state(&all), AggregateState::None);
    assert!(selection.is_empty());
}

#[test]
fn test_select_all_reports_only_new_keys() {
    let mut selection = SelectionModel::with_selected([1u32, 2]);
    let delta = selection.select_all([1, 2, 3, 4]);
    let mut added = delta.added.clone();
    added.sort();
    assert_eq!(added, vec![3, 4]);
}

#[test]
fn test_select_all_then_deselect_one_is_some() {
    let all = ids(1000);
    let mut selection = SelectionModel::new();
    selection.select_all(all.iter().copied());
    selection.toggle(500);
    assert_eq!(selection.aggregate_state(&all), AggregateState::Some);
}

#[test]
fn test_aggregate_empty_ids_is_none() {
    let selection = SelectionModel::with_selected([1u32]);
    assert_eq!(selection.aggregate_state(&[]), AggregateState::None);
}

#[test]
fn test_aggregate_ignores_stale_keys() {
    // Two keys selected, two rows present, but only one of the rows is selected.
    let selection = SelectionModel::with_selected([1u32, 99]);
    assert_eq!(selection.aggregate_state(&[1, 2]), AggregateState::Some);

    let selection = SelectionModel::with_selected([1u32, 2, 99]);
    assert_eq!(selection.aggregate_state(&[1, 2]), AggregateState::All);
}

#[test]
fn test_stale_keys_retained_until_reconciled() {
    let mut selection = SelectionModel::with_selected([1u32, 3]);
    let current = [1u32, 2];

    assert_eq!(selection.stale(&current), vec![3]);
    assert!(selection.is_selected(&3));

    let delta = selection.reconcile(&current);
    assert_eq!(delta.removed, vec![3]);
    assert!(!selection.is_selected(&3));
    assert!(selection.is_selected(&1));
    assert!(selection.stale(&current).is_empty());
}

#[test]
fn test_deselect_all_keeps_other_keys() {
    let mut selection = SelectionModel::with_selected([1u32, 2, 99]);
    let delta = selection.deselect_all([1, 2]);
    assert_eq!(delta.removed.len(), 2);
    assert!(selection.is_selected(&99));
}

#[test]
fn test_snapshot_does_not_observe_later_mutation() {
    let mut selection = SelectionModel::new();
    selection.toggle(1u32);
    let snapshot = selection.snapshot();

    selection.toggle(2);
    selection.toggle(1);

    assert!(snapshot.is_selected(&1));
    assert!(!snapshot.is_selected(&2));
    assert_eq!(snapshot.len(), 1);
    assert!(!selection.is_selected(&1));
    assert!(selection.is_selected(&2));
}

#[test]
fn test_delta_changes() {
    let mut selection = SelectionModel::with_selected([1u32]);
    let mut delta = selection.toggle(2);
    delta.removed.extend(selection.toggle(1).removed);

    assert!(delta.contains(&1));
    assert!(delta.contains(&2));
    assert!(!delta.contains(&3));
    let changes: Vec<_> = delta.changes().collect();
    assert_eq!(changes, vec![(&2, true), (&1, false)]);
}

/// Keys only need `Eq + Hash` to be read back.
#[derive(Debug, PartialEq, Eq, Hash)]
struct Badge(u16);

#[test]
fn test_read_access_without_clone_keys() {
    let selection = SelectionModel::with_selected([Badge(1), Badge(2)]);
    assert!(selection.is_selected(&Badge(1)));
    assert!(!selection.is_selected(&Badge(3)));
    assert_eq!(selection.len(), 2);
    assert!(selection.snapshot().is_selected(&Badge(2)));

    let mut frame: Frame<Badge> = Frame::default();
    assert!(frame.sync_selection(&selection).is_empty());
}

#[test]
fn test_aggregate_from_counts() {
    assert_eq!(AggregateState::from_counts(0, 0), AggregateState::None);
    assert_eq!(AggregateState::from_counts(0, 10), AggregateState::None);
    assert_eq!(AggregateState::from_counts(3, 10), AggregateState::Some);
    assert_eq!(AggregateState::from_counts(10, 10), AggregateState::All);
}
