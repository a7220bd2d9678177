use roster::DisplayState;

#[test]
fn test_loading_wins_over_data() {
    assert_eq!(DisplayState::of(true, 1000), DisplayState::Loading);
    assert_eq!(DisplayState::of(true, 0), DisplayState::Loading);
}

#[test]
fn test_empty_when_not_loading_and_no_rows() {
    assert_eq!(DisplayState::of(false, 0), DisplayState::Empty);
}

#[test]
fn test_populated() {
    let state = DisplayState::of(false, 1);
    assert_eq!(state, DisplayState::Populated);
    assert!(state.is_populated());
    assert!(!DisplayState::Empty.is_populated());
}
