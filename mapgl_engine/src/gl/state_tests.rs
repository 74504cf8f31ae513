use super::*;

#[test]
fn test_state_new_is_clean() {
    let state = State::new(false);
    assert!(!state.get());
    assert!(!state.is_dirty());
}

#[test]
fn test_state_update_skips_same_value() {
    let mut state = State::new(0u8);
    let mut calls = Vec::new();

    assert!(!state.update(0, |v| calls.push(v)));
    assert!(calls.is_empty());
}

#[test]
fn test_state_update_applies_new_value() {
    let mut state = State::new(0u8);
    let mut calls = Vec::new();

    assert!(state.update(3, |v| calls.push(v)));
    assert!(!state.update(3, |v| calls.push(v)));

    assert_eq!(calls, vec![3]);
    assert_eq!(state.get(), 3);
}

#[test]
fn test_state_dirty_forces_reapply() {
    let mut state = State::new(true);
    let mut calls = Vec::new();

    state.set_dirty();
    assert!(state.is_dirty());
    assert!(state.update(true, |v| calls.push(v)));
    assert!(!state.is_dirty());

    assert_eq!(calls, vec![true]);
}

#[test]
fn test_state_reset_records_without_apply() {
    let mut state = State::new(Some(7u32));
    state.set_dirty();
    state.reset(None);

    assert_eq!(state.get(), None);
    assert!(!state.is_dirty());

    let mut calls = Vec::new();
    assert!(!state.update(None, |v| calls.push(v)));
    assert!(calls.is_empty());
}
