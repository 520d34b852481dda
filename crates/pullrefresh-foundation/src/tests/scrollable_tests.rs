use super::*;

#[test]
fn top_of_content_cannot_scroll_up() {
    let state = ScrollState::new(0.0, 500.0);
    assert!(!state.can_scroll_up());
    assert!(state.can_scroll_down());
}

#[test]
fn bottom_of_content_cannot_scroll_down() {
    let state = ScrollState::new(500.0, 500.0);
    assert!(state.can_scroll_up());
    assert!(!state.can_scroll_down());
}

#[test]
fn mid_scroll_is_scrollable_both_ways() {
    let state = ScrollState::new(200.0, 500.0);
    assert!(state.can_scroll_up() && state.can_scroll_down());
}

#[test]
fn content_shorter_than_viewport_is_pinned() {
    let state = ScrollState::new(40.0, 0.0);
    assert_eq!(state.value(), 0.0);
    assert!(!state.can_scroll_up());
    assert!(!state.can_scroll_down());
}

#[test]
fn raw_delta_reports_consumed_amount() {
    let state = ScrollState::new(480.0, 500.0);
    assert_eq!(state.dispatch_raw_delta(50.0), 20.0);
    assert_eq!(state.value(), 500.0);
    assert_eq!(state.dispatch_raw_delta(-600.0), -500.0);
}

#[test]
fn shrinking_max_clamps_position() {
    let state = ScrollState::new(300.0, 500.0);
    state.set_max_value(100.0);
    assert_eq!(state.value(), 100.0);
}
