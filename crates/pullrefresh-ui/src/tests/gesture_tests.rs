use super::*;

const SLOP: f32 = 8.0;

fn at_top() -> ScrollSnapshot {
    ScrollSnapshot {
        can_scroll_up: false,
        can_scroll_down: true,
    }
}

fn at_bottom() -> ScrollSnapshot {
    ScrollSnapshot {
        can_scroll_up: true,
        can_scroll_down: false,
    }
}

fn session_at(y: f32) -> GestureSession {
    let mut session = GestureSession::default();
    session.begin(0, y);
    session
}

#[test]
fn movement_within_slop_stays_undecided() {
    let mut session = session_at(100.0);
    session.track_move(0, 108.0).unwrap();
    assert_eq!(session.classify(SLOP, at_top(), true, true), None);
}

#[test]
fn downward_travel_at_top_is_a_down_pull() {
    let mut session = session_at(100.0);
    session.track_move(0, 120.0).unwrap();
    assert_eq!(
        session.classify(SLOP, at_top(), true, true),
        Some(PullDirection::Down)
    );
}

#[test]
fn downward_travel_is_ignored_when_content_can_scroll_up() {
    let mut session = session_at(100.0);
    session.track_move(0, 160.0).unwrap();
    assert_eq!(session.classify(SLOP, at_bottom(), true, true), None);
}

#[test]
fn upward_travel_at_bottom_is_an_up_pull() {
    let mut session = session_at(300.0);
    session.track_move(0, 250.0).unwrap();
    assert_eq!(
        session.classify(SLOP, at_bottom(), true, true),
        Some(PullDirection::Up)
    );
}

#[test]
fn disabled_directions_are_never_recognized() {
    let mut session = session_at(100.0);
    session.track_move(0, 200.0).unwrap();
    assert_eq!(session.classify(SLOP, at_top(), false, true), None);

    let mut session = session_at(300.0);
    session.track_move(0, 100.0).unwrap();
    assert_eq!(session.classify(SLOP, at_bottom(), true, false), None);
}

#[test]
fn ambiguous_content_never_starts_a_pull() {
    let mut session = session_at(100.0);
    session.track_move(0, 400.0).unwrap();
    let both = ScrollSnapshot {
        can_scroll_up: true,
        can_scroll_down: true,
    };
    assert_eq!(session.classify(SLOP, both, true, true), None);
}

#[test]
fn refused_session_stays_refused() {
    let mut session = session_at(100.0);
    session.refuse();
    session.track_move(0, 300.0).unwrap();
    assert_eq!(session.classify(SLOP, at_top(), true, true), None);
}

#[test]
fn decision_sticks_until_reset() {
    let mut session = session_at(100.0);
    session.track_move(0, 130.0).unwrap();
    session.classify(SLOP, at_top(), true, true);
    session.track_move(0, 20.0).unwrap();
    assert_eq!(
        session.classify(SLOP, at_bottom(), true, true),
        Some(PullDirection::Down)
    );
    session.reset();
    assert_eq!(session.mode(), None);
}

#[test]
fn unknown_pointer_is_rejected() {
    let mut session = session_at(0.0);
    assert_eq!(
        session.track_move(7, 10.0),
        Err(PullRefreshError::InvalidPointer { id: Some(7) })
    );
    let mut idle = GestureSession::default();
    assert_eq!(
        idle.track_move(0, 10.0),
        Err(PullRefreshError::InvalidPointer { id: None })
    );
}

#[test]
fn secondary_pointer_takes_over_without_jump() {
    let mut session = session_at(0.0);
    session.track_move(0, 50.0).unwrap();
    session.add_pointer(1, 200.0).unwrap();
    assert_eq!(session.displacement(), 50.0);

    assert_eq!(session.track_move(1, 230.0), Ok(MoveOutcome::Active));
    assert_eq!(session.displacement(), 80.0);
    assert_eq!(session.track_move(0, 55.0), Ok(MoveOutcome::Secondary));
    assert_eq!(session.displacement(), 80.0);
}

#[test]
fn lifting_active_pointer_reanchors_to_remaining_one() {
    let mut session = session_at(0.0);
    session.track_move(0, 50.0).unwrap();
    session.add_pointer(1, 200.0).unwrap();
    session.track_move(1, 230.0).unwrap();

    session.remove_pointer(1).unwrap();
    assert_eq!(session.displacement(), 80.0);
    session.track_move(0, 60.0).unwrap();
    assert_eq!(session.displacement(), 90.0);
}

#[test]
fn lifting_secondary_pointer_keeps_tracking() {
    let mut session = session_at(0.0);
    session.add_pointer(1, 300.0).unwrap();
    session.add_pointer(2, 320.0).unwrap();
    session.remove_pointer(1).unwrap();
    session.track_move(2, 340.0).unwrap();
    assert_eq!(session.displacement(), 20.0);
}

#[test]
fn anchoring_sets_displacement() {
    let mut session = session_at(10.0);
    session.track_move(0, 30.0).unwrap();
    session.anchor_displacement(140.0);
    assert_eq!(session.displacement(), 140.0);
    session.track_move(0, 40.0).unwrap();
    assert_eq!(session.displacement(), 150.0);
}
