use pullrefresh_testing::prelude::*;
use pullrefresh_testing::robot_assertions::{assert_approx_eq, assert_converges, assert_within};

const HEADER: f32 = 100.0;

fn settle_values(robot: &PullRobot) -> Vec<f32> {
    robot
        .presenter()
        .offsets()
        .into_iter()
        .map(|(current, _)| current)
        .collect()
}

#[test]
fn pull_past_trigger_loosens_with_damped_offset() {
    let robot = PullRobot::new(HEADER);
    robot.press(0.0);
    robot.drag_by(HEADER + 40.0, 7);

    assert_eq!(robot.status(), PullStatus::LoosenRefresh);
    assert_eq!(robot.offset(), HEADER + 20.0);
    assert_eq!(robot.content().top(), Some(HEADER + 20.0));
    assert_eq!(robot.events(), vec![ListenerEvent::Loose(PullDirection::Down)]);
}

#[test]
fn release_while_loosened_refreshes_and_reveals_header() {
    let robot = PullRobot::new(HEADER);
    robot.pull(HEADER + 40.0, 7);
    assert!(robot.release());

    assert_eq!(robot.status(), PullStatus::Refreshing);
    assert!(robot.layout().is_refreshing());
    assert!(robot.layout().is_gesture_disabled());
    assert_eq!(
        robot.events(),
        vec![
            ListenerEvent::Loose(PullDirection::Down),
            ListenerEvent::RefreshRequested
        ]
    );

    robot.presenter().clear();
    robot.wait_for_idle();

    let values = settle_values(&robot);
    assert_converges(&values, HEADER, "settle to header");
    assert_within(&values, HEADER, HEADER + 20.0, "settle to header");
    assert_eq!(robot.offset(), HEADER);
    assert_eq!(robot.status(), PullStatus::Refreshing);
}

#[test]
fn stop_while_loosened_drops_the_pull() {
    let robot = PullRobot::new(HEADER);
    robot.pull(HEADER + 40.0, 7);
    assert_eq!(robot.status(), PullStatus::LoosenRefresh);
    assert_eq!(robot.offset(), HEADER + 20.0);

    robot.layout().set_refreshing(false).unwrap();
    assert_eq!(robot.status(), PullStatus::Normal);
    assert!(!robot.layout().is_dragging());
    assert_eq!(
        robot.events(),
        vec![ListenerEvent::Loose(PullDirection::Down), ListenerEvent::Normal]
    );

    assert!(!robot.move_to(HEADER + 200.0));
    assert!(!robot.release());
    assert_eq!(robot.status(), PullStatus::Normal);

    robot.wait_for_idle();
    assert_eq!(robot.offset(), 0.0);
    assert!(!robot.layout().is_gesture_disabled());
}

#[test]
fn stop_refresh_returns_to_rest_and_reenables_gestures() {
    let robot = PullRobot::new(HEADER);
    robot.pull(HEADER + 40.0, 7);
    robot.release();
    robot.wait_for_idle();
    robot.listener().clear();

    robot.layout().stop_refresh().unwrap();
    assert_eq!(robot.status(), PullStatus::Normal);
    assert_eq!(robot.events(), vec![ListenerEvent::Normal]);
    assert!(robot.layout().is_gesture_disabled());

    robot.wait_for_idle();
    assert_eq!(robot.offset(), 0.0);
    assert_eq!(robot.content().top(), Some(0.0));
    assert!(!robot.layout().is_gesture_disabled());

    robot.press(0.0);
    assert!(robot.move_to(30.0));
}

#[test]
fn gestures_are_ignored_while_refreshing() {
    let robot = PullRobot::new(HEADER);
    robot.pull(HEADER + 40.0, 7);
    robot.release();
    robot.wait_for_idle();

    assert!(!robot.press(0.0));
    assert!(!robot.move_to(80.0));
    assert!(!robot.release());
    assert_eq!(robot.offset(), HEADER);
    assert_eq!(robot.status(), PullStatus::Refreshing);
}

#[test]
fn short_pull_returns_to_rest_after_cool_down() {
    let robot = PullRobot::new(HEADER);
    robot.pull(HEADER - 10.0, 3);
    assert_eq!(robot.offset(), HEADER - 10.0);

    assert!(robot.release());
    assert_eq!(robot.status(), PullStatus::Normal);
    assert!(robot.runtime().has_pending_timers());

    robot.advance_millis(299);
    assert_eq!(robot.offset(), HEADER - 10.0);
    assert!(!robot.layout().is_returning_to_start());

    robot.advance_millis(1);
    assert!(robot.layout().is_returning_to_start());

    robot.wait_for_idle();
    assert_eq!(robot.offset(), 0.0);
    assert!(!robot.layout().is_returning_to_start());
    assert!(robot.events().is_empty());
}

#[test]
fn new_press_discards_pending_cancel() {
    let robot = PullRobot::new(HEADER);
    robot.pull(HEADER - 10.0, 3);
    robot.release();
    robot.advance_millis(200);

    assert!(!robot.press(0.0));
    assert!(!robot.runtime().has_pending_timers());
    robot.advance_millis(500);
    assert_eq!(robot.offset(), HEADER - 10.0);

    // Lifting without dragging still brings the content home.
    robot.release();
    robot.wait_for_idle();
    assert_eq!(robot.offset(), 0.0);
}

#[test]
fn release_at_rest_schedules_nothing() {
    let robot = PullRobot::new(HEADER);
    robot.press(0.0);
    robot.move_to(5.0);
    robot.release();
    assert!(robot.runtime().is_idle());

    robot.pull(30.0, 1);
    robot.move_to(0.0);
    assert_eq!(robot.offset(), 0.0);
    robot.release();
    assert!(robot.runtime().is_idle());
}

#[test]
fn cancel_while_loosened_goes_back_to_normal() {
    let robot = PullRobot::new(HEADER);
    robot.pull(HEADER + 40.0, 7);
    assert!(robot.cancel());

    assert_eq!(robot.status(), PullStatus::Normal);
    assert_eq!(
        robot.events(),
        vec![
            ListenerEvent::Loose(PullDirection::Down),
            ListenerEvent::Normal
        ]
    );

    robot.wait_for_idle();
    assert_eq!(robot.offset(), 0.0);
    assert_eq!(robot.listener().count(ListenerEvent::RefreshRequested), 0);
}

#[test]
fn dropping_back_under_trigger_unloosens() {
    let robot = PullRobot::new(HEADER);
    robot.pull(HEADER + 40.0, 7);
    robot.move_to(HEADER - 20.0);

    assert_eq!(robot.status(), PullStatus::Normal);
    assert_eq!(robot.offset(), HEADER - 20.0);
    assert_eq!(
        robot.events(),
        vec![
            ListenerEvent::Loose(PullDirection::Down),
            ListenerEvent::Normal
        ]
    );

    robot.release();
    robot.wait_for_idle();
    assert_eq!(robot.listener().count(ListenerEvent::RefreshRequested), 0);
}

#[test]
fn drag_never_crosses_rest_against_the_pull() {
    let robot = PullRobot::new(HEADER);
    robot.pull(50.0, 2);
    robot.move_to(-40.0);

    assert_eq!(robot.offset(), 0.0);
    assert_eq!(robot.status(), PullStatus::Normal);
}

#[test]
fn ambiguous_scrollability_refuses_the_whole_gesture() {
    let robot = PullRobot::new(HEADER);
    robot.content().set_scrollability(true, true);

    robot.press(0.0);
    for step in 1..=10 {
        assert!(!robot.move_to(step as f32 * 40.0));
    }
    assert_eq!(robot.offset(), 0.0);
    assert_eq!(robot.status(), PullStatus::Normal);

    // Scrollability changing mid-gesture does not revive it.
    robot.content().set_scrollability(false, true);
    assert!(!robot.move_to(500.0));
    robot.release();
    assert!(robot.events().is_empty());
}

#[test]
fn ambiguity_at_decision_time_blocks_recognition() {
    let robot = PullRobot::new(HEADER);
    robot.press(0.0);
    robot.content().set_scrollability(true, true);
    assert!(!robot.move_to(150.0));
    assert_eq!(robot.offset(), 0.0);
}

#[test]
fn content_that_can_scroll_up_keeps_the_gesture() {
    let robot = PullRobot::new(HEADER);
    robot.content().set_scrollability(true, false);
    robot.press(0.0);
    assert!(!robot.move_to(150.0));
    assert_eq!(robot.offset(), 0.0);
}

#[test]
fn down_pull_can_be_disabled() {
    let robot = PullRobot::new(HEADER);
    robot.layout().set_down_pull_enabled(false);
    robot.press(0.0);
    assert!(!robot.move_to(150.0));

    robot.release();
    robot.layout().set_down_pull_enabled(true);
    robot.press(0.0);
    assert!(robot.move_to(150.0));
}

#[test]
fn movement_within_touch_slop_is_not_a_pull() {
    let robot = PullRobot::new(HEADER);
    robot.press(0.0);
    assert!(!robot.move_to(8.0));
    assert!(robot.move_to(9.0));
    assert_eq!(robot.offset(), 9.0);
}

#[test]
fn drag_during_return_continues_from_live_offset() {
    let robot = PullRobot::new(HEADER);
    robot.pull(HEADER - 10.0, 3);
    robot.release();
    robot.advance_millis(300);
    robot.advance_millis(96);

    let live = robot.offset();
    assert!(live > 0.0 && live < HEADER - 10.0);

    robot.press(0.0);
    assert!(robot.move_to(20.0));
    assert_approx_eq(robot.offset(), live + 20.0, 1e-3, "re-anchored drag");
    assert!(!robot.layout().is_returning_to_start());

    robot.advance_millis(500);
    assert_approx_eq(robot.offset(), live + 20.0, 1e-3, "settle was cancelled");
}

#[test]
fn header_and_content_move_together() {
    let robot = PullRobot::new(HEADER);
    robot.pull(HEADER + 60.0, 8);
    robot.release();
    robot.wait_for_idle();

    let offsets = robot.presenter().offsets();
    let placements = robot.content().placements();
    // The first two placements come from attach and configure.
    assert_eq!(placements.len(), offsets.len() + 2);
    for ((current, _), top) in offsets.iter().zip(placements.iter().skip(2)) {
        assert_eq!(current, top);
    }
    for pair in offsets.windows(2) {
        assert_eq!(pair[1].1, pair[0].0);
    }
}
