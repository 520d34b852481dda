use pullrefresh_testing::prelude::*;

const HEADER: f32 = 100.0;

#[test]
fn second_contact_takes_over_without_a_jump() {
    let robot = PullRobot::new(HEADER);
    robot.pull(60.0, 3);
    assert_eq!(robot.offset(), 60.0);

    assert!(robot.add_pointer(1, 200.0));
    assert_eq!(robot.offset(), 60.0);

    robot.move_to(230.0);
    assert_eq!(robot.offset(), 90.0);
}

#[test]
fn secondary_contact_movement_is_ignored() {
    let robot = PullRobot::new(HEADER);
    robot.pull(60.0, 3);
    robot.add_pointer(1, 200.0);

    assert!(robot.move_pointer(0, 10.0));
    assert_eq!(robot.offset(), 60.0);
}

#[test]
fn lifting_the_tracked_contact_reanchors_to_a_remaining_one() {
    let robot = PullRobot::new(HEADER);
    robot.pull(60.0, 3);
    robot.add_pointer(1, 200.0);
    robot.move_to(230.0);

    assert!(robot.lift_pointer(1, 0, 60.0));
    assert_eq!(robot.offset(), 90.0);

    robot.move_to(80.0);
    assert_eq!(robot.status(), PullStatus::LoosenRefresh);
    assert_eq!(robot.offset(), 105.0);

    robot.release();
    assert_eq!(robot.status(), PullStatus::Refreshing);
}

#[test]
fn lifting_an_untracked_contact_keeps_the_drag() {
    let robot = PullRobot::new(HEADER);
    robot.pull(40.0, 2);
    robot.add_pointer(1, 300.0);
    robot.add_pointer(2, 320.0);

    assert!(robot.lift_pointer(1, 2, 320.0));
    robot.move_to(340.0);
    assert_eq!(robot.offset(), 60.0);
}

#[test]
fn unknown_contact_ends_the_drag_and_returns_home() {
    let robot = PullRobot::new(HEADER);
    robot.pull(60.0, 3);

    assert!(!robot.move_pointer(9, 120.0));
    assert!(!robot.layout().is_dragging());
    assert_eq!(robot.offset(), 60.0);

    robot.wait_for_idle();
    assert_eq!(robot.offset(), 0.0);
}
