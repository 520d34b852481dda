use super::*;

const TRIGGER: f32 = 100.0;

#[test]
fn identity_below_trigger() {
    let model = OffsetModel::new(TRIGGER);
    for step in 0..=100 {
        let displacement = step as f32;
        assert_eq!(model.damp(PullDirection::Down, displacement), displacement);
    }
}

#[test]
fn excess_is_halved_past_trigger() {
    let model = OffsetModel::new(TRIGGER);
    assert_eq!(model.damp(PullDirection::Down, 140.0), 120.0);
    assert_eq!(model.damp(PullDirection::Down, 300.0), 200.0);
}

#[test]
fn damping_is_monotonic() {
    let model = OffsetModel::new(TRIGGER);
    let mut previous = f32::MIN;
    for step in 0..600 {
        let offset = model.damp(PullDirection::Down, step as f32);
        assert!(offset >= previous);
        previous = offset;
    }
}

#[test]
fn offset_never_crosses_rest_against_the_pull() {
    let model = OffsetModel::new(TRIGGER);
    assert_eq!(model.damp(PullDirection::Down, -40.0), 0.0);
    assert_eq!(model.damp(PullDirection::Up, 40.0), 0.0);
}

#[test]
fn up_pull_mirrors_down_pull() {
    let model = OffsetModel::new(TRIGGER);
    assert_eq!(model.damp(PullDirection::Up, -60.0), -60.0);
    assert_eq!(model.damp(PullDirection::Up, -140.0), -120.0);
}

#[test]
fn undamp_inverts_damp() {
    let model = OffsetModel::new(TRIGGER);
    for displacement in [0.0, 35.0, 100.0, 140.0, 420.0] {
        let offset = model.damp(PullDirection::Down, displacement);
        assert_eq!(model.undamp(PullDirection::Down, offset), displacement);
        let offset = model.damp(PullDirection::Up, -displacement);
        assert_eq!(model.undamp(PullDirection::Up, offset), -displacement);
    }
}

#[test]
fn negative_trigger_is_treated_as_zero() {
    let model = OffsetModel::new(-5.0);
    assert_eq!(model.trigger_distance(), 0.0);
    assert_eq!(model.damp(PullDirection::Down, 10.0), 5.0);
}
