//! Assertion helpers for pull robot tests.

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that successive values never move away from `target`.
pub fn assert_converges(values: &[f32], target: f32, msg: &str) {
    for pair in values.windows(2) {
        let before = (pair[0] - target).abs();
        let after = (pair[1] - target).abs();
        assert!(
            after <= before + f32::EPSILON,
            "{}: {} -> {} moves away from {}",
            msg,
            pair[0],
            pair[1],
            target
        );
    }
}

/// Assert that every value lies within `[min, max]`.
pub fn assert_within(values: &[f32], min: f32, max: f32, msg: &str) {
    for value in values {
        assert!(
            *value >= min && *value <= max,
            "{}: {} outside [{}, {}]",
            msg,
            value,
            min,
            max
        );
    }
}
