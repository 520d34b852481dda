//! Rubber-band mapping from pointer travel to content offset.

use crate::status::PullDirection;
use pullrefresh_foundation::gesture_constants::OVERSCROLL_DAMPING;

/// Maps raw pointer displacement to the damped on-screen offset.
///
/// Travel up to the trigger distance moves the content 1:1; travel past it is
/// halved. The offset never crosses rest in the direction opposite the pull.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetModel {
    trigger_distance: f32,
}

impl OffsetModel {
    pub fn new(trigger_distance: f32) -> Self {
        Self {
            trigger_distance: trigger_distance.max(0.0),
        }
    }

    pub fn trigger_distance(&self) -> f32 {
        self.trigger_distance
    }

    /// Damped offset for a pull in `direction` after `displacement` of travel.
    pub fn damp(&self, direction: PullDirection, displacement: f32) -> f32 {
        let travel = direction.magnitude(displacement).max(0.0);
        let excess = travel - self.trigger_distance;
        let damped = if excess > 0.0 {
            self.trigger_distance + excess / OVERSCROLL_DAMPING
        } else {
            travel
        };
        direction.signed(damped)
    }

    /// Displacement that [`OffsetModel::damp`] maps onto `offset`.
    ///
    /// Offsets on the wrong side of rest map to zero displacement.
    pub fn undamp(&self, direction: PullDirection, offset: f32) -> f32 {
        let shown = direction.magnitude(offset).max(0.0);
        let excess = shown - self.trigger_distance;
        let travel = if excess > 0.0 {
            self.trigger_distance + excess * OVERSCROLL_DAMPING
        } else {
            shown
        };
        direction.signed(travel)
    }
}

#[cfg(test)]
#[path = "tests/offset_tests.rs"]
mod tests;
