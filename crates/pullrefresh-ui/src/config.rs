use pullrefresh_animation::{AnimationSpec, Easing};
use pullrefresh_foundation::gesture_constants::{
    DECELERATE_FACTOR, MAX_SWIPE_DISTANCE_FACTOR, MEDIUM_ANIMATION_MILLIS,
    REFRESH_TRIGGER_DISTANCE, RETURN_TO_START_DELAY_MILLIS, TOUCH_SLOP,
};

/// Runtime tunables of a [`crate::PullRefreshLayout`].
///
/// Distances are density-independent; `density` scales them to pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PullRefreshConfig {
    pub touch_slop: f32,
    pub density: f32,
    pub refresh_trigger_distance: f32,
    pub max_swipe_distance_factor: f32,
    pub settle_duration_millis: u64,
    pub return_to_start_delay_millis: u64,
    pub decelerate_factor: f32,
}

impl Default for PullRefreshConfig {
    fn default() -> Self {
        Self {
            touch_slop: TOUCH_SLOP,
            density: 1.0,
            refresh_trigger_distance: REFRESH_TRIGGER_DISTANCE,
            max_swipe_distance_factor: MAX_SWIPE_DISTANCE_FACTOR,
            settle_duration_millis: MEDIUM_ANIMATION_MILLIS,
            return_to_start_delay_millis: RETURN_TO_START_DELAY_MILLIS,
            decelerate_factor: DECELERATE_FACTOR,
        }
    }
}

impl PullRefreshConfig {
    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_settle_duration_millis(mut self, millis: u64) -> Self {
        self.settle_duration_millis = millis;
        self
    }

    pub fn with_return_to_start_delay_millis(mut self, millis: u64) -> Self {
        self.return_to_start_delay_millis = millis;
        self
    }

    pub fn scaled_touch_slop(&self) -> f32 {
        self.touch_slop * self.density
    }

    pub fn settle_spec(&self) -> AnimationSpec {
        AnimationSpec::tween(
            self.settle_duration_millis,
            Easing::Decelerate(self.decelerate_factor),
        )
    }

    /// Trigger distance used when the header has no extent of its own.
    pub fn fallback_trigger_distance(&self, container_height: Option<f32>) -> f32 {
        let scaled = self.refresh_trigger_distance * self.density;
        match container_height {
            Some(height) if height > 0.0 => (height * self.max_swipe_distance_factor).min(scaled),
            _ => scaled,
        }
    }
}
