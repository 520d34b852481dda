//! Shared gesture constants for pull gestures.
//!
//! All distances are in logical (density-independent) units. Hosts with a
//! density factor scale them through `PullRefreshConfig::density`.

/// Distance a pointer must travel from its press position before a pull is
/// recognized. Below this, movement is treated as finger jitter.
pub const TOUCH_SLOP: f32 = 8.0;

/// Upper bound for the loosen threshold when the header reports no extent.
pub const REFRESH_TRIGGER_DISTANCE: f32 = 120.0;

/// Fraction of the container height usable as the fallback loosen threshold.
pub const MAX_SWIPE_DISTANCE_FACTOR: f32 = 0.6;

/// Damping divisor applied to displacement past the trigger distance.
pub const OVERSCROLL_DAMPING: f32 = 2.0;

/// Cool-down before a released, uncommitted pull returns to rest.
pub const RETURN_TO_START_DELAY_MILLIS: u64 = 300;

/// Duration of settle animations.
pub const MEDIUM_ANIMATION_MILLIS: u64 = 400;

/// Decelerate factor of the settle easing curve.
pub const DECELERATE_FACTOR: f32 = 2.0;
