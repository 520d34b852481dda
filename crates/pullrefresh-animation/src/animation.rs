//! Easing curves and tween specifications.

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Easing curves mapping linear progress in `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// No easing.
    LinearEasing,
    /// Starts fast and decelerates: `1 - (1 - t)^(2 * factor)`.
    ///
    /// A factor of `1.0` is the classic quadratic ease-out; larger factors
    /// front-load more of the motion.
    Decelerate(f32),
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        let fraction = fraction.clamp(0.0, 1.0);
        match self {
            Easing::LinearEasing => fraction,
            Easing::Decelerate(factor) => {
                if *factor == 1.0 {
                    1.0 - (1.0 - fraction) * (1.0 - fraction)
                } else {
                    1.0 - (1.0 - fraction).powf(2.0 * factor)
                }
            }
        }
    }
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
