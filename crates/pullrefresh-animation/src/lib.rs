//! Tween animations driven by the [`pullrefresh_core`] frame clock.

mod animation;
mod tween;

pub use animation::{AnimationSpec, Easing, Lerp};
pub use tween::TweenAnimation;
