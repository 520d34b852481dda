//! Input and scrolling primitives shared by the pull-refresh crates.

pub mod gesture_constants;
pub mod input;
mod scrollable;

pub use input::{Point, PointerEvent, PointerEventKind, PointerId};
pub use scrollable::{ScrollState, ScrollabilityOracle};
