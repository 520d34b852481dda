//! Scrollability queries against hosted content.

use std::cell::Cell;
use std::rc::Rc;

/// Answers whether hosted content can scroll further in either direction.
///
/// "Up" means the content is not at its top edge: scrolling would reveal
/// earlier items. "Down" means more content lies below the viewport.
pub trait ScrollabilityOracle {
    fn can_scroll_up(&self) -> bool;
    fn can_scroll_down(&self) -> bool;
}

/// Minimal vertical scroll position model.
///
/// Holds the offset in `[0, max_value]` and answers scrollability from it.
/// Cloning shares the same position.
#[derive(Clone, Debug, Default)]
pub struct ScrollState {
    inner: Rc<ScrollStateInner>,
}

#[derive(Debug, Default)]
struct ScrollStateInner {
    value: Cell<f32>,
    max_value: Cell<f32>,
}

impl ScrollState {
    pub fn new(initial: f32, max_value: f32) -> Self {
        let state = Self::default();
        state.set_max_value(max_value);
        state.scroll_to(initial);
        state
    }

    pub fn value(&self) -> f32 {
        self.inner.value.get()
    }

    pub fn max_value(&self) -> f32 {
        self.inner.max_value.get()
    }

    pub fn set_max_value(&self, max: f32) {
        self.inner.max_value.set(max.max(0.0));
        self.scroll_to(self.value());
    }

    /// Scrolls by the given delta, clamping to valid range [0, max_value].
    /// Returns the actual amount scrolled.
    pub fn dispatch_raw_delta(&self, delta: f32) -> f32 {
        let current = self.value();
        let next = (current + delta).clamp(0.0, self.max_value());
        self.inner.value.set(next);
        next - current
    }

    pub fn scroll_to(&self, position: f32) {
        self.inner
            .value
            .set(position.clamp(0.0, self.max_value()));
    }
}

impl ScrollabilityOracle for ScrollState {
    fn can_scroll_up(&self) -> bool {
        self.value() > 0.0
    }

    fn can_scroll_down(&self) -> bool {
        self.value() < self.max_value()
    }
}

#[cfg(test)]
#[path = "tests/scrollable_tests.rs"]
mod tests;
