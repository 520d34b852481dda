//! Settle animation driver.
//!
//! Eases the pull offset to a resting target and reports every frame through
//! the same offset path a drag uses.

use pullrefresh_animation::{AnimationSpec, TweenAnimation};
use pullrefresh_core::RuntimeHandle;
use std::cell::Cell;
use std::rc::Rc;

/// Resting offsets a settle animation can aim for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleTarget {
    /// Offset zero; the content covers the header again.
    Rest,
    /// Header fully revealed while refreshing.
    Header,
    /// Footer fully revealed while loading.
    Footer,
}

impl SettleTarget {
    pub fn offset(self, header_extent: f32, footer_extent: f32) -> f32 {
        match self {
            SettleTarget::Rest => 0.0,
            SettleTarget::Header => header_extent,
            SettleTarget::Footer => -footer_extent,
        }
    }

    /// Range interpolated offsets are clamped to on the way to this target.
    pub fn bounds(self, footer_extent: f32) -> SettleBounds {
        match self {
            SettleTarget::Rest => SettleBounds::new(-footer_extent, f32::INFINITY),
            SettleTarget::Header => SettleBounds::new(0.0, f32::INFINITY),
            SettleTarget::Footer => SettleBounds::new(f32::NEG_INFINITY, 0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleBounds {
    min: f32,
    max: f32,
}

impl SettleBounds {
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// The one settle animation a controller owns.
///
/// `restart` replaces any run in flight; the replaced run's completion never
/// fires, and the new run starts wherever the caller says the offset is now.
#[derive(Clone, Debug)]
pub struct SettleAnimation {
    tween: TweenAnimation<f32>,
    // Guards callbacks of a run replaced from inside its own frame.
    run: Rc<Cell<u64>>,
}

impl SettleAnimation {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            tween: TweenAnimation::new(runtime),
            run: Rc::new(Cell::new(0)),
        }
    }

    pub fn restart<F, G>(
        &self,
        from: f32,
        to: f32,
        bounds: SettleBounds,
        spec: AnimationSpec,
        on_frame: F,
        on_complete: G,
    ) where
        F: Fn(f32) + 'static,
        G: FnOnce() + 'static,
    {
        let run = self.run.get() + 1;
        self.run.set(run);

        let frame_run = Rc::clone(&self.run);
        let end_run = Rc::clone(&self.run);
        self.tween.start(
            from,
            to,
            spec,
            move |value| {
                if frame_run.get() == run {
                    on_frame(bounds.clamp(value));
                }
            },
            move || {
                if end_run.get() == run {
                    on_complete();
                }
            },
        );
    }

    pub fn cancel(&self) {
        self.run.set(self.run.get() + 1);
        self.tween.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.tween.is_running()
    }
}
