//! Frame-driven tween animation.
//!
//! Drives an eased interpolation from one value to another using the runtime's
//! frame callback system, reporting every intermediate value to the caller.

use crate::animation::{AnimationSpec, Lerp};
use pullrefresh_core::{FrameCallbackRegistration, FrameClock, RuntimeHandle, NANOS_PER_MILLI};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// State for the run currently owned by a [`TweenAnimation`].
struct TweenState<T> {
    /// Bumped on every start so callbacks of a replaced run go quiet.
    generation: u64,
    from: T,
    to: T,
    spec: AnimationSpec,
    /// Frame time of the first frame, pinned lazily.
    start_frame_time_nanos: Cell<Option<u64>>,
    registration: Option<FrameCallbackRegistration>,
    is_running: Cell<bool>,
}

enum FrameStep<T> {
    Stale,
    Value { value: T, finished: bool },
}

/// Interpolates a value over time, one frame at a time.
///
/// Starting a new run while one is in flight replaces it: the old run's
/// callbacks are dropped without being invoked.
pub struct TweenAnimation<T: Lerp + Copy + 'static> {
    state: Rc<RefCell<Option<TweenState<T>>>>,
    generation: Rc<Cell<u64>>,
    frame_clock: FrameClock,
}

impl<T: Lerp + Copy + 'static> TweenAnimation<T> {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            state: Rc::new(RefCell::new(None)),
            generation: Rc::new(Cell::new(0)),
            frame_clock: runtime.frame_clock(),
        }
    }

    /// Starts animating from `from` to `to`.
    ///
    /// `on_update` receives every interpolated value, the last one being
    /// exactly `to`. `on_end` runs once after that final value, unless the run
    /// is cancelled or replaced first. Neither callback runs synchronously.
    pub fn start<F, G>(&self, from: T, to: T, spec: AnimationSpec, on_update: F, on_end: G)
    where
        F: Fn(T) + 'static,
        G: FnOnce() + 'static,
    {
        self.cancel();

        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        *self.state.borrow_mut() = Some(TweenState {
            generation,
            from,
            to,
            spec,
            start_frame_time_nanos: Cell::new(None),
            registration: None,
            is_running: Cell::new(true),
        });

        schedule_next_frame(
            Rc::clone(&self.state),
            self.frame_clock.clone(),
            generation,
            on_update,
            on_end,
        );
    }

    pub fn cancel(&self) {
        let previous = self.state.borrow_mut().take();
        if let Some(state) = previous {
            state.is_running.set(false);
            // Dropping the registration unhooks the pending frame callback.
            drop(state.registration);
        }
    }

    pub fn is_running(&self) -> bool {
        self.state
            .borrow()
            .as_ref()
            .is_some_and(|state| state.is_running.get())
    }
}

impl<T: Lerp + Copy + 'static> Clone for TweenAnimation<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            generation: Rc::clone(&self.generation),
            frame_clock: self.frame_clock.clone(),
        }
    }
}

impl<T: Lerp + Copy + 'static> std::fmt::Debug for TweenAnimation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenAnimation")
            .field("generation", &self.generation.get())
            .field("running", &self.is_running())
            .finish()
    }
}

fn schedule_next_frame<T, F, G>(
    state: Rc<RefCell<Option<TweenState<T>>>>,
    frame_clock: FrameClock,
    generation: u64,
    on_update: F,
    on_end: G,
) where
    T: Lerp + Copy + 'static,
    F: Fn(T) + 'static,
    G: FnOnce() + 'static,
{
    let state_for_frame = Rc::clone(&state);
    let clock_for_frame = frame_clock.clone();

    let registration = frame_clock.with_frame_nanos(move |frame_time_nanos| {
        let step = advance(&state_for_frame, generation, frame_time_nanos);
        match step {
            FrameStep::Stale => {}
            FrameStep::Value { value, finished } => {
                on_update(value);
                if finished {
                    on_end();
                } else if is_current(&state_for_frame, generation) {
                    schedule_next_frame(
                        state_for_frame,
                        clock_for_frame,
                        generation,
                        on_update,
                        on_end,
                    );
                }
            }
        }
    });

    if let Some(current) = state.borrow_mut().as_mut() {
        if current.generation == generation && current.is_running.get() {
            current.registration = Some(registration);
        }
    }
}

fn is_current<T>(state: &Rc<RefCell<Option<TweenState<T>>>>, generation: u64) -> bool {
    state
        .borrow()
        .as_ref()
        .is_some_and(|current| current.generation == generation && current.is_running.get())
}

fn advance<T: Lerp + Copy>(
    state: &Rc<RefCell<Option<TweenState<T>>>>,
    generation: u64,
    frame_time_nanos: u64,
) -> FrameStep<T> {
    let guard = state.borrow();
    let Some(tween) = guard.as_ref() else {
        return FrameStep::Stale;
    };
    if tween.generation != generation || !tween.is_running.get() {
        return FrameStep::Stale;
    }

    let start_time = match tween.start_frame_time_nanos.get() {
        Some(start) => start,
        None => {
            tween.start_frame_time_nanos.set(Some(frame_time_nanos));
            frame_time_nanos
        }
    };
    let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
    let duration_nanos = (tween.spec.duration_millis * NANOS_PER_MILLI).max(1);
    let linear_progress = (elapsed_nanos as f64 / duration_nanos as f64).clamp(0.0, 1.0) as f32;
    let finished = linear_progress >= 1.0;
    let value = if finished {
        tween.to
    } else {
        tween
            .from
            .lerp(&tween.to, tween.spec.easing.transform(linear_progress))
    };
    if finished {
        tween.is_running.set(false);
    }
    log::trace!("tween frame: progress={linear_progress:.3}");
    FrameStep::Value { value, finished }
}
