//! Robot-style driver for a [`PullRefreshLayout`].
//!
//! The robot owns a runtime with a virtual clock, a controller attached to a
//! [`FakeContent`] and a [`RecordingPresenter`], and a [`RecordingListener`].
//! Pointer helpers feed events straight into the controller; time only moves
//! when the test advances it.
//!
//! # Example
//!
//! ```
//! use pullrefresh_testing::PullRobot;
//!
//! let robot = PullRobot::new(100.0);
//! robot.press(0.0);
//! robot.move_to(140.0);
//! robot.release();
//! robot.wait_for_idle();
//! assert!(robot.layout().is_refreshing());
//! ```

use crate::fakes::{FakeContent, ListenerEvent, RecordingListener, RecordingPresenter};
use pullrefresh_core::{Runtime, NANOS_PER_MILLI};
use pullrefresh_foundation::{PointerEvent, PointerId};
use pullrefresh_ui::{PullListener, PullRefreshConfig, PullRefreshLayout, PullStatus};
use std::cell::Cell;
use std::rc::Rc;

/// Length of one virtual frame.
pub const FRAME_MILLIS: u64 = 16;

const PRIMARY_POINTER: PointerId = 0;
const IDLE_FRAME_LIMIT: usize = 1_000;

pub struct PullRobot {
    runtime: Runtime,
    layout: PullRefreshLayout,
    content: Rc<FakeContent>,
    presenter: Rc<RecordingPresenter>,
    listener: Rc<RecordingListener>,
    pointer: Cell<PointerId>,
    pointer_y: Cell<f32>,
}

impl PullRobot {
    /// Controller with default tuning, content at its top edge and a header
    /// of `header_extent`.
    pub fn new(header_extent: f32) -> Self {
        Self::with_config(header_extent, PullRefreshConfig::default())
    }

    pub fn with_config(header_extent: f32, config: PullRefreshConfig) -> Self {
        let runtime = Runtime::new();
        let layout = PullRefreshLayout::with_config(runtime.handle(), config);
        let content = Rc::new(FakeContent::at_top());
        let presenter = Rc::new(RecordingPresenter::new());
        let listener = Rc::new(RecordingListener::new());

        layout
            .attach(content.clone(), presenter.clone())
            .expect("fresh layout accepts content and header");
        layout
            .configure(header_extent, 0.0)
            .expect("header extent must be valid");
        layout.set_listener(Some(listener.clone() as Rc<dyn PullListener>));

        Self {
            runtime,
            layout,
            content,
            presenter,
            listener,
            pointer: Cell::new(PRIMARY_POINTER),
            pointer_y: Cell::new(0.0),
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn layout(&self) -> &PullRefreshLayout {
        &self.layout
    }

    pub fn content(&self) -> &FakeContent {
        &self.content
    }

    pub fn presenter(&self) -> &RecordingPresenter {
        &self.presenter
    }

    pub fn listener(&self) -> &RecordingListener {
        &self.listener
    }

    pub fn status(&self) -> PullStatus {
        self.layout.status()
    }

    pub fn offset(&self) -> f32 {
        self.layout.current_offset()
    }

    pub fn events(&self) -> Vec<ListenerEvent> {
        self.listener.events()
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Sends an event and returns whether the controller consumed it.
    pub fn send(&self, event: PointerEvent) -> bool {
        self.layout
            .on_pointer_event(&event)
            .expect("robot layout is attached")
    }

    /// Primary contact down at `y`.
    pub fn press(&self, y: f32) -> bool {
        self.pointer.set(PRIMARY_POINTER);
        self.pointer_y.set(y);
        self.send(PointerEvent::down(PRIMARY_POINTER, y))
    }

    /// Moves the contact the robot is following to `y`.
    pub fn move_to(&self, y: f32) -> bool {
        self.pointer_y.set(y);
        self.send(PointerEvent::moved(self.pointer.get(), y))
    }

    /// Moves in `steps` equal increments, like a real finger would.
    pub fn drag_by(&self, delta: f32, steps: usize) {
        let steps = steps.max(1);
        let start = self.pointer_y.get();
        for step in 1..=steps {
            self.move_to(start + delta * step as f32 / steps as f32);
        }
    }

    /// Presses at zero and drags by `delta` in `steps` moves.
    pub fn pull(&self, delta: f32, steps: usize) {
        self.press(0.0);
        self.drag_by(delta, steps);
    }

    pub fn release(&self) -> bool {
        self.send(PointerEvent::up(self.pointer.get(), self.pointer_y.get()))
    }

    pub fn cancel(&self) -> bool {
        self.send(PointerEvent::cancel(self.pointer.get(), self.pointer_y.get()))
    }

    /// Puts down another contact; the robot follows it from now on.
    pub fn add_pointer(&self, id: PointerId, y: f32) -> bool {
        self.pointer.set(id);
        self.pointer_y.set(y);
        self.send(PointerEvent::pointer_down(id, y))
    }

    /// Lifts one contact while others stay down. When it is the one being
    /// followed, the robot switches to `follow` at `follow_y`.
    pub fn lift_pointer(&self, id: PointerId, follow: PointerId, follow_y: f32) -> bool {
        let consumed = self.send(PointerEvent::pointer_up(id, self.pointer_y.get()));
        if self.pointer.get() == id {
            self.pointer.set(follow);
            self.pointer_y.set(follow_y);
        }
        consumed
    }

    /// Moves a specific contact without changing which one the robot follows.
    pub fn move_pointer(&self, id: PointerId, y: f32) -> bool {
        if id == self.pointer.get() {
            self.pointer_y.set(y);
        }
        self.send(PointerEvent::moved(id, y))
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Advances the virtual clock by `millis`, one frame at a time.
    pub fn advance_millis(&self, millis: u64) {
        let start = self.runtime.now_nanos();
        let mut elapsed = 0;
        while elapsed < millis {
            elapsed = (elapsed + FRAME_MILLIS).min(millis);
            self.runtime.advance_to(start + elapsed * NANOS_PER_MILLI);
        }
    }

    /// Pumps frames until no animation or timer is pending.
    pub fn wait_for_idle(&self) {
        for _ in 0..IDLE_FRAME_LIMIT {
            if self.runtime.is_idle() {
                return;
            }
            self.advance_millis(FRAME_MILLIS);
        }
        panic!("runtime still busy after {IDLE_FRAME_LIMIT} frames");
    }
}

impl std::fmt::Debug for PullRobot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PullRobot")
            .field("layout", &self.layout)
            .field("pointer", &self.pointer.get())
            .finish()
    }
}
