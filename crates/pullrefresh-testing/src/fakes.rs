//! Recording collaborators.
//!
//! Each fake keeps everything it was told so tests can assert on the exact
//! sequence of calls a controller made.

use pullrefresh_foundation::ScrollabilityOracle;
use pullrefresh_ui::{HeaderPresenter, PullContent, PullDirection, PullListener, PullStatus};
use std::cell::{Cell, RefCell};

/// Content pane with scripted scrollability.
#[derive(Debug, Default)]
pub struct FakeContent {
    can_scroll_up: Cell<bool>,
    can_scroll_down: Cell<bool>,
    tops: RefCell<Vec<f32>>,
}

impl FakeContent {
    /// Content resting at its top edge with more items below.
    pub fn at_top() -> Self {
        let content = Self::default();
        content.set_scrollability(false, true);
        content
    }

    /// Content scrolled to its bottom edge.
    pub fn at_bottom() -> Self {
        let content = Self::default();
        content.set_scrollability(true, false);
        content
    }

    pub fn set_scrollability(&self, can_scroll_up: bool, can_scroll_down: bool) {
        self.can_scroll_up.set(can_scroll_up);
        self.can_scroll_down.set(can_scroll_down);
    }

    pub fn top(&self) -> Option<f32> {
        self.tops.borrow().last().copied()
    }

    pub fn placements(&self) -> Vec<f32> {
        self.tops.borrow().clone()
    }
}

impl ScrollabilityOracle for FakeContent {
    fn can_scroll_up(&self) -> bool {
        self.can_scroll_up.get()
    }

    fn can_scroll_down(&self) -> bool {
        self.can_scroll_down.get()
    }
}

impl PullContent for FakeContent {
    fn place(&self, top: f32) {
        self.tops.borrow_mut().push(top);
    }
}

/// Header that records offsets and statuses.
#[derive(Debug)]
pub struct RecordingPresenter {
    extent: Option<f32>,
    offsets: RefCell<Vec<(f32, f32)>>,
    statuses: RefCell<Vec<PullStatus>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self {
            extent: None,
            offsets: RefCell::new(Vec::new()),
            statuses: RefCell::new(Vec::new()),
        }
    }

    /// Presenter that reports its own extent on attach.
    pub fn measured(extent: f32) -> Self {
        Self {
            extent: Some(extent),
            ..Self::new()
        }
    }

    pub fn offsets(&self) -> Vec<(f32, f32)> {
        self.offsets.borrow().clone()
    }

    pub fn last_offset(&self) -> Option<f32> {
        self.offsets.borrow().last().map(|(current, _)| *current)
    }

    pub fn statuses(&self) -> Vec<PullStatus> {
        self.statuses.borrow().clone()
    }

    pub fn clear(&self) {
        self.offsets.borrow_mut().clear();
        self.statuses.borrow_mut().clear();
    }
}

impl Default for RecordingPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderPresenter for RecordingPresenter {
    fn measured_extent(&self) -> Option<f32> {
        self.extent
    }

    fn offset_changed(&self, current: f32, previous: f32) {
        self.offsets.borrow_mut().push((current, previous));
    }

    fn status_changed(&self, status: PullStatus) {
        self.statuses.borrow_mut().push(status);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerEvent {
    Normal,
    Loose(PullDirection),
    RefreshRequested,
    LoadRequested,
}

/// Listener that records every callback, optionally running a hook after.
#[derive(Default)]
pub struct RecordingListener {
    events: RefCell<Vec<ListenerEvent>>,
    hook: RefCell<Option<Box<dyn Fn(ListenerEvent)>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `hook` after each recorded event, e.g. to call back into the
    /// controller from inside a notification.
    pub fn on_event(&self, hook: impl Fn(ListenerEvent) + 'static) {
        *self.hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn events(&self) -> Vec<ListenerEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, event: ListenerEvent) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|recorded| **recorded == event)
            .count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn record(&self, event: ListenerEvent) {
        self.events.borrow_mut().push(event);
        log::trace!("listener event {event:?}");
        if let Some(hook) = self.hook.borrow().as_ref() {
            hook(event);
        }
    }
}

impl std::fmt::Debug for RecordingListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingListener")
            .field("events", &self.events.borrow())
            .finish()
    }
}

impl PullListener for RecordingListener {
    fn on_normal(&self) {
        self.record(ListenerEvent::Normal);
    }

    fn on_loose(&self, direction: PullDirection) {
        self.record(ListenerEvent::Loose(direction));
    }

    fn on_refresh_requested(&self) {
        self.record(ListenerEvent::RefreshRequested);
    }

    fn on_load_requested(&self) {
        self.record(ListenerEvent::LoadRequested);
    }
}
