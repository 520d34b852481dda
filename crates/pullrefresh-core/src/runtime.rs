use crate::frame_clock::FrameClock;
use crate::timer::TimerRegistration;
use crate::NANOS_PER_MILLI;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

pub type FrameCallbackId = u64;
pub type TimerId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct TimerEntry {
    id: TimerId,
    due_nanos: u64,
    callback: Option<Box<dyn FnOnce() + 'static>>,
}

struct RuntimeInner {
    now_nanos: Cell<u64>,
    next_frame_callback_id: Cell<FrameCallbackId>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_timer_id: Cell<TimerId>,
    timers: RefCell<Vec<TimerEntry>>,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            now_nanos: Cell::new(0),
            next_frame_callback_id: Cell::new(1),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_timer_id: Cell::new(1),
            timers: RefCell::new(Vec::new()),
        }
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks.borrow_mut().push_back(FrameCallbackEntry {
            id,
            callback: Some(callback),
        });
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        // Callbacks registered while draining belong to the next frame.
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        for callback in pending {
            callback(frame_time_nanos);
        }
    }

    fn post_delayed(&self, delay_millis: u64, callback: Box<dyn FnOnce() + 'static>) -> TimerId {
        let id = self.next_timer_id.get();
        self.next_timer_id.set(id + 1);
        let due_nanos = self
            .now_nanos
            .get()
            .saturating_add(delay_millis.saturating_mul(NANOS_PER_MILLI));
        self.timers.borrow_mut().push(TimerEntry {
            id,
            due_nanos,
            callback: Some(callback),
        });
        id
    }

    fn cancel_timer(&self, id: TimerId) {
        self.timers.borrow_mut().retain(|entry| entry.id != id);
    }

    fn is_timer_pending(&self, id: TimerId) -> bool {
        self.timers.borrow().iter().any(|entry| entry.id == id)
    }

    fn take_next_due_timer(&self, now_nanos: u64) -> Option<Box<dyn FnOnce() + 'static>> {
        let mut timers = self.timers.borrow_mut();
        let index = timers
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due_nanos <= now_nanos)
            .min_by_key(|(_, entry)| (entry.due_nanos, entry.id))
            .map(|(index, _)| index)?;
        timers.remove(index).callback
    }

    fn run_due_timers(&self, now_nanos: u64) {
        while let Some(callback) = self.take_next_due_timer(now_nanos) {
            log::trace!("timer fired at {now_nanos}ns");
            callback();
        }
    }

    fn advance_to(&self, now_nanos: u64) {
        let now_nanos = now_nanos.max(self.now_nanos.get());
        self.now_nanos.set(now_nanos);
        self.run_due_timers(now_nanos);
        self.drain_frame_callbacks(now_nanos);
    }
}

/// Owner of the frame and timer queues.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new()),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }

    /// Moves the runtime clock forward and runs one frame.
    ///
    /// Timers that became due run first, in due order, then every frame
    /// callback queued before this call receives `now_nanos`. Timestamps
    /// earlier than the current time are treated as the current time.
    pub fn advance_to(&self, now_nanos: u64) {
        self.inner.advance_to(now_nanos);
    }

    pub fn now_nanos(&self) -> u64 {
        self.inner.now_nanos.get()
    }

    pub fn has_frame_callbacks(&self) -> bool {
        !self.inner.frame_callbacks.borrow().is_empty()
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.inner.timers.borrow().is_empty()
    }

    /// True when neither frames nor timers are waiting.
    pub fn is_idle(&self) -> bool {
        !self.has_frame_callbacks() && !self.has_pending_timers()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("now_nanos", &self.inner.now_nanos.get())
            .field("frame_callbacks", &self.inner.frame_callbacks.borrow().len())
            .field("timers", &self.inner.timers.borrow().len())
            .finish()
    }
}

/// Weak handle to a [`Runtime`]. Operations on a dropped runtime are no-ops.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    /// Runs `callback` once the runtime clock has moved `delay_millis` past now.
    pub fn post_delayed(
        &self,
        delay_millis: u64,
        callback: impl FnOnce() + 'static,
    ) -> TimerRegistration {
        match self.inner.upgrade() {
            Some(inner) => {
                let id = inner.post_delayed(delay_millis, Box::new(callback));
                TimerRegistration::new(self.clone(), id)
            }
            None => TimerRegistration::inactive(self.clone()),
        }
    }

    pub fn cancel_timer(&self, id: TimerId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_timer(id);
        }
    }

    pub fn is_timer_pending(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| inner.is_timer_pending(id))
    }

    pub fn now_nanos(&self) -> u64 {
        self.inner
            .upgrade()
            .map(|inner| inner.now_nanos.get())
            .unwrap_or_default()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

impl fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeHandle")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
