use crate::runtime::{RuntimeHandle, TimerId};

/// Handle to a delayed callback posted with [`RuntimeHandle::post_delayed`].
///
/// Dropping the handle disarms the timer, so owners keep it for as long as the
/// callback should stay armed.
pub struct TimerRegistration {
    runtime: RuntimeHandle,
    id: Option<TimerId>,
}

impl TimerRegistration {
    pub(crate) fn new(runtime: RuntimeHandle, id: TimerId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    pub(crate) fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    /// Whether the callback has neither fired nor been cancelled.
    pub fn is_pending(&self) -> bool {
        self.id.is_some_and(|id| self.runtime.is_timer_pending(id))
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}

impl Drop for TimerRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}

impl std::fmt::Debug for TimerRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerRegistration")
            .field("id", &self.id)
            .field("pending", &self.is_pending())
            .finish()
    }
}
