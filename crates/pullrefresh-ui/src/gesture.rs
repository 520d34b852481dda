//! Gesture session tracking and pull classification.

use crate::error::PullRefreshError;
use crate::status::PullDirection;
use pullrefresh_foundation::{PointerId, ScrollabilityOracle};
use smallvec::SmallVec;

/// Scrollability of the content sampled when an event arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ScrollSnapshot {
    pub can_scroll_up: bool,
    pub can_scroll_down: bool,
}

impl ScrollSnapshot {
    pub fn sample<O: ScrollabilityOracle + ?Sized>(oracle: &O) -> Self {
        Self {
            can_scroll_up: oracle.can_scroll_up(),
            can_scroll_down: oracle.can_scroll_down(),
        }
    }

    /// Content mid-scroll in both senses owns the gesture outright.
    pub fn is_ambiguous(&self) -> bool {
        self.can_scroll_up && self.can_scroll_down
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TrackedPointer {
    id: PointerId,
    y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MoveOutcome {
    /// The active pointer moved; displacement changed.
    Active,
    /// A secondary contact moved; only its cached position changed.
    Secondary,
}

/// One touch sequence, from press to release.
#[derive(Debug, Default)]
pub(crate) struct GestureSession {
    active_pointer: Option<PointerId>,
    initial_y: f32,
    last_y: f32,
    mode: Option<PullDirection>,
    refused: bool,
    pointers: SmallVec<[TrackedPointer; 4]>,
}

impl GestureSession {
    pub fn begin(&mut self, id: PointerId, y: f32) {
        self.reset();
        self.active_pointer = Some(id);
        self.initial_y = y;
        self.last_y = y;
        self.pointers.push(TrackedPointer { id, y });
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn mode(&self) -> Option<PullDirection> {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        self.mode.is_some()
    }

    /// Ignore the rest of this sequence.
    pub fn refuse(&mut self) {
        self.refused = true;
    }

    /// Drops a recognized pull; contacts stay tracked but the rest of the
    /// sequence is left to the content.
    pub fn abandon(&mut self) {
        self.mode = None;
        self.refused = true;
    }

    pub fn displacement(&self) -> f32 {
        self.last_y - self.initial_y
    }

    pub fn track_move(&mut self, id: PointerId, y: f32) -> Result<MoveOutcome, PullRefreshError> {
        let active = self
            .active_pointer
            .ok_or(PullRefreshError::InvalidPointer { id: None })?;
        let pointer = self
            .pointers
            .iter_mut()
            .find(|pointer| pointer.id == id)
            .ok_or(PullRefreshError::InvalidPointer { id: Some(id) })?;
        pointer.y = y;
        if id == active {
            self.last_y = y;
            Ok(MoveOutcome::Active)
        } else {
            Ok(MoveOutcome::Secondary)
        }
    }

    /// A further contact went down; tracking follows the newest one.
    pub fn add_pointer(&mut self, id: PointerId, y: f32) -> Result<(), PullRefreshError> {
        if self.active_pointer.is_none() {
            return Err(PullRefreshError::InvalidPointer { id: Some(id) });
        }
        match self.pointers.iter_mut().find(|pointer| pointer.id == id) {
            Some(pointer) => pointer.y = y,
            None => self.pointers.push(TrackedPointer { id, y }),
        }
        self.reanchor(id, y);
        Ok(())
    }

    /// A contact lifted while others stay down. If it was the tracked one,
    /// tracking moves to a remaining contact at its last known position.
    pub fn remove_pointer(&mut self, id: PointerId) -> Result<(), PullRefreshError> {
        let index = self
            .pointers
            .iter()
            .position(|pointer| pointer.id == id)
            .ok_or(PullRefreshError::InvalidPointer { id: Some(id) })?;
        self.pointers.remove(index);
        if self.active_pointer == Some(id) {
            match self.pointers.first().copied() {
                Some(next) => self.reanchor(next.id, next.y),
                None => self.active_pointer = None,
            }
        }
        Ok(())
    }

    /// Decides the pull direction once travel exceeds `slop`.
    ///
    /// The decision sticks for the rest of the session.
    pub fn classify(
        &mut self,
        slop: f32,
        scroll: ScrollSnapshot,
        down_enabled: bool,
        up_enabled: bool,
    ) -> Option<PullDirection> {
        if self.mode.is_some() || self.refused || self.active_pointer.is_none() {
            return self.mode;
        }
        if scroll.is_ambiguous() {
            return None;
        }
        let travel = self.displacement();
        self.mode = if travel > slop && !scroll.can_scroll_up && down_enabled {
            Some(PullDirection::Down)
        } else if -travel > slop && !scroll.can_scroll_down && up_enabled {
            Some(PullDirection::Up)
        } else {
            None
        };
        self.mode
    }

    /// Moves the reference point so the current displacement equals `displacement`.
    pub fn anchor_displacement(&mut self, displacement: f32) {
        self.initial_y = self.last_y - displacement;
    }

    // Switching contacts must not make the content jump.
    fn reanchor(&mut self, id: PointerId, y: f32) {
        let displacement = self.displacement();
        self.active_pointer = Some(id);
        self.last_y = y;
        self.initial_y = y - displacement;
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
