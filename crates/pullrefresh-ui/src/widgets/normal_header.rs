//! Classic arrow-and-spinner header.
//!
//! The header sits above the content. While the pull is shorter than the
//! header, a background panel slides down with the content and the header
//! itself stays pinned. Past the header extent the whole header travels with
//! the content edge.

use crate::presenter::HeaderPresenter;
use crate::status::PullStatus;
use pullrefresh_animation::{AnimationSpec, TweenAnimation};
use pullrefresh_core::RuntimeHandle;
use std::cell::Cell;
use std::rc::Rc;

const ARROW_FLIP_MILLIS: u64 = 250;
const ARROW_FLIPPED_DEGREES: f32 = -180.0;

/// Where each part of the header should be drawn, relative to the container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderFrame {
    pub header_top: f32,
    pub background_top: f32,
    pub indicator_top: f32,
    /// Degrees; 0 points down, -180 points up.
    pub arrow_rotation: f32,
    pub arrow_visible: bool,
    pub progress_visible: bool,
    /// Share of the header uncovered by the content, in `[0, 1]`.
    pub revealed_fraction: f32,
}

pub struct NormalHeader {
    extent: f32,
    indicator_rest_top: f32,
    offset: Cell<f32>,
    status: Cell<PullStatus>,
    arrow: TweenAnimation<f32>,
    arrow_rotation: Rc<Cell<f32>>,
}

impl NormalHeader {
    pub fn new(runtime: RuntimeHandle, extent: f32) -> Self {
        Self {
            extent: extent.max(0.0),
            indicator_rest_top: 0.0,
            offset: Cell::new(0.0),
            status: Cell::new(PullStatus::Normal),
            arrow: TweenAnimation::new(runtime),
            arrow_rotation: Rc::new(Cell::new(0.0)),
        }
    }

    /// Top of the progress indicator inside a fully revealed header.
    pub fn with_indicator_top(mut self, top: f32) -> Self {
        self.indicator_rest_top = top;
        self
    }

    pub fn extent(&self) -> f32 {
        self.extent
    }

    pub fn status(&self) -> PullStatus {
        self.status.get()
    }

    pub fn frame(&self) -> HeaderFrame {
        let offset = self.offset.get();
        let status = self.status.get();
        let (header_top, background_top) = if offset > self.extent {
            (offset - self.extent, 0.0)
        } else {
            (0.0, offset - self.extent)
        };
        let indicator_top = if status == PullStatus::Refreshing {
            self.indicator_rest_top
        } else {
            (background_top + self.indicator_rest_top).min(self.indicator_rest_top)
        };
        let revealed_fraction = if self.extent > 0.0 {
            (offset / self.extent).clamp(0.0, 1.0)
        } else {
            0.0
        };
        HeaderFrame {
            header_top,
            background_top,
            indicator_top,
            arrow_rotation: self.arrow_rotation.get(),
            arrow_visible: !status.is_busy(),
            progress_visible: status.is_busy(),
            revealed_fraction,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.status.get() {
            PullStatus::Normal => "Pull down to refresh",
            PullStatus::LoosenRefresh => "Release to refresh",
            PullStatus::Refreshing => "Refreshing...",
            PullStatus::LoosenLoad => "Release to load more",
            PullStatus::Loading => "Loading...",
        }
    }

    pub fn is_arrow_animating(&self) -> bool {
        self.arrow.is_running()
    }

    fn rotate_arrow_to(&self, degrees: f32) {
        let from = self.arrow_rotation.get();
        if from == degrees {
            return;
        }
        let sink = Rc::clone(&self.arrow_rotation);
        self.arrow.start(
            from,
            degrees,
            AnimationSpec::linear(ARROW_FLIP_MILLIS),
            move |value| sink.set(value),
            || {},
        );
    }
}

impl HeaderPresenter for NormalHeader {
    fn measured_extent(&self) -> Option<f32> {
        Some(self.extent)
    }

    fn offset_changed(&self, current: f32, _previous: f32) {
        // The footer side is not drawn by this header.
        if current >= 0.0 {
            self.offset.set(current);
        }
    }

    fn status_changed(&self, status: PullStatus) {
        let previous = self.status.replace(status);
        match status {
            PullStatus::LoosenRefresh | PullStatus::LoosenLoad => {
                self.rotate_arrow_to(ARROW_FLIPPED_DEGREES)
            }
            PullStatus::Normal if previous.is_loosened() => self.rotate_arrow_to(0.0),
            PullStatus::Normal => {}
            PullStatus::Refreshing | PullStatus::Loading => {
                self.arrow.cancel();
                self.arrow_rotation.set(0.0);
            }
        }
    }
}

impl std::fmt::Debug for NormalHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalHeader")
            .field("extent", &self.extent)
            .field("offset", &self.offset.get())
            .field("status", &self.status.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pullrefresh_core::{Runtime, NANOS_PER_MILLI};

    #[test]
    fn background_slides_while_header_is_partially_revealed() {
        let runtime = Runtime::new();
        let header = NormalHeader::new(runtime.handle(), 100.0).with_indicator_top(30.0);
        header.offset_changed(40.0, 0.0);

        let frame = header.frame();
        assert_eq!(frame.header_top, 0.0);
        assert_eq!(frame.background_top, -60.0);
        assert_eq!(frame.indicator_top, -30.0);
        assert!((frame.revealed_fraction - 0.4).abs() < 1e-6);
    }

    #[test]
    fn header_follows_content_past_its_extent() {
        let runtime = Runtime::new();
        let header = NormalHeader::new(runtime.handle(), 100.0).with_indicator_top(30.0);
        header.offset_changed(130.0, 120.0);

        let frame = header.frame();
        assert_eq!(frame.header_top, 30.0);
        assert_eq!(frame.background_top, 0.0);
        assert_eq!(frame.indicator_top, 30.0);
        assert_eq!(frame.revealed_fraction, 1.0);
    }

    #[test]
    fn indicator_is_pinned_while_refreshing() {
        let runtime = Runtime::new();
        let header = NormalHeader::new(runtime.handle(), 100.0).with_indicator_top(30.0);
        header.status_changed(PullStatus::Refreshing);
        header.offset_changed(20.0, 100.0);

        let frame = header.frame();
        assert_eq!(frame.indicator_top, 30.0);
        assert!(frame.progress_visible);
        assert!(!frame.arrow_visible);
        assert_eq!(header.label(), "Refreshing...");
    }

    #[test]
    fn negative_offsets_are_ignored() {
        let runtime = Runtime::new();
        let header = NormalHeader::new(runtime.handle(), 100.0);
        header.offset_changed(50.0, 0.0);
        header.offset_changed(-20.0, 50.0);
        assert_eq!(header.frame().background_top, -50.0);
    }

    #[test]
    fn arrow_flips_when_loosened_and_back_when_normal() {
        let runtime = Runtime::new();
        let header = NormalHeader::new(runtime.handle(), 100.0);

        header.status_changed(PullStatus::LoosenRefresh);
        assert!(header.is_arrow_animating());
        for frame in 1..=20 {
            runtime.advance_to(frame * 16 * NANOS_PER_MILLI);
        }
        assert_eq!(header.frame().arrow_rotation, -180.0);
        assert_eq!(header.label(), "Release to refresh");

        header.status_changed(PullStatus::Normal);
        for frame in 21..=40 {
            runtime.advance_to(frame * 16 * NANOS_PER_MILLI);
        }
        assert_eq!(header.frame().arrow_rotation, 0.0);
        assert!(!header.is_arrow_animating());
    }
}
