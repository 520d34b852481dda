//! Collaborator interfaces of the pull controller.
//!
//! Implementations take `&self`; keep mutable state in `Cell`/`RefCell`.
//! The controller never holds its own state borrowed while calling these, so
//! implementations may call back into the layout.

use crate::status::{PullDirection, PullStatus};
use pullrefresh_foundation::ScrollabilityOracle;
use std::fmt;
use std::rc::Rc;

/// The hosted scrollable content.
pub trait PullContent: ScrollabilityOracle {
    /// New top edge of the content, in container coordinates.
    fn place(&self, _top: f32) {}
}

/// Renders the header (and footer) region revealed by a pull.
pub trait HeaderPresenter {
    /// Extent the presenter measured for itself, if it knows it.
    fn measured_extent(&self) -> Option<f32> {
        None
    }

    /// Loosen threshold for a header of the given extent.
    fn distance_to_trigger(&self, header_extent: f32) -> f32 {
        header_extent
    }

    /// Offsets are relative to rest: positive reveals the header, negative
    /// the footer.
    fn offset_changed(&self, current: f32, previous: f32);

    fn status_changed(&self, status: PullStatus);
}

/// Receives semantic transitions of the pull status machine.
pub trait PullListener {
    fn on_normal(&self) {}

    fn on_loose(&self, _direction: PullDirection) {}

    fn on_refresh_requested(&self) {}

    fn on_load_requested(&self) {}
}

/// A managed child handed to [`crate::PullRefreshLayout::attach_children`].
#[derive(Clone)]
pub enum PullChild {
    Header(Rc<dyn HeaderPresenter>),
    Content(Rc<dyn PullContent>),
}

impl PullChild {
    pub fn role(&self) -> &'static str {
        match self {
            PullChild::Header(_) => "header",
            PullChild::Content(_) => "content",
        }
    }
}

impl fmt::Debug for PullChild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PullChild").field(&self.role()).finish()
    }
}
