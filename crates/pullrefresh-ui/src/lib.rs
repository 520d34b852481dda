//! Pull-to-refresh and pull-to-load for scrollable content.
//!
//! [`PullRefreshLayout`] is the controller: feed it pointer events and pump
//! the runtime every frame, and it moves the content and header through a
//! damped drag, the loosen threshold, and the settle animations that follow.
//! The host supplies the content ([`PullContent`]), a header
//! ([`HeaderPresenter`], e.g. [`NormalHeader`]) and optionally a
//! [`PullListener`] that starts and finishes the actual refresh or load work.

mod config;
mod error;
mod gesture;
mod layout;
mod offset;
mod presenter;
mod settle;
mod status;
pub mod widgets;

pub use config::PullRefreshConfig;
pub use error::{ConfigurationError, PullRefreshError};
pub use layout::{PullRefreshLayout, WeakPullRefreshLayout};
pub use offset::OffsetModel;
pub use presenter::{HeaderPresenter, PullChild, PullContent, PullListener};
pub use settle::{SettleAnimation, SettleBounds, SettleTarget};
pub use status::{PullDirection, PullStatus};
pub use widgets::{HeaderFrame, NormalHeader};

pub use pullrefresh_foundation::{PointerEvent, PointerEventKind, PointerId, ScrollabilityOracle};
