//! Runtime services for the pull-refresh workspace.
//!
//! Everything here is single-threaded: frame callbacks, delayed timers and the
//! code they call back into all run on the host's UI thread. The host pumps the
//! runtime by calling [`Runtime::advance_to`] once per frame.

mod clock;
mod frame_clock;
mod runtime;
mod timer;

pub use clock::HostClock;
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle, TimerId};
pub use timer::TimerRegistration;

/// Nanoseconds per millisecond, used when converting timer delays.
pub const NANOS_PER_MILLI: u64 = 1_000_000;
