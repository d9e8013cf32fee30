//! Frame timing diagnostics.
//!
//! The render loop never sleeps or paces itself; this only counts frames and
//! reports the observed rate.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
