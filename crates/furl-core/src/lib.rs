//! Core runtime for the furl sheet engine.
//!
//! Everything here is single-threaded and event-driven: one [`Runtime`] per
//! UI loop, pumped by the host, with one-shot frame callbacks layered into a
//! [`FrameClock`] for the animation driver.

mod frame_clock;
mod runtime;
mod timer;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{FrameCallbackId, Runtime};
pub use timer::FrameTimer;
