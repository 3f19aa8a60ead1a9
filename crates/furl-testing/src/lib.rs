//! Test harness for the furl sheet engine.

pub mod robot;

pub use robot::{SheetRobot, FRAME_MILLIS};
