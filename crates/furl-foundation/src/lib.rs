//! Gesture and scroll foundation for the furl sheet engine.
//!
//! Touch events, the drag-vs-scroll arbiter, impulse velocity tracking, and
//! the inner-scroll coordinator. Everything here is host-agnostic: events
//! come in as plain values, decisions come out as plain values.

pub mod drag_arbiter;
pub mod gesture_constants;
pub mod pointer;
pub mod scroll;
pub mod velocity_tracker;

pub use drag_arbiter::{ArbitrationContext, DragArbiter, DragEvent, DragPhase};
pub use gesture_constants::{DRAG_SLOP, MAX_FLING_VELOCITY, MAX_OVERSHOOT, OVERSHOOT_RESISTANCE};
pub use pointer::{TouchEvent, TouchPhase};
pub use scroll::{ScrollCoordinator, ScrollState, ScrollVerdict};
pub use velocity_tracker::VelocityTracker;
