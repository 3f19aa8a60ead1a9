//! Gesture-and-animation engine for a draggable panel that toggles
//! between a collapsed peek and an expanded sheet.
//!
//! The host renders; this crate owns the state machine: hidden-pass
//! measurement, extent geometry, drag arbitration against an inner
//! scrolling body, overshoot resistance, flick-or-midpoint snapping, and
//! the fixed-duration settle animation. `SheetController` is the single
//! entry point.

pub mod controller;
pub mod geometry;
pub mod options;
pub mod probe;
pub mod snap;

pub use controller::SheetController;
pub use geometry::{Extents, GeometryInputs};
pub use options::{PanelState, SheetOptions};
pub use probe::{SlotHeights, SlotKind};
pub use snap::SnapConfig;
