//! Shared gesture constants for consistent touch handling.
//!
//! Values are in logical pixels. They are fixed rather than density-scaled;
//! a platform-driven configuration can replace them if sheets ever run on
//! very high-density touch screens.

/// Vertical slop before a touch qualifies as a drag and arbitration runs.
///
/// Small enough that the sheet feels responsive to a deliberate pull, large
/// enough to absorb finger jitter that should stay a tap.
pub const DRAG_SLOP: f32 = 4.0;

/// Maximum fling velocity in logical pixels per second. Matches Android's
/// default maximum fling velocity on a baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Fraction of overshoot that survives when a drag pushes past an extent.
/// The user feels a soft limit instead of a hard stop.
pub const OVERSHOOT_RESISTANCE: f32 = 0.1;

/// Hard cap on overshoot past either extent, applied after resistance.
pub const MAX_OVERSHOOT: f32 = 64.0;
