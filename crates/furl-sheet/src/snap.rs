//! Release-time snap decision.

use crate::geometry::Extents;
use crate::options::PanelState;

/// Tuning for [`decide`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapConfig {
    /// Velocity magnitude, in px/ms, past which the release counts as a
    /// flick and position is ignored.
    pub flick_velocity_threshold: f32,
    /// Positional threshold as a fraction of the expanded extent.
    pub midpoint_ratio: f32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            flick_velocity_threshold: 0.1,
            midpoint_ratio: 0.5,
        }
    }
}

/// Pure snap policy: picks the target state for a release.
///
/// `height` is the sheet height at release, `velocity` is in px/ms with
/// negative meaning upward (opening). A flick decides by sign alone;
/// otherwise the height is compared against `max_extent * midpoint_ratio`.
/// The comparison is strict, so a release exactly at the threshold resolves
/// to Collapsed — a fixed tie-break, not floating-point chance.
pub fn decide(height: f32, velocity: f32, extents: Extents, config: SnapConfig) -> PanelState {
    if velocity.abs() >= config.flick_velocity_threshold {
        return if velocity < 0.0 {
            PanelState::Expanded
        } else {
            PanelState::Collapsed
        };
    }

    let threshold = (extents.max_extent * config.midpoint_ratio)
        .clamp(extents.min_extent, extents.max_extent);
    if height > threshold {
        PanelState::Expanded
    } else {
        PanelState::Collapsed
    }
}
