//! Extent computation from probed slot heights.

use crate::probe::SlotHeights;

/// Fallback status-bar allowance when no safe-area inset is reported.
const FALLBACK_STATUS_BAR: f32 = 30.0;

/// Fixed allowance above the sheet (notch padding, grab affordance) kept
/// clear of the expanded body.
const CHROME_PADDING: f32 = 27.0;

/// The two canonical extents the sheet snaps between. Immutable between
/// geometry recomputes; `0 <= min_extent <= max_extent` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    /// Collapsed height: header plus footer.
    pub min_extent: f32,
    /// Expanded height: collapsed height plus the capped body.
    pub max_extent: f32,
}

impl Extents {
    pub fn range(&self) -> f32 {
        self.max_extent - self.min_extent
    }
}

/// Everything the resolver consumes. All values are opaque numbers from the
/// host; nothing here re-queries the platform.
#[derive(Debug, Clone, Copy)]
pub struct GeometryInputs {
    pub heights: SlotHeights,
    /// Caller-supplied cap on the body's visible height; `None` derives one
    /// from the viewport.
    pub body_cap: Option<f32>,
    /// Safe-area top inset in pixels, zero when unknown.
    pub safe_area_inset: f32,
    /// Viewport height, read once at mount.
    pub viewport_height: f32,
}

/// Vertical space reserved for status-bar/notch chrome. Pure function of
/// the inset; the inset itself is an external input.
pub fn reserved_chrome(safe_area_inset: f32) -> f32 {
    let status_bar = if safe_area_inset > 0.0 {
        safe_area_inset
    } else {
        FALLBACK_STATUS_BAR
    };
    status_bar + CHROME_PADDING
}

/// Computes the snap extents. Every term is clamped non-negative and
/// `max_extent` is floored at `min_extent`, so a degenerate cap (smaller
/// than the header) can never invert the drag range.
pub fn resolve_extents(inputs: &GeometryInputs) -> Extents {
    let header = inputs.heights.header.max(0.0);
    let body = inputs.heights.body.max(0.0);
    let footer = inputs.heights.footer.max(0.0);

    let min_extent = header + footer;

    let derived_cap =
        (inputs.viewport_height - reserved_chrome(inputs.safe_area_inset) - footer).max(0.0);
    let body_cap = inputs.body_cap.unwrap_or(derived_cap).max(0.0);

    let max_extent = min_extent + body.min(body_cap);

    Extents {
        min_extent,
        max_extent: max_extent.max(min_extent),
    }
}
