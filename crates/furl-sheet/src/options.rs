//! Mount-time configuration.

use furl_animation::{Easing, SettleSpec};

use crate::snap::SnapConfig;

/// Which of the two snap positions the panel occupies. The transient
/// "settling" condition is observable separately through
/// `SheetController::is_settling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Collapsed,
    Expanded,
}

impl PanelState {
    pub fn opposite(self) -> Self {
        match self {
            PanelState::Collapsed => PanelState::Expanded,
            PanelState::Expanded => PanelState::Collapsed,
        }
    }
}

/// Options consumed once at mount. Viewport height and safe-area inset are
/// opaque numbers from the host; the engine never re-subscribes to them.
#[derive(Debug, Clone, Copy)]
pub struct SheetOptions {
    pub initial_state: PanelState,
    /// Cap on the body's visible height; `None` derives one from the
    /// viewport and chrome.
    pub body_cap: Option<f32>,
    pub safe_area_inset: f32,
    pub viewport_height: f32,
    /// Whether a footer slot will be supplied (and therefore measured).
    pub has_footer: bool,
    /// Flick threshold in px/ms.
    pub flick_velocity_threshold: f32,
    /// Snap threshold as a fraction of the expanded extent, in (0, 1).
    pub midpoint_ratio: f32,
    pub settle_duration_ms: u64,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            initial_state: PanelState::Collapsed,
            body_cap: None,
            safe_area_inset: 0.0,
            viewport_height: 800.0,
            has_footer: false,
            flick_velocity_threshold: 0.1,
            midpoint_ratio: 0.5,
            settle_duration_ms: 250,
        }
    }
}

impl SheetOptions {
    pub fn with_initial_state(mut self, state: PanelState) -> Self {
        self.initial_state = state;
        self
    }

    pub fn with_body_cap(mut self, cap: f32) -> Self {
        self.body_cap = Some(cap);
        self
    }

    pub fn with_safe_area_inset(mut self, inset: f32) -> Self {
        self.safe_area_inset = inset;
        self
    }

    pub fn with_viewport_height(mut self, height: f32) -> Self {
        self.viewport_height = height;
        self
    }

    pub fn with_footer(mut self) -> Self {
        self.has_footer = true;
        self
    }

    pub fn with_flick_velocity_threshold(mut self, threshold: f32) -> Self {
        self.flick_velocity_threshold = threshold;
        self
    }

    pub fn with_midpoint_ratio(mut self, ratio: f32) -> Self {
        self.midpoint_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_settle_duration_ms(mut self, duration: u64) -> Self {
        self.settle_duration_ms = duration;
        self
    }

    pub(crate) fn snap_config(&self) -> SnapConfig {
        SnapConfig {
            flick_velocity_threshold: self.flick_velocity_threshold,
            midpoint_ratio: self.midpoint_ratio,
        }
    }

    pub(crate) fn settle_spec(&self) -> SettleSpec {
        SettleSpec::new(self.settle_duration_ms, Easing::Standard)
    }
}
