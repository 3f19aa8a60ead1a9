//! The engine instance behind one mounted panel.
//!
//! `SheetController` wires the prober, geometry, drag arbiter, animated
//! height, snap policy, and scroll coordinator into a single state holder.
//! It is a cloneable handle over `Rc<RefCell<...>>` — one instance per
//! panel, all calls on the UI event loop.
//!
//! Interruption policy (explicit by design): programmatic requests arriving
//! before measurement completes are queued and replayed once on ready;
//! requests while a drag owns the gesture or a settle is in flight are
//! rejected and logged.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use furl_animation::AnimatedFloat;
use furl_core::Runtime;
use furl_foundation::{
    ArbitrationContext, DragArbiter, DragEvent, ScrollCoordinator, ScrollState, ScrollVerdict,
    TouchEvent, DRAG_SLOP, MAX_OVERSHOOT, OVERSHOOT_RESISTANCE,
};

use crate::geometry::{resolve_extents, Extents, GeometryInputs};
use crate::options::{PanelState, SheetOptions};
use crate::probe::{ContentProber, SlotKind};
use crate::snap;

/// How close the height must sit to an extent to count as resting there.
const REST_EPSILON: f32 = 2.0;

type LifecycleCallback = Rc<dyn Fn() + 'static>;

pub struct SheetController {
    inner: Rc<RefCell<ControllerInner>>,
}

struct ControllerInner {
    options: SheetOptions,
    prober: ContentProber,
    extents: Option<Extents>,
    /// Extents computed while a drag or settle was in flight; applied when
    /// the interaction ends.
    deferred_extents: Option<Extents>,
    height: AnimatedFloat,
    state: PanelState,
    arbiter: DragArbiter,
    drag_baseline: f32,
    scroll: ScrollState,
    coordinator: ScrollCoordinator,
    on_expansion: Option<LifecycleCallback>,
    on_collapse: Option<LifecycleCallback>,
    /// Programmatic request queued until measurement completes.
    pending_request: Option<PanelState>,
    dismantled: bool,
}

impl SheetController {
    /// Mounts a new engine instance. The widget is invisible and inert
    /// until every expected slot has reported a height.
    pub fn mount(runtime: Runtime, options: SheetOptions) -> Self {
        let inner = ControllerInner {
            prober: ContentProber::new(options.has_footer),
            extents: None,
            deferred_extents: None,
            height: AnimatedFloat::new(0.0, runtime),
            state: options.initial_state,
            arbiter: DragArbiter::new(DRAG_SLOP),
            drag_baseline: 0.0,
            scroll: ScrollState::default(),
            coordinator: ScrollCoordinator::default(),
            on_expansion: None,
            on_collapse: None,
            pending_request: None,
            dismantled: false,
            options,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Fired exactly once per completed, uninterrupted transition to
    /// Expanded.
    pub fn set_on_expansion(&self, callback: impl Fn() + 'static) {
        self.inner.borrow_mut().on_expansion = Some(Rc::new(callback));
    }

    /// Fired exactly once per completed, uninterrupted transition to
    /// Collapsed.
    pub fn set_on_collapse(&self, callback: impl Fn() + 'static) {
        self.inner.borrow_mut().on_collapse = Some(Rc::new(callback));
    }

    // ---- probe feed ----

    /// Reports one slot's measured natural height from the hidden render
    /// pass. The first time all expected slots are known the sheet is
    /// positioned at its initial state (no animation) and becomes
    /// interactive; any queued programmatic request replays then.
    /// Re-measurements after ready flow through the guarded geometry
    /// recompute.
    pub fn report_slot_height(&self, slot: SlotKind, height: f32) {
        let first_ready;
        let correction;
        {
            let mut inner = self.inner.borrow_mut();
            if inner.dismantled {
                return;
            }
            let was_ready = inner.prober.ready();
            if inner.prober.record(slot, height).is_some() {
                inner.recompute_geometry();
                first_ready = true;
                correction = None;
            } else {
                first_ready = false;
                correction = if was_ready {
                    inner
                        .recompute_geometry()
                        .map(|goal| (inner.height.clone(), goal))
                } else {
                    None
                };
            }
        }
        if let Some((value, goal)) = correction {
            value.snap_to(goal);
        }

        if first_ready {
            let (value, goal, pending) = {
                let mut inner = self.inner.borrow_mut();
                let extents = match inner.extents {
                    Some(extents) => extents,
                    None => return,
                };
                let goal = match inner.state {
                    PanelState::Collapsed => extents.min_extent,
                    PanelState::Expanded => extents.max_extent,
                };
                (inner.height.clone(), goal, inner.pending_request.take())
            };
            // Two-phase reveal: position without animation, then show.
            value.snap_to(goal);
            log::debug!("sheet measured; initial height {goal}");
            if let Some(target) = pending {
                self.request(target);
            }
        }
    }

    // ---- passive reads ----

    /// Measurement has completed and the sheet is interactive.
    pub fn is_ready(&self) -> bool {
        let inner = self.inner.borrow();
        !inner.dismantled && inner.prober.ready()
    }

    /// Current sheet height (the swipe-card read). Zero before ready.
    pub fn height(&self) -> f32 {
        let inner = self.inner.borrow();
        if inner.prober.ready() {
            inner.height.value()
        } else {
            0.0
        }
    }

    /// Current translate offset from fully expanded (the bottom-sheet
    /// read): `max_extent - height`. Zero before ready.
    pub fn translation_offset(&self) -> f32 {
        let inner = self.inner.borrow();
        match inner.extents {
            Some(extents) if inner.prober.ready() => extents.max_extent - inner.height.value(),
            _ => 0.0,
        }
    }

    pub fn state(&self) -> PanelState {
        self.inner.borrow().state
    }

    pub fn is_settling(&self) -> bool {
        self.inner.borrow().height.is_animating()
    }

    pub fn extents(&self) -> Option<Extents> {
        self.inner.borrow().extents
    }

    /// Handle to the inner scroll model, for hosts that let the engine own
    /// body scrolling.
    pub fn scroll_state(&self) -> ScrollState {
        self.inner.borrow().scroll.clone()
    }

    /// Observes every height change (drag frames and settle frames), for
    /// hosts mirroring the value into their own render layer.
    pub fn set_height_listener(&self, listener: impl Fn(f32) + 'static) {
        self.inner.borrow().height.set_listener(listener);
    }

    // ---- gestures ----

    /// Feeds one touch event through arbitration and, when the panel owns
    /// the touch, into the height.
    pub fn handle_touch(&self, event: &TouchEvent) {
        let verdict = {
            let mut inner = self.inner.borrow_mut();
            if inner.dismantled || !inner.prober.ready() {
                log::trace!("touch ignored: sheet not interactive");
                return;
            }
            let context = inner.arbitration_context();
            inner.arbiter.on_touch(event, context)
        };

        match verdict {
            DragEvent::Granted { total_dy } => {
                // Interrupt-and-rebase: a running settle stops and its
                // in-flight value becomes the drag baseline.
                let height = self.inner.borrow().height.clone();
                let baseline = height.stop();
                self.inner.borrow_mut().drag_baseline = baseline;
                self.apply_drag(total_dy);
            }
            DragEvent::Drag { total_dy } => self.apply_drag(total_dy),
            DragEvent::Released { velocity, .. } => self.finish_drag(velocity),
            DragEvent::Deferred | DragEvent::Ended | DragEvent::None => {}
        }
    }

    /// Tap on the header toggles the panel. Ignored while a gesture or
    /// settle is in progress, like any other programmatic request.
    pub fn header_tap(&self) {
        let target = {
            let inner = self.inner.borrow();
            if inner.dismantled {
                return;
            }
            inner.state.opposite()
        };
        self.request(target);
    }

    // ---- inner scroll feed ----

    /// Continuous scroll-offset feed from the body region.
    pub fn handle_scroll(&self, offset: f32) {
        let mut inner = self.inner.borrow_mut();
        if inner.dismantled || !inner.prober.ready() {
            return;
        }
        inner.scroll.scroll_to(offset);
        if inner.state != PanelState::Expanded || inner.height.is_animating() {
            return;
        }
        inner.coordinator.on_scroll(offset);
    }

    /// Drag-end feed from the body region. May auto-collapse the panel;
    /// the request is advisory and loses to an owned drag or a running
    /// settle.
    pub fn handle_scroll_end_drag(&self, offset: f32) {
        let collapse = {
            let mut inner = self.inner.borrow_mut();
            if inner.dismantled || !inner.prober.ready() {
                return;
            }
            inner.scroll.scroll_to(offset);
            if inner.state != PanelState::Expanded || inner.height.is_animating() {
                false
            } else if inner.arbiter.owns_gesture() {
                log::debug!("advisory collapse dropped: a drag owns the gesture");
                false
            } else {
                inner.coordinator.on_drag_end(offset) == ScrollVerdict::Collapse
            }
        };
        if collapse {
            self.settle_to_state(PanelState::Collapsed);
        }
    }

    // ---- programmatic transitions ----

    pub fn toggle(&self) {
        let target = {
            let inner = self.inner.borrow();
            if inner.dismantled {
                return;
            }
            inner.state.opposite()
        };
        self.request(target);
    }

    pub fn expand(&self) {
        self.request(PanelState::Expanded);
    }

    pub fn collapse(&self) {
        self.request(PanelState::Collapsed);
    }

    /// Replaces the body cap. Extents recompute immediately while idle,
    /// re-homing the resting height if its extent moved; during a drag or
    /// settle the new extents are parked and land at release.
    pub fn set_body_cap(&self, cap: Option<f32>) {
        let correction = {
            let mut inner = self.inner.borrow_mut();
            if inner.dismantled {
                return;
            }
            inner.options.body_cap = cap;
            inner
                .recompute_geometry()
                .map(|goal| (inner.height.clone(), goal))
        };
        if let Some((value, goal)) = correction {
            value.snap_to(goal);
        }
    }

    /// Tears the engine down: any in-flight settle stops without firing its
    /// lifecycle callback, and every later call on this handle is inert.
    pub fn dismantle(&self) {
        let height = {
            let mut inner = self.inner.borrow_mut();
            if inner.dismantled {
                return;
            }
            inner.dismantled = true;
            inner.pending_request = None;
            inner.on_expansion = None;
            inner.on_collapse = None;
            inner.height.clone()
        };
        height.stop();
    }

    // ---- internals ----

    fn request(&self, target: PanelState) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.dismantled {
                log::trace!("request ignored: sheet dismantled");
                return;
            }
            if !inner.prober.ready() {
                log::debug!("request queued until measurement completes: {target:?}");
                inner.pending_request = Some(target);
                return;
            }
            if inner.arbiter.owns_gesture() {
                log::debug!("request rejected: a drag owns the gesture");
                return;
            }
            if inner.height.is_animating() {
                log::debug!("request rejected: settle in flight");
                return;
            }
        }
        self.settle_to_state(target);
    }

    fn apply_drag(&self, total_dy: f32) {
        let (height, value) = {
            let inner = self.inner.borrow();
            let extents = match inner.extents {
                Some(extents) => extents,
                None => return,
            };
            let candidate = inner.drag_baseline - total_dy;
            (inner.height.clone(), resist(candidate, extents))
        };
        height.set_value(value);
    }

    fn finish_drag(&self, velocity_px_per_s: f32) {
        let target = {
            let mut inner = self.inner.borrow_mut();
            // A geometry recompute parked during the drag lands now, ahead
            // of the snap decision.
            if let Some(extents) = inner.deferred_extents.take() {
                inner.extents = Some(extents);
            }
            let extents = match inner.extents {
                Some(extents) => extents,
                None => return,
            };
            snap::decide(
                inner.height.value(),
                velocity_px_per_s / 1000.0,
                extents,
                inner.options.snap_config(),
            )
        };
        self.settle_to_state(target);
    }

    fn settle_to_state(&self, target: PanelState) {
        let (height, goal, spec, already_settled) = {
            let inner = self.inner.borrow();
            let extents = match inner.extents {
                Some(extents) => extents,
                None => return,
            };
            let goal = match target {
                PanelState::Collapsed => extents.min_extent,
                PanelState::Expanded => extents.max_extent,
            };
            let settled = !inner.height.is_animating()
                && inner.state == target
                && (inner.height.value() - goal).abs() < f32::EPSILON;
            (
                inner.height.clone(),
                goal,
                inner.options.settle_spec(),
                settled,
            )
        };
        if already_settled {
            // Idempotent: no movement, no callback.
            return;
        }

        let weak: Weak<RefCell<ControllerInner>> = Rc::downgrade(&self.inner);
        height.settle_to(goal, spec, move || {
            if let Some(inner) = weak.upgrade() {
                finish_transition(&inner, target);
            }
        });
    }
}

impl ControllerInner {
    fn arbitration_context(&self) -> ArbitrationContext {
        match self.extents {
            Some(extents) => {
                let height = self.height.value();
                ArbitrationContext {
                    expanded: (height - extents.max_extent).abs() < REST_EPSILON,
                    collapsed: (height - extents.min_extent).abs() < REST_EPSILON,
                    scroll_at_top: self.scroll.is_at_top(),
                }
            }
            None => ArbitrationContext {
                expanded: false,
                collapsed: true,
                scroll_at_top: true,
            },
        }
    }

    /// Recomputes extents from the current measurements and cap. While a
    /// drag owns the gesture or a settle is in flight the result is parked
    /// and applied at release, so nothing retargets under the finger or
    /// mid-animation. Returns the height to re-home to when the resting
    /// extent moved.
    fn recompute_geometry(&mut self) -> Option<f32> {
        let heights = self.prober.heights()?;
        let extents = resolve_extents(&GeometryInputs {
            heights,
            body_cap: self.options.body_cap,
            safe_area_inset: self.options.safe_area_inset,
            viewport_height: self.options.viewport_height,
        });
        if self.arbiter.owns_gesture() || self.height.is_animating() {
            self.deferred_extents = Some(extents);
            return None;
        }
        self.extents = Some(extents);
        self.deferred_extents = None;
        self.resting_correction()
    }

    /// The height the panel should sit at for its current state, when it
    /// no longer does. Only meaningful while idle.
    fn resting_correction(&self) -> Option<f32> {
        let extents = self.extents?;
        let goal = match self.state {
            PanelState::Collapsed => extents.min_extent,
            PanelState::Expanded => extents.max_extent,
        };
        if (self.height.value() - goal).abs() > f32::EPSILON {
            Some(goal)
        } else {
            None
        }
    }
}

impl Clone for SheetController {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Completion path for an uninterrupted settle: commit the state, reset the
/// scroll machinery, rehome the inner scroll, then fire the one lifecycle
/// callback outside the borrow.
fn finish_transition(inner: &Rc<RefCell<ControllerInner>>, target: PanelState) {
    let (callback, correction) = {
        let mut inner = inner.borrow_mut();
        if inner.dismantled {
            return;
        }
        inner.state = target;
        inner.coordinator.reset();
        inner.scroll.scroll_to(0.0);
        // Geometry parked during the settle lands now.
        if let Some(extents) = inner.deferred_extents.take() {
            inner.extents = Some(extents);
        }
        let correction = inner
            .resting_correction()
            .map(|goal| (inner.height.clone(), goal));
        log::debug!("sheet settled: {target:?}");
        let callback = match target {
            PanelState::Expanded => inner.on_expansion.clone(),
            PanelState::Collapsed => inner.on_collapse.clone(),
        };
        (callback, correction)
    };
    if let Some((value, goal)) = correction {
        value.snap_to(goal);
    }
    if let Some(callback) = callback {
        callback();
    }
}

/// Maps a raw drag candidate onto the height with a soft limit past either
/// extent: resistance-damped, then hard-capped.
fn resist(candidate: f32, extents: Extents) -> f32 {
    if candidate > extents.max_extent {
        let overshoot = (candidate - extents.max_extent) * OVERSHOOT_RESISTANCE;
        extents.max_extent + overshoot.min(MAX_OVERSHOOT)
    } else if candidate < extents.min_extent {
        let overshoot = (extents.min_extent - candidate) * OVERSHOOT_RESISTANCE;
        extents.min_extent - overshoot.min(MAX_OVERSHOOT)
    } else {
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTENTS: Extents = Extents {
        min_extent: 100.0,
        max_extent: 500.0,
    };

    #[test]
    fn resist_passes_in_range_values_through() {
        assert_eq!(resist(100.0, EXTENTS), 100.0);
        assert_eq!(resist(300.0, EXTENTS), 300.0);
        assert_eq!(resist(500.0, EXTENTS), 500.0);
    }

    #[test]
    fn resist_damps_overshoot_symmetrically() {
        assert_eq!(resist(600.0, EXTENTS), 510.0);
        assert_eq!(resist(0.0, EXTENTS), 90.0);
    }

    #[test]
    fn resist_caps_extreme_overshoot() {
        assert_eq!(resist(1_000_000.0, EXTENTS), 500.0 + MAX_OVERSHOOT);
        assert_eq!(resist(-1_000_000.0, EXTENTS), 100.0 - MAX_OVERSHOOT);
    }
}
