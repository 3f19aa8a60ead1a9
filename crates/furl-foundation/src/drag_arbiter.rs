//! Scroll-vs-drag arbitration for a single touch.
//!
//! One explicit tagged state machine per panel:
//!
//! ```text
//! Idle --down--> Candidate --first qualifying move--> OwnedByPanel
//!                    |                                     |
//!                    +-------------> DeferredToScroll      |
//!                    \--up/cancel--> Idle <----up/cancel---/
//! ```
//!
//! Arbitration runs once per touch, at the first move whose vertical travel
//! beats the slop and dominates the horizontal travel. After that the touch
//! either feeds the panel until release or belongs to the inner scroll for
//! its remainder.

use crate::gesture_constants::MAX_FLING_VELOCITY;
use crate::pointer::{TouchEvent, TouchPhase};
use crate::velocity_tracker::VelocityTracker;

/// Facts about the panel the arbiter needs at decision time.
#[derive(Debug, Clone, Copy)]
pub struct ArbitrationContext {
    /// The panel rests at (or within epsilon of) its expanded extent.
    pub expanded: bool,
    /// The panel rests at (or within epsilon of) its collapsed extent.
    /// Both flags false means the touch landed mid-transition.
    pub collapsed: bool,
    /// The inner scroll region sits at offset zero.
    pub scroll_at_top: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragPhase {
    Idle,
    /// Touch is down but has not qualified as a vertical drag yet.
    Candidate { down_x: f32, down_y: f32 },
    /// The panel owns the touch; deltas stream to the sheet height.
    OwnedByPanel { down_y: f32 },
    /// The inner scroll owns the touch; the panel stays out of its way.
    DeferredToScroll,
}

/// What one touch event meant for the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// Nothing for the panel to do.
    None,
    /// Arbitration granted the touch to the panel. Carries the delta of the
    /// qualifying move so no travel is lost.
    Granted { total_dy: f32 },
    /// A move while the panel owns the touch. Cumulative delta since down;
    /// positive is downward.
    Drag { total_dy: f32 },
    /// The owning touch lifted. Velocity is in px/s, negative upward,
    /// capped at the fling maximum.
    Released { total_dy: f32, velocity: f32 },
    /// Arbitration handed the touch to the inner scroll.
    Deferred,
    /// The touch ended without the panel ever owning it.
    Ended,
}

pub struct DragArbiter {
    phase: DragPhase,
    tracker: VelocityTracker,
    slop: f32,
}

impl DragArbiter {
    pub fn new(slop: f32) -> Self {
        Self {
            phase: DragPhase::Idle,
            tracker: VelocityTracker::new(),
            slop,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn owns_gesture(&self) -> bool {
        matches!(self.phase, DragPhase::OwnedByPanel { .. })
    }

    /// Feeds one touch event through the state machine. `context` is only
    /// consulted at the single arbitration point.
    pub fn on_touch(&mut self, event: &TouchEvent, context: ArbitrationContext) -> DragEvent {
        match event.phase {
            TouchPhase::Down => {
                self.tracker.reset();
                self.tracker.add_sample(event.time_ms, event.y);
                self.phase = DragPhase::Candidate {
                    down_x: event.x,
                    down_y: event.y,
                };
                DragEvent::None
            }
            TouchPhase::Move => match self.phase {
                DragPhase::Candidate { down_x, down_y } => {
                    self.tracker.add_sample(event.time_ms, event.y);
                    let dx = event.x - down_x;
                    let dy = event.y - down_y;
                    if dy.abs() <= self.slop || dy.abs() <= dx.abs() {
                        return DragEvent::None;
                    }
                    self.arbitrate(dy, down_y, context)
                }
                DragPhase::OwnedByPanel { down_y } => {
                    self.tracker.add_sample(event.time_ms, event.y);
                    DragEvent::Drag {
                        total_dy: event.y - down_y,
                    }
                }
                DragPhase::DeferredToScroll | DragPhase::Idle => DragEvent::None,
            },
            TouchPhase::Up | TouchPhase::Cancel => {
                let phase = std::mem::replace(&mut self.phase, DragPhase::Idle);
                match phase {
                    DragPhase::OwnedByPanel { down_y } => {
                        if event.phase == TouchPhase::Cancel {
                            // The system stole the touch; release where it
                            // stands with no fling.
                            return DragEvent::Released {
                                total_dy: event.y - down_y,
                                velocity: 0.0,
                            };
                        }
                        self.tracker.add_sample(event.time_ms, event.y);
                        DragEvent::Released {
                            total_dy: event.y - down_y,
                            velocity: self.tracker.calculate_velocity_with_max(MAX_FLING_VELOCITY),
                        }
                    }
                    DragPhase::Idle => DragEvent::None,
                    _ => DragEvent::Ended,
                }
            }
        }
    }

    /// The one-shot ownership decision. Positive `dy` is a downward
    /// (closing) drag.
    fn arbitrate(&mut self, dy: f32, down_y: f32, context: ArbitrationContext) -> DragEvent {
        let own = if context.expanded {
            // A downward drag over scrolled-down content belongs to the
            // scroll; everything else moves the panel.
            !(dy > 0.0 && !context.scroll_at_top)
        } else if context.collapsed {
            // Collapsed: only the opening direction reveals more content.
            // A closing drag cannot push past collapsed, so the touch is
            // parked with the scroll for its remainder.
            dy < 0.0
        } else {
            // Mid-transition (an interrupted settle): the panel takes the
            // touch in either direction.
            true
        };

        if own {
            log::trace!("drag arbitration: panel owns touch (dy={dy})");
            self.phase = DragPhase::OwnedByPanel { down_y };
            DragEvent::Granted { total_dy: dy }
        } else {
            log::trace!("drag arbitration: deferred to scroll (dy={dy})");
            self.phase = DragPhase::DeferredToScroll;
            DragEvent::Deferred
        }
    }
}

#[cfg(test)]
#[path = "tests/drag_arbiter_tests.rs"]
mod tests;
