//! Inner-scroll tracking for an expanded panel.
//!
//! `ScrollState` mirrors the body region's scroll offset; the engine forces
//! it back to zero around state transitions so a reopened sheet always
//! starts at the top. `ScrollCoordinator` watches that offset and turns
//! "the user came back to the top" patterns into advisory collapse requests.

use std::cell::Cell;
use std::rc::Rc;

/// Offset the coordinator treats as "at the top".
const TOP_OFFSET: f32 = 0.0;

/// Clamped scroll offset for the panel's body region.
///
/// This is a pure scroll model: it holds no gesture state. Hosts report the
/// offsets their scroll region produces, or drive it through
/// [`ScrollState::dispatch_raw_delta`] when the engine owns the scrolling.
#[derive(Clone)]
pub struct ScrollState {
    inner: Rc<ScrollStateInner>,
}

struct ScrollStateInner {
    value: Cell<f32>,
    max_value: Cell<f32>,
}

impl ScrollState {
    pub fn new(initial: f32) -> Self {
        Self {
            inner: Rc::new(ScrollStateInner {
                value: Cell::new(initial.max(0.0)),
                max_value: Cell::new(f32::MAX),
            }),
        }
    }

    pub fn value(&self) -> f32 {
        self.inner.value.get()
    }

    pub fn max_value(&self) -> f32 {
        self.inner.max_value.get()
    }

    /// Sets the scrollable range, typically `content_height - viewport`.
    pub fn set_max_value(&self, max: f32) {
        self.inner.max_value.set(max.max(0.0));
        if self.value() > self.max_value() {
            self.inner.value.set(self.max_value());
        }
    }

    /// Scrolls by `delta`, clamped to `[0, max_value]`. Returns the amount
    /// actually consumed.
    pub fn dispatch_raw_delta(&self, delta: f32) -> f32 {
        let current = self.value();
        let new_value = (current + delta).clamp(0.0, self.max_value());
        self.inner.value.set(new_value);
        new_value - current
    }

    pub fn scroll_to(&self, offset: f32) {
        self.inner
            .value
            .set(offset.clamp(0.0, self.max_value()));
    }

    pub fn is_at_top(&self) -> bool {
        self.value() <= TOP_OFFSET
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Advisory verdict from the coordinator after a scroll drag ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollVerdict {
    None,
    /// The panel should collapse. Advisory: the engine drops it when a drag
    /// owns the gesture or a settle is already running.
    Collapse,
}

/// Latches the "scrolled away from top" fact and counts consecutive
/// drag-ends that land back at the top.
///
/// Two triggers, both only meaningful while the panel is expanded:
/// - latched, then the (N+1)-th consecutive drag-end at the top: collapse;
/// - never latched and a drag-end lands at the top (nothing to scroll):
///   collapse immediately.
pub struct ScrollCoordinator {
    has_scrolled_away_from_top: bool,
    consecutive_top_arrivals: u32,
    last_offset: f32,
    /// Top arrivals tolerated before a latched coordinator collapses.
    required_top_arrivals: u32,
}

impl ScrollCoordinator {
    pub fn new(required_top_arrivals: u32) -> Self {
        Self {
            has_scrolled_away_from_top: false,
            consecutive_top_arrivals: 0,
            last_offset: 0.0,
            required_top_arrivals,
        }
    }

    pub fn has_scrolled_away_from_top(&self) -> bool {
        self.has_scrolled_away_from_top
    }

    pub fn consecutive_top_arrivals(&self) -> u32 {
        self.consecutive_top_arrivals
    }

    /// Continuous scroll feed; latches the first movement away from the top.
    pub fn on_scroll(&mut self, offset: f32) {
        if !self.has_scrolled_away_from_top && offset > self.last_offset {
            self.has_scrolled_away_from_top = true;
            self.consecutive_top_arrivals = 0;
        }
        self.last_offset = offset;
    }

    /// Drag-end feed. May request a collapse.
    pub fn on_drag_end(&mut self, offset: f32) -> ScrollVerdict {
        // A drag that moved the content further down only (re-)latches.
        if !self.has_scrolled_away_from_top && offset > self.last_offset {
            self.has_scrolled_away_from_top = true;
            self.consecutive_top_arrivals = 0;
            self.last_offset = offset;
            return ScrollVerdict::None;
        }

        let at_top = offset <= TOP_OFFSET;
        let verdict = if at_top {
            if !self.has_scrolled_away_from_top {
                // Never left the top: the drag was a pull with nothing to
                // scroll, collapse right away.
                ScrollVerdict::Collapse
            } else if self.consecutive_top_arrivals >= self.required_top_arrivals {
                ScrollVerdict::Collapse
            } else {
                self.consecutive_top_arrivals += 1;
                ScrollVerdict::None
            }
        } else {
            self.consecutive_top_arrivals = 0;
            ScrollVerdict::None
        };

        if verdict == ScrollVerdict::Collapse {
            log::debug!("scroll coordinator: collapse requested at offset {offset}");
            self.reset();
        }
        self.last_offset = offset;
        verdict
    }

    /// Clears latch, counter, and offset memory. Called whenever the panel
    /// collapses or newly becomes expanded.
    pub fn reset(&mut self) {
        self.has_scrolled_away_from_top = false;
        self.consecutive_top_arrivals = 0;
        self.last_offset = 0.0;
    }
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
#[path = "tests/scroll_tests.rs"]
mod tests;
