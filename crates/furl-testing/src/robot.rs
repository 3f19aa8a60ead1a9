//! Robot-style harness for driving a mounted sheet from tests.
//!
//! The robot owns the runtime, a manual clock, and lifecycle counters, and
//! exposes high-level interactions (drags, flicks, taps, scroll feeds) so
//! tests read as user stories rather than event plumbing.
//!
//! # Example
//!
//! ```
//! use furl_testing::SheetRobot;
//!
//! let mut robot = SheetRobot::mount_default();
//! robot.measure(60.0, 400.0);
//! robot.drag_header(-200.0);
//! robot.wait_for_settle();
//! ```

use std::cell::Cell;
use std::rc::Rc;

use furl_core::Runtime;
use furl_foundation::TouchEvent;
use furl_sheet::{PanelState, SheetController, SheetOptions, SlotKind};

/// Frame cadence the robot pumps at, matching a 60 Hz display.
pub const FRAME_MILLIS: i64 = 16;

/// X coordinate used for synthetic touches; the engine only cares about
/// axis dominance, not absolute position.
const TOUCH_X: f32 = 40.0;

pub struct SheetRobot {
    runtime: Runtime,
    controller: SheetController,
    now_ms: i64,
    expansions: Rc<Cell<u32>>,
    collapses: Rc<Cell<u32>>,
}

impl SheetRobot {
    /// Mounts a controller with the given options and wires lifecycle
    /// counters. The sheet is not interactive until [`measure`] is called.
    ///
    /// [`measure`]: SheetRobot::measure
    pub fn mount(options: SheetOptions) -> Self {
        let runtime = Runtime::new();
        let controller = SheetController::mount(runtime.clone(), options);

        let expansions = Rc::new(Cell::new(0));
        let collapses = Rc::new(Cell::new(0));
        {
            let expansions = Rc::clone(&expansions);
            controller.set_on_expansion(move || expansions.set(expansions.get() + 1));
        }
        {
            let collapses = Rc::clone(&collapses);
            controller.set_on_collapse(move || collapses.set(collapses.get() + 1));
        }

        Self {
            runtime,
            controller,
            now_ms: 0,
            expansions,
            collapses,
        }
    }

    /// Mounts with default options: collapsed, no footer, 800 px viewport.
    pub fn mount_default() -> Self {
        Self::mount(SheetOptions::default())
    }

    pub fn controller(&self) -> &SheetController {
        &self.controller
    }

    pub fn expansion_count(&self) -> u32 {
        self.expansions.get()
    }

    pub fn collapse_count(&self) -> u32 {
        self.collapses.get()
    }

    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    // ---- measurement ----

    /// Feeds header and body heights, completing the hidden measurement
    /// pass for a footerless sheet.
    pub fn measure(&mut self, header: f32, body: f32) {
        self.controller.report_slot_height(SlotKind::Header, header);
        self.controller.report_slot_height(SlotKind::Body, body);
    }

    /// Feeds all three slot heights for a sheet mounted with a footer.
    pub fn measure_with_footer(&mut self, header: f32, body: f32, footer: f32) {
        self.controller.report_slot_height(SlotKind::Header, header);
        self.controller.report_slot_height(SlotKind::Body, body);
        self.controller.report_slot_height(SlotKind::Footer, footer);
    }

    // ---- clock ----

    /// Advances the manual clock without delivering a frame.
    pub fn advance_millis(&mut self, millis: i64) {
        self.now_ms += millis;
    }

    /// Advances one frame interval and drains the runtime's frame
    /// callbacks at the new time.
    pub fn pump_frame(&mut self) {
        self.now_ms += FRAME_MILLIS;
        self.runtime
            .drain_frame_callbacks(self.now_ms as u64 * 1_000_000);
    }

    pub fn pump_frames(&mut self, count: u32) {
        for _ in 0..count {
            self.pump_frame();
        }
    }

    /// Pumps frames until no settle is in flight. Panics if the sheet is
    /// still moving after a generous frame budget, which signals a stuck
    /// animation rather than a slow one.
    pub fn wait_for_settle(&mut self) {
        for _ in 0..240 {
            if !self.controller.is_settling() && !self.runtime.has_frame_callbacks() {
                return;
            }
            self.pump_frame();
        }
        panic!("sheet never settled: state {:?}", self.controller.state());
    }

    // ---- touch ----

    pub fn touch_down(&mut self, y: f32) {
        let event = TouchEvent::down(TOUCH_X, y, self.now_ms);
        self.controller.handle_touch(&event);
    }

    /// Moves the active touch, advancing the clock one frame per move.
    pub fn touch_move(&mut self, y: f32) {
        self.now_ms += FRAME_MILLIS;
        let event = TouchEvent::moved(TOUCH_X, y, self.now_ms);
        self.controller.handle_touch(&event);
    }

    pub fn touch_up(&mut self, y: f32) {
        let event = TouchEvent::up(TOUCH_X, y, self.now_ms);
        self.controller.handle_touch(&event);
    }

    pub fn touch_cancel(&mut self, y: f32) {
        let event = TouchEvent::cancel(TOUCH_X, y, self.now_ms);
        self.controller.handle_touch(&event);
    }

    /// Performs a slow vertical drag in ten even steps and releases.
    /// Negative `dy` moves the finger up (growing the sheet). Steps are
    /// paced beyond the tracker's assume-stopped gap, so the release
    /// velocity reads as zero and snapping is purely positional.
    pub fn drag_header(&mut self, dy: f32) {
        let start_y = 600.0;
        self.touch_down(start_y);
        let steps = 10;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.advance_millis(50 - FRAME_MILLIS);
            self.touch_move(start_y + dy * t);
        }
        self.touch_up(start_y + dy);
    }

    /// Performs a fast vertical drag: the whole travel in two moves a
    /// frame apart, producing a release velocity above any reasonable
    /// flick threshold.
    pub fn flick_header(&mut self, dy: f32) {
        let start_y = 600.0;
        self.touch_down(start_y);
        self.touch_move(start_y + dy * 0.5);
        self.touch_move(start_y + dy);
        self.touch_up(start_y + dy);
    }

    /// Taps the header, toggling the sheet.
    pub fn tap_header(&mut self) {
        self.controller.header_tap();
    }

    // ---- inner scroll ----

    pub fn scroll_body_to(&mut self, offset: f32) {
        self.controller.handle_scroll(offset);
    }

    /// Ends a body scroll drag at the given offset.
    pub fn release_body_scroll(&mut self, offset: f32) {
        self.controller.handle_scroll_end_drag(offset);
    }

    // ---- assertions ----

    pub fn assert_state(&self, expected: PanelState) {
        assert_eq!(
            self.controller.state(),
            expected,
            "sheet state mismatch at t={}ms",
            self.now_ms
        );
    }

    pub fn assert_height_near(&self, expected: f32) {
        let actual = self.controller.height();
        assert!(
            (actual - expected).abs() < 0.5,
            "sheet height {actual} not near {expected} at t={}ms",
            self.now_ms
        );
    }
}
