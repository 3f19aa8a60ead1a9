//! End-to-end behavior of a mounted sheet, driven through the robot.
//!
//! The fixture measures a 100 px header and a 400 px body in an 800 px
//! viewport with no footer, which resolves to extents {100, 500} and a
//! positional snap threshold of 250.

use furl_sheet::{PanelState, SheetOptions};
use furl_testing::SheetRobot;

const MIN: f32 = 100.0;
const MAX: f32 = 500.0;

fn measured_robot() -> SheetRobot {
    let mut robot = SheetRobot::mount_default();
    robot.measure(100.0, 400.0);
    robot
}

fn expanded_robot() -> SheetRobot {
    let mut robot = SheetRobot::mount(
        SheetOptions::default().with_initial_state(PanelState::Expanded),
    );
    robot.measure(100.0, 400.0);
    robot
}

// ---- measurement gating ----

#[test]
fn sheet_is_inert_until_measured() {
    let mut robot = SheetRobot::mount_default();
    assert!(!robot.controller().is_ready());
    assert_eq!(robot.controller().height(), 0.0);
    assert_eq!(robot.controller().translation_offset(), 0.0);
    assert!(robot.controller().extents().is_none());

    // Gestures before measurement are swallowed whole.
    robot.touch_down(600.0);
    robot.touch_move(400.0);
    robot.touch_up(400.0);
    robot.pump_frames(4);
    assert_eq!(robot.controller().height(), 0.0);
    assert_eq!(robot.expansion_count(), 0);
}

#[test]
fn measurement_positions_initial_state_without_animation() {
    let robot = measured_robot();
    assert!(robot.controller().is_ready());
    assert!(!robot.controller().is_settling());
    robot.assert_state(PanelState::Collapsed);
    robot.assert_height_near(MIN);
    assert_eq!(robot.controller().translation_offset(), MAX - MIN);
    assert_eq!(robot.collapse_count(), 0);
}

#[test]
fn initially_expanded_sheet_rests_at_max_extent() {
    let robot = expanded_robot();
    robot.assert_height_near(MAX);
    assert_eq!(robot.controller().translation_offset(), 0.0);
    assert_eq!(robot.expansion_count(), 0);
}

#[test]
fn request_before_measurement_is_queued_and_replayed() {
    let mut robot = SheetRobot::mount_default();
    robot.controller().expand();
    assert_eq!(robot.expansion_count(), 0);

    robot.measure(100.0, 400.0);
    assert!(robot.controller().is_settling());
    robot.wait_for_settle();
    robot.assert_state(PanelState::Expanded);
    robot.assert_height_near(MAX);
    assert_eq!(robot.expansion_count(), 1);
}

#[test]
fn only_the_last_queued_request_replays() {
    let mut robot = SheetRobot::mount_default();
    robot.controller().expand();
    robot.controller().collapse();
    robot.measure(100.0, 400.0);
    // Collapsed is where the sheet already rests, so nothing moves.
    assert!(!robot.controller().is_settling());
    robot.assert_height_near(MIN);
}

// ---- drag ----

#[test]
fn drag_follows_the_finger() {
    let mut robot = measured_robot();
    robot.touch_down(600.0);
    robot.touch_move(550.0);
    robot.assert_height_near(150.0);
    robot.touch_move(450.0);
    robot.assert_height_near(250.0);
    // Reversal tracks back down without snapping.
    robot.touch_move(520.0);
    robot.assert_height_near(180.0);
    robot.touch_up(520.0);
    robot.wait_for_settle();
}

#[test]
fn drag_past_extents_is_resisted_and_capped() {
    let mut robot = expanded_robot();
    robot.touch_down(600.0);
    // 100 px past max: damped to a tenth.
    robot.touch_move(500.0);
    robot.assert_height_near(MAX + 10.0);
    // An absurd pull still never exceeds the hard overshoot cap.
    robot.touch_move(-100_000.0);
    assert!(robot.controller().height() <= MAX + 64.0 + 0.5);
    robot.touch_up(-100_000.0);
    robot.wait_for_settle();
    robot.assert_height_near(MAX);
}

#[test]
fn slow_release_above_threshold_expands() {
    let mut robot = measured_robot();
    // Collapsed at 100, dragged up 170 px to 270, past the 250 threshold.
    robot.drag_header(-170.0);
    robot.wait_for_settle();
    robot.assert_state(PanelState::Expanded);
    robot.assert_height_near(MAX);
    assert_eq!(robot.expansion_count(), 1);
}

#[test]
fn slow_release_at_or_below_threshold_collapses() {
    let mut robot = measured_robot();
    // Exactly the threshold: ties go to collapsed.
    robot.drag_header(-150.0);
    robot.assert_height_near(250.0);
    robot.wait_for_settle();
    robot.assert_state(PanelState::Collapsed);
    robot.assert_height_near(MIN);
    assert_eq!(robot.expansion_count(), 0);
}

#[test]
fn flick_up_expands_regardless_of_position() {
    let mut robot = measured_robot();
    // Barely any travel, but fast.
    robot.flick_header(-40.0);
    robot.wait_for_settle();
    robot.assert_state(PanelState::Expanded);
    assert_eq!(robot.expansion_count(), 1);
}

#[test]
fn flick_down_collapses_regardless_of_position() {
    let mut robot = expanded_robot();
    robot.flick_header(40.0);
    robot.wait_for_settle();
    robot.assert_state(PanelState::Collapsed);
    assert_eq!(robot.collapse_count(), 1);
}

#[test]
fn cancelled_touch_settles_with_zero_velocity() {
    let mut robot = measured_robot();
    robot.touch_down(600.0);
    robot.touch_move(320.0);
    robot.assert_height_near(380.0);
    robot.touch_cancel(320.0);
    // No fling is attributed to a stolen touch; 380 is past the threshold,
    // so the sheet settles open.
    assert!(robot.controller().is_settling());
    robot.wait_for_settle();
    robot.assert_state(PanelState::Expanded);
    assert_eq!(robot.expansion_count(), 1);
}

// ---- interruption and exclusivity ----

#[test]
fn touch_interrupts_a_settle_and_rebases() {
    let mut robot = measured_robot();
    robot.controller().expand();
    robot.pump_frames(6);
    let mid_flight = robot.controller().height();
    assert!(mid_flight > MIN && mid_flight < MAX);

    // Grab the sheet mid-settle and pull it back down.
    robot.touch_down(400.0);
    robot.touch_move(410.0);
    assert!(!robot.controller().is_settling());
    let grabbed = robot.controller().height();
    assert!((grabbed - (mid_flight - 10.0)).abs() < 1.0);

    robot.touch_move(700.0);
    robot.touch_up(700.0);
    robot.wait_for_settle();
    robot.assert_state(PanelState::Collapsed);
    // The interrupted expansion never completed, so only the collapse
    // callback fired.
    assert_eq!(robot.expansion_count(), 0);
    assert_eq!(robot.collapse_count(), 1);
}

#[test]
fn requests_are_rejected_while_a_settle_runs() {
    let mut robot = measured_robot();
    robot.controller().expand();
    robot.controller().collapse();
    robot.wait_for_settle();
    robot.assert_state(PanelState::Expanded);
    assert_eq!(robot.expansion_count(), 1);
    assert_eq!(robot.collapse_count(), 0);
}

#[test]
fn requests_are_rejected_while_a_drag_owns_the_touch() {
    let mut robot = measured_robot();
    robot.touch_down(600.0);
    robot.touch_move(450.0);
    robot.controller().collapse();
    assert!(!robot.controller().is_settling());
    robot.assert_height_near(250.0);
    robot.touch_up(450.0);
    robot.wait_for_settle();
}

#[test]
fn expand_when_already_expanded_is_a_no_op() {
    let mut robot = expanded_robot();
    robot.controller().expand();
    assert!(!robot.controller().is_settling());
    robot.pump_frames(4);
    assert_eq!(robot.expansion_count(), 0);
}

#[test]
fn toggle_and_header_tap_alternate_states() {
    let mut robot = measured_robot();
    robot.tap_header();
    robot.wait_for_settle();
    robot.assert_state(PanelState::Expanded);

    robot.controller().toggle();
    robot.wait_for_settle();
    robot.assert_state(PanelState::Collapsed);

    assert_eq!(robot.expansion_count(), 1);
    assert_eq!(robot.collapse_count(), 1);
}

// ---- inner scroll coordination ----

#[test]
fn scrolled_content_collapses_on_second_top_arrival() {
    let mut robot = expanded_robot();
    robot.scroll_body_to(120.0);
    robot.release_body_scroll(0.0);
    // First arrival back at the top only counts.
    robot.assert_state(PanelState::Expanded);
    assert!(!robot.controller().is_settling());

    robot.release_body_scroll(0.0);
    robot.wait_for_settle();
    robot.assert_state(PanelState::Collapsed);
    assert_eq!(robot.collapse_count(), 1);
}

#[test]
fn pull_with_nothing_to_scroll_collapses_immediately() {
    let mut robot = expanded_robot();
    robot.release_body_scroll(0.0);
    robot.wait_for_settle();
    robot.assert_state(PanelState::Collapsed);
}

#[test]
fn scroll_latch_resets_when_the_sheet_reopens() {
    let mut robot = expanded_robot();
    robot.scroll_body_to(120.0);
    robot.release_body_scroll(0.0);
    robot.release_body_scroll(0.0);
    robot.wait_for_settle();
    robot.assert_state(PanelState::Collapsed);

    robot.tap_header();
    robot.wait_for_settle();
    robot.assert_state(PanelState::Expanded);

    // Fresh latch: a drag-end at the top with no prior scroll collapses
    // right away.
    robot.release_body_scroll(0.0);
    robot.wait_for_settle();
    robot.assert_state(PanelState::Collapsed);
    assert_eq!(robot.collapse_count(), 2);
}

#[test]
fn scroll_feed_is_ignored_while_collapsed_or_settling() {
    let mut robot = measured_robot();
    robot.release_body_scroll(0.0);
    robot.pump_frames(4);
    robot.assert_state(PanelState::Collapsed);

    robot.controller().expand();
    robot.pump_frames(2);
    robot.release_body_scroll(0.0);
    robot.wait_for_settle();
    robot.assert_state(PanelState::Expanded);
    assert_eq!(robot.collapse_count(), 0);
}

#[test]
fn downward_scrolled_drag_is_deferred_to_the_body() {
    let mut robot = expanded_robot();
    robot.scroll_body_to(80.0);
    // Content is scrolled down: a downward touch drag belongs to the body,
    // not the sheet.
    robot.touch_down(300.0);
    robot.touch_move(400.0);
    robot.assert_height_near(MAX);
    robot.touch_up(400.0);
    robot.assert_state(PanelState::Expanded);
}

// ---- geometry recompute boundaries ----

#[test]
fn idle_cap_change_rehomes_the_resting_extent() {
    let robot = expanded_robot();
    robot.controller().set_body_cap(Some(150.0));
    let extents = robot.controller().extents().unwrap();
    assert_eq!(extents.min_extent, MIN);
    assert_eq!(extents.max_extent, 250.0);
    // Resting expanded, so the height follows the new max instantly.
    robot.assert_height_near(250.0);
    assert!(!robot.controller().is_settling());
}

#[test]
fn cap_change_during_drag_lands_at_release() {
    let mut robot = measured_robot();
    robot.touch_down(600.0);
    robot.touch_move(300.0);
    robot.assert_height_near(400.0);

    robot.controller().set_body_cap(Some(150.0));
    // Still the old extents under the finger.
    assert_eq!(robot.controller().extents().unwrap().max_extent, MAX);

    // Hold still long enough to shed any fling, then let go.
    robot.advance_millis(50);
    robot.touch_move(300.0);
    robot.touch_up(300.0);
    // Release applies the parked extents before snapping: 400 is above the
    // new threshold, so the sheet settles at the new max.
    robot.wait_for_settle();
    robot.assert_state(PanelState::Expanded);
    robot.assert_height_near(250.0);
    assert_eq!(robot.controller().extents().unwrap().max_extent, 250.0);
}

#[test]
fn remeasure_after_ready_updates_extents() {
    let mut robot = measured_robot();
    robot.measure(100.0, 200.0);
    let extents = robot.controller().extents().unwrap();
    assert_eq!(extents.max_extent, 300.0);
    // Collapsed rest is untouched by a body-only change.
    robot.assert_height_near(MIN);
}

// ---- teardown ----

#[test]
fn dismantled_sheet_is_inert() {
    let mut robot = measured_robot();
    robot.controller().expand();
    robot.pump_frames(4);
    robot.controller().dismantle();

    // The in-flight settle stopped and its callback will never fire.
    robot.pump_frames(30);
    assert_eq!(robot.expansion_count(), 0);
    assert!(!robot.controller().is_ready());

    robot.controller().toggle();
    robot.touch_down(600.0);
    robot.touch_move(400.0);
    robot.touch_up(400.0);
    robot.pump_frames(4);
    assert_eq!(robot.expansion_count(), 0);
    assert_eq!(robot.collapse_count(), 0);
}
