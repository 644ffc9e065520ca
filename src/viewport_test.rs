#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::consts::{MAX_SCALE, MIN_SCALE, ZOOM_STEP};
use crate::geom::{Rect, Size};

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Defaults ---

#[test]
fn default_viewport_is_identity() {
    let vp = Viewport::new();
    assert!(approx_eq(vp.scale(), 1.0));
    assert!(point_approx_eq(vp.translate(), Point::ORIGIN));
    assert_eq!(vp.mode(), ViewportMode::Idle);
    assert!(!vp.is_dragging());
}

#[test]
fn default_limits_and_tunables() {
    let vp = Viewport::new();
    assert_eq!(vp.min_scale(), MIN_SCALE);
    assert_eq!(vp.max_scale(), MAX_SCALE);
    assert_eq!(vp.zoom_step, ZOOM_STEP);
    assert_eq!(vp.wheel_pan_speed, 1.0);
}

#[test]
fn identity_viewport_maps_screen_to_world_unchanged() {
    let vp = Viewport::new();
    let p = Point::new(123.0, -45.0);
    assert!(point_approx_eq(vp.screen_to_world(p), p));
    assert!(point_approx_eq(vp.world_to_screen(p), p));
}

// --- Coordinate conversion ---

#[test]
fn screen_to_world_subtracts_translate_then_divides() {
    let mut vp = Viewport::new();
    vp.set_translate(Point::new(100.0, 50.0));
    vp.set_scale(2.0);
    // (300 - 100) / 2 = 100, (250 - 50) / 2 = 100
    let w = vp.screen_to_world(Point::new(300.0, 250.0));
    assert!(approx_eq(w.x, 100.0));
    assert!(approx_eq(w.y, 100.0));
}

#[test]
fn world_to_screen_multiplies_then_adds_translate() {
    let mut vp = Viewport::new();
    vp.set_translate(Point::new(-40.0, 10.0));
    vp.set_scale(0.5);
    // 80 * 0.5 - 40 = 0, 20 * 0.5 + 10 = 20
    let s = vp.world_to_screen(Point::new(80.0, 20.0));
    assert!(approx_eq(s.x, 0.0));
    assert!(approx_eq(s.y, 20.0));
}

#[test]
fn conversions_round_trip() {
    let mut vp = Viewport::new();
    vp.set_translate(Point::new(17.0, -260.5));
    vp.set_scale(3.25);
    let s = Point::new(412.0, 97.0);
    assert!(point_approx_eq(vp.world_to_screen(vp.screen_to_world(s)), s));
    let w = Point::new(-8.0, 1234.0);
    assert!(point_approx_eq(vp.screen_to_world(vp.world_to_screen(w)), w));
}

#[test]
fn screen_dist_to_world_divides_by_scale() {
    let mut vp = Viewport::new();
    vp.set_scale(4.0);
    assert!(approx_eq(vp.screen_dist_to_world(10.0), 2.5));
}

#[test]
fn visible_world_rect_covers_the_viewport() {
    let mut vp = Viewport::new();
    vp.set_translate(Point::new(100.0, 50.0));
    vp.set_scale(2.0);
    let r = vp.visible_world_rect(Size::new(800.0, 600.0));
    assert!(approx_eq(r.x, -50.0));
    assert!(approx_eq(r.y, -25.0));
    assert!(approx_eq(r.width, 400.0));
    assert!(approx_eq(r.height, 300.0));
}

// --- set_scale / set_translate ---

#[test]
fn set_translate_moves_the_view() {
    let mut vp = Viewport::new();
    vp.set_translate(Point::new(12.0, -7.5));
    assert!(point_approx_eq(vp.translate(), Point::new(12.0, -7.5)));
}

#[test]
fn set_scale_leaves_translate_alone() {
    let mut vp = Viewport::new();
    vp.set_translate(Point::new(10.0, 20.0));
    vp.set_scale(3.0);
    assert!(approx_eq(vp.scale(), 3.0));
    assert!(point_approx_eq(vp.translate(), Point::new(10.0, 20.0)));
}

#[test]
fn set_scale_clamps_low() {
    let mut vp = Viewport::new();
    vp.set_scale(0.0001);
    assert!(approx_eq(vp.scale(), MIN_SCALE));
}

#[test]
fn set_scale_clamps_high() {
    let mut vp = Viewport::new();
    vp.set_scale(1000.0);
    assert!(approx_eq(vp.scale(), MAX_SCALE));
}

#[test]
fn scale_stays_clamped_through_mixed_operations() {
    let mut vp = Viewport::new();
    let origin = Point::new(400.0, 300.0);
    vp.set_scale(55.0);
    assert!(vp.scale() <= vp.max_scale());
    vp.zoom_by(1e-9, origin);
    assert!(vp.scale() >= vp.min_scale());
    vp.wheel_zoom(-10_000.0, origin);
    assert!(vp.scale() <= vp.max_scale());
    vp.wheel_zoom(10_000.0, origin);
    assert!(vp.scale() >= vp.min_scale());
    vp.zoom_by(1e9, origin);
    assert!((vp.min_scale()..=vp.max_scale()).contains(&vp.scale()));
}

// --- Anchored zoom ---

#[test]
fn zoom_by_doubles_scale_about_the_anchor() {
    let mut vp = Viewport::new();
    vp.zoom_by(2.0, Point::new(100.0, 100.0));
    assert!(approx_eq(vp.scale(), 2.0));
    // world (100, 100) was under the cursor; keeping it there needs
    // translate = 100 - 100 * 2 = -100 on each axis
    assert!(point_approx_eq(vp.translate(), Point::new(-100.0, -100.0)));
}

#[test]
fn zoom_by_keeps_the_anchored_world_point_fixed() {
    let mut vp = Viewport::new();
    vp.set_translate(Point::new(-33.0, 81.0));
    vp.set_scale(1.7);
    let origin = Point::new(250.0, 140.0);
    let before = vp.screen_to_world(origin);
    vp.zoom_by(1.6, origin);
    let after = vp.screen_to_world(origin);
    assert!(point_approx_eq(before, after));
}

#[test]
fn zoom_by_anchors_even_when_clamped() {
    let mut vp = Viewport::new();
    let origin = Point::new(320.0, 200.0);
    let before = vp.screen_to_world(origin);
    vp.zoom_by(100.0, origin);
    assert!(approx_eq(vp.scale(), MAX_SCALE));
    assert!(point_approx_eq(vp.screen_to_world(origin), before));
}

#[test]
fn set_scale_anchored_same_scale_is_identity() {
    let mut vp = Viewport::new();
    vp.set_translate(Point::new(40.0, -9.0));
    vp.set_scale(2.0);
    vp.set_scale_anchored(2.0, Point::new(77.0, 31.0));
    assert!(approx_eq(vp.scale(), 2.0));
    assert!(point_approx_eq(vp.translate(), Point::new(40.0, -9.0)));
}

// --- Wheel zoom ---

#[test]
fn wheel_zoom_one_notch_up_multiplies_by_zoom_step() {
    let mut vp = Viewport::new();
    vp.wheel_zoom(-53.0, Point::ORIGIN);
    assert!(approx_eq(vp.scale(), ZOOM_STEP));
}

#[test]
fn wheel_zoom_one_notch_down_divides_by_zoom_step() {
    let mut vp = Viewport::new();
    vp.wheel_zoom(53.0, Point::ORIGIN);
    assert!(approx_eq(vp.scale(), 1.0 / ZOOM_STEP));
}

#[test]
fn wheel_zoom_fractional_delta_scales_smoothly() {
    let mut vp = Viewport::new();
    vp.wheel_zoom(-26.5, Point::ORIGIN);
    assert!(approx_eq(vp.scale(), ZOOM_STEP.powf(0.5)));
}

#[test]
fn wheel_zoom_zero_delta_is_identity() {
    let mut vp = Viewport::new();
    vp.set_translate(Point::new(5.0, 6.0));
    vp.wheel_zoom(0.0, Point::new(100.0, 100.0));
    assert!(approx_eq(vp.scale(), 1.0));
    assert!(point_approx_eq(vp.translate(), Point::new(5.0, 6.0)));
}

#[test]
fn wheel_zoom_preserves_world_point_under_cursor() {
    let mut vp = Viewport::new();
    vp.set_translate(Point::new(50.0, -30.0));
    vp.set_scale(1.4);
    let cursor = Point::new(200.0, 150.0);
    let before = vp.screen_to_world(cursor);
    vp.wheel_zoom(-53.0, cursor);
    assert!(point_approx_eq(vp.screen_to_world(cursor), before));
}

#[test]
fn wheel_zoom_clamps_at_limits() {
    let mut vp = Viewport::new();
    vp.wheel_zoom(-5300.0, Point::ORIGIN);
    assert!(approx_eq(vp.scale(), MAX_SCALE));
    vp.wheel_zoom(10_600.0, Point::ORIGIN);
    assert!(approx_eq(vp.scale(), MIN_SCALE));
}

#[test]
fn wheel_zoom_honors_custom_zoom_step() {
    let mut vp = Viewport::new();
    vp.zoom_step = 2.0;
    vp.wheel_zoom(-53.0, Point::ORIGIN);
    assert!(approx_eq(vp.scale(), 2.0));
}

// --- Wheel pan ---

#[test]
fn wheel_pan_shifts_translate_by_deltas() {
    let mut vp = Viewport::new();
    vp.wheel_pan(7.0, -3.0);
    assert!(point_approx_eq(vp.translate(), Point::new(7.0, -3.0)));
}

#[test]
fn wheel_pan_applies_speed_multiplier() {
    let mut vp = Viewport::new();
    vp.wheel_pan_speed = 2.5;
    vp.wheel_pan(10.0, 4.0);
    assert!(point_approx_eq(vp.translate(), Point::new(25.0, 10.0)));
}

#[test]
fn wheel_pan_is_screen_space_regardless_of_scale() {
    let mut vp = Viewport::new();
    vp.set_scale(4.0);
    vp.wheel_pan(10.0, 0.0);
    assert!(point_approx_eq(vp.translate(), Point::new(10.0, 0.0)));
}

#[test]
fn wheel_pan_accumulates() {
    let mut vp = Viewport::new();
    vp.wheel_pan(3.0, 1.0);
    vp.wheel_pan(-1.0, 2.0);
    assert!(point_approx_eq(vp.translate(), Point::new(2.0, 3.0)));
}

// --- Drag panning ---

#[test]
fn pan_move_applies_delta_from_anchor() {
    let mut vp = Viewport::new();
    vp.set_translate(Point::new(5.0, 7.0));
    vp.pan_start(Point::new(10.0, 10.0), ViewportMode::Panning);
    assert_eq!(vp.mode(), ViewportMode::Panning);
    assert!(vp.is_dragging());
    vp.pan_move(Point::new(40.0, 25.0));
    // cursor moved (+30, +15) so translate does too
    assert!(point_approx_eq(vp.translate(), Point::new(35.0, 22.0)));
}

#[test]
fn pan_move_is_a_pure_function_of_the_anchor() {
    let mut vp = Viewport::new();
    vp.pan_start(Point::new(10.0, 10.0), ViewportMode::Panning);
    vp.pan_move(Point::new(40.0, 25.0));
    vp.pan_move(Point::new(40.0, 25.0));
    // repeating the same cursor position must not accumulate drift
    assert!(point_approx_eq(vp.translate(), Point::new(30.0, 15.0)));
    vp.pan_move(Point::new(20.0, 15.0));
    assert!(point_approx_eq(vp.translate(), Point::new(10.0, 5.0)));
}

#[test]
fn pan_end_returns_to_idle_and_clears_anchors() {
    let mut vp = Viewport::new();
    vp.pan_start(Point::new(10.0, 10.0), ViewportMode::Panning);
    vp.pan_move(Point::new(40.0, 25.0));
    vp.pan_end();
    assert_eq!(vp.mode(), ViewportMode::Idle);
    assert!(!vp.is_dragging());
    let settled = vp.translate();
    vp.pan_move(Point::new(500.0, 500.0));
    assert!(point_approx_eq(vp.translate(), settled));
}

#[test]
fn pan_start_requires_idle_mode() {
    let mut vp = Viewport::new();
    vp.pan_start(Point::new(10.0, 10.0), ViewportMode::Panning);
    vp.pan_start(Point::new(900.0, 900.0), ViewportMode::Panning);
    vp.pan_move(Point::new(40.0, 25.0));
    // the second start was ignored, so deltas are still from (10, 10)
    assert!(point_approx_eq(vp.translate(), Point::new(30.0, 15.0)));
}

#[test]
fn pan_start_with_idle_mode_is_rejected() {
    let mut vp = Viewport::new();
    vp.pan_start(Point::new(10.0, 10.0), ViewportMode::Idle);
    assert_eq!(vp.mode(), ViewportMode::Idle);
    assert!(!vp.is_dragging());
}

#[test]
fn pan_start_shift_variant_enters_shift_panning() {
    let mut vp = Viewport::new();
    vp.pan_start(Point::new(0.0, 0.0), ViewportMode::ShiftPanning);
    assert_eq!(vp.mode(), ViewportMode::ShiftPanning);
    assert!(vp.is_dragging());
}

#[test]
fn pan_move_without_a_drag_is_a_noop() {
    let mut vp = Viewport::new();
    vp.set_translate(Point::new(1.0, 2.0));
    vp.pan_move(Point::new(300.0, 300.0));
    assert!(point_approx_eq(vp.translate(), Point::new(1.0, 2.0)));
}

#[test]
fn pan_end_without_a_drag_is_a_noop() {
    let mut vp = Viewport::new();
    vp.pan_end();
    assert_eq!(vp.mode(), ViewportMode::Idle);
}

#[test]
fn zoom_during_drag_does_not_disturb_the_anchor() {
    let mut vp = Viewport::new();
    vp.pan_start(Point::new(100.0, 100.0), ViewportMode::Panning);
    vp.pan_move(Point::new(120.0, 100.0));
    vp.wheel_zoom(-53.0, Point::new(100.0, 100.0));
    // next move still measures from the original anchor and start translate
    vp.pan_move(Point::new(130.0, 100.0));
    assert!(point_approx_eq(vp.translate(), Point::new(30.0, 0.0)));
    assert!(vp.is_dragging());
}

// --- Hand tool ---

#[test]
fn hand_tool_enable_arms_shift_panning_from_idle() {
    let mut vp = Viewport::new();
    vp.hand_tool_enable();
    assert_eq!(vp.mode(), ViewportMode::ShiftPanning);
    assert!(!vp.is_dragging());
}

#[test]
fn hand_tool_enable_does_not_override_an_active_pan() {
    let mut vp = Viewport::new();
    vp.pan_start(Point::new(10.0, 10.0), ViewportMode::Panning);
    vp.hand_tool_enable();
    assert_eq!(vp.mode(), ViewportMode::Panning);
    vp.pan_move(Point::new(15.0, 10.0));
    assert!(point_approx_eq(vp.translate(), Point::new(5.0, 0.0)));
}

#[test]
fn hand_tool_disable_disarms_an_armed_hand_tool() {
    let mut vp = Viewport::new();
    vp.hand_tool_enable();
    vp.hand_tool_disable();
    assert_eq!(vp.mode(), ViewportMode::Idle);
}

#[test]
fn hand_tool_disable_ends_a_shift_drag_in_progress() {
    let mut vp = Viewport::new();
    vp.pan_start(Point::new(10.0, 10.0), ViewportMode::ShiftPanning);
    vp.pan_move(Point::new(30.0, 10.0));
    vp.hand_tool_disable();
    assert_eq!(vp.mode(), ViewportMode::Idle);
    assert!(!vp.is_dragging());
    vp.pan_move(Point::new(999.0, 999.0));
    assert!(point_approx_eq(vp.translate(), Point::new(20.0, 0.0)));
}

#[test]
fn hand_tool_disable_leaves_a_plain_pan_alone() {
    let mut vp = Viewport::new();
    vp.pan_start(Point::new(10.0, 10.0), ViewportMode::Panning);
    vp.hand_tool_disable();
    assert_eq!(vp.mode(), ViewportMode::Panning);
    assert!(vp.is_dragging());
}

#[test]
fn armed_hand_tool_ignores_pan_move() {
    let mut vp = Viewport::new();
    vp.hand_tool_enable();
    vp.pan_move(Point::new(50.0, 50.0));
    assert!(point_approx_eq(vp.translate(), Point::ORIGIN));
}

// --- Centering and fitting ---

#[test]
fn center_on_world_maps_the_point_to_the_target() {
    let mut vp = Viewport::new();
    vp.set_scale(2.0);
    vp.center_on_world(Point::new(30.0, 40.0), Point::new(400.0, 300.0));
    assert!(point_approx_eq(vp.translate(), Point::new(340.0, 220.0)));
    let s = vp.world_to_screen(Point::new(30.0, 40.0));
    assert!(point_approx_eq(s, Point::new(400.0, 300.0)));
}

#[test]
fn center_on_world_at_origin_target() {
    let mut vp = Viewport::new();
    vp.set_scale(0.5);
    vp.center_on_world(Point::new(100.0, 60.0), Point::ORIGIN);
    assert!(point_approx_eq(vp.translate(), Point::new(-50.0, -30.0)));
}

#[test]
fn zoom_to_fit_frames_bounds_with_padding() {
    let mut vp = Viewport::new();
    vp.zoom_to_fit(
        Rect::new(0.0, 0.0, 200.0, 100.0),
        Size::new(1000.0, 500.0),
        50.0,
    );
    // available 900 x 400, so scale = min(900/200, 400/100) = 4
    assert!(approx_eq(vp.scale(), 4.0));
    // bounds midpoint (100, 50) lands on the viewport midpoint (500, 250)
    assert!(point_approx_eq(vp.translate(), Point::new(100.0, 50.0)));
    let mid = vp.world_to_screen(Point::new(100.0, 50.0));
    assert!(point_approx_eq(mid, Point::new(500.0, 250.0)));
}

#[test]
fn zoom_to_fit_limits_by_the_tighter_axis() {
    let mut vp = Viewport::new();
    vp.zoom_to_fit(
        Rect::new(0.0, 0.0, 1800.0, 100.0),
        Size::new(1000.0, 500.0),
        50.0,
    );
    // width is the constraint: 900 / 1800 = 0.5
    assert!(approx_eq(vp.scale(), 0.5));
    let right = vp.world_to_screen(Point::new(1800.0, 50.0));
    assert!(approx_eq(right.x, 950.0));
    let left = vp.world_to_screen(Point::new(0.0, 50.0));
    assert!(approx_eq(left.x, 50.0));
}

#[test]
fn zoom_to_fit_centers_offset_bounds() {
    let mut vp = Viewport::new();
    vp.zoom_to_fit(
        Rect::new(-50.0, -25.0, 200.0, 100.0),
        Size::new(1000.0, 500.0),
        50.0,
    );
    assert!(approx_eq(vp.scale(), 4.0));
    let mid = vp.world_to_screen(Point::new(50.0, 25.0));
    assert!(point_approx_eq(mid, Point::new(500.0, 250.0)));
}

#[test]
fn zoom_to_fit_clamps_to_max_scale_for_tiny_content() {
    let mut vp = Viewport::new();
    vp.zoom_to_fit(Rect::new(0.0, 0.0, 1.0, 1.0), Size::new(1000.0, 500.0), 50.0);
    assert!(approx_eq(vp.scale(), MAX_SCALE));
    let mid = vp.world_to_screen(Point::new(0.5, 0.5));
    assert!(point_approx_eq(mid, Point::new(500.0, 250.0)));
}

#[test]
fn zoom_to_fit_clamps_to_min_scale_for_huge_content() {
    let mut vp = Viewport::new();
    vp.zoom_to_fit(
        Rect::new(0.0, 0.0, 1e6, 1e6),
        Size::new(1000.0, 500.0),
        50.0,
    );
    assert!(approx_eq(vp.scale(), MIN_SCALE));
}

#[test]
fn zoom_to_fit_handles_zero_extent_bounds() {
    let mut vp = Viewport::new();
    vp.zoom_to_fit(
        Rect::new(10.0, 20.0, 0.0, 0.0),
        Size::new(1000.0, 500.0),
        50.0,
    );
    // degenerate extents floor out, so the scale clamps high and the
    // single point is centered
    assert!(approx_eq(vp.scale(), MAX_SCALE));
    let mid = vp.world_to_screen(Point::new(10.0, 20.0));
    assert!(point_approx_eq(mid, Point::new(500.0, 250.0)));
}

// --- Reset and restore ---

#[test]
fn reset_view_restores_the_identity_placement() {
    let mut vp = Viewport::new();
    vp.set_translate(Point::new(400.0, -90.0));
    vp.zoom_by(3.0, Point::new(50.0, 50.0));
    vp.pan_start(Point::new(0.0, 0.0), ViewportMode::Panning);
    vp.reset_view();
    assert!(approx_eq(vp.scale(), 1.0));
    assert!(point_approx_eq(vp.translate(), Point::ORIGIN));
    assert_eq!(vp.mode(), ViewportMode::Idle);
    assert!(!vp.is_dragging());
}

#[test]
fn reset_view_keeps_scale_limits() {
    let mut vp = Viewport::new();
    vp.set_scale_limits(0.5, 2.0);
    vp.reset_view();
    vp.set_scale(0.2);
    assert!(approx_eq(vp.scale(), 0.5));
}

#[test]
fn reset_view_keeps_tunables() {
    let mut vp = Viewport::new();
    vp.zoom_step = 1.5;
    vp.wheel_pan_speed = 3.0;
    vp.reset_view();
    assert_eq!(vp.zoom_step, 1.5);
    assert_eq!(vp.wheel_pan_speed, 3.0);
}

#[test]
fn restore_loads_a_persisted_placement() {
    let mut vp = Viewport::new();
    vp.restore(2.5, Point::new(12.0, -34.0));
    assert!(approx_eq(vp.scale(), 2.5));
    assert!(point_approx_eq(vp.translate(), Point::new(12.0, -34.0)));
}

#[test]
fn restore_clamps_out_of_range_scale() {
    let mut vp = Viewport::new();
    vp.restore(100.0, Point::ORIGIN);
    assert!(approx_eq(vp.scale(), MAX_SCALE));
    vp.restore(0.001, Point::ORIGIN);
    assert!(approx_eq(vp.scale(), MIN_SCALE));
}

#[test]
fn restore_forces_idle() {
    let mut vp = Viewport::new();
    vp.pan_start(Point::new(5.0, 5.0), ViewportMode::ShiftPanning);
    vp.restore(1.0, Point::new(3.0, 4.0));
    assert_eq!(vp.mode(), ViewportMode::Idle);
    assert!(!vp.is_dragging());
    vp.pan_move(Point::new(80.0, 80.0));
    assert!(point_approx_eq(vp.translate(), Point::new(3.0, 4.0)));
}

// --- Scale limits ---

#[test]
fn set_scale_limits_swaps_reversed_bounds() {
    let mut vp = Viewport::new();
    vp.set_scale_limits(4.0, 0.5);
    assert!(approx_eq(vp.min_scale(), 0.5));
    assert!(approx_eq(vp.max_scale(), 4.0));
    vp.set_scale(8.0);
    assert!(approx_eq(vp.scale(), 4.0));
}

#[test]
fn set_scale_limits_reclamps_the_current_scale() {
    let mut vp = Viewport::new();
    vp.set_scale(6.0);
    vp.set_scale_limits(0.5, 2.0);
    assert!(approx_eq(vp.scale(), 2.0));
}

#[test]
fn set_scale_limits_floors_nonpositive_minimum() {
    let mut vp = Viewport::new();
    vp.set_scale_limits(0.0, 4.0);
    assert!(vp.min_scale() > 0.0);
    vp.set_scale(0.0);
    assert!(vp.scale() > 0.0);
}

// --- Mode helpers ---

#[test]
fn mode_is_active_for_both_pan_variants() {
    assert!(!ViewportMode::Idle.is_active());
    assert!(ViewportMode::Panning.is_active());
    assert!(ViewportMode::ShiftPanning.is_active());
}
