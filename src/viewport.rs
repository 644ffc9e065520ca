//! Viewport state for pan/zoom on the infinite canvas.
//!
//! Owns the world-to-screen transform (`scale` plus `translate`), the
//! drag-panning state machine, and the framing operations (centering,
//! fit-to-bounds, restore). Every operation is a total state transition:
//! out-of-range scales are clamped, calls that make no sense in the current
//! mode are ignored, nothing here returns an error.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::{
    MAX_SCALE, MIN_FIT_EXTENT, MIN_SCALE, WHEEL_NOTCH_PX, WHEEL_PAN_SPEED, ZOOM_STEP,
};
use crate::geom::{Point, Rect, Size};

/// Interaction mode of the viewport.
///
/// `Panning` is the plain canvas drag; `ShiftPanning` is the hand-tool
/// variant. The two behave identically while dragging and differ only in
/// how the input layer enters and leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportMode {
    #[default]
    Idle,
    Panning,
    ShiftPanning,
}

impl ViewportMode {
    /// True for the two drag-pan modes.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Panning | Self::ShiftPanning)
    }
}

/// Pan/zoom state for the canvas viewport.
///
/// `translate` is applied after scaling: `screen = world * scale + translate`.
/// `scale` always stays within `[min_scale, max_scale]`, and the pan anchors
/// are `Some` exactly while a drag is in progress.
#[derive(Debug, Clone)]
pub struct Viewport {
    scale: f64,
    translate: Point,
    mode: ViewportMode,
    pan_start_screen: Option<Point>,
    pan_start_translate: Option<Point>,
    min_scale: f64,
    max_scale: f64,
    /// Multiplier applied to wheel deltas when scroll-panning.
    pub wheel_pan_speed: f64,
    /// Per-notch multiplier base for wheel zoom.
    pub zoom_step: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: Point::ORIGIN,
            mode: ViewportMode::Idle,
            pan_start_screen: None,
            pan_start_translate: None,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            wheel_pan_speed: WHEEL_PAN_SPEED,
            zoom_step: ZOOM_STEP,
        }
    }
}

impl Viewport {
    /// Identity viewport: scale 1, no pan, idle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Current zoom level.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current pan offset, applied after scaling.
    #[must_use]
    pub fn translate(&self) -> Point {
        self.translate
    }

    /// Current interaction mode.
    #[must_use]
    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    /// Lower bound of the scale clamp range.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Upper bound of the scale clamp range.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// True while a drag anchor is held, i.e. between a successful
    /// [`Viewport::pan_start`] and the end of that drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.pan_start_screen.is_some()
    }

    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.translate.x) / self.scale,
            y: (screen.y - self.translate.y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.translate.x,
            y: world.y * self.scale + self.translate.y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// World-space rectangle visible in a viewport of the given pixel size.
    #[must_use]
    pub fn visible_world_rect(&self, viewport_px: Size) -> Rect {
        let top_left = self.screen_to_world(Point::ORIGIN);
        let bottom_right =
            self.screen_to_world(Point::new(viewport_px.width, viewport_px.height));
        Rect::from_corners(top_left, bottom_right)
    }

    // ── Zoom and translate ──────────────────────────────────────

    /// Overwrite the pan offset.
    pub fn set_translate(&mut self, translate: Point) {
        self.translate = translate;
    }

    /// Set the scale directly, clamped to the configured range. The
    /// translate is left untouched, so content drifts relative to the
    /// screen; use [`Viewport::set_scale_anchored`] to zoom about a point.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = self.clamp_scale(scale);
    }

    /// Set the scale, keeping the world point currently under
    /// `origin_screen` visually stationary.
    pub fn set_scale_anchored(&mut self, scale: f64, origin_screen: Point) {
        let new_scale = self.clamp_scale(scale);
        let world = self.screen_to_world(origin_screen);
        self.translate = Point {
            x: origin_screen.x - world.x * new_scale,
            y: origin_screen.y - world.y * new_scale,
        };
        self.scale = new_scale;
    }

    /// Multiply the scale by `factor`, clamped, anchored at `origin_screen`.
    pub fn zoom_by(&mut self, factor: f64, origin_screen: Point) {
        self.set_scale_anchored(self.scale * factor, origin_screen);
    }

    /// Smooth wheel zoom anchored at the cursor. Wheel-up (negative
    /// `delta_y`) zooms in; one typical notch multiplies the scale by
    /// `zoom_step`.
    pub fn wheel_zoom(&mut self, delta_y: f64, origin_screen: Point) {
        let factor = self.zoom_step.powf(-delta_y / WHEEL_NOTCH_PX);
        self.zoom_by(factor, origin_screen);
    }

    /// Scroll the viewport by raw wheel deltas, scaled by
    /// `wheel_pan_speed`. Independent of the current zoom.
    pub fn wheel_pan(&mut self, delta_x: f64, delta_y: f64) {
        self.translate.x += delta_x * self.wheel_pan_speed;
        self.translate.y += delta_y * self.wheel_pan_speed;
    }

    // ── Drag panning ────────────────────────────────────────────

    /// Begin a drag pan from an idle viewport, snapshotting the screen
    /// point and current translate as the drag anchor. `mode` picks the
    /// plain or hand-tool variant; anything else is ignored, as is a call
    /// while a drag or an armed hand tool is already active.
    pub fn pan_start(&mut self, screen: Point, mode: ViewportMode) {
        if self.mode != ViewportMode::Idle || !mode.is_active() {
            return;
        }
        self.mode = mode;
        self.pan_start_screen = Some(screen);
        self.pan_start_translate = Some(self.translate);
    }

    /// Continue a drag pan. The translate is recomputed from the anchor on
    /// every move, so repeated or replayed events cannot accumulate drift.
    /// No-op when no anchored drag is in progress.
    pub fn pan_move(&mut self, screen: Point) {
        if !self.mode.is_active() {
            return;
        }
        let (Some(start_screen), Some(start_translate)) =
            (self.pan_start_screen, self.pan_start_translate)
        else {
            return;
        };
        self.translate = Point {
            x: start_translate.x + (screen.x - start_screen.x),
            y: start_translate.y + (screen.y - start_screen.y),
        };
    }

    /// End any drag pan: back to idle, both anchors dropped.
    pub fn pan_end(&mut self) {
        self.mode = ViewportMode::Idle;
        self.pan_start_screen = None;
        self.pan_start_translate = None;
    }

    /// Arm the hand tool. Only an idle viewport transitions; an active
    /// drag is never overridden.
    pub fn hand_tool_enable(&mut self) {
        if self.mode == ViewportMode::Idle {
            self.mode = ViewportMode::ShiftPanning;
        }
    }

    /// Disarm the hand tool. Ends an in-progress shift-drag, anchors
    /// included, but leaves a plain panning drag alone; that one ends via
    /// [`Viewport::pan_end`].
    pub fn hand_tool_disable(&mut self) {
        if self.mode == ViewportMode::ShiftPanning {
            self.mode = ViewportMode::Idle;
            self.pan_start_screen = None;
            self.pan_start_translate = None;
        }
    }

    // ── Framing ─────────────────────────────────────────────────

    /// Pan so that `world` lands at the screen position `to_screen`
    /// without changing the scale.
    pub fn center_on_world(&mut self, world: Point, to_screen: Point) {
        self.translate = Point {
            x: to_screen.x - world.x * self.scale,
            y: to_screen.y - world.y * self.scale,
        };
    }

    /// Frame `bounds` inside a viewport of `viewport_px` pixels, keeping
    /// `padding` pixels free on every side. Picks the largest scale that
    /// fits both axes (clamped to the configured range, never cropping)
    /// and centers the bounds midpoint. Degenerate bounds are floored to a
    /// tiny extent rather than rejected.
    pub fn zoom_to_fit(&mut self, bounds: Rect, viewport_px: Size, padding: f64) {
        let avail_w = viewport_px.width - 2.0 * padding;
        let avail_h = viewport_px.height - 2.0 * padding;
        let bounds_w = bounds.width.max(MIN_FIT_EXTENT);
        let bounds_h = bounds.height.max(MIN_FIT_EXTENT);
        self.scale = self.clamp_scale((avail_w / bounds_w).min(avail_h / bounds_h));

        let screen_mid = Point::new(viewport_px.width / 2.0, viewport_px.height / 2.0);
        self.center_on_world(bounds.center(), screen_mid);
    }

    /// Back to factory defaults: scale 1, no pan, idle. The scale clamp
    /// range and the wheel tunables keep their configured values.
    pub fn reset_view(&mut self) {
        self.scale = 1.0;
        self.translate = Point::ORIGIN;
        self.mode = ViewportMode::Idle;
        self.pan_start_screen = None;
        self.pan_start_translate = None;
    }

    /// Load a persisted scale and translate, clamping the scale. A
    /// restored session is never mid-drag, so the mode is forced idle and
    /// the anchors dropped.
    pub fn restore(&mut self, scale: f64, translate: Point) {
        self.scale = self.clamp_scale(scale);
        self.translate = translate;
        self.mode = ViewportMode::Idle;
        self.pan_start_screen = None;
        self.pan_start_translate = None;
    }

    /// Replace the scale clamp range. Bounds given in the wrong order are
    /// swapped, non-positive bounds floored, and the current scale
    /// re-clamped into the new range.
    pub fn set_scale_limits(&mut self, min: f64, max: f64) {
        self.min_scale = min.min(max).max(MIN_FIT_EXTENT);
        self.max_scale = min.max(max).max(MIN_FIT_EXTENT);
        self.scale = self.clamp_scale(self.scale);
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}
