//! Shared numeric constants for the easel crate.

// ── Viewport ────────────────────────────────────────────────────

/// Lower bound of the viewport scale (10% zoom).
pub const MIN_SCALE: f64 = 0.1;

/// Upper bound of the viewport scale (800% zoom).
pub const MAX_SCALE: f64 = 8.0;

/// Per-notch multiplier base for wheel zoom.
pub const ZOOM_STEP: f64 = 1.2;

/// Multiplier applied to raw wheel deltas when scroll-panning.
pub const WHEEL_PAN_SPEED: f64 = 1.0;

/// Typical wheel-notch magnitude in pixels; dividing raw `delta_y` by this
/// maps one notch to one power of [`ZOOM_STEP`].
pub const WHEEL_NOTCH_PX: f64 = 53.0;

/// Screen padding in pixels kept on each side when fitting content.
pub const FIT_PADDING_PX: f64 = 50.0;

/// Floor applied to degenerate bounds extents in the fit computation.
pub const MIN_FIT_EXTENT: f64 = 1e-6;

// ── Shape defaults ──────────────────────────────────────────────

/// Default stroke color for newly created shapes.
pub const DEFAULT_STROKE: &str = "#1f2933";

/// Default stroke width for newly created shapes, in world units.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Translucent fill given to new frames when the caller supplies none.
pub const FRAME_FILL: &str = "rgba(255, 255, 255, 0.06)";

// ── Text defaults ───────────────────────────────────────────────

/// Default font size for new text shapes, in world units.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Default font family for new text shapes.
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

/// Default font weight for new text shapes (CSS keyword or numeric string).
pub const DEFAULT_FONT_WEIGHT: &str = "normal";

/// Default line-height multiplier for new text shapes.
pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;
