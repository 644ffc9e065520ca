//! Shape model: the closed set of canvas shape kinds and their fields.
//!
//! A [`Shape`] pairs the style fields every kind shares with a tagged
//! [`ShapeKind`] carrying only that kind's own fields, so a text shape with
//! freehand points is unrepresentable. The same types are the persisted wire
//! model: kinds are internally tagged as `"type"` and flattened, giving flat
//! JSON objects like `{"id": ..., "type": "rect", "x": ...}`.

#[cfg(test)]
#[path = "shapes_test.rs"]
mod shapes_test;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::consts::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_FONT_WEIGHT, DEFAULT_LINE_HEIGHT,
};
use crate::geom::{Point, Rect};

/// Unique identifier for a canvas shape.
pub type ShapeId = Uuid;

// ── Typography ──────────────────────────────────────────────────

/// CSS font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text decoration line. Serialized in CSS spelling (`"line-through"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
}

/// Case transform applied when rendering text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

/// Full typography record for a text shape.
///
/// Used as the creation parameter; the fields live flat on the
/// [`ShapeKind::Text`] variant itself so the wire stays flat.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub font_family: String,
    /// CSS keyword or numeric string, e.g. `"normal"` or `"600"`.
    pub font_weight: String,
    pub font_style: FontStyle,
    pub text_align: TextAlign,
    pub text_decoration: TextDecoration,
    pub line_height: f64,
    pub letter_spacing: f64,
    pub text_transform: TextTransform,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_weight: DEFAULT_FONT_WEIGHT.to_owned(),
            font_style: FontStyle::Normal,
            text_align: TextAlign::Left,
            text_decoration: TextDecoration::None,
            line_height: DEFAULT_LINE_HEIGHT,
            letter_spacing: 0.0,
            text_transform: TextTransform::None,
        }
    }
}

// ── Shape variants ──────────────────────────────────────────────

/// The kind of a canvas shape, with the fields specific to that kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ShapeKind {
    /// Artboard-like container with a sequential display number.
    Frame {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        frame_number: u32,
    },
    /// Axis-aligned rectangle.
    Rect { x: f64, y: f64, w: f64, h: f64 },
    /// Ellipse inscribed in its bounding box.
    Ellipse { x: f64, y: f64, w: f64, h: f64 },
    /// Freehand polyline in drawing order. Never empty.
    FreeDraw { points: Vec<Point> },
    /// Directed arrow between two world points.
    Arrow {
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
    },
    /// Straight segment between two world points.
    Line {
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
    },
    /// Text block anchored at its top-left corner.
    Text {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        font_family: String,
        font_weight: String,
        font_style: FontStyle,
        text_align: TextAlign,
        text_decoration: TextDecoration,
        line_height: f64,
        letter_spacing: f64,
        text_transform: TextTransform,
    },
    /// Generated UI mockup tile, tied back to the frame it was produced
    /// from. The back-reference is informational; the referenced frame may
    /// have been deleted since.
    GeneratedUi {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        #[serde(default)]
        ui_spec_data: Option<String>,
        source_frame_id: ShapeId,
        #[serde(default)]
        is_workflow_page: bool,
    },
}

/// A canvas shape as stored in the document and in persisted projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Unique identifier, stable for the shape's lifetime.
    pub id: ShapeId,
    /// Stroke color as a CSS color string.
    pub stroke: String,
    /// Stroke width in world units.
    pub stroke_width: f64,
    /// Fill color; `None` renders unfilled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Kind-specific fields, tagged as `"type"` on the wire.
    #[serde(flatten)]
    pub kind: ShapeKind,
}

impl Shape {
    /// True when this shape is a frame container.
    #[must_use]
    pub fn is_frame(&self) -> bool {
        matches!(self.kind, ShapeKind::Frame { .. })
    }

    /// Axis-aligned bounding rectangle in world space.
    ///
    /// Text shapes report a zero-extent rect at their anchor; measuring
    /// rendered text is the renderer's job, not this model's.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match &self.kind {
            ShapeKind::Frame { x, y, w, h, .. }
            | ShapeKind::Rect { x, y, w, h }
            | ShapeKind::Ellipse { x, y, w, h }
            | ShapeKind::GeneratedUi { x, y, w, h, .. } => Rect::new(*x, *y, *w, *h),
            ShapeKind::Arrow {
                start_x,
                start_y,
                end_x,
                end_y,
            }
            | ShapeKind::Line {
                start_x,
                start_y,
                end_x,
                end_y,
            } => Rect::from_corners(
                Point::new(*start_x, *start_y),
                Point::new(*end_x, *end_y),
            ),
            ShapeKind::FreeDraw { points } => {
                let Some(first) = points.first() else {
                    // Creation rejects empty paths, so this is unreachable
                    // through store operations.
                    return Rect::new(0.0, 0.0, 0.0, 0.0);
                };
                let mut min = *first;
                let mut max = *first;
                for p in &points[1..] {
                    min.x = min.x.min(p.x);
                    min.y = min.y.min(p.y);
                    max.x = max.x.max(p.x);
                    max.y = max.y.max(p.y);
                }
                Rect::from_corners(min, max)
            }
            ShapeKind::Text { x, y, .. } => Rect::new(*x, *y, 0.0, 0.0),
        }
    }

    /// Merge a sparse patch into this shape.
    ///
    /// Common style fields apply to every kind; kind-specific fields apply
    /// only when the current kind carries them and are ignored otherwise,
    /// so a patch can never smuggle one kind's fields onto another.
    pub fn apply_patch(&mut self, patch: &ShapePatch) {
        if let Some(ref stroke) = patch.stroke {
            self.stroke = stroke.clone();
        }
        if let Some(stroke_width) = patch.stroke_width {
            self.stroke_width = stroke_width;
        }
        if let Some(ref fill) = patch.fill {
            self.fill = fill.clone();
        }
        match &mut self.kind {
            ShapeKind::Frame { x, y, w, h, .. }
            | ShapeKind::Rect { x, y, w, h }
            | ShapeKind::Ellipse { x, y, w, h } => {
                merge_box_fields(patch, x, y, w, h);
            }
            ShapeKind::GeneratedUi {
                x,
                y,
                w,
                h,
                ui_spec_data,
                source_frame_id,
                is_workflow_page,
            } => {
                merge_box_fields(patch, x, y, w, h);
                if let Some(ref spec) = patch.ui_spec_data {
                    *ui_spec_data = spec.clone();
                }
                if let Some(source) = patch.source_frame_id {
                    *source_frame_id = source;
                }
                if let Some(workflow) = patch.is_workflow_page {
                    *is_workflow_page = workflow;
                }
            }
            ShapeKind::Arrow {
                start_x,
                start_y,
                end_x,
                end_y,
            }
            | ShapeKind::Line {
                start_x,
                start_y,
                end_x,
                end_y,
            } => {
                if let Some(v) = patch.start_x {
                    *start_x = v;
                }
                if let Some(v) = patch.start_y {
                    *start_y = v;
                }
                if let Some(v) = patch.end_x {
                    *end_x = v;
                }
                if let Some(v) = patch.end_y {
                    *end_y = v;
                }
            }
            ShapeKind::FreeDraw { points } => {
                // An empty replacement would create the one invalid state
                // creation guards against, so it is ignored too.
                if let Some(ref new_points) = patch.points {
                    if !new_points.is_empty() {
                        *points = new_points.clone();
                    }
                }
            }
            ShapeKind::Text {
                x,
                y,
                text,
                font_size,
                font_family,
                font_weight,
                font_style,
                text_align,
                text_decoration,
                line_height,
                letter_spacing,
                text_transform,
            } => {
                if let Some(v) = patch.x {
                    *x = v;
                }
                if let Some(v) = patch.y {
                    *y = v;
                }
                if let Some(ref v) = patch.text {
                    *text = v.clone();
                }
                if let Some(v) = patch.font_size {
                    *font_size = v;
                }
                if let Some(ref v) = patch.font_family {
                    *font_family = v.clone();
                }
                if let Some(ref v) = patch.font_weight {
                    *font_weight = v.clone();
                }
                if let Some(v) = patch.font_style {
                    *font_style = v;
                }
                if let Some(v) = patch.text_align {
                    *text_align = v;
                }
                if let Some(v) = patch.text_decoration {
                    *text_decoration = v;
                }
                if let Some(v) = patch.line_height {
                    *line_height = v;
                }
                if let Some(v) = patch.letter_spacing {
                    *letter_spacing = v;
                }
                if let Some(v) = patch.text_transform {
                    *text_transform = v;
                }
            }
        }
    }
}

fn merge_box_fields(patch: &ShapePatch, x: &mut f64, y: &mut f64, w: &mut f64, h: &mut f64) {
    if let Some(v) = patch.x {
        *x = v;
    }
    if let Some(v) = patch.y {
        *y = v;
    }
    if let Some(v) = patch.w {
        *w = v;
    }
    if let Some(v) = patch.h {
        *h = v;
    }
}

// ── Creation and update parameters ──────────────────────────────

/// Optional style overrides for shape creation. `None` fields fall back to
/// the crate defaults.
#[derive(Debug, Clone, Default)]
pub struct StyleParams {
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub fill: Option<String>,
}

/// Sparse update for a shape. Only present fields are applied, and only
/// where the target shape's kind carries them; `frame_number` is assigned
/// by the store and is deliberately absent here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapePatch {
    /// New stroke color, any kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// New stroke width, any kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// New fill, any kind; `Some(None)` clears it.
    #[serde(
        default,
        deserialize_with = "deserialize_clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub fill: Option<Option<String>>,
    /// New left edge (box kinds and text anchors).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New top edge (box kinds and text anchors).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New width (box kinds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    /// New height (box kinds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    /// New start point x (arrow/line).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_x: Option<f64>,
    /// New start point y (arrow/line).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_y: Option<f64>,
    /// New end point x (arrow/line).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_x: Option<f64>,
    /// New end point y (arrow/line).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_y: Option<f64>,
    /// Replacement freehand path; an empty one is ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
    /// New text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// New font size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// New font family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// New font weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    /// New font style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    /// New text alignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// New text decoration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    /// New line height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    /// New letter spacing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    /// New text transform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_transform: Option<TextTransform>,
    /// New generated-UI markup; `Some(None)` clears it.
    #[serde(
        default,
        deserialize_with = "deserialize_clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub ui_spec_data: Option<Option<String>>,
    /// New source-frame back-reference (generated UI).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_frame_id: Option<ShapeId>,
    /// New workflow-page flag (generated UI).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_workflow_page: Option<bool>,
}

/// Plain `Option<Option<_>>` folds an explicit `null` into field-absent on
/// deserialize. Routing a present field through the inner option keeps the
/// two cases apart: `null` becomes `Some(None)`, a missing field stays
/// `None` via the default.
fn deserialize_clearable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
