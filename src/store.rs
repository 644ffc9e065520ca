//! Shape store: the normalized shape collection and the editing state that
//! rides along with it.
//!
//! Two invariants hold after every operation, enforced inside each mutator
//! rather than at boundaries: `entities` and `order` always contain exactly
//! the same id set, and every selected id references a live shape (removal
//! purges it from the selection in the same step). All operations are total;
//! unknown ids and invalid input degrade to no-ops, never errors.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_STROKE, DEFAULT_STROKE_WIDTH, FRAME_FILL};
use crate::geom::{Point, Rect};
use crate::shapes::{Shape, ShapeId, ShapeKind, ShapePatch, StyleParams, TextStyle};
use crate::snapshot::ProjectSnapshot;

/// The active editing tool.
///
/// Exactly one is active at a time. Which creation operation a pointer
/// gesture produces for a given tool is the input layer's mapping; the
/// store only tracks the current tool and clears the selection when
/// leaving `Select`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Frame,
    Rect,
    Ellipse,
    FreeDraw,
    Arrow,
    Line,
    Text,
    Eraser,
}

impl Tool {
    /// True for tools whose gestures create a shape.
    #[must_use]
    pub fn is_creation(self) -> bool {
        !matches!(self, Self::Select | Self::Eraser)
    }
}

/// Normalized store of canvas shapes plus tool, selection, and frame
/// numbering.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    entities: HashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
    selected: HashSet<ShapeId>,
    tool: Tool,
    frame_counter: u32,
}

impl ShapeStore {
    /// Empty store with the select tool active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Reference to a shape by id.
    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.entities.get(id)
    }

    /// Number of live shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when the store holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Shape ids in insertion order (the draw order).
    #[must_use]
    pub fn order(&self) -> &[ShapeId] {
        &self.order
    }

    /// All shapes in insertion order.
    #[must_use]
    pub fn ordered_shapes(&self) -> Vec<&Shape> {
        self.order
            .iter()
            .filter_map(|id| self.entities.get(id))
            .collect()
    }

    /// The active tool.
    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Current frame-numbering counter; the next frame gets one more.
    #[must_use]
    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    /// True when the id is currently selected.
    #[must_use]
    pub fn is_selected(&self, id: &ShapeId) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids, in draw order.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<ShapeId> {
        self.order
            .iter()
            .filter(|id| self.selected.contains(*id))
            .copied()
            .collect()
    }

    /// Number of selected shapes.
    #[must_use]
    pub fn selection_len(&self) -> usize {
        self.selected.len()
    }

    /// Union of every shape's bounds, or `None` for an empty store. This
    /// is the rectangle handed to the viewport's fit operation.
    #[must_use]
    pub fn content_bounds(&self) -> Option<Rect> {
        let mut shapes = self.ordered_shapes().into_iter();
        let first = shapes.next()?.bounds();
        Some(shapes.fold(first, |acc, shape| acc.union(shape.bounds())))
    }

    // ── Tool ────────────────────────────────────────────────────

    /// Switch the active tool. Any switch away from `Select` drops the
    /// whole selection, so another tool can never edit a stale one;
    /// switching to `Select` keeps it.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        if tool != Tool::Select {
            self.selected.clear();
        }
    }

    // ── Creation ────────────────────────────────────────────────

    /// Create a frame. Frames are numbered sequentially from 1, render
    /// with no stroke, and default to a translucent fill when none is
    /// given.
    pub fn add_frame(&mut self, rect: Rect, fill: Option<String>) -> ShapeId {
        self.frame_counter += 1;
        self.insert_shape(Shape {
            id: Uuid::new_v4(),
            stroke: "transparent".to_owned(),
            stroke_width: 0.0,
            fill: Some(fill.unwrap_or_else(|| FRAME_FILL.to_owned())),
            kind: ShapeKind::Frame {
                x: rect.x,
                y: rect.y,
                w: rect.width,
                h: rect.height,
                frame_number: self.frame_counter,
            },
        })
    }

    /// Create an axis-aligned rectangle.
    pub fn add_rect(&mut self, rect: Rect, style: StyleParams) -> ShapeId {
        let (stroke, stroke_width, fill) = resolved_style(style);
        self.insert_shape(Shape {
            id: Uuid::new_v4(),
            stroke,
            stroke_width,
            fill,
            kind: ShapeKind::Rect {
                x: rect.x,
                y: rect.y,
                w: rect.width,
                h: rect.height,
            },
        })
    }

    /// Create an ellipse inscribed in `rect`.
    pub fn add_ellipse(&mut self, rect: Rect, style: StyleParams) -> ShapeId {
        let (stroke, stroke_width, fill) = resolved_style(style);
        self.insert_shape(Shape {
            id: Uuid::new_v4(),
            stroke,
            stroke_width,
            fill,
            kind: ShapeKind::Ellipse {
                x: rect.x,
                y: rect.y,
                w: rect.width,
                h: rect.height,
            },
        })
    }

    /// Create a freehand path from a captured pointer trail. Returns
    /// `None`, storing nothing, for an empty trail — the one creation
    /// operation with a validation gate.
    pub fn add_free_draw(&mut self, points: Vec<Point>, style: StyleParams) -> Option<ShapeId> {
        if points.is_empty() {
            return None;
        }
        let (stroke, stroke_width, fill) = resolved_style(style);
        Some(self.insert_shape(Shape {
            id: Uuid::new_v4(),
            stroke,
            stroke_width,
            fill,
            kind: ShapeKind::FreeDraw { points },
        }))
    }

    /// Create a directed arrow between two world points.
    pub fn add_arrow(&mut self, start: Point, end: Point, style: StyleParams) -> ShapeId {
        let (stroke, stroke_width, fill) = resolved_style(style);
        self.insert_shape(Shape {
            id: Uuid::new_v4(),
            stroke,
            stroke_width,
            fill,
            kind: ShapeKind::Arrow {
                start_x: start.x,
                start_y: start.y,
                end_x: end.x,
                end_y: end.y,
            },
        })
    }

    /// Create a straight line between two world points.
    pub fn add_line(&mut self, start: Point, end: Point, style: StyleParams) -> ShapeId {
        let (stroke, stroke_width, fill) = resolved_style(style);
        self.insert_shape(Shape {
            id: Uuid::new_v4(),
            stroke,
            stroke_width,
            fill,
            kind: ShapeKind::Line {
                start_x: start.x,
                start_y: start.y,
                end_x: end.x,
                end_y: end.y,
            },
        })
    }

    /// Create a text block anchored at `origin`.
    pub fn add_text(
        &mut self,
        origin: Point,
        text: String,
        style: StyleParams,
        typography: TextStyle,
    ) -> ShapeId {
        let (stroke, stroke_width, fill) = resolved_style(style);
        self.insert_shape(Shape {
            id: Uuid::new_v4(),
            stroke,
            stroke_width,
            fill,
            kind: ShapeKind::Text {
                x: origin.x,
                y: origin.y,
                text,
                font_size: typography.font_size,
                font_family: typography.font_family,
                font_weight: typography.font_weight,
                font_style: typography.font_style,
                text_align: typography.text_align,
                text_decoration: typography.text_decoration,
                line_height: typography.line_height,
                letter_spacing: typography.letter_spacing,
                text_transform: typography.text_transform,
            },
        })
    }

    /// Create a generated-UI tile tied back to its source frame. The
    /// referenced frame is not required to exist (it may have been deleted
    /// since generation).
    pub fn add_generated_ui(
        &mut self,
        rect: Rect,
        ui_spec_data: Option<String>,
        source_frame_id: ShapeId,
        is_workflow_page: bool,
        style: StyleParams,
    ) -> ShapeId {
        let (stroke, stroke_width, fill) = resolved_style(style);
        self.insert_shape(Shape {
            id: Uuid::new_v4(),
            stroke,
            stroke_width,
            fill,
            kind: ShapeKind::GeneratedUi {
                x: rect.x,
                y: rect.y,
                w: rect.width,
                h: rect.height,
                ui_spec_data,
                source_frame_id,
                is_workflow_page,
            },
        })
    }

    // ── Mutation and removal ────────────────────────────────────

    /// Apply a sparse patch to an existing shape. Returns false when the
    /// id is unknown (deleted mid-gesture, stale echo); nothing happens in
    /// that case.
    pub fn update_shape(&mut self, id: &ShapeId, patch: &ShapePatch) -> bool {
        let Some(shape) = self.entities.get_mut(id) else {
            return false;
        };
        shape.apply_patch(patch);
        true
    }

    /// Remove a shape, returning it if it was present. The id leaves the
    /// order and the selection in the same step. The frame counter is
    /// deliberately untouched: numbering is monotonic per session, so a
    /// later frame can never duplicate a live number.
    pub fn remove_shape(&mut self, id: &ShapeId) -> Option<Shape> {
        let shape = self.entities.remove(id)?;
        self.order.retain(|other| other != id);
        self.selected.remove(id);
        Some(shape)
    }

    /// Drop every shape, the selection, and the frame numbering.
    pub fn clear_all(&mut self) {
        self.entities.clear();
        self.order.clear();
        self.selected.clear();
        self.frame_counter = 0;
    }

    // ── Selection ───────────────────────────────────────────────

    /// Add a shape to the selection, keeping any existing selection.
    /// Unknown ids are ignored so the selection can never reference a
    /// missing shape.
    pub fn select_shape(&mut self, id: &ShapeId) {
        if self.entities.contains_key(id) {
            self.selected.insert(*id);
        }
    }

    /// Remove one id from the selection. No-op when it was not selected.
    pub fn deselect_shape(&mut self, id: &ShapeId) {
        self.selected.remove(id);
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Selection becomes exactly the set of all live ids.
    pub fn select_all(&mut self) {
        self.selected = self.order.iter().copied().collect();
    }

    /// Remove every selected shape, walking them in draw order, then the
    /// selection is empty. Same frame-counter policy as
    /// [`ShapeStore::remove_shape`].
    pub fn delete_selected(&mut self) {
        let doomed = self.selected_ids();
        for id in &doomed {
            self.remove_shape(id);
        }
    }

    // ── Persistence ─────────────────────────────────────────────

    /// Capture the store as a persistable project snapshot, shapes and
    /// selection both in draw order.
    #[must_use]
    pub fn snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot {
            shapes: self.ordered_shapes().into_iter().cloned().collect(),
            tool: self.tool,
            selected: self.selected_ids(),
            frame_counter: self.frame_counter,
        }
    }

    /// Replace the whole store with a persisted project. Order follows the
    /// given sequence; a duplicated id keeps its first order slot with the
    /// last occurrence's data. The incoming selection is filtered down to
    /// ids actually present, so the liveness invariant survives untrusted
    /// input; the counter is taken as-is.
    pub fn load_project(&mut self, snapshot: ProjectSnapshot) {
        self.entities.clear();
        self.order.clear();
        for shape in snapshot.shapes {
            self.insert_shape(shape);
        }
        self.tool = snapshot.tool;
        self.selected = snapshot
            .selected
            .into_iter()
            .filter(|id| self.entities.contains_key(id))
            .collect();
        self.frame_counter = snapshot.frame_counter;
    }

    /// Append a shape to the entity map and the order. A repeated id
    /// overwrites the entity but keeps its existing order slot, so `order`
    /// stays duplicate-free.
    fn insert_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id;
        if self.entities.insert(id, shape).is_none() {
            self.order.push(id);
        }
        id
    }
}

fn resolved_style(style: StyleParams) -> (String, f64, Option<String>) {
    (
        style.stroke.unwrap_or_else(|| DEFAULT_STROKE.to_owned()),
        style.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH),
        style.fill,
    )
}
