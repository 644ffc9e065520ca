//! Persisted wire model for projects and viewport placement.
//!
//! The persistence collaborator hands JSON strings in and out; this module
//! owns what those strings look like. A project snapshot is exactly the
//! shape field set plus `tool`, `selected`, and `frameCounter` — no extra
//! envelope. Decoding is the one fallible surface in the crate, since the
//! bytes cross a trust boundary.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use serde::{Deserialize, Serialize};

use crate::geom::Point;
use crate::shapes::{Shape, ShapeId};
use crate::store::Tool;

/// Error returned by the snapshot decoders.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The JSON could not be parsed into the snapshot model.
    #[error("failed to decode snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A whole persisted project: every shape plus the editing state that
/// travels with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    /// Shapes in draw order.
    pub shapes: Vec<Shape>,
    /// Tool that was active when the project was saved.
    pub tool: Tool,
    /// Selected shape ids at save time.
    pub selected: Vec<ShapeId>,
    /// Frame-numbering counter at save time.
    pub frame_counter: u32,
}

/// Persisted viewport placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    /// Zoom level.
    pub scale: f64,
    /// Pan offset applied after scaling.
    pub translate: Point,
}

/// Encode a project snapshot as JSON.
///
/// # Panics
///
/// Never panics in practice; this model serializes infallibly.
#[must_use]
pub fn encode_project(snapshot: &ProjectSnapshot) -> String {
    // Safety: serde_json only fails on non-string map keys or a failing
    // writer, neither of which applies to these types.
    serde_json::to_string(snapshot).unwrap_or_default()
}

/// Decode a project snapshot from JSON.
///
/// # Errors
///
/// Returns [`SnapshotError::Decode`] for malformed or mistyped JSON.
pub fn decode_project(json: &str) -> Result<ProjectSnapshot, SnapshotError> {
    Ok(serde_json::from_str(json)?)
}

/// Encode a viewport snapshot as JSON.
///
/// # Panics
///
/// Never panics in practice; this model serializes infallibly.
#[must_use]
pub fn encode_viewport(snapshot: &ViewportSnapshot) -> String {
    // Safety: as for encode_project.
    serde_json::to_string(snapshot).unwrap_or_default()
}

/// Decode a viewport snapshot from JSON.
///
/// # Errors
///
/// Returns [`SnapshotError::Decode`] for malformed or mistyped JSON.
pub fn decode_viewport(json: &str) -> Result<ViewportSnapshot, SnapshotError> {
    Ok(serde_json::from_str(json)?)
}
