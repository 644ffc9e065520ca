//! Top-level editor state: one viewport plus one shape store.
//!
//! Hosts own a single [`Editor`] value and route operations at it; nothing
//! in the crate reaches for globals, which keeps every path testable as a
//! plain value. This is also where the two engines meet: persistence
//! round-trips, and fit-to-content feeding the store's bounds into the
//! viewport.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use crate::consts::FIT_PADDING_PX;
use crate::geom::Size;
use crate::snapshot::{ProjectSnapshot, ViewportSnapshot};
use crate::store::ShapeStore;
use crate::viewport::Viewport;

/// The whole canvas-editor state for one session.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    /// Pan/zoom and interaction mode.
    pub viewport: Viewport,
    /// Shapes, tool, selection, frame numbering.
    pub store: ShapeStore,
}

impl Editor {
    /// Fresh editor: identity viewport, empty store, select tool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the project half of the state for persistence.
    #[must_use]
    pub fn project_snapshot(&self) -> ProjectSnapshot {
        self.store.snapshot()
    }

    /// Capture the viewport placement for persistence.
    #[must_use]
    pub fn viewport_snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            scale: self.viewport.scale(),
            translate: self.viewport.translate(),
        }
    }

    /// Replace the store with a persisted project.
    pub fn load_project(&mut self, snapshot: ProjectSnapshot) {
        self.store.load_project(snapshot);
    }

    /// Restore a persisted viewport placement.
    pub fn restore_viewport(&mut self, snapshot: ViewportSnapshot) {
        self.viewport.restore(snapshot.scale, snapshot.translate);
    }

    /// Frame everything in the store with the standard padding. No-op on
    /// an empty store; there is nothing to frame.
    pub fn zoom_to_content(&mut self, viewport_px: Size) {
        if let Some(bounds) = self.store.content_bounds() {
            self.viewport.zoom_to_fit(bounds, viewport_px, FIT_PADDING_PX);
        }
    }
}
