//! Canvas-editor state core for a web-based design tool.
//!
//! This crate owns the two state slices behind the canvas: the pan/zoom
//! [`viewport::Viewport`] and the normalized [`store::ShapeStore`] of shapes,
//! selection, active tool, and frame numbering. It does no I/O and knows
//! nothing about the DOM: the host translates raw pointer/wheel/keyboard
//! events into the operations defined here and paints from the resulting
//! state. Persistence goes through the JSON snapshot codec in [`snapshot`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Top-level [`editor::Editor`] owning both engines |
//! | [`viewport`] | Pan/zoom transform and the drag-pan state machine |
//! | [`store`] | Normalized shape store, tool, selection, frame counter |
//! | [`shapes`] | Shape variants, typography, sparse patches |
//! | [`snapshot`] | Persisted JSON wire model and codec |
//! | [`geom`] | Point/size/rect value types shared by both engines |
//! | [`consts`] | Shared numeric constants (zoom limits, style defaults) |

pub mod consts;
pub mod editor;
pub mod geom;
pub mod shapes;
pub mod snapshot;
pub mod store;
pub mod viewport;
