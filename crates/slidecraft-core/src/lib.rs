//! SlideCraft Core Library
//!
//! Platform-agnostic slide-canvas editing engine: the element model, the
//! zoom/pan view transform, hit testing, alignment guide detection, and the
//! gesture state machine that ties them together. Rendering and image
//! fetching are collaborator seams, not part of this crate.

pub mod align;
pub mod camera;
pub mod controller;
pub mod document;
pub mod elements;
pub mod error;
pub mod handles;
pub mod image_cache;
pub mod render;

pub use align::{compute_guides, AlignmentGuides, ALIGNMENT_THRESHOLD};
pub use camera::{Camera, MAX_SCALE, MIN_SCALE};
pub use controller::{EditorEvent, EditorSession, PointerEvent, SNAP_BREAK_THRESHOLD};
pub use document::SlideDocument;
pub use elements::{
    ChartElement, ChartKind, ChartSeries, ElementId, IconElement, ImageElement, Rgba,
    ShapeElement, ShapeKind, SlideElement, TableElement, TextAlignment, TextElement, GLYPH_NAMES,
    MIN_SIZE,
};
pub use error::ElementError;
pub use handles::{corner_positions, hit_test_handles, HandleCorner, HANDLE_HIT_TOLERANCE};
pub use image_cache::{ImageCache, ImageData};
pub use render::{paint_document, ElementPainter};
