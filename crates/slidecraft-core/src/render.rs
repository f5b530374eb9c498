//! Render collaborator seam.
//!
//! The core owns geometry and mutation, not paint operations. A renderer
//! implements [`ElementPainter`] against whatever 2D surface it has; the core
//! hands it document-space geometry and the painter projects through the
//! camera itself.

use crate::document::SlideDocument;
use crate::elements::SlideElement;

/// Drawing callback implemented by the render backend.
pub trait ElementPainter {
    /// Draw one element. Geometry is in document space.
    fn draw(&mut self, element: &SlideElement, viewport_width: f64, viewport_height: f64);
}

/// Walk the document in paint order (back to front), drawing each element.
pub fn paint_document(
    document: &SlideDocument,
    painter: &mut dyn ElementPainter,
    viewport_width: f64,
    viewport_height: f64,
) {
    for element in document.elements() {
        painter.draw(element, viewport_width, viewport_height);
    }
}
