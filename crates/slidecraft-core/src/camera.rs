//! Camera module for the zoom/pan view transform.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom factor.
pub const MIN_SCALE: f64 = 0.5;
/// Largest allowed zoom factor.
pub const MAX_SCALE: f64 = 3.0;

/// Camera manages the view transform for the slide canvas.
///
/// It owns the zoom factor and pan offset, converting between device
/// coordinates (raw pointer input) and document coordinates (the space
/// element geometry is authored in).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in device units.
    pub translate: Vec2,
    /// Current zoom factor.
    pub scale: f64,
    /// Minimum allowed zoom factor.
    pub min_scale: f64,
    /// Maximum allowed zoom factor.
    pub max_scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: 1.0,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
        }
    }
}

impl Camera {
    /// Create a new camera at identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Affine transform from document space to device space.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }

    /// Affine transform from device space to document space.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.translate)
    }

    /// Convert a device point to document coordinates.
    pub fn to_document(&self, device: Point) -> Point {
        Point::new(
            (device.x - self.translate.x) / self.scale,
            (device.y - self.translate.y) / self.scale,
        )
    }

    /// Convert a document point to device coordinates.
    pub fn to_device(&self, doc: Point) -> Point {
        Point::new(
            doc.x * self.scale + self.translate.x,
            doc.y * self.scale + self.translate.y,
        )
    }

    /// Zoom by a multiplicative factor, keeping the document point under
    /// `focus` (a device point) fixed on screen.
    pub fn apply_zoom(&mut self, focus: Point, delta_scale: f64) {
        let new_scale = (self.scale * delta_scale).clamp(self.min_scale, self.max_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        let anchor = self.to_document(focus);
        self.scale = new_scale;

        // Re-derive translate so `anchor` projects back onto `focus`.
        let projected = self.to_device(anchor);
        self.translate += Vec2::new(focus.x - projected.x, focus.y - projected.y);
    }

    /// Pan by a delta in device units.
    pub fn pan(&mut self, delta: Vec2) {
        self.translate += delta;
    }

    /// Reset to identity: scale 1.0, no pan.
    pub fn reset(&mut self) {
        self.translate = Vec2::ZERO;
        self.scale = 1.0;
    }
}
