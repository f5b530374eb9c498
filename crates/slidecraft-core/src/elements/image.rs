//! Image element.

use super::{opt_f64, opt_string, ElementId, Geometry, JsonMap};
use crate::error::ElementError;
use kurbo::{BezPath, Point, Rect, RoundedRect, Shape as KurboShape};
use serde_json::{json, Value};
use uuid::Uuid;

/// A raster image placed on the slide. Pixel data lives in the image cache
/// collaborator, keyed by [`ImageElement::cache_key`]; this element only
/// carries geometry and the lookup key.
#[derive(Debug, Clone)]
pub struct ImageElement {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees around the element center.
    pub rotation: f64,
    pub lock_aspect_ratio: bool,
    /// Source URL; also the default cache key.
    pub url: String,
    /// Corner radius for the rounded-rect clip.
    pub corner_radius: f64,
    /// Overrides `url` as the cache lookup key when set.
    pub custom_image_key: Option<String>,
}

impl ImageElement {
    /// Create a new image element with default styling.
    pub fn new(origin: Point, width: f64, height: f64, url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: origin.x,
            y: origin.y,
            width,
            height,
            rotation: 0.0,
            lock_aspect_ratio: true,
            url,
            corner_radius: 0.0,
            custom_image_key: None,
        }
    }

    /// The key used to consult the image cache.
    pub fn cache_key(&self) -> &str {
        self.custom_image_key.as_deref().unwrap_or(&self.url)
    }

    /// Rounded-rect clip path for the current frame. A pure function of the
    /// geometry fields; a degenerate frame yields an empty path rather than
    /// panicking.
    pub fn clip_path(&self) -> BezPath {
        if self.width <= 0.0 || self.height <= 0.0 {
            return BezPath::new();
        }
        let rect = Rect::new(self.x, self.y, self.x + self.width, self.y + self.height);
        if self.corner_radius > 0.0 {
            let radius = self.corner_radius.min(self.width / 2.0).min(self.height / 2.0);
            RoundedRect::from_rect(rect, radius).to_path(0.1)
        } else {
            rect.to_path(0.1)
        }
    }

    pub fn to_json(&self) -> Value {
        let mut value = json!({
            "type": "image",
            "x": self.x,
            "y": self.y,
            "width": self.width,
            "height": self.height,
            "rotation": self.rotation,
            "lockAspectRatio": self.lock_aspect_ratio,
            "url": self.url,
            "cornerRadius": self.corner_radius,
        });
        if let Some(key) = &self.custom_image_key {
            value["customImageKey"] = Value::String(key.clone());
        }
        value
    }

    pub fn from_json(obj: &JsonMap) -> Result<Self, ElementError> {
        let geometry = Geometry::from_json(obj)?;
        Ok(Self {
            id: Uuid::new_v4(),
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            rotation: geometry.rotation,
            lock_aspect_ratio: geometry.lock_aspect_ratio,
            url: opt_string(obj, "url", ""),
            corner_radius: opt_f64(obj, "cornerRadius", 0.0),
            custom_image_key: obj
                .get("customImageKey")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}
