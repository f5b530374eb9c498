//! Icon element.

use super::{opt_color, opt_string, ElementId, Geometry, JsonMap, Rgba};
use crate::error::ElementError;
use kurbo::Point;
use serde_json::{json, Value};
use uuid::Uuid;

/// The fixed glyph set icons may reference.
pub const GLYPH_NAMES: &[&str] = &[
    "star",
    "heart",
    "check",
    "cross",
    "arrow-right",
    "arrow-left",
    "arrow-up",
    "arrow-down",
    "circle",
    "square",
    "lightbulb",
    "warning",
    "info",
    "flag",
    "pin",
];

/// A single glyph from the fixed icon set.
#[derive(Debug, Clone)]
pub struct IconElement {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees around the element center.
    pub rotation: f64,
    pub lock_aspect_ratio: bool,
    pub icon_name: String,
    pub color: Rgba,
}

impl IconElement {
    pub const DEFAULT_GLYPH: &'static str = "star";

    /// Create a new icon with the default glyph.
    pub fn new(origin: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: origin.x,
            y: origin.y,
            width: 48.0,
            height: 48.0,
            rotation: 0.0,
            lock_aspect_ratio: true,
            icon_name: Self::DEFAULT_GLYPH.to_string(),
            color: Rgba::black(),
        }
    }

    /// Whether the glyph name is part of the known set. Renderers fall back
    /// to the default glyph for unknown names.
    pub fn has_known_glyph(&self) -> bool {
        GLYPH_NAMES.contains(&self.icon_name.as_str())
    }

    pub fn to_json(&self) -> Value {
        json!({
            "type": "icon",
            "x": self.x,
            "y": self.y,
            "width": self.width,
            "height": self.height,
            "rotation": self.rotation,
            "lockAspectRatio": self.lock_aspect_ratio,
            "iconName": self.icon_name,
            "color": self.color.to_hex(),
        })
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
            icon_name: opt_string(obj, "iconName", Self::DEFAULT_GLYPH),
            color: opt_color(obj, "color", Rgba::black()),
        })
    }
}
