//! Slide element definitions.

mod chart;
mod icon;
mod image;
mod shape;
mod table;
mod text;

pub use chart::{ChartElement, ChartKind, ChartSeries};
pub use icon::{IconElement, GLYPH_NAMES};
pub use image::ImageElement;
pub use shape::{ShapeElement, ShapeKind};
pub use table::TableElement;
pub use text::{TextAlignment, TextElement};

use crate::error::ElementError;
use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Minimum element width/height in document units, enforced after any resize.
pub const MIN_SIZE: f64 = 10.0;

/// Unique identifier for slide elements.
pub type ElementId = Uuid;

pub(crate) type JsonMap = serde_json::Map<String, Value>;

/// Serializable color representation (RGBA8), written as `#RRGGBB` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn gray() -> Self {
        Self::new(128, 128, 128, 255)
    }

    /// Parse a `#RRGGBB` hex string.
    pub fn from_hex(hex: &str) -> Result<Self, ElementError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ElementError::InvalidColor(hex.to_string()))?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ElementError::InvalidColor(hex.to_string()));
        }
        let parse =
            |s: &str| u8::from_str_radix(s, 16).map_err(|_| ElementError::InvalidColor(hex.to_string()));
        Ok(Self::new(
            parse(&digits[0..2])?,
            parse(&digits[2..4])?,
            parse(&digits[4..6])?,
            255,
        ))
    }

    /// Format as `#RRGGBB` (alpha is not carried on the wire).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Inclusive point-in-rectangle test.
///
/// `kurbo::Rect::contains` is closed-open; element hit-testing treats all
/// four edges as inside.
pub(crate) fn point_in_bounds(bounds: Rect, point: Point) -> bool {
    point.x >= bounds.x0 && point.x <= bounds.x1 && point.y >= bounds.y0 && point.y <= bounds.y1
}

/// Read a required numeric field, failing with `MalformedElement`.
pub(crate) fn require_f64(obj: &JsonMap, field: &'static str) -> Result<f64, ElementError> {
    obj.get(field)
        .and_then(Value::as_f64)
        .ok_or(ElementError::MalformedElement { field })
}

pub(crate) fn opt_f64(obj: &JsonMap, field: &str, default: f64) -> f64 {
    obj.get(field).and_then(Value::as_f64).unwrap_or(default)
}

pub(crate) fn opt_bool(obj: &JsonMap, field: &str, default: bool) -> bool {
    obj.get(field).and_then(Value::as_bool).unwrap_or(default)
}

pub(crate) fn opt_string(obj: &JsonMap, field: &str, default: &str) -> String {
    obj.get(field)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Read an optional color field; an unparsable literal substitutes the
/// default rather than aborting the element.
pub(crate) fn opt_color(obj: &JsonMap, field: &str, default: Rgba) -> Rgba {
    match obj.get(field).and_then(Value::as_str) {
        Some(hex) => Rgba::from_hex(hex).unwrap_or_else(|err| {
            log::warn!("substituting default for {field}: {err}");
            default
        }),
        None => default,
    }
}

/// The geometry fields every element variant carries.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub lock_aspect_ratio: bool,
}

impl Geometry {
    /// Parse the required geometry fields plus the optional rotation and
    /// aspect-lock flags.
    pub fn from_json(obj: &JsonMap) -> Result<Self, ElementError> {
        Ok(Self {
            x: require_f64(obj, "x")?,
            y: require_f64(obj, "y")?,
            width: require_f64(obj, "width")?,
            height: require_f64(obj, "height")?,
            rotation: opt_f64(obj, "rotation", 0.0),
            lock_aspect_ratio: opt_bool(obj, "lockAspectRatio", false),
        })
    }
}

/// Enum wrapper for all element types. A closed sum type: every operation
/// below matches exhaustively, so adding a variant is compile-time checked.
#[derive(Debug, Clone)]
pub enum SlideElement {
    Text(TextElement),
    Image(ImageElement),
    Shape(ShapeElement),
    Table(TableElement),
    Chart(ChartElement),
    Icon(IconElement),
}

impl SlideElement {
    pub fn id(&self) -> ElementId {
        match self {
            SlideElement::Text(e) => e.id,
            SlideElement::Image(e) => e.id,
            SlideElement::Shape(e) => e.id,
            SlideElement::Table(e) => e.id,
            SlideElement::Chart(e) => e.id,
            SlideElement::Icon(e) => e.id,
        }
    }

    /// The wire-format `type` tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SlideElement::Text(_) => "text",
            SlideElement::Image(_) => "image",
            SlideElement::Shape(_) => "shape",
            SlideElement::Table(_) => "table",
            SlideElement::Chart(_) => "chart",
            SlideElement::Icon(_) => "icon",
        }
    }

    /// Axis-aligned bounding box in document coordinates.
    pub fn bounds(&self) -> Rect {
        let (x, y, w, h) = match self {
            SlideElement::Text(e) => (e.x, e.y, e.width, e.height),
            SlideElement::Image(e) => (e.x, e.y, e.width, e.height),
            SlideElement::Shape(e) => (e.x, e.y, e.width, e.height),
            SlideElement::Table(e) => (e.x, e.y, e.width, e.height),
            SlideElement::Chart(e) => (e.x, e.y, e.width, e.height),
            SlideElement::Icon(e) => (e.x, e.y, e.width, e.height),
        };
        Rect::new(x, y, x + w, y + h)
    }

    /// Hit test against the axis-aligned bounding box.
    ///
    /// Rotation is deliberately not factored in: handle placement and the
    /// resize math downstream assume axis-aligned bounds, so visual rotation
    /// and hit geometry diverge for rotated elements.
    pub fn contains_point(&self, point: Point) -> bool {
        point_in_bounds(self.bounds(), point)
    }

    pub fn rotation(&self) -> f64 {
        match self {
            SlideElement::Text(e) => e.rotation,
            SlideElement::Image(e) => e.rotation,
            SlideElement::Shape(e) => e.rotation,
            SlideElement::Table(e) => e.rotation,
            SlideElement::Chart(e) => e.rotation,
            SlideElement::Icon(e) => e.rotation,
        }
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        match self {
            SlideElement::Text(e) => e.rotation = degrees,
            SlideElement::Image(e) => e.rotation = degrees,
            SlideElement::Shape(e) => e.rotation = degrees,
            SlideElement::Table(e) => e.rotation = degrees,
            SlideElement::Chart(e) => e.rotation = degrees,
            SlideElement::Icon(e) => e.rotation = degrees,
        }
    }

    pub fn lock_aspect_ratio(&self) -> bool {
        match self {
            SlideElement::Text(e) => e.lock_aspect_ratio,
            SlideElement::Image(e) => e.lock_aspect_ratio,
            SlideElement::Shape(e) => e.lock_aspect_ratio,
            SlideElement::Table(e) => e.lock_aspect_ratio,
            SlideElement::Chart(e) => e.lock_aspect_ratio,
            SlideElement::Icon(e) => e.lock_aspect_ratio,
        }
    }

    /// Set the element's frame, clamping width/height to [`MIN_SIZE`].
    ///
    /// Text is the only variant whose styling is geometry-dependent: its
    /// font size scales with the mean of the width and height ratios.
    pub fn set_frame(&mut self, frame: Rect) {
        let x = frame.x0;
        let y = frame.y0;
        let w = frame.width().max(MIN_SIZE);
        let h = frame.height().max(MIN_SIZE);
        match self {
            SlideElement::Text(e) => e.set_frame(x, y, w, h),
            SlideElement::Image(e) => {
                e.x = x;
                e.y = y;
                e.width = w;
                e.height = h;
            }
            SlideElement::Shape(e) => {
                e.x = x;
                e.y = y;
                e.width = w;
                e.height = h;
            }
            SlideElement::Table(e) => {
                e.x = x;
                e.y = y;
                e.width = w;
                e.height = h;
            }
            SlideElement::Chart(e) => {
                e.x = x;
                e.y = y;
                e.width = w;
                e.height = h;
            }
            SlideElement::Icon(e) => {
                e.x = x;
                e.y = y;
                e.width = w;
                e.height = h;
            }
        }
    }

    /// Translate without resizing. Shifts the raw coordinates so a pure move
    /// never touches width, height, or geometry-dependent styling, even for
    /// an element that came off the wire smaller than [`MIN_SIZE`].
    pub fn translate_by(&mut self, delta: Vec2) {
        match self {
            SlideElement::Text(e) => {
                e.x += delta.x;
                e.y += delta.y;
            }
            SlideElement::Image(e) => {
                e.x += delta.x;
                e.y += delta.y;
            }
            SlideElement::Shape(e) => {
                e.x += delta.x;
                e.y += delta.y;
            }
            SlideElement::Table(e) => {
                e.x += delta.x;
                e.y += delta.y;
            }
            SlideElement::Chart(e) => {
                e.x += delta.x;
                e.y += delta.y;
            }
            SlideElement::Icon(e) => {
                e.x += delta.x;
                e.y += delta.y;
            }
        }
    }

    /// Serialize to one wire-format JSON object.
    pub fn to_json(&self) -> Value {
        match self {
            SlideElement::Text(e) => e.to_json(),
            SlideElement::Image(e) => e.to_json(),
            SlideElement::Shape(e) => e.to_json(),
            SlideElement::Table(e) => e.to_json(),
            SlideElement::Chart(e) => e.to_json(),
            SlideElement::Icon(e) => e.to_json(),
        }
    }

    /// Deserialize one wire-format JSON object.
    pub fn from_json(value: &Value) -> Result<Self, ElementError> {
        let obj = value
            .as_object()
            .ok_or(ElementError::MalformedElement { field: "type" })?;
        let kind = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ElementError::MalformedElement { field: "type" })?;
        match kind {
            "text" => TextElement::from_json(obj).map(SlideElement::Text),
            "image" => ImageElement::from_json(obj).map(SlideElement::Image),
            "shape" => ShapeElement::from_json(obj).map(SlideElement::Shape),
            "table" => TableElement::from_json(obj).map(SlideElement::Table),
            "chart" => ChartElement::from_json(obj).map(SlideElement::Chart),
            "icon" => IconElement::from_json(obj).map(SlideElement::Icon),
            other => Err(ElementError::UnknownElementType(other.to_string())),
        }
    }

    /// Build the visible stand-in for an element whose `type` tag is not
    /// recognized. Serializes as a text element so a re-saved document stays
    /// loadable everywhere.
    pub fn placeholder_for_unknown(kind: &str, value: &Value) -> Self {
        let empty = JsonMap::new();
        let obj = value.as_object().unwrap_or(&empty);
        let mut text = TextElement::new(
            Point::new(opt_f64(obj, "x", 0.0), opt_f64(obj, "y", 0.0)),
            format!("Unknown element type \"{kind}\""),
        );
        text.width = opt_f64(obj, "width", 160.0).max(MIN_SIZE);
        text.height = opt_f64(obj, "height", 40.0).max(MIN_SIZE);
        SlideElement::Text(text)
    }
}
