//! Geometric shape element.

use super::{opt_color, opt_f64, opt_string, ElementId, Geometry, JsonMap, Rgba};
use crate::error::ElementError;
use kurbo::{BezPath, Ellipse, Point, Rect, RoundedRect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

/// The geometric outline drawn for a shape element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Oval,
    Line,
    Triangle,
    Star,
    Hexagon,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Oval => "oval",
            ShapeKind::Line => "line",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Star => "star",
            ShapeKind::Hexagon => "hexagon",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "rectangle" => Some(ShapeKind::Rectangle),
            "oval" => Some(ShapeKind::Oval),
            "line" => Some(ShapeKind::Line),
            "triangle" => Some(ShapeKind::Triangle),
            "star" => Some(ShapeKind::Star),
            "hexagon" => Some(ShapeKind::Hexagon),
            _ => None,
        }
    }
}

/// A filled geometric shape.
#[derive(Debug, Clone)]
pub struct ShapeElement {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees around the element center.
    pub rotation: f64,
    pub lock_aspect_ratio: bool,
    pub shape_type: ShapeKind,
    pub color: Rgba,
    /// Corner radius; only meaningful for rectangles.
    pub corner_radius: f64,
    /// Fill opacity in [0, 1].
    pub opacity: f64,
    pub stroke_width: f64,
    pub stroke_color: Rgba,
}

impl ShapeElement {
    /// Create a new shape with default styling.
    pub fn new(origin: Point, width: f64, height: f64, shape_type: ShapeKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: origin.x,
            y: origin.y,
            width,
            height,
            rotation: 0.0,
            lock_aspect_ratio: false,
            shape_type,
            color: Rgba::gray(),
            corner_radius: 0.0,
            opacity: 1.0,
            stroke_width: 0.0,
            stroke_color: Rgba::black(),
        }
    }

    fn frame(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Outline path for the current frame and shape type. A pure function of
    /// the element fields, recomputed on read; a degenerate frame yields an
    /// empty path.
    pub fn outline_path(&self) -> BezPath {
        if self.width <= 0.0 || self.height <= 0.0 {
            return BezPath::new();
        }
        let frame = self.frame();
        match self.shape_type {
            ShapeKind::Rectangle => {
                if self.corner_radius > 0.0 {
                    let radius = self.corner_radius.min(self.width / 2.0).min(self.height / 2.0);
                    RoundedRect::from_rect(frame, radius).to_path(0.1)
                } else {
                    frame.to_path(0.1)
                }
            }
            ShapeKind::Oval => Ellipse::from_rect(frame).to_path(0.1),
            ShapeKind::Line => {
                let mut path = BezPath::new();
                path.move_to(Point::new(frame.x0, frame.center().y));
                path.line_to(Point::new(frame.x1, frame.center().y));
                path
            }
            ShapeKind::Triangle => polygon(&[
                Point::new(frame.center().x, frame.y0),
                Point::new(frame.x1, frame.y1),
                Point::new(frame.x0, frame.y1),
            ]),
            ShapeKind::Star => star_path(frame),
            ShapeKind::Hexagon => {
                let cx = frame.center().x;
                let qw = frame.width() / 4.0;
                polygon(&[
                    Point::new(cx - qw, frame.y0),
                    Point::new(cx + qw, frame.y0),
                    Point::new(frame.x1, frame.center().y),
                    Point::new(cx + qw, frame.y1),
                    Point::new(cx - qw, frame.y1),
                    Point::new(frame.x0, frame.center().y),
                ])
            }
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "type": "shape",
            "x": self.x,
            "y": self.y,
            "width": self.width,
            "height": self.height,
            "rotation": self.rotation,
            "lockAspectRatio": self.lock_aspect_ratio,
            "shapeType": self.shape_type.as_str(),
            "color": self.color.to_hex(),
            "cornerRadius": self.corner_radius,
            "opacity": self.opacity,
            "strokeWidth": self.stroke_width,
            "strokeColor": self.stroke_color.to_hex(),
        })
    }

    pub fn from_json(obj: &JsonMap) -> Result<Self, ElementError> {
        let geometry = Geometry::from_json(obj)?;
        let shape_type = ShapeKind::parse(&opt_string(obj, "shapeType", "rectangle"))
            .unwrap_or_default();
        Ok(Self {
            id: Uuid::new_v4(),
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            rotation: geometry.rotation,
            lock_aspect_ratio: geometry.lock_aspect_ratio,
            shape_type,
            color: opt_color(obj, "color", Rgba::gray()),
            corner_radius: opt_f64(obj, "cornerRadius", 0.0),
            opacity: opt_f64(obj, "opacity", 1.0).clamp(0.0, 1.0),
            stroke_width: opt_f64(obj, "strokeWidth", 0.0),
            stroke_color: opt_color(obj, "strokeColor", Rgba::black()),
        })
    }
}

fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for point in rest {
            path.line_to(*point);
        }
        path.close_path();
    }
    path
}

/// Five-pointed star inscribed in the frame.
fn star_path(frame: Rect) -> BezPath {
    let center = frame.center();
    let outer_rx = frame.width() / 2.0;
    let outer_ry = frame.height() / 2.0;
    let inner = 0.4;

    let mut points = Vec::with_capacity(10);
    for i in 0..10 {
        // Start at the top point, alternate outer and inner vertices.
        let angle = -std::f64::consts::FRAC_PI_2 + i as f64 * std::f64::consts::PI / 5.0;
        let (rx, ry) = if i % 2 == 0 {
            (outer_rx, outer_ry)
        } else {
            (outer_rx * inner, outer_ry * inner)
        };
        points.push(Point::new(
            center.x + rx * angle.cos(),
            center.y + ry * angle.sin(),
        ));
    }
    polygon(&points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_paths_are_nonempty() {
        for kind in [
            ShapeKind::Rectangle,
            ShapeKind::Oval,
            ShapeKind::Line,
            ShapeKind::Triangle,
            ShapeKind::Star,
            ShapeKind::Hexagon,
        ] {
            let shape = ShapeElement::new(Point::new(0.0, 0.0), 100.0, 60.0, kind);
            assert!(
                !shape.outline_path().elements().is_empty(),
                "empty path for {kind:?}"
            );
        }
    }

    #[test]
    fn test_degenerate_outline_is_empty() {
        let mut shape = ShapeElement::new(Point::new(0.0, 0.0), 100.0, 60.0, ShapeKind::Star);
        shape.height = 0.0;
        assert!(shape.outline_path().elements().is_empty());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut shape = ShapeElement::new(Point::new(3.0, 4.0), 80.0, 80.0, ShapeKind::Hexagon);
        shape.color = Rgba::from_hex("#FF8800").unwrap();
        shape.opacity = 0.5;
        shape.stroke_width = 2.0;
        shape.stroke_color = Rgba::from_hex("#112233").unwrap();
        shape.corner_radius = 6.0;

        let restored = ShapeElement::from_json(shape.to_json().as_object().unwrap()).unwrap();
        assert_eq!(restored.shape_type, ShapeKind::Hexagon);
        assert_eq!(restored.color, shape.color);
        assert_eq!(restored.stroke_color, shape.stroke_color);
        assert!((restored.opacity - 0.5).abs() < f64::EPSILON);
        assert!((restored.stroke_width - 2.0).abs() < f64::EPSILON);
        assert!((restored.corner_radius - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_color_substitutes_default() {
        let value = serde_json::json!({
            "type": "shape", "x": 0.0, "y": 0.0, "width": 10.0, "height": 10.0,
            "color": "not-a-color"
        });
        let shape = ShapeElement::from_json(value.as_object().unwrap()).unwrap();
        assert_eq!(shape.color, Rgba::gray());
    }

    #[test]
    fn test_unknown_shape_type_falls_back_to_rectangle() {
        let value = serde_json::json!({
            "type": "shape", "x": 0.0, "y": 0.0, "width": 10.0, "height": 10.0,
            "shapeType": "rhombus"
        });
        let shape = ShapeElement::from_json(value.as_object().unwrap()).unwrap();
        assert_eq!(shape.shape_type, ShapeKind::Rectangle);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let value = serde_json::json!({
            "type": "shape", "x": 0.0, "y": 0.0, "width": 10.0, "height": 10.0,
            "opacity": 7.0
        });
        let shape = ShapeElement::from_json(value.as_object().unwrap()).unwrap();
        assert!((shape.opacity - 1.0).abs() < f64::EPSILON);
    }
}
