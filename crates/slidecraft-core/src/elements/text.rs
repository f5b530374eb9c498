//! Text element.

use super::{opt_bool, opt_color, opt_f64, opt_string, ElementId, Geometry, JsonMap, Rgba};
use crate::error::ElementError;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::RwLock;
use uuid::Uuid;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlignment::Left => "left",
            TextAlignment::Center => "center",
            TextAlignment::Right => "right",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(TextAlignment::Left),
            "center" => Some(TextAlignment::Center),
            "right" => Some(TextAlignment::Right),
            _ => None,
        }
    }
}

/// Line-wrapped layout derived from content, width, and font attributes.
/// Never serialized; recomputed lazily after any relevant field changes.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// Wrapped lines, in display order.
    pub lines: Vec<String>,
    /// Vertical advance per line.
    pub line_height: f64,
}

/// A block of text on the slide.
#[derive(Debug)]
pub struct TextElement {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees around the element center.
    pub rotation: f64,
    pub lock_aspect_ratio: bool,
    pub content: String,
    pub font_size: f64,
    pub color: Rgba,
    pub bold: bool,
    pub medium: bool,
    pub italic: bool,
    pub alignment: TextAlignment,
    /// Memoized wrapped layout. Interior mutability so reads during
    /// rendering can populate it; cleared whenever content, size, or font
    /// attributes change. Direct field edits must call
    /// [`TextElement::invalidate_layout`].
    cached_layout: RwLock<Option<TextLayout>>,
}

impl Clone for TextElement {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            rotation: self.rotation,
            lock_aspect_ratio: self.lock_aspect_ratio,
            content: self.content.clone(),
            font_size: self.font_size,
            color: self.color,
            bold: self.bold,
            medium: self.medium,
            italic: self.italic,
            alignment: self.alignment,
            // Clone the cached value, not the lock.
            cached_layout: RwLock::new(self.cached_layout.read().ok().and_then(|g| g.clone())),
        }
    }
}

impl TextElement {
    /// Default font size in document units.
    pub const DEFAULT_FONT_SIZE: f64 = 16.0;

    /// Create a new text element with default styling.
    pub fn new(origin: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: origin.x,
            y: origin.y,
            width: 160.0,
            height: 40.0,
            rotation: 0.0,
            lock_aspect_ratio: false,
            content,
            font_size: Self::DEFAULT_FONT_SIZE,
            color: Rgba::black(),
            bold: false,
            medium: false,
            italic: false,
            alignment: TextAlignment::Left,
            cached_layout: RwLock::new(None),
        }
    }

    /// Replace the content and drop the derived layout.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.invalidate_layout();
    }

    /// Set the frame, scaling the font by the mean of the width and height
    /// ratios. Text is the only variant whose styling tracks its geometry.
    pub fn set_frame(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let rw = width / self.width.max(f64::EPSILON);
        let rh = height / self.height.max(f64::EPSILON);
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        let ratio = (rw + rh) / 2.0;
        if (ratio - 1.0).abs() > f64::EPSILON {
            self.font_size *= ratio;
            self.invalidate_layout();
        }
    }

    /// Clear the cached layout; the next [`TextElement::layout`] recomputes.
    pub fn invalidate_layout(&self) {
        if let Ok(mut cache) = self.cached_layout.write() {
            *cache = None;
        }
    }

    /// The wrapped layout for the current content, width, and font.
    pub fn layout(&self) -> TextLayout {
        if let Ok(cache) = self.cached_layout.read() {
            if let Some(layout) = cache.as_ref() {
                return layout.clone();
            }
        }
        let layout = self.compute_layout();
        if let Ok(mut cache) = self.cached_layout.write() {
            *cache = Some(layout.clone());
        }
        layout
    }

    /// Average glyph advance as a fraction of the font size. Heavier weights
    /// run wider; empirically tuned, same approach as any approximate
    /// monospace-factor layout.
    fn char_width_factor(&self) -> f64 {
        if self.bold {
            0.60
        } else if self.medium {
            0.57
        } else {
            0.55
        }
    }

    fn compute_layout(&self) -> TextLayout {
        let font_size = self.font_size.max(1.0);
        let char_width = font_size * self.char_width_factor();
        let max_chars = ((self.width / char_width).floor() as usize).max(1);

        let mut lines = Vec::new();
        for paragraph in self.content.split('\n') {
            if paragraph.is_empty() {
                lines.push(String::new());
                continue;
            }
            let mut line = String::new();
            for word in paragraph.split_whitespace() {
                if line.is_empty() {
                    line.push_str(word);
                } else if line.chars().count() + 1 + word.chars().count() <= max_chars {
                    line.push(' ');
                    line.push_str(word);
                } else {
                    lines.push(std::mem::take(&mut line));
                    line.push_str(word);
                }
            }
            lines.push(line);
        }

        TextLayout {
            lines,
            line_height: font_size * 1.2,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "type": "text",
            "x": self.x,
            "y": self.y,
            "width": self.width,
            "height": self.height,
            "rotation": self.rotation,
            "lockAspectRatio": self.lock_aspect_ratio,
            "text": self.content,
            "fontSize": self.font_size,
            "color": self.color.to_hex(),
            "bold": self.bold,
            "medium": self.medium,
            "italic": self.italic,
            "alignment": self.alignment.as_str(),
        })
    }

    pub fn from_json(obj: &JsonMap) -> Result<Self, ElementError> {
        let geometry = Geometry::from_json(obj)?;
        let alignment = obj
            .get("alignment")
            .and_then(Value::as_str)
            .and_then(TextAlignment::parse)
            .unwrap_or_default();
        Ok(Self {
            id: Uuid::new_v4(),
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            rotation: geometry.rotation,
            lock_aspect_ratio: geometry.lock_aspect_ratio,
            content: opt_string(obj, "text", ""),
            font_size: opt_f64(obj, "fontSize", Self::DEFAULT_FONT_SIZE),
            color: opt_color(obj, "color", Rgba::black()),
            bold: opt_bool(obj, "bold", false),
            medium: opt_bool(obj, "medium", false),
            italic: opt_bool(obj, "italic", false),
            alignment,
            cached_layout: RwLock::new(None),
        })
    }
}
