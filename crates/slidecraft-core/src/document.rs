//! Slide document and z-order management.

use crate::elements::{ElementId, Rgba, SlideElement};
use crate::error::ElementError;
use kurbo::Point;
use serde_json::{json, Value};

/// A slide document: a background color and an ordered element sequence.
/// Sequence order is paint order, back to front.
#[derive(Debug, Clone)]
pub struct SlideDocument {
    pub background_color: Rgba,
    elements: Vec<SlideElement>,
}

impl Default for SlideDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SlideDocument {
    /// Create a new empty document with a white background.
    pub fn new() -> Self {
        Self {
            background_color: Rgba::white(),
            elements: Vec::new(),
        }
    }

    /// Append an element on top of the paint order.
    pub fn add(&mut self, element: SlideElement) -> ElementId {
        let id = element.id();
        self.elements.push(element);
        id
    }

    /// Insert an element at a specific paint-order position.
    pub fn insert(&mut self, index: usize, element: SlideElement) -> ElementId {
        let id = element.id();
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
        id
    }

    /// Remove an element, returning it if present.
    pub fn remove(&mut self, id: ElementId) -> Option<SlideElement> {
        let index = self.index_of(id)?;
        Some(self.elements.remove(index))
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, id: ElementId) -> Option<&SlideElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut SlideElement> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Elements in paint order (back to front).
    pub fn elements(&self) -> &[SlideElement] {
        &self.elements
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Move an element to the top of the paint order.
    pub fn bring_to_front(&mut self, id: ElementId) {
        if let Some(index) = self.index_of(id) {
            let element = self.elements.remove(index);
            self.elements.push(element);
        }
    }

    /// Move an element to the bottom of the paint order.
    pub fn send_to_back(&mut self, id: ElementId) {
        if let Some(index) = self.index_of(id) {
            let element = self.elements.remove(index);
            self.elements.insert(0, element);
        }
    }

    /// Move an element one step toward the front.
    pub fn bring_forward(&mut self, id: ElementId) {
        if let Some(index) = self.index_of(id) {
            if index + 1 < self.elements.len() {
                self.elements.swap(index, index + 1);
            }
        }
    }

    /// Move an element one step toward the back.
    pub fn send_backward(&mut self, id: ElementId) {
        if let Some(index) = self.index_of(id) {
            if index > 0 {
                self.elements.swap(index, index - 1);
            }
        }
    }

    /// Find the topmost element whose bounds contain `point` (document
    /// coordinates). Scans in reverse paint order; O(n), element counts are
    /// small enough that no spatial index is warranted.
    pub fn topmost_at(&self, point: Point) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.contains_point(point))
            .map(|e| e.id())
    }

    /// Serialize the whole document to the wire format.
    pub fn to_json(&self) -> Value {
        let elements: Vec<Value> = self.elements.iter().map(SlideElement::to_json).collect();
        json!({
            "backgroundColor": self.background_color.to_hex(),
            "elements": elements,
        })
    }

    /// Load a document from its wire format.
    ///
    /// Element-level problems do not abort the load: a malformed element is
    /// skipped with a warning, an unparsable background color falls back to
    /// white, and an unknown element type becomes a visible text placeholder.
    /// Only top-level JSON syntax errors are fatal.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;

        let background_color = value
            .get("backgroundColor")
            .and_then(Value::as_str)
            .map(|hex| {
                Rgba::from_hex(hex).unwrap_or_else(|err| {
                    log::warn!("using default background: {err}");
                    Rgba::white()
                })
            })
            .unwrap_or_else(Rgba::white);

        let mut document = Self {
            background_color,
            elements: Vec::new(),
        };
        let entries = value.get("elements").and_then(Value::as_array);
        for entry in entries.into_iter().flatten() {
            match SlideElement::from_json(entry) {
                Ok(element) => {
                    document.elements.push(element);
                }
                Err(ElementError::UnknownElementType(kind)) => {
                    log::warn!("substituting placeholder for element type {kind:?}");
                    document
                        .elements
                        .push(SlideElement::placeholder_for_unknown(&kind, entry));
                }
                Err(err) => {
                    log::warn!("skipping element: {err}");
                }
            }
        }
        Ok(document)
    }
}
