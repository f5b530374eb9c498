//! Gesture state machine driving selection, move, and resize.

use crate::align::{compute_guides, AlignmentGuides, ALIGNMENT_THRESHOLD};
use crate::camera::Camera;
use crate::document::SlideDocument;
use crate::elements::{ElementId, MIN_SIZE};
use crate::handles::{hit_test_handles, HandleCorner, HANDLE_HIT_TOLERANCE};
use kurbo::{Point, Rect, Vec2};

/// Drag distance in device pixels beyond which an active alignment guide is
/// discarded, divided by the camera scale like the other thresholds.
pub const SNAP_BREAK_THRESHOLD: f64 = 15.0;

/// Raw pointer protocol consumed by the session, in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release,
    Cancel,
}

/// Notifications emitted synchronously as gestures mutate the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    /// The selection changed; `None` means it was cleared.
    ElementSelected(Option<ElementId>),
    /// Some element's geometry changed.
    ElementUpdated,
}

/// Drag state. Points are in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Moving {
        last: Point,
        /// A guide is currently latched for display.
        snapped: bool,
        /// Displacement accumulated since the guide latched.
        travel_since_snap: Vec2,
    },
    Resizing {
        corner: HandleCorner,
        last: Point,
    },
}

/// One editing session: the document, the view transform, the selection, and
/// the gesture state machine tying them together.
///
/// Single-threaded and synchronous; every pointer event is fully processed
/// before the next one arrives, so no operation here can fail or block.
#[derive(Debug)]
pub struct EditorSession {
    pub document: SlideDocument,
    pub camera: Camera,
    selection: Option<ElementId>,
    drag: DragState,
    guides: AlignmentGuides,
    events: Vec<EditorEvent>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(SlideDocument::new())
    }
}

impl EditorSession {
    pub fn new(document: SlideDocument) -> Self {
        Self {
            document,
            camera: Camera::new(),
            selection: None,
            drag: DragState::Idle,
            guides: AlignmentGuides::default(),
            events: Vec::new(),
        }
    }

    /// Replace the document wholesale, dropping selection and drag state.
    pub fn load_document(&mut self, document: SlideDocument) {
        log::debug!("loading document with {} elements", document.len());
        self.document = document;
        self.drag = DragState::Idle;
        self.guides.clear();
        self.set_selection(None);
    }

    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// Guides detected for the drag in progress, for the render layer.
    pub fn guides(&self) -> &AlignmentGuides {
        &self.guides
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != DragState::Idle
    }

    /// Drain the events accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Change the selection, emitting a notification when it differs.
    pub fn set_selection(&mut self, selection: Option<ElementId>) {
        if self.selection != selection {
            log::debug!("selection changed to {selection:?}");
            self.selection = selection;
            self.events.push(EditorEvent::ElementSelected(selection));
        }
    }

    /// Feed one pointer event through the state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press(device) => self.on_press(self.camera.to_document(device)),
            PointerEvent::Move(device) => self.on_move(self.camera.to_document(device)),
            PointerEvent::Release | PointerEvent::Cancel => self.on_release(),
        }
    }

    /// Pinch gesture: focus-preserving zoom. Ignored while a drag is active
    /// so a stray second finger cannot rescale mid-move.
    pub fn pinch(&mut self, focus: Point, delta_scale: f64) {
        if self.drag == DragState::Idle {
            self.camera.apply_zoom(focus, delta_scale);
        }
    }

    /// Double tap: reset the view transform. Ignored while dragging.
    pub fn double_tap(&mut self) {
        if self.drag == DragState::Idle {
            self.camera.reset();
        }
    }

    fn on_press(&mut self, point: Point) {
        // Handle hit on the current selection wins over any body hit.
        if let Some(bounds) = self.selection.and_then(|id| {
            self.document.element(id).map(|e| e.bounds())
        }) {
            let tolerance = HANDLE_HIT_TOLERANCE / self.camera.scale;
            if let Some(corner) = hit_test_handles(bounds, point, tolerance) {
                self.drag = DragState::Resizing {
                    corner,
                    last: point,
                };
                return;
            }
            if crate::elements::point_in_bounds(bounds, point) {
                self.drag = DragState::Moving {
                    last: point,
                    snapped: false,
                    travel_since_snap: Vec2::ZERO,
                };
                return;
            }
        }

        match self.document.topmost_at(point) {
            Some(id) => {
                self.set_selection(Some(id));
                self.drag = DragState::Moving {
                    last: point,
                    snapped: false,
                    travel_since_snap: Vec2::ZERO,
                };
            }
            None => {
                self.set_selection(None);
                self.drag = DragState::Idle;
                self.guides.clear();
            }
        }
    }

    fn on_move(&mut self, point: Point) {
        match self.drag {
            DragState::Idle => {}
            DragState::Moving {
                last,
                snapped,
                travel_since_snap,
            } => {
                let delta = point - last;
                let Some(id) = self.selection else {
                    self.drag = DragState::Idle;
                    return;
                };
                let Some(element) = self.document.element_mut(id) else {
                    self.drag = DragState::Idle;
                    return;
                };
                element.translate_by(delta);
                let bounds = element.bounds();

                let mut snapped = snapped;
                let mut travel = travel_since_snap;
                if snapped {
                    // Keep the latched guide until the drag pulls far enough
                    // away from it.
                    travel += delta;
                    if travel.hypot() > SNAP_BREAK_THRESHOLD / self.camera.scale {
                        snapped = false;
                        self.guides.clear();
                    }
                }
                if !snapped {
                    self.guides = self.compute_drag_guides(id, bounds);
                    if !self.guides.is_empty() {
                        snapped = true;
                        travel = Vec2::ZERO;
                    }
                }

                self.events.push(EditorEvent::ElementUpdated);
                self.drag = DragState::Moving {
                    last: point,
                    snapped,
                    travel_since_snap: travel,
                };
            }
            DragState::Resizing { corner, last } => {
                let delta = point - last;
                let Some(id) = self.selection else {
                    self.drag = DragState::Idle;
                    return;
                };
                let Some(element) = self.document.element_mut(id) else {
                    self.drag = DragState::Idle;
                    return;
                };
                let frame = resized_frame(
                    element.bounds(),
                    corner,
                    delta,
                    element.lock_aspect_ratio(),
                );
                element.set_frame(frame);
                let bounds = element.bounds();

                self.guides = self.compute_drag_guides(id, bounds);
                self.events.push(EditorEvent::ElementUpdated);
                self.drag = DragState::Resizing {
                    corner,
                    last: point,
                };
            }
        }
    }

    fn on_release(&mut self) {
        self.drag = DragState::Idle;
        self.guides.clear();
    }

    fn compute_drag_guides(&self, moving_id: ElementId, moving: Rect) -> AlignmentGuides {
        let others = self
            .document
            .elements()
            .iter()
            .filter(|e| e.id() != moving_id)
            .map(|e| e.bounds());
        compute_guides(moving, others, ALIGNMENT_THRESHOLD, self.camera.scale)
    }
}

/// Apply a corner drag to a bounding rectangle.
///
/// The opposite corner stays anchored; the dragged edges are clamped so
/// neither extent drops below [`MIN_SIZE`]. With `lock_aspect` the width and
/// height ratios are averaged into one uniform scale about the anchor.
fn resized_frame(bounds: Rect, corner: HandleCorner, delta: Vec2, lock_aspect: bool) -> Rect {
    let (mut x0, mut y0, mut x1, mut y1) = (bounds.x0, bounds.y0, bounds.x1, bounds.y1);
    match corner {
        HandleCorner::TopLeft => {
            x0 = (x0 + delta.x).min(x1 - MIN_SIZE);
            y0 = (y0 + delta.y).min(y1 - MIN_SIZE);
        }
        HandleCorner::TopRight => {
            x1 = (x1 + delta.x).max(x0 + MIN_SIZE);
            y0 = (y0 + delta.y).min(y1 - MIN_SIZE);
        }
        HandleCorner::BottomLeft => {
            x0 = (x0 + delta.x).min(x1 - MIN_SIZE);
            y1 = (y1 + delta.y).max(y0 + MIN_SIZE);
        }
        HandleCorner::BottomRight => {
            x1 = (x1 + delta.x).max(x0 + MIN_SIZE);
            y1 = (y1 + delta.y).max(y0 + MIN_SIZE);
        }
    }

    if !lock_aspect || bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        return Rect::new(x0, y0, x1, y1);
    }

    let scale = ((x1 - x0) / bounds.width() + (y1 - y0) / bounds.height()) / 2.0;
    let scale = scale
        .max(MIN_SIZE / bounds.width())
        .max(MIN_SIZE / bounds.height());
    let w = bounds.width() * scale;
    let h = bounds.height() * scale;
    match corner {
        HandleCorner::TopLeft => Rect::new(x1 - w, y1 - h, x1, y1),
        HandleCorner::TopRight => Rect::new(x0, y1 - h, x0 + w, y1),
        HandleCorner::BottomLeft => Rect::new(x1 - w, y0, x1, y0 + h),
        HandleCorner::BottomRight => Rect::new(x0, y0, x0 + w, y0 + h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ShapeElement, ShapeKind, SlideElement, TextElement};

    fn session_with_text() -> (EditorSession, ElementId) {
        let mut doc = SlideDocument::new();
        let mut text = TextElement::new(Point::new(10.0, 10.0), "Hi".to_string());
        text.width = 100.0;
        text.height = 20.0;
        let id = doc.add(SlideElement::Text(text));
        (EditorSession::new(doc), id)
    }

    fn shape_element(x: f64, y: f64, w: f64, h: f64) -> SlideElement {
        SlideElement::Shape(ShapeElement::new(
            Point::new(x, y),
            w,
            h,
            ShapeKind::Rectangle,
        ))
    }

    #[test]
    fn test_press_move_release_gesture() {
        let (mut session, id) = session_with_text();

        session.handle_pointer(PointerEvent::Press(Point::new(50.0, 15.0)));
        session.handle_pointer(PointerEvent::Move(Point::new(52.0, 17.0)));
        session.handle_pointer(PointerEvent::Move(Point::new(55.0, 20.0)));
        session.handle_pointer(PointerEvent::Release);

        let bounds = session.document.element(id).unwrap().bounds();
        assert!((bounds.x0 - 15.0).abs() < 1e-9);
        assert!((bounds.y0 - 15.0).abs() < 1e-9);

        let events = session.take_events();
        let selected = events
            .iter()
            .filter(|e| matches!(e, EditorEvent::ElementSelected(Some(_))))
            .count();
        let updated = events
            .iter()
            .filter(|e| matches!(e, EditorEvent::ElementUpdated))
            .count();
        assert_eq!(selected, 1);
        assert_eq!(updated, 2);
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_press_on_empty_space_clears_selection() {
        let (mut session, id) = session_with_text();
        session.handle_pointer(PointerEvent::Press(Point::new(50.0, 15.0)));
        session.handle_pointer(PointerEvent::Release);
        assert_eq!(session.selection(), Some(id));
        session.take_events();

        session.handle_pointer(PointerEvent::Press(Point::new(500.0, 500.0)));
        assert_eq!(session.selection(), None);
        assert_eq!(
            session.take_events(),
            vec![EditorEvent::ElementSelected(None)]
        );
    }

    #[test]
    fn test_handle_hit_wins_over_body() {
        let mut doc = SlideDocument::new();
        let id = doc.add(shape_element(0.0, 0.0, 100.0, 100.0));
        let mut session = EditorSession::new(doc);
        session.set_selection(Some(id));
        session.take_events();

        // Inside the body but within handle tolerance of the top-left corner.
        session.handle_pointer(PointerEvent::Press(Point::new(5.0, 5.0)));
        session.handle_pointer(PointerEvent::Move(Point::new(15.0, 25.0)));
        session.handle_pointer(PointerEvent::Release);

        let bounds = session.document.element(id).unwrap().bounds();
        // Top-left resize: origin moved, opposite corner anchored.
        assert!((bounds.x0 - 10.0).abs() < 1e-9);
        assert!((bounds.y0 - 20.0).abs() < 1e-9);
        assert!((bounds.x1 - 100.0).abs() < 1e-9);
        assert!((bounds.y1 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_resize_clamps_to_min_size() {
        let mut doc = SlideDocument::new();
        let id = doc.add(shape_element(0.0, 0.0, 50.0, 50.0));
        let mut session = EditorSession::new(doc);
        session.set_selection(Some(id));

        // Grab the bottom-right handle and drag far past the opposite corner.
        session.handle_pointer(PointerEvent::Press(Point::new(50.0, 50.0)));
        session.handle_pointer(PointerEvent::Move(Point::new(-200.0, -200.0)));
        session.handle_pointer(PointerEvent::Release);

        let bounds = session.document.element(id).unwrap().bounds();
        assert!((bounds.width() - MIN_SIZE).abs() < 1e-9);
        assert!((bounds.height() - MIN_SIZE).abs() < 1e-9);
        assert!((bounds.x0).abs() < 1e-9);
        assert!((bounds.y0).abs() < 1e-9);
    }

    #[test]
    fn test_locked_aspect_resize_is_uniform() {
        let mut doc = SlideDocument::new();
        let mut shape =
            ShapeElement::new(Point::new(0.0, 0.0), 100.0, 50.0, ShapeKind::Rectangle);
        shape.lock_aspect_ratio = true;
        let id = doc.add(SlideElement::Shape(shape));
        let mut session = EditorSession::new(doc);
        session.set_selection(Some(id));

        session.handle_pointer(PointerEvent::Press(Point::new(100.0, 50.0)));
        session.handle_pointer(PointerEvent::Move(Point::new(140.0, 50.0)));
        session.handle_pointer(PointerEvent::Release);

        let bounds = session.document.element(id).unwrap().bounds();
        let aspect = bounds.width() / bounds.height();
        assert!((aspect - 2.0).abs() < 1e-9);
        // Anchor corner unchanged.
        assert!((bounds.x0).abs() < 1e-9);
        assert!((bounds.y0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_near_shared_edge_detects_guide() {
        let mut doc = SlideDocument::new();
        doc.add(shape_element(10.0, 0.0, 50.0, 40.0));
        doc.add(shape_element(10.0, 50.0, 50.0, 40.0));
        doc.add(shape_element(100.0, 100.0, 50.0, 40.0));
        let mut session = EditorSession::new(doc);

        // Drag the third element so its left edge lands at x=11.
        session.handle_pointer(PointerEvent::Press(Point::new(120.0, 120.0)));
        session.handle_pointer(PointerEvent::Move(Point::new(31.0, 120.0)));

        assert!(session.guides().vertical.contains(&10.0));

        session.handle_pointer(PointerEvent::Release);
        assert!(session.guides().is_empty());
    }

    #[test]
    fn test_guides_do_not_snap_position() {
        let mut doc = SlideDocument::new();
        doc.add(shape_element(10.0, 0.0, 50.0, 40.0));
        let id = doc.add(shape_element(100.0, 100.0, 50.0, 40.0));
        let mut session = EditorSession::new(doc);

        session.handle_pointer(PointerEvent::Press(Point::new(120.0, 120.0)));
        session.handle_pointer(PointerEvent::Move(Point::new(31.0, 120.0)));

        // Guide detected at x=10 but the element stays at x=11.
        assert!(session.guides().vertical.contains(&10.0));
        let bounds = session.document.element(id).unwrap().bounds();
        assert!((bounds.x0 - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_snap_breaks_after_enough_travel() {
        let mut doc = SlideDocument::new();
        doc.add(shape_element(10.0, 0.0, 20.0, 40.0));
        doc.add(shape_element(100.0, 100.0, 50.0, 40.0));
        let mut session = EditorSession::new(doc);

        session.handle_pointer(PointerEvent::Press(Point::new(120.0, 120.0)));
        session.handle_pointer(PointerEvent::Move(Point::new(31.0, 120.0)));
        assert!(!session.guides().is_empty());

        // Small drift stays latched; the guide holds even past the
        // detection threshold.
        session.handle_pointer(PointerEvent::Move(Point::new(41.0, 120.0)));
        assert!(!session.guides().is_empty());

        // Crossing the break distance discards the guide, and nothing
        // re-latches once the element is far from every stop.
        session.handle_pointer(PointerEvent::Move(Point::new(81.0, 120.0)));
        assert!(session.guides().is_empty());
    }

    #[test]
    fn test_pinch_ignored_while_dragging() {
        let (mut session, _) = session_with_text();
        session.handle_pointer(PointerEvent::Press(Point::new(50.0, 15.0)));
        session.pinch(Point::new(0.0, 0.0), 2.0);
        assert!((session.camera.scale - 1.0).abs() < f64::EPSILON);

        session.handle_pointer(PointerEvent::Release);
        session.pinch(Point::new(0.0, 0.0), 2.0);
        assert!((session.camera.scale - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_double_tap_resets_transform() {
        let (mut session, _) = session_with_text();
        session.camera.apply_zoom(Point::new(40.0, 40.0), 1.5);
        session.camera.pan(Vec2::new(5.0, 5.0));
        session.double_tap();
        assert!((session.camera.scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(session.camera.translate, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_events_respect_camera_transform() {
        let (mut session, id) = session_with_text();
        session.camera.scale = 2.0;

        // Device (100, 30) is document (50, 15), inside the element.
        session.handle_pointer(PointerEvent::Press(Point::new(100.0, 30.0)));
        assert_eq!(session.selection(), Some(id));

        // A 10-device-pixel move is 5 document units at scale 2.
        session.handle_pointer(PointerEvent::Move(Point::new(110.0, 30.0)));
        session.handle_pointer(PointerEvent::Release);
        let bounds = session.document.element(id).unwrap().bounds();
        assert!((bounds.x0 - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_moving_small_element_keeps_its_size() {
        let json = r##"{"elements":[
            {"type":"text","x":10,"y":10,"width":5,"height":5,"text":"tiny","fontSize":12}
        ]}"##;
        let doc = SlideDocument::from_json(json).unwrap();
        let id = doc.elements()[0].id();
        let mut session = EditorSession::new(doc);

        session.handle_pointer(PointerEvent::Press(Point::new(12.0, 12.0)));
        session.handle_pointer(PointerEvent::Move(Point::new(17.0, 12.0)));
        session.handle_pointer(PointerEvent::Release);

        let SlideElement::Text(text) = session.document.element(id).unwrap() else {
            panic!("expected text element");
        };
        // A pure move never clamps to the resize minimum or rescales fonts.
        assert!((text.x - 15.0).abs() < 1e-9);
        assert!((text.width - 5.0).abs() < f64::EPSILON);
        assert!((text.font_size - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cancel_behaves_like_release() {
        let (mut session, _) = session_with_text();
        session.handle_pointer(PointerEvent::Press(Point::new(50.0, 15.0)));
        assert!(session.is_dragging());
        session.handle_pointer(PointerEvent::Cancel);
        assert!(!session.is_dragging());
        assert!(session.guides().is_empty());
    }

    #[test]
    fn test_text_resize_scales_font() {
        let (mut session, id) = session_with_text();
        session.set_selection(Some(id));

        // Bottom-right drag: +100 width, +20 height on a 100x20 element.
        // Mean ratio (2.0 + 2.0) / 2 = 2.0.
        session.handle_pointer(PointerEvent::Press(Point::new(110.0, 30.0)));
        session.handle_pointer(PointerEvent::Move(Point::new(210.0, 50.0)));
        session.handle_pointer(PointerEvent::Release);

        let SlideElement::Text(text) = session.document.element(id).unwrap() else {
            panic!("expected text element");
        };
        assert!((text.font_size - 32.0).abs() < 1e-9);
    }
}
