//! Selection handle placement and hit testing.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Handle hit tolerance in device pixels. Callers divide by the camera scale
/// so the hit area stays the same size on screen at any zoom level.
pub const HANDLE_HIT_TOLERANCE: f64 = 20.0;

/// Corner handle positions, numbered in the order resize logic expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl HandleCorner {
    pub const ALL: [HandleCorner; 4] = [
        HandleCorner::TopLeft,
        HandleCorner::TopRight,
        HandleCorner::BottomLeft,
        HandleCorner::BottomRight,
    ];

    pub fn index(&self) -> usize {
        match self {
            HandleCorner::TopLeft => 0,
            HandleCorner::TopRight => 1,
            HandleCorner::BottomLeft => 2,
            HandleCorner::BottomRight => 3,
        }
    }

    /// The corner's position on a bounding rectangle.
    pub fn position(&self, bounds: Rect) -> Point {
        match self {
            HandleCorner::TopLeft => Point::new(bounds.x0, bounds.y0),
            HandleCorner::TopRight => Point::new(bounds.x1, bounds.y0),
            HandleCorner::BottomLeft => Point::new(bounds.x0, bounds.y1),
            HandleCorner::BottomRight => Point::new(bounds.x1, bounds.y1),
        }
    }
}

/// Corner positions for a bounding rectangle, in handle index order.
pub fn corner_positions(bounds: Rect) -> [Point; 4] {
    [
        HandleCorner::TopLeft.position(bounds),
        HandleCorner::TopRight.position(bounds),
        HandleCorner::BottomLeft.position(bounds),
        HandleCorner::BottomRight.position(bounds),
    ]
}

/// Test a document-space point against the four corner handles of `bounds`.
///
/// `tolerance` is in document units; pass `HANDLE_HIT_TOLERANCE / scale` for
/// a scale-invariant hit area. Returns the nearest corner within a Euclidean
/// distance of `tolerance`; nearest matters when the element is small enough
/// for handle hit areas to overlap.
pub fn hit_test_handles(bounds: Rect, point: Point, tolerance: f64) -> Option<HandleCorner> {
    let tolerance_sq = tolerance * tolerance;
    HandleCorner::ALL
        .into_iter()
        .map(|corner| {
            let pos = corner.position(bounds);
            let dx = point.x - pos.x;
            let dy = point.y - pos.y;
            (corner, dx * dx + dy * dy)
        })
        .filter(|&(_, dist_sq)| dist_sq <= tolerance_sq)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(corner, _)| corner)
}
