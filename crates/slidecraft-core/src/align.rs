//! Alignment guide detection for dragged elements.
//!
//! Guides are detection-only: they report edge and center coincidences for
//! the interaction layer to render, and never move the dragged element.

use kurbo::Rect;

/// Alignment detection threshold in device pixels. Callers divide by the
/// camera scale so the detection band stays the same size on screen.
pub const ALIGNMENT_THRESHOLD: f64 = 10.0;

/// Guide lines detected for the current drag, in document coordinates.
/// Both lists are sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentGuides {
    /// Horizontal lines (y coordinates).
    pub horizontal: Vec<f64>,
    /// Vertical lines (x coordinates).
    pub vertical: Vec<f64>,
}

impl AlignmentGuides {
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }

    pub fn clear(&mut self) {
        self.horizontal.clear();
        self.vertical.clear();
    }

    fn finish(&mut self) {
        sort_dedup(&mut self.horizontal);
        sort_dedup(&mut self.vertical);
    }
}

fn sort_dedup(values: &mut Vec<f64>) {
    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
}

/// X coordinates compared for vertical alignment: left, center, right.
fn x_stops(rect: Rect) -> [f64; 3] {
    [rect.x0, rect.center().x, rect.x1]
}

/// Y coordinates compared for horizontal alignment: top, center, bottom.
fn y_stops(rect: Rect) -> [f64; 3] {
    [rect.y0, rect.center().y, rect.y1]
}

/// Detect alignment guides between `moving` and every other rectangle.
///
/// Each of the moving rect's left/center/right is compared against each other
/// rect's left/center/right (all nine pairings, so a left edge can align with
/// a right edge); any pair within `threshold_device / scale` document units
/// contributes the other rect's coordinate as a vertical guide. The same
/// applies to top/center/bottom for horizontal guides.
pub fn compute_guides(
    moving: Rect,
    others: impl Iterator<Item = Rect>,
    threshold_device: f64,
    scale: f64,
) -> AlignmentGuides {
    let threshold = threshold_device / scale;
    let moving_x = x_stops(moving);
    let moving_y = y_stops(moving);

    let mut guides = AlignmentGuides::default();
    for other in others {
        for other_x in x_stops(other) {
            if moving_x.iter().any(|x| (x - other_x).abs() <= threshold) {
                guides.vertical.push(other_x);
            }
        }
        for other_y in y_stops(other) {
            if moving_y.iter().any(|y| (y - other_y).abs() <= threshold) {
                guides.horizontal.push(other_y);
            }
        }
    }
    guides.finish();
    guides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_edges_within_threshold() {
        // Same-width rects offset by 1: left, center, and right stops all
        // coincide within the threshold, and both neighbors contribute the
        // same three guides, deduplicated.
        let moving = Rect::new(11.0, 100.0, 61.0, 140.0);
        let others = vec![
            Rect::new(10.0, 0.0, 60.0, 40.0),
            Rect::new(10.0, 50.0, 60.0, 90.0),
        ];
        let guides = compute_guides(moving, others.into_iter(), 10.0, 1.0);
        assert_eq!(guides.vertical, vec![10.0, 35.0, 60.0]);
    }

    #[test]
    fn test_cross_edge_alignment() {
        // Moving rect's left edge near another rect's right edge.
        let moving = Rect::new(102.0, 0.0, 152.0, 40.0);
        let other = Rect::new(0.0, 100.0, 100.0, 140.0);
        let guides = compute_guides(moving, std::iter::once(other), 10.0, 1.0);
        assert!(guides.vertical.contains(&100.0));
    }

    #[test]
    fn test_center_alignment() {
        // Centers at x=50 and x=53, within a 10-unit threshold.
        let moving = Rect::new(28.0, 0.0, 78.0, 20.0);
        let other = Rect::new(0.0, 100.0, 100.0, 120.0);
        let guides = compute_guides(moving, std::iter::once(other), 10.0, 1.0);
        assert!(guides.vertical.contains(&50.0));
    }

    #[test]
    fn test_horizontal_guides_from_tops() {
        let moving = Rect::new(200.0, 22.0, 240.0, 62.0);
        let other = Rect::new(0.0, 20.0, 40.0, 60.0);
        let guides = compute_guides(moving, std::iter::once(other), 10.0, 1.0);
        assert!(guides.horizontal.contains(&20.0));
    }

    #[test]
    fn test_threshold_is_scale_invariant() {
        // 8 document units apart; a 10px band covers it at scale 1 but not
        // at scale 2 (where 10px is only 5 document units).
        let moving = Rect::new(18.0, 100.0, 58.0, 140.0);
        let other = Rect::new(10.0, 0.0, 50.0, 40.0);
        let near = compute_guides(moving, std::iter::once(other), 10.0, 1.0);
        assert!(near.vertical.contains(&10.0));
        let far = compute_guides(moving, std::iter::once(other), 10.0, 2.0);
        assert!(!far.vertical.contains(&10.0));
    }

    #[test]
    fn test_no_guides_when_far_apart() {
        let moving = Rect::new(500.0, 500.0, 550.0, 540.0);
        let other = Rect::new(0.0, 0.0, 40.0, 40.0);
        let guides = compute_guides(moving, std::iter::once(other), 10.0, 1.0);
        assert!(guides.is_empty());
    }

    #[test]
    fn test_guides_are_sorted() {
        let moving = Rect::new(0.0, 0.0, 100.0, 100.0);
        let others = vec![
            Rect::new(98.0, 200.0, 198.0, 240.0),
            Rect::new(2.0, 300.0, 42.0, 340.0),
        ];
        let guides = compute_guides(moving, others.into_iter(), 10.0, 1.0);
        let mut sorted = guides.vertical.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(guides.vertical, sorted);
    }
}
