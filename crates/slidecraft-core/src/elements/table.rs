//! Table element.

use super::{opt_color, opt_f64, ElementId, Geometry, JsonMap, Rgba};
use crate::error::ElementError;
use kurbo::Point;
use serde_json::{json, Value};
use uuid::Uuid;

/// A rows×columns grid of text cells.
#[derive(Debug, Clone)]
pub struct TableElement {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees around the element center.
    pub rotation: f64,
    pub lock_aspect_ratio: bool,
    pub rows: usize,
    pub columns: usize,
    /// Cell contents; always exactly `rows` × `columns` after any mutation.
    data: Vec<Vec<String>>,
    pub header_color: Rgba,
    pub cell_color: Rgba,
    pub border_color: Rgba,
    pub border_width: f64,
}

impl TableElement {
    pub const DEFAULT_ROWS: usize = 2;
    pub const DEFAULT_COLUMNS: usize = 2;

    /// Create a new table with empty cells.
    pub fn new(origin: Point, width: f64, height: f64, rows: usize, columns: usize) -> Self {
        let rows = rows.max(1);
        let columns = columns.max(1);
        Self {
            id: Uuid::new_v4(),
            x: origin.x,
            y: origin.y,
            width,
            height,
            rotation: 0.0,
            lock_aspect_ratio: false,
            rows,
            columns,
            data: vec![vec![String::new(); columns]; rows],
            header_color: Rgba::new(0xDD, 0xDD, 0xDD, 255),
            cell_color: Rgba::white(),
            border_color: Rgba::black(),
            border_width: 1.0,
        }
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.data.get(row)?.get(column).map(String::as_str)
    }

    pub fn set_cell(&mut self, row: usize, column: usize, value: String) {
        if let Some(cell) = self.data.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = value;
        }
    }

    /// Resize the grid, preserving existing cell contents where they fit.
    pub fn set_grid_size(&mut self, rows: usize, columns: usize) {
        let rows = rows.max(1);
        let columns = columns.max(1);
        self.data.resize(rows, vec![String::new(); columns]);
        for row in &mut self.data {
            row.resize(columns, String::new());
        }
        self.rows = rows;
        self.columns = columns;
    }

    pub fn grid(&self) -> &[Vec<String>] {
        &self.data
    }

    pub fn to_json(&self) -> Value {
        json!({
            "type": "table",
            "x": self.x,
            "y": self.y,
            "width": self.width,
            "height": self.height,
            "rotation": self.rotation,
            "lockAspectRatio": self.lock_aspect_ratio,
            "rows": self.rows,
            "columns": self.columns,
            "data": self.data,
            "headerColor": self.header_color.to_hex(),
            "cellColor": self.cell_color.to_hex(),
            "borderColor": self.border_color.to_hex(),
            "borderWidth": self.border_width,
        })
    }

    pub fn from_json(obj: &JsonMap) -> Result<Self, ElementError> {
        let geometry = Geometry::from_json(obj)?;
        let rows = obj
            .get("rows")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(Self::DEFAULT_ROWS)
            .max(1);
        let columns = obj
            .get("columns")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(Self::DEFAULT_COLUMNS)
            .max(1);

        // Normalize whatever grid came over the wire to rows × columns.
        let mut data: Vec<Vec<String>> = obj
            .get("data")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .map(|row| {
                        row.as_array()
                            .map(|cells| {
                                cells
                                    .iter()
                                    .map(|c| c.as_str().unwrap_or_default().to_string())
                                    .collect()
                            })
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default();
        data.resize(rows, vec![String::new(); columns]);
        for row in &mut data {
            row.resize(columns, String::new());
        }

        Ok(Self {
            id: Uuid::new_v4(),
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            rotation: geometry.rotation,
            lock_aspect_ratio: geometry.lock_aspect_ratio,
            rows,
            columns,
            data,
            header_color: opt_color(obj, "headerColor", Rgba::new(0xDD, 0xDD, 0xDD, 255)),
            cell_color: opt_color(obj, "cellColor", Rgba::white()),
            border_color: opt_color(obj, "borderColor", Rgba::black()),
            border_width: opt_f64(obj, "borderWidth", 1.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_has_empty_grid() {
        let table = TableElement::new(Point::new(0.0, 0.0), 200.0, 100.0, 3, 4);
        assert_eq!(table.rows, 3);
        assert_eq!(table.columns, 4);
        assert_eq!(table.cell(2, 3), Some(""));
        assert_eq!(table.cell(3, 0), None);
    }

    #[test]
    fn test_grid_resize_preserves_cells() {
        let mut table = TableElement::new(Point::new(0.0, 0.0), 200.0, 100.0, 2, 2);
        table.set_cell(0, 0, "keep".to_string());
        table.set_grid_size(3, 3);
        assert_eq!(table.cell(0, 0), Some("keep"));
        assert_eq!(table.cell(2, 2), Some(""));

        table.set_grid_size(1, 1);
        assert_eq!(table.cell(0, 0), Some("keep"));
        assert_eq!(table.cell(0, 1), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut table = TableElement::new(Point::new(10.0, 10.0), 300.0, 150.0, 2, 3);
        table.set_cell(0, 1, "Q1".to_string());
        table.set_cell(1, 2, "42".to_string());
        table.border_width = 2.0;
        table.header_color = Rgba::from_hex("#336699").unwrap();

        let restored = TableElement::from_json(table.to_json().as_object().unwrap()).unwrap();
        assert_eq!(restored.rows, 2);
        assert_eq!(restored.columns, 3);
        assert_eq!(restored.cell(0, 1), Some("Q1"));
        assert_eq!(restored.cell(1, 2), Some("42"));
        assert_eq!(restored.header_color, table.header_color);
        assert!((restored.border_width - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ragged_wire_grid_is_normalized() {
        let value = serde_json::json!({
            "type": "table", "x": 0.0, "y": 0.0, "width": 100.0, "height": 50.0,
            "rows": 2, "columns": 3,
            "data": [["a"], ["b", "c", "d", "extra"]]
        });
        let table = TableElement::from_json(value.as_object().unwrap()).unwrap();
        assert_eq!(table.cell(0, 0), Some("a"));
        assert_eq!(table.cell(0, 2), Some(""));
        assert_eq!(table.cell(1, 2), Some("d"));
        assert_eq!(table.cell(1, 3), None);
    }
}
