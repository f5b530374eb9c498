//! Chart element.

use super::{opt_bool, opt_color, opt_string, ElementId, Geometry, JsonMap, Rgba};
use crate::error::ElementError;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "bar" => Some(ChartKind::Bar),
            "pie" => Some(ChartKind::Pie),
            _ => None,
        }
    }
}

/// One labeled value in a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub value: f64,
    pub color: Rgba,
}

/// A bar or pie chart.
#[derive(Debug, Clone)]
pub struct ChartElement {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees around the element center.
    pub rotation: f64,
    pub lock_aspect_ratio: bool,
    pub chart_type: ChartKind,
    pub show_legend: bool,
    pub series: Vec<ChartSeries>,
}

impl ChartElement {
    /// Create a new chart with no series.
    pub fn new(origin: Point, width: f64, height: f64, chart_type: ChartKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: origin.x,
            y: origin.y,
            width,
            height,
            rotation: 0.0,
            lock_aspect_ratio: false,
            chart_type,
            show_legend: true,
            series: Vec::new(),
        }
    }

    /// Sum of all series values; pie slice angles derive from this.
    pub fn total_value(&self) -> f64 {
        self.series.iter().map(|s| s.value).sum()
    }

    pub fn to_json(&self) -> Value {
        let series: Vec<Value> = self
            .series
            .iter()
            .map(|s| {
                json!({
                    "label": s.label,
                    "value": s.value,
                    "color": s.color.to_hex(),
                })
            })
            .collect();
        json!({
            "type": "chart",
            "x": self.x,
            "y": self.y,
            "width": self.width,
            "height": self.height,
            "rotation": self.rotation,
            "lockAspectRatio": self.lock_aspect_ratio,
            "chartType": self.chart_type.as_str(),
            "showLegend": self.show_legend,
            "series": series,
        })
    }

    pub fn from_json(obj: &JsonMap) -> Result<Self, ElementError> {
        let geometry = Geometry::from_json(obj)?;
        let chart_type =
            ChartKind::parse(&opt_string(obj, "chartType", "bar")).unwrap_or_default();
        let series = obj
            .get("series")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|entry| ChartSeries {
                        label: opt_string(entry, "label", ""),
                        value: entry.get("value").and_then(Value::as_f64).unwrap_or(0.0),
                        color: opt_color(entry, "color", Rgba::gray()),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            id: Uuid::new_v4(),
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            rotation: geometry.rotation,
            lock_aspect_ratio: geometry.lock_aspect_ratio,
            chart_type,
            show_legend: opt_bool(obj, "showLegend", true),
            series,
        })
    }
}
