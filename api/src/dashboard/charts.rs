//! Chart builders
//!
//! Produce plotly figure JSON (`data` traces plus `layout`) from label/value
//! points. Aggregation happens here so pages can hand over raw rows.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::entities::{AbcClass, MonthlyKpi};

pub const PRIMARY_BLUE: &str = "#1A85FF";

const ABC_COLORS: [(AbcClass, &str); 3] = [
    (AbcClass::A, "#1a85ff"),
    (AbcClass::B, "#7ea1ee"),
    (AbcClass::C, "#d41159"),
];

const CHOROPLETH_SCALE: [&str; 4] = [
    "rgba(255,255,255,0.08)",
    "rgba(26,133,255,0.35)",
    "rgba(26,133,255,0.65)",
    "rgba(26,133,255,0.90)",
];

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agg {
    Sum,
    Mean,
    Count,
    NUnique,
}

/// A labelled value feeding a chart
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub label: String,
    pub value: f64,
}

impl Point {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Group points by label, sorted by aggregated value descending
pub fn aggregate(points: &[Point], agg: Agg) -> Vec<Point> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for point in points {
        groups.entry(point.label.as_str()).or_default().push(point.value);
    }

    let mut out: Vec<Point> = groups
        .into_iter()
        .map(|(label, values)| {
            let value = match agg {
                Agg::Sum => values.iter().sum(),
                Agg::Mean => values.iter().sum::<f64>() / values.len() as f64,
                Agg::Count => values.len() as f64,
                Agg::NUnique => values
                    .iter()
                    .map(|v| v.to_bits())
                    .collect::<HashSet<_>>()
                    .len() as f64,
            };
            Point::new(label, value)
        })
        .collect();

    out.sort_by(|a, b| b.value.total_cmp(&a.value));
    out
}

fn transparent_layout(extra: Value) -> Value {
    let mut layout = json!({
        "margin": {"l": 16, "r": 16, "t": 8, "b": 16},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "template": "plotly_dark",
    });
    if let (Some(base), Value::Object(extra)) = (layout.as_object_mut(), extra) {
        base.extend(extra);
    }
    layout
}

/// Horizontal bar of the `top_n` largest aggregated values
pub fn bar(points: &[Point], agg: Agg, top_n: usize) -> Figure {
    let top: Vec<Point> = aggregate(points, agg).into_iter().take(top_n).collect();
    let labels: Vec<&str> = top.iter().map(|p| p.label.as_str()).collect();
    let values: Vec<f64> = top.iter().map(|p| p.value).collect();

    Figure {
        data: vec![json!({
            "type": "bar",
            "orientation": "h",
            "x": values,
            "y": labels,
            "text": values,
            "texttemplate": "%{text:,.0f}",
            "textposition": "outside",
            "cliponaxis": false,
            "customdata": labels,
            "marker": {"color": PRIMARY_BLUE},
        })],
        layout: transparent_layout(json!({
            "showlegend": false,
            "yaxis": {"autorange": "reversed", "title": null},
            "xaxis": {"showgrid": true, "gridcolor": "rgba(255,255,255,0.06)", "title": null},
        })),
    }
}

/// Donut chart of aggregated values
pub fn pie(points: &[Point], agg: Agg, hole: f64) -> Figure {
    let slices = aggregate(points, agg);
    let labels: Vec<&str> = slices.iter().map(|p| p.label.as_str()).collect();
    let values: Vec<f64> = slices.iter().map(|p| p.value).collect();

    Figure {
        data: vec![json!({
            "type": "pie",
            "labels": labels,
            "values": values,
            "hole": hole,
        })],
        layout: transparent_layout(json!({
            "legend": {"orientation": "h", "y": -0.05},
        })),
    }
}

/// Revenue (or count) share per ABC class with the fixed class colours
pub fn pie_abc_sales(classes: &[(AbcClass, f64)], agg: Agg, title: &str) -> Figure {
    let points: Vec<Point> = classes
        .iter()
        .map(|(class, value)| Point::new(class.to_string(), *value))
        .collect();
    let mut slices = aggregate(&points, agg);
    slices.sort_by(|a, b| a.label.cmp(&b.label));

    let colors: HashMap<String, &str> = ABC_COLORS
        .iter()
        .map(|(class, color)| (class.to_string(), *color))
        .collect();
    let slice_colors: Vec<&str> = slices
        .iter()
        .map(|s| colors.get(&s.label).copied().unwrap_or(PRIMARY_BLUE))
        .collect();
    let labels: Vec<&str> = slices.iter().map(|p| p.label.as_str()).collect();
    let values: Vec<f64> = slices.iter().map(|p| p.value).collect();

    Figure {
        data: vec![json!({
            "type": "pie",
            "labels": labels,
            "values": values,
            "hole": 0.55,
            "marker": {"colors": slice_colors},
        })],
        layout: transparent_layout(json!({
            "title": title,
            "height": 340,
            "margin": {"l": 20, "r": 20, "t": 50, "b": 20},
            "legend": {"x": 1, "y": 1},
        })),
    }
}

/// World map coloured by the summed value per country name
pub fn choropleth(points: &[Point], title: Option<&str>) -> Figure {
    let countries = aggregate(points, Agg::Sum);
    let locations: Vec<&str> = countries.iter().map(|p| p.label.as_str()).collect();
    let values: Vec<f64> = countries.iter().map(|p| p.value).collect();
    let last = (CHOROPLETH_SCALE.len() - 1) as f64;
    let scale: Vec<Value> = CHOROPLETH_SCALE
        .iter()
        .enumerate()
        .map(|(i, color)| json!([i as f64 / last, color]))
        .collect();

    Figure {
        data: vec![json!({
            "type": "choropleth",
            "locationmode": "country names",
            "locations": locations,
            "z": values,
            "customdata": locations,
            "colorscale": scale,
            "showscale": false,
        })],
        layout: transparent_layout(json!({
            "title": title,
            "height": 520,
            "margin": {"l": 8, "r": 8, "t": if title.is_some() { 50 } else { 20 }, "b": 8},
            "geo": {
                "showframe": false,
                "showcoastlines": false,
                "projection": {"type": "natural earth"},
                "scope": "world",
                "bgcolor": "rgba(0,0,0,0)",
                "lonaxis": {"range": [-180, 180]},
                "lataxis": {"range": [-90, 90]},
                "center": {"lat": -10, "lon": -30},
                "domain": {"x": [0, 1], "y": [0, 1]},
            },
        })),
    }
}

/// Filled line of monthly sales
pub fn area_sales_trend(monthly: &[MonthlyKpi]) -> Figure {
    let months: Vec<String> = monthly
        .iter()
        .map(|m| format!("{}-01", m.sales_month))
        .collect();
    let sales: Vec<f64> = monthly.iter().map(|m| m.total_sales).collect();

    Figure {
        data: vec![json!({
            "type": "scatter",
            "mode": "lines",
            "fill": "tozeroy",
            "name": "Sales",
            "x": months,
            "y": sales,
        })],
        layout: transparent_layout(json!({
            "showlegend": false,
            "xaxis": {"showgrid": false, "title": null},
            "yaxis": {"showgrid": true, "gridcolor": "rgba(255,255,255,0.06)", "title": null},
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<Point> {
        vec![
            Point::new("France", 10500.0),
            Point::new("United States", 9500.0),
            Point::new("France", 6000.0),
            Point::new("Norway", 4000.0),
        ]
    }

    #[test]
    fn aggregate_modes() {
        let summed = aggregate(&points(), Agg::Sum);
        assert_eq!(summed[0], Point::new("France", 16500.0));
        assert_eq!(summed.len(), 3);

        let counted = aggregate(&points(), Agg::Count);
        assert_eq!(counted[0], Point::new("France", 2.0));

        let mean = aggregate(&points(), Agg::Mean);
        assert_eq!(mean[0], Point::new("United States", 9500.0));

        let repeated = vec![Point::new("x", 1.0), Point::new("x", 1.0), Point::new("x", 2.0)];
        assert_eq!(aggregate(&repeated, Agg::NUnique)[0].value, 2.0);
    }

    #[test]
    fn bar_keeps_top_n_descending() {
        let figure = bar(&points(), Agg::Sum, 2);
        let trace = &figure.data[0];

        assert_eq!(trace["orientation"], "h");
        assert_eq!(trace["y"], json!(["France", "United States"]));
        assert_eq!(trace["x"], json!([16500.0, 9500.0]));
        assert_eq!(figure.layout["yaxis"]["autorange"], "reversed");
    }

    #[test]
    fn abc_pie_uses_class_colours() {
        let figure = pie_abc_sales(
            &[(AbcClass::C, 1.0), (AbcClass::A, 1.0), (AbcClass::A, 1.0)],
            Agg::Sum,
            "Customer ABC classes",
        );
        let trace = &figure.data[0];

        assert_eq!(trace["labels"], json!(["A", "C"]));
        assert_eq!(trace["values"], json!([2.0, 1.0]));
        assert_eq!(trace["marker"]["colors"], json!(["#1a85ff", "#d41159"]));
    }

    #[test]
    fn choropleth_hides_colour_bar() {
        let figure = choropleth(&points(), None);
        let trace = &figure.data[0];

        assert_eq!(trace["locationmode"], "country names");
        assert_eq!(trace["showscale"], false);
        assert_eq!(trace["customdata"], trace["locations"]);
        assert_eq!(figure.layout["geo"]["projection"]["type"], "natural earth");
        assert_eq!(figure.layout["margin"]["t"], 20);
    }
}
