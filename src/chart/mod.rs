//! Chart assembly.
//!
//! Turns a `NormalizedDataset` into renderer-neutral chart specs: axes with
//! fixed `[0, ceiling]` ranges and one trace per category (sorted), each
//! carrying its palette colour and points. Whatever draws the chart (a
//! browser plotting library, or `plot::ascii`) consumes these as-is.

use serde::Serialize;

use crate::color::to_hex;
use crate::domain::{ChartView, Metric, NormalizedRecord};
use crate::io::ingest::NormalizedDataset;

/// Knobs that change chart layout but never the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    /// Fixed cost-axis ceiling for 2D views. `None` uses the computed ceiling.
    pub cost_ceiling: Option<f64>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self { cost_ceiling: Some(1.0) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub metric: Metric,
    pub label: &'static str,
    pub range: [f64; 2],
    /// Hover/tick values get a `$` prefix.
    pub money: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TracePoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub category: String,
    pub color: String,
    pub points: Vec<TracePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub view: ChartView,
    pub title: &'static str,
    pub axes: Vec<Axis>,
    pub traces: Vec<Trace>,
}

impl ChartSpec {
    pub fn point_count(&self) -> usize {
        self.traces.iter().map(|t| t.points.len()).sum()
    }
}

/// Build a single view.
pub fn build_chart(dataset: &NormalizedDataset, view: ChartView, options: &ChartOptions) -> ChartSpec {
    let metrics = view.metrics();

    let axes = metrics
        .iter()
        .map(|&metric| Axis {
            metric,
            label: metric.label(),
            range: [0.0, axis_ceiling(dataset, view, metric, options)],
            money: metric.is_money(),
        })
        .collect();

    let traces = dataset
        .by_category()
        .into_iter()
        .map(|(category, records)| Trace {
            category: category.to_string(),
            color: dataset
                .palette
                .color_for(category)
                .map(to_hex)
                .unwrap_or_else(|| "#7F7F7F".to_string()),
            points: records.into_iter().map(|r| trace_point(r, metrics)).collect(),
        })
        .collect();

    ChartSpec {
        view,
        title: view.title(),
        axes,
        traces,
    }
}

/// Build every view in `ChartView::ALL` order.
pub fn build_all(dataset: &NormalizedDataset, options: &ChartOptions) -> Vec<ChartSpec> {
    ChartView::ALL
        .iter()
        .map(|&view| build_chart(dataset, view, options))
        .collect()
}

fn axis_ceiling(dataset: &NormalizedDataset, view: ChartView, metric: Metric, options: &ChartOptions) -> f64 {
    match (metric, options.cost_ceiling) {
        (Metric::Cost, Some(fixed)) if !view.is_3d() && fixed.is_finite() && fixed > 0.0 => fixed,
        _ => dataset.ranges.ceiling(metric),
    }
}

fn trace_point(record: &NormalizedRecord, metrics: &[Metric]) -> TracePoint {
    TracePoint {
        name: record.name.clone(),
        x: record.value(metrics[0]),
        y: record.value(metrics[1]),
        z: metrics.get(2).map(|&m| record.value(m)),
    }
}
