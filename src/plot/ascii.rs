//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Each category gets a marker letter (`a`, `b`, ...) in trace order; points
//! beyond an axis ceiling are pinned to the edge. When two points share a
//! cell the later trace wins.

use crate::chart::ChartSpec;

const MARKERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Render the x/y plane of a chart view.
pub fn render_scatter(chart: &ChartSpec, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_axis, y_axis) = (&chart.axes[0], &chart.axes[1]);
    let [x_min, x_max] = usable_range(x_axis.range);
    let [y_min, y_max] = usable_range(y_axis.range);

    let mut grid = vec![vec![' '; width]; height];

    for (i, trace) in chart.traces.iter().enumerate() {
        let marker = marker(i);
        for p in &trace.points {
            let x = map_x(p.x, x_min, x_max, width);
            let y = map_y(p.y, y_min, y_max, height);
            grid[y][x] = marker;
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x={} [{:.2}, {:.2}] | y={} [{:.2}, {:.2}]\n",
        x_axis.label, x_min, x_max, y_axis.label, y_min, y_max
    ));

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    for (i, trace) in chart.traces.iter().enumerate() {
        out.push_str(&format!("  {} {} ({})\n", marker(i), trace.category, trace.points.len()));
    }

    out
}

fn marker(i: usize) -> char {
    MARKERS[i % MARKERS.len()] as char
}

fn usable_range(range: [f64; 2]) -> [f64; 2] {
    let [lo, hi] = range;
    if lo.is_finite() && hi.is_finite() && hi > lo {
        [lo, hi]
    } else {
        [lo.min(0.0), lo.min(0.0) + 1.0]
    }
}

fn map_x(v: f64, min: f64, max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((v - min) / (max - min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(v: f64, min: f64, max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((v - min) / (max - min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Axis, Trace, TracePoint};
    use crate::domain::{ChartView, Metric};

    fn point(name: &str, x: f64, y: f64) -> TracePoint {
        TracePoint {
            name: name.to_string(),
            x,
            y,
            z: None,
        }
    }

    fn chart() -> ChartSpec {
        ChartSpec {
            view: ChartView::CaloriesCost,
            title: ChartView::CaloriesCost.title(),
            axes: vec![
                Axis {
                    metric: Metric::Calories,
                    label: "cal",
                    range: [0.0, 9.0],
                    money: false,
                },
                Axis {
                    metric: Metric::Cost,
                    label: "cost",
                    range: [0.0, 1.0],
                    money: true,
                },
            ],
            traces: vec![
                Trace {
                    category: "Dairy".to_string(),
                    color: "#9370DB".to_string(),
                    points: vec![point("Milk", 0.0, 0.0), point("Whey", 9.0, 1.0)],
                },
                Trace {
                    category: "Soy".to_string(),
                    color: "#17BECF".to_string(),
                    points: vec![point("Tofu", 4.5, 0.5), point("Pricey", 20.0, 3.0)],
                },
            ],
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let txt = render_scatter(&chart(), 10, 5);
        let expected = concat!(
            "Plot: x=cal [0.00, 9.00] | y=cost [0.00, 1.00]\n",
            "         b\n",
            "\n",
            "     b\n",
            "\n",
            "a\n",
            "  a Dairy (2)\n",
            "  b Soy (2)\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn degenerate_range_does_not_panic() {
        let mut c = chart();
        c.axes[0].range = [0.0, 0.0];
        let txt = render_scatter(&c, 3, 2);
        // Clamped to the minimum 10x5 grid plus header and legend.
        assert_eq!(txt.lines().count(), 1 + 5 + 2);
    }
}
