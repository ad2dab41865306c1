//! Formatted terminal output.
//!
//! We keep formatting code in one place so the ingest and chart code stays
//! clean, and output changes are localized.

use crate::config::SiteConfig;
use crate::domain::{BuildConfig, Metric, NormalizedRecord};
use crate::io::ingest::NormalizedDataset;
use crate::report::Rankings;

/// Dataset stats, categories with colours, ceilings and where output went.
pub fn format_run_summary(dataset: &NormalizedDataset, config: &BuildConfig, site: &SiteConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} - per 10g protein ===\n", site.site_name));
    out.push_str(&format!("Input: {}\n", config.input.display()));
    out.push_str(&format!(
        "Rows: read={} | used={} | excluded={}\n",
        dataset.report.rows_read,
        dataset.report.rows_used,
        dataset.report.excluded.len()
    ));

    out.push_str("\nCategories:\n");
    let groups = dataset.by_category();
    for (category, color) in dataset.palette.entries() {
        let n = groups.get(category).map_or(0, Vec::len);
        out.push_str(&format!(
            "  {:<24} {} n={n}\n",
            truncate(category, 24),
            crate::color::to_hex(color)
        ));
    }

    out.push_str("\nAxis ceilings (max x 1.1):\n");
    for metric in Metric::ALL {
        out.push_str(&format!(
            "  {:<36} {}\n",
            metric.label(),
            metric.format_value(dataset.ranges.ceiling(metric))
        ));
    }

    out
}

/// Format both explainer tables.
pub fn format_rankings(rankings: &Rankings) -> String {
    let mut out = String::new();

    out.push_str("Best cost-efficient proteins (lowest cost per 10g protein):\n");
    out.push_str(&format_table(&rankings.best_cost));
    out.push('\n');

    out.push_str("Low-calorie protein picks (fewest calories per 10g protein):\n");
    out.push_str(&format_table(&rankings.low_calorie));

    out
}

fn format_table(rows: &[NormalizedRecord]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<28} {:<20} {:>10} {:>10} {:>14}",
            "food", "category", "calories", "cost", "weight_g"
        )
        .trim_end(),
    );
    out.push('\n');

    out.push_str(
        format!(
            "{:-<28} {:-<20} {:-<10} {:-<10} {:-<14}",
            "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:<28} {:<20} {:>10} {:>10} {:>14}",
                truncate(&r.name, 28),
                truncate(&r.category, 20),
                Metric::Calories.format_value(r.calories_for_10g_protein),
                Metric::Cost.format_value(r.cost_for_10g_protein),
                Metric::Grams.format_value(r.grams_for_10g_protein),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
