//! Write the chart bundle and rankings as JSON.
//!
//! The chart bundle is the portable representation of everything a renderer
//! needs: site metadata, palette, ceilings and every chart view with its
//! traces. The schema is defined by `ChartBundle`.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::chart::ChartSpec;
use crate::color::CategoryPalette;
use crate::config::SiteConfig;
use crate::domain::AxisRange;
use crate::error::AppError;
use crate::io::ingest::NormalizedDataset;
use crate::report::Rankings;

pub const CHARTS_FILE: &str = "charts.json";
pub const RANKINGS_FILE: &str = "rankings.json";

#[derive(Debug, Clone, Serialize)]
pub struct ChartBundle<'a> {
    pub tool: &'static str,
    pub generated_at: DateTime<Utc>,
    pub site: &'a SiteConfig,
    /// Canonical URL of this bundle under the site root.
    pub url: String,
    pub categories: &'a [String],
    pub palette: &'a CategoryPalette,
    pub ranges: AxisRange,
    pub charts: &'a [ChartSpec],
}

impl<'a> ChartBundle<'a> {
    pub fn new(
        dataset: &'a NormalizedDataset,
        charts: &'a [ChartSpec],
        site: &'a SiteConfig,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tool: "protein-viz",
            generated_at,
            site,
            url: site.page_url(CHARTS_FILE),
            categories: &dataset.categories,
            palette: &dataset.palette,
            ranges: dataset.ranges,
            charts,
        }
    }
}

/// Write the chart bundle JSON.
pub fn write_chart_bundle(path: &Path, bundle: &ChartBundle<'_>) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create chart JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, bundle)
        .map_err(|e| AppError::new(2, format!("Failed to write chart JSON: {e}")))?;

    Ok(())
}

/// Write both explainer rankings as JSON.
pub fn write_rankings_json(path: &Path, rankings: &Rankings) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create rankings JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, rankings)
        .map_err(|e| AppError::new(2, format!("Failed to write rankings JSON: {e}")))?;

    Ok(())
}
