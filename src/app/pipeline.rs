//! Shared "build pipeline" logic used by every command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! presets -> CSV ingest/normalize -> chart assembly -> rankings
//!
//! The commands can then focus on presentation (printing vs writing files).

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use log::info;

use crate::chart::{ChartOptions, ChartSpec, build_all};
use crate::color::PresetTable;
use crate::config::SiteConfig;
use crate::domain::BuildConfig;
use crate::error::AppError;
use crate::io::charts::{CHARTS_FILE, ChartBundle, RANKINGS_FILE, write_chart_bundle, write_rankings_json};
use crate::io::export::{TABLE_FILE, write_table_csv};
use crate::io::ingest::{NormalizedDataset, load_and_normalize};
use crate::report::{Rankings, rank_explainers};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: NormalizedDataset,
    pub charts: Vec<ChartSpec>,
    pub rankings: Rankings,
}

/// Resolve the preset table, applying the override file when given.
pub fn preset_table(config: &BuildConfig) -> Result<PresetTable, AppError> {
    let table = PresetTable::for_set(config.presets);
    match &config.colors {
        Some(path) => Ok(table.with_overrides_file(path)?),
        None => Ok(table),
    }
}

pub fn chart_options(config: &BuildConfig) -> ChartOptions {
    ChartOptions {
        cost_ceiling: config.cost_ceiling,
    }
}

/// Load, normalize and assemble everything; writes nothing.
pub fn run_pipeline(config: &BuildConfig) -> Result<RunOutput, AppError> {
    let presets = preset_table(config)?;
    let dataset = load_and_normalize(&config.input, &presets)?;
    let charts = build_all(&dataset, &chart_options(config));
    let rankings = rank_explainers(&dataset.records, config.top_n);

    Ok(RunOutput {
        dataset,
        charts,
        rankings,
    })
}

/// Write table, chart bundle and rankings under `config.out_dir`.
///
/// Returns the written paths in write order.
pub fn write_outputs(run: &RunOutput, config: &BuildConfig, site: &SiteConfig) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(&config.out_dir).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create output dir '{}': {e}", config.out_dir.display()),
        )
    })?;

    let table = config.out_dir.join(TABLE_FILE);
    write_table_csv(&table, &run.dataset.records)?;

    let charts = config.out_dir.join(CHARTS_FILE);
    let bundle = ChartBundle::new(&run.dataset, &run.charts, site, Utc::now());
    write_chart_bundle(&charts, &bundle)?;

    let rankings = config.out_dir.join(RANKINGS_FILE);
    write_rankings_json(&rankings, &run.rankings)?;

    let written = vec![table, charts, rankings];
    for path in &written {
        info!("wrote {}", path.display());
    }
    Ok(written)
}
