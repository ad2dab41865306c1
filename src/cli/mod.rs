//! Command-line parsing for the protein visualizer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the ingest/chart code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{BuildConfig, ChartView, PresetSet};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "protein-viz", version, about = "Per-10g-protein food charts from a CSV")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize the CSV, write table/chart/ranking exports and print a summary.
    Build(BuildArgs),
    /// Print the explainer rankings only (useful for scripting).
    Rank(RankArgs),
    /// Render one 2D chart view as an ASCII scatter plot.
    Plot(PlotArgs),
}

/// Options shared by every command that loads the CSV.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Foods CSV (Food, Category, Calories_per_gram, Protein_per_gram, Cost_per_gram).
    #[arg(short = 'i', long, default_value = "data/foods.csv")]
    pub input: PathBuf,

    /// Preset category colour table.
    #[arg(long, value_enum, default_value_t = PresetSet::Expanded)]
    pub presets: PresetSet,

    /// JSON object of `category -> #RRGGBB` colour overrides.
    #[arg(long, value_name = "JSON")]
    pub colors: Option<PathBuf>,

    /// Fixed cost-axis ceiling for 2D views.
    #[arg(long, default_value_t = 1.0, value_parser = parse_positive, conflicts_with = "no_cost_ceiling")]
    pub cost_ceiling: f64,

    /// Use the computed cost ceiling (max x 1.1) in 2D views too.
    #[arg(long)]
    pub no_cost_ceiling: bool,
}

fn parse_positive(s: &str) -> Result<f64, String> {
    let v: f64 = s.trim().parse().map_err(|_| format!("'{s}' is not a number"))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("must be a positive number, got {v}"))
    }
}

#[derive(Debug, Args, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output directory for exports.
    #[arg(short = 'o', long, default_value = "site")]
    pub out_dir: PathBuf,

    /// Rows per explainer ranking.
    #[arg(long, default_value_t = 15)]
    pub top: usize,
}

#[derive(Debug, Args, Clone)]
pub struct RankArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Rows per explainer ranking.
    #[arg(long, default_value_t = 15)]
    pub top: usize,
}

#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Chart view to plot.
    #[arg(long, value_enum, default_value_t = ChartView::CaloriesCost)]
    pub view: ChartView,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

impl DataArgs {
    /// Resolve into a `BuildConfig`; output-only fields keep their defaults.
    pub fn to_config(&self) -> BuildConfig {
        BuildConfig {
            input: self.input.clone(),
            presets: self.presets,
            colors: self.colors.clone(),
            cost_ceiling: (!self.no_cost_ceiling).then_some(self.cost_ceiling),
            ..BuildConfig::default()
        }
    }
}

impl BuildArgs {
    pub fn to_config(&self) -> BuildConfig {
        BuildConfig {
            out_dir: self.out_dir.clone(),
            top_n: self.top,
            ..self.data.to_config()
        }
    }
}

impl RankArgs {
    pub fn to_config(&self) -> BuildConfig {
        BuildConfig {
            top_n: self.top,
            ..self.data.to_config()
        }
    }
}
