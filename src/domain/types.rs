//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during normalization and chart assembly
//! - exported to JSON/CSV

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Protein amount every food is rescaled to.
pub const PROTEIN_TARGET_GRAMS: f64 = 10.0;

/// Display headroom applied to each metric's maximum.
pub const AXIS_HEADROOM: f64 = 1.1;

/// One cleaned input row: trimmed text fields and finite numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub name: String,
    pub category: String,
    pub calories_per_gram: f64,
    pub protein_per_gram: f64,
    pub cost_per_gram: f64,
}

/// A food rescaled to the quantity that delivers 10g of protein.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub name: String,
    pub category: String,
    pub grams_for_10g_protein: f64,
    pub calories_for_10g_protein: f64,
    pub cost_for_10g_protein: f64,
}

impl NormalizedRecord {
    /// Derive the per-10g-protein metrics.
    ///
    /// Returns `None` unless `protein_per_gram` is finite and strictly positive
    /// and all three derived metrics are finite.
    pub fn from_food(food: FoodRecord) -> Option<Self> {
        if !(food.protein_per_gram.is_finite() && food.protein_per_gram > 0.0) {
            return None;
        }

        let grams = PROTEIN_TARGET_GRAMS / food.protein_per_gram;
        let calories = grams * food.calories_per_gram;
        let cost = grams * food.cost_per_gram;
        if !(grams.is_finite() && calories.is_finite() && cost.is_finite()) {
            return None;
        }

        Some(Self {
            name: food.name,
            category: food.category,
            grams_for_10g_protein: grams,
            calories_for_10g_protein: calories,
            cost_for_10g_protein: cost,
        })
    }

    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Calories => self.calories_for_10g_protein,
            Metric::Cost => self.cost_for_10g_protein,
            Metric::Grams => self.grams_for_10g_protein,
        }
    }
}

/// The three normalized metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Calories,
    Cost,
    Grams,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Calories, Metric::Cost, Metric::Grams];

    /// Axis / hover label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Calories => "Calories (per 10g protein)",
            Metric::Cost => "Cost (per 10g protein)",
            Metric::Grams => "Weight, in grams (per 10g protein)",
        }
    }

    /// Column header used in tables.
    pub fn short_label(self) -> &'static str {
        match self {
            Metric::Calories => "Calories",
            Metric::Cost => "Cost",
            Metric::Grams => "Weight (grams)",
        }
    }

    /// Money metrics are shown with a `$` prefix.
    pub fn is_money(self) -> bool {
        matches!(self, Metric::Cost)
    }

    pub fn format_value(self, v: f64) -> String {
        if self.is_money() {
            format!("${v:.2}")
        } else {
            format!("{v:.2}")
        }
    }
}

/// Display ceilings: `max(metric) * 1.1` per metric, never below zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub calories: f64,
    pub cost: f64,
    pub grams: f64,
}

impl AxisRange {
    pub fn from_records(records: &[NormalizedRecord]) -> Self {
        let ceiling = |metric: Metric| {
            let max = records
                .iter()
                .map(|r| r.value(metric))
                .fold(f64::NEG_INFINITY, f64::max);
            if max.is_finite() {
                (max * AXIS_HEADROOM).max(0.0)
            } else {
                0.0
            }
        };

        Self {
            calories: ceiling(Metric::Calories),
            cost: ceiling(Metric::Cost),
            grams: ceiling(Metric::Grams),
        }
    }

    pub fn ceiling(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Calories => self.calories,
            Metric::Cost => self.cost,
            Metric::Grams => self.grams,
        }
    }
}

/// Chart views produced for the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ChartView {
    /// Calories (x) vs cost (y).
    CaloriesCost,
    /// Calories (x) vs weight (y).
    CaloriesWeight,
    /// Cost (x) vs weight (y).
    CostWeight,
    /// Calories (x), cost (y), weight (z).
    #[value(name = "3d")]
    #[serde(rename = "3d")]
    ThreeD,
}

impl ChartView {
    pub const ALL: [ChartView; 4] = [
        ChartView::ThreeD,
        ChartView::CaloriesCost,
        ChartView::CaloriesWeight,
        ChartView::CostWeight,
    ];

    /// Metrics plotted on x, y (and z for 3D), in order.
    pub fn metrics(self) -> &'static [Metric] {
        match self {
            ChartView::CaloriesCost => &[Metric::Calories, Metric::Cost],
            ChartView::CaloriesWeight => &[Metric::Calories, Metric::Grams],
            ChartView::CostWeight => &[Metric::Cost, Metric::Grams],
            ChartView::ThreeD => &[Metric::Calories, Metric::Cost, Metric::Grams],
        }
    }

    pub fn is_3d(self) -> bool {
        matches!(self, ChartView::ThreeD)
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartView::CaloriesCost => "Calories vs Cost (per 10g protein)",
            ChartView::CaloriesWeight => "Calories vs Weight (per 10g protein)",
            ChartView::CostWeight => "Cost vs Weight (per 10g protein)",
            ChartView::ThreeD => "Calories vs Cost vs Weight (per 10g protein)",
        }
    }
}

/// Which preset category colours to use.
///
/// `Base` is the six broad categories; `Expanded` adds the finer
/// protein-source categories on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PresetSet {
    Base,
    Expanded,
}

/// Top-level run configuration (resolved from CLI args).
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub presets: PresetSet,
    /// Optional JSON file of `category -> #RRGGBB` overrides.
    pub colors: Option<PathBuf>,
    pub top_n: usize,
    /// Fixed cost-axis ceiling for 2D views; `None` uses the computed ceiling.
    pub cost_ceiling: Option<f64>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/foods.csv"),
            out_dir: PathBuf::from("site"),
            presets: PresetSet::Expanded,
            colors: None,
            top_n: 15,
            cost_ceiling: Some(1.0),
        }
    }
}
