//! Reporting utilities: explainer rankings and formatted terminal output.

pub mod format;

use serde::Serialize;

use crate::domain::{Metric, NormalizedRecord};

pub use format::{format_rankings, format_run_summary};

/// The two explainer lists.
#[derive(Debug, Clone, Serialize)]
pub struct Rankings {
    /// Lowest cost per 10g protein first.
    pub best_cost: Vec<NormalizedRecord>,
    /// Fewest calories per 10g protein first.
    pub low_calorie: Vec<NormalizedRecord>,
}

/// Top-N records by ascending `metric`. Ties keep input order.
pub fn rank_by(records: &[NormalizedRecord], metric: Metric, top_n: usize) -> Vec<NormalizedRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.value(metric).total_cmp(&b.value(metric)));
    sorted.truncate(top_n);
    sorted
}

pub fn rank_explainers(records: &[NormalizedRecord], top_n: usize) -> Rankings {
    Rankings {
        best_cost: rank_by(records, Metric::Cost, top_n),
        low_calorie: rank_by(records, Metric::Calories, top_n),
    }
}
