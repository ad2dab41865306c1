//! Export the normalized data table to CSV.
//!
//! Mirrors the site's data table: one row per food, values per 10g protein,
//! two decimals. Meant to be easy to consume in spreadsheets.

use std::io::Write;
use std::path::Path;

use crate::domain::{Metric, NormalizedRecord};
use crate::error::AppError;

pub const TABLE_FILE: &str = "foods_normalized.csv";

/// Write the table to `path`.
pub fn write_table_csv(path: &Path, records: &[NormalizedRecord]) -> Result<(), AppError> {
    let file = std::fs::File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create table CSV '{}': {e}", path.display())))?;
    write_table(file, records)
}

/// Write the table to any writer.
pub fn write_table<W: Write>(writer: W, records: &[NormalizedRecord]) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([
        "Food",
        "Category",
        Metric::Calories.short_label(),
        Metric::Cost.short_label(),
        Metric::Grams.short_label(),
    ])
    .map_err(|e| AppError::new(2, format!("Failed to write table CSV header: {e}")))?;

    for r in records {
        let calories = format!("{:.2}", r.calories_for_10g_protein);
        let cost = format!("{:.2}", r.cost_for_10g_protein);
        let grams = format!("{:.2}", r.grams_for_10g_protein);
        wtr.write_record([
            r.name.as_str(),
            r.category.as_str(),
            calories.as_str(),
            cost.as_str(),
            grams.as_str(),
        ])
        .map_err(|e| AppError::new(2, format!("Failed to write table CSV row: {e}")))?;
    }

    wtr.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush table CSV: {e}")))?;

    Ok(())
}
