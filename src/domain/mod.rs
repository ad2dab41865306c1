//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and normalized food rows (`FoodRecord`, `NormalizedRecord`)
//! - the three per-10g-protein metrics (`Metric`) and their ceilings (`AxisRange`)
//! - chart views and palette preset selection (`ChartView`, `PresetSet`)
//! - run configuration (`BuildConfig`)

pub mod types;

pub use types::*;
