//! Input/output helpers.
//!
//! - CSV ingest + normalization (`ingest`)
//! - normalized table export (`export`)
//! - chart bundle / rankings JSON (`charts`)

pub mod charts;
pub mod export;
pub mod ingest;

pub use charts::*;
pub use export::*;
pub use ingest::*;
