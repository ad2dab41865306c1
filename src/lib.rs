//! `protein-viz` library crate.
//!
//! The binary (`protein-viz`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the normalizer and chart assembly are reusable by other renderers
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod chart;
pub mod cli;
pub mod color;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
