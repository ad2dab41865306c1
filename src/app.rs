//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - reads site metadata from the environment
//! - runs the ingest/chart pipeline
//! - prints reports/plots
//! - writes exports

use clap::Parser;
use log::info;

use crate::cli::{BuildArgs, Command, PlotArgs, RankArgs};
use crate::config::SiteConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `protein-viz` binary.
pub fn run() -> Result<(), AppError> {
    // `protein-viz` and `protein-viz -i foods.csv` behave like `protein-viz build ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Build(args) => handle_build(args),
        Command::Rank(args) => handle_rank(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_build(args: BuildArgs) -> Result<(), AppError> {
    let config = args.to_config();
    let site = SiteConfig::from_env();
    info!("site: {} ({})", site.site_name, site.site_url);

    let run = pipeline::run_pipeline(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.dataset, &config, &site)
    );
    println!("{}", crate::report::format_rankings(&run.rankings));

    let written = pipeline::write_outputs(&run, &config, &site)?;
    println!("Wrote:");
    for path in written {
        println!("  {}", path.display());
    }

    Ok(())
}

fn handle_rank(args: RankArgs) -> Result<(), AppError> {
    let config = args.to_config();
    let run = pipeline::run_pipeline(&config)?;

    println!("{}", crate::report::format_rankings(&run.rankings));
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    if args.view.is_3d() {
        return Err(AppError::new(
            2,
            "ASCII plots support 2D views only (calories-cost, calories-weight, cost-weight).",
        ));
    }

    let config = args.data.to_config();
    let presets = pipeline::preset_table(&config)?;
    let dataset = crate::io::ingest::load_and_normalize(&config.input, &presets)?;
    let chart = crate::chart::build_chart(&dataset, args.view, &pipeline::chart_options(&config));

    println!("{}", crate::plot::render_scatter(&chart, args.width, args.height));
    Ok(())
}

/// Rewrite argv so `protein-viz` defaults to `protein-viz build`.
///
/// Rules:
/// - `protein-viz`                       -> `protein-viz build`
/// - `protein-viz -i foods.csv ...`      -> `protein-viz build -i foods.csv ...`
/// - `protein-viz --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("build".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "build" | "rank" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "build flags".
    if arg1.starts_with('-') {
        argv.insert(1, "build".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_builds() {
        assert_eq!(rewrite_args(args(&["protein-viz"])), args(&["protein-viz", "build"]));
    }

    #[test]
    fn leading_flag_builds() {
        assert_eq!(
            rewrite_args(args(&["protein-viz", "-i", "foods.csv"])),
            args(&["protein-viz", "build", "-i", "foods.csv"])
        );
    }

    #[test]
    fn help_and_subcommands_untouched() {
        for v in [
            args(&["protein-viz", "--help"]),
            args(&["protein-viz", "rank", "--top", "5"]),
            args(&["protein-viz", "plot"]),
        ] {
            assert_eq!(rewrite_args(v.clone()), v);
        }
    }
}
