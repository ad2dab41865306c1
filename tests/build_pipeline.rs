use std::fs;
use std::path::Path;

use protein_viz::app::pipeline::{run_pipeline, write_outputs};
use protein_viz::config::SiteConfig;
use protein_viz::domain::{BuildConfig, ChartView, PresetSet};

const FOODS: &str = "\
Food,Category,Calories_per_gram,Protein_per_gram,Cost_per_gram,Notes
Chicken Breast,Poultry,1.65,0.31,0.008,lean
Tofu,Soy,0.76,0.08,0.004,
Water,Drinks,0,0,0.001,no protein
Mystery Bar,Snacks,n/a,0.2,0.02,bad calories
Cricket Flour,NewCategory,4.5,0.65,0.09,
Mealworms,NewCategory,2.0,0.2,0.05,
";

fn config(dir: &Path, input: &Path) -> BuildConfig {
    BuildConfig {
        input: input.to_path_buf(),
        out_dir: dir.join("site"),
        ..BuildConfig::default()
    }
}

#[test]
fn build_writes_all_exports() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("foods.csv");
    fs::write(&input, FOODS).unwrap();

    let config = config(dir.path(), &input);
    let run = run_pipeline(&config).unwrap();

    assert_eq!(run.dataset.report.rows_read, 6);
    assert_eq!(run.dataset.len(), 4);
    assert!(run.dataset.records.iter().all(|r| r.name != "Water" && r.name != "Mystery Bar"));
    assert_eq!(run.dataset.categories, vec!["NewCategory", "Poultry", "Soy"]);

    let new = run.dataset.palette.color_for("NewCategory").unwrap();
    assert_ne!(new, run.dataset.palette.color_for("Poultry").unwrap());
    assert_ne!(new, run.dataset.palette.color_for("Soy").unwrap());

    assert_eq!(run.charts.len(), ChartView::ALL.len());
    assert_eq!(run.rankings.best_cost[0].name, "Chicken Breast");
    assert_eq!(run.rankings.low_calorie[0].name, "Chicken Breast");

    let site = SiteConfig::default();
    let written = write_outputs(&run, &config, &site).unwrap();
    assert_eq!(written.len(), 3);
    for path in &written {
        assert!(path.exists(), "missing {}", path.display());
    }

    let table = fs::read_to_string(config.out_dir.join("foods_normalized.csv")).unwrap();
    assert!(table.starts_with("Food,Category,Calories,Cost,Weight (grams)\n"));
    assert_eq!(table.lines().count(), 5);

    let bundle: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.out_dir.join("charts.json")).unwrap()).unwrap();
    assert_eq!(bundle["site"]["site_name"], "Protein Visualizer");
    assert_eq!(bundle["palette"]["Poultry"], "#FF7F0E");
    assert_eq!(bundle["charts"][0]["traces"].as_array().unwrap().len(), 3);

    let rankings: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.out_dir.join("rankings.json")).unwrap()).unwrap();
    assert_eq!(rankings["best_cost"].as_array().unwrap().len(), 4);
}

#[test]
fn missing_input_exits_with_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), &dir.path().join("nope.csv"));

    let err = run_pipeline(&config).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("Data file not found"));
    assert!(!config.out_dir.exists());
}

#[test]
fn all_rows_invalid_exits_with_no_rows_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("foods.csv");
    fs::write(
        &input,
        "Food,Category,Calories_per_gram,Protein_per_gram,Cost_per_gram\nWater,Drinks,0,0,0\n",
    )
    .unwrap();

    let err = run_pipeline(&config(dir.path(), &input)).unwrap_err();
    assert_eq!(err.exit_code(), 3);
    assert!(err.to_string().contains("No valid rows"));
}

#[test]
fn colour_overrides_and_base_presets() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("foods.csv");
    fs::write(&input, FOODS).unwrap();
    let colors = dir.path().join("colors.json");
    fs::write(&colors, r##"{"Soy": "#123456"}"##).unwrap();

    let config = BuildConfig {
        presets: PresetSet::Base,
        colors: Some(colors),
        ..config(dir.path(), &input)
    };
    let run = run_pipeline(&config).unwrap();

    assert_eq!(run.dataset.palette.hex_for("Soy").unwrap(), "#123456");
    // Poultry has no preset in the base table, so both unknown categories
    // draw from the fallback palette in sorted order.
    assert_eq!(run.dataset.palette.hex_for("NewCategory").unwrap(), "#1F77B4");
    assert_eq!(run.dataset.palette.hex_for("Poultry").unwrap(), "#FF7F0E");
}

#[test]
fn bad_colour_override_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("foods.csv");
    fs::write(&input, FOODS).unwrap();
    let colors = dir.path().join("colors.json");
    fs::write(&colors, r#"{"Soy": "green"}"#).unwrap();

    let config = BuildConfig {
        colors: Some(colors),
        ..config(dir.path(), &input)
    };
    let err = run_pipeline(&config).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("Invalid colour"));
}
