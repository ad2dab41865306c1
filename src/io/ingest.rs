//! CSV ingest and normalization.
//!
//! This module is responsible for turning the foods CSV into a clean set of
//! per-10g-protein records that are safe to chart.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (exclude bad rows silently, but keep a report)
//! - **Deterministic behavior** (same file, same output)
//! - **Separation of concerns**: no chart or rendering logic here

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::{debug, info, warn};

use crate::color::{CategoryPalette, PresetTable};
use crate::domain::{AxisRange, FoodRecord, NormalizedRecord};

pub const COL_FOOD: &str = "Food";
pub const COL_CATEGORY: &str = "Category";
pub const COL_CALORIES: &str = "Calories_per_gram";
pub const COL_PROTEIN: &str = "Protein_per_gram";
pub const COL_COST: &str = "Cost_per_gram";

const REQUIRED_COLUMNS: [&str; 5] = [COL_FOOD, COL_CATEGORY, COL_CALORIES, COL_PROTEIN, COL_COST];

/// Fatal ingest failures. Anything row-level is an `ExclusionReason` instead.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Data file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },
    #[error("Failed to open data file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read CSV headers: {0}")]
    Header(#[source] csv::Error),
    #[error("Missing required column: `{0}`")]
    MissingColumn(&'static str),
    #[error("No valid rows after cleaning. Check your CSV values.")]
    NoValidRows,
}

/// Why a row was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum ExclusionReason {
    MissingName,
    MissingCategory,
    InvalidNumber { column: &'static str },
    NonPositiveProtein,
    /// Protein so small or a rate so large that a derived metric overflows.
    NonFiniteMetric,
    Malformed(String),
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::MissingName => write!(f, "missing `{COL_FOOD}` value"),
            ExclusionReason::MissingCategory => write!(f, "missing `{COL_CATEGORY}` value"),
            ExclusionReason::InvalidNumber { column } => write!(f, "missing/invalid `{column}` value"),
            ExclusionReason::NonPositiveProtein => write!(f, "`{COL_PROTEIN}` must be > 0"),
            ExclusionReason::NonFiniteMetric => write!(f, "normalized values overflow"),
            ExclusionReason::Malformed(msg) => write!(f, "CSV parse error: {msg}"),
        }
    }
}

/// Result of validating a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Valid(FoodRecord),
    Excluded(ExclusionReason),
}

/// An excluded row and its 1-based line number in the file.
#[derive(Debug, Clone)]
pub struct ExcludedRow {
    pub line: usize,
    pub reason: ExclusionReason,
}

/// Row accounting for a single ingest.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub rows_read: usize,
    pub rows_used: usize,
    pub excluded: Vec<ExcludedRow>,
}

/// Ingest output: normalized records plus the lookups derived from them.
#[derive(Debug, Clone)]
pub struct NormalizedDataset {
    /// Valid records in file order.
    pub records: Vec<NormalizedRecord>,
    /// Distinct categories, sorted.
    pub categories: Vec<String>,
    pub palette: CategoryPalette,
    pub ranges: AxisRange,
    pub report: IngestReport,
}

impl NormalizedDataset {
    /// Records grouped by category, in sorted category order.
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&NormalizedRecord>> {
        let mut groups: BTreeMap<&str, Vec<&NormalizedRecord>> = BTreeMap::new();
        for r in &self.records {
            groups.entry(r.category.as_str()).or_default().push(r);
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load the foods CSV at `path` and normalize it.
///
/// Fails with `InputNotFound` before any parsing when the path does not exist,
/// and with `NoValidRows` when every row was excluded.
pub fn load_and_normalize(path: &Path, presets: &PresetTable) -> Result<NormalizedDataset, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!("loading foods from {}", path.display());
    normalize_reader(file, presets)
}

/// Normalize CSV content from any reader.
pub fn normalize_reader<R: Read>(reader: R, presets: &PresetTable) -> Result<NormalizedDataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(DatasetError::Header)?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut records = Vec::new();
    let mut report = IngestReport::default();

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        report.rows_read += 1;

        let outcome = match result {
            Ok(record) => validate_row(&record, &columns),
            Err(e) => RowOutcome::Excluded(ExclusionReason::Malformed(e.to_string())),
        };

        let excluded = match outcome {
            RowOutcome::Valid(food) => match NormalizedRecord::from_food(food) {
                Some(record) => {
                    records.push(record);
                    continue;
                }
                // `validate_row` already rejected protein <= 0.
                None => ExclusionReason::NonFiniteMetric,
            },
            RowOutcome::Excluded(reason) => reason,
        };

        debug!("excluding line {line}: {excluded}");
        report.excluded.push(ExcludedRow { line, reason: excluded });
    }

    report.rows_used = records.len();
    if records.is_empty() {
        return Err(DatasetError::NoValidRows);
    }
    if !report.excluded.is_empty() {
        warn!(
            "{} of {} rows excluded during cleaning",
            report.excluded.len(),
            report.rows_read
        );
    }

    let categories: Vec<String> = records
        .iter()
        .map(|r| r.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let palette = CategoryPalette::assign(&categories, presets);
    let ranges = AxisRange::from_records(&records);

    info!(
        "normalized {} rows across {} categories",
        records.len(),
        categories.len()
    );

    Ok(NormalizedDataset {
        records,
        categories,
        palette,
        ranges,
        report,
    })
}

/// Positions of the required columns in the header row.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    food: usize,
    category: usize,
    calories: usize,
    protein: usize,
    cost: usize,
}

impl ColumnIndex {
    /// Match required columns by name (case-insensitive, order-independent).
    pub fn resolve(headers: &StringRecord) -> Result<Self, DatasetError> {
        // First occurrence wins when a header is repeated.
        let mut header_map: HashMap<String, usize> = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            header_map.entry(normalize_header_name(name)).or_insert(idx);
        }

        for name in REQUIRED_COLUMNS {
            if !header_map.contains_key(&normalize_header_name(name)) {
                return Err(DatasetError::MissingColumn(name));
            }
        }

        let at = |name: &str| header_map[&normalize_header_name(name)];
        Ok(Self {
            food: at(COL_FOOD),
            category: at(COL_CATEGORY),
            calories: at(COL_CALORIES),
            protein: at(COL_PROTEIN),
            cost: at(COL_COST),
        })
    }
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

/// Trim and coerce one row. Never fails; bad rows become `Excluded`.
pub fn validate_row(record: &StringRecord, columns: &ColumnIndex) -> RowOutcome {
    let Some(name) = get_text(record, columns.food) else {
        return RowOutcome::Excluded(ExclusionReason::MissingName);
    };
    let Some(category) = get_text(record, columns.category) else {
        return RowOutcome::Excluded(ExclusionReason::MissingCategory);
    };

    let number = |idx: usize, column: &'static str| {
        parse_f64(record.get(idx)).ok_or(ExclusionReason::InvalidNumber { column })
    };

    let parsed = number(columns.calories, COL_CALORIES).and_then(|calories| {
        let protein = number(columns.protein, COL_PROTEIN)?;
        let cost = number(columns.cost, COL_COST)?;
        Ok((calories, protein, cost))
    });

    let (calories_per_gram, protein_per_gram, cost_per_gram) = match parsed {
        Ok(values) => values,
        Err(reason) => return RowOutcome::Excluded(reason),
    };

    if protein_per_gram <= 0.0 {
        return RowOutcome::Excluded(ExclusionReason::NonPositiveProtein);
    }

    RowOutcome::Valid(FoodRecord {
        name: name.to_string(),
        category: category.to_string(),
        calories_per_gram,
        protein_per_gram,
        cost_per_gram,
    })
}

fn get_text(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_f64(s: Option<&str>) -> Option<f64> {
    let v = s?.trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
