//! Category colours.
//!
//! Known categories get a preset colour; everything else draws from a cyclic
//! fallback palette. Assignment only depends on the set of categories, so the
//! same input always yields the same mapping.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use palette::Srgb;
use serde::{Serialize, Serializer};

use crate::domain::PresetSet;

pub type Color = Srgb<u8>;

// ---------------------------------------------------------------------------
// Preset tables
// ---------------------------------------------------------------------------

const BASE_PRESETS: [(&str, u32); 6] = [
    ("Vegetables", 0x32CD32),
    ("Grains", 0xD2B48C),
    ("Animal Protein", 0xFF4500),
    ("Plant Protein", 0x228B22),
    ("Supplement Protein", 0x1E90FF),
    ("Dairy", 0x9370DB),
];

const EXPANDED_PRESETS: [(&str, u32); 8] = [
    ("Poultry", 0xFF7F0E),
    ("Fish & Seafood", 0x1F77B4),
    ("Red Meat & Game", 0x8C564B),
    ("Eggs", 0x9467BD),
    ("Legumes", 0x2CA02C),
    ("Soy", 0x17BECF),
    ("Nuts & Seeds", 0xBCBD22),
    ("Supplements", 0x1E90FF),
];

/// Cyclic palette for categories without a preset.
pub const FALLBACK_PALETTE: [u32; 10] = [
    0x1F77B4, 0xFF7F0E, 0x2CA02C, 0xD62728, 0x9467BD, 0x8C564B, 0xE377C2, 0x7F7F7F, 0xBCBD22, 0x17BECF,
];

fn rgb(packed: u32) -> Color {
    Color::new((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
}

/// Parse `#RRGGBB` (or `RRGGBB`).
pub fn parse_hex(s: &str) -> Option<Color> {
    let s = s.trim();
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Color::from_str(digits).ok()
}

/// Upper-case `#RRGGBB`.
pub fn to_hex(color: Color) -> String {
    format!("#{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}

fn key(color: Color) -> (u8, u8, u8) {
    color.into_components()
}

#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error("Failed to read colour overrides '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid colour overrides JSON '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid colour '{value}' for category '{category}' (expected #RRGGBB).")]
    InvalidHex { category: String, value: String },
}

/// Preset `category -> colour` table.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetTable {
    colors: BTreeMap<String, Color>,
}

impl PresetTable {
    pub fn for_set(set: PresetSet) -> Self {
        let extra: &[(&str, u32)] = match set {
            PresetSet::Base => &[],
            PresetSet::Expanded => &EXPANDED_PRESETS,
        };
        let colors = BASE_PRESETS
            .iter()
            .chain(extra)
            .map(|&(name, packed)| (name.to_string(), rgb(packed)))
            .collect();
        Self { colors }
    }

    /// Merge `category -> #RRGGBB` entries over the table.
    pub fn with_overrides(mut self, overrides: BTreeMap<String, String>) -> Result<Self, PaletteError> {
        for (category, value) in overrides {
            let color = parse_hex(&value).ok_or_else(|| PaletteError::InvalidHex {
                category: category.clone(),
                value: value.clone(),
            })?;
            self.colors.insert(category.trim().to_string(), color);
        }
        Ok(self)
    }

    /// Load overrides from a JSON object file and merge them over the table.
    pub fn with_overrides_file(self, path: &Path) -> Result<Self, PaletteError> {
        let text = fs::read_to_string(path).map_err(|source| PaletteError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides: BTreeMap<String, String> =
            serde_json::from_str(&text).map_err(|source| PaletteError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        self.with_overrides(overrides)
    }

    pub fn get(&self, category: &str) -> Option<Color> {
        self.colors.get(category).copied()
    }
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::for_set(PresetSet::Expanded)
    }
}

// ---------------------------------------------------------------------------
// Category palette
// ---------------------------------------------------------------------------

/// Resolved `category -> colour` mapping for one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPalette {
    mapping: BTreeMap<String, Color>,
}

impl CategoryPalette {
    /// Assign colours to `categories`.
    ///
    /// Preset categories keep their preset. Unknown categories are visited in
    /// sorted order and each takes the next fallback colour that no other
    /// category in this run already uses. Once every fallback colour is taken
    /// the cycle continues without the uniqueness check.
    pub fn assign<S: AsRef<str>>(categories: &[S], presets: &PresetTable) -> Self {
        let mut sorted: Vec<&str> = categories.iter().map(AsRef::as_ref).collect();
        sorted.sort_unstable();
        sorted.dedup();

        let mut mapping = BTreeMap::new();
        let mut used: HashSet<(u8, u8, u8)> = HashSet::new();
        let mut unknown = Vec::new();

        for &category in &sorted {
            match presets.get(category) {
                Some(color) => {
                    used.insert(key(color));
                    mapping.insert(category.to_string(), color);
                }
                None => unknown.push(category),
            }
        }

        let fallback: Vec<Color> = FALLBACK_PALETTE.iter().map(|&p| rgb(p)).collect();
        let mut cursor = 0usize;
        for category in unknown {
            let free = (0..fallback.len())
                .map(|offset| (offset, fallback[(cursor + offset) % fallback.len()]))
                .find(|(_, color)| !used.contains(&key(*color)));

            let color = match free {
                Some((offset, color)) => {
                    cursor += offset + 1;
                    color
                }
                None => {
                    let color = fallback[cursor % fallback.len()];
                    cursor += 1;
                    color
                }
            };

            used.insert(key(color));
            mapping.insert(category.to_string(), color);
        }

        Self { mapping }
    }

    pub fn color_for(&self, category: &str) -> Option<Color> {
        self.mapping.get(category).copied()
    }

    pub fn hex_for(&self, category: &str) -> Option<String> {
        self.color_for(category).map(to_hex)
    }

    /// Legend entries in category order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Color)> {
        self.mapping.iter().map(|(c, color)| (c.as_str(), *color))
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

impl Serialize for CategoryPalette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.mapping.iter().map(|(c, color)| (c, to_hex(*color))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn presets_are_used_for_known_categories() {
        let palette = CategoryPalette::assign(&cats(&["Poultry", "Dairy"]), &PresetTable::default());
        assert_eq!(palette.hex_for("Poultry").unwrap(), "#FF7F0E");
        assert_eq!(palette.hex_for("Dairy").unwrap(), "#9370DB");
    }

    #[test]
    fn base_set_has_no_expanded_categories() {
        let palette = CategoryPalette::assign(&cats(&["Poultry"]), &PresetTable::for_set(PresetSet::Base));
        // Falls back to the first fallback colour.
        assert_eq!(palette.hex_for("Poultry").unwrap(), "#1F77B4");
    }

    #[test]
    fn unknown_category_shares_colour_and_avoids_presets_in_run() {
        let palette = CategoryPalette::assign(
            &cats(&["NewCategory", "Fish & Seafood", "NewCategory", "Poultry"]),
            &PresetTable::default(),
        );
        let new = palette.color_for("NewCategory").unwrap();
        assert_ne!(new, palette.color_for("Fish & Seafood").unwrap());
        assert_ne!(new, palette.color_for("Poultry").unwrap());
        // #1F77B4 and #FF7F0E are taken by presets, so the next free one wins.
        assert_eq!(to_hex(new), "#2CA02C");
        assert_eq!(palette.len(), 3);
    }

    #[test]
    fn unknown_categories_follow_sorted_order() {
        let palette = CategoryPalette::assign(&cats(&["Zeta", "Alpha", "Mid"]), &PresetTable::default());
        assert_eq!(palette.hex_for("Alpha").unwrap(), "#1F77B4");
        assert_eq!(palette.hex_for("Mid").unwrap(), "#FF7F0E");
        assert_eq!(palette.hex_for("Zeta").unwrap(), "#2CA02C");
    }

    #[test]
    fn fallback_cycles_once_exhausted() {
        let names: Vec<String> = (0..12).map(|i| format!("Cat{i:02}")).collect();
        let palette = CategoryPalette::assign(&names, &PresetTable::for_set(PresetSet::Base));
        assert_eq!(palette.hex_for("Cat00"), palette.hex_for("Cat10"));
        assert_eq!(palette.hex_for("Cat01"), palette.hex_for("Cat11"));
        assert_ne!(palette.hex_for("Cat00"), palette.hex_for("Cat01"));
    }

    #[test]
    fn assignment_is_deterministic() {
        let input = cats(&["B", "Soy", "A", "Grains", "C"]);
        let first = CategoryPalette::assign(&input, &PresetTable::default());
        let second = CategoryPalette::assign(&input, &PresetTable::default());
        assert_eq!(first, second);
    }

    #[test]
    fn overrides_replace_presets_and_reject_bad_hex() {
        let mut overrides = BTreeMap::new();
        overrides.insert("Dairy".to_string(), "#abcdef".to_string());
        let table = PresetTable::default().with_overrides(overrides).unwrap();
        assert_eq!(to_hex(table.get("Dairy").unwrap()), "#ABCDEF");

        let mut bad = BTreeMap::new();
        bad.insert("Dairy".to_string(), "purple".to_string());
        let err = PresetTable::default().with_overrides(bad).unwrap_err();
        assert!(matches!(err, PaletteError::InvalidHex { .. }));

        // Six bytes but not six hex digits.
        let mut multibyte = BTreeMap::new();
        multibyte.insert("Soy".to_string(), "#a\u{e9}123".to_string());
        let err = PresetTable::default().with_overrides(multibyte).unwrap_err();
        assert!(matches!(err, PaletteError::InvalidHex { .. }));
        assert_eq!(parse_hex("#12345g"), None);
    }

    #[test]
    fn serializes_as_hex_map() {
        let palette = CategoryPalette::assign(&cats(&["Eggs"]), &PresetTable::default());
        let json = serde_json::to_string(&palette).unwrap();
        assert_eq!(json, r##"{"Eggs":"#9467BD"}"##);
    }
}
