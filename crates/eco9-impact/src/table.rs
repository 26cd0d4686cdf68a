// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::sync::OnceLock;

use eco9_core::{canonical, Error, Result};
use eco9_model::{CategoryMultipliers, MultiplierTable, SubtypeMultiplier};

type SubtypeRow = (&'static str, f64, f64);

// Order matters: the first subtype of a category is the one used when the
// caller does not name one.
const BUILTIN_ROWS: &[(&str, &[SubtypeRow])] = &[
    (
        "transport",
        &[
            ("biking", 0.4, 0.1),
            ("walking", 0.4, 0.05),
            ("public_transport", 0.2, 0.05),
        ],
    ),
    ("energy", &[("solar", 2.5, 0.5), ("led_bulbs", 0.8, 0.1)]),
    ("waste", &[("recycling", 1.8, 0.3), ("composting", 0.9, 0.4)]),
];

static BUILTIN: OnceLock<MultiplierTable> = OnceLock::new();

/// Compiled-in multiplier table, built once per process.
pub fn builtin_table() -> &'static MultiplierTable {
    BUILTIN.get_or_init(|| {
        let categories = BUILTIN_ROWS
            .iter()
            .map(|(name, rows)| {
                CategoryMultipliers::new(
                    name,
                    rows.iter()
                        .map(|(subtype, co2, water)| SubtypeMultiplier::new(subtype, *co2, *water))
                        .collect(),
                )
            })
            .collect();
        MultiplierTable::new_unchecked(categories)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Toml,
}

impl TableFormat {
    /// `.toml` files are TOML; everything else is read as JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

pub fn load_table_from_path(path: &Path) -> Result<MultiplierTable> {
    let raw = std::fs::read_to_string(path).map_err(|e| Error::io(path.display(), e))?;
    let table: MultiplierTable = match TableFormat::from_path(path) {
        TableFormat::Json => serde_json::from_str(&raw)?,
        TableFormat::Toml => toml::from_str(&raw)
            .map_err(|e| Error::InvalidTable(format!("{}: {e}", path.display())))?,
    };
    tracing::debug!(
        path = %path.display(),
        categories = table.categories().len(),
        subtypes = table.subtype_count(),
        "loaded multiplier table"
    );
    Ok(table)
}

/// SHA-256 over the canonical JSON form of the table.
pub fn table_fingerprint(table: &MultiplierTable) -> Result<String> {
    canonical::stable_json_hash_hex(table)
}
