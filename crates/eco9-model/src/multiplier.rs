// SPDX-License-Identifier: Apache-2.0

use eco9_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::category::CATEGORY_MAX_LEN;

/// Per-unit conversion factors for one (category, subtype) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImpactMultiplier {
    pub co2_factor: f64,
    pub water_factor: f64,
}

impl ImpactMultiplier {
    #[must_use]
    pub const fn new(co2_factor: f64, water_factor: f64) -> Self {
        Self {
            co2_factor,
            water_factor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubtypeMultiplier {
    pub name: String,
    pub co2_factor: f64,
    pub water_factor: f64,
}

impl SubtypeMultiplier {
    #[must_use]
    pub fn new(name: &str, co2_factor: f64, water_factor: f64) -> Self {
        Self {
            name: name.to_string(),
            co2_factor,
            water_factor,
        }
    }

    #[must_use]
    pub const fn multiplier(&self) -> ImpactMultiplier {
        ImpactMultiplier::new(self.co2_factor, self.water_factor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryMultipliers {
    pub name: String,
    #[serde(default)]
    pub subtypes: Vec<SubtypeMultiplier>,
}

impl CategoryMultipliers {
    #[must_use]
    pub fn new(name: &str, subtypes: Vec<SubtypeMultiplier>) -> Self {
        Self {
            name: name.to_string(),
            subtypes,
        }
    }

    /// First subtype in declaration order.
    #[must_use]
    pub fn first_subtype(&self) -> Option<&SubtypeMultiplier> {
        self.subtypes.first()
    }

    #[must_use]
    pub fn subtype(&self, name: &str) -> Option<&SubtypeMultiplier> {
        self.subtypes.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
struct MultiplierTableDoc {
    #[serde(default)]
    categories: Vec<CategoryMultipliers>,
}

/// Category → subtype → multiplier, in declaration order.
///
/// Every constructed or deserialized table has passed [`MultiplierTable::new`]
/// validation: unique non-empty category names, unique subtype names per
/// category, finite non-negative factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MultiplierTableDoc")]
pub struct MultiplierTable {
    categories: Vec<CategoryMultipliers>,
}

impl MultiplierTable {
    pub fn new(categories: Vec<CategoryMultipliers>) -> Result<Self> {
        validate_categories(&categories)?;
        Ok(Self { categories })
    }

    /// Builds a table from compiled-in data without running validation.
    ///
    /// The caller guarantees the invariants listed on the type; debug builds
    /// still check them.
    #[must_use]
    pub fn new_unchecked(categories: Vec<CategoryMultipliers>) -> Self {
        debug_assert!(validate_categories(&categories).is_ok());
        Self { categories }
    }

    #[must_use]
    pub fn categories(&self) -> &[CategoryMultipliers] {
        &self.categories
    }

    /// Exact, case-sensitive category lookup.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CategoryMultipliers> {
        self.categories.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn subtype_count(&self) -> usize {
        self.categories.iter().map(|c| c.subtypes.len()).sum()
    }
}

impl TryFrom<MultiplierTableDoc> for MultiplierTable {
    type Error = Error;

    fn try_from(doc: MultiplierTableDoc) -> Result<Self> {
        Self::new(doc.categories)
    }
}

fn validate_categories(categories: &[CategoryMultipliers]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for category in categories {
        let name = category.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidTable(
                "category name must not be empty".to_string(),
            ));
        }
        if category.name.len() > CATEGORY_MAX_LEN {
            return Err(Error::InvalidTable(format!(
                "category `{}` exceeds max length {CATEGORY_MAX_LEN}",
                category.name
            )));
        }
        if !seen.insert(category.name.as_str()) {
            return Err(Error::InvalidTable(format!(
                "duplicate category `{}`",
                category.name
            )));
        }

        let mut subtypes = BTreeSet::new();
        for subtype in &category.subtypes {
            if subtype.name.trim().is_empty() {
                return Err(Error::InvalidTable(format!(
                    "category `{}` has a subtype with an empty name",
                    category.name
                )));
            }
            if !subtypes.insert(subtype.name.as_str()) {
                return Err(Error::InvalidTable(format!(
                    "duplicate subtype `{}` in category `{}`",
                    subtype.name, category.name
                )));
            }
            for (field, factor) in [
                ("co2_factor", subtype.co2_factor),
                ("water_factor", subtype.water_factor),
            ] {
                if !factor.is_finite() || factor < 0.0 {
                    return Err(Error::InvalidTable(format!(
                        "{}/{}: {field} must be finite and non-negative, got {factor}",
                        category.name, subtype.name
                    )));
                }
            }
        }
    }
    Ok(())
}
