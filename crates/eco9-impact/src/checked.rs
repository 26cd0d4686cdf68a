// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use eco9_core::{Error, Result};
use eco9_model::{
    ActivityInput, ImpactResult, MultiplierTable, CATEGORY_MAX_LEN, UNIT_MAX_LEN,
};
use serde::{Deserialize, Serialize};

use crate::calculate::impact_for;
use crate::resolve::{resolve, MultiplierSource, Resolution};
use crate::table::{builtin_table, table_fingerprint};

/// What the checked boundary does with a negative `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeValuePolicy {
    #[default]
    Reject,
    Clamp,
}

impl NegativeValuePolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Clamp => "clamp",
        }
    }
}

impl Display for NegativeValuePolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NegativeValuePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "reject" => Ok(Self::Reject),
            "clamp" => Ok(Self::Clamp),
            other => Err(Error::InvalidArgument {
                field: "negative_values",
                value: other.to_string(),
                reason: "expected `reject` or `clamp`",
            }),
        }
    }
}

/// Outcome of a validated calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    /// Value actually used, after any clamping.
    pub value: f64,
    pub resolution: Resolution,
    pub impact: ImpactResult,
}

/// A multiplier table paired with the input policy applied at the boundary.
///
/// Cheap to clone; the table is shared.
#[derive(Debug, Clone)]
pub struct ImpactCalculator {
    table: Arc<MultiplierTable>,
    fingerprint: String,
    negative_values: NegativeValuePolicy,
}

impl ImpactCalculator {
    pub fn new(table: MultiplierTable, negative_values: NegativeValuePolicy) -> Result<Self> {
        let fingerprint = table_fingerprint(&table)?;
        Ok(Self {
            table: Arc::new(table),
            fingerprint,
            negative_values,
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::new(builtin_table().clone(), NegativeValuePolicy::default())
    }

    #[must_use]
    pub fn table(&self) -> &MultiplierTable {
        &self.table
    }

    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    #[must_use]
    pub const fn policy(&self) -> NegativeValuePolicy {
        self.negative_values
    }

    #[must_use]
    pub fn resolve(&self, category: &str, subtype: Option<&str>) -> Resolution {
        resolve(&self.table, category, subtype)
    }

    /// Unvalidated calculation; same contract as [`crate::calculate_impact`].
    #[must_use]
    pub fn calculate(&self, category: &str, value: f64, unit: &str) -> ImpactResult {
        crate::calculate::calculate_impact(&self.table, category, value, unit)
    }

    pub fn calculate_checked(&self, input: &ActivityInput) -> Result<Assessment> {
        let category = input.category.as_str();
        validate_text("category", category, CATEGORY_MAX_LEN)?;
        validate_text("unit", &input.unit, UNIT_MAX_LEN)?;
        let value = self.admit_value(input.value)?;

        let resolution = self.resolve(category, input.subtype.as_deref());
        match &resolution.source {
            MultiplierSource::GlobalDefault => tracing::warn!(
                category,
                known = input.category.is_known(),
                "no multiplier declared for category; using global default"
            ),
            MultiplierSource::Subtype { subtype, .. } => {
                if let Some(requested) = input.subtype.as_deref() {
                    if requested != subtype {
                        tracing::warn!(
                            category,
                            requested,
                            used = %subtype,
                            "subtype not declared for category; using first declared subtype"
                        );
                    }
                }
            }
        }

        let impact = impact_for(resolution.multiplier, value);
        tracing::debug!(
            category,
            value,
            unit = %input.unit,
            co2_saved = impact.co2_saved,
            water_conserved = impact.water_conserved,
            "impact assessed"
        );
        Ok(Assessment {
            value,
            resolution,
            impact,
        })
    }

    fn admit_value(&self, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(Error::InvalidArgument {
                field: "value",
                value: value.to_string(),
                reason: "must be a finite number",
            });
        }
        if value < 0.0 {
            return match self.negative_values {
                NegativeValuePolicy::Reject => Err(Error::InvalidArgument {
                    field: "value",
                    value: value.to_string(),
                    reason: "must not be negative",
                }),
                NegativeValuePolicy::Clamp => {
                    tracing::debug!(value, "clamping negative value to zero");
                    Ok(0.0)
                }
            };
        }
        Ok(value)
    }
}

fn validate_text(field: &'static str, value: &str, max_len: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument {
            field,
            value: value.to_string(),
            reason: "must not be empty",
        });
    }
    if value.len() > max_len {
        return Err(Error::InvalidArgument {
            field,
            value: value.to_string(),
            reason: "exceeds maximum length",
        });
    }
    Ok(())
}
