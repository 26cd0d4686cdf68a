use eco9_model::{ImpactMultiplier, ImpactResult, MultiplierTable};

use crate::resolve::resolve_multiplier;
use crate::table::builtin_table;

/// Rounds to two decimal places, ties toward positive infinity.
///
/// Ties are decided on the binary value of `x * 100`, not on the decimal
/// literal. Negative zero comes out as `0.0`.
///
/// ```
/// use eco9_impact::round2;
///
/// assert_eq!(round2(0.125), 0.13);
/// assert_eq!(round2(-0.125), -0.12);
/// assert_eq!(round2(-0.001), 0.0);
/// ```
#[must_use]
pub fn round2(x: f64) -> f64 {
    let scaled = x * 100.0;
    let floor = scaled.floor();
    let rounded = if scaled - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    rounded / 100.0 + 0.0
}

/// Applies `multiplier` to `value` and rounds both outputs.
#[must_use]
pub fn impact_for(multiplier: ImpactMultiplier, value: f64) -> ImpactResult {
    ImpactResult::new(
        round2(value * multiplier.co2_factor),
        round2(value * multiplier.water_factor),
    )
}

/// Impact of `value` units of `category` under `table`.
///
/// `unit` is part of the input contract but does not select a factor: the
/// caller supplies `value` already expressed in the unit the category's
/// factors assume.
#[must_use]
pub fn calculate_impact(
    table: &MultiplierTable,
    category: &str,
    value: f64,
    unit: &str,
) -> ImpactResult {
    let multiplier = resolve_multiplier(table, category);
    tracing::trace!(category, value, unit, ?multiplier, "calculating impact");
    impact_for(multiplier, value)
}

/// [`calculate_impact`] against the built-in table.
#[must_use]
pub fn calculate(category: &str, value: f64, unit: &str) -> ImpactResult {
    calculate_impact(builtin_table(), category, value, unit)
}
