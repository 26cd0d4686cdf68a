use std::collections::BTreeMap;

use eco9_model::{Activity, CategoryTotals, ImpactSummary};

use crate::calculate::round2;

/// Totals over stored activities. Sums are rounded once, after summation.
pub fn summarize<'a, I>(activities: I) -> ImpactSummary
where
    I: IntoIterator<Item = &'a Activity>,
{
    let mut summary = ImpactSummary::default();
    let mut by_category: BTreeMap<String, CategoryTotals> = BTreeMap::new();

    for activity in activities {
        summary.activity_count += 1;
        summary.co2_saved += activity.impact.co2_saved;
        summary.water_conserved += activity.impact.water_conserved;

        let totals = by_category
            .entry(activity.category.as_str().to_string())
            .or_default();
        totals.activity_count += 1;
        totals.co2_saved += activity.impact.co2_saved;
        totals.water_conserved += activity.impact.water_conserved;
    }

    summary.co2_saved = round2(summary.co2_saved);
    summary.water_conserved = round2(summary.water_conserved);
    for totals in by_category.values_mut() {
        totals.co2_saved = round2(totals.co2_saved);
        totals.water_conserved = round2(totals.water_conserved);
    }
    summary.by_category = by_category;
    summary
}
