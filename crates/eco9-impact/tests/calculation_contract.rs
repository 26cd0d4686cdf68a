use eco9_impact::{builtin_table, calculate, calculate_impact, round2, GLOBAL_DEFAULT_MULTIPLIER};
use eco9_model::{CategoryMultipliers, ImpactResult, MultiplierTable, SubtypeMultiplier};

#[test]
fn reference_values_match_published_examples() {
    assert_eq!(calculate("transport", 5.2, "km"), ImpactResult::new(2.08, 0.52));
    assert_eq!(calculate("energy", 3.5, "kWh"), ImpactResult::new(8.75, 1.75));
    assert_eq!(calculate("waste", 2.1, "kg"), ImpactResult::new(3.78, 0.63));
}

#[test]
fn unknown_category_uses_global_default_factors() {
    let got = calculate("gardening", 10.0, "m2");
    assert_eq!(got, ImpactResult::new(5.0, 1.0));

    let got = calculate("", 3.33, "");
    assert_eq!(
        got,
        ImpactResult::new(
            round2(3.33 * GLOBAL_DEFAULT_MULTIPLIER.co2_factor),
            round2(3.33 * GLOBAL_DEFAULT_MULTIPLIER.water_factor),
        )
    );
}

#[test]
fn diet_and_water_fall_back_until_declared() {
    assert_eq!(calculate("diet", 4.0, "meals"), ImpactResult::new(2.0, 0.4));
    assert_eq!(calculate("water", 4.0, "l"), ImpactResult::new(2.0, 0.4));
}

#[test]
fn zero_value_is_zero_impact_for_every_category() {
    for category in ["transport", "energy", "waste", "diet", "water", "other"] {
        let got = calculate(category, 0.0, "unit");
        assert_eq!(got, ImpactResult::ZERO, "{category}");
        assert!(got.co2_saved.is_sign_positive());
    }
}

#[test]
fn unit_does_not_change_the_result() {
    assert_eq!(calculate("transport", 5.2, "km"), calculate("transport", 5.2, "miles"));
}

#[test]
fn large_values_stay_finite() {
    let got = calculate("energy", 1e9, "kWh");
    assert!(got.co2_saved.is_finite());
    assert!(got.water_conserved.is_finite());
    assert_eq!(got, ImpactResult::new(2.5e9, 5e8));
}

#[test]
fn custom_table_first_subtype_governs() {
    let table = MultiplierTable::new(vec![CategoryMultipliers::new(
        "water",
        vec![
            SubtypeMultiplier::new("rain_barrel", 0.01, 2.0),
            SubtypeMultiplier::new("low_flow", 0.02, 5.0),
        ],
    )])
    .expect("table");
    assert_eq!(calculate_impact(&table, "water", 3.0, "days"), ImpactResult::new(0.03, 6.0));
    // Built-in categories are not implied by a custom table.
    assert_eq!(calculate_impact(&table, "transport", 10.0, "km"), ImpactResult::new(5.0, 1.0));
}

#[test]
fn first_subtype_rule_holds_for_builtin_table() {
    for category in builtin_table().categories() {
        let first = category.first_subtype().expect("builtin categories declare subtypes");
        let got = calculate(&category.name, 7.25, "unit");
        assert_eq!(got.co2_saved, round2(7.25 * first.co2_factor));
        assert_eq!(got.water_conserved, round2(7.25 * first.water_factor));
    }
}
