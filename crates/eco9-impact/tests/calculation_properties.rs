use eco9_impact::{builtin_table, calculate, round2, GLOBAL_DEFAULT_MULTIPLIER};
use proptest::prelude::*;

fn category() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("transport".to_string()),
        Just("energy".to_string()),
        Just("waste".to_string()),
        Just("diet".to_string()),
        "[a-zA-Z_ ]{0,12}",
    ]
}

proptest! {
    #[test]
    fn identical_inputs_give_bit_identical_outputs(c in category(), v in 0.0f64..1e9) {
        let a = calculate(&c, v, "u");
        let b = calculate(&c, v, "u");
        prop_assert_eq!(a.co2_saved.to_bits(), b.co2_saved.to_bits());
        prop_assert_eq!(a.water_conserved.to_bits(), b.water_conserved.to_bits());
    }

    #[test]
    fn non_negative_input_gives_non_negative_output(c in category(), v in 0.0f64..1e9) {
        let got = calculate(&c, v, "u");
        prop_assert!(got.co2_saved >= 0.0);
        prop_assert!(got.water_conserved >= 0.0);
    }

    #[test]
    fn undeclared_categories_match_global_default(c in "[A-Z][a-z]{0,10}", v in 0.0f64..1e6) {
        prop_assume!(builtin_table().category(&c).is_none());
        let got = calculate(&c, v, "u");
        prop_assert_eq!(got.co2_saved, round2(v * GLOBAL_DEFAULT_MULTIPLIER.co2_factor));
        prop_assert_eq!(got.water_conserved, round2(v * GLOBAL_DEFAULT_MULTIPLIER.water_factor));
    }

    #[test]
    fn round2_lands_within_half_a_cent(x in -1e6f64..1e6) {
        let r = round2(x);
        prop_assert!((r - x).abs() <= 0.005 + 1e-9);
        prop_assert_eq!(round2(r), r);
    }
}
