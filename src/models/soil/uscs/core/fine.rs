//! Fine-grained classification (50% or more passing the No. 200 sieve).

use super::classify::{ClassificationResult, capitalize_first};
use super::input::ClassificationInput;

pub(super) fn classify(input: &ClassificationInput) -> ClassificationResult {
    let ll = input.liquid_limit();
    let pi = input.plasticity_index();
    let a_line_pi = 0.73 * (ll - 20.0);
    let below_a_line = pi < 4.0 || pi < a_line_pi;

    let (symbol, base) = if input.organic() {
        let symbol = if ll >= 50.0 { "OH" } else { "OL" };
        let base = if below_a_line {
            "organic silt"
        } else {
            "organic clay"
        };
        (symbol, base)
    } else if ll >= 50.0 {
        if below_a_line {
            ("MH", "elastic silt")
        } else {
            ("CH", "fat clay")
        }
    } else if below_a_line {
        ("ML", "silt")
    } else if pi > 7.0 {
        ("CL", "lean clay")
    } else {
        ("CL-ML", "silty clay")
    };

    let short_description = describe_with_coarse_fraction(input, base);

    let plasticity = if ll >= 50.0 { "high" } else { "low" };
    let position = if below_a_line { "below" } else { "on or above" };
    let nature = if input.organic() { "Organic" } else { "Inorganic" };
    let detailed_description = format!(
        "{nature} fine-grained soil of {plasticity} plasticity: LL = {ll} with \
         PI = {pi}, plotting {position} the A-line (PI = 0.73(LL - 20) = \
         {a_line_pi:.2} at this liquid limit). Fines make up {fines}% of the \
         sample; the coarse fraction is {coarse}% ({sand}% sand, {gravel}% \
         gravel).",
        fines = input.percent_fines(),
        coarse = input.percent_coarse(),
        sand = input.percent_sand(),
        gravel = input.percent_gravel(),
    );

    ClassificationResult {
        symbol: symbol.to_string(),
        short_description,
        detailed_description,
    }
}

/// Adds the coarse-fraction modifier to the base soil name.
///
/// Under 15% coarse material no modifier applies; from 15% to under 30% the
/// dominant coarse constituent is appended ("silt with sand"); at 30% or more
/// it becomes a prefix ("Sandy silt"), with the minor constituent appended
/// when it reaches 15% on its own.
fn describe_with_coarse_fraction(input: &ClassificationInput, base: &str) -> String {
    let sand = input.percent_sand();
    let gravel = input.percent_gravel();
    let coarse = input.percent_coarse();

    let (dominant, minor, minor_pct) = if sand >= gravel {
        ("sand", "gravel", gravel)
    } else {
        ("gravel", "sand", sand)
    };

    if coarse >= 30.0 {
        let prefix = if sand >= gravel { "Sandy" } else { "Gravelly" };
        let mut description = format!("{prefix} {base}");
        if minor_pct >= 15.0 {
            description.push_str(&format!(" with {minor}"));
        }
        description
    } else if coarse >= 15.0 {
        capitalize_first(&format!("{base} with {dominant}"))
    } else {
        capitalize_first(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::soil::uscs::ClassificationData;

    fn input(
        gravel: f64,
        sand: f64,
        fines: f64,
        ll: f64,
        pi: f64,
        organic: bool,
    ) -> ClassificationInput {
        ClassificationData {
            percent_gravel: gravel,
            percent_sand: sand,
            percent_fines: fines,
            liquid_limit: ll,
            plasticity_index: Some(pi),
            organic,
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn plasticity_chart_quadrants() {
        let cases = [
            (65.0, 40.0, false, "CH", "fat clay"),
            (60.0, 20.0, false, "MH", "elastic silt"),
            (35.0, 15.0, false, "CL", "lean clay"),
            (30.0, 3.0, false, "ML", "silt"),
            (65.0, 40.0, true, "OH", "organic clay"),
            (30.0, 3.0, true, "OL", "organic silt"),
        ];
        for (ll, pi, organic, symbol, base) in cases {
            let result = classify(&input(0.0, 5.0, 95.0, ll, pi, organic));
            assert_eq!(result.symbol, symbol, "LL={ll}, PI={pi}");
            assert_eq!(result.short_description, capitalize_first(base));
        }
    }

    #[test]
    fn cl_ml_zone() {
        // On or above the A-line but PI of 7 or less.
        let result = classify(&input(0.0, 5.0, 95.0, 25.0, 5.0, false));
        assert_eq!(result.symbol, "CL-ML");
        assert_eq!(result.short_description, "Silty clay");

        // PI just over 7 escapes the zone.
        let result = classify(&input(0.0, 5.0, 95.0, 25.0, 7.5, false));
        assert_eq!(result.symbol, "CL");
    }

    #[test]
    fn pi_of_4_on_a_line_is_not_below() {
        let result = classify(&input(0.0, 5.0, 95.0, 20.0, 4.0, false));
        assert_eq!(result.symbol, "CL-ML");
    }

    #[test]
    fn coarse_fraction_modifiers() {
        // Under 15% coarse: no modifier.
        let result = classify(&input(0.0, 10.0, 90.0, 35.0, 15.0, false));
        assert_eq!(result.short_description, "Lean clay");

        // 15% to under 30%: "with" the dominant constituent.
        let result = classify(&input(5.0, 15.0, 80.0, 35.0, 15.0, false));
        assert_eq!(result.short_description, "Lean clay with sand");

        // 30% or more: prefix.
        let result = classify(&input(10.0, 30.0, 60.0, 35.0, 15.0, false));
        assert_eq!(result.short_description, "Sandy lean clay");

        // Prefix plus a minor constituent at 15% or more.
        let result = classify(&input(15.0, 30.0, 55.0, 35.0, 15.0, false));
        assert_eq!(result.short_description, "Sandy lean clay with gravel");

        // Gravel-dominant coarse fraction.
        let result = classify(&input(30.0, 10.0, 60.0, 35.0, 15.0, false));
        assert_eq!(result.short_description, "Gravelly lean clay");
    }

    #[test]
    fn detailed_description_reports_a_line() {
        let result = classify(&input(5.0, 10.0, 85.0, 65.0, 40.0, false));
        assert!(result.detailed_description.contains("on or above the A-line"));
        assert!(result.detailed_description.contains("LL = 65"));
    }
}
