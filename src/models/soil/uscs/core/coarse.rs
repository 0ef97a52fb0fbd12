//! Coarse-grained classification (less than 50% passing the No. 200 sieve).

use super::classify::ClassificationResult;
use super::input::ClassificationInput;

/// The dominant coarse constituent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CoarseKind {
    Gravel,
    Sand,
}

impl CoarseKind {
    fn letter(self) -> char {
        match self {
            Self::Gravel => 'G',
            Self::Sand => 'S',
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Gravel => "gravel",
            Self::Sand => "sand",
        }
    }

    fn other(self) -> Self {
        match self {
            Self::Gravel => Self::Sand,
            Self::Sand => Self::Gravel,
        }
    }

    /// Minimum Cu for a well-graded gradation.
    fn well_graded_cu_min(self) -> f64 {
        match self {
            Self::Gravel => 4.0,
            Self::Sand => 6.0,
        }
    }
}

pub(super) fn classify(input: &ClassificationInput) -> ClassificationResult {
    let gravel = input.percent_gravel();
    let sand = input.percent_sand();
    let kind = if gravel > sand {
        CoarseKind::Gravel
    } else {
        CoarseKind::Sand
    };
    let minor_pct = match kind {
        CoarseKind::Gravel => sand,
        CoarseKind::Sand => gravel,
    };

    let fines = input.percent_fines();
    let ll = input.liquid_limit();
    let pi = input.plasticity_index();

    let cu_min = kind.well_graded_cu_min();
    let well_graded = matches!(
        (input.cu(), input.cc()),
        (Some(cu), Some(cc)) if cu >= cu_min && (1.0..=3.0).contains(&cc)
    );
    let (grade_letter, grade_word) = if well_graded {
        ('W', "Well-graded")
    } else {
        ('P', "Poorly graded")
    };

    // Fines above the A-line at higher liquid limits still classify as silt.
    let silt_exception = ll > 25.5 && pi < 0.73 * (ll - 20.0);

    let letter = kind.letter();
    let name = kind.name();
    let other_name = kind.other().name();
    let gradation_detail = format!(
        "Cu = {cu} (well-graded at {cu_min} or more) and Cc = {cc} \
         (well-graded between 1 and 3)",
        cu = fmt_opt(input.cu()),
        cc = fmt_opt(input.cc()),
    );

    let (symbol, short_description, fines_detail) = if fines < 5.0 {
        let mut description = format!("{grade_word} {name}");
        if minor_pct >= 15.0 {
            description.push_str(&format!(" with {other_name}"));
        }
        (
            format!("{letter}{grade_letter}"),
            description,
            format!("a clean {name} with {fines}% fines, classified on gradation alone"),
        )
    } else if fines <= 12.0 {
        let clayey = pi >= 4.0 && !silt_exception;
        let (fines_letter, fines_word) = if clayey { ('C', "clay") } else { ('M', "silt") };
        let mut description = format!("{grade_word} {name} with {fines_word}");
        if minor_pct >= 15.0 {
            description.push_str(&format!(" and {other_name}"));
        }
        (
            format!("{letter}{grade_letter}-{letter}{fines_letter}"),
            description,
            format!(
                "{fines}% fines falls in the 5% to 12% band, so the symbol \
                 carries both the gradation and the fines type ({fines_word})"
            ),
        )
    } else {
        let (symbol, soil_name, fines_detail) = if pi > 7.0 && !silt_exception {
            (
                format!("{letter}C"),
                format!("Clayey {name}"),
                format!(
                    "{fines}% clayey fines (PI = {pi} exceeds 7 and plots on \
                     or above the A-line)"
                ),
            )
        } else if pi < 4.0 {
            (
                format!("{letter}M"),
                format!("Silty {name}"),
                format!("{fines}% silty fines (PI = {pi} is below 4)"),
            )
        } else {
            (
                format!("{letter}C-{letter}M"),
                format!("Silty, clayey {name}"),
                format!("{fines}% fines of borderline plasticity (PI = {pi})"),
            )
        };
        let mut description = soil_name;
        if minor_pct >= 15.0 {
            description.push_str(&format!(" with {other_name}"));
        }
        (symbol, description, fines_detail)
    };

    let detailed_description = format!(
        "Coarse-grained soil, predominantly {name} ({gravel}% gravel vs \
         {sand}% sand): {fines_detail}. Gradation: {gradation_detail}.",
    );

    ClassificationResult {
        symbol,
        short_description,
        detailed_description,
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::soil::uscs::ClassificationData;

    fn input(data: ClassificationData) -> ClassificationInput {
        data.validate().unwrap()
    }

    #[test]
    fn clean_gravel_well_and_poorly_graded() {
        let result = classify(&input(ClassificationData {
            percent_gravel: 70.0,
            percent_sand: 26.0,
            percent_fines: 4.0,
            cu: Some(40.0),
            cc: Some(2.5),
            ..Default::default()
        }));
        assert_eq!(result.symbol, "GW");
        assert_eq!(result.short_description, "Well-graded gravel with sand");

        let result = classify(&input(ClassificationData {
            percent_gravel: 80.0,
            percent_sand: 16.0,
            percent_fines: 4.0,
            cu: Some(3.0),
            cc: Some(0.5),
            ..Default::default()
        }));
        assert_eq!(result.symbol, "GP");
        assert_eq!(result.short_description, "Poorly graded gravel with sand");
    }

    #[test]
    fn missing_coefficients_are_poorly_graded() {
        let result = classify(&input(ClassificationData {
            percent_sand: 96.0,
            percent_fines: 4.0,
            ..Default::default()
        }));
        assert_eq!(result.symbol, "SP");
        assert_eq!(result.short_description, "Poorly graded sand");
    }

    #[test]
    fn sand_cu_threshold_is_six() {
        let data = ClassificationData {
            percent_gravel: 10.0,
            percent_sand: 86.0,
            percent_fines: 4.0,
            cu: Some(5.0),
            cc: Some(1.5),
            ..Default::default()
        };
        assert_eq!(classify(&input(data)).symbol, "SP");

        let data = ClassificationData {
            cu: Some(6.0),
            ..data
        };
        assert_eq!(classify(&input(data)).symbol, "SW");
    }

    #[test]
    fn dual_symbol_in_the_5_to_12_band() {
        // Silty fines: PI below 4.
        let result = classify(&input(ClassificationData {
            percent_gravel: 60.0,
            percent_sand: 30.0,
            percent_fines: 10.0,
            cu: Some(40.0),
            cc: Some(2.5),
            plasticity_index: Some(2.0),
            ..Default::default()
        }));
        assert_eq!(result.symbol, "GW-GM");
        assert_eq!(result.short_description, "Well-graded gravel with silt and sand");

        // Clayey fines: PI of 4 or more, no silt exception.
        let result = classify(&input(ClassificationData {
            percent_gravel: 5.0,
            percent_sand: 85.0,
            percent_fines: 10.0,
            liquid_limit: 24.0,
            plasticity_index: Some(6.0),
            ..Default::default()
        }));
        assert_eq!(result.symbol, "SP-SC");
        assert_eq!(result.short_description, "Poorly graded sand with clay");
    }

    #[test]
    fn silt_exception_overrides_clayey_fines_in_dual_band() {
        // PI of 6 would read clayey, but at LL = 40 it plots below the
        // A-line (0.73 * 20 = 14.6), so the fines are silt.
        let result = classify(&input(ClassificationData {
            percent_gravel: 60.0,
            percent_sand: 30.0,
            percent_fines: 10.0,
            liquid_limit: 40.0,
            plasticity_index: Some(6.0),
            ..Default::default()
        }));
        assert_eq!(result.symbol, "GP-GM");
    }

    #[test]
    fn dirty_coarse_fines_type() {
        let base = ClassificationData {
            percent_gravel: 55.0,
            percent_sand: 25.0,
            percent_fines: 20.0,
            liquid_limit: 25.0,
            ..Default::default()
        };

        let result = classify(&input(ClassificationData {
            plasticity_index: Some(12.0),
            ..base
        }));
        assert_eq!(result.symbol, "GC");
        assert_eq!(result.short_description, "Clayey gravel with sand");

        let result = classify(&input(ClassificationData {
            plasticity_index: Some(2.0),
            ..base
        }));
        assert_eq!(result.symbol, "GM");
        assert_eq!(result.short_description, "Silty gravel with sand");

        // PI between 4 and 7 inclusive is borderline.
        let result = classify(&input(ClassificationData {
            plasticity_index: Some(6.0),
            ..base
        }));
        assert_eq!(result.symbol, "GC-GM");
        assert_eq!(result.short_description, "Silty, clayey gravel with sand");
    }

    #[test]
    fn minor_constituent_below_15_percent_is_omitted() {
        let result = classify(&input(ClassificationData {
            percent_gravel: 76.0,
            percent_sand: 10.0,
            percent_fines: 14.0,
            plasticity_index: Some(2.0),
            ..Default::default()
        }));
        assert_eq!(result.symbol, "GM");
        assert_eq!(result.short_description, "Silty gravel");
    }

    #[test]
    fn ties_between_gravel_and_sand_go_to_sand() {
        let result = classify(&input(ClassificationData {
            percent_gravel: 48.0,
            percent_sand: 48.0,
            percent_fines: 4.0,
            ..Default::default()
        }));
        assert_eq!(result.symbol, "SP");
    }
}
