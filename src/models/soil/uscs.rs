//! Soil classification per the Unified Soil Classification System (USCS).
//!
//! The classifier takes particle-size percentages, Atterberg limits, and
//! gradation coefficients and produces a group symbol with short and
//! detailed descriptions. Build a [`ClassificationData`], validate it into a
//! [`ClassificationInput`], and run it through [`UscsClassifier`] (or call
//! [`classify`] directly).

pub(crate) mod core;

use std::convert::Infallible;

use twine_core::Model;

pub use self::core::{
    ClassificationData, ClassificationInput, ClassificationResult, InputError, classify,
    organic_from_liquid_limits,
};

/// A [`Model`] that classifies validated soil data.
#[derive(Debug, Clone, Copy, Default)]
pub struct UscsClassifier;

impl Model for UscsClassifier {
    type Input = ClassificationInput;
    type Output = ClassificationResult;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(classify(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_model_matches_direct_call() {
        let input = ClassificationData {
            percent_gravel: 5.0,
            percent_sand: 10.0,
            percent_fines: 85.0,
            liquid_limit: 65.0,
            plastic_limit: 25.0,
            ..Default::default()
        }
        .validate()
        .unwrap();

        let output = UscsClassifier.call(&input).unwrap();
        assert_eq!(output, classify(&input));
        assert_eq!(output.symbol, "CH");
    }
}
