//! Top-level USCS classification.

use super::input::ClassificationInput;
use super::{coarse, fine};

/// The outcome of classifying a soil.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// USCS group symbol, e.g. `SW` or `GP-GM`.
    pub symbol: String,

    /// Short group name, e.g. "Well-graded sand with gravel".
    pub short_description: String,

    /// A sentence or two explaining how the symbol was reached.
    pub detailed_description: String,
}

/// Classifies a validated input per the Unified Soil Classification System.
///
/// Soils with 50% or more fines are classified on the plasticity chart;
/// everything else is classified on gradation and fines content.
pub fn classify(input: &ClassificationInput) -> ClassificationResult {
    if input.percent_fines() >= 50.0 {
        fine::classify(input)
    } else {
        coarse::classify(input)
    }
}

pub(super) fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
