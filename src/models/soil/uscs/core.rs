//! Core USCS classification logic.

mod classify;
mod coarse;
mod fine;
mod input;

pub use classify::{ClassificationResult, classify};
pub use input::{
    ClassificationData, ClassificationInput, InputError, organic_from_liquid_limits,
};
