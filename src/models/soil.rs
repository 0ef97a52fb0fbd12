//! Soil mechanics models.
//!
//! This module contains models for soil laboratory analysis: gradation curve
//! construction from sieve readings and USCS classification.

pub mod gradation;
pub mod uscs;
