//! # Geotech Models
//!
//! Pure computation models for geotechnical laboratory work: grain-size
//! distribution analysis from sieve test data and soil classification per
//! the Unified Soil Classification System (USCS, ASTM D2487).
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`session`]: Persisted session schemas and their re-parsing into model inputs.
//! - [`export`]: Tabular and key/value result export for CSV/printing collaborators.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Design
//!
//! Every model here is a pure, synchronous function over immutable inputs:
//! the caller builds a [`models::soil::gradation::GradationSample`] or a
//! [`models::soil::uscs::ClassificationInput`], invokes the model, and reads
//! a freshly allocated result. No state survives between invocations and the
//! core never mutates caller-owned data.
//!
//! Quantities that can be undefined (a D-value, a gradation coefficient) are
//! explicit optionals checked by callers, never values inferred from a
//! swallowed error.

pub mod export;
pub mod models;
pub mod session;
pub mod support;
