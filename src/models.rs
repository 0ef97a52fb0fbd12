//! Public geotechnical models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! Models are organized into domain-specific submodules (currently only
//! [`soil`]) based on an opinionated taxonomy. This organization may evolve
//! as more models are added.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core`
//! submodule where the actual computation and domain logic lives. The
//! [`twine_core::Model`] implementation is a thin adapter that delegates to
//! the model-specific core API, and the core types a caller needs are
//! re-exported from the model module.

pub mod soil;
