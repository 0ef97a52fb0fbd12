//! Supporting utilities used by models.
//!
//! Modules here are part of the public API because they're useful, but their
//! APIs are not stable. Breaking changes may occur as needed.

pub mod constraint;
