//! Persisted session formats.
//!
//! Sessions capture work in progress exactly as entered, so a caller can save
//! a half-finished sieve table or classification form and restore it later.
//! Conversion into the validated model inputs happens on load, where parse
//! and validation errors are surfaced with the offending row and field.

pub mod classification;
pub mod sieve;

pub use classification::ClassificationSession;
pub use sieve::{SessionError, SieveRow, SieveSession};
