//! Core domain model for the SATIN dataset tooling.
//!
//! This crate defines the ISRC type and its format rules, typed dataset
//! records, per-record classifications, and the pure statistics
//! aggregation consumed by plotting collaborators.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod stats;

pub use error::{Error, Result};
pub use model::{Classification, DatasetRecord, FormatRules, FormatViolation, Isrc, Validity};
pub use stats::{compute_statistics, genre_counts, DatasetStatistics, Totals};
