//! File-facing pipeline for the SATIN dataset.
//!
//! Reads dataset files, validates ISRCs against format rules and an
//! optional reference directory, and writes the invalid list and
//! statistics exports.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod dataset;
pub mod reference;
pub mod report;
pub mod validate;

pub use config::Config;
pub use dataset::{load_dataset, read_records};
pub use reference::ReferenceIndex;
pub use report::{write_invalid, write_statistics_json, StatisticsReport};
pub use validate::{validate, ValidationOptions, ValidationReport};
