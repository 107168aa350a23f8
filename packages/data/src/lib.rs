#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Startup loading and reshaping of the dashboard's input files.
//!
//! Reads the wide crime CSV and the borough boundary `GeoJSON` once, then
//! melts the crime table into long form. The public loaders never fail:
//! every problem is logged and turned into `None`, which the chart
//! builders render as a "no data" placeholder.

pub mod boundaries;
pub mod crime;
pub mod paths;
pub mod reshape;

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

pub use boundaries::{load_boundaries, parse_boundaries};
pub use crime::{load_crime_data, parse_crime_csv};
pub use reshape::melt;

/// Errors that can occur while reading an input file.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file does not exist.
    #[error("File not found: {}", path.display())]
    MissingFile {
        /// Path that was tried.
        path: PathBuf,
    },

    /// The file exists but has no usable content.
    #[error("File is empty: {what}")]
    EmptyFile {
        /// What was empty (a path or a description).
        what: String,
    },

    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV could not be parsed or reshaped.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    /// The `GeoJSON` could not be parsed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The `GeoJSON` parsed but is not a `FeatureCollection`.
    #[error("Expected a GeoJSON FeatureCollection, found a {found}")]
    UnexpectedGeoJson {
        /// Kind of `GeoJSON` object that was found.
        found: String,
    },

    /// A required identifier column is absent from the header.
    #[error("Missing column: {column}")]
    MissingColumn {
        /// Canonical column name.
        column: String,
    },

    /// A monthly count cell is not a non-negative whole number.
    #[error("Invalid count {value:?} in column {month} on line {line}")]
    InvalidCount {
        /// Offending cell text.
        value: String,
        /// Month column the cell sits in.
        month: String,
        /// 1-based line number in the file.
        line: u64,
    },

    /// The header row or a data row does not fit the table layout.
    #[error("Malformed row: {message}")]
    MalformedRow {
        /// Description of what went wrong.
        message: String,
    },

    /// The counts in the file add up to more than a `u64` can hold.
    #[error("Crime counts overflow at column {month} on line {line}")]
    CountOverflow {
        /// Month column of the cell that overflowed the running total.
        month: String,
        /// 1-based line number in the file.
        line: u64,
    },
}
