//! Base tables for the availability analytics pipeline.
//!
//! This crate owns the raw record types (calendar availability, listings,
//! neighbourhood geometry) and the loader that reads them from static input
//! files into immutable in-memory tables. Everything downstream (aggregation,
//! forecasting, map styling) consumes these tables read-only.

pub mod dataset;
pub mod error;
pub mod records;

pub use dataset::Dataset;
pub use error::{LoadError, Result};
