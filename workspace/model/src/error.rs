use std::path::PathBuf;
use thiserror::Error;

/// Error types for loading the base tables.
///
/// Every variant is fatal: a dataset that fails to load is never used
/// partially. Variants carry the offending file and, where it applies, the
/// row and raw value so the bad input line can be found directly.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Error reading a file from disk
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Error from the CSV parser
    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        source: csv::Error,
    },

    /// A required column is absent from the header row
    #[error("missing column '{column}' in {}", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// A date cell did not parse as %Y-%m-%d
    #[error("invalid date '{value}' in {} at row {row}", .path.display())]
    InvalidDate {
        path: PathBuf,
        row: usize,
        value: String,
    },

    /// An availability cell held something other than "t" or "f"
    #[error("invalid availability flag '{value}' in {} at row {row}", .path.display())]
    InvalidAvailability {
        path: PathBuf,
        row: usize,
        value: String,
    },

    /// A listing id cell did not parse as an integer
    #[error("invalid listing id '{value}' in {} at row {row}", .path.display())]
    InvalidListingId {
        path: PathBuf,
        row: usize,
        value: String,
    },

    /// Error from the GeoJSON parser
    #[error("GeoJSON error in {}: {source}", .path.display())]
    GeoJson {
        path: PathBuf,
        source: geojson::Error,
    },

    /// The boundary file parsed but is not a FeatureCollection
    #[error("{} is not a GeoJSON FeatureCollection", .path.display())]
    NotAFeatureCollection { path: PathBuf },

    /// A boundary feature carries no geometry to draw
    #[error("feature {feature} in {} has no geometry", .path.display())]
    MissingGeometry { path: PathBuf, feature: usize },
}

/// Type alias for Result with LoadError
pub type Result<T> = std::result::Result<T, LoadError>;
