use polars::prelude::PolarsError;
use thiserror::Error;
use tracing::error;

/// Errors that can occur during computation operations
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from DataFrame operations
    #[error("DataFrame operation failed: {0}")]
    DataFrame(String),

    /// Error from Series operations
    #[error("Series operation failed: {0}")]
    Series(String),

    /// Error converting between date representations
    #[error("Date conversion failed: {0}")]
    Date(String),

    /// The series is too short to fit a forecast model
    #[error("forecast needs at least {needed} observations, got {got}")]
    InsufficientHistory { needed: usize, got: usize },

    /// Error while fitting or evaluating the forecast model
    #[error("Forecast computation failed: {0}")]
    ForecastComputation(String),
}

impl From<PolarsError> for ComputeError {
    fn from(err: PolarsError) -> Self {
        error!("Polars error occurred: {:?}", err);
        match err {
            PolarsError::NoData(msg) => ComputeError::DataFrame(msg.to_string()),
            PolarsError::ShapeMismatch(msg) => ComputeError::DataFrame(msg.to_string()),
            PolarsError::SchemaMismatch(msg) => ComputeError::DataFrame(msg.to_string()),
            PolarsError::ComputeError(msg) => ComputeError::DataFrame(msg.to_string()),
            PolarsError::OutOfBounds(msg) => ComputeError::DataFrame(msg.to_string()),
            _ => ComputeError::Series(err.to_string()),
        }
    }
}

/// Result type alias for compute operations
pub type Result<T> = std::result::Result<T, ComputeError>;
