//! Error types for poremetrics library.

use std::io;
use thiserror::Error;

/// Result type alias for poremetrics operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during report extraction.
///
/// Only hard failures are represented here. A keyword, section or number that
/// cannot be found is not an error: it resolves to an empty field.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The extracted text (and grid, if any) carries no content at all.
    #[error("No text content could be extracted from the report")]
    EmptyDocument,

    /// Neither backend reconstructed a single distribution sample.
    #[error("No NLDFT distribution data found")]
    NoDistributionData,

    /// The total pore volume, required for D10/D90, was not found.
    #[error("Total pore volume (highest single-point adsorption) not found; D10/D90 cannot be computed")]
    MissingTotalPoreVolume,

    /// The total pore volume was found but is not a number.
    #[error("Total pore volume '{0}' could not be parsed")]
    InvalidTotalPoreVolume(String),

    /// The grid backend produced a diameter sequence that goes backwards.
    #[error(
        "NLDFT average pore diameter decreases at row {index} ({value:.4} < previous {previous:.4}); wrong columns matched"
    )]
    NonMonotonicDiameter {
        /// 1-based position of the offending sample in table order
        index: usize,
        /// The offending diameter
        value: f64,
        /// The diameter before it
        previous: f64,
    },

    /// Input could not be interpreted (malformed grid document, etc.).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error during rendering (JSON, CSV, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Unexpected fault caught at the extraction boundary.
    #[error("Unexpected error during processing: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidInput(err.to_string())
    }
}
