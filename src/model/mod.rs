//! Data model for report extraction.
//!
//! Inputs ([`NormalizedText`], [`TableGrid`]) are immutable once produced.
//! Outputs ([`ExtractionResult`] and its parts) are built fresh per document.

mod distribution;
mod result;
mod table;
mod text;

pub use distribution::{DistributionSample, DistributionSeries};
pub use result::{
    AnalysisTally, Backend, DerivedMetrics, ExtractionResult, Provenance, ScalarField,
    ScalarFields, SurfaceAreaLabel, SurfaceAreas, ThresholdMetrics,
};
pub use table::{GridTable, TableGrid};
pub use text::{CharIndex, NormalizedText};
