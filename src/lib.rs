//! # poremetrics
//!
//! Pore-structure metric extraction from gas-adsorption report text and tables.
//!
//! The library takes a report that an ingestion step has already turned into
//! text (or into geometric table grids), and returns the BET surface areas,
//! pore volumes and pore diameters it states, the NLDFT pore-size
//! distribution, and percentile and threshold metrics derived from it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use poremetrics::{extract_file, render};
//!
//! fn main() -> poremetrics::Result<()> {
//!     let result = extract_file("report.txt")?;
//!     if result.success {
//!         println!("D10 = {:.4} nm, D90 = {:.4} nm", result.metrics.d10, result.metrics.d90);
//!     }
//!     println!("{}", render::to_json(&result, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Keyword-anchored values**: scalar fields found by proximity to their labels
//! - **Two table backends**: tolerant line-stream and strict grid-column reconstruction
//! - **Derived metrics**: D10/D90, pore volume A, 0.5D/1.5D thresholds by interpolation
//! - **Graceful degradation**: missing fields stay empty instead of failing the report
//! - **Parallel batches**: independent reports processed with Rayon

pub mod detect;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_input, detect_report, has_report_keywords, ReportFormat, ReportProfile};
pub use error::{Error, Result};
pub use extract::{Extractor, ReportInput};
pub use model::{
    AnalysisTally, Backend, DerivedMetrics, DistributionSample, DistributionSeries,
    ExtractionResult, GridTable, NormalizedText, Provenance, ScalarField, ScalarFields,
    SurfaceAreaLabel, SurfaceAreas, TableGrid, ThresholdMetrics,
};
pub use parser::{ExtractOptions, GridConfig, LineStreamConfig, LocatorConfig, MatchMode, WindowShape};
pub use render::JsonFormat;

use std::fs;
use std::path::Path;

/// Extract metrics from raw report text.
///
/// # Example
///
/// ```
/// use poremetrics::extract_text;
///
/// let result = extract_text("no report here");
/// assert!(!result.success);
/// ```
pub fn extract_text(raw: &str) -> ExtractionResult {
    Extractor::new().extract(&ReportInput::text(raw))
}

/// Extract metrics from table grids, optionally backed by the report text.
pub fn extract_grid(tables: TableGrid, raw_text: Option<&str>) -> ExtractionResult {
    let input = match raw_text {
        Some(raw) => ReportInput::grid_with_text(tables, raw),
        None => ReportInput::grid(tables),
    };
    Extractor::new().extract(&input)
}

/// Load a report input from a file.
///
/// A `.json` file is read as a serialized grid document; anything else is
/// read as extracted text.
pub fn load_input<P: AsRef<Path>>(path: P) -> Result<ReportInput> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        ReportInput::from_grid_json(&content)
    } else {
        Ok(ReportInput::text(&content))
    }
}

/// Extract metrics from a report file.
///
/// # Example
///
/// ```no_run
/// use poremetrics::extract_file;
///
/// let result = extract_file("report.txt").unwrap();
/// println!("Ratio: {}", result.metrics.d90_d10_ratio);
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ExtractionResult> {
    let input = load_input(path)?;
    Ok(Extractor::new().extract(&input))
}

/// Builder for configuring and running extraction.
///
/// # Example
///
/// ```no_run
/// use poremetrics::{PoreMetrics, WindowShape};
///
/// let result = PoreMetrics::new()
///     .strict_keywords()
///     .with_discount(0.4)
///     .with_window_shape(WindowShape::Trailing)
///     .extract_file("report.txt")?;
/// # Ok::<(), poremetrics::Error>(())
/// ```
pub struct PoreMetrics {
    options: ExtractOptions,
}

impl PoreMetrics {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
        }
    }

    /// Match keywords as whole words only.
    pub fn strict_keywords(mut self) -> Self {
        self.options = self.options.strict_keywords();
        self
    }

    /// Set the distance discount for anchors after the reference.
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.options.locator = self.options.locator.with_discount(discount);
        self
    }

    /// Set the locator window shape.
    pub fn with_window_shape(mut self, shape: WindowShape) -> Self {
        self.options.locator = self.options.locator.with_window_shape(shape);
        self
    }

    /// Stop at the best-ranked anchor even when it has no value nearby.
    pub fn without_fallthrough(mut self) -> Self {
        self.options.locator = self.options.locator.with_fallthrough(false);
        self
    }

    /// Set line-stream anchors.
    pub fn with_line_stream(mut self, config: LineStreamConfig) -> Self {
        self.options = self.options.with_line_stream(config);
        self
    }

    /// Set grid reconstruction options.
    pub fn with_grid(mut self, config: GridConfig) -> Self {
        self.options = self.options.with_grid(config);
        self
    }

    /// Let panics propagate instead of turning them into failed results.
    pub fn without_panic_capture(mut self) -> Self {
        self.options = self.options.with_catch_panics(false);
        self
    }

    /// Build the extractor.
    pub fn build(self) -> Extractor {
        Extractor::with_options(self.options)
    }

    /// Extract from raw text.
    pub fn extract_text(self, raw: &str) -> ExtractionResult {
        self.build().extract(&ReportInput::text(raw))
    }

    /// Extract from a report file.
    pub fn extract_file<P: AsRef<Path>>(self, path: P) -> Result<ExtractionResult> {
        let input = load_input(path)?;
        Ok(self.build().extract(&input))
    }
}

impl Default for PoreMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let builder = PoreMetrics::new()
            .strict_keywords()
            .with_discount(0.25)
            .without_fallthrough()
            .without_panic_capture();

        assert_eq!(builder.options.locator.match_mode, MatchMode::WholeWord);
        assert_eq!(builder.options.locator.post_reference_discount, 0.25);
        assert!(!builder.options.locator.anchor_fallthrough);
        assert!(!builder.options.catch_panics);
    }

    #[test]
    fn test_builder_default() {
        let builder = PoreMetrics::default();
        assert_eq!(builder.options.locator.window_shape, WindowShape::Centered);
        assert!(builder.options.catch_panics);
    }

    #[test]
    fn test_extract_text_empty() {
        let result = extract_text("");
        assert!(!result.success);
        assert_eq!(result.error_message(), Error::EmptyDocument.to_string());
    }

    #[test]
    fn test_extract_grid_empty() {
        let result = extract_grid(TableGrid::new(), None);
        assert!(!result.success);
        assert_eq!(result.backend, Backend::GridTable);
    }

    #[test]
    fn test_extract_file_missing() {
        assert!(matches!(
            extract_file("/nonexistent/report.txt"),
            Err(Error::Io(_))
        ));
    }
}
