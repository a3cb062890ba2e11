//! Report extraction: one document in, one result out.

use std::panic::{self, AssertUnwindSafe};

use chrono::Utc;
use rayon::prelude::*;
use serde::Deserialize;

use crate::detect::has_report_keywords;
use crate::error::{Error, Result};
use crate::metrics::compute_metrics;
use crate::model::{
    AnalysisTally, Backend, DistributionSeries, ExtractionResult, GridTable, NormalizedText,
    ScalarField, ScalarFields, SurfaceAreaLabel, TableGrid,
};
use crate::parser::labels::{
    AVERAGE_PORE_DIAMETER, MOST_PROBABLE_DIAMETER, MULTI_POINT_BET, SINGLE_POINT_BET,
    TOTAL_PORE_VOLUME,
};
use crate::parser::{
    map_surface_areas, pore_volume_from_percentage_section, read_scalar_fields, AnchorLocator,
    ExtractOptions, GridReconstructor, LineStreamReconstructor,
};

/// An already-extracted report, in the shape its ingestion produced.
#[derive(Debug, Clone)]
pub enum ReportInput {
    /// Flattened text; the distribution is rebuilt from the line stream.
    Text(NormalizedText),
    /// Geometric tables; the distribution is rebuilt from grid columns.
    /// Accompanying text, when present, backs up scalar fields the
    /// tables do not carry.
    Grid {
        /// Tables of the report
        tables: TableGrid,
        /// Full report text, if the ingestion kept it
        text: Option<NormalizedText>,
    },
}

impl ReportInput {
    /// Normalize raw text into a text input.
    pub fn text(raw: &str) -> Self {
        ReportInput::Text(NormalizedText::new(raw))
    }

    /// A grid input without text.
    pub fn grid(tables: TableGrid) -> Self {
        ReportInput::Grid { tables, text: None }
    }

    /// A grid input with the report text.
    pub fn grid_with_text(tables: TableGrid, raw: &str) -> Self {
        ReportInput::Grid {
            tables,
            text: Some(NormalizedText::new(raw)),
        }
    }

    /// Parse a serialized grid document: `{ "tables": [...], "text": "..." }`.
    ///
    /// Each table carries `page_index`, `table_index` and `rows`; cells are
    /// normalized on load. `text` is optional.
    pub fn from_grid_json(json: &str) -> Result<Self> {
        let document: GridDocument = serde_json::from_str(json)?;
        let tables = document
            .tables
            .into_iter()
            .map(|t| GridTable::from_rows(t.page_index, t.table_index, t.rows))
            .collect();
        Ok(ReportInput::Grid {
            tables,
            text: document.text.as_deref().map(NormalizedText::new),
        })
    }

    /// Backend that reconstructs this input's distribution.
    pub fn backend(&self) -> Backend {
        match self {
            ReportInput::Text(_) => Backend::LineStream,
            ReportInput::Grid { .. } => Backend::GridTable,
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            ReportInput::Text(text) => text.is_blank(),
            ReportInput::Grid { tables, text } => {
                tables.iter().all(|t| t.is_empty()) && text.as_ref().map_or(true, |t| t.is_blank())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GridDocument {
    #[serde(default)]
    tables: Vec<GridTable>,
    #[serde(default)]
    text: Option<String>,
}

/// Extracts pore-structure metrics from reports.
///
/// Stateless apart from its options; one extractor may serve any number of
/// documents, concurrently.
///
/// # Example
///
/// ```
/// use poremetrics::{Extractor, ReportInput};
///
/// let report = "最高单点吸附总孔体积: 1.000 (cm^3/g)\n\
///               NLDFT详细数据\n\
///               1.0-2.0 1.0 0.01 0.1\n\
///               2.0-3.0 2.0 0.02 0.5\n\
///               3.0-4.0 3.0 0.03 0.9\n";
/// let result = Extractor::new().extract(&ReportInput::text(report));
/// assert!(result.success);
/// assert_eq!(result.metrics.d90_d10_ratio, 3.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract one report.
    ///
    /// Never fails: hard failures, and panics when panic capture is on,
    /// come back as a result with `success == false` and an error message.
    pub fn extract(&self, input: &ReportInput) -> ExtractionResult {
        let backend = input.backend();

        match self.guarded(|| self.try_extract(input)) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Extraction failed ({}): {}", backend, e);
                ExtractionResult::failed(backend, e.to_string())
            }
        }
    }

    /// Run `f`, turning a panic into `Error::Internal` when panic capture is on.
    fn guarded<F>(&self, f: F) -> Result<ExtractionResult>
    where
        F: FnOnce() -> Result<ExtractionResult>,
    {
        if !self.options.catch_panics {
            return f();
        }
        panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic during extraction".to_string());
            Err(Error::Internal(message))
        })
    }

    /// Extract one report, returning hard failures as errors.
    pub fn try_extract(&self, input: &ReportInput) -> Result<ExtractionResult> {
        if input.is_empty() {
            return Err(Error::EmptyDocument);
        }

        let (series, scalars) = match input {
            ReportInput::Text(text) => {
                if !has_report_keywords(text.as_str()) {
                    log::warn!("Text does not look like a pore-structure report");
                }
                let series = LineStreamReconstructor::with_config(self.options.line_stream.clone())
                    .reconstruct(text);
                ensure_distribution(&series)?;
                (series, self.read_text_scalars(text.as_str()))
            }
            ReportInput::Grid { tables, text } => {
                let series =
                    GridReconstructor::with_config(self.options.grid.clone()).reconstruct(tables)?;
                ensure_distribution(&series)?;
                let mut scalars = read_scalar_fields(tables);
                if let Some(text) = text {
                    fill_missing(&mut scalars, self.read_text_scalars(text.as_str()));
                }
                (series, scalars)
            }
        };
        log::debug!(
            "Extracted {} samples, {} surface areas",
            series.len(),
            scalars.surface_areas.resolved_count()
        );

        let total = &scalars.total_pore_volume;
        if total.is_empty() {
            return Err(Error::MissingTotalPoreVolume);
        }
        let total_pore_volume = total
            .parse()
            .ok_or_else(|| Error::InvalidTotalPoreVolume(total.value.clone()))?;

        let most_probable = scalars.most_probable_diameter.parse();
        if most_probable.is_none() {
            log::debug!("Most-probable diameter unavailable; threshold metrics left at 0");
        }

        let metrics = compute_metrics(&series, total_pore_volume, most_probable);
        Ok(ExtractionResult::succeeded(
            input.backend(),
            scalars,
            series,
            metrics,
        ))
    }

    /// Extract one report and fold the outcome into a tally.
    pub fn extract_with_tally(
        &self,
        input: &ReportInput,
        tally: AnalysisTally,
    ) -> (ExtractionResult, AnalysisTally) {
        let result = self.extract(input);
        let tally = tally.record(&result, Utc::now());
        (result, tally)
    }

    /// Extract independent reports in parallel. Results keep input order.
    pub fn extract_batch(&self, inputs: &[ReportInput]) -> Vec<ExtractionResult> {
        inputs.par_iter().map(|input| self.extract(input)).collect()
    }

    /// Scalar fields from running text.
    fn read_text_scalars(&self, text: &str) -> ScalarFields {
        let locator = AnchorLocator::new(self.options.locator.clone());

        let mut surface_areas = map_surface_areas(text);
        surface_areas.single_point_bet = std::mem::take(&mut surface_areas.single_point_bet)
            .or_else(|| locator.locate_field(text, &SINGLE_POINT_BET));
        surface_areas.multi_point_bet = std::mem::take(&mut surface_areas.multi_point_bet)
            .or_else(|| locator.locate_field(text, &MULTI_POINT_BET));

        let total_pore_volume = locator
            .locate_field(text, &TOTAL_PORE_VOLUME)
            .or_else(|| pore_volume_from_percentage_section(text));

        ScalarFields {
            surface_areas,
            total_pore_volume,
            average_pore_diameter: locator.locate_field(text, &AVERAGE_PORE_DIAMETER),
            most_probable_diameter: locator.locate_field(text, &MOST_PROBABLE_DIAMETER),
        }
    }
}

fn ensure_distribution(series: &DistributionSeries) -> Result<()> {
    if series.is_empty() {
        Err(Error::NoDistributionData)
    } else {
        Ok(())
    }
}

/// Fill fields of `primary` that are still empty from `fallback`.
fn fill_missing(primary: &mut ScalarFields, mut fallback: ScalarFields) {
    fn fill(slot: &mut ScalarField, backup: &mut ScalarField) {
        if slot.is_empty() && !backup.is_empty() {
            *slot = std::mem::take(backup);
        }
    }

    for label in SurfaceAreaLabel::ALL {
        fill(
            primary.surface_areas.get_mut(label),
            fallback.surface_areas.get_mut(label),
        );
    }
    fill(&mut primary.total_pore_volume, &mut fallback.total_pore_volume);
    fill(&mut primary.average_pore_diameter, &mut fallback.average_pore_diameter);
    fill(&mut primary.most_probable_diameter, &mut fallback.most_probable_diameter);
}
