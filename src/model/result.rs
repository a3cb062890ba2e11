//! Extraction result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DistributionSeries;

/// Which distribution-table backend produced a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Flattened text lines (one cell per line, or one row per line)
    #[default]
    LineStream,
    /// Geometric table grid
    GridTable,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::LineStream => write!(f, "line-stream"),
            Backend::GridTable => write!(f, "grid-table"),
        }
    }
}

/// Where a scalar value came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    /// Not found anywhere
    #[default]
    Unresolved,
    /// Positional mapping inside the surface-area section
    SurfaceSection,
    /// Nearest value to a keyword anchor
    Anchor {
        /// The keyword spelling that anchored the value
        keyword: String,
    },
    /// Maximum of the pore-volume percentage section
    PoreVolumeSection,
    /// Label cell in a grid table
    GridLabel {
        /// Page of the table
        page_index: usize,
        /// Table within the page
        table_index: usize,
    },
}

/// A literal numeric string as it appears in the report.
///
/// Kept unparsed so formatting and precision survive. Empty means the value
/// was not found, which is a valid outcome rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarField {
    /// The number, thousands separators removed
    pub value: String,

    /// What produced the value
    pub source: Provenance,
}

impl ScalarField {
    /// Create a resolved field.
    pub fn new(value: impl Into<String>, source: Provenance) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }

    /// An unresolved field.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the field is unresolved.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Parse the value as a float.
    pub fn parse(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// The value string.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Return `self` if resolved, otherwise the result of `f`.
    pub fn or_else(self, f: impl FnOnce() -> ScalarField) -> ScalarField {
        if self.is_empty() {
            f()
        } else {
            self
        }
    }
}

/// The seven surface-area metrics, in the order the report lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceAreaLabel {
    /// Single-point BET surface area
    SinglePointBet,
    /// Multi-point BET surface area
    MultiPointBet,
    /// Langmuir surface area
    Langmuir,
    /// t-plot micropore area
    TPlotMicropore,
    /// t-plot external surface area
    TPlotExternal,
    /// BJH adsorption cumulative surface area of pores
    BjhAdsorptionCumulative,
    /// BJH desorption cumulative surface area of pores
    BjhDesorptionCumulative,
}

impl SurfaceAreaLabel {
    /// All labels in report order.
    pub const ALL: [SurfaceAreaLabel; 7] = [
        SurfaceAreaLabel::SinglePointBet,
        SurfaceAreaLabel::MultiPointBet,
        SurfaceAreaLabel::Langmuir,
        SurfaceAreaLabel::TPlotMicropore,
        SurfaceAreaLabel::TPlotExternal,
        SurfaceAreaLabel::BjhAdsorptionCumulative,
        SurfaceAreaLabel::BjhDesorptionCumulative,
    ];

    /// The label as printed in the report.
    pub fn report_label(self) -> &'static str {
        match self {
            SurfaceAreaLabel::SinglePointBet => "单点BET比表面积",
            SurfaceAreaLabel::MultiPointBet => "多点BET比表面积",
            SurfaceAreaLabel::Langmuir => "Langmuir比表面积",
            SurfaceAreaLabel::TPlotMicropore => "T图法微孔面积",
            SurfaceAreaLabel::TPlotExternal => "T图法外表面积",
            SurfaceAreaLabel::BjhAdsorptionCumulative => "BJH吸附累积孔内表面积",
            SurfaceAreaLabel::BjhDesorptionCumulative => "BJH脱附累积孔内表面积",
        }
    }
}

/// Surface-area metrics (m²/g).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceAreas {
    /// Single-point BET
    pub single_point_bet: ScalarField,
    /// Multi-point BET
    pub multi_point_bet: ScalarField,
    /// Langmuir
    pub langmuir: ScalarField,
    /// t-plot micropore area
    pub t_plot_micropore: ScalarField,
    /// t-plot external surface area
    pub t_plot_external: ScalarField,
    /// BJH adsorption cumulative
    pub bjh_adsorption_cumulative: ScalarField,
    /// BJH desorption cumulative
    pub bjh_desorption_cumulative: ScalarField,
}

impl SurfaceAreas {
    /// Get a field by label.
    pub fn get(&self, label: SurfaceAreaLabel) -> &ScalarField {
        match label {
            SurfaceAreaLabel::SinglePointBet => &self.single_point_bet,
            SurfaceAreaLabel::MultiPointBet => &self.multi_point_bet,
            SurfaceAreaLabel::Langmuir => &self.langmuir,
            SurfaceAreaLabel::TPlotMicropore => &self.t_plot_micropore,
            SurfaceAreaLabel::TPlotExternal => &self.t_plot_external,
            SurfaceAreaLabel::BjhAdsorptionCumulative => &self.bjh_adsorption_cumulative,
            SurfaceAreaLabel::BjhDesorptionCumulative => &self.bjh_desorption_cumulative,
        }
    }

    /// Get a mutable field by label.
    pub fn get_mut(&mut self, label: SurfaceAreaLabel) -> &mut ScalarField {
        match label {
            SurfaceAreaLabel::SinglePointBet => &mut self.single_point_bet,
            SurfaceAreaLabel::MultiPointBet => &mut self.multi_point_bet,
            SurfaceAreaLabel::Langmuir => &mut self.langmuir,
            SurfaceAreaLabel::TPlotMicropore => &mut self.t_plot_micropore,
            SurfaceAreaLabel::TPlotExternal => &mut self.t_plot_external,
            SurfaceAreaLabel::BjhAdsorptionCumulative => &mut self.bjh_adsorption_cumulative,
            SurfaceAreaLabel::BjhDesorptionCumulative => &mut self.bjh_desorption_cumulative,
        }
    }

    /// Number of resolved fields.
    pub fn resolved_count(&self) -> usize {
        SurfaceAreaLabel::ALL
            .iter()
            .filter(|l| !self.get(**l).is_empty())
            .count()
    }
}

/// All scalar fields read from the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarFields {
    /// Surface-area family
    pub surface_areas: SurfaceAreas,

    /// Highest single-point adsorption total pore volume (cm³/g)
    pub total_pore_volume: ScalarField,

    /// Single-point total adsorption average pore diameter (nm)
    pub average_pore_diameter: ScalarField,

    /// Most-probable pore diameter (nm)
    pub most_probable_diameter: ScalarField,
}

/// Threshold metrics around the most-probable diameter.
///
/// All zero when the most-probable diameter is missing or unparseable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdMetrics {
    /// Most-probable diameter × 0.5
    pub d0_5: f64,
    /// Integral volume at `d0_5`
    pub volume_0_5d: f64,
    /// Share of pore volume below `d0_5` (%)
    pub pct_below_0_5d: f64,
    /// Most-probable diameter × 1.5
    pub d1_5: f64,
    /// Integral volume at `d1_5`
    pub volume_1_5d: f64,
    /// Share of pore volume above `d1_5` (%)
    pub pct_above_1_5d: f64,
}

/// Metrics derived from the distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Integral volume at which D10 is read (total × 0.1)
    pub d10_volume: f64,
    /// Diameter at 10% of total pore volume
    pub d10: f64,
    /// Integral volume at which D90 is read (total × 0.9)
    pub d90_volume: f64,
    /// Diameter at 90% of total pore volume
    pub d90: f64,
    /// D90 / D10, or 0 when D10 is 0
    pub d90_d10_ratio: f64,
    /// Pore volume A: maximum integral volume of the series
    pub pore_volume_a: f64,
    /// 0.5D / 1.5D threshold metrics
    pub thresholds: ThresholdMetrics,
}

/// Result of extracting one report.
///
/// Built once per document and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Whether all required data was found
    pub success: bool,

    /// Failure description, set only when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Backend that reconstructed the distribution
    pub backend: Backend,

    /// Scalar fields
    pub scalars: ScalarFields,

    /// Reconstructed distribution in canonical order
    pub distribution: DistributionSeries,

    /// Derived metrics
    pub metrics: DerivedMetrics,
}

impl ExtractionResult {
    /// A successful result.
    pub fn succeeded(
        backend: Backend,
        scalars: ScalarFields,
        distribution: DistributionSeries,
        metrics: DerivedMetrics,
    ) -> Self {
        Self {
            success: true,
            error: None,
            backend,
            scalars,
            distribution,
            metrics,
        }
    }

    /// A hard-failure result: no fields, no distribution, no metrics.
    pub fn failed(backend: Backend, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            backend,
            ..Self::default()
        }
    }

    /// The error message, or an empty string on success.
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }
}

/// Running count of analyses.
///
/// A plain value: callers pass it into
/// [`Extractor::extract_with_tally`](crate::Extractor::extract_with_tally) and
/// keep the returned copy. Nothing in the library holds one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisTally {
    /// Successful analyses
    pub total_analysis_count: u64,

    /// Analyses that ended in a hard failure
    pub failed_count: u64,

    /// Time of the last recorded analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl AnalysisTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the tally updated with one result.
    pub fn record(mut self, result: &ExtractionResult, at: DateTime<Utc>) -> Self {
        if result.success {
            self.total_analysis_count += 1;
        } else {
            self.failed_count += 1;
        }
        self.last_updated = Some(at);
        self
    }

    /// Total number of recorded analyses.
    pub fn attempts(&self) -> u64 {
        self.total_analysis_count + self.failed_count
    }
}
