//! Derived metrics over a reconstructed distribution.

mod interpolate;

pub use interpolate::{interpolate_diameter, interpolate_volume};

use crate::model::{DerivedMetrics, DistributionSeries, ThresholdMetrics};

/// Pore volume A at or below this is treated as zero.
const MIN_PORE_VOLUME: f64 = 1e-12;

/// Compute the derived metrics.
///
/// * `total_pore_volume` scales the D10/D90 targets (10% and 90% of it).
/// * `most_probable_diameter` anchors the 0.5D/1.5D thresholds; when it is
///   `None` every threshold metric is 0.
pub fn compute_metrics(
    series: &DistributionSeries,
    total_pore_volume: f64,
    most_probable_diameter: Option<f64>,
) -> DerivedMetrics {
    let d10_volume = total_pore_volume * 0.1;
    let d90_volume = total_pore_volume * 0.9;
    let d10 = interpolate_diameter(series, d10_volume);
    let d90 = interpolate_diameter(series, d90_volume);
    let d90_d10_ratio = if d10 != 0.0 { d90 / d10 } else { 0.0 };
    let pore_volume_a = series.max_integral_volume();

    let thresholds = most_probable_diameter
        .map(|m| thresholds(series, m, pore_volume_a))
        .unwrap_or_default();

    DerivedMetrics {
        d10_volume,
        d10,
        d90_volume,
        d90,
        d90_d10_ratio,
        pore_volume_a,
        thresholds,
    }
}

fn thresholds(series: &DistributionSeries, most_probable: f64, pore_volume_a: f64) -> ThresholdMetrics {
    let d0_5 = most_probable * 0.5;
    let d1_5 = most_probable * 1.5;
    let volume_0_5d = interpolate_volume(series, d0_5);
    let volume_1_5d = interpolate_volume(series, d1_5);

    let (pct_below_0_5d, pct_above_1_5d) = if pore_volume_a > MIN_PORE_VOLUME {
        (
            volume_0_5d / pore_volume_a * 100.0,
            (pore_volume_a - volume_1_5d) / pore_volume_a * 100.0,
        )
    } else {
        log::warn!("pore volume A is zero; threshold percentages not computed");
        (0.0, 0.0)
    };

    ThresholdMetrics {
        d0_5,
        volume_0_5d,
        pct_below_0_5d,
        d1_5,
        volume_1_5d,
        pct_above_1_5d,
    }
}
