//! Piecewise-linear interpolation over a distribution.
//!
//! Both directions share one walk: an exact (within tolerance) key match
//! returns its paired value, a target between two keys interpolates, and a
//! target outside the key range clamps to the nearest end sample. There is
//! no extrapolation.

use crate::model::{DistributionSample, DistributionSeries};

const REL_TOLERANCE: f64 = 1e-12;
const ABS_TOLERANCE: f64 = 1e-15;

fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= f64::max(REL_TOLERANCE * f64::max(a.abs(), b.abs()), ABS_TOLERANCE)
}

/// Interpolate over samples sorted ascending by `key`.
fn interpolate<K, V>(samples: &[DistributionSample], target: f64, key: K, value: V) -> f64
where
    K: Fn(&DistributionSample) -> f64,
    V: Fn(&DistributionSample) -> f64,
{
    let mut lower: Option<&DistributionSample> = None;

    for sample in samples {
        let k = key(sample);
        if is_close(k, target) {
            return value(sample);
        }
        if k < target {
            lower = Some(sample);
        } else if k > target {
            let Some(low) = lower else {
                return value(sample);
            };
            let dx = k - key(low);
            if dx == 0.0 {
                return value(low);
            }
            let slope = (value(sample) - value(low)) / dx;
            return value(low) + slope * (target - key(low));
        }
    }

    samples.last().map(|s| value(s)).unwrap_or(0.0)
}

/// Diameter at which the integral volume reaches `target_volume`.
///
/// Walks the series in canonical (volume-ascending) order. Returns 0 for an
/// empty series.
pub fn interpolate_diameter(series: &DistributionSeries, target_volume: f64) -> f64 {
    interpolate(
        series.samples(),
        target_volume,
        |s| s.pore_integral_volume,
        |s| s.average_pore_diameter,
    )
}

/// Integral volume at `target_diameter`.
///
/// Walks the series in diameter-ascending order. Returns 0 for an empty
/// series.
pub fn interpolate_volume(series: &DistributionSeries, target_diameter: f64) -> f64 {
    interpolate(
        &series.by_diameter(),
        target_diameter,
        |s| s.average_pore_diameter,
        |s| s.pore_integral_volume,
    )
}
