//! Pore-size distribution samples.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One row of the NLDFT distribution table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionSample {
    /// Average pore diameter (nm)
    pub average_pore_diameter: f64,

    /// Cumulative pore volume up to this diameter (cm³/g STP)
    pub pore_integral_volume: f64,
}

impl DistributionSample {
    /// Create a new sample.
    pub fn new(average_pore_diameter: f64, pore_integral_volume: f64) -> Self {
        Self {
            average_pore_diameter,
            pore_integral_volume,
        }
    }
}

/// A reconstructed distribution, kept in canonical order.
///
/// The canonical order is ascending by `(pore_integral_volume,
/// average_pore_diameter)`, which is what volume-to-diameter interpolation
/// walks. [`DistributionSeries::by_diameter`] gives the diameter-ordered view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistributionSeries {
    samples: Vec<DistributionSample>,
}

impl DistributionSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from samples in any order, sorting them canonically.
    pub fn from_samples(mut samples: Vec<DistributionSample>) -> Self {
        samples.sort_by(by_volume_then_diameter);
        Self { samples }
    }

    /// Samples in canonical (volume-ascending) order.
    pub fn samples(&self) -> &[DistributionSample] {
        &self.samples
    }

    /// Samples sorted ascending by `(average_pore_diameter, pore_integral_volume)`.
    pub fn by_diameter(&self) -> Vec<DistributionSample> {
        let mut sorted = self.samples.clone();
        sorted.sort_by(|a, b| {
            a.average_pore_diameter
                .total_cmp(&b.average_pore_diameter)
                .then(a.pore_integral_volume.total_cmp(&b.pore_integral_volume))
        });
        sorted
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest integral volume, or 0 for an empty series.
    pub fn max_integral_volume(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.pore_integral_volume)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
            .unwrap_or(0.0)
    }

    /// Iterate over the samples in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, DistributionSample> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a DistributionSeries {
    type Item = &'a DistributionSample;
    type IntoIter = std::slice::Iter<'a, DistributionSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

fn by_volume_then_diameter(a: &DistributionSample, b: &DistributionSample) -> Ordering {
    a.pore_integral_volume
        .total_cmp(&b.pore_integral_volume)
        .then(a.average_pore_diameter.total_cmp(&b.average_pore_diameter))
}
