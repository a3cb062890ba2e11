//! Behavioural properties of interpolation, reconstruction and anchor lookup.

use poremetrics::metrics::{interpolate_diameter, interpolate_volume};
use poremetrics::parser::{locate, LineStreamReconstructor, Unit};
use poremetrics::{DistributionSample, DistributionSeries, NormalizedText};

fn series() -> DistributionSeries {
    DistributionSeries::from_samples(vec![
        DistributionSample::new(0.8, 0.0012),
        DistributionSample::new(1.25, 0.0345),
        DistributionSample::new(2.1, 0.1507),
        DistributionSample::new(3.7, 0.2981),
        DistributionSample::new(6.4, 0.3611),
        DistributionSample::new(12.9, 0.3902),
    ])
}

#[test]
fn test_interpolation_identity() {
    let series = series();
    for sample in &series {
        assert_eq!(
            interpolate_diameter(&series, sample.pore_integral_volume),
            sample.average_pore_diameter
        );
        assert_eq!(
            interpolate_volume(&series, sample.average_pore_diameter),
            sample.pore_integral_volume
        );
    }
}

#[test]
fn test_interpolation_clamps_at_both_ends() {
    let series = series();
    assert_eq!(interpolate_diameter(&series, 0.0012 - 1.0), 0.8);
    assert_eq!(interpolate_diameter(&series, 0.3902 + 1.0), 12.9);
    assert_eq!(interpolate_volume(&series, 0.0), 0.0012);
    assert_eq!(interpolate_volume(&series, 100.0), 0.3902);
}

#[test]
fn test_interpolation_between_samples() {
    let series = series();
    let midpoint = (0.1507 + 0.2981) / 2.0;
    let d = interpolate_diameter(&series, midpoint);
    assert!((d - (2.1 + 3.7) / 2.0).abs() < 1e-12);
    assert!(d > 2.1 && d < 3.7);
}

#[test]
fn test_empty_series_interpolates_to_zero() {
    let empty = DistributionSeries::new();
    assert_eq!(interpolate_diameter(&empty, 0.5), 0.0);
    assert_eq!(interpolate_volume(&empty, 0.5), 0.0);
}

#[test]
fn test_tolerant_reconstruction() {
    let text = NormalizedText::new(
        "NLDFT详细数据\n\
         1.0-2.0 1.5 0.01 0.1\n\
         2.0-3.0 n/a 0.02 0.5\n\
         3.0-4.0 3.5 0.03 0.9\n",
    );
    let series = LineStreamReconstructor::new().reconstruct(&text);

    let pairs: Vec<(f64, f64)> = series
        .iter()
        .map(|s| (s.average_pore_diameter, s.pore_integral_volume))
        .collect();
    assert_eq!(pairs, vec![(1.5, 0.1), (3.5, 0.9)]);
}

#[test]
fn test_directional_anchor_bias() {
    // Keyword at 80 and 130, reference at 100.
    let first = "K 1.0 (nm)";
    let text = format!(
        "{}{}{}R{}K 2.0 (nm){}",
        "x".repeat(80),
        first,
        "x".repeat(100 - 80 - first.len()),
        "x".repeat(130 - 101),
        "x".repeat(40)
    );
    assert_eq!(text.find('R'), Some(100));
    assert_eq!(text.rfind('K'), Some(130));

    // Post-reference distance 30 discounts to 15, beating the prior 20.
    let field = locate(&text, &["K"], Unit::Nanometres, 20, Some("R"));
    assert_eq!(field.as_str(), "2.0");

    // Without a reference the first occurrence wins.
    let field = locate(&text, &["K"], Unit::Nanometres, 20, None);
    assert_eq!(field.as_str(), "1.0");
}
