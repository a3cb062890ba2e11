//! Positional surface-area mapping and the pore-volume percentage fallback.

use crate::model::{CharIndex, Provenance, ScalarField, SurfaceAreaLabel, SurfaceAreas};

use super::labels::{
    clean_number, Unit, BARE_ML_PER_G, PORE_VOLUME_PERCENT_SECTION, PORE_VOLUME_PERCENT_WINDOW,
    SURFACE_SECTION_ENDS, SURFACE_SECTION_START,
};
use super::section::section;

/// Map the surface-area section to the seven surface-area labels.
///
/// The report prints the surface-area values in a fixed order without
/// restating each label next to its number, so the i-th `<number>(m²/g)`
/// of the section belongs to the i-th label. Labels past the last number
/// stay empty.
pub fn map_surface_areas(text: &str) -> SurfaceAreas {
    let mut areas = SurfaceAreas::default();
    let body = section(text, SURFACE_SECTION_START, SURFACE_SECTION_ENDS);
    if body.is_empty() {
        log::debug!("surface section not found");
        return areas;
    }

    let values = Unit::SquareMetresPerGram
        .value_pattern()
        .captures_iter(body)
        .filter_map(|caps| caps.get(1).map(|m| clean_number(m.as_str())));

    for (label, value) in SurfaceAreaLabel::ALL.iter().zip(values) {
        *areas.get_mut(*label) = ScalarField::new(value, Provenance::SurfaceSection);
    }

    log::debug!(
        "surface section: {} of {} labels mapped",
        areas.resolved_count(),
        SurfaceAreaLabel::ALL.len()
    );
    areas
}

/// Total pore volume from the pore-volume percentage section.
///
/// Revised report layouts omit the explicit total and instead list volumes
/// next to their percentages. The total is the largest volume stated in the
/// window after the section heading: parenthesised `(cm³/g)`/`(ml/g)`
/// values first, bare `ml/g` values otherwise.
pub fn pore_volume_from_percentage_section(text: &str) -> ScalarField {
    let Some(start) = text.find(PORE_VOLUME_PERCENT_SECTION) else {
        return ScalarField::empty();
    };

    let rest = &text[start..];
    let index = CharIndex::new(rest);
    let window = &rest[..index.char_to_byte(PORE_VOLUME_PERCENT_WINDOW)];

    let max_of = |values: Vec<f64>| values.into_iter().reduce(f64::max);

    let parenthesised: Vec<f64> = Unit::CubicCentimetresPerGram
        .value_pattern()
        .captures_iter(window)
        .filter_map(|caps| caps.get(1)?.as_str().replace(',', "").parse().ok())
        .collect();

    let best = max_of(parenthesised).or_else(|| {
        let bare = BARE_ML_PER_G
            .captures_iter(window)
            .filter_map(|caps| caps.get(1)?.as_str().replace(',', "").parse().ok())
            .collect();
        max_of(bare)
    });

    match best {
        Some(value) if value.is_finite() => {
            log::debug!("total pore volume from percentage section: {:.5}", value);
            ScalarField::new(format!("{:.5}", value), Provenance::PoreVolumeSection)
        }
        _ => ScalarField::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_mapping() {
        let text = "header\n比表面积分析报告\n\
                    单点BET比表面积\n多点BET比表面积\nLangmuir比表面积\n\
                    12.5 (m^2/g)\n13.1 (m^2/g)\n20.4 (m^2/g)\n1.2 (m^2/g)\n11.9 (m^2/g)\n\
                    孔体积分析报告\n99.9 (m^2/g)";
        let areas = map_surface_areas(text);
        assert_eq!(areas.single_point_bet.as_str(), "12.5");
        assert_eq!(areas.multi_point_bet.as_str(), "13.1");
        assert_eq!(areas.langmuir.as_str(), "20.4");
        assert_eq!(areas.t_plot_micropore.as_str(), "1.2");
        assert_eq!(areas.t_plot_external.as_str(), "11.9");
        // The value after the end heading belongs to another section.
        assert!(areas.bjh_adsorption_cumulative.is_empty());
        assert!(areas.bjh_desorption_cumulative.is_empty());
        assert_eq!(areas.resolved_count(), 5);
        assert_eq!(areas.single_point_bet.source, Provenance::SurfaceSection);
    }

    #[test]
    fn test_extra_values_ignored() {
        let values: String = (1..=9).map(|i| format!("{i}.0 (m^2/g)\n")).collect();
        let text = format!("比表面积分析报告\n{values}");
        let areas = map_surface_areas(&text);
        assert_eq!(areas.resolved_count(), 7);
        assert_eq!(areas.bjh_desorption_cumulative.as_str(), "7.0");
    }

    #[test]
    fn test_missing_section() {
        let areas = map_surface_areas("单点BET比表面积: 12.5 (m^2/g)");
        assert_eq!(areas, SurfaceAreas::default());
    }

    #[test]
    fn test_percentage_section_parenthesised() {
        let text = "孔体积百分比\n微孔 0.120 (cm^3/g) 12%\n介孔 0.4 (ml/g) 40%\n总 0.98 (cm^3/g) 100%";
        let field = pore_volume_from_percentage_section(text);
        assert_eq!(field.as_str(), "0.98000");
        assert_eq!(field.source, Provenance::PoreVolumeSection);
    }

    #[test]
    fn test_percentage_section_bare_ml() {
        let text = "孔体积百分比\n微孔 0.12 ml/g\n总计 0.5 ml/g";
        assert_eq!(pore_volume_from_percentage_section(text).as_str(), "0.50000");
    }

    #[test]
    fn test_percentage_section_window() {
        let text = format!("孔体积百分比{}1.5 (ml/g)", "孔".repeat(700));
        assert!(pore_volume_from_percentage_section(&text).is_empty());
        assert!(pore_volume_from_percentage_section("no section").is_empty());
    }
}
