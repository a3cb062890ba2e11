//! Anchor-proximity value lookup.
//!
//! Reports print each scalar as `label ... number (unit)`, but the text
//! extractor does not keep label and value adjacent, and the same label may
//! appear in several sections. The locator picks an anchor occurrence of the
//! label, optionally steered by a reference landmark, and returns the
//! `number(unit)` token closest to it.

use regex::Regex;

use crate::model::{CharIndex, Provenance, ScalarField};

use super::labels::{clean_number, FieldQuery, Unit};
use super::options::{LocatorConfig, MatchMode, WindowShape};

/// A keyword occurrence considered as anchor.
#[derive(Debug, Clone)]
struct Anchor<'k> {
    /// Character position in the text
    position: usize,
    keyword: &'k str,
    keyword_chars: usize,
    /// Distance to the reference, after the post-reference discount
    score: f64,
}

/// Finds numeric values near keyword anchors.
#[derive(Debug, Clone, Default)]
pub struct AnchorLocator {
    config: LocatorConfig,
}

impl AnchorLocator {
    /// Create a locator with the given configuration.
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    /// Look up a field described by a [`FieldQuery`].
    pub fn locate_field(&self, text: &str, query: &FieldQuery) -> ScalarField {
        self.locate(text, query.keywords, query.unit, query.window, query.reference)
    }

    /// Find the `number(unit)` value nearest to an anchor occurrence of any of `keywords`.
    ///
    /// Without a reference the first occurrence anchors the search (longer
    /// spellings first when several keywords are given). With a reference,
    /// the occurrence closest to any reference occurrence wins; occurrences
    /// after the reference have their distance multiplied by the configured
    /// discount. Returns an empty field when nothing is found.
    pub fn locate(
        &self,
        text: &str,
        keywords: &[&str],
        unit: Unit,
        window: usize,
        reference: Option<&str>,
    ) -> ScalarField {
        if text.is_empty() {
            return ScalarField::empty();
        }

        let index = CharIndex::new(text);
        let mut anchors = self.find_anchors(text, &index, keywords);
        if anchors.is_empty() {
            log::debug!("locator: no occurrence of {:?}", keywords);
            return ScalarField::empty();
        }

        let references: Vec<usize> = reference
            .filter(|r| !r.is_empty())
            .map(|r| {
                text.match_indices(r)
                    .map(|(b, _)| index.byte_to_char(b))
                    .collect()
            })
            .unwrap_or_default();

        if !references.is_empty() {
            for anchor in &mut anchors {
                anchor.score = references
                    .iter()
                    .map(|&r| self.discounted_distance(anchor.position, r))
                    .fold(f64::INFINITY, f64::min);
            }
        }

        // Stable ranking: closest to the reference, then longer spelling, then earlier.
        anchors.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then(b.keyword_chars.cmp(&a.keyword_chars))
                .then(a.position.cmp(&b.position))
        });

        for anchor in &anchors {
            if let Some(value) = self.nearest_value(text, &index, anchor.position, unit, window) {
                log::debug!(
                    "locator: '{}' at char {} -> {}",
                    anchor.keyword,
                    anchor.position,
                    value
                );
                return ScalarField::new(
                    value,
                    Provenance::Anchor {
                        keyword: anchor.keyword.to_string(),
                    },
                );
            }
            if !self.config.anchor_fallthrough {
                break;
            }
        }

        ScalarField::empty()
    }

    fn discounted_distance(&self, position: usize, reference: usize) -> f64 {
        let distance = position.abs_diff(reference) as f64;
        if position > reference {
            distance * self.config.post_reference_discount
        } else {
            distance
        }
    }

    fn find_anchors<'k>(&self, text: &str, index: &CharIndex, keywords: &[&'k str]) -> Vec<Anchor<'k>> {
        let mut anchors = Vec::new();
        for &keyword in keywords.iter().filter(|k| !k.is_empty()) {
            let keyword_chars = keyword.chars().count();
            let mut push = |byte: usize| {
                anchors.push(Anchor {
                    position: index.byte_to_char(byte),
                    keyword,
                    keyword_chars,
                    score: 0.0,
                })
            };
            match self.config.match_mode {
                MatchMode::Substring => {
                    for (byte, _) in text.match_indices(keyword) {
                        push(byte);
                    }
                }
                MatchMode::WholeWord => {
                    let pattern = format!(r"\b{}\b", regex::escape(keyword));
                    match Regex::new(&pattern) {
                        Ok(re) => {
                            for m in re.find_iter(text) {
                                push(m.start());
                            }
                        }
                        Err(e) => log::warn!("locator: bad keyword pattern {:?}: {}", keyword, e),
                    }
                }
            }
        }
        anchors
    }

    /// Closest `number(unit)` match to `anchor` within the window, by match center.
    fn nearest_value(
        &self,
        text: &str,
        index: &CharIndex,
        anchor: usize,
        unit: Unit,
        window: usize,
    ) -> Option<String> {
        let half = window / 2;
        let start = anchor.saturating_sub(half);
        let end = match self.config.window_shape {
            WindowShape::Centered => anchor + half,
            WindowShape::Trailing => anchor + window,
        }
        .min(index.char_len());

        let start_byte = index.char_to_byte(start);
        let segment = &text[start_byte..index.char_to_byte(end)];

        let mut best: Option<(f64, String)> = None;
        for caps in unit.value_pattern().captures_iter(segment) {
            let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let first = index.byte_to_char(start_byte + whole.start());
            let last = index.byte_to_char(start_byte + whole.end());
            let center = (first + last) as f64 / 2.0;
            let distance = (center - anchor as f64).abs();
            if best.as_ref().map_or(true, |(d, _)| distance < *d) {
                best = Some((distance, clean_number(number.as_str())));
            }
        }
        best.map(|(_, value)| value)
    }
}

/// Look up a value with the default locator configuration.
pub fn locate(
    text: &str,
    keywords: &[&str],
    unit: Unit,
    window: usize,
    reference: Option<&str>,
) -> ScalarField {
    AnchorLocator::default().locate(text, keywords, unit, window, reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad(n: usize) -> String {
        "x".repeat(n)
    }

    #[test]
    fn test_first_occurrence_without_reference() {
        let text = "最可几孔径: 5.23 (nm)\n其他\n最可几孔径: 7.89 (nm)";
        let field = locate(text, &["最可几孔径"], Unit::Nanometres, 40, None);
        assert_eq!(field.as_str(), "5.23");
        assert_eq!(
            field.source,
            Provenance::Anchor {
                keyword: "最可几孔径".to_string()
            }
        );
    }

    #[test]
    fn test_directional_bias() {
        // K at 80, R at 100, K at 130: post-reference distance 30 discounts to 15 < 20.
        let text = format!(
            "{}K 1.0 (nm){}R{}K 2.0 (nm){}",
            pad(80),
            pad(100 - 80 - "K 1.0 (nm)".len()),
            pad(130 - 101),
            pad(40)
        );
        assert_eq!(text.find("R"), Some(100));
        assert_eq!(text.rfind("K"), Some(130));

        let field = locate(&text, &["K"], Unit::Nanometres, 20, Some("R"));
        assert_eq!(field.as_str(), "2.0");
    }

    #[test]
    fn test_without_discount_nearer_prior_anchor_wins() {
        let text = format!(
            "{}K 1.0 (nm){}R{}K 2.0 (nm){}",
            pad(80),
            pad(100 - 80 - "K 1.0 (nm)".len()),
            pad(130 - 101),
            pad(40)
        );
        let locator = AnchorLocator::new(LocatorConfig::default().with_discount(1.0));
        let field = locator.locate(&text, &["K"], Unit::Nanometres, 20, Some("R"));
        assert_eq!(field.as_str(), "1.0");
    }

    #[test]
    fn test_reference_selects_value_near_detail_table() {
        let text = "孔径分析报告\n最可几孔径: 5.23 (nm)\n\nNLDFT详细数据\n1.0-2.0\n\n最可几孔径: 3.45 (nm)\n\n其他数据\n最可几孔径: 7.89 (nm)\n";
        let field = locate(text, &["最可几孔径"], Unit::Nanometres, 40, Some("NLDFT详细数据"));
        assert_eq!(field.as_str(), "3.45");
    }

    #[test]
    fn test_missing_keyword_is_empty() {
        let field = locate("多点BET比表面积: 1 (m^2/g)", &["单点BET比表面积"], Unit::SquareMetresPerGram, 100, None);
        assert!(field.is_empty());
        assert_eq!(field.source, Provenance::Unresolved);
    }

    #[test]
    fn test_missing_number_is_empty() {
        let field = locate("总孔体积: n/a", &["总孔体积"], Unit::CubicCentimetresPerGram, 100, None);
        assert!(field.is_empty());
    }

    #[test]
    fn test_closest_match_in_window() {
        let text = "9.9 (nm) ........ 平均孔直径 1.5 (nm) .. 8.8 (nm)";
        let field = locate(text, &["平均孔直径"], Unit::Nanometres, 200, None);
        assert_eq!(field.as_str(), "1.5");
    }

    #[test]
    fn test_window_limits_search() {
        let text = format!("总孔体积{}0.5 (cm^3/g)", pad(50));
        assert!(locate(&text, &["总孔体积"], Unit::CubicCentimetresPerGram, 40, None).is_empty());
        assert_eq!(
            locate(&text, &["总孔体积"], Unit::CubicCentimetresPerGram, 200, None).as_str(),
            "0.5"
        );
    }

    #[test]
    fn test_trailing_window_reaches_further() {
        let text = format!("总孔体积{}0.5 (cm^3/g)", pad(30));
        let centered = AnchorLocator::default();
        let trailing =
            AnchorLocator::new(LocatorConfig::default().with_window_shape(WindowShape::Trailing));
        assert!(centered.locate(&text, &["总孔体积"], Unit::CubicCentimetresPerGram, 60, None).is_empty());
        assert_eq!(
            trailing.locate(&text, &["总孔体积"], Unit::CubicCentimetresPerGram, 60, None).as_str(),
            "0.5"
        );
    }

    #[test]
    fn test_fallthrough_to_next_anchor() {
        let text = format!("总孔体积 n/a{}最高单点吸附总孔体积 0.8 (cm^3/g)", pad(100));
        let field = locate(&text, &["最高单点吸附总孔体积", "总孔体积"], Unit::CubicCentimetresPerGram, 60, None);
        assert_eq!(field.as_str(), "0.8");

        // "总孔体积" first occurs inside a window without a value.
        let text = format!("总孔体积 n/a{}总孔体积 0.8 (cm^3/g)", pad(100));
        let no_fallthrough = AnchorLocator::new(LocatorConfig::default().with_fallthrough(false));
        assert!(no_fallthrough
            .locate(&text, &["总孔体积"], Unit::CubicCentimetresPerGram, 60, None)
            .is_empty());
        assert_eq!(
            locate(&text, &["总孔体积"], Unit::CubicCentimetresPerGram, 60, None).as_str(),
            "0.8"
        );
    }

    #[test]
    fn test_whole_word_mode() {
        let config = LocatorConfig {
            match_mode: MatchMode::WholeWord,
            ..LocatorConfig::default()
        };
        let locator = AnchorLocator::new(config);
        let text = format!("poresize 4.0 (nm){} pore 2.0 (nm)", pad(30));
        assert_eq!(locator.locate(&text, &["pore"], Unit::Nanometres, 40, None).as_str(), "2.0");
        assert_eq!(locate(&text, &["pore"], Unit::Nanometres, 40, None).as_str(), "4.0");
    }

    #[test]
    fn test_windows_count_characters() {
        // 10 CJK chars between keyword and value: 30 bytes but only 10 characters.
        let text = format!("总孔体积{}0.5 (cm^3/g)", "孔".repeat(10));
        assert_eq!(
            locate(&text, &["总孔体积"], Unit::CubicCentimetresPerGram, 60, None).as_str(),
            "0.5"
        );
    }
}
