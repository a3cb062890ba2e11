//! Text normalization.
//!
//! Extracted report text mixes full-width digits, compatibility ideographs,
//! non-breaking spaces and three flavours of line ending. Everything
//! downstream assumes the canonical form produced here.

use unicode_normalization::UnicodeNormalization;

/// Normalize raw extracted text.
///
/// Applies Unicode NFKC, collapses `\r\n` and `\r` to `\n`, and replaces
/// non-breaking (U+00A0) and ideographic (U+3000) spaces with ordinary
/// spaces. Total: empty input yields empty output.
pub fn normalize_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text: String = raw.nfkc().collect();
    unify_whitespace(&text)
}

/// Normalize a single table cell.
///
/// Same as [`normalize_text`], plus NUL removal and trimming. Pure-ASCII cells
/// skip the Unicode pass.
pub fn normalize_cell(cell: &str) -> String {
    if cell.is_empty() {
        return String::new();
    }

    let text = if cell.is_ascii() {
        cell.to_string()
    } else {
        cell.nfkc().collect()
    };
    unify_whitespace(&text.replace('\u{0000}', ""))
        .trim()
        .to_string()
}

fn unify_whitespace(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace(['\u{00A0}', '\u{3000}'], " ")
}

/// Remove all whitespace and lowercase, for label comparisons that must
/// survive spaces inserted by the text extractor.
pub fn compact_lower(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_cell(""), "");
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(normalize_text("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn test_special_spaces() {
        assert_eq!(normalize_text("a\u{00A0}b\u{3000}c"), "a b c");
    }

    #[test]
    fn test_full_width_compatibility() {
        // Full-width digits, parentheses and superscripts fold to ASCII.
        assert_eq!(normalize_text("１２３．４５（ｍ²/ｇ）"), "123.45(m2/g)");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_text("比表面积\r\n１．０\u{3000}(cm^3/g)");
        assert_eq!(normalize_text(&once), once);
    }

    #[test]
    fn test_normalize_cell() {
        assert_eq!(normalize_cell("  0.1234\u{0000} "), "0.1234");
        assert_eq!(normalize_cell("平均孔径\r\n(nm)"), "平均孔径\n(nm)");
    }

    #[test]
    fn test_compact_lower() {
        assert_eq!(compact_lower("NLDFT 详细 数据"), "nldft详细数据");
        assert_eq!(compact_lower(" Average Pore\nDiameter "), "averageporediameter");
    }
}
