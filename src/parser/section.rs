//! Section segmentation.

/// Bound a labeled section of text.
///
/// Starts at the first occurrence of `start_label` and ends at the nearest
/// occurrence of any of `end_labels` found after the start label, or at the
/// end of the text. Returns an empty string when `start_label` is absent.
pub fn section<'a>(text: &'a str, start_label: &str, end_labels: &[&str]) -> &'a str {
    let Some(start) = text.find(start_label) else {
        return "";
    };

    let search_from = start + start_label.len();
    let end = end_labels
        .iter()
        .filter(|label| !label.is_empty())
        .filter_map(|label| text[search_from..].find(label).map(|p| search_from + p))
        .min()
        .unwrap_or(text.len());

    &text[start..end]
}
