//! Normalized report text.

use std::ops::Range;

use crate::parser::normalize_text;

/// Canonicalized report text with an indexable line view.
///
/// Produced once per document by [`NormalizedText::new`] and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
    lines: Vec<Range<usize>>,
}

impl NormalizedText {
    /// Normalize raw extracted text.
    pub fn new(raw: &str) -> Self {
        Self::from_normalized(normalize_text(raw))
    }

    /// Wrap text that has already been normalized.
    fn from_normalized(text: String) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;
        for (idx, ch) in text.char_indices() {
            if ch == '\n' {
                lines.push(start..idx);
                start = idx + 1;
            }
        }
        if start < text.len() {
            lines.push(start..text.len());
        }
        Self { text, lines }
    }

    /// The full normalized text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line by index (without its terminator).
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|r| &self.text[r.clone()])
    }

    /// Iterate over all lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(move |r| &self.text[r.clone()])
    }

    /// Check if the text has no visible content.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Maps between byte offsets and character offsets of a string.
///
/// Windows and distances in the locator are measured in characters so that
/// CJK labels weigh the same as ASCII ones.
#[derive(Debug, Clone)]
pub struct CharIndex {
    /// Byte offset of every char, followed by the total byte length.
    offsets: Vec<usize>,
}

impl CharIndex {
    /// Build the index for a string.
    pub fn new(text: &str) -> Self {
        let mut offsets: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        offsets.push(text.len());
        Self { offsets }
    }

    /// Number of characters.
    pub fn char_len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Character offset of a byte offset (rounded down to a char boundary).
    pub fn byte_to_char(&self, byte: usize) -> usize {
        match self.offsets.binary_search(&byte) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    /// Byte offset of a character offset (clamped to the end).
    pub fn char_to_byte(&self, ch: usize) -> usize {
        self.offsets[ch.min(self.char_len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_view() {
        let text = NormalizedText::new("a\r\nb\rc\n\nd");
        assert_eq!(text.as_str(), "a\nb\nc\n\nd");
        assert_eq!(text.line_count(), 5);
        assert_eq!(text.line(3), Some(""));
        assert_eq!(text.line(4), Some("d"));
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["a", "b", "c", "", "d"]);
    }

    #[test]
    fn test_empty_text() {
        let text = NormalizedText::new("");
        assert!(text.is_blank());
        assert_eq!(text.line_count(), 0);
        assert_eq!(text.line(0), None);
    }

    #[test]
    fn test_char_index_cjk() {
        let s = "孔径a";
        let index = CharIndex::new(s);
        assert_eq!(index.char_len(), 3);
        assert_eq!(index.byte_to_char(3), 1);
        assert_eq!(index.byte_to_char(6), 2);
        assert_eq!(index.char_to_byte(2), 6);
        assert_eq!(index.char_to_byte(10), s.len());
    }
}
