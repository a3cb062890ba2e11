//! JSON rendering for extraction results.

use crate::error::{Error, Result};
use crate::model::ExtractionResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an extraction result to JSON.
pub fn to_json(result: &ExtractionResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result),
        JsonFormat::Compact => serde_json::to_string(result),
    };

    json.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Backend;

    #[test]
    fn test_to_json_pretty() {
        let result = ExtractionResult::failed(Backend::GridTable, "No NLDFT distribution data found");
        let json = to_json(&result, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"success\": false"));
        assert!(json.contains("\"grid_table\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let result = ExtractionResult::default();
        let json = to_json(&result, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        // No error key on a result without one
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_round_trip() {
        let result = ExtractionResult::failed(Backend::LineStream, "boom");
        let json = to_json(&result, JsonFormat::Compact).unwrap();
        let back: ExtractionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
