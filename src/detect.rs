//! Report family detection.

use std::path::Path;

use crate::error::Result;
use crate::extract::ReportInput;
use crate::model::NormalizedText;
use crate::parser::labels::{
    MOST_PROBABLE_DIAMETER, PORE_VOLUME_PERCENT_SECTION, REPORT_KEYWORDS, SURFACE_SECTION_START,
    TOTAL_PORE_VOLUME,
};
use crate::parser::{compact_lower, LineStreamReconstructor};

/// Report layout generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// States the total pore volume explicitly
    Legacy,
    /// States pore volumes only in the percentage section
    Revised,
    /// Neither form found
    Unknown,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Legacy => write!(f, "legacy"),
            ReportFormat::Revised => write!(f, "revised"),
            ReportFormat::Unknown => write!(f, "unknown"),
        }
    }
}

/// What a report text contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportProfile {
    /// Layout generation
    pub format: ReportFormat,
    /// Any report keyword present
    pub is_report: bool,
    /// Surface-area section heading present
    pub has_surface_section: bool,
    /// Distribution table heading present
    pub has_distribution_table: bool,
    /// Explicit total pore volume label present
    pub has_total_pore_volume: bool,
    /// Pore-volume percentage section present
    pub has_percentage_section: bool,
    /// Most-probable diameter label present
    pub has_most_probable_diameter: bool,
}

/// Check whether text mentions any keyword of the report family.
///
/// Case-insensitive, and tolerant of whitespace the extractor inserted
/// inside keywords.
///
/// # Example
/// ```
/// use poremetrics::detect::has_report_keywords;
///
/// assert!(has_report_keywords("Multi-point BET Surface Area"));
/// assert!(has_report_keywords("最 可几 孔径"));
/// assert!(!has_report_keywords("quarterly revenue"));
/// ```
pub fn has_report_keywords(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let lowered = text.to_lowercase();
    if REPORT_KEYWORDS.iter().any(|k| lowered.contains(&k.to_lowercase())) {
        return true;
    }
    let compact = compact_lower(text);
    REPORT_KEYWORDS
        .iter()
        .any(|k| compact.contains(&compact_lower(k)))
}

/// Profile a report text.
pub fn detect_report(text: &NormalizedText) -> ReportProfile {
    let has_distribution_table = LineStreamReconstructor::new().finds_heading(text);
    let text = text.as_str();
    let has_total_pore_volume = TOTAL_PORE_VOLUME.keywords.iter().any(|k| text.contains(k));
    let has_percentage_section = text.contains(PORE_VOLUME_PERCENT_SECTION);

    let format = if has_total_pore_volume {
        ReportFormat::Legacy
    } else if has_percentage_section {
        ReportFormat::Revised
    } else {
        ReportFormat::Unknown
    };

    ReportProfile {
        format,
        is_report: has_report_keywords(text),
        has_surface_section: text.contains(SURFACE_SECTION_START),
        has_distribution_table,
        has_total_pore_volume,
        has_percentage_section,
        has_most_probable_diameter: MOST_PROBABLE_DIAMETER.keywords.iter().any(|k| text.contains(k)),
    }
}

/// Profile any report input.
///
/// Grid input is profiled on its accompanying text, or on the table cells
/// when it has none.
pub fn detect_input(input: &ReportInput) -> ReportProfile {
    match input {
        ReportInput::Text(text) => detect_report(text),
        ReportInput::Grid {
            text: Some(text), ..
        } => detect_report(text),
        ReportInput::Grid { tables, text: None } => {
            let joined = tables
                .iter()
                .map(|t| t.plain_text())
                .collect::<Vec<_>>()
                .join("\n");
            detect_report(&NormalizedText::new(&joined))
        }
    }
}

/// Profile a report file (text, or a `.json` grid document).
///
/// # Example
/// ```no_run
/// use poremetrics::detect::detect_report_from_path;
///
/// let profile = detect_report_from_path("report.txt").unwrap();
/// println!("Format: {}", profile.format);
/// ```
pub fn detect_report_from_path<P: AsRef<Path>>(path: P) -> Result<ReportProfile> {
    let input = crate::load_input(path)?;
    Ok(detect_input(&input))
}
