//! Distribution reconstruction from a flattened line stream.
//!
//! Text extractors flatten the NLDFT detail table into a stream of lines:
//! sometimes one cell per line, sometimes one row per line, with stray
//! blank lines and page furniture in between. The reconstructor tokenizes
//! the region after the table heading and runs a small state machine over
//! the tokens:
//!
//! ```text
//! range ("1.0-2.0") -> average diameter -> differential volume -> integral volume -> [trailing]
//! ```
//!
//! A row that fails to parse is not fatal: the scan moves one token past
//! the range and looks for the next range token.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::model::{DistributionSample, DistributionSeries, NormalizedText};

use super::normalize::compact_lower;
use super::options::LineStreamConfig;

/// A well-formed decimal literal.
static FLOAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?$").unwrap());

/// A pore-diameter range, e.g. `1.02-1.10`.
static RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?[-–—]\d+(?:\.\d+)?$").unwrap());

/// `1.0 - 2.0` as split by the text extractor, at the start of a line.
static SPACED_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*\d+(?:\.\d+)?)(\s*)([-–—])(\s*)(\d+(?:\.\d+)?)(\s|$)").unwrap()
});

/// Rebuilds the distribution series from line-oriented text.
pub struct LineStreamReconstructor {
    config: LineStreamConfig,
}

impl LineStreamReconstructor {
    /// Create a reconstructor with the default anchors.
    pub fn new() -> Self {
        Self {
            config: LineStreamConfig::default(),
        }
    }

    /// Create a reconstructor with custom anchors.
    pub fn with_config(config: LineStreamConfig) -> Self {
        Self { config }
    }

    /// Check whether a line of the text carries a table heading.
    pub fn finds_heading(&self, text: &NormalizedText) -> bool {
        let lines: Vec<&str> = text.lines().collect();
        find_anchor(&lines, 0, &self.config.start_anchors).is_some()
    }

    /// Reconstruct the series. Returns an empty series when the table heading
    /// is missing or no row validates.
    pub fn reconstruct(&self, text: &NormalizedText) -> DistributionSeries {
        let lines: Vec<&str> = text.lines().collect();

        // Step 1: Bound the table region
        let Some(start) = find_anchor(&lines, 0, &self.config.start_anchors) else {
            log::debug!("LineStream: no table heading found");
            return DistributionSeries::new();
        };
        let end = find_anchor(&lines, start + 1, &self.config.end_anchors).unwrap_or(lines.len());
        log::debug!("LineStream: table region lines {}..{}", start + 1, end);

        // Step 2: Tokenize
        let tokens = tokenize(&lines[start + 1..end]);

        // Step 3: Walk rows
        let samples = read_rows(&tokens);
        log::debug!(
            "LineStream: {} samples from {} tokens",
            samples.len(),
            tokens.len()
        );

        DistributionSeries::from_samples(samples)
    }
}

impl Default for LineStreamReconstructor {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the first line at or after `from` that contains every part of any anchor.
fn find_anchor(lines: &[&str], from: usize, anchors: &[Vec<String>]) -> Option<usize> {
    let anchors: Vec<Vec<String>> = anchors
        .iter()
        .filter(|parts| !parts.is_empty())
        .map(|parts| parts.iter().map(|p| compact_lower(p)).collect())
        .collect();
    if anchors.is_empty() {
        return None;
    }

    lines.iter().enumerate().skip(from).find_map(|(i, line)| {
        let compact = compact_lower(line);
        anchors
            .iter()
            .any(|parts| parts.iter().all(|p| compact.contains(p.as_str())))
            .then_some(i)
    })
}

fn tokenize(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| {
            let joined = join_range(line);
            joined
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Join a range split around its dash into one token.
///
/// Only the first field of a line is a range, and only a dash spaced the
/// same on both sides separates one: `2.5 -0.002` is a diameter followed by
/// a negative volume.
fn join_range(line: &str) -> Cow<'_, str> {
    SPACED_RANGE.replace(line, |caps: &Captures| {
        if caps[2].is_empty() == caps[4].is_empty() {
            format!("{}{}{}{}", &caps[1], &caps[3], &caps[5], &caps[6])
        } else {
            caps[0].to_string()
        }
    })
}

fn is_range(token: &str) -> bool {
    RANGE.is_match(token)
}

fn parse_float(token: Option<&String>) -> Option<f64> {
    let token = token?;
    if !FLOAT.is_match(token) {
        return None;
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn read_rows(tokens: &[String]) -> Vec<DistributionSample> {
    let mut samples = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if !is_range(&tokens[i]) {
            i += 1;
            continue;
        }
        match read_row(tokens, i + 1) {
            Some((sample, next)) => {
                samples.push(sample);
                i = next;
            }
            None => {
                log::debug!("LineStream: malformed row at token {} ({})", i, tokens[i]);
                i += 1;
            }
        }
    }

    samples
}

/// Read the fields that follow a range token at `at`.
/// Returns the sample and the index of the next unread token.
fn read_row(tokens: &[String], at: usize) -> Option<(DistributionSample, usize)> {
    let average = parse_float(tokens.get(at))?;
    let _differential = parse_float(tokens.get(at + 1))?;
    let integral = parse_float(tokens.get(at + 2))?;
    if average <= 0.0 {
        return None;
    }

    let mut next = at + 3;
    // Optional trailing column, unless it is already the next row's range.
    if tokens.get(next).is_some_and(|t| !is_range(t)) {
        next += 1;
    }

    Some((DistributionSample::new(average, integral), next))
}
