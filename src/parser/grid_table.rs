//! Distribution reconstruction from geometric table grids.
//!
//! Unlike the line stream, a grid keeps columns apart, so the average
//! diameter and integral volume columns can be identified by their header
//! text. The price is strictness: a series that is not monotonic in
//! diameter means the wrong columns were matched, and the whole
//! reconstruction is rejected.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::{DistributionSample, DistributionSeries, GridTable, TableGrid};

use super::labels::ANY_NUMBER;
use super::normalize::{compact_lower, normalize_cell};
use super::options::GridConfig;

/// First number in a cell, thousands separators removed.
///
/// Returns `None` for cells without any digit.
pub fn extract_number(cell: &str) -> Option<String> {
    let text = normalize_cell(cell);
    if !text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let text = text.replace(',', "");
    ANY_NUMBER.find(&text).map(|m| m.as_str().to_string())
}

/// Check that `value` is a plain decimal with exactly `places` fractional digits.
fn has_decimal_places(value: &str, places: usize) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let Some((whole, fraction)) = unsigned.split_once('.') else {
        return false;
    };
    !whole.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.len() == places
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Target columns of one distribution table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    data_start: usize,
    average: usize,
    integral: usize,
}

/// Rebuilds the distribution series from a table grid.
pub struct GridReconstructor {
    config: GridConfig,
}

impl GridReconstructor {
    /// Create a reconstructor with default column keywords.
    pub fn new() -> Self {
        Self {
            config: GridConfig::default(),
        }
    }

    /// Create a reconstructor with custom configuration.
    pub fn with_config(config: GridConfig) -> Self {
        Self { config }
    }

    /// Reconstruct the series from every distribution table of the grid.
    ///
    /// Samples are concatenated in table order and must not decrease in
    /// diameter (within tolerance). Returns an empty series when no table
    /// qualifies.
    pub fn reconstruct(&self, grid: &TableGrid) -> Result<DistributionSeries> {
        let mut samples = Vec::new();

        for table in grid.iter() {
            if !self.is_candidate(table) {
                continue;
            }
            let Some(columns) = self.map_columns(table) else {
                log::warn!(
                    "GridTable: page {} table {} has no diameter/integral columns, skipped",
                    table.page_index,
                    table.table_index
                );
                continue;
            };
            let before = samples.len();
            self.read_rows(table, columns, &mut samples);
            log::debug!(
                "GridTable: page {} table {} -> {} samples (avg col {}, integral col {})",
                table.page_index,
                table.table_index,
                samples.len() - before,
                columns.average,
                columns.integral
            );
        }

        self.check_monotonic(&samples)?;
        Ok(DistributionSeries::from_samples(samples))
    }

    fn is_candidate(&self, table: &GridTable) -> bool {
        if table.is_empty() {
            return false;
        }
        let preview = table.preview(self.config.marker_rows);
        self.config
            .table_markers
            .iter()
            .any(|marker| preview.contains(&marker.to_lowercase()))
    }

    fn map_columns(&self, table: &GridTable) -> Option<ColumnMap> {
        let data_start = table.rows.iter().position(|row| is_data_row(row))?;
        let header_rows = if data_start == 0 {
            &table.rows[..1]
        } else {
            &table.rows[..data_start]
        };

        let mut headers: BTreeMap<usize, String> = BTreeMap::new();
        for column in 0..table.column_count() {
            let parts: Vec<String> = header_rows
                .iter()
                .filter_map(|row| row.get(column))
                .map(|cell| normalize_cell(cell))
                .filter(|cell| !cell.is_empty())
                .collect();
            headers.insert(column, parts.join(" "));
        }

        let average_keywords = compact_keywords(&self.config.average_keywords);
        let integral_keywords = compact_keywords(&self.config.integral_keywords);

        let mut average = None;
        let mut integral = None;
        for (&column, text) in headers.iter().filter(|(_, t)| !t.is_empty()) {
            let compact = compact_lower(text);
            if average.is_none() && average_keywords.iter().any(|k| compact.contains(k.as_str())) {
                average = Some(column);
            }
            if integral.is_none() && integral_keywords.iter().any(|k| compact.contains(k.as_str())) {
                integral = Some(column);
            }
        }

        Some(ColumnMap {
            data_start,
            average: average?,
            integral: integral?,
        })
    }

    fn read_rows(&self, table: &GridTable, columns: ColumnMap, samples: &mut Vec<DistributionSample>) {
        for row in &table.rows[columns.data_start..] {
            let (Some(average_cell), Some(integral_cell)) =
                (row.get(columns.average), row.get(columns.integral))
            else {
                continue;
            };
            let (Some(average), Some(integral)) =
                (extract_number(average_cell), extract_number(integral_cell))
            else {
                continue;
            };

            // Header remnants that happen to contain digits fail the fixed precision.
            if !has_decimal_places(&average, self.config.average_decimal_places) {
                continue;
            }
            let (Ok(average), Ok(integral)) = (average.parse::<f64>(), integral.parse::<f64>()) else {
                continue;
            };
            if average.abs() < 1e-12 || !integral.is_finite() {
                continue;
            }

            samples.push(DistributionSample::new(
                average,
                round_to(integral, self.config.integral_decimal_places),
            ));
        }
    }

    fn check_monotonic(&self, samples: &[DistributionSample]) -> Result<()> {
        for (i, pair) in samples.windows(2).enumerate() {
            let previous = pair[0].average_pore_diameter;
            let value = pair[1].average_pore_diameter;
            if value < previous - self.config.monotonic_tolerance {
                log::warn!("GridTable: diameter decreases at sample {}", i + 2);
                return Err(Error::NonMonotonicDiameter {
                    index: i + 2,
                    value,
                    previous,
                });
            }
        }
        Ok(())
    }
}

impl Default for GridReconstructor {
    fn default() -> Self {
        Self::new()
    }
}

fn compact_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| compact_lower(k))
        .filter(|k| !k.is_empty())
        .collect()
}

/// At least two numeric cells, the first of them in column 0.
fn is_data_row(row: &[String]) -> bool {
    let first_is_number = row.first().is_some_and(|c| extract_number(c).is_some());
    first_is_number && row.iter().filter(|c| extract_number(c).is_some()).count() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nldft_table(page: usize, index: usize, rows: &[[&str; 4]]) -> GridTable {
        let mut all: Vec<Vec<&str>> = vec![
            vec!["NLDFT 孔径分布", "", "", ""],
            vec!["相对压力", "平均孔直径 (nm)", "孔体积 (ml/g)", "孔积分体积 (ml/g)"],
        ];
        all.extend(rows.iter().map(|r| r.to_vec()));
        GridTable::from_rows(page, index, all)
    }

    #[test]
    fn test_extract_number() {
        assert_eq!(extract_number("  1,234.5 nm"), Some("1234.5".to_string()));
        assert_eq!(extract_number("≈ -0.25"), Some("-0.25".to_string()));
        assert_eq!(extract_number("n/a"), None);
        assert_eq!(extract_number(""), None);
    }

    #[test]
    fn test_has_decimal_places() {
        assert!(has_decimal_places("1.2345", 4));
        assert!(has_decimal_places("-12.0000", 4));
        assert!(!has_decimal_places("1.234", 4));
        assert!(!has_decimal_places("12345", 4));
        assert!(!has_decimal_places(".1234", 4));
    }

    #[test]
    fn test_reconstruct_single_table() {
        let table = nldft_table(
            0,
            0,
            &[
                ["0.01", "1.0000", "0.01", "0.1000001"],
                ["0.02", "2.0000", "0.02", "0.5"],
                ["0.03", "3.0000", "0.03", "0.9"],
            ],
        );
        let grid: TableGrid = [table].into_iter().collect();
        let series = GridReconstructor::new().reconstruct(&grid).unwrap();
        let pairs: Vec<(f64, f64)> = series
            .iter()
            .map(|s| (s.average_pore_diameter, s.pore_integral_volume))
            .collect();
        assert_eq!(pairs, vec![(1.0, 0.1), (2.0, 0.5), (3.0, 0.9)]);
    }

    #[test]
    fn test_tables_concatenate_across_pages() {
        let first = nldft_table(0, 0, &[["0.01", "1.0000", "0.01", "0.1"]]);
        let second = nldft_table(1, 0, &[["0.02", "2.0000", "0.02", "0.5"]]);
        let grid: TableGrid = [first, second].into_iter().collect();
        assert_eq!(GridReconstructor::new().reconstruct(&grid).unwrap().len(), 2);
    }

    #[test]
    fn test_non_monotonic_is_error() {
        let table = nldft_table(
            0,
            0,
            &[
                ["0.01", "1.0000", "0.01", "0.1"],
                ["0.02", "3.0000", "0.02", "0.5"],
                ["0.03", "2.0000", "0.03", "0.9"],
            ],
        );
        let grid: TableGrid = [table].into_iter().collect();
        match GridReconstructor::new().reconstruct(&grid) {
            Err(Error::NonMonotonicDiameter { index, value, previous }) => {
                assert_eq!(index, 3);
                assert_eq!(value, 2.0);
                assert_eq!(previous, 3.0);
            }
            other => panic!("expected monotonicity error, got {:?}", other),
        }
    }

    #[test]
    fn test_imprecise_average_rows_skipped() {
        let table = nldft_table(
            0,
            0,
            &[
                ["0.01", "1.0000", "0.01", "0.1"],
                ["0.02", "2.5", "0.02", "0.5"],
                ["0.03", "3.0000", "0.03", "0.9"],
            ],
        );
        let grid: TableGrid = [table].into_iter().collect();
        assert_eq!(GridReconstructor::new().reconstruct(&grid).unwrap().len(), 2);
    }

    #[test]
    fn test_non_candidate_and_unmapped_tables_skipped() {
        let unrelated = GridTable::from_rows(0, 0, [["Sample", "Mass"], ["1.0000", "0.5"]]);
        let no_integral = GridTable::from_rows(
            0,
            1,
            [
                vec!["NLDFT", "平均孔直径"],
                vec!["1", "1.0000"],
            ],
        );
        let grid: TableGrid = [unrelated, no_integral].into_iter().collect();
        assert!(GridReconstructor::new().reconstruct(&grid).unwrap().is_empty());
    }

    #[test]
    fn test_multi_row_header() {
        let table = GridTable::from_rows(
            0,
            0,
            [
                vec!["P/P0", "Average Pore", "Pore Integral"],
                vec!["", "Diameter (nm)", "Volume (cm3/g)"],
                vec!["0.01", "1.5000", "0.2"],
            ],
        );
        let grid: TableGrid = [table].into_iter().collect();
        let series = GridReconstructor::new().reconstruct(&grid).unwrap();
        assert_eq!(series.samples()[0], DistributionSample::new(1.5, 0.2));
    }

    #[test]
    fn test_custom_precision() {
        let table = nldft_table(0, 0, &[["0.01", "1.00", "0.01", "0.1"]]);
        let grid: TableGrid = [table].into_iter().collect();
        assert!(GridReconstructor::new().reconstruct(&grid).unwrap().is_empty());
        let relaxed = GridReconstructor::with_config(GridConfig::default().with_average_decimal_places(2));
        assert_eq!(relaxed.reconstruct(&grid).unwrap().len(), 1);
    }
}
