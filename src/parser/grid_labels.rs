//! Scalar fields read from labeled cells of a table grid.

use crate::model::{GridTable, Provenance, ScalarField, ScalarFields, TableGrid};

use super::grid_table::extract_number;
use super::labels::{
    GRID_AVERAGE_PORE_DIAMETER, GRID_MOST_PROBABLE_DIAMETER, GRID_MULTI_POINT_BET,
    GRID_SECTION_PORE_SIZE, GRID_SECTION_PORE_VOLUME, GRID_SECTION_SURFACE,
    GRID_SINGLE_POINT_BET, GRID_TOTAL_PORE_VOLUME,
};
use super::normalize::normalize_cell;

/// Summary fields found in section tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SummaryField {
    SinglePointBet,
    MultiPointBet,
    TotalPoreVolume,
    AveragePoreDiameter,
}

impl SummaryField {
    fn labels(self) -> &'static [&'static str] {
        match self {
            SummaryField::SinglePointBet => GRID_SINGLE_POINT_BET,
            SummaryField::MultiPointBet => GRID_MULTI_POINT_BET,
            SummaryField::TotalPoreVolume => GRID_TOTAL_PORE_VOLUME,
            SummaryField::AveragePoreDiameter => GRID_AVERAGE_PORE_DIAMETER,
        }
    }

    fn slot(self, fields: &mut ScalarFields) -> &mut ScalarField {
        match self {
            SummaryField::SinglePointBet => &mut fields.surface_areas.single_point_bet,
            SummaryField::MultiPointBet => &mut fields.surface_areas.multi_point_bet,
            SummaryField::TotalPoreVolume => &mut fields.total_pore_volume,
            SummaryField::AveragePoreDiameter => &mut fields.average_pore_diameter,
        }
    }
}

/// Section keyword and the fields listed under it.
const SECTIONS: &[(&str, &[SummaryField])] = &[
    (
        GRID_SECTION_SURFACE,
        &[SummaryField::SinglePointBet, SummaryField::MultiPointBet],
    ),
    (GRID_SECTION_PORE_VOLUME, &[SummaryField::TotalPoreVolume]),
    (GRID_SECTION_PORE_SIZE, &[SummaryField::AveragePoreDiameter]),
];

/// Lowercased, trimmed lines of a cell.
fn label_variants(cell: &str) -> Vec<String> {
    let text = normalize_cell(cell);
    if text.is_empty() {
        return Vec::new();
    }
    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_lowercase)
        .collect();
    if lines.is_empty() {
        vec![text.to_lowercase()]
    } else {
        lines
    }
}

fn label_matches(cell: &str, labels: &[&str]) -> bool {
    label_variants(cell).iter().any(|variant| {
        labels
            .iter()
            .filter(|l| !l.is_empty())
            .any(|l| variant.contains(&l.to_lowercase()))
    })
}

/// 3 for an exact label, 2 for a cell ending with it, 1 for a cell containing it.
fn label_score(cell: &str, labels: &[&str]) -> u8 {
    let mut best = 0;
    for variant in label_variants(cell) {
        for label in labels.iter().filter(|l| !l.is_empty()) {
            let label = label.to_lowercase();
            if variant == label {
                return 3;
            }
            if variant.ends_with(&label) {
                best = best.max(2);
            } else if variant.contains(&label) {
                best = best.max(1);
            }
        }
    }
    best
}

fn grid_source(table: &GridTable) -> Provenance {
    Provenance::GridLabel {
        page_index: table.page_index,
        table_index: table.table_index,
    }
}

/// Read the summary fields (BET areas, total pore volume, average pore
/// diameter) from the section tables of a grid.
///
/// A section table mentions `surface area`, `pore volume` or `pore size`
/// in its first two rows. Rows are walked in order, tracking the current
/// section; a row with a cell containing a field label yields the last
/// numeric cell of that row. The first value found for a field wins.
pub fn read_summary_fields(grid: &TableGrid) -> ScalarFields {
    let mut fields = ScalarFields::default();
    let all = [
        SummaryField::SinglePointBet,
        SummaryField::MultiPointBet,
        SummaryField::TotalPoreVolume,
        SummaryField::AveragePoreDiameter,
    ];

    for table in grid.iter() {
        let heading = table.preview(2);
        if !SECTIONS.iter().any(|(keyword, _)| heading.contains(keyword)) {
            continue;
        }

        let mut current: Option<&[SummaryField]> = None;
        for row in &table.rows {
            let joined = row.join(" ").to_lowercase();
            if let Some((_, section_fields)) = SECTIONS.iter().find(|(keyword, _)| joined.contains(keyword)) {
                current = Some(*section_fields);
            }
            let Some(section_fields) = current else {
                continue;
            };

            for &field in section_fields {
                if !field.slot(&mut fields).is_empty() {
                    continue;
                }
                if !row.iter().any(|cell| label_matches(cell, field.labels())) {
                    continue;
                }
                if let Some(value) = row.iter().rev().find_map(|cell| extract_number(cell)) {
                    log::debug!("GridLabels: {:?} = {} (page {})", field, value, table.page_index);
                    *field.slot(&mut fields) = ScalarField::new(value, grid_source(table));
                }
            }
        }

        if all.iter().all(|f| !f.slot(&mut fields).is_empty()) {
            break;
        }
    }

    fields
}

/// Read the most-probable pore diameter from the grid.
///
/// Every labeled cell is a candidate; its value is the first numeric cell
/// to its right. Candidates rank by label score, then later page, then
/// earlier table on the page.
pub fn read_most_probable_diameter(grid: &TableGrid) -> ScalarField {
    let mut best: Option<((u8, usize, i64), ScalarField)> = None;

    for table in grid.iter() {
        for row in &table.rows {
            for (column, cell) in row.iter().enumerate() {
                let score = label_score(cell, GRID_MOST_PROBABLE_DIAMETER);
                if score == 0 {
                    continue;
                }
                let Some(value) = row[column + 1..].iter().find_map(|c| extract_number(c)) else {
                    continue;
                };
                let key = (score, table.page_index, -(table.table_index as i64));
                if best.as_ref().map_or(true, |(k, _)| key > *k) {
                    best = Some((key, ScalarField::new(value, grid_source(table))));
                }
            }
        }
    }

    best.map(|(_, field)| field).unwrap_or_default()
}

/// Read every scalar field the grid carries.
///
/// Surface areas other than single/multi-point BET are not tabulated in
/// summary tables and stay empty.
pub fn read_scalar_fields(grid: &TableGrid) -> ScalarFields {
    let mut fields = read_summary_fields(grid);
    fields.most_probable_diameter = read_most_probable_diameter(grid);
    fields
}
