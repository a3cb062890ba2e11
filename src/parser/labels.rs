//! Labels, units and search windows of the pore-structure report family.

use once_cell::sync::Lazy;
use regex::Regex;

/// A decimal literal with optional sign, thousands separators and exponent.
pub(crate) const NUMBER: &str = r"[+-]?[0-9][0-9,]*\.?[0-9]*(?:[eE][+-]?[0-9]+)?";

/// `m^2/g` in its many extracted spellings: `m^2/g`, `m 2/g`, `m²/g`, `m2̂/g`, `m 2 / g`.
const UNIT_M2G: &str = r"m\s*(?:\^?\s*2|²|2[\x{0300}-\x{036F}]*)\s*/\s*g";

/// `cm^3/g` (any spelling) or `ml/g`.
const UNIT_CM3G: &str = r"(?:(?:cm\s*(?:\^?\s*3|³|3[\x{0300}-\x{036F}]*))|(?:m\s*l))\s*/\s*g";

const UNIT_NM: &str = r"nm";

static VALUE_M2G: Lazy<Regex> = Lazy::new(|| value_with_unit(UNIT_M2G));
static VALUE_CM3G: Lazy<Regex> = Lazy::new(|| value_with_unit(UNIT_CM3G));
static VALUE_NM: Lazy<Regex> = Lazy::new(|| value_with_unit(UNIT_NM));

/// `<number> ml/g` without parentheses, seen in revised report layouts.
pub(crate) static BARE_ML_PER_G: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)({NUMBER})\s*ml\s*/\s*g")).unwrap());

/// First number anywhere in a cell.
pub(crate) static ANY_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(NUMBER).unwrap());

fn value_with_unit(unit: &str) -> Regex {
    Regex::new(&format!(r"(?i)({NUMBER})\s*\((?:{unit})\)")).unwrap()
}

/// Unit a scalar value must carry, written in parentheses after the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Surface area, m²/g
    SquareMetresPerGram,
    /// Pore volume, cm³/g or ml/g
    CubicCentimetresPerGram,
    /// Pore diameter, nm
    Nanometres,
}

impl Unit {
    /// Regex matching `<number>(<unit>)`; group 1 is the number.
    pub fn value_pattern(self) -> &'static Regex {
        match self {
            Unit::SquareMetresPerGram => &VALUE_M2G,
            Unit::CubicCentimetresPerGram => &VALUE_CM3G,
            Unit::Nanometres => &VALUE_NM,
        }
    }
}

/// Strip thousands separators from a matched number.
pub(crate) fn clean_number(raw: &str) -> String {
    raw.replace(',', "")
}

/// How to find one scalar field in running text.
#[derive(Debug, Clone, Copy)]
pub struct FieldQuery {
    /// Interchangeable keyword spellings
    pub keywords: &'static [&'static str],
    /// Required unit
    pub unit: Unit,
    /// Window size in characters
    pub window: usize,
    /// Landmark that values should sit near (and preferably after)
    pub reference: Option<&'static str>,
}

pub const SINGLE_POINT_BET: FieldQuery = FieldQuery {
    keywords: &["单点BET比表面积", "单点 比表面积BET", "单点BET 比表面积"],
    unit: Unit::SquareMetresPerGram,
    window: 1000,
    reference: None,
};

pub const MULTI_POINT_BET: FieldQuery = FieldQuery {
    keywords: &["多点BET比表面积", "多点 比表面积BET", "BET测试结果", "测试结果BET"],
    unit: Unit::SquareMetresPerGram,
    window: 1000,
    reference: None,
};

pub const TOTAL_PORE_VOLUME: FieldQuery = FieldQuery {
    keywords: &["最高单点吸附总孔体积", "吸附累积孔体积", "总孔体积"],
    unit: Unit::CubicCentimetresPerGram,
    window: 1200,
    reference: None,
};

pub const AVERAGE_PORE_DIAMETER: FieldQuery = FieldQuery {
    keywords: &["单点总孔吸附平均孔直径"],
    unit: Unit::Nanometres,
    window: 2000,
    reference: None,
};

pub const MOST_PROBABLE_DIAMETER: FieldQuery = FieldQuery {
    keywords: &["最可几孔径", "最可几孔径BJH", "BJH最可几孔径", "SF最可几孔径"],
    unit: Unit::Nanometres,
    window: 400,
    reference: Some("NLDFT"),
};

/// Surface-area section heading.
pub const SURFACE_SECTION_START: &str = "比表面积分析报告";

/// Headings that close the surface-area section.
pub const SURFACE_SECTION_ENDS: &[&str] = &["孔体积分析报告", "孔径分析报告", "比表面及孔径分析报告"];

/// Section of revised reports that states volumes as percentages of the total.
pub const PORE_VOLUME_PERCENT_SECTION: &str = "孔体积百分比";

/// Characters read after [`PORE_VOLUME_PERCENT_SECTION`].
pub const PORE_VOLUME_PERCENT_WINDOW: usize = 600;

/// Grid summary-table section keywords.
pub const GRID_SECTION_SURFACE: &str = "surface area";
pub const GRID_SECTION_PORE_VOLUME: &str = "pore volume";
pub const GRID_SECTION_PORE_SIZE: &str = "pore size";

pub const GRID_SINGLE_POINT_BET: &[&str] = &["单点BET比表面积", "single point surface area"];
pub const GRID_MULTI_POINT_BET: &[&str] = &["多点BET比表面积", "bet surface area"];
pub const GRID_TOTAL_PORE_VOLUME: &[&str] =
    &["最高单点吸附总孔体积", "single point adsorption total pore volume"];
pub const GRID_AVERAGE_PORE_DIAMETER: &[&str] =
    &["单点总孔吸附平均孔直径", "total adsorption average pore width"];
pub const GRID_MOST_PROBABLE_DIAMETER: &[&str] = &["最可几孔径", "modal pore width", "mode pore width"];

/// Keywords that mark a report page as relevant.
pub const REPORT_KEYWORDS: &[&str] = &[
    "surface area",
    "pore volume",
    "pore size",
    "bet",
    "nldft",
    "p/p0",
    "单点BET比表面积",
    "多点BET比表面积",
    "最高单点吸附总孔体积",
    "单点总孔吸附平均孔直径",
    "最可几孔径",
];
