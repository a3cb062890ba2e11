//! CSV export of the distribution series.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::DistributionSeries;

/// Header row of the distribution CSV.
pub const CSV_HEADER: &str = "average_pore_diameter_nm,pore_integral_volume_cm3_per_g_STP";

/// Render the series as CSV, in canonical order, six decimals per value.
pub fn to_csv(series: &DistributionSeries) -> Result<String> {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + series.len() * 24);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for sample in series {
        writeln!(
            out,
            "{:.6},{:.6}",
            sample.average_pore_diameter, sample.pore_integral_volume
        )
        .map_err(|e| Error::Render(format!("CSV formatting error: {}", e)))?;
    }
    Ok(out)
}

/// Write the series as a CSV file.
pub fn write_csv<P: AsRef<Path>>(series: &DistributionSeries, path: P) -> Result<()> {
    fs::write(path, to_csv(series)?)?;
    Ok(())
}
