//! Plain text summary of an extraction result.

use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::model::{ExtractionResult, ScalarField, SurfaceAreaLabel};

fn field(value: &ScalarField) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value.as_str()
    }
}

/// Convert an extraction result to a human-readable summary.
pub fn to_text(result: &ExtractionResult) -> Result<String> {
    let mut out = String::new();
    write_summary(&mut out, result).map_err(|e| Error::Render(format!("Text formatting error: {}", e)))?;
    Ok(out.trim_end().to_string())
}

fn write_summary(out: &mut String, result: &ExtractionResult) -> std::fmt::Result {
    if !result.success {
        writeln!(out, "Extraction failed ({}): {}", result.backend, result.error_message())?;
        return Ok(());
    }

    let scalars = &result.scalars;
    writeln!(out, "Backend: {}", result.backend)?;
    writeln!(out)?;
    writeln!(out, "Surface area (m²/g)")?;
    for label in SurfaceAreaLabel::ALL {
        writeln!(out, "  {}: {}", label.report_label(), field(scalars.surface_areas.get(label)))?;
    }
    writeln!(out)?;
    writeln!(out, "Total pore volume (cm³/g): {}", field(&scalars.total_pore_volume))?;
    writeln!(out, "Average pore diameter (nm): {}", field(&scalars.average_pore_diameter))?;
    writeln!(out, "Most-probable diameter (nm): {}", field(&scalars.most_probable_diameter))?;
    writeln!(out)?;

    let m = &result.metrics;
    writeln!(out, "Distribution samples: {}", result.distribution.len())?;
    writeln!(out, "D10 (nm): {:.4}  at {:.6} cm³/g", m.d10, m.d10_volume)?;
    writeln!(out, "D90 (nm): {:.4}  at {:.6} cm³/g", m.d90, m.d90_volume)?;
    writeln!(out, "D90/D10: {:.4}", m.d90_d10_ratio)?;
    writeln!(out, "Pore volume A (cm³/g): {:.6}", m.pore_volume_a)?;

    let t = &m.thresholds;
    writeln!(out, "0.5D (nm): {:.4}  volume {:.6}  below {:.2}%", t.d0_5, t.volume_0_5d, t.pct_below_0_5d)?;
    writeln!(out, "1.5D (nm): {:.4}  volume {:.6}  above {:.2}%", t.d1_5, t.volume_1_5d, t.pct_above_1_5d)?;
    Ok(())
}
