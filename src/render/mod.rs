//! Rendering module for converting extraction results to output formats.

mod csv;
mod json;
mod text;

pub use self::csv::{to_csv, write_csv, CSV_HEADER};
pub use json::{to_json, JsonFormat};
pub use text::to_text;
