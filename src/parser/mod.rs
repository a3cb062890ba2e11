//! Report text and table parsing.

mod grid_labels;
mod grid_table;
pub mod labels;
mod line_stream;
mod locator;
mod normalize;
mod options;
mod section;
mod surface;

pub use grid_labels::{read_most_probable_diameter, read_scalar_fields, read_summary_fields};
pub use grid_table::{extract_number, GridReconstructor};
pub use labels::{FieldQuery, Unit};
pub use line_stream::LineStreamReconstructor;
pub use locator::{locate, AnchorLocator};
pub use normalize::{compact_lower, normalize_cell, normalize_text};
pub use options::{
    ExtractOptions, GridConfig, LineStreamConfig, LocatorConfig, MatchMode, WindowShape,
};
pub use section::section;
pub use surface::{map_surface_areas, pore_volume_from_percentage_section};
