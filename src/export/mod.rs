//! File exports: the language table as CSV and the current chart as PNG/JPG.

pub mod csv;
pub mod image;

pub use self::csv::{build_csv, escape_field, export_to_csv};
pub use self::image::{
    export_chart_image, generate_filename, ExportFormat, ImageExportOptions,
};
