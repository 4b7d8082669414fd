use chrono::NaiveDate;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use crate::error::{ExportError, ExportResult};
use crate::plotting::RenderedChart;
use crate::types::ChartType;
use crate::utils::time::{date_stamp, today_stamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageExportOptions {
    pub username: String,
    pub chart_type: ChartType,
    pub format: ExportFormat,
}

/// `gitlingo-{username}-{chart}-{YYYYMMDD}.{ext}` for today's date
pub fn generate_filename(options: &ImageExportOptions) -> String {
    filename_with_stamp(options, &today_stamp())
}

pub fn generate_filename_on(options: &ImageExportOptions, date: NaiveDate) -> String {
    filename_with_stamp(options, &date_stamp(date))
}

fn filename_with_stamp(options: &ImageExportOptions, stamp: &str) -> String {
    format!(
        "gitlingo-{}-{}-{}.{}",
        options.username,
        options.chart_type.slug(),
        stamp,
        options.format.extension()
    )
}

/// Encode the rendered chart at maximum quality.
pub fn encode_chart(chart: &RenderedChart, format: ExportFormat) -> ExportResult<Vec<u8>> {
    let buffer = RgbImage::from_raw(chart.width, chart.height, chart.pixels.clone())
        .ok_or(ExportError::EmptyImage)?;

    let mut bytes = Vec::new();
    match format {
        ExportFormat::Png => buffer.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?,
        ExportFormat::Jpg => JpegEncoder::new_with_quality(&mut bytes, 100).encode_image(&buffer)?,
    }
    Ok(bytes)
}

/// Save the current chart into `dir`.
///
/// Bytes go to a temporary file first; it is renamed into place on success
/// and removed on any failure.
pub fn export_chart_image(
    chart: Option<&RenderedChart>,
    options: &ImageExportOptions,
    dir: &Path,
) -> ExportResult<PathBuf> {
    let chart = chart.ok_or(ExportError::NoChart)?;
    let bytes = encode_chart(chart, options.format)?;
    let path = dir.join(generate_filename(options));

    let mut tmp = tempfile::Builder::new()
        .prefix(".gitlingo-")
        .tempfile_in(dir)
        .map_err(|e| ExportError::io(dir, e))?;
    tmp.write_all(&bytes)
        .map_err(|e| ExportError::io(tmp.path(), e))?;
    tmp.persist(&path)
        .map_err(|e| ExportError::io(&path, e.error))?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "exported chart image");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn chart(width: u32, height: u32) -> RenderedChart {
        RenderedChart {
            pixels: vec![200; (width * height * 3) as usize],
            width,
            height,
        }
    }

    fn options(format: ExportFormat) -> ImageExportOptions {
        ImageExportOptions {
            username: "octocat".to_string(),
            chart_type: ChartType::Bar,
            format,
        }
    }

    #[test]
    fn test_filename() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(
            generate_filename_on(&options(ExportFormat::Png), date),
            "gitlingo-octocat-bar-20250109.png"
        );

        let name = generate_filename(&options(ExportFormat::Png));
        let stamp = name
            .strip_prefix("gitlingo-octocat-bar-")
            .and_then(|rest| rest.strip_suffix(".png"))
            .unwrap();
        assert_eq!(stamp.len(), 8);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_missing_chart() {
        let dir = TempDir::new().unwrap();
        let err = export_chart_image(None, &options(ExportFormat::Png), dir.path()).unwrap_err();
        assert!(matches!(err, ExportError::NoChart));
    }

    #[test]
    fn test_short_buffer() {
        let mut bad = chart(10, 10);
        bad.pixels.truncate(5);
        let err = encode_chart(&bad, ExportFormat::Png).unwrap_err();
        assert!(matches!(err, ExportError::EmptyImage));
    }

    #[test]
    fn test_png_and_jpg_export() {
        let dir = TempDir::new().unwrap();
        let rendered = chart(32, 16);

        let png = export_chart_image(Some(&rendered), &options(ExportFormat::Png), dir.path()).unwrap();
        let bytes = std::fs::read(&png).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);

        let jpg = export_chart_image(Some(&rendered), &options(ExportFormat::Jpg), dir.path()).unwrap();
        let bytes = std::fs::read(&jpg).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        // Only the two exports remain, no temp files
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 2);
    }
}
