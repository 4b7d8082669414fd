use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, ExportResult};
use crate::types::LanguageDatum;

const HEADER: &str = "Language,Repositories,Percentage";

/// Quote a field when it holds a comma, a quote or a line break.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render the series as CSV. The forks entry is left out, and percentages are
/// relative to the remaining rows.
pub fn build_csv(data: &[LanguageDatum]) -> String {
    let rows: Vec<&LanguageDatum> = data.iter().filter(|d| !d.is_forks()).collect();
    let total: u64 = rows.iter().map(|d| d.value).sum();

    let mut out = String::from(HEADER);
    out.push('\n');
    for datum in rows {
        let percentage = if total == 0 {
            0.0
        } else {
            datum.value as f64 / total as f64 * 100.0
        };
        out.push_str(&format!(
            "{},{},{:.2}\n",
            escape_field(&datum.label),
            datum.value,
            percentage
        ));
    }
    out
}

pub fn csv_filename(username: &str) -> String {
    format!("{}-languages.csv", username)
}

/// Write `{username}-languages.csv` into `dir` and return its path.
pub fn export_to_csv(data: &[LanguageDatum], username: &str, dir: &Path) -> ExportResult<PathBuf> {
    let path = dir.join(csv_filename(username));
    fs::write(&path, build_csv(data)).map_err(|e| ExportError::io(&path, e))?;
    tracing::info!(path = %path.display(), rows = data.len(), "exported CSV");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FORKS_KEY;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("Rust"), "Rust");
        assert_eq!(escape_field("Say \"Hi\""), "\"Say \"\"Hi\"\"\"");
        assert_eq!(escape_field("C, C++"), "\"C, C++\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_build_csv_excludes_forks() {
        let data = vec![
            LanguageDatum::new("Rust", "Rust", 3, "#dea584"),
            LanguageDatum::new(FORKS_KEY, "Forks", 10, "#cccccc"),
            LanguageDatum::new("Go", "Go", 1, "#00add8"),
        ];
        assert_eq!(
            build_csv(&data),
            "Language,Repositories,Percentage\nRust,3,75.00\nGo,1,25.00\n"
        );
    }

    #[test]
    fn test_zero_total() {
        let data = vec![LanguageDatum::new("Rust", "Rust", 0, "#dea584")];
        assert_eq!(build_csv(&data), "Language,Repositories,Percentage\nRust,0,0.00\n");
    }

    #[test]
    fn test_export_writes_file() {
        let dir = TempDir::new().unwrap();
        let data = vec![LanguageDatum::new("Say \"Hi\"", "Say \"Hi\"", 2, "#000000")];

        let path = export_to_csv(&data, "octocat", dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "octocat-languages.csv");

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Say \"\"Hi\"\"\",2,100.00"));
    }
}
