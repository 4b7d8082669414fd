use crate::types::LanguageDatum;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub exclude_forks: bool,
    pub max_items: Option<usize>,
}

/// Parallel label/value/color vectors, ready for a chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SeriesView {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub colors: Vec<String>,
}

impl SeriesView {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }
}

/// Split a series into parallel vectors.
///
/// The forks filter runs before truncation, so `max_items` always counts
/// real languages.
pub fn normalize_series(data: &[LanguageDatum], options: NormalizeOptions) -> SeriesView {
    let limit = options.max_items.unwrap_or(usize::MAX);
    let mut view = SeriesView::default();

    for datum in data
        .iter()
        .filter(|d| !(options.exclude_forks && d.is_forks()))
        .take(limit)
    {
        view.labels.push(datum.label.clone());
        view.values.push(datum.value);
        view.colors.push(datum.color.clone());
    }

    view
}

/// Drop the forks and/or "Unknown" entries according to the search filters.
pub fn apply_filters(
    data: &[LanguageDatum],
    include_forks: bool,
    include_unknown: bool,
) -> Vec<LanguageDatum> {
    data.iter()
        .filter(|d| include_forks || !d.is_forks())
        .filter(|d| include_unknown || !d.is_unknown())
        .cloned()
        .collect()
}

/// Share of the full response that the displayed series accounts for.
///
/// The denominator is the whole response, forks included.
pub fn coverage_percent(all: &[LanguageDatum], displayed: &[LanguageDatum]) -> f64 {
    let denominator: u64 = all.iter().map(|d| d.value).sum();
    if denominator == 0 {
        return 0.0;
    }
    let numerator: u64 = displayed.iter().map(|d| d.value).sum();
    numerator as f64 / denominator as f64 * 100.0
}
