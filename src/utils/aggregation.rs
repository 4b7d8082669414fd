use crate::types::{LanguageDatum, TopNMode, OTHERS_COLOR, OTHERS_KEY};

/// Collapse everything past the mode's limit into a single "Others" entry.
///
/// Input is expected to be sorted by descending value already; the kept
/// prefix is not re-sorted.
pub fn aggregate_top_n(data: &[LanguageDatum], mode: TopNMode) -> Vec<LanguageDatum> {
    let limit = match mode.limit() {
        Some(limit) if data.len() > limit => limit,
        _ => return data.to_vec(),
    };

    let (kept, rest) = data.split_at(limit);
    let others_total: u64 = rest.iter().map(|d| d.value).sum();

    let mut aggregated = Vec::with_capacity(limit + 1);
    aggregated.extend_from_slice(kept);
    aggregated.push(LanguageDatum::new(
        OTHERS_KEY,
        "Others",
        others_total,
        OTHERS_COLOR,
    ));
    aggregated
}

/// Sum of all repository counts in a series
pub fn total_value(data: &[LanguageDatum]) -> u64 {
    data.iter().map(|d| d.value).sum()
}
