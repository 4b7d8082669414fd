use super::*;
use crate::types::LanguageDatum;
use crate::utils::{normalize_series, NormalizeOptions};

fn setup_request(chart_type: ChartType) -> ChartRequest {
    let data = vec![
        LanguageDatum::new("TypeScript", "TypeScript", 12, "#3178c6"),
        LanguageDatum::new("Rust", "Rust", 7, "#dea584"),
        LanguageDatum::new("Go", "Go", 3, "#00add8"),
        LanguageDatum::new("__forks__", "Forks", 5, "#cccccc"),
    ];
    let view = normalize_series(
        &data,
        NormalizeOptions {
            exclude_forks: true,
            max_items: None,
        },
    );
    let mut request = ChartRequest::new(chart_type, view, "octocat");
    request.width = 320;
    request.height = 240;
    request
}

#[test]
fn test_render_every_chart_type() {
    for chart_type in ChartType::ALL {
        let request = setup_request(chart_type);
        let chart = render_chart(&request).unwrap();

        assert_eq!(chart.width, 320);
        assert_eq!(chart.height, 240);
        assert_eq!(chart.pixels.len(), 320 * 240 * 3);
        // Something other than the background got drawn
        let first = &chart.pixels[..3];
        assert!(chart.pixels.chunks_exact(3).any(|px| px != first), "{:?}", chart_type);
    }
}

#[test]
fn test_empty_plot() {
    let mut request = setup_request(ChartType::Pie);
    request.view = SeriesView::default();

    // Should handle empty data gracefully
    assert!(render_chart(&request).is_ok());
}

#[test]
fn test_single_language_radar() {
    let mut request = setup_request(ChartType::Radar);
    request.view = SeriesView {
        labels: vec!["Rust".to_string()],
        values: vec![1],
        colors: vec!["#dea584".to_string()],
    };
    assert!(render_chart(&request).is_ok());
}

#[test]
fn test_rgba_expansion() {
    let chart = RenderedChart {
        pixels: vec![1, 2, 3, 4, 5, 6],
        width: 2,
        height: 1,
    };
    assert_eq!(chart.to_rgba(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
}

#[test]
fn test_async_render_uses_cache() {
    let request = setup_request(ChartType::Bar);
    let first = tokio_test::block_on(render_chart_async(request.clone())).unwrap();
    let second = tokio_test::block_on(render_chart_async(request)).unwrap();
    assert_eq!(first, second);
}
