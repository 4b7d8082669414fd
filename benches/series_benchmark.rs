/// Benchmarks for the series transforms that run on every chart redraw.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gitlingo::export::build_csv;
use gitlingo::types::{LanguageDatum, TopNMode, FORKS_KEY};
use gitlingo::utils::{aggregate_top_n, apply_filters, normalize_series, NormalizeOptions};

/// Build a descending series of `len` languages with a forks entry near the top
fn sample_series(len: usize) -> Vec<LanguageDatum> {
    let mut data: Vec<LanguageDatum> = (0..len)
        .map(|i| {
            let name = format!("Language {}", i);
            LanguageDatum::new(&name, &name, (len - i) as u64 * 7, "#3178c6")
        })
        .collect();
    data.insert(1, LanguageDatum::new(FORKS_KEY, "Forks", len as u64 * 6, "#cccccc"));
    data
}

fn bench_transforms(c: &mut Criterion) {
    let data = sample_series(300);

    c.bench_function("aggregate_top10", |b| {
        b.iter(|| aggregate_top_n(black_box(&data), TopNMode::Top10))
    });

    c.bench_function("filter_aggregate_normalize", |b| {
        b.iter(|| {
            let filtered = apply_filters(black_box(&data), false, true);
            let aggregated = aggregate_top_n(&filtered, TopNMode::Top25);
            normalize_series(
                &aggregated,
                NormalizeOptions {
                    exclude_forks: true,
                    max_items: None,
                },
            )
        })
    });

    c.bench_function("build_csv", |b| b.iter(|| build_csv(black_box(&data))));
}

criterion_group!(benches, bench_transforms);
criterion_main!(benches);
