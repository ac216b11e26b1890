// Criterion benchmarks for Renuw Engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use renuw_engine::core::{
    aggregation::by_energy_source,
    distance::{haversine_distance_km, zoom_level_for_bounds},
    matching::compute_matching_score,
    PortfolioAnalyzer,
};
use renuw_engine::models::{Coordinate, EnergyAsset};
use renuw_engine::sample;

fn scaled_assets(count: usize) -> Vec<EnergyAsset> {
    let (template, _) = sample::portfolio();

    (0..count)
        .map(|i| {
            let mut asset = template[i % template.len()].clone();
            asset.location.latitude += (i as f64 * 0.001) % 0.5;
            asset.location.longitude += (i as f64 * 0.001) % 0.5;
            asset
        })
        .collect()
}

fn bench_haversine_distance(c: &mut Criterion) {
    let a = Coordinate { latitude: 55.6761, longitude: 12.5683 };
    let b = Coordinate { latitude: 56.1629, longitude: 10.2039 };

    c.bench_function("haversine_distance_km", |bench| {
        bench.iter(|| haversine_distance_km(black_box(&a), black_box(&b)));
    });
}

fn bench_matching_score(c: &mut Criterion) {
    let (assets, customers) = sample::portfolio();
    let production = &assets[0].production_profile;
    let consumption = &customers[0].consumption_profile;

    c.bench_function("matching_score_24h", |b| {
        b.iter(|| compute_matching_score(black_box(consumption), black_box(production)));
    });
}

fn bench_aggregation_and_zoom(c: &mut Criterion) {
    let mut group = c.benchmark_group("portfolio_geometry");

    for asset_count in [10, 100, 1000].iter() {
        let assets = scaled_assets(*asset_count);
        let locations: Vec<Coordinate> = assets.iter().map(|a| a.location).collect();

        group.bench_with_input(
            BenchmarkId::new("by_energy_source", asset_count),
            asset_count,
            |b, _| b.iter(|| by_energy_source(black_box(&assets))),
        );

        group.bench_with_input(
            BenchmarkId::new("zoom_level_for_bounds", asset_count),
            asset_count,
            |b, _| b.iter(|| zoom_level_for_bounds(black_box(&locations))),
        );
    }

    group.finish();
}

fn bench_portfolio_summary(c: &mut Criterion) {
    let analyzer = PortfolioAnalyzer::default();
    let (_, customers) = sample::portfolio();
    let assets = scaled_assets(500);

    c.bench_function("portfolio_summary_500_assets", |b| {
        b.iter(|| analyzer.summarize(black_box(&assets), black_box(&customers)));
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_matching_score,
    bench_aggregation_and_zoom,
    bench_portfolio_summary
);

criterion_main!(benches);
