// Integration tests for Renuw Engine

use renuw_engine::config::Settings;
use renuw_engine::core::{billing::summarize_billing, PortfolioAnalyzer};
use renuw_engine::models::{BillingRates, BillingStatus, EnergySource, ZeroVariancePolicy};
use renuw_engine::sample;

#[test]
fn test_integration_sample_portfolio_summary() {
    let analyzer = PortfolioAnalyzer::new(&Settings::default());
    let (assets, customers) = sample::portfolio();

    let summary = analyzer.summarize(&assets, &customers).unwrap();

    let expected_capacity: f64 = assets.iter().map(|a| a.capacity_mw).sum();
    assert!((summary.total_capacity_mw - expected_capacity).abs() < 1e-9);

    // Wind is listed first in the sample
    assert_eq!(summary.by_energy_source.buckets()[0].category, EnergySource::Wind);

    let pct: f64 = summary
        .by_installation_type
        .buckets()
        .iter()
        .map(|b| b.percent_of_total)
        .sum();
    assert!((pct - 100.0).abs() < 1e-9);

    let view = summary.map_view.expect("assets have locations");
    assert!((3..=14).contains(&view.zoom));
    assert!(view.center.latitude > 54.0 && view.center.latitude < 57.0);

    assert_eq!(summary.customer_matches.len(), customers.len());
    for pair in summary.customer_matches.windows(2) {
        assert!(pair[0].matching_score >= pair[1].matching_score);
    }
    for m in &summary.customer_matches {
        assert!(m.matching_score <= 100);
        assert!(m.nearest_asset_km.is_some());
        assert!(m.nearby_assets <= assets.len());
    }
}

#[test]
fn test_integration_daytime_load_beats_night_load() {
    let analyzer = PortfolioAnalyzer::default();
    let (assets, customers) = sample::portfolio();

    let dairy = customers.iter().find(|c| c.name == "Jutland Dairy Co-op").unwrap();
    let cold_storage = customers.iter().find(|c| c.name == "Harbour Cold Storage").unwrap();

    let day_score = analyzer.score_customer(dairy, &assets).unwrap();
    let night_score = analyzer.score_customer(cold_storage, &assets).unwrap();

    assert!(day_score > night_score, "{} should exceed {}", day_score, night_score);
}

#[test]
fn test_integration_billing_uses_configured_rates() {
    let settings = Settings::from_toml_str(
        r#"
        [billing]
        go_rate = 10.0
        registration_fee_rate = 2.0
        "#,
    )
    .unwrap();

    let records = sample::billing_records(settings.billing.rates());
    let summary = summarize_billing(&records).unwrap();

    assert!((summary.total_amount - summary.total_issued_units * 12.0).abs() < 1e-6);
    assert!((summary.total_go_fees + summary.total_registration_fees - summary.total_amount).abs() < 1e-6);

    let by_status: f64 = summary.amount_by_status.buckets().iter().map(|b| b.sum).sum();
    assert!((by_status - summary.total_amount).abs() < 1e-6);
    assert!(summary.amount_by_status.get(&BillingStatus::Paid).is_some());
}

#[test]
fn test_integration_default_rates_match_billing_settings() {
    assert_eq!(Settings::default().billing.rates(), BillingRates::default());
}

#[test]
fn test_integration_summary_serializes() {
    let mut settings = Settings::default();
    settings.matching.zero_variance_policy = ZeroVariancePolicy::Zero;

    let (assets, customers) = sample::portfolio();
    let summary = PortfolioAnalyzer::new(&settings).summarize(&assets, &customers).unwrap();

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json["byEnergySource"]["buckets"].is_array());
    assert!(json["mapView"]["zoom"].is_u64());
    assert_eq!(
        json["customerMatches"].as_array().map(|a| a.len()),
        Some(customers.len())
    );
    assert!(json["customerMatches"][0]["nearbyAssets"].is_u64());
}

#[test]
fn test_integration_out_of_range_zoom_is_rejected() {
    let result = Settings::from_toml_str(
        r#"
        [geo]
        default_zoom = 200
        "#,
    );

    assert!(result.is_err());
}
