use renuw_engine::config::Settings;
use renuw_engine::core::{billing::summarize_billing, PortfolioAnalyzer};
use renuw_engine::models::{BillingStatement, BillingSummary, PortfolioSummary};
use renuw_engine::sample;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Everything the overview page renders
#[derive(Debug, Serialize)]
struct DashboardReport {
    currency: String,
    portfolio: PortfolioSummary,
    billing: BillingSummary,
    statements: Vec<BillingStatement>,
}

fn init_logging(settings: &Settings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load()?;
    init_logging(&settings);

    info!("Configuration loaded (zero variance policy: {:?})", settings.matching.zero_variance_policy);

    let (assets, customers) = sample::portfolio();
    let analyzer = PortfolioAnalyzer::new(&settings);

    let portfolio = analyzer.summarize(&assets, &customers).map_err(|e| {
        error!("Failed to summarize portfolio: {}", e);
        e
    })?;

    let records = sample::billing_records(settings.billing.rates());
    let billing = summarize_billing(&records)?;
    let statements = records.iter().map(|r| r.statement()).collect();

    info!(
        "Billing: {} records, total {:.2} {}",
        records.len(),
        billing.total_amount,
        settings.billing.currency
    );

    let report = DashboardReport {
        currency: settings.billing.currency.clone(),
        portfolio,
        billing,
        statements,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
