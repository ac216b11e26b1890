use crate::config::Settings;
use crate::core::{
    aggregation::{by_asset_status, by_customer_status, by_energy_source, by_installation_type},
    distance::{map_view, nearest_distance_km, within_radius},
    matching::MatchingScoreCalculator,
};
use crate::error::{CalcError, CalcResult};
use crate::models::{Coordinate, Customer, CustomerMatch, EnergyAsset, PortfolioSummary, TimeSeries};

/// Dashboard orchestrator - runs every calculator over one portfolio
///
/// # Stages
/// 1. Capacity and allocation distributions
/// 2. Map view (centroid and zoom over asset locations)
/// 3. Aggregate production profile
/// 4. Per-customer matching score, coverage, nearest and nearby assets, then ranking
#[derive(Debug, Clone)]
pub struct PortfolioAnalyzer {
    calculator: MatchingScoreCalculator,
    default_zoom: u8,
    nearby_radius_km: f64,
}

impl PortfolioAnalyzer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            calculator: MatchingScoreCalculator::new(settings.matching.zero_variance_policy),
            default_zoom: settings.geo.default_zoom,
            nearby_radius_km: settings.geo.nearby_radius_km,
        }
    }

    /// Summarize a portfolio for the overview page
    ///
    /// Customers whose profile length does not line up with the production
    /// grid are skipped with a warning. Every other error propagates.
    pub fn summarize(
        &self,
        assets: &[EnergyAsset],
        customers: &[Customer],
    ) -> CalcResult<PortfolioSummary> {
        // Stage 1: distributions
        let by_energy_source = by_energy_source(assets)?;
        let by_installation_type = by_installation_type(assets)?;
        let by_asset_status = by_asset_status(assets)?;
        let by_customer_status = by_customer_status(customers)?;

        // Stage 2: map
        let locations: Vec<Coordinate> = assets.iter().map(|a| a.location).collect();
        let map_view = if locations.is_empty() {
            None
        } else {
            Some(map_view(&locations, self.default_zoom)?)
        };

        // Stage 3 & 4: matching against the combined production profile
        let customer_matches = if assets.is_empty() {
            tracing::warn!("Portfolio has no assets, skipping customer matching");
            Vec::new()
        } else {
            let production = TimeSeries::sum_aligned(assets.iter().map(|a| &a.production_profile))?;
            self.rank_customers(customers, &production, &locations)?
        };

        tracing::info!(
            "Summarized portfolio: {} assets, {:.1} MW, {} of {} customers matched",
            assets.len(),
            by_energy_source.total(),
            customer_matches.len(),
            customers.len()
        );

        Ok(PortfolioSummary {
            total_capacity_mw: by_energy_source.total(),
            by_energy_source,
            by_installation_type,
            by_asset_status,
            by_customer_status,
            map_view,
            customer_matches,
        })
    }

    /// Score every customer against `production`, best first
    pub fn rank_customers(
        &self,
        customers: &[Customer],
        production: &TimeSeries,
        asset_locations: &[Coordinate],
    ) -> CalcResult<Vec<CustomerMatch>> {
        let mut matches = Vec::with_capacity(customers.len());

        for customer in customers {
            let consumption = &customer.consumption_profile;

            if consumption.len() != production.len() {
                tracing::warn!(
                    "Skipping customer {}: profile has {} samples, production has {}",
                    customer.id,
                    consumption.len(),
                    production.len()
                );
                continue;
            }

            let matching_score = self.calculator.score(consumption, production)?;
            let coverage_percent = self.calculator.coverage(consumption, production)?;
            let nearby = within_radius(&customer.location, asset_locations, self.nearby_radius_km);

            matches.push(CustomerMatch {
                customer_id: customer.id,
                name: customer.name.clone(),
                matching_score,
                coverage_percent,
                nearest_asset_km: nearest_distance_km(&customer.location, asset_locations),
                nearby_assets: nearby.len(),
            });
        }

        // Sort by score (descending) and then by distance (ascending)
        matches.sort_by(|a, b| {
            b.matching_score.cmp(&a.matching_score).then_with(|| {
                let da = a.nearest_asset_km.unwrap_or(f64::INFINITY);
                let db = b.nearest_asset_km.unwrap_or(f64::INFINITY);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
        });

        Ok(matches)
    }

    /// Score a single customer against the portfolio's combined production
    pub fn score_customer(&self, customer: &Customer, assets: &[EnergyAsset]) -> CalcResult<u8> {
        if assets.is_empty() {
            return Err(CalcError::EmptyInput("no assets to match against"));
        }

        let production = TimeSeries::sum_aligned(assets.iter().map(|a| &a.production_profile))?;
        self.calculator.score(&customer.consumption_profile, &production)
    }
}

impl Default for PortfolioAnalyzer {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
