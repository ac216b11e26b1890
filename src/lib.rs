//! Renuw Engine - portfolio computations for the Renuw utility portal
//!
//! This library provides the calculations behind the portfolio dashboard:
//! temporal matching scores, category distributions, map geometry and
//! Guarantee-of-Origin billing. Every function is pure and synchronous.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod sample;

// Re-export commonly used types
pub use core::{
    aggregate_by_category, centroid, compute_fees, compute_matching_score, haversine_distance_km,
    zoom_level_for_bounds, MatchingScoreCalculator, PortfolioAnalyzer,
};
pub use error::{CalcError, CalcResult};
pub use models::{Coordinate, Distribution, EnergyAsset, Customer, BillingRecord, PortfolioSummary};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let fees = compute_fees(1.0, 20.0, 5.0);
        assert_eq!(fees.total_amount, 25.0);
    }
}
