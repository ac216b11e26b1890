// Core calculator exports
pub mod aggregation;
pub mod billing;
pub mod distance;
pub mod matching;
pub mod portfolio;

pub use aggregation::{aggregate_by_category, aggregate_values, by_energy_source, by_installation_type};
pub use billing::{compute_fees, summarize_billing};
pub use distance::{centroid, haversine_distance_km, zoom_level_for_bounds};
pub use matching::{compute_matching_score, MatchingScoreCalculator};
pub use portfolio::PortfolioAnalyzer;
