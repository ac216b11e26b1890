// Model exports
pub mod domain;
pub mod summary;

pub use domain::{
    AssetStatus, BillingRates, BillingRecord, BillingStatus, BoundingBox, Coordinate, Customer,
    CustomerStatus, EnergyAsset, EnergyRecord, EnergySource, FeeBreakdown, InstallationType,
    TimeSeries, ZeroVariancePolicy,
};
pub use summary::{
    BillingStatement, BillingSummary, CategoryShare, CustomerMatch, Distribution, MapView,
    PortfolioSummary,
};
