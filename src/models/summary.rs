use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{
    AssetStatus, BillingRecord, BillingStatus, Coordinate, CustomerStatus, EnergySource,
    FeeBreakdown, InstallationType,
};

/// One bucket of a category distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare<K> {
    pub category: K,
    pub sum: f64,
    #[serde(rename = "percentOfTotal")]
    pub percent_of_total: f64,
}

/// Grouped sums in first-seen category order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution<K> {
    pub(crate) buckets: Vec<CategoryShare<K>>,
    pub(crate) total: f64,
}

impl<K: PartialEq> Distribution<K> {
    pub fn buckets(&self) -> &[CategoryShare<K>] {
        &self.buckets
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn get(&self, category: &K) -> Option<&CategoryShare<K>> {
        self.buckets.iter().find(|b| &b.category == category)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Center and zoom for the portfolio map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

/// How well one customer's consumption lines up with portfolio production
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerMatch {
    #[serde(rename = "customerId")]
    pub customer_id: Uuid,
    pub name: String,
    #[serde(rename = "matchingScore")]
    pub matching_score: u8,
    #[serde(rename = "coveragePercent")]
    pub coverage_percent: f64,
    #[serde(rename = "nearestAssetKm")]
    pub nearest_asset_km: Option<f64>,
    /// Assets within the configured radius of the customer
    #[serde(rename = "nearbyAssets")]
    pub nearby_assets: usize,
}

/// Dashboard overview of a portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    #[serde(rename = "totalCapacityMw")]
    pub total_capacity_mw: f64,
    #[serde(rename = "byEnergySource")]
    pub by_energy_source: Distribution<EnergySource>,
    #[serde(rename = "byInstallationType")]
    pub by_installation_type: Distribution<InstallationType>,
    #[serde(rename = "byAssetStatus")]
    pub by_asset_status: Distribution<AssetStatus>,
    #[serde(rename = "byCustomerStatus")]
    pub by_customer_status: Distribution<CustomerStatus>,
    #[serde(rename = "mapView")]
    pub map_view: Option<MapView>,
    #[serde(rename = "customerMatches")]
    pub customer_matches: Vec<CustomerMatch>,
}

/// A billing record together with its derived fees
#[derive(Debug, Clone, Serialize)]
pub struct BillingStatement {
    #[serde(flatten)]
    pub record: BillingRecord,
    #[serde(flatten)]
    pub fees: FeeBreakdown,
}

/// Totals over a set of billing records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingSummary {
    #[serde(rename = "totalIssuedUnits")]
    pub total_issued_units: f64,
    #[serde(rename = "totalGoFees")]
    pub total_go_fees: f64,
    #[serde(rename = "totalRegistrationFees")]
    pub total_registration_fees: f64,
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
    #[serde(rename = "amountByStatus")]
    pub amount_by_status: Distribution<BillingStatus>,
}
