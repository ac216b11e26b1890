use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CalcError, CalcResult};

/// Geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinate {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range or non-finite degrees
    pub fn new(latitude: f64, longitude: f64) -> CalcResult<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CalcError::InvalidInput(format!(
                "coordinate ({}, {}) is not finite",
                latitude, longitude
            )));
        }

        let coordinate = Self { latitude, longitude };
        coordinate.validate()?;
        Ok(coordinate)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Largest of the latitude and longitude spreads, in degrees
    pub fn max_spread(&self) -> f64 {
        (self.max_lat - self.min_lat).max(self.max_lon - self.min_lon)
    }
}

/// Ordered samples of one metric on a shared time grid (usually 24 hourly buckets)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries(Vec<f64>);

impl TimeSeries {
    pub const HOURS_PER_DAY: usize = 24;

    pub fn new(samples: Vec<f64>) -> Self {
        Self(samples)
    }

    pub fn samples(&self) -> &[f64] {
        &self.0
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Element-wise sum of several aligned series
    pub fn sum_aligned<'a, I>(series: I) -> CalcResult<Self>
    where
        I: IntoIterator<Item = &'a TimeSeries>,
    {
        let mut acc: Option<Vec<f64>> = None;

        for s in series {
            match acc.as_mut() {
                None => acc = Some(s.0.clone()),
                Some(values) => {
                    if values.len() != s.len() {
                        return Err(CalcError::InvalidInput(format!(
                            "cannot sum series of length {} and {}",
                            values.len(),
                            s.len()
                        )));
                    }
                    for (v, x) in values.iter_mut().zip(s.iter()) {
                        *v += x;
                    }
                }
            }
        }

        acc.map(Self).ok_or(CalcError::EmptyInput("no series to sum"))
    }
}

impl Deref for TimeSeries {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for TimeSeries {
    fn from(samples: Vec<f64>) -> Self {
        Self(samples)
    }
}

/// Renewable energy source of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergySource {
    Wind,
    Solar,
}

/// Where an installation sits relative to the customer's meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallationType {
    BehindTheMeter,
    FrontOfTheMeter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Operational,
    UnderConstruction,
    Maintenance,
    Planned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    Pending,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingStatus {
    Paid,
    Pending,
    Overdue,
}

/// Anything carrying an energy volume that can be bucketed by category
pub trait EnergyRecord {
    fn volume(&self) -> f64;
}

/// Production asset in the portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyAsset {
    pub id: Uuid,
    pub name: String,
    pub source: EnergySource,
    #[serde(rename = "installationType")]
    pub installation_type: InstallationType,
    pub status: AssetStatus,
    #[serde(rename = "capacityMw")]
    pub capacity_mw: f64,
    pub location: Coordinate,
    #[serde(rename = "productionProfile", default)]
    pub production_profile: TimeSeries,
}

impl EnergyRecord for EnergyAsset {
    fn volume(&self) -> f64 {
        self.capacity_mw
    }
}

/// Offtaker holding a GO allocation from the portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub status: CustomerStatus,
    #[serde(rename = "allocatedVolumeMwh")]
    pub allocated_volume_mwh: f64,
    pub location: Coordinate,
    #[serde(rename = "consumptionProfile", default)]
    pub consumption_profile: TimeSeries,
}

impl EnergyRecord for Customer {
    fn volume(&self) -> f64 {
        self.allocated_volume_mwh
    }
}

/// Billing inputs for one customer and period
///
/// Only inputs are stored. Fee amounts are derived on demand through
/// `BillingRecord::fees`, so they can never drift from the inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    #[serde(rename = "customerId")]
    pub customer_id: Uuid,
    pub period: chrono::NaiveDate,
    #[serde(rename = "issuedUnits")]
    pub issued_units: f64,
    #[serde(rename = "goRate")]
    pub go_rate: f64,
    #[serde(rename = "registrationFeeRate")]
    pub registration_fee_rate: f64,
    pub status: BillingStatus,
}

/// Per-unit billing rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BillingRates {
    #[serde(rename = "goRate")]
    pub go_rate: f64,
    #[serde(rename = "registrationFeeRate")]
    pub registration_fee_rate: f64,
}

impl Default for BillingRates {
    fn default() -> Self {
        Self {
            go_rate: 20.0,
            registration_fee_rate: 5.0,
        }
    }
}

/// Fee amounts derived from issued units and rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    #[serde(rename = "goFeeAmount")]
    pub go_fee_amount: f64,
    #[serde(rename = "registrationFeeAmount")]
    pub registration_fee_amount: f64,
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
}

/// What to do when a series has no energy at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroVariancePolicy {
    /// Propagate `CalcError::DivisionByZero`
    #[default]
    Error,
    /// Report a score of 0
    Zero,
}
