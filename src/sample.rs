//! Deterministic demo portfolio
//!
//! The dashboard runs on mock data. These fixtures mirror it: a handful of
//! Danish wind and solar parks, a few offtakers, and one quarter of billing.

use chrono::NaiveDate;
use std::f64::consts::PI;
use uuid::Uuid;

use crate::models::{
    AssetStatus, BillingRates, BillingRecord, BillingStatus, Coordinate, Customer,
    CustomerStatus, EnergyAsset, EnergySource, InstallationType, TimeSeries,
};

const ASSETS: &[(&str, EnergySource, InstallationType, AssetStatus, f64, f64, f64)] = &[
    ("Horns Rev Onshore", EnergySource::Wind, InstallationType::FrontOfTheMeter, AssetStatus::Operational, 48.0, 55.5290, 8.1527),
    ("Rødsand Coast", EnergySource::Wind, InstallationType::FrontOfTheMeter, AssetStatus::Operational, 36.0, 54.5590, 11.5310),
    ("Vestas Test Site", EnergySource::Wind, InstallationType::BehindTheMeter, AssetStatus::Maintenance, 12.0, 56.2631, 8.3520),
    ("Fyn Solar Park", EnergySource::Solar, InstallationType::FrontOfTheMeter, AssetStatus::Operational, 25.0, 55.4038, 10.4024),
    ("Aarhus Rooftops", EnergySource::Solar, InstallationType::BehindTheMeter, AssetStatus::Operational, 4.5, 56.1629, 10.2039),
    ("Lolland Solar", EnergySource::Solar, InstallationType::FrontOfTheMeter, AssetStatus::UnderConstruction, 18.0, 54.7700, 11.4800),
];

const CUSTOMERS: &[(&str, CustomerStatus, f64, f64, f64, LoadShape)] = &[
    ("Nordic Data Center", CustomerStatus::Active, 52_000.0, 55.6761, 12.5683, LoadShape::Flat),
    ("Jutland Dairy Co-op", CustomerStatus::Active, 18_500.0, 56.4600, 9.4000, LoadShape::Daytime),
    ("Odense Retail Group", CustomerStatus::Pending, 9_800.0, 55.4038, 10.4024, LoadShape::Daytime),
    ("Harbour Cold Storage", CustomerStatus::Active, 14_200.0, 57.0488, 9.9217, LoadShape::Night),
    ("Aalborg Municipality", CustomerStatus::Inactive, 6_000.0, 57.0480, 9.9190, LoadShape::Flat),
];

#[derive(Debug, Clone, Copy)]
enum LoadShape {
    Flat,
    Daytime,
    Night,
}

fn uuid_for(kind: u128, index: usize) -> Uuid {
    Uuid::from_u128((kind << 64) | index as u128)
}

/// Hourly solar output: zero at night, sine-shaped between 06:00 and 18:00
pub fn solar_profile(capacity_mw: f64) -> TimeSeries {
    (0..TimeSeries::HOURS_PER_DAY)
        .map(|h| {
            let x = (h as f64 - 6.0) / 12.0;
            if (0.0..=1.0).contains(&x) {
                capacity_mw * 0.8 * (PI * x).sin()
            } else {
                0.0
            }
        })
        .collect::<Vec<_>>()
        .into()
}

/// Hourly wind output: steady base with a smooth day/night swing
pub fn wind_profile(capacity_mw: f64, phase: f64) -> TimeSeries {
    (0..TimeSeries::HOURS_PER_DAY)
        .map(|h| {
            let angle = 2.0 * PI * h as f64 / TimeSeries::HOURS_PER_DAY as f64 + phase;
            capacity_mw * (0.35 + 0.15 * angle.cos())
        })
        .collect::<Vec<_>>()
        .into()
}

fn load_profile(annual_mwh: f64, shape: LoadShape) -> TimeSeries {
    let hourly_mean = annual_mwh / 8760.0;

    (0..TimeSeries::HOURS_PER_DAY)
        .map(|h| {
            let daytime = (7..19).contains(&h);
            let factor = match shape {
                LoadShape::Flat => 1.0,
                LoadShape::Daytime if daytime => 1.6,
                LoadShape::Daytime => 0.4,
                LoadShape::Night if daytime => 0.6,
                LoadShape::Night => 1.4,
            };
            hourly_mean * factor
        })
        .collect::<Vec<_>>()
        .into()
}

/// Demo assets and customers
pub fn portfolio() -> (Vec<EnergyAsset>, Vec<Customer>) {
    let assets = ASSETS
        .iter()
        .enumerate()
        .map(|(i, &(name, source, installation_type, status, capacity_mw, lat, lon))| {
            let production_profile = match source {
                EnergySource::Solar => solar_profile(capacity_mw),
                EnergySource::Wind => wind_profile(capacity_mw, i as f64),
            };

            EnergyAsset {
                id: uuid_for(1, i),
                name: name.to_string(),
                source,
                installation_type,
                status,
                capacity_mw,
                location: Coordinate { latitude: lat, longitude: lon },
                production_profile,
            }
        })
        .collect();

    let customers = CUSTOMERS
        .iter()
        .enumerate()
        .map(|(i, &(name, status, volume, lat, lon, shape))| Customer {
            id: uuid_for(2, i),
            name: name.to_string(),
            status,
            allocated_volume_mwh: volume,
            location: Coordinate { latitude: lat, longitude: lon },
            consumption_profile: load_profile(volume, shape),
        })
        .collect();

    (assets, customers)
}

/// One quarter of monthly billing for the demo customers
pub fn billing_records(rates: BillingRates) -> Vec<BillingRecord> {
    let mut records = Vec::new();

    for month in 1..=3u32 {
        let Some(period) = NaiveDate::from_ymd_opt(2024, month, 1) else {
            continue;
        };

        for (i, &(_, _, volume, _, _, _)) in CUSTOMERS.iter().enumerate() {
            let status = match (month, i % 3) {
                (3, 0) => BillingStatus::Pending,
                (3, _) | (2, 2) => BillingStatus::Overdue,
                _ => BillingStatus::Paid,
            };

            records.push(BillingRecord::priced(
                uuid_for(2, i),
                period,
                (volume / 12.0).round(),
                rates,
                status,
            ));
        }
    }

    records
}
