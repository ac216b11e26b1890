use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{CalcError, CalcResult};
use crate::models::{
    AssetStatus, CategoryShare, Customer, CustomerStatus, Distribution, EnergyAsset,
    EnergyRecord, EnergySource, InstallationType,
};

/// Group records by category and sum their volumes
///
/// Buckets keep the order in which their category was first seen. Each
/// bucket's `percent_of_total` is its share of the grand total; a zero total
/// gives 0% everywhere.
pub fn aggregate_by_category<R, K, F>(records: &[R], categorize: F) -> CalcResult<Distribution<K>>
where
    R: EnergyRecord,
    K: Eq + Hash + Clone,
    F: Fn(&R) -> K,
{
    aggregate_values(records, |r| r.volume(), categorize)
}

/// General form of [`aggregate_by_category`] with an explicit value accessor
pub fn aggregate_values<T, K, V, F>(items: &[T], value: V, categorize: F) -> CalcResult<Distribution<K>>
where
    K: Eq + Hash + Clone,
    V: Fn(&T) -> f64,
    F: Fn(&T) -> K,
{
    let mut buckets: Vec<CategoryShare<K>> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for item in items {
        let amount = value(item);
        if !amount.is_finite() || amount < 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "aggregated value must be finite and non-negative, got {}",
                amount
            )));
        }

        let key = categorize(item);
        match index.get(&key) {
            Some(&i) => buckets[i].sum += amount,
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push(CategoryShare {
                    category: key,
                    sum: amount,
                    percent_of_total: 0.0,
                });
            }
        }
    }

    let total: f64 = buckets.iter().map(|b| b.sum).sum();
    if !total.is_finite() {
        return Err(CalcError::InvalidInput(format!(
            "aggregated total overflowed: {}",
            total
        )));
    }

    if total > 0.0 {
        for bucket in &mut buckets {
            bucket.percent_of_total = bucket.sum / total * 100.0;
        }
    }

    Ok(Distribution { buckets, total })
}

/// Capacity split between wind and solar
pub fn by_energy_source(assets: &[EnergyAsset]) -> CalcResult<Distribution<EnergySource>> {
    aggregate_by_category(assets, |a| a.source)
}

/// Capacity split between behind-the-meter and front-of-the-meter
pub fn by_installation_type(assets: &[EnergyAsset]) -> CalcResult<Distribution<InstallationType>> {
    aggregate_by_category(assets, |a| a.installation_type)
}

pub fn by_asset_status(assets: &[EnergyAsset]) -> CalcResult<Distribution<AssetStatus>> {
    aggregate_by_category(assets, |a| a.status)
}

/// Allocated volume by customer status
pub fn by_customer_status(customers: &[Customer]) -> CalcResult<Distribution<CustomerStatus>> {
    aggregate_by_category(customers, |c| c.status)
}
