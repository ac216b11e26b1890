use crate::core::aggregation::aggregate_values;
use crate::error::CalcResult;
use crate::models::{
    BillingRates, BillingRecord, BillingStatement, BillingStatus, BillingSummary, FeeBreakdown,
};

/// Fee amounts for a number of issued GOs
///
/// Plain multiplication and addition. Currency rounding belongs to whoever
/// displays the amounts.
#[inline]
pub fn compute_fees(issued_units: f64, go_rate: f64, registration_fee_rate: f64) -> FeeBreakdown {
    let go_fee_amount = issued_units * go_rate;
    let registration_fee_amount = issued_units * registration_fee_rate;

    FeeBreakdown {
        go_fee_amount,
        registration_fee_amount,
        total_amount: go_fee_amount + registration_fee_amount,
    }
}

impl BillingRecord {
    /// Build a record priced at the given rates
    pub fn priced(
        customer_id: uuid::Uuid,
        period: chrono::NaiveDate,
        issued_units: f64,
        rates: BillingRates,
        status: BillingStatus,
    ) -> Self {
        Self {
            customer_id,
            period,
            issued_units,
            go_rate: rates.go_rate,
            registration_fee_rate: rates.registration_fee_rate,
            status,
        }
    }

    /// Fees derived from this record's inputs
    pub fn fees(&self) -> FeeBreakdown {
        compute_fees(self.issued_units, self.go_rate, self.registration_fee_rate)
    }

    pub fn statement(&self) -> BillingStatement {
        BillingStatement {
            record: self.clone(),
            fees: self.fees(),
        }
    }
}

/// Totals across billing records, with amounts split by billing status
pub fn summarize_billing(records: &[BillingRecord]) -> CalcResult<BillingSummary> {
    let mut summary = BillingSummary {
        total_issued_units: 0.0,
        total_go_fees: 0.0,
        total_registration_fees: 0.0,
        total_amount: 0.0,
        amount_by_status: aggregate_values(records, |r| r.fees().total_amount, |r| r.status)?,
    };

    for record in records {
        let fees = record.fees();
        summary.total_issued_units += record.issued_units;
        summary.total_go_fees += fees.go_fee_amount;
        summary.total_registration_fees += fees.registration_fee_amount;
        summary.total_amount += fees.total_amount;
    }

    tracing::debug!(
        "Summarized {} billing records, total amount {:.2}",
        records.len(),
        summary.total_amount
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn record(issued: f64, status: BillingStatus) -> BillingRecord {
        BillingRecord::priced(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            issued,
            BillingRates::default(),
            status,
        )
    }

    #[test]
    fn test_compute_fees() {
        let fees = compute_fees(25000.0, 20.0, 5.0);

        assert_eq!(fees.go_fee_amount, 500000.0);
        assert_eq!(fees.registration_fee_amount, 125000.0);
        assert_eq!(fees.total_amount, 625000.0);
    }

    #[test]
    fn test_fees_follow_inputs() {
        let mut r = record(100.0, BillingStatus::Pending);
        assert_eq!(r.fees().total_amount, 2500.0);

        r.issued_units = 200.0;
        assert_eq!(r.fees().total_amount, 5000.0);
    }

    #[test]
    fn test_statement_serializes_derived_fees() {
        let r = record(10.0, BillingStatus::Paid);
        let json = serde_json::to_value(r.statement()).unwrap();

        assert_eq!(json["issuedUnits"], 10.0);
        assert_eq!(json["goFeeAmount"], 200.0);
        assert_eq!(json["totalAmount"], 250.0);
        assert_eq!(json["status"], "paid");
    }

    #[test]
    fn test_summarize_billing() {
        let records = vec![
            record(100.0, BillingStatus::Paid),
            record(300.0, BillingStatus::Overdue),
            record(100.0, BillingStatus::Paid),
        ];

        let summary = summarize_billing(&records).unwrap();

        assert_eq!(summary.total_issued_units, 500.0);
        assert_eq!(summary.total_go_fees, 10000.0);
        assert_eq!(summary.total_registration_fees, 2500.0);
        assert_eq!(summary.total_amount, 12500.0);
        assert_eq!(summary.amount_by_status.len(), 2);
        assert_eq!(summary.amount_by_status.get(&BillingStatus::Paid).unwrap().percent_of_total, 40.0);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize_billing(&[]).unwrap();
        assert_eq!(summary.total_amount, 0.0);
        assert!(summary.amount_by_status.is_empty());
    }
}
