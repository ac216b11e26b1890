use crate::error::{CalcError, CalcResult};
use crate::models::ZeroVariancePolicy;

/// Calculate the temporal matching score (0-100) of consumption against production
///
/// Scoring formula:
/// correlation = (c · p) / (|c| * |p|)
/// score = round((correlation + 1) / 2 * 100)
///
/// A correlation of -1 maps to 0 and a perfect correlation maps to 100.
/// Each series is scaled by its largest magnitude first, which leaves the
/// correlation unchanged and keeps the sums finite for any finite input.
pub fn compute_matching_score(consumption: &[f64], production: &[f64]) -> CalcResult<u8> {
    check_aligned(consumption, production)?;

    let scale_consumption = max_magnitude(consumption);
    let scale_production = max_magnitude(production);
    if scale_consumption == 0.0 || scale_production == 0.0 {
        return Err(CalcError::DivisionByZero("matching score of an all-zero series"));
    }

    let mut dot = 0.0_f64;
    let mut sum_sq_consumption = 0.0_f64;
    let mut sum_sq_production = 0.0_f64;

    for (c, p) in consumption.iter().zip(production) {
        let c = c / scale_consumption;
        let p = p / scale_production;
        dot += c * p;
        sum_sq_consumption += c * c;
        sum_sq_production += p * p;
    }

    // Both sums hold at least one unit term after scaling
    let denominator = sum_sq_consumption.sqrt() * sum_sq_production.sqrt();

    let correlation = dot / denominator;
    let score = ((correlation + 1.0) / 2.0 * 100.0).round();

    Ok(score.clamp(0.0, 100.0) as u8)
}

/// Matched volume per bucket: the smaller of consumption and production
pub fn hourly_overlap(consumption: &[f64], production: &[f64]) -> CalcResult<Vec<f64>> {
    check_aligned(consumption, production)?;

    Ok(consumption
        .iter()
        .zip(production)
        .map(|(c, p)| c.min(*p).max(0.0))
        .collect())
}

/// Share of consumption covered by production in the same bucket, in percent
pub fn coverage_percent(consumption: &[f64], production: &[f64]) -> CalcResult<f64> {
    let matched: f64 = hourly_overlap(consumption, production)?.iter().sum();
    let consumed: f64 = consumption.iter().sum();

    if consumed <= 0.0 {
        return Err(CalcError::DivisionByZero("coverage of zero consumption"));
    }

    Ok(matched / consumed * 100.0)
}

#[inline]
fn max_magnitude(series: &[f64]) -> f64 {
    series.iter().fold(0.0_f64, |max, v| max.max(v.abs()))
}

fn check_aligned(consumption: &[f64], production: &[f64]) -> CalcResult<()> {
    if consumption.is_empty() || production.is_empty() {
        return Err(CalcError::InvalidInput("matching requires non-empty series".to_string()));
    }

    if consumption.len() != production.len() {
        return Err(CalcError::InvalidInput(format!(
            "series lengths differ: consumption has {}, production has {}",
            consumption.len(),
            production.len()
        )));
    }

    if consumption.iter().chain(production).any(|v| !v.is_finite()) {
        return Err(CalcError::InvalidInput("series contains a non-finite sample".to_string()));
    }

    Ok(())
}

/// Matching score calculator with a configured policy for all-zero series
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingScoreCalculator {
    policy: ZeroVariancePolicy,
}

impl MatchingScoreCalculator {
    pub fn new(policy: ZeroVariancePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ZeroVariancePolicy {
        self.policy
    }

    /// Score two series, applying the zero-variance policy
    ///
    /// Length mismatches and empty series are always errors.
    pub fn score(&self, consumption: &[f64], production: &[f64]) -> CalcResult<u8> {
        match compute_matching_score(consumption, production) {
            Err(CalcError::DivisionByZero(reason)) if self.policy == ZeroVariancePolicy::Zero => {
                tracing::debug!("Matching score defaulted to 0: {}", reason);
                Ok(0)
            }
            other => other,
        }
    }

    /// Coverage in percent, applying the same policy to zero consumption
    pub fn coverage(&self, consumption: &[f64], production: &[f64]) -> CalcResult<f64> {
        match coverage_percent(consumption, production) {
            Err(CalcError::DivisionByZero(reason)) if self.policy == ZeroVariancePolicy::Zero => {
                tracing::debug!("Coverage defaulted to 0: {}", reason);
                Ok(0.0)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLAR: [f64; 6] = [0.0, 1.0, 4.0, 6.0, 3.0, 0.5];

    #[test]
    fn test_identical_series_score_100() {
        assert_eq!(compute_matching_score(&SOLAR, &SOLAR).unwrap(), 100);
    }

    #[test]
    fn test_negated_series_score_0() {
        let negated: Vec<f64> = SOLAR.iter().map(|v| -v).collect();
        assert_eq!(compute_matching_score(&SOLAR, &negated).unwrap(), 0);
    }

    #[test]
    fn test_orthogonal_series_score_50() {
        let day = [1.0, 1.0, 0.0, 0.0];
        let night = [0.0, 0.0, 1.0, 1.0];
        assert_eq!(compute_matching_score(&day, &night).unwrap(), 50);
    }

    #[test]
    fn test_scaled_series_still_100() {
        let scaled: Vec<f64> = SOLAR.iter().map(|v| v * 12.5).collect();
        assert_eq!(compute_matching_score(&SOLAR, &scaled).unwrap(), 100);
    }

    #[test]
    fn test_extreme_magnitudes() {
        let huge = [1e200, 2e200, 3e200];
        let tiny = [1e-200, 2e-200, 3e-200];

        assert_eq!(compute_matching_score(&huge, &huge).unwrap(), 100);
        assert_eq!(compute_matching_score(&tiny, &tiny).unwrap(), 100);
        assert_eq!(compute_matching_score(&huge, &tiny).unwrap(), 100);

        let negated: Vec<f64> = huge.iter().map(|v| -v).collect();
        assert_eq!(compute_matching_score(&huge, &negated).unwrap(), 0);

        let night = [3e-300, 0.0, 0.0];
        assert_eq!(compute_matching_score(&[0.0, f64::MAX, 0.0], &night).unwrap(), 50);
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let result = compute_matching_score(&[1.0, 2.0], &[1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(CalcError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_is_error() {
        assert!(matches!(compute_matching_score(&[], &[]), Err(CalcError::InvalidInput(_))));
    }

    #[test]
    fn test_all_zero_series() {
        let zeros = [0.0; 6];
        assert!(matches!(
            compute_matching_score(&zeros, &SOLAR),
            Err(CalcError::DivisionByZero(_))
        ));

        let lenient = MatchingScoreCalculator::new(ZeroVariancePolicy::Zero);
        assert_eq!(lenient.score(&zeros, &SOLAR).unwrap(), 0);

        let strict = MatchingScoreCalculator::default();
        assert!(strict.score(&zeros, &SOLAR).is_err());
    }

    #[test]
    fn test_lenient_policy_keeps_length_errors() {
        let lenient = MatchingScoreCalculator::new(ZeroVariancePolicy::Zero);
        assert!(matches!(
            lenient.score(&[0.0], &[0.0, 0.0]),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_finite_is_error() {
        let result = compute_matching_score(&[1.0, f64::NAN], &[1.0, 2.0]);
        assert!(matches!(result, Err(CalcError::InvalidInput(_))));
    }

    #[test]
    fn test_coverage() {
        let consumption = [2.0, 2.0, 2.0, 2.0];
        let production = [0.0, 1.0, 4.0, 2.0];

        assert_eq!(hourly_overlap(&consumption, &production).unwrap(), vec![0.0, 1.0, 2.0, 2.0]);
        assert_eq!(coverage_percent(&consumption, &production).unwrap(), 62.5);
        assert!(matches!(
            coverage_percent(&[0.0, 0.0], &[1.0, 1.0]),
            Err(CalcError::DivisionByZero(_))
        ));
    }
}
