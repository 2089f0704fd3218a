//! Financial model — pure projection formulas.
//!
//! RULE: Nothing in here touches engine state. Every function is a
//! referentially transparent function of its arguments, so the UI can
//! call them freely for "what-if" previews.
//!
//! Projections use an annuity-due: each month's contribution is paid at
//! the start of the month and earns that month's return.

use crate::{
    allocation::AllocationProfile,
    error::{ForgeError, ForgeResult},
    types::{Month, Rupees},
};
use serde::{Deserialize, Serialize};

/// Baseline annual return used for every corpus projection.
pub const BASELINE_ANNUAL_RETURN: f64 = 0.10;

/// Baseline monthly return (annual / 12, no geometric conversion).
pub const BASELINE_MONTHLY_RETURN: f64 = BASELINE_ANNUAL_RETURN / 12.0;

/// Retirement target is this many years of annual expenses.
pub const EXPENSE_MULTIPLE: f64 = 25.0;

/// Future value of `months` contributions at the baseline monthly return.
pub fn projected_corpus(contribution: Rupees, months: Month) -> ForgeResult<Rupees> {
    projected_corpus_at_rate(contribution, months, BASELINE_MONTHLY_RETURN)
}

/// Future value of an annuity-due at an arbitrary monthly rate.
pub fn projected_corpus_at_rate(
    contribution: Rupees,
    months:       Month,
    monthly_rate: f64,
) -> ForgeResult<Rupees> {
    if !contribution.is_finite() || contribution < 0.0 {
        return Err(ForgeError::invalid("contribution", contribution));
    }
    if !monthly_rate.is_finite() || monthly_rate < 0.0 {
        return Err(ForgeError::invalid("monthly_rate", monthly_rate));
    }

    // Zero rate collapses the closed form to 0/0.
    if monthly_rate == 0.0 {
        return Ok(contribution * f64::from(months));
    }

    let r = monthly_rate;
    let growth = (1.0 + r).powf(f64::from(months));
    Ok(contribution * ((growth - 1.0) / r) * (1.0 + r))
}

/// Corpus needed to retire: 25 years of annual expenses.
pub fn target_corpus(monthly_expenses: Rupees) -> Rupees {
    monthly_expenses * 12.0 * EXPENSE_MULTIPLE
}

/// Age at which the projected corpus first covers the retirement target.
///
/// Searches month by month up to `horizon_months`. If the target is never
/// reached the result saturates at the age the horizon ends.
pub fn retirement_age(
    contribution:     Rupees,
    monthly_expenses: Rupees,
    current_age:      u32,
    horizon_months:   Month,
) -> ForgeResult<u32> {
    if !monthly_expenses.is_finite() || monthly_expenses < 0.0 {
        return Err(ForgeError::invalid("monthly_expenses", monthly_expenses));
    }
    let target = target_corpus(monthly_expenses);

    for month in 1..=horizon_months {
        if projected_corpus(contribution, month)? >= target {
            return Ok(current_age + month.div_ceil(12));
        }
    }

    // Validates `contribution` even when the horizon is empty.
    projected_corpus(contribution, 0)?;
    Ok(current_age + horizon_months.div_ceil(12))
}

/// Expected annual return of each allocation sleeve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleeveReturns {
    pub equity:    f64,
    pub corporate: f64,
    pub govt:      f64,
}

impl Default for SleeveReturns {
    fn default() -> Self {
        Self {
            equity:    0.12,
            corporate: 0.09,
            govt:      0.075,
        }
    }
}

/// Weighted expected return of an allocation, as a fraction.
///
/// Does not require the sleeves to sum to 100; normalization is the
/// caller's job when an allocation is stored.
pub fn blended_return(allocation: &AllocationProfile) -> f64 {
    blended_return_with(allocation, &SleeveReturns::default())
}

pub fn blended_return_with(allocation: &AllocationProfile, returns: &SleeveReturns) -> f64 {
    (f64::from(allocation.equity) * returns.equity
        + f64::from(allocation.corporate) * returns.corporate
        + f64::from(allocation.govt) * returns.govt)
        / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_is_simple_sum() {
        let fv = projected_corpus_at_rate(1_000.0, 12, 0.0).unwrap();
        assert_eq!(fv, 12_000.0);
    }

    #[test]
    fn single_month_earns_one_month_of_return() {
        let fv = projected_corpus(1_200.0, 1).unwrap();
        let expected = 1_200.0 * (1.0 + BASELINE_MONTHLY_RETURN);
        assert!((fv - expected).abs() < 1e-9, "fv={fv} expected={expected}");
    }

    #[test]
    fn negative_rate_rejected() {
        assert!(projected_corpus_at_rate(1_000.0, 12, -0.01).is_err());
    }

    #[test]
    fn target_is_twenty_five_years_of_expenses() {
        assert_eq!(target_corpus(40_000.0), 12_000_000.0);
    }
}
