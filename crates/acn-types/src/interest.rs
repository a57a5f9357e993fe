//! Interest and fee arithmetic
//!
//! All rates are expressed in percent. Interest is simple (non-compounding)
//! on a 365-day year; values are `f64` and compared with a tolerance.

use crate::DAYS_PER_YEAR;
use serde::{Deserialize, Serialize};

/// Insurance premium as a fraction of coverage (0.5%)
pub const INSURANCE_PREMIUM_RATE: f64 = 0.005;

/// Flash loan fee as a fraction of principal (0.09%)
pub const FLASH_LOAN_FEE_RATE: f64 = 0.0009;

/// Referral reward as a fraction of the referred loan (0.1%)
pub const REFERRAL_REWARD_RATE: f64 = 0.001;

/// Largest risk premium added to a base rate, in percentage points
pub const MAX_RISK_PREMIUM: f64 = 5.0;

/// Upper bound of the risk score scale
pub const RISK_SCORE_SCALE: u32 = 10_000;

/// `principal × rate/100 × days/365`
pub fn simple_interest(principal: f64, rate_pct: f64, duration_days: u32) -> f64 {
    principal * (rate_pct / 100.0) * (f64::from(duration_days) / DAYS_PER_YEAR)
}

/// Principal plus simple interest
pub fn total_due(principal: f64, rate_pct: f64, duration_days: u32) -> f64 {
    principal + simple_interest(principal, rate_pct, duration_days)
}

/// Premium for insuring `coverage` against default
pub fn insurance_premium(coverage: f64) -> f64 {
    coverage * INSURANCE_PREMIUM_RATE
}

/// Fee charged on a same-transaction flash loan
pub fn flash_loan_fee(amount: f64) -> f64 {
    amount * FLASH_LOAN_FEE_RATE
}

/// Reward paid to the referrer of a loan
pub fn referral_reward(loan_amount: f64) -> f64 {
    loan_amount * REFERRAL_REWARD_RATE
}

/// Base rate plus a premium proportional to the risk score (0..=10000)
pub fn risk_adjusted_rate(base_rate_pct: f64, risk_score: u32) -> f64 {
    let risk = risk_score.min(RISK_SCORE_SCALE) as f64 / RISK_SCORE_SCALE as f64;
    base_rate_pct + risk * MAX_RISK_PREMIUM
}

/// Lender-side projection for a loan at a given rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnsQuote {
    pub amount: f64,
    pub rate: f64,
    pub duration_days: u32,
    pub interest: f64,
    pub total_return: f64,
    /// Interest as a percentage of principal over the term
    pub term_yield_pct: f64,
}

impl ReturnsQuote {
    pub fn calculate(amount: f64, rate: f64, duration_days: u32) -> Self {
        let interest = simple_interest(amount, rate, duration_days);
        let term_yield_pct = if amount > 0.0 {
            interest / amount * 100.0
        } else {
            0.0
        };
        Self {
            amount,
            rate,
            duration_days,
            interest,
            total_return: amount + interest,
            term_yield_pct,
        }
    }
}
