//! Offline calculators

use acn_types::{
    flash_loan_fee, insurance_premium, referral_reward, risk_adjusted_rate, ReturnsQuote,
    FLASH_LOAN_FEE_RATE, INSURANCE_PREMIUM_RATE, MAX_RISK_PREMIUM, REFERRAL_REWARD_RATE,
    RISK_SCORE_SCALE,
};

use crate::display;

pub fn returns(amount: f64, rate: f64, duration_days: u32) -> anyhow::Result<()> {
    if amount <= 0.0 || rate < 0.0 || duration_days == 0 {
        anyhow::bail!("amount and duration must be positive and rate must not be negative");
    }
    let quote = ReturnsQuote::calculate(amount, rate, duration_days);
    display::section("Lender returns");
    display::kv("Principal", &display::money(quote.amount));
    display::kv("Rate", &format!("{}% APR", quote.rate));
    display::kv("Duration", &format!("{} days", quote.duration_days));
    display::kv("Interest", &display::money(quote.interest));
    display::kv("Total return", &display::money(quote.total_return));
    display::kv("Term yield", &format!("{:.4}%", quote.term_yield_pct));
    Ok(())
}

pub fn insurance(coverage: f64) -> anyhow::Result<()> {
    if coverage <= 0.0 {
        anyhow::bail!("coverage must be positive");
    }
    display::section("Default insurance");
    display::kv("Coverage", &display::money(coverage));
    display::kv(
        "Premium",
        &format!(
            "{} ({}%)",
            display::money(insurance_premium(coverage)),
            INSURANCE_PREMIUM_RATE * 100.0
        ),
    );
    Ok(())
}

pub fn flash_fee(amount: f64) -> anyhow::Result<()> {
    if amount <= 0.0 {
        anyhow::bail!("amount must be positive");
    }
    display::section("Flash loan");
    display::kv("Amount", &display::money(amount));
    display::kv(
        "Fee",
        &format!(
            "{} ({}%)",
            display::money(flash_loan_fee(amount)),
            FLASH_LOAN_FEE_RATE * 100.0
        ),
    );
    Ok(())
}

pub fn referral(loan_amount: f64) -> anyhow::Result<()> {
    if loan_amount <= 0.0 {
        anyhow::bail!("loan amount must be positive");
    }
    display::section("Referral reward");
    display::kv("Loan", &display::money(loan_amount));
    display::kv(
        "Reward",
        &format!(
            "{} ({}%)",
            display::money(referral_reward(loan_amount)),
            REFERRAL_REWARD_RATE * 100.0
        ),
    );
    Ok(())
}

/// Base rate plus up to the maximum risk premium, scaled by risk score
pub fn risk_rate(base_rate: f64, risk_score: u32) -> anyhow::Result<()> {
    if base_rate < 0.0 {
        anyhow::bail!("base rate must not be negative");
    }
    if risk_score > RISK_SCORE_SCALE {
        display::warning(&format!("Risk score capped at {}", RISK_SCORE_SCALE));
    }
    display::section("Risk-adjusted rate");
    display::kv("Base rate", &format!("{}% APR", base_rate));
    display::kv("Risk score", &format!("{}/{}", risk_score.min(RISK_SCORE_SCALE), RISK_SCORE_SCALE));
    display::kv("Max premium", &format!("{}%", MAX_RISK_PREMIUM));
    display::kv(
        "Adjusted rate",
        &format!("{:.4}% APR", risk_adjusted_rate(base_rate, risk_score)),
    );
    Ok(())
}
