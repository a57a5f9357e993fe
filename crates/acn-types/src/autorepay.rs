//! Auto-repayment configuration
//!
//! Two flavours exist: an earnings hook that diverts a percentage of an
//! agent's income to repayment, and a balance rule that repays once a wallet
//! balance crosses a threshold while keeping a floor.

use crate::{AcnError, LoanId, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest share of earnings that may be diverted
pub const MIN_AUTO_REPAY_PERCENTAGE: u8 = 10;

/// Largest share of earnings that may be diverted
pub const MAX_AUTO_REPAY_PERCENTAGE: u8 = 100;

/// Where an agent's earnings come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarningsSource {
    Openwork,
    Simmer,
    Clanker,
    Skills,
}

impl fmt::Display for EarningsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Openwork => write!(f, "openwork"),
            Self::Simmer => write!(f, "simmer"),
            Self::Clanker => write!(f, "clanker"),
            Self::Skills => write!(f, "skills"),
        }
    }
}

impl std::str::FromStr for EarningsSource {
    type Err = AcnError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "openwork" => Ok(Self::Openwork),
            "simmer" => Ok(Self::Simmer),
            "clanker" => Ok(Self::Clanker),
            "skills" => Ok(Self::Skills),
            other => Err(AcnError::invalid_input(
                "source",
                format!("unknown earnings source '{}'", other),
            )),
        }
    }
}

/// Earnings hook for one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoRepayConfig {
    pub agent: String,
    pub source: EarningsSource,
    pub percentage: u8,
    pub enabled: bool,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

impl AutoRepayConfig {
    pub fn new(agent: impl Into<String>, source: EarningsSource, percentage: u8) -> Result<Self> {
        if !(MIN_AUTO_REPAY_PERCENTAGE..=MAX_AUTO_REPAY_PERCENTAGE).contains(&percentage) {
            return Err(AcnError::invalid_input(
                "percentage",
                format!(
                    "must be between {} and {}",
                    MIN_AUTO_REPAY_PERCENTAGE, MAX_AUTO_REPAY_PERCENTAGE
                ),
            ));
        }
        Ok(Self {
            agent: agent.into(),
            source,
            percentage,
            enabled: true,
            created_at: Utc::now(),
        })
    }

    /// Portion of an earnings payout routed to repayment
    pub fn share_of(&self, earnings: f64) -> f64 {
        if !self.enabled || earnings <= 0.0 {
            return 0.0;
        }
        earnings * f64::from(self.percentage) / 100.0
    }
}

/// Balance-triggered repayment for one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoRepayRule {
    pub loan_id: LoanId,
    /// Trigger once the balance exceeds this
    pub threshold: f64,
    /// Balance left untouched after repaying
    pub min_balance: f64,
}

impl AutoRepayRule {
    /// How much to repay given the current balance and the amount due.
    ///
    /// `None` when the balance has not crossed the threshold or nothing can
    /// be spared above the floor.
    pub fn repayment_from_balance(&self, balance: f64, due: f64) -> Option<f64> {
        if balance <= self.threshold || due <= 0.0 {
            return None;
        }
        let spare = balance - self.min_balance;
        if spare <= 0.0 {
            return None;
        }
        Some(spare.min(due))
    }
}
