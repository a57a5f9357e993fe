//! Credit scores and tiers
//!
//! Scores live in `[MIN_SCORE, MAX_SCORE]`. The tier is a step function of
//! the score and fixes the largest loan an agent may request.

use crate::LoanId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest possible score
pub const MIN_SCORE: u32 = 300;

/// Highest possible score
pub const MAX_SCORE: u32 = 850;

/// Score assigned to an agent on first contact
pub const INITIAL_SCORE: u32 = 400;

/// Points gained for a repaid loan
pub const REPAYMENT_BONUS: u32 = 10;

/// Points lost for a defaulted loan
pub const DEFAULT_PENALTY: u32 = 50;

/// Credit tier bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CreditTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl CreditTier {
    /// Map a score onto its tier (thresholds 800 / 650 / 500)
    pub fn for_score(score: u32) -> Self {
        if score >= 800 {
            Self::Platinum
        } else if score >= 650 {
            Self::Gold
        } else if score >= 500 {
            Self::Silver
        } else {
            Self::Bronze
        }
    }

    /// Largest loan an agent in this tier may request
    pub fn max_loan(&self) -> f64 {
        match self {
            Self::Platinum => 10_000.0,
            Self::Gold => 5_000.0,
            Self::Silver => 1_000.0,
            Self::Bronze => 250.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
        }
    }
}

impl fmt::Display for CreditTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-agent credit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditScore {
    pub score: u32,
    pub tier: CreditTier,
    pub total_loans: u32,
    pub repaid_loans: u32,
    pub defaulted_loans: u32,
    pub max_loan: f64,
}

impl CreditScore {
    /// Record for an agent with no history
    pub fn initial() -> Self {
        Self::with_score(INITIAL_SCORE)
    }

    /// Record with an explicit starting score (clamped into range)
    pub fn with_score(score: u32) -> Self {
        let score = score.clamp(MIN_SCORE, MAX_SCORE);
        let tier = CreditTier::for_score(score);
        Self {
            score,
            tier,
            total_loans: 0,
            repaid_loans: 0,
            defaulted_loans: 0,
            max_loan: tier.max_loan(),
        }
    }

    /// Apply a successful repayment. Returns the previous score.
    pub fn record_repayment(&mut self) -> u32 {
        let old = self.score;
        self.total_loans += 1;
        self.repaid_loans += 1;
        self.score = (self.score + REPAYMENT_BONUS).min(MAX_SCORE);
        self.refresh_tier();
        old
    }

    /// Apply a default. Returns the previous score.
    pub fn record_default(&mut self) -> u32 {
        let old = self.score;
        self.total_loans += 1;
        self.defaulted_loans += 1;
        self.score = self.score.saturating_sub(DEFAULT_PENALTY).max(MIN_SCORE);
        self.refresh_tier();
        old
    }

    /// Whether a requested amount fits under the tier ceiling
    pub fn allows(&self, amount: f64) -> bool {
        amount <= self.max_loan
    }

    fn refresh_tier(&mut self) {
        self.tier = CreditTier::for_score(self.score);
        self.max_loan = self.tier.max_loan();
    }
}

impl Default for CreditScore {
    fn default() -> Self {
        Self::initial()
    }
}

/// Why a score moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreChangeReason {
    LoanRepaid,
    LoanDefaulted,
}

/// One score movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditHistoryEntry {
    pub agent: String,
    pub old_score: u32,
    pub new_score: u32,
    pub reason: ScoreChangeReason,
    pub loan_id: LoanId,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}
