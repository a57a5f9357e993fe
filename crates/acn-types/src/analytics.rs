//! Leaderboard and analytics records
//!
//! Read-only aggregates over the ledger. Only funded and repaid loans count
//! towards lending volume.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::CreditTier;

/// Rows returned by a leaderboard when no limit is given
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Window of `GET /analytics/volume` when no day count is given
pub const DEFAULT_VOLUME_DAYS: u32 = 30;

/// A lender ranked by principal lent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderStanding {
    pub lender: String,
    pub loans_funded: usize,
    pub total_lent: f64,
    pub avg_rate: f64,
}

/// A borrower ranked by credit score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerStanding {
    pub agent: String,
    pub score: u32,
    pub tier: CreditTier,
    pub total_loans: u32,
    pub repaid_loans: u32,
    pub defaulted_loans: u32,
    /// Percent of closed loans that were repaid
    pub repayment_rate: f64,
}

/// An agent ranked by principal lent plus borrowed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeStanding {
    pub agent: String,
    pub total_lent: f64,
    pub total_borrowed: f64,
    pub total_volume: f64,
}

/// Network-wide counts and volumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    pub total_loans: usize,
    pub active_loans: usize,
    pub repaid_loans: usize,
    /// Open loans still waiting for a bid to be accepted
    pub pending_loans: usize,
    pub total_active_volume: f64,
    pub total_repaid_volume: f64,
    pub total_agents: usize,
    pub loans_24h: usize,
    pub volume_24h: f64,
    /// Mean accepted APR over funded and repaid loans
    pub avg_interest_rate: f64,
}

/// Loans requested on one UTC day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub loan_count: usize,
    pub volume: f64,
    /// Mean accepted APR of that day's loans that were funded
    pub avg_rate: Option<f64>,
}

/// Agents holding a credit tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierBucket {
    pub tier: CreditTier,
    pub count: usize,
    pub avg_score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolumeQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
}
