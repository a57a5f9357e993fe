//! Wire types for the ACN REST API
//!
//! Request bodies, query parameters, the response envelope and the outcome
//! records returned by lifecycle operations. The server serializes these and
//! the client skill deserializes them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    AgentRole, Bid, BidId, CreditScore, CreditTier, EarningsSource, Loan, LoanId, LoanStatus,
    Transaction,
};

/// Response envelope: `{success, data}` or `{success: false, error, code}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }

    pub fn failure(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            code: Some(code.into()),
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAgentRequest {
    pub agent_name: String,
    pub wallet_address: String,
    #[serde(rename = "type", default)]
    pub role: AgentRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRequestBody {
    pub amount: f64,
    pub duration_days: u32,
    #[serde(default)]
    pub purpose: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceBidBody {
    pub interest_rate: f64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptBidBody {
    pub bid_id: BidId,
}

/// Omitted amount pays exactly the total due
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepayBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectAutoRepayBody {
    pub source: EarningsSource,
    #[serde(default = "default_auto_repay_percentage")]
    pub percentage: u8,
}

fn default_auto_repay_percentage() -> u8 {
    50
}

/// Wallet balance checked against a balance rule for one loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteAutoRepayBody {
    pub balance: f64,
    pub threshold: f64,
    #[serde(default)]
    pub min_balance: f64,
}

/// An earnings payout to route through a hook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningsBody {
    pub source: EarningsSource,
    pub amount: f64,
}

/// Filters for `GET /loans/open`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_credit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
}

/// Parameters for `GET /calculator/returns`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnsQuery {
    pub amount: f64,
    pub rate: f64,
    pub duration: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

// ============================================================================
// Outcomes
// ============================================================================

/// An open loan as shown to prospective lenders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanListing {
    #[serde(flatten)]
    pub loan: Loan,
    pub borrower_score: u32,
    pub borrower_tier: CreditTier,
    pub bid_count: usize,
}

/// Outcome of accepting a bid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Funding {
    pub loan: Loan,
    pub bid: Bid,
    pub transaction: Transaction,
}

/// Outcome of repaying a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repayment {
    pub loan: Loan,
    pub transaction: Transaction,
    pub old_score: u32,
    pub credit: CreditScore,
}

/// Outcome of defaulting a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDefault {
    pub loan: Loan,
    pub old_score: u32,
    pub credit: CreditScore,
}

/// Outcome of checking a balance rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoRepayExecution {
    pub loan_id: LoanId,
    pub triggered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repayment: Option<Repayment>,
}

/// Outcome of routing an earnings payout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsRouting {
    pub source: EarningsSource,
    pub earnings: f64,
    /// The hook's share of the payout
    pub routed: f64,
    /// Routed share left after settling loans
    pub unspent: f64,
    pub repayments: Vec<Repayment>,
}

/// Aggregate counts over the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_loans: usize,
    pub total_bids: usize,
    pub total_transactions: usize,
    pub total_agents: usize,
    pub loans_by_status: BTreeMap<String, usize>,
    pub funded_volume: f64,
    pub repaid_volume: f64,
    pub credit_scores: BTreeMap<String, u32>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl LedgerStats {
    pub fn count(&self, status: LoanStatus) -> usize {
        self.loans_by_status
            .get(status.as_str())
            .copied()
            .unwrap_or(0)
    }
}

/// Service liveness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}
