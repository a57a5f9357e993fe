//! Lender bids against open loans

use crate::{interest, BidId, LoanId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a bid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// A lender's rate offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub id: BidId,
    pub loan_id: LoanId,
    pub lender: String,
    /// Offered APR in percent
    pub interest_rate: f64,
    #[serde(default)]
    pub message: String,
    pub status: BidStatus,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

impl Bid {
    pub fn new(
        id: BidId,
        loan_id: LoanId,
        lender: impl Into<String>,
        interest_rate: f64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id,
            loan_id,
            lender: lender.into(),
            interest_rate,
            message: message.into(),
            status: BidStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == BidStatus::Pending
    }

    /// Interest the lender would earn on a principal over a term
    pub fn projected_interest(&self, principal: f64, duration_days: u32) -> f64 {
        interest::simple_interest(principal, self.interest_rate, duration_days)
    }
}
