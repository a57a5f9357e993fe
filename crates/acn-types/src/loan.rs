//! Loan records
//!
//! A loan starts `open`, collects bids, becomes `funded` when the borrower
//! accepts one, and ends `repaid`, `defaulted` or `cancelled`.

use crate::{interest, BidId, LoanId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a loan in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// Accepting bids
    Open,
    /// A bid was accepted and the principal moved to the borrower
    Funded,
    /// Principal plus interest paid back
    Repaid,
    /// Borrower failed to repay
    Defaulted,
    /// Withdrawn by the borrower before funding
    Cancelled,
}

impl LoanStatus {
    /// Whether the loan has reached a final state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Repaid | Self::Defaulted | Self::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Funded => "funded",
            Self::Repaid => "repaid",
            Self::Defaulted => "defaulted",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loan request and its funding state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub borrower: String,
    pub amount: f64,
    pub duration_days: u32,
    pub purpose: String,
    pub status: LoanStatus,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub bids: Vec<BidId>,
    #[serde(default, deserialize_with = "crate::timestamp::option::deserialize")]
    pub funded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lender: Option<String>,
    /// APR in percent, fixed when a bid is accepted
    #[serde(default)]
    pub interest_rate: Option<f64>,
    #[serde(default, deserialize_with = "crate::timestamp::option::deserialize")]
    pub repaid_at: Option<DateTime<Utc>>,
}

impl Loan {
    /// Create a new open loan
    pub fn new(
        id: LoanId,
        borrower: impl Into<String>,
        amount: f64,
        duration_days: u32,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            id,
            borrower: borrower.into(),
            amount,
            duration_days,
            purpose: purpose.into(),
            status: LoanStatus::Open,
            created_at: Utc::now(),
            bids: Vec::new(),
            funded_at: None,
            lender: None,
            interest_rate: None,
            repaid_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == LoanStatus::Open
    }

    pub fn is_funded(&self) -> bool {
        self.status == LoanStatus::Funded
    }

    /// Interest owed at the accepted rate (zero before funding)
    pub fn interest(&self) -> f64 {
        self.interest_rate
            .map(|rate| interest::simple_interest(self.amount, rate, self.duration_days))
            .unwrap_or(0.0)
    }

    /// Principal plus interest
    pub fn total_due(&self) -> f64 {
        self.amount + self.interest()
    }

    /// When repayment is due, once funded
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.funded_at
            .map(|funded| funded + Duration::days(i64::from(self.duration_days)))
    }

    /// A funded loan whose term has elapsed without repayment
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_funded() && self.due_at().map(|due| now > due).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funded_loan() -> Loan {
        let mut loan = Loan::new(LoanId::from_sequence(1), "alice", 1000.0, 30, "compute");
        loan.status = LoanStatus::Funded;
        loan.interest_rate = Some(12.0);
        loan.lender = Some("bob".to_string());
        loan.funded_at = Some(Utc::now());
        loan
    }

    #[test]
    fn test_open_loan_has_no_interest() {
        let loan = Loan::new(LoanId::from_sequence(1), "alice", 500.0, 30, "compute");
        assert!(loan.is_open());
        assert_eq!(loan.interest(), 0.0);
        assert_eq!(loan.total_due(), 500.0);
        assert!(loan.due_at().is_none());
    }

    #[test]
    fn test_total_due_uses_accepted_rate() {
        let loan = funded_loan();
        let expected = 1000.0 + 1000.0 * 0.12 * 30.0 / 365.0;
        assert!((loan.total_due() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_overdue_after_term() {
        let loan = funded_loan();
        assert!(!loan.is_overdue(Utc::now()));
        assert!(loan.is_overdue(Utc::now() + Duration::days(31)));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LoanStatus::Defaulted).unwrap(), "\"defaulted\"");
        assert!(LoanStatus::Cancelled.is_terminal());
        assert!(!LoanStatus::Funded.is_terminal());
    }
}
