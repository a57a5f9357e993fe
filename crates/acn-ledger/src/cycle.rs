//! Self-loan harness
//!
//! Drives one agent through request → self-bid → accept → repay to exercise
//! the whole lifecycle against a real ledger.

use std::fmt;

use acn_types::{BidId, CreditScore, CreditTier, LoanId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CreditLedger, LedgerError};

/// Term of the harness loan
pub const SELF_LOAN_DURATION_DAYS: u32 = 30;

/// Rate the agent bids on its own loan
pub const SELF_LOAN_RATE: f64 = 12.0;

/// Step of the cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStage {
    Request,
    Bid,
    Accept,
    Repay,
}

impl fmt::Display for CycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => write!(f, "loan request"),
            Self::Bid => write!(f, "bid placement"),
            Self::Accept => write!(f, "bid acceptance"),
            Self::Repay => write!(f, "repayment"),
        }
    }
}

/// A cycle that stopped part-way
#[derive(Error, Debug)]
#[error("Cycle failed at {stage}: {source}")]
pub struct CycleFailure {
    pub stage: CycleStage,
    #[source]
    pub source: LedgerError,
}

/// What one completed cycle did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub agent: String,
    pub loan_id: LoanId,
    pub bid_id: BidId,
    pub amount: f64,
    pub interest_rate: f64,
    pub total_repaid: f64,
    pub initial: CreditScore,
    pub final_credit: CreditScore,
}

impl CycleReport {
    pub fn score_delta(&self) -> i64 {
        i64::from(self.final_credit.score) - i64::from(self.initial.score)
    }

    pub fn tier_change(&self) -> (CreditTier, CreditTier) {
        (self.initial.tier, self.final_credit.tier)
    }
}

/// Run request → self-bid at 12% → accept → repay for `agent`
pub async fn run_self_loan_cycle(
    ledger: &CreditLedger,
    agent: &str,
    amount: f64,
) -> std::result::Result<CycleReport, CycleFailure> {
    let at = |stage: CycleStage| move |source: LedgerError| CycleFailure { stage, source };

    let initial = ledger
        .credit_score(agent)
        .await
        .map_err(at(CycleStage::Request))?;
    tracing::info!(agent, amount, score = initial.score, "Starting self-loan cycle");

    let purpose = format!("Testing ACN platform - loan ${}", amount);
    let loan = ledger
        .request_loan(agent, amount, SELF_LOAN_DURATION_DAYS, &purpose)
        .await
        .map_err(at(CycleStage::Request))?;

    let bid = ledger
        .place_bid(&loan.id, agent, SELF_LOAN_RATE, "Self-lending test bid")
        .await
        .map_err(at(CycleStage::Bid))?;

    ledger
        .accept_bid(&loan.id, &bid.id)
        .await
        .map_err(at(CycleStage::Accept))?;

    let repayment = ledger
        .repay_loan(&loan.id, None)
        .await
        .map_err(at(CycleStage::Repay))?;

    let report = CycleReport {
        agent: agent.to_string(),
        loan_id: loan.id,
        bid_id: bid.id,
        amount,
        interest_rate: SELF_LOAN_RATE,
        total_repaid: repayment.transaction.amount,
        initial,
        final_credit: repayment.credit,
    };
    tracing::info!(
        agent,
        loan_id = %report.loan_id,
        delta = report.score_delta(),
        "Self-loan cycle complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acn_types::{AcnError, LoanStatus};

    #[tokio::test]
    async fn test_cycle_raises_score_by_ten() {
        let ledger = CreditLedger::in_memory();
        let report = run_self_loan_cycle(&ledger, "LaMovida_Test", 5.0).await.unwrap();

        assert_eq!(report.loan_id.as_str(), "LOAN_001");
        assert_eq!(report.bid_id.as_str(), "BID_001");
        assert_eq!(report.initial.score, 400);
        assert_eq!(report.final_credit.score, 410);
        assert_eq!(report.score_delta(), 10);
        assert_eq!(report.tier_change(), (CreditTier::Bronze, CreditTier::Bronze));
        assert!((report.total_repaid - (5.0 + 5.0 * 0.12 * 30.0 / 365.0)).abs() < 1e-9);

        let loan = ledger.loan(&report.loan_id).await.unwrap();
        assert_eq!(loan.status, LoanStatus::Repaid);
        assert_eq!(ledger.transactions().await.len(), 2);
    }

    #[tokio::test]
    async fn test_cycle_reports_failing_stage() {
        let ledger = CreditLedger::in_memory();
        let failure = run_self_loan_cycle(&ledger, "agent", 1000.0)
            .await
            .unwrap_err();
        assert_eq!(failure.stage, CycleStage::Request);
        assert!(matches!(
            failure.source.domain(),
            Some(AcnError::ExceedsMaxLoan { .. })
        ));
    }

    #[tokio::test]
    async fn test_repeated_cycles_climb_tiers() {
        let ledger = CreditLedger::in_memory();
        let mut last = None;
        for _ in 0..10 {
            last = Some(run_self_loan_cycle(&ledger, "climber", 10.0).await.unwrap());
        }
        let last = last.unwrap();
        assert_eq!(last.final_credit.score, 500);
        assert_eq!(last.final_credit.tier, CreditTier::Silver);
        assert_eq!(last.final_credit.repaid_loans, 10);
    }
}
