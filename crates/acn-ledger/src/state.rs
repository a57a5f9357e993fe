//! The persisted ledger document

use std::collections::BTreeMap;

use acn_types::{
    AgentProfile, AutoRepayConfig, Bid, BidId, CreditHistoryEntry, CreditScore, LedgerStats, Loan,
    LoanId, Transaction, TransactionKind, TxId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the ledger knows, as written to disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    #[serde(default)]
    pub loans: Vec<Loan>,
    #[serde(default)]
    pub bids: Vec<Bid>,
    #[serde(default)]
    pub credit_scores: BTreeMap<String, CreditScore>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub credit_history: Vec<CreditHistoryEntry>,
    #[serde(default)]
    pub agents: Vec<AgentProfile>,
    #[serde(default)]
    pub auto_repay: Vec<AutoRepayConfig>,
    #[serde(default, deserialize_with = "acn_types::timestamp::option::deserialize")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl LedgerState {
    pub fn next_loan_id(&self) -> LoanId {
        LoanId::from_sequence(self.loans.len() + 1)
    }

    pub fn next_bid_id(&self) -> BidId {
        BidId::from_sequence(self.bids.len() + 1)
    }

    pub fn next_tx_id(&self) -> TxId {
        TxId::from_sequence(self.transactions.len() + 1)
    }

    pub fn loan(&self, loan_id: &LoanId) -> Option<&Loan> {
        self.loans.iter().find(|l| &l.id == loan_id)
    }

    pub fn loan_mut(&mut self, loan_id: &LoanId) -> Option<&mut Loan> {
        self.loans.iter_mut().find(|l| &l.id == loan_id)
    }

    pub fn bid(&self, bid_id: &BidId) -> Option<&Bid> {
        self.bids.iter().find(|b| &b.id == bid_id)
    }

    /// Score for an agent, or the starting score if none is recorded
    pub fn score_or_initial(&self, agent: &str) -> CreditScore {
        self.credit_scores.get(agent).cloned().unwrap_or_default()
    }

    pub fn score_entry(&mut self, agent: &str) -> &mut CreditScore {
        self.credit_scores
            .entry(agent.to_string())
            .or_insert_with(CreditScore::initial)
    }

    pub fn stats(&self) -> LedgerStats {
        let mut loans_by_status = BTreeMap::new();
        for loan in &self.loans {
            *loans_by_status
                .entry(loan.status.as_str().to_string())
                .or_insert(0) += 1;
        }

        let volume_of = |kind: TransactionKind| -> f64 {
            self.transactions
                .iter()
                .filter(|tx| tx.kind == kind)
                .map(|tx| tx.amount)
                .sum()
        };

        LedgerStats {
            total_loans: self.loans.len(),
            total_bids: self.bids.len(),
            total_transactions: self.transactions.len(),
            total_agents: self.agents.len(),
            loans_by_status,
            funded_volume: volume_of(TransactionKind::LoanFunded),
            repaid_volume: volume_of(TransactionKind::Repayment),
            credit_scores: self
                .credit_scores
                .iter()
                .map(|(agent, credit)| (agent.clone(), credit.score))
                .collect(),
            last_updated: self.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acn_types::LoanStatus;

    #[test]
    fn test_ids_follow_collection_length() {
        let mut state = LedgerState::default();
        assert_eq!(state.next_loan_id().as_str(), "LOAN_001");
        let id = state.next_loan_id();
        state.loans.push(Loan::new(id, "alice", 10.0, 30, "x"));
        assert_eq!(state.next_loan_id().as_str(), "LOAN_002");
        assert_eq!(state.next_bid_id().as_str(), "BID_001");
        assert_eq!(state.next_tx_id().as_str(), "TX_001");
    }

    /// Document as the Python test harness writes it: naive timestamps,
    /// integer amounts, no agents or history keys
    const HARNESS_DOCUMENT: &str = r#"{
  "loans": [
    {
      "id": "LOAN_001",
      "borrower": "acn-test-agent",
      "amount": 5,
      "duration_days": 30,
      "purpose": "Testing ACN self-lending",
      "status": "repaid",
      "created_at": "2026-02-01T12:00:00.123456",
      "bids": ["BID_001"],
      "funded_at": "2026-02-01T12:00:01.000002",
      "lender": "acn-test-agent",
      "interest_rate": 12.0,
      "repaid_at": "2026-02-01T12:00:02.5"
    },
    {
      "id": "LOAN_002",
      "borrower": "acn-test-agent",
      "amount": 10.0,
      "duration_days": 14,
      "purpose": "",
      "status": "open",
      "created_at": "2026-02-02T08:30:00",
      "bids": [],
      "funded_at": null,
      "lender": null,
      "interest_rate": null,
      "repaid_at": null
    }
  ],
  "bids": [
    {
      "id": "BID_001",
      "loan_id": "LOAN_001",
      "lender": "acn-test-agent",
      "interest_rate": 12.0,
      "message": "Self-funding test loan",
      "status": "accepted",
      "created_at": "2026-02-01T12:00:00.900000"
    }
  ],
  "credit_scores": {
    "acn-test-agent": {
      "score": 410,
      "tier": "Bronze",
      "total_loans": 1,
      "repaid_loans": 1,
      "defaulted_loans": 0,
      "max_loan": 250
    }
  },
  "transactions": [
    {
      "id": "TX_001",
      "type": "loan_funded",
      "loan_id": "LOAN_001",
      "from": "acn-test-agent",
      "to": "acn-test-agent",
      "amount": 5,
      "timestamp": "2026-02-01T12:00:01.000010"
    },
    {
      "id": "TX_002",
      "type": "repayment",
      "loan_id": "LOAN_001",
      "from": "acn-test-agent",
      "to": "acn-test-agent",
      "amount": 5.04931506849315,
      "principal": 5,
      "interest": 0.04931506849315069,
      "timestamp": "2026-02-01T12:00:02.500100"
    }
  ],
  "last_updated": "2026-02-02T08:30:00.654321"
}"#;

    #[test]
    fn test_harness_written_document_loads() {
        let state: LedgerState = serde_json::from_str(HARNESS_DOCUMENT).unwrap();
        assert!(state.agents.is_empty());
        assert!(state.credit_history.is_empty());
        assert_eq!(state.loans.len(), 2);
        assert_eq!(state.loans[0].status, LoanStatus::Repaid);
        assert!(state.loans[0].repaid_at.is_some());
        assert!(state.loans[1].funded_at.is_none());
        assert_eq!(state.score_or_initial("acn-test-agent").score, 410);
        assert_eq!(state.transactions[1].principal, Some(5.0));
        assert_eq!(state.next_loan_id().as_str(), "LOAN_003");

        let last = state.last_updated.unwrap();
        assert_eq!(last.to_rfc3339(), "2026-02-02T08:30:00.654321+00:00");

        // Written back with offsets, and still readable
        let text = serde_json::to_string(&state).unwrap();
        let reread: LedgerState = serde_json::from_str(&text).unwrap();
        assert_eq!(reread, state);
    }

    #[test]
    fn test_stats_counts_by_status() {
        let mut state = LedgerState::default();
        state
            .loans
            .push(Loan::new(LoanId::from_sequence(1), "alice", 10.0, 30, "x"));
        let mut cancelled = Loan::new(LoanId::from_sequence(2), "alice", 10.0, 30, "y");
        cancelled.status = LoanStatus::Cancelled;
        state.loans.push(cancelled);
        state.score_entry("alice");

        let stats = state.stats();
        assert_eq!(stats.total_loans, 2);
        assert_eq!(stats.count(LoanStatus::Open), 1);
        assert_eq!(stats.count(LoanStatus::Cancelled), 1);
        assert_eq!(stats.count(LoanStatus::Repaid), 0);
        assert_eq!(stats.credit_scores.get("alice"), Some(&400));
    }
}
