//! ACN Ledger - Loan lifecycle state machine for the Agent Credit Network
//!
//! The ledger is:
//! - Document-shaped (one JSON document holds every record)
//! - Sequentially keyed (LOAN_001, BID_001, TX_001)
//! - Write-serialized (one writer lock per ledger)
//! - Commit-after-save (memory only changes once the store accepted the write)
//!
//! # Invariants
//!
//! 1. Only open loans take bids, get funded or get cancelled
//! 2. Accepting a bid rejects every other bid on the loan
//! 3. Repayment never accepts less than principal plus interest
//! 4. Credit scores stay within 300..=850

mod analytics;
mod cycle;
mod state;
mod store;

pub use cycle::{
    run_self_loan_cycle, CycleFailure, CycleReport, CycleStage, SELF_LOAN_DURATION_DAYS,
    SELF_LOAN_RATE,
};
pub use acn_types::{
    AutoRepayExecution, EarningsRouting, Funding, LedgerStats, LoanDefault, LoanListing, Repayment,
};
pub use state::LedgerState;
pub use store::{JsonFileStore, LedgerStore, MemoryStore};

use std::path::PathBuf;
use std::sync::Arc;

use acn_types::{
    AcnError, AgentProfile, AgentRole, AnalyticsOverview, ApiKey, AutoRepayConfig, AutoRepayRule,
    Bid, BidId, BidStatus, BorrowerStanding, CreditHistoryEntry, CreditScore, DailyVolume,
    EarningsSource, LenderStanding, Loan, LoanId, LoanStatus, ScoreChangeReason, TierBucket,
    Transaction, VolumeStanding,
};
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur in ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    Domain(#[from] AcnError),

    #[error("Store error: {message}")]
    Store { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl LedgerError {
    /// The domain error, with store failures folded into `AcnError::Storage`
    pub fn into_domain(self) -> AcnError {
        match self {
            Self::Domain(err) => err,
            Self::Store { message } | Self::Serialization { message } => AcnError::storage(message),
        }
    }

    pub fn domain(&self) -> Option<&AcnError> {
        match self {
            Self::Domain(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// The ACN credit ledger
///
/// Cloning is cheap; clones share state and store.
#[derive(Clone)]
pub struct CreditLedger {
    store: Arc<dyn LedgerStore>,
    state: Arc<RwLock<LedgerState>>,
}

impl CreditLedger {
    /// Load the ledger from a store
    pub async fn open(store: Arc<dyn LedgerStore>) -> Result<Self> {
        let state = store.load().await?;
        tracing::info!(
            store = %store.describe(),
            loans = state.loans.len(),
            bids = state.bids.len(),
            "Ledger opened"
        );
        Ok(Self {
            store,
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Load the ledger from a JSON file; a missing file is an empty ledger
    pub async fn open_file(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(Arc::new(JsonFileStore::new(path))).await
    }

    /// Empty ledger backed by memory
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            state: Arc::new(RwLock::new(LedgerState::default())),
        }
    }

    /// Run a change against a copy of the state, persist it, then commit it
    async fn mutate<T, F>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut LedgerState) -> acn_types::Result<T>,
    {
        let mut guard = self.state.write().await;
        let mut next = guard.clone();
        let out = change(&mut next).map_err(|err| {
            tracing::warn!(code = err.error_code(), "Ledger change rejected: {}", err);
            err
        })?;
        next.last_updated = Some(Utc::now());
        self.store.save(&next).await?;
        *guard = next;
        Ok(out)
    }

    /// Copy of the whole document
    pub async fn snapshot(&self) -> LedgerState {
        self.state.read().await.clone()
    }

    // ========================================================================
    // Credit
    // ========================================================================

    /// Score for an agent, initializing it on first sight
    pub async fn credit_score(&self, agent: &str) -> Result<CreditScore> {
        if let Some(credit) = self.state.read().await.credit_scores.get(agent) {
            return Ok(credit.clone());
        }
        self.mutate(|state| Ok(state.score_entry(agent).clone()))
            .await
    }

    /// Recorded score, without creating one for unknown agents
    pub async fn find_credit_score(&self, agent: &str) -> Result<CreditScore> {
        self.state
            .read()
            .await
            .credit_scores
            .get(agent)
            .cloned()
            .ok_or_else(|| {
                AcnError::AgentNotFound {
                    agent: agent.to_string(),
                }
                .into()
            })
    }

    /// Score changes for an agent, newest first
    pub async fn credit_history(&self, agent: &str, limit: Option<usize>) -> Vec<CreditHistoryEntry> {
        let state = self.state.read().await;
        state
            .credit_history
            .iter()
            .rev()
            .filter(|entry| entry.agent == agent)
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    // ========================================================================
    // Loan lifecycle
    // ========================================================================

    /// Open a loan request within the borrower's tier ceiling
    pub async fn request_loan(
        &self,
        borrower: &str,
        amount: f64,
        duration_days: u32,
        purpose: &str,
    ) -> Result<Loan> {
        if borrower.trim().is_empty() {
            return Err(AcnError::invalid_input("borrower", "must not be empty").into());
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AcnError::invalid_input("amount", "must be a positive number").into());
        }
        if duration_days == 0 {
            return Err(AcnError::invalid_input("duration_days", "must be at least 1").into());
        }

        let loan = self
            .mutate(|state| {
                let credit = state.score_entry(borrower);
                if !credit.allows(amount) {
                    return Err(AcnError::ExceedsMaxLoan {
                        amount,
                        max_loan: credit.max_loan,
                        tier: credit.tier.to_string(),
                    });
                }
                let loan = Loan::new(state.next_loan_id(), borrower, amount, duration_days, purpose);
                state.loans.push(loan.clone());
                Ok(loan)
            })
            .await?;

        tracing::info!(
            loan_id = %loan.id,
            borrower = %loan.borrower,
            amount = loan.amount,
            duration_days = loan.duration_days,
            "Loan requested"
        );
        Ok(loan)
    }

    /// Offer a rate on an open loan
    pub async fn place_bid(
        &self,
        loan_id: &LoanId,
        lender: &str,
        interest_rate: f64,
        message: &str,
    ) -> Result<Bid> {
        if lender.trim().is_empty() {
            return Err(AcnError::invalid_input("lender", "must not be empty").into());
        }
        if !interest_rate.is_finite() || interest_rate <= 0.0 || interest_rate > 100.0 {
            return Err(AcnError::invalid_input(
                "interest_rate",
                "must be greater than 0 and at most 100",
            )
            .into());
        }

        let bid = self
            .mutate(|state| {
                let bid_id = state.next_bid_id();
                let loan = state
                    .loan_mut(loan_id)
                    .ok_or_else(|| AcnError::LoanNotFound {
                        loan_id: loan_id.to_string(),
                    })?;
                if !loan.is_open() {
                    return Err(AcnError::LoanNotOpen {
                        loan_id: loan_id.to_string(),
                        status: loan.status.to_string(),
                    });
                }
                loan.bids.push(bid_id.clone());
                let bid = Bid::new(bid_id, loan_id.clone(), lender, interest_rate, message);
                state.bids.push(bid.clone());
                Ok(bid)
            })
            .await?;

        tracing::info!(
            bid_id = %bid.id,
            loan_id = %bid.loan_id,
            lender = %bid.lender,
            rate = bid.interest_rate,
            "Bid placed"
        );
        Ok(bid)
    }

    /// Fund a loan with one of its pending bids
    pub async fn accept_bid(&self, loan_id: &LoanId, bid_id: &BidId) -> Result<Funding> {
        let funding = self
            .mutate(|state| {
                let bid = state.bid(bid_id).cloned().ok_or_else(|| AcnError::BidNotFound {
                    bid_id: bid_id.to_string(),
                })?;
                if &bid.loan_id != loan_id {
                    return Err(AcnError::BidLoanMismatch {
                        bid_id: bid_id.to_string(),
                        loan_id: loan_id.to_string(),
                    });
                }
                if !bid.is_pending() {
                    return Err(AcnError::BidNotPending {
                        bid_id: bid_id.to_string(),
                        status: bid.status.to_string(),
                    });
                }

                let tx_id = state.next_tx_id();
                let loan = state
                    .loan_mut(loan_id)
                    .ok_or_else(|| AcnError::LoanNotFound {
                        loan_id: loan_id.to_string(),
                    })?;
                if !loan.is_open() {
                    return Err(AcnError::LoanNotOpen {
                        loan_id: loan_id.to_string(),
                        status: loan.status.to_string(),
                    });
                }
                loan.status = LoanStatus::Funded;
                loan.funded_at = Some(Utc::now());
                loan.lender = Some(bid.lender.clone());
                loan.interest_rate = Some(bid.interest_rate);
                let loan = loan.clone();

                let mut accepted = bid;
                for other in state.bids.iter_mut().filter(|b| &b.loan_id == loan_id) {
                    if &other.id == bid_id {
                        other.status = BidStatus::Accepted;
                        accepted = other.clone();
                    } else if other.is_pending() {
                        other.status = BidStatus::Rejected;
                    }
                }

                let transaction =
                    Transaction::funding(tx_id, loan_id.clone(), &accepted.lender, &loan.borrower, loan.amount);
                state.transactions.push(transaction.clone());

                Ok(Funding {
                    loan,
                    bid: accepted,
                    transaction,
                })
            })
            .await?;

        tracing::info!(
            loan_id = %funding.loan.id,
            bid_id = %funding.bid.id,
            lender = %funding.bid.lender,
            rate = funding.bid.interest_rate,
            "Loan funded"
        );
        Ok(funding)
    }

    /// Repay a funded loan in full; `None` pays exactly the total due
    pub async fn repay_loan(&self, loan_id: &LoanId, amount: Option<f64>) -> Result<Repayment> {
        let repayment = self
            .mutate(|state| {
                let tx_id = state.next_tx_id();
                let loan = state
                    .loan_mut(loan_id)
                    .ok_or_else(|| AcnError::LoanNotFound {
                        loan_id: loan_id.to_string(),
                    })?;
                if !loan.is_funded() {
                    return Err(AcnError::LoanNotFunded {
                        loan_id: loan_id.to_string(),
                        status: loan.status.to_string(),
                    });
                }

                let due = loan.total_due();
                let offered = amount.unwrap_or(due);
                if !offered.is_finite() || offered < due {
                    return Err(AcnError::InsufficientRepayment { offered, due });
                }
                let lender = loan.lender.clone().ok_or_else(|| {
                    AcnError::internal(format!("funded loan {} has no lender", loan_id))
                })?;

                loan.status = LoanStatus::Repaid;
                loan.repaid_at = Some(Utc::now());
                let loan = loan.clone();

                let transaction = Transaction::repayment(
                    tx_id,
                    loan_id.clone(),
                    &loan.borrower,
                    lender,
                    offered,
                    loan.amount,
                    loan.interest(),
                );
                state.transactions.push(transaction.clone());

                let credit = state.score_entry(&loan.borrower);
                let old_score = credit.record_repayment();
                let credit = credit.clone();
                state.credit_history.push(CreditHistoryEntry {
                    agent: loan.borrower.clone(),
                    old_score,
                    new_score: credit.score,
                    reason: ScoreChangeReason::LoanRepaid,
                    loan_id: loan_id.clone(),
                    created_at: Utc::now(),
                });

                Ok(Repayment {
                    loan,
                    transaction,
                    old_score,
                    credit,
                })
            })
            .await?;

        tracing::info!(
            loan_id = %repayment.loan.id,
            amount = repayment.transaction.amount,
            old_score = repayment.old_score,
            new_score = repayment.credit.score,
            "Loan repaid"
        );
        Ok(repayment)
    }

    /// Write off a funded loan and penalize the borrower
    pub async fn mark_default(&self, loan_id: &LoanId) -> Result<LoanDefault> {
        let outcome = self
            .mutate(|state| {
                let loan = state
                    .loan_mut(loan_id)
                    .ok_or_else(|| AcnError::LoanNotFound {
                        loan_id: loan_id.to_string(),
                    })?;
                if !loan.is_funded() {
                    return Err(AcnError::LoanNotFunded {
                        loan_id: loan_id.to_string(),
                        status: loan.status.to_string(),
                    });
                }
                loan.status = LoanStatus::Defaulted;
                let loan = loan.clone();

                let credit = state.score_entry(&loan.borrower);
                let old_score = credit.record_default();
                let credit = credit.clone();
                state.credit_history.push(CreditHistoryEntry {
                    agent: loan.borrower.clone(),
                    old_score,
                    new_score: credit.score,
                    reason: ScoreChangeReason::LoanDefaulted,
                    loan_id: loan_id.clone(),
                    created_at: Utc::now(),
                });

                Ok(LoanDefault {
                    loan,
                    old_score,
                    credit,
                })
            })
            .await?;

        tracing::warn!(
            loan_id = %outcome.loan.id,
            borrower = %outcome.loan.borrower,
            old_score = outcome.old_score,
            new_score = outcome.credit.score,
            "Loan defaulted"
        );
        Ok(outcome)
    }

    /// Withdraw an open request; pending bids are rejected
    pub async fn cancel_loan(&self, loan_id: &LoanId, borrower: &str) -> Result<Loan> {
        let loan = self
            .mutate(|state| {
                let loan = state
                    .loan_mut(loan_id)
                    .ok_or_else(|| AcnError::LoanNotFound {
                        loan_id: loan_id.to_string(),
                    })?;
                if loan.borrower != borrower {
                    return Err(AcnError::NotBorrower {
                        agent: borrower.to_string(),
                        loan_id: loan_id.to_string(),
                    });
                }
                if !loan.is_open() {
                    return Err(AcnError::LoanNotOpen {
                        loan_id: loan_id.to_string(),
                        status: loan.status.to_string(),
                    });
                }
                loan.status = LoanStatus::Cancelled;
                let loan = loan.clone();

                for bid in state
                    .bids
                    .iter_mut()
                    .filter(|b| &b.loan_id == loan_id && b.is_pending())
                {
                    bid.status = BidStatus::Rejected;
                }
                Ok(loan)
            })
            .await?;

        tracing::info!(loan_id = %loan.id, borrower = %loan.borrower, "Loan cancelled");
        Ok(loan)
    }

    // ========================================================================
    // Agents
    // ========================================================================

    /// Register an agent under a unique name and issue its api key
    pub async fn register_agent(
        &self,
        name: &str,
        wallet_address: &str,
        role: AgentRole,
    ) -> Result<AgentProfile> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AcnError::invalid_input("name", "must not be empty").into());
        }

        let profile = self
            .mutate(|state| {
                if state.agents.iter().any(|a| a.name == name) {
                    return Err(AcnError::AgentExists {
                        agent: name.to_string(),
                    });
                }
                let profile = AgentProfile {
                    name: name.to_string(),
                    wallet_address: wallet_address.to_string(),
                    role,
                    api_key: ApiKey::generate(),
                    registered_at: Utc::now(),
                };
                state.agents.push(profile.clone());
                state.score_entry(name);
                Ok(profile)
            })
            .await?;

        tracing::info!(agent = %profile.name, role = %profile.role, "Agent registered");
        Ok(profile)
    }

    pub async fn agent(&self, name: &str) -> Option<AgentProfile> {
        let state = self.state.read().await;
        state.agents.iter().find(|a| a.name == name).cloned()
    }

    pub async fn agent_by_api_key(&self, api_key: &str) -> Option<AgentProfile> {
        let state = self.state.read().await;
        state
            .agents
            .iter()
            .find(|a| a.api_key.as_str() == api_key)
            .cloned()
    }

    /// Route a share of an earnings source to repayment; replaces any
    /// existing hook for the same source
    pub async fn connect_auto_repay(
        &self,
        agent: &str,
        source: EarningsSource,
        percentage: u8,
    ) -> Result<AutoRepayConfig> {
        let config = AutoRepayConfig::new(agent, source, percentage)?;
        let config = self
            .mutate(move |state| {
                state
                    .auto_repay
                    .retain(|c| !(c.agent == config.agent && c.source == config.source));
                state.auto_repay.push(config.clone());
                Ok(config)
            })
            .await?;

        tracing::info!(
            agent = %config.agent,
            source = %config.source,
            percentage = config.percentage,
            "Auto-repay connected"
        );
        Ok(config)
    }

    pub async fn auto_repay_status(&self, agent: &str) -> Vec<AutoRepayConfig> {
        let state = self.state.read().await;
        state
            .auto_repay
            .iter()
            .filter(|c| c.agent == agent)
            .cloned()
            .collect()
    }

    /// Turn off an earnings hook; it stays listed with `enabled: false`
    pub async fn disable_auto_repay(
        &self,
        agent: &str,
        source: EarningsSource,
    ) -> Result<AutoRepayConfig> {
        let config = self
            .mutate(|state| {
                let hook = state
                    .auto_repay
                    .iter_mut()
                    .find(|c| c.agent == agent && c.source == source)
                    .ok_or_else(|| AcnError::AutoRepayNotFound {
                        agent: agent.to_string(),
                        source_name: source.to_string(),
                    })?;
                hook.enabled = false;
                Ok(hook.clone())
            })
            .await?;

        tracing::info!(agent, source = %source, "Auto-repay disabled");
        Ok(config)
    }

    /// Repay a funded loan from a wallet balance once the rule triggers
    ///
    /// Only a spare balance that settles the whole amount due repays; a
    /// smaller one leaves the loan for a later check.
    pub async fn execute_auto_repay(
        &self,
        rule: &AutoRepayRule,
        balance: f64,
    ) -> Result<AutoRepayExecution> {
        for (field, value) in [
            ("balance", balance),
            ("threshold", rule.threshold),
            ("min_balance", rule.min_balance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AcnError::invalid_input(field, "must be a non-negative number").into());
            }
        }

        let loan = self.loan(&rule.loan_id).await?;
        if !loan.is_funded() {
            return Err(AcnError::LoanNotFunded {
                loan_id: loan.id.to_string(),
                status: loan.status.to_string(),
            }
            .into());
        }

        let due = loan.total_due();
        let repayment = match rule.repayment_from_balance(balance, due) {
            Some(amount) if amount >= due => Some(self.repay_loan(&rule.loan_id, Some(amount)).await?),
            _ => None,
        };

        tracing::info!(
            loan_id = %rule.loan_id,
            balance,
            due,
            triggered = repayment.is_some(),
            "Auto-repay rule checked"
        );
        Ok(AutoRepayExecution {
            loan_id: rule.loan_id.clone(),
            triggered: repayment.is_some(),
            repayment,
        })
    }

    /// Route an earnings payout through the agent's hook for its source
    ///
    /// The hook's share settles funded loans oldest first, each only when
    /// what is left of the share covers its full amount due.
    pub async fn apply_earnings(
        &self,
        agent: &str,
        source: EarningsSource,
        earnings: f64,
    ) -> Result<EarningsRouting> {
        if !earnings.is_finite() || earnings < 0.0 {
            return Err(AcnError::invalid_input("amount", "must be a non-negative number").into());
        }

        let hook = self
            .auto_repay_status(agent)
            .await
            .into_iter()
            .find(|c| c.source == source && c.enabled)
            .ok_or_else(|| AcnError::AutoRepayNotFound {
                agent: agent.to_string(),
                source_name: source.to_string(),
            })?;

        let routed = hook.share_of(earnings);
        let mut unspent = routed;
        let mut repayments = Vec::new();
        for loan in self.active_loans(agent).await {
            let due = loan.total_due();
            if unspent < due {
                break;
            }
            repayments.push(self.repay_loan(&loan.id, Some(due)).await?);
            unspent -= due;
        }

        tracing::info!(
            agent,
            source = %source,
            earnings,
            routed,
            repaid = repayments.len(),
            "Earnings routed"
        );
        Ok(EarningsRouting {
            source,
            earnings,
            routed,
            unspent,
            repayments,
        })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub async fn loan(&self, loan_id: &LoanId) -> Result<Loan> {
        let state = self.state.read().await;
        state.loan(loan_id).cloned().ok_or_else(|| {
            AcnError::LoanNotFound {
                loan_id: loan_id.to_string(),
            }
            .into()
        })
    }

    pub async fn bid(&self, bid_id: &BidId) -> Result<Bid> {
        let state = self.state.read().await;
        state.bid(bid_id).cloned().ok_or_else(|| {
            AcnError::BidNotFound {
                bid_id: bid_id.to_string(),
            }
            .into()
        })
    }

    pub async fn loans(&self) -> Vec<Loan> {
        self.state.read().await.loans.clone()
    }

    /// Open requests, optionally filtered by borrower score and amount
    pub async fn open_loans(&self, min_credit: Option<u32>, max_amount: Option<f64>) -> Vec<LoanListing> {
        let state = self.state.read().await;
        state
            .loans
            .iter()
            .filter(|loan| loan.is_open())
            .filter(|loan| max_amount.map_or(true, |max| loan.amount <= max))
            .map(|loan| {
                let credit = state.score_or_initial(&loan.borrower);
                LoanListing {
                    loan: loan.clone(),
                    borrower_score: credit.score,
                    borrower_tier: credit.tier,
                    bid_count: loan.bids.len(),
                }
            })
            .filter(|listing| min_credit.map_or(true, |min| listing.borrower_score >= min))
            .collect()
    }

    pub async fn loans_by_borrower(&self, borrower: &str) -> Vec<Loan> {
        let state = self.state.read().await;
        state
            .loans
            .iter()
            .filter(|l| l.borrower == borrower)
            .cloned()
            .collect()
    }

    /// Funded loans the borrower still owes
    pub async fn active_loans(&self, borrower: &str) -> Vec<Loan> {
        let state = self.state.read().await;
        state
            .loans
            .iter()
            .filter(|l| l.borrower == borrower && l.is_funded())
            .cloned()
            .collect()
    }

    /// Every loan the agent has funded, in any later state
    pub async fn lending_portfolio(&self, lender: &str) -> Vec<Loan> {
        let state = self.state.read().await;
        state
            .loans
            .iter()
            .filter(|l| l.lender.as_deref() == Some(lender))
            .cloned()
            .collect()
    }

    pub async fn bids_for_loan(&self, loan_id: &LoanId) -> Result<Vec<Bid>> {
        let state = self.state.read().await;
        if state.loan(loan_id).is_none() {
            return Err(AcnError::LoanNotFound {
                loan_id: loan_id.to_string(),
            }
            .into());
        }
        Ok(state
            .bids
            .iter()
            .filter(|b| &b.loan_id == loan_id)
            .cloned()
            .collect())
    }

    pub async fn bids_by_lender(&self, lender: &str) -> Vec<Bid> {
        let state = self.state.read().await;
        state
            .bids
            .iter()
            .filter(|b| b.lender == lender)
            .cloned()
            .collect()
    }

    pub async fn transactions(&self) -> Vec<Transaction> {
        self.state.read().await.transactions.clone()
    }

    pub async fn stats(&self) -> LedgerStats {
        self.state.read().await.stats()
    }

    // ========================================================================
    // Leaderboards & analytics
    // ========================================================================

    pub async fn lender_leaderboard(&self, limit: usize) -> Vec<LenderStanding> {
        self.state.read().await.lender_leaderboard(limit)
    }

    pub async fn borrower_leaderboard(&self, limit: usize) -> Vec<BorrowerStanding> {
        self.state.read().await.borrower_leaderboard(limit)
    }

    pub async fn volume_leaderboard(&self, limit: usize) -> Vec<VolumeStanding> {
        self.state.read().await.volume_leaderboard(limit)
    }

    pub async fn analytics_overview(&self) -> AnalyticsOverview {
        self.state.read().await.analytics_overview(Utc::now())
    }

    pub async fn daily_volume(&self, days: u32) -> Vec<DailyVolume> {
        self.state.read().await.daily_volume(Utc::now(), days)
    }

    pub async fn tier_distribution(&self) -> Vec<TierBucket> {
        self.state.read().await.tier_distribution()
    }
}
