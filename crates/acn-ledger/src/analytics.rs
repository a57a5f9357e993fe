//! Leaderboards and analytics over the ledger document

use std::collections::BTreeMap;

use acn_types::{
    AnalyticsOverview, BorrowerStanding, CreditTier, DailyVolume, LenderStanding, Loan,
    LoanStatus, TierBucket, VolumeStanding,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::state::LedgerState;

/// Funded or repaid: the loans whose principal actually moved
fn counts_as_volume(loan: &Loan) -> bool {
    matches!(loan.status, LoanStatus::Funded | LoanStatus::Repaid)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

impl LedgerState {
    /// Lenders by principal lent, largest first
    pub fn lender_leaderboard(&self, limit: usize) -> Vec<LenderStanding> {
        let mut by_lender: BTreeMap<&str, Vec<&Loan>> = BTreeMap::new();
        for loan in self.loans.iter().filter(|l| counts_as_volume(l)) {
            if let Some(lender) = loan.lender.as_deref() {
                by_lender.entry(lender).or_default().push(loan);
            }
        }

        let mut rows: Vec<LenderStanding> = by_lender
            .into_iter()
            .map(|(lender, loans)| LenderStanding {
                lender: lender.to_string(),
                loans_funded: loans.len(),
                total_lent: loans.iter().map(|l| l.amount).sum(),
                avg_rate: mean(loans.iter().filter_map(|l| l.interest_rate)).unwrap_or(0.0),
            })
            .collect();
        rows.sort_by(|a, b| b.total_lent.total_cmp(&a.total_lent));
        rows.truncate(limit);
        rows
    }

    /// Borrowers by score, then by repaid loans
    pub fn borrower_leaderboard(&self, limit: usize) -> Vec<BorrowerStanding> {
        let mut rows: Vec<BorrowerStanding> = self
            .credit_scores
            .iter()
            .map(|(agent, credit)| {
                let repayment_rate = if credit.total_loans > 0 {
                    let pct = f64::from(credit.repaid_loans) / f64::from(credit.total_loans) * 100.0;
                    (pct * 100.0).round() / 100.0
                } else {
                    0.0
                };
                BorrowerStanding {
                    agent: agent.clone(),
                    score: credit.score,
                    tier: credit.tier,
                    total_loans: credit.total_loans,
                    repaid_loans: credit.repaid_loans,
                    defaulted_loans: credit.defaulted_loans,
                    repayment_rate,
                }
            })
            .collect();
        rows.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.repaid_loans.cmp(&a.repaid_loans))
        });
        rows.truncate(limit);
        rows
    }

    /// Agents by principal lent plus borrowed; agents with no volume are left out
    pub fn volume_leaderboard(&self, limit: usize) -> Vec<VolumeStanding> {
        let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
        for loan in self.loans.iter().filter(|l| counts_as_volume(l)) {
            if let Some(lender) = loan.lender.as_deref() {
                totals.entry(lender).or_default().0 += loan.amount;
            }
            totals.entry(loan.borrower.as_str()).or_default().1 += loan.amount;
        }

        let mut rows: Vec<VolumeStanding> = totals
            .into_iter()
            .map(|(agent, (lent, borrowed))| VolumeStanding {
                agent: agent.to_string(),
                total_lent: lent,
                total_borrowed: borrowed,
                total_volume: lent + borrowed,
            })
            .filter(|row| row.total_volume > 0.0)
            .collect();
        rows.sort_by(|a, b| b.total_volume.total_cmp(&a.total_volume));
        rows.truncate(limit);
        rows
    }

    pub fn analytics_overview(&self, now: DateTime<Utc>) -> AnalyticsOverview {
        let with_status = |status: LoanStatus| self.loans.iter().filter(move |l| l.status == status);
        let since = now - Duration::hours(24);
        let recent: Vec<&Loan> = self.loans.iter().filter(|l| l.created_at > since).collect();

        AnalyticsOverview {
            total_loans: self.loans.len(),
            active_loans: with_status(LoanStatus::Funded).count(),
            repaid_loans: with_status(LoanStatus::Repaid).count(),
            pending_loans: with_status(LoanStatus::Open).count(),
            total_active_volume: with_status(LoanStatus::Funded).map(|l| l.amount).sum(),
            total_repaid_volume: with_status(LoanStatus::Repaid).map(|l| l.amount).sum(),
            total_agents: self.agents.len(),
            loans_24h: recent.len(),
            volume_24h: recent.iter().map(|l| l.amount).sum(),
            avg_interest_rate: mean(
                self.loans
                    .iter()
                    .filter(|l| counts_as_volume(l))
                    .filter_map(|l| l.interest_rate),
            )
            .unwrap_or(0.0),
        }
    }

    /// Loans requested per day over the last `days` days, newest day first
    pub fn daily_volume(&self, now: DateTime<Utc>, days: u32) -> Vec<DailyVolume> {
        let since = now - Duration::days(i64::from(days));
        let mut by_day: BTreeMap<NaiveDate, Vec<&Loan>> = BTreeMap::new();
        for loan in self.loans.iter().filter(|l| l.created_at > since) {
            by_day.entry(loan.created_at.date_naive()).or_default().push(loan);
        }

        by_day
            .into_iter()
            .rev()
            .map(|(date, loans)| DailyVolume {
                date,
                loan_count: loans.len(),
                volume: loans.iter().map(|l| l.amount).sum(),
                avg_rate: mean(loans.iter().filter_map(|l| l.interest_rate)),
            })
            .collect()
    }

    /// Agents per credit tier, lowest tier first; empty tiers are left out
    pub fn tier_distribution(&self) -> Vec<TierBucket> {
        let mut by_tier: BTreeMap<CreditTier, Vec<u32>> = BTreeMap::new();
        for credit in self.credit_scores.values() {
            by_tier.entry(credit.tier).or_default().push(credit.score);
        }

        by_tier
            .into_iter()
            .map(|(tier, scores)| TierBucket {
                tier,
                count: scores.len(),
                avg_score: mean(scores.iter().map(|s| f64::from(*s))).unwrap_or(0.0),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acn_types::{CreditScore, LoanId};

    fn loan(n: usize, borrower: &str, lender: Option<&str>, amount: f64, status: LoanStatus) -> Loan {
        let mut loan = Loan::new(LoanId::from_sequence(n), borrower, amount, 30, "");
        loan.status = status;
        if let Some(lender) = lender {
            loan.lender = Some(lender.to_string());
            loan.interest_rate = Some(10.0 + n as f64);
            loan.funded_at = Some(loan.created_at);
        }
        loan
    }

    fn sample() -> LedgerState {
        let mut state = LedgerState::default();
        state.loans = vec![
            loan(1, "alice", Some("bob"), 100.0, LoanStatus::Repaid),
            loan(2, "alice", Some("carol"), 50.0, LoanStatus::Funded),
            loan(3, "dave", Some("bob"), 20.0, LoanStatus::Funded),
            loan(4, "dave", Some("carol"), 500.0, LoanStatus::Defaulted),
            loan(5, "erin", None, 80.0, LoanStatus::Open),
        ];
        state.credit_scores.insert("alice".to_string(), CreditScore::with_score(660));
        state.credit_scores.insert("dave".to_string(), CreditScore::with_score(350));
        let mut erin = CreditScore::with_score(660);
        erin.total_loans = 4;
        erin.repaid_loans = 3;
        state.credit_scores.insert("erin".to_string(), erin);
        state
    }

    #[test]
    fn test_lender_leaderboard_ignores_defaulted_principal() {
        let rows = sample().lender_leaderboard(10);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].lender, "bob");
        assert_eq!(rows[0].loans_funded, 2);
        assert_eq!(rows[0].total_lent, 120.0);
        assert_eq!(rows[0].avg_rate, 12.0);
        assert_eq!(rows[1].lender, "carol");
        assert_eq!(rows[1].total_lent, 50.0);

        assert_eq!(sample().lender_leaderboard(1).len(), 1);
    }

    #[test]
    fn test_borrower_leaderboard_breaks_ties_on_repaid_loans() {
        let rows = sample().borrower_leaderboard(10);
        let agents: Vec<&str> = rows.iter().map(|r| r.agent.as_str()).collect();
        assert_eq!(agents, ["erin", "alice", "dave"]);
        assert_eq!(rows[0].repayment_rate, 75.0);
        assert_eq!(rows[0].tier, CreditTier::Gold);
        assert_eq!(rows[2].repayment_rate, 0.0);
    }

    #[test]
    fn test_volume_leaderboard() {
        let rows = sample().volume_leaderboard(10);
        assert_eq!(rows[0].agent, "alice");
        assert_eq!(rows[0].total_borrowed, 150.0);
        assert_eq!(rows[0].total_lent, 0.0);
        assert!(rows.iter().all(|r| r.agent != "erin"));
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_overview_counts() {
        let state = sample();
        let overview = state.analytics_overview(Utc::now());
        assert_eq!(overview.total_loans, 5);
        assert_eq!(overview.active_loans, 2);
        assert_eq!(overview.repaid_loans, 1);
        assert_eq!(overview.pending_loans, 1);
        assert_eq!(overview.total_active_volume, 70.0);
        assert_eq!(overview.total_repaid_volume, 100.0);
        assert_eq!(overview.loans_24h, 5);
        assert_eq!(overview.volume_24h, 750.0);
        assert_eq!(overview.avg_interest_rate, 12.0);

        let later = state.analytics_overview(Utc::now() + Duration::days(2));
        assert_eq!(later.loans_24h, 0);
        assert_eq!(later.volume_24h, 0.0);
    }

    #[test]
    fn test_daily_volume_window() {
        let mut state = sample();
        state.loans[0].created_at = Utc::now() - Duration::days(3);
        state.loans[1].created_at = Utc::now() - Duration::days(90);

        let days = state.daily_volume(Utc::now(), 30);
        assert_eq!(days.len(), 2);
        assert!(days[0].date > days[1].date);
        assert_eq!(days[0].loan_count, 3);
        assert_eq!(days[1].volume, 100.0);
        assert_eq!(days[1].avg_rate, Some(11.0));
    }

    #[test]
    fn test_tier_distribution() {
        let buckets = sample().tier_distribution();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].tier, CreditTier::Bronze);
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[1].tier, CreditTier::Gold);
        assert_eq!(buckets[1].count, 2);
        assert_eq!(buckets[1].avg_score, 660.0);
    }
}
