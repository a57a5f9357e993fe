//! Loan commands against the local ledger

use acn_ledger::CreditLedger;
use acn_types::{BidId, LoanId};
use chrono::Utc;

use crate::display;

pub async fn request(
    ledger: &CreditLedger,
    borrower: &str,
    amount: f64,
    duration_days: u32,
    purpose: &str,
) -> anyhow::Result<()> {
    let loan = ledger
        .request_loan(borrower, amount, duration_days, purpose)
        .await?;
    display::success(&format!(
        "Loan {} opened: {} for {} days",
        loan.id,
        display::money(loan.amount),
        loan.duration_days
    ));
    display::info(&format!(
        "Lenders can bid with: acn loan bid {} --lender <name> --rate <apr>",
        loan.id
    ));
    Ok(())
}

pub async fn bid(
    ledger: &CreditLedger,
    loan_id: &LoanId,
    lender: &str,
    rate: f64,
    message: &str,
) -> anyhow::Result<()> {
    let bid = ledger.place_bid(loan_id, lender, rate, message).await?;
    let loan = ledger.loan(loan_id).await?;
    display::success(&format!(
        "Bid {} placed on {} at {}% APR",
        bid.id, bid.loan_id, bid.interest_rate
    ));
    display::kv(
        "Projected interest",
        &display::money(bid.projected_interest(loan.amount, loan.duration_days)),
    );
    Ok(())
}

pub async fn accept(ledger: &CreditLedger, loan_id: &LoanId, bid_id: &BidId) -> anyhow::Result<()> {
    let funding = ledger.accept_bid(loan_id, bid_id).await?;
    display::success(&format!(
        "Loan {} funded by {}",
        funding.loan.id, funding.bid.lender
    ));
    display::kv("Transaction", funding.transaction.id.as_str());
    display::kv("Total due", &display::money(funding.loan.total_due()));
    if let Some(due) = funding.loan.due_at() {
        display::kv("Due", &due.format("%Y-%m-%d").to_string());
    }
    Ok(())
}

pub async fn repay(ledger: &CreditLedger, loan_id: &LoanId, amount: Option<f64>) -> anyhow::Result<()> {
    let repayment = ledger.repay_loan(loan_id, amount).await?;
    display::success(&format!(
        "Loan {} repaid with {}",
        repayment.loan.id,
        display::money(repayment.transaction.amount)
    ));
    println!(
        "      Score: {}",
        display::score_change(repayment.old_score, repayment.credit.score)
    );
    Ok(())
}

/// Force a default, whether or not the term has elapsed
pub async fn default(ledger: &CreditLedger, loan_id: &LoanId) -> anyhow::Result<()> {
    let loan = ledger.loan(loan_id).await?;
    if loan.is_funded() && !loan.is_overdue(Utc::now()) {
        display::warning("Term has not elapsed yet; defaulting anyway");
    }
    let outcome = ledger.mark_default(loan_id).await?;
    display::success(&format!(
        "Loan {} marked defaulted",
        outcome.loan.id
    ));
    println!(
        "      {} score: {}",
        outcome.loan.borrower,
        display::score_change(outcome.old_score, outcome.credit.score)
    );
    Ok(())
}

pub async fn cancel(ledger: &CreditLedger, loan_id: &LoanId, borrower: &str) -> anyhow::Result<()> {
    let loan = ledger.cancel_loan(loan_id, borrower).await?;
    display::success(&format!("Loan {} cancelled", loan.id));
    Ok(())
}

pub async fn show(ledger: &CreditLedger, loan_id: &LoanId) -> anyhow::Result<()> {
    let loan = ledger.loan(loan_id).await?;
    display::section(&format!("Loan {}", loan.id));
    display::loan_detail(&loan);

    let bids = ledger.bids_for_loan(loan_id).await?;
    println!();
    if bids.is_empty() {
        display::info("No bids yet");
    } else {
        for bid in &bids {
            display::bid_row(bid);
        }
    }
    Ok(())
}

/// List loans, optionally filtered by status name and borrower
pub async fn list(
    ledger: &CreditLedger,
    status: Option<&str>,
    borrower: Option<&str>,
) -> anyhow::Result<()> {
    let loans: Vec<_> = ledger
        .loans()
        .await
        .into_iter()
        .filter(|loan| status.map_or(true, |s| loan.status.as_str().eq_ignore_ascii_case(s)))
        .filter(|loan| borrower.map_or(true, |b| loan.borrower == b))
        .collect();

    display::section(&format!("Loans ({})", loans.len()));
    if loans.is_empty() {
        display::info("No matching loans");
    }
    for loan in &loans {
        display::loan_row(loan);
    }
    Ok(())
}
