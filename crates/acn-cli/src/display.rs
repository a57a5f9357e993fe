//! Display utilities for the CLI

use acn_types::{Bid, BidStatus, CreditScore, CreditTier, Loan, LoanStatus};
use colored::*;

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(60).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(60).bright_black());
}

/// Print a success message
pub fn success(message: &str) {
    println!("  {} {}", "✓".bright_green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("  {} {}", "✗".bright_red(), message.bright_red());
}

/// Print an info message
pub fn info(message: &str) {
    println!("  {} {}", "→".bright_blue(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".yellow(), message.yellow());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("      {}: {}", key, value.bright_cyan());
}

/// Dollar amount with cents, or four places below a dollar so small
/// interest stays visible
pub fn money(amount: f64) -> String {
    if amount != 0.0 && amount.abs() < 1.0 {
        format!("${:.4}", amount)
    } else {
        format!("${:.2}", amount)
    }
}

pub fn tier(tier: CreditTier) -> ColoredString {
    match tier {
        CreditTier::Platinum => tier.as_str().bright_white().bold(),
        CreditTier::Gold => tier.as_str().bright_yellow(),
        CreditTier::Silver => tier.as_str().white(),
        CreditTier::Bronze => tier.as_str().yellow(),
    }
}

pub fn loan_status(status: LoanStatus) -> ColoredString {
    match status {
        LoanStatus::Open => status.as_str().bright_blue(),
        LoanStatus::Funded => status.as_str().bright_yellow(),
        LoanStatus::Repaid => status.as_str().bright_green(),
        LoanStatus::Defaulted => status.as_str().bright_red(),
        LoanStatus::Cancelled => status.as_str().bright_black(),
    }
}

fn bid_status(status: BidStatus) -> ColoredString {
    let text = status.to_string();
    match status {
        BidStatus::Pending => text.bright_blue(),
        BidStatus::Accepted => text.bright_green(),
        BidStatus::Rejected => text.bright_black(),
    }
}

/// One-line loan summary
pub fn loan_row(loan: &Loan) {
    println!(
        "  {} {:>10}  {:>3}d  {:9}  {}",
        loan.id.as_str().bright_cyan(),
        money(loan.amount),
        loan.duration_days,
        loan_status(loan.status),
        loan.borrower,
    );
}

pub fn loan_detail(loan: &Loan) {
    kv("Borrower", &loan.borrower);
    kv("Amount", &money(loan.amount));
    kv("Duration", &format!("{} days", loan.duration_days));
    if !loan.purpose.is_empty() {
        kv("Purpose", &loan.purpose);
    }
    println!("      Status: {}", loan_status(loan.status));
    if let (Some(lender), Some(rate)) = (&loan.lender, loan.interest_rate) {
        kv("Lender", lender);
        kv("Rate", &format!("{}% APR", rate));
        kv("Interest", &money(loan.interest()));
        kv("Total due", &money(loan.total_due()));
    }
    if let Some(due) = loan.due_at() {
        kv("Due", &due.format("%Y-%m-%d %H:%M UTC").to_string());
    }
}

pub fn bid_row(bid: &Bid) {
    println!(
        "  {} {:>6.2}%  {:9}  {}  {}",
        bid.id.as_str().bright_cyan(),
        bid.interest_rate,
        bid_status(bid.status),
        bid.lender,
        bid.message.bright_black(),
    );
}

pub fn credit(agent: &str, credit: &CreditScore) {
    kv("Agent", agent);
    println!(
        "      Score: {} ({})",
        credit.score.to_string().bright_cyan().bold(),
        tier(credit.tier)
    );
    kv("Max loan", &money(credit.max_loan));
    kv(
        "Loans",
        &format!(
            "{} total, {} repaid, {} defaulted",
            credit.total_loans, credit.repaid_loans, credit.defaulted_loans
        ),
    );
}

/// Old score → new score with the signed change
pub fn score_change(old: u32, new: u32) -> String {
    let delta = i64::from(new) - i64::from(old);
    let arrow = format!("{} → {} ({:+})", old, new, delta);
    if delta >= 0 {
        arrow.bright_green().to_string()
    } else {
        arrow.bright_red().to_string()
    }
}
