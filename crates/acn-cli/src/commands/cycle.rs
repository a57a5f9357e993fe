//! Self-loan cycle and ledger statistics

use acn_ledger::{run_self_loan_cycle, CreditLedger, SELF_LOAN_DURATION_DAYS, SELF_LOAN_RATE};
use acn_types::{simple_interest, LoanStatus};
use colored::*;

use crate::display;

/// Borrow from yourself, repay, and show what happened to the score
pub async fn run_cycle(ledger: &CreditLedger, agent: &str, amount: f64) -> anyhow::Result<()> {
    display::section(&format!("Self-loan cycle: {}", agent));
    display::info(&format!(
        "{} for {} days at {}% APR (expected interest {})",
        display::money(amount),
        SELF_LOAN_DURATION_DAYS,
        SELF_LOAN_RATE,
        display::money(simple_interest(amount, SELF_LOAN_RATE, SELF_LOAN_DURATION_DAYS)),
    ));

    let report = run_self_loan_cycle(ledger, agent, amount).await?;

    display::success(&format!("Loan {} requested", report.loan_id));
    display::success(&format!("Bid {} placed and accepted", report.bid_id));
    display::success(&format!("Repaid {}", display::money(report.total_repaid)));

    println!();
    println!(
        "      Score: {}",
        display::score_change(report.initial.score, report.final_credit.score)
    );
    let (before, after) = report.tier_change();
    if before != after {
        println!(
            "      Tier: {} → {}",
            display::tier(before),
            display::tier(after)
        );
    } else {
        println!("      Tier: {}", display::tier(after));
    }
    display::kv("Max loan", &display::money(report.final_credit.max_loan));
    Ok(())
}

pub async fn show_stats(ledger: &CreditLedger) -> anyhow::Result<()> {
    let stats = ledger.stats().await;

    display::section("Ledger statistics");
    display::kv("Loans", &stats.total_loans.to_string());
    for status in [
        LoanStatus::Open,
        LoanStatus::Funded,
        LoanStatus::Repaid,
        LoanStatus::Defaulted,
        LoanStatus::Cancelled,
    ] {
        let count = stats.count(status);
        if count > 0 {
            println!("        {:10} {}", display::loan_status(status), count);
        }
    }
    display::kv("Bids", &stats.total_bids.to_string());
    display::kv("Transactions", &stats.total_transactions.to_string());
    display::kv("Registered agents", &stats.total_agents.to_string());
    display::kv("Funded volume", &display::money(stats.funded_volume));
    display::kv("Repaid volume", &display::money(stats.repaid_volume));

    if !stats.credit_scores.is_empty() {
        println!();
        println!("  {}", "Credit scores".bright_white());
        for (agent, score) in &stats.credit_scores {
            println!("      {:20} {}", agent, score.to_string().bright_cyan());
        }
    }
    if let Some(updated) = stats.last_updated {
        println!();
        println!(
            "  {}",
            format!("Last updated {}", updated.to_rfc3339()).bright_black()
        );
    }
    Ok(())
}
