use acn_ledger::CreditLedger;
use acn_types::ScoreChangeReason;
use colored::*;

use crate::display;

pub async fn show(ledger: &CreditLedger, agent: &str) -> anyhow::Result<()> {
    let credit = ledger.credit_score(agent).await?;
    display::section("Credit score");
    display::credit(agent, &credit);
    Ok(())
}

/// Score movements, newest first
pub async fn history(ledger: &CreditLedger, agent: &str, limit: usize) -> anyhow::Result<()> {
    let entries = ledger.credit_history(agent, Some(limit)).await;
    display::section(&format!("Credit history: {}", agent));
    if entries.is_empty() {
        display::info("No score changes yet");
        return Ok(());
    }
    for entry in &entries {
        let reason = match entry.reason {
            ScoreChangeReason::LoanRepaid => "repaid".bright_green(),
            ScoreChangeReason::LoanDefaulted => "defaulted".bright_red(),
        };
        println!(
            "  {}  {:9} {}  {}",
            entry.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black(),
            reason,
            entry.loan_id,
            display::score_change(entry.old_score, entry.new_score),
        );
    }
    Ok(())
}
