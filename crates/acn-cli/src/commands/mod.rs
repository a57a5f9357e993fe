//! Subcommand implementations

pub mod calc;
pub mod credit;
pub mod cycle;
pub mod deploy;
pub mod loan;
pub mod remote;

use std::path::Path;

use acn_ledger::CreditLedger;
use anyhow::Context;

/// Open the JSON ledger the local commands work against
pub async fn open_ledger(path: &Path) -> anyhow::Result<CreditLedger> {
    CreditLedger::open_file(path)
        .await
        .with_context(|| format!("Failed to open ledger {}", path.display()))
}
