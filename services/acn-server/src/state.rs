//! Shared application state

use acn_ledger::CreditLedger;

use crate::config::ServerConfig;

/// State handed to every handler as `State<Arc<AppState>>`
pub struct AppState {
    pub ledger: CreditLedger,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(ledger: CreditLedger, config: ServerConfig) -> Self {
        Self { ledger, config }
    }

    /// Memory-backed state with default settings
    pub fn in_memory() -> Self {
        Self::new(CreditLedger::in_memory(), ServerConfig::default())
    }
}
