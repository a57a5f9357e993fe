//! ACN Types - Canonical domain types for the Agent Credit Network
//!
//! This crate contains the foundational records shared by the ledger, the
//! REST server and the client skill, with zero dependencies on other acn
//! crates:
//!
//! - Identity types (LoanId, BidId, TxId, AgentProfile)
//! - Loan and bid records with their lifecycle statuses
//! - Credit scores, tiers and score history
//! - Transactions recorded on funding and repayment
//! - Interest and fee arithmetic
//! - Auto-repayment configuration
//! - REST request/response records
//! - Leaderboard and analytics aggregates
//!
//! # Loan Lifecycle
//!
//! ```text
//! request → bid → accept (funded) → repay (repaid) | default (defaulted)
//!        ↘ cancel (cancelled)
//! ```

pub mod identity;
pub mod loan;
pub mod bid;
pub mod credit;
pub mod transaction;
pub mod interest;
pub mod autorepay;
pub mod api;
pub mod analytics;
pub mod error;
pub mod timestamp;

pub use identity::*;
pub use loan::*;
pub use bid::*;
pub use credit::*;
pub use transaction::*;
pub use interest::*;
pub use autorepay::*;
pub use api::*;
pub use analytics::*;
pub use error::*;

/// Version of the ACN record schema
pub const TYPES_VERSION: &str = "0.1.0";

/// Days per year used by every interest calculation
pub const DAYS_PER_YEAR: f64 = 365.0;
