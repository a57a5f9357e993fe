//! Error types for the Agent Credit Network
//!
//! Every rejected lifecycle step surfaces as a typed variant with a stable
//! error code.

use thiserror::Error;

/// Result type for ACN operations
pub type Result<T> = std::result::Result<T, AcnError>;

/// ACN error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcnError {
    // ========================================================================
    // Lookup Errors
    // ========================================================================

    /// Loan not found
    #[error("Loan {loan_id} not found")]
    LoanNotFound { loan_id: String },

    /// Bid not found
    #[error("Bid {bid_id} not found")]
    BidNotFound { bid_id: String },

    /// Agent not found
    #[error("Agent {agent} not found")]
    AgentNotFound { agent: String },

    /// No earnings hook for this agent and source
    #[error("No auto-repay hook from {source_name} for {agent}")]
    AutoRepayNotFound { agent: String, source_name: String },

    /// Agent name already taken
    #[error("Agent {agent} is already registered")]
    AgentExists { agent: String },

    // ========================================================================
    // Lifecycle Errors
    // ========================================================================

    /// Loan is not accepting bids
    #[error("Loan {loan_id} is not open (status: {status})")]
    LoanNotOpen { loan_id: String, status: String },

    /// Loan has not been funded
    #[error("Loan {loan_id} is not funded (status: {status})")]
    LoanNotFunded { loan_id: String, status: String },

    /// Bid was already accepted or rejected
    #[error("Bid {bid_id} is not pending (status: {status})")]
    BidNotPending { bid_id: String, status: String },

    /// Bid belongs to another loan
    #[error("Bid {bid_id} does not belong to loan {loan_id}")]
    BidLoanMismatch { bid_id: String, loan_id: String },

    /// Funded loan whose term has not elapsed
    #[error("Loan {loan_id} is not overdue yet")]
    LoanNotOverdue { loan_id: String },

    // ========================================================================
    // Credit Errors
    // ========================================================================

    /// Requested amount above the tier ceiling
    #[error("Amount ${amount} exceeds max loan of ${max_loan} for {tier} tier")]
    ExceedsMaxLoan {
        amount: f64,
        max_loan: f64,
        tier: String,
    },

    /// Repayment below principal plus interest
    #[error("Amount ${offered:.2} is less than total due ${due:.2}")]
    InsufficientRepayment { offered: f64, due: f64 },

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    /// Caller is not the loan's borrower
    #[error("{agent} is not the borrower of loan {loan_id}")]
    NotBorrower { agent: String, loan_id: String },

    /// Caller is not the loan's lender
    #[error("{agent} is not the lender of loan {loan_id}")]
    NotLender { agent: String, loan_id: String },

    /// Missing or unknown credentials
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    // ========================================================================
    // General Errors
    // ========================================================================

    /// Invalid input
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    /// Persistence failure
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AcnError {
    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Check if this is a retriable error
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::Internal { .. })
    }

    /// Check if this is a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::LoanNotFound { .. }
                | Self::BidNotFound { .. }
                | Self::AgentNotFound { .. }
                | Self::AutoRepayNotFound { .. }
        )
    }

    /// Get an error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::LoanNotFound { .. } => "LOAN_NOT_FOUND",
            Self::BidNotFound { .. } => "BID_NOT_FOUND",
            Self::AgentNotFound { .. } => "AGENT_NOT_FOUND",
            Self::AutoRepayNotFound { .. } => "AUTO_REPAY_NOT_FOUND",
            Self::AgentExists { .. } => "AGENT_EXISTS",
            Self::LoanNotOpen { .. } => "LOAN_NOT_OPEN",
            Self::LoanNotFunded { .. } => "LOAN_NOT_FUNDED",
            Self::BidNotPending { .. } => "BID_NOT_PENDING",
            Self::BidLoanMismatch { .. } => "BID_LOAN_MISMATCH",
            Self::LoanNotOverdue { .. } => "LOAN_NOT_OVERDUE",
            Self::ExceedsMaxLoan { .. } => "EXCEEDS_MAX_LOAN",
            Self::InsufficientRepayment { .. } => "INSUFFICIENT_REPAYMENT",
            Self::NotBorrower { .. } => "NOT_BORROWER",
            Self::NotLender { .. } => "NOT_LENDER",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::Storage { .. } => "STORAGE_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AcnError::InsufficientRepayment {
            offered: 5.0,
            due: 5.05,
        };
        assert_eq!(err.error_code(), "INSUFFICIENT_REPAYMENT");
        assert_eq!(err.to_string(), "Amount $5.00 is less than total due $5.05");
    }

    #[test]
    fn test_retriable_errors() {
        assert!(AcnError::storage("disk full").is_retriable());
        assert!(!AcnError::LoanNotFound {
            loan_id: "LOAN_001".to_string()
        }
        .is_retriable());
    }

    #[test]
    fn test_not_found_classification() {
        assert!(AcnError::BidNotFound {
            bid_id: "BID_001".to_string()
        }
        .is_not_found());
        assert!(!AcnError::unauthorized("no key").is_not_found());
    }
}
