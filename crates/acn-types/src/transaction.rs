//! Transactions recorded when value moves between agents

use crate::{LoanId, TxId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of value movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Lender → borrower, principal
    LoanFunded,
    /// Borrower → lender, principal plus interest
    Repayment,
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TxId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub loan_id: LoanId,
    pub from: String,
    pub to: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Option<f64>,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Principal moving from lender to borrower
    pub fn funding(
        id: TxId,
        loan_id: LoanId,
        lender: impl Into<String>,
        borrower: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id,
            kind: TransactionKind::LoanFunded,
            loan_id,
            from: lender.into(),
            to: borrower.into(),
            amount,
            principal: None,
            interest: None,
            timestamp: Utc::now(),
        }
    }

    /// Borrower paying the lender back
    pub fn repayment(
        id: TxId,
        loan_id: LoanId,
        borrower: impl Into<String>,
        lender: impl Into<String>,
        amount: f64,
        principal: f64,
        interest: f64,
    ) -> Self {
        Self {
            id,
            kind: TransactionKind::Repayment,
            loan_id,
            from: borrower.into(),
            to: lender.into(),
            amount,
            principal: Some(principal),
            interest: Some(interest),
            timestamp: Utc::now(),
        }
    }
}
