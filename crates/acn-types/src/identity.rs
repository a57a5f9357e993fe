//! Identity types for the Agent Credit Network
//!
//! Record identifiers are strongly typed wrappers around sequential,
//! prefixed strings (`LOAN_001`, `BID_007`, `TX_012`) so that a bid id can
//! never be passed where a loan id is expected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate sequential ID types with common implementations
macro_rules! define_id_type {
    ($name:ident, $prefix:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Prefix used for this identifier family
            pub const PREFIX: &'static str = $prefix;

            /// Build the id for the n-th record (1-based), zero padded to 3 digits
            pub fn from_sequence(n: usize) -> Self {
                Self(format!("{}_{:03}", $prefix, n))
            }

            /// Wrap an existing string id
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Sequence number encoded in the id, if it has the expected prefix
            pub fn sequence(&self) -> Option<usize> {
                self.0
                    .strip_prefix(concat!($prefix, "_"))
                    .and_then(|n| n.parse().ok())
            }

            /// Borrow the raw string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id_type!(LoanId, "LOAN", "Unique identifier for a loan request");
define_id_type!(BidId, "BID", "Unique identifier for a lender's bid");
define_id_type!(TxId, "TX", "Unique identifier for a recorded transaction");

/// Role an agent registers with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Borrower,
    Lender,
    Both,
}

impl AgentRole {
    pub fn can_borrow(&self) -> bool {
        matches!(self, Self::Borrower | Self::Both)
    }

    pub fn can_lend(&self) -> bool {
        matches!(self, Self::Lender | Self::Both)
    }
}

impl Default for AgentRole {
    fn default() -> Self {
        Self::Borrower
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrower => write!(f, "borrower"),
            Self::Lender => write!(f, "lender"),
            Self::Both => write!(f, "both"),
        }
    }
}

impl std::str::FromStr for AgentRole {
    type Err = crate::AcnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "borrower" => Ok(Self::Borrower),
            "lender" => Ok(Self::Lender),
            "both" => Ok(Self::Both),
            other => Err(crate::AcnError::invalid_input(
                "type",
                format!("unknown agent type '{}' (expected borrower, lender or both)", other),
            )),
        }
    }
}

/// Bearer credential handed out on registration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(pub String);

impl ApiKey {
    /// Generate a fresh random key
    pub fn generate() -> Self {
        Self(format!("acn_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    pub wallet_address: String,
    #[serde(rename = "type")]
    pub role: AgentRole,
    pub api_key: ApiKey,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub registered_at: DateTime<Utc>,
}
