//! ACN SDK - Client skill for the Agent Credit Network
//!
//! Two ways to reach the network:
//!
//! - [`AcnClient`] talks to the REST API with a bearer api key
//! - [`chain`] builds calldata for the on-chain contract and USDC
//!
//! # Quick Start
//!
//! ```ignore
//! use acn_sdk::{AcnClient, AgentRole};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut acn = AcnClient::from_env()?;
//!     if !acn.is_authenticated() {
//!         acn.register("MyAgent", "0x...", AgentRole::Borrower).await?;
//!     }
//!
//!     let loan = acn.request_loan(50.0, 30, "GPU credits").await?;
//!     for bid in acn.bids(&loan.id).await? {
//!         println!("{} offers {}%", bid.lender, bid.interest_rate);
//!     }
//!     Ok(())
//! }
//! ```

pub use acn_types::*;

pub mod chain;
mod client;
mod credentials;

pub use client::AcnClient;
pub use credentials::{Credentials, API_KEY_ENV};

use std::path::PathBuf;
use std::time::Duration;

/// Hosted API
pub const DEFAULT_ENDPOINT: &str = "https://api.agentcredit.network/v1";

// ============================================================================
// Error Types
// ============================================================================

/// SDK-specific errors
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error("Not authenticated. Call register() first or set ACN_API_KEY.")]
    NotAuthenticated,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("API error: {status} - {message}")]
    ApiError {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl SdkError {
    /// Stable error code returned by the server, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::ApiError { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// SDK Result type
pub type SdkResult<T> = std::result::Result<T, SdkError>;

// ============================================================================
// Configuration
// ============================================================================

/// SDK configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API endpoint, including the version prefix
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
    /// API key (optional)
    pub api_key: Option<String>,
    /// Where `register` saves credentials; `None` keeps them in memory
    pub credentials_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            api_key: None,
            credentials_path: Credentials::default_path(),
        }
    }
}
