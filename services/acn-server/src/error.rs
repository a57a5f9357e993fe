//! API error handling
//!
//! Every failure leaves the server as `{success: false, error, code}` with a
//! status derived from the domain error.

use acn_ledger::LedgerError;
use acn_types::{AcnError, ApiResponse};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Authentication
    // =========================================================================
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Invalid API key")]
    InvalidApiKey,

    // =========================================================================
    // Request
    // =========================================================================
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    // =========================================================================
    // Domain
    // =========================================================================
    #[error(transparent)]
    Domain(#[from] AcnError),
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self::Domain(err.into_domain())
    }
}

impl ApiError {
    /// Stable code carried in the response body
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "MISSING_API_KEY",
            Self::InvalidApiKey => "INVALID_API_KEY",
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
            Self::Domain(err) => err.error_code(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingApiKey | Self::InvalidApiKey => StatusCode::UNAUTHORIZED,
            Self::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Self::Domain(err) => match err {
                // 404 Not Found
                AcnError::LoanNotFound { .. }
                | AcnError::BidNotFound { .. }
                | AcnError::AgentNotFound { .. }
                | AcnError::AutoRepayNotFound { .. } => StatusCode::NOT_FOUND,

                // 409 Conflict
                AcnError::AgentExists { .. }
                | AcnError::LoanNotOpen { .. }
                | AcnError::LoanNotFunded { .. }
                | AcnError::BidNotPending { .. }
                | AcnError::LoanNotOverdue { .. } => StatusCode::CONFLICT,

                // 422 Unprocessable Entity
                AcnError::BidLoanMismatch { .. }
                | AcnError::ExceedsMaxLoan { .. }
                | AcnError::InsufficientRepayment { .. } => StatusCode::UNPROCESSABLE_ENTITY,

                // 401 / 403
                AcnError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
                AcnError::NotBorrower { .. } | AcnError::NotLender { .. } => {
                    StatusCode::FORBIDDEN
                }

                // 400 Bad Request
                AcnError::InvalidInput { .. } => StatusCode::BAD_REQUEST,

                // 500 Internal Server Error
                AcnError::Storage { .. } | AcnError::Internal { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "Request failed: {}", self);
        }
        let body = ApiResponse::<()>::failure(self.to_string(), self.error_code());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::from(AcnError::LoanNotFound {
                    loan_id: "LOAN_009".into(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(AcnError::AgentExists {
                    agent: "alice".into(),
                }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(AcnError::InsufficientRepayment {
                    offered: 1.0,
                    due: 5.05,
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(AcnError::NotLender {
                    agent: "bob".into(),
                    loan_id: "LOAN_001".into(),
                }),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::from(AcnError::invalid_input("amount", "must be positive")),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::MissingApiKey, StatusCode::UNAUTHORIZED),
            (
                ApiError::from(AcnError::storage("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{}", err);
        }
    }

    #[test]
    fn test_ledger_errors_keep_domain_code() {
        let err = ApiError::from(LedgerError::from(AcnError::BidNotFound {
            bid_id: "BID_004".into(),
        }));
        assert_eq!(err.error_code(), "BID_NOT_FOUND");

        let store = ApiError::from(LedgerError::Store {
            message: "rename failed".into(),
        });
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_response_body_is_failure_envelope() {
        let response = ApiError::InvalidApiKey.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "INVALID_API_KEY");
    }
}
