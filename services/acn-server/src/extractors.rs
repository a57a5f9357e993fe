//! Custom Axum Extractors

use std::sync::Arc;

use acn_types::AgentProfile;
use axum::{
    async_trait,
    body::{Body, Bytes},
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::state::AppState;

/// The registered agent behind a `Authorization: Bearer <api key>` header
#[derive(Debug, Clone)]
pub struct AuthAgent(pub AgentProfile);

impl AuthAgent {
    pub fn name(&self) -> &str {
        &self.0.name
    }
}

/// Token from an `Authorization: Bearer` header value
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthAgent {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| ApiError::MissingApiKey.into_response())?;

        match state.ledger.agent_by_api_key(token).await {
            Some(profile) => Ok(AuthAgent(profile)),
            None => {
                tracing::debug!("Rejected unknown api key");
                Err(ApiError::InvalidApiKey.into_response())
            }
        }
    }
}

// =============================================================================
// Envelope-aware JSON and query extractors
// =============================================================================

/// `Json<T>` whose rejection is the API's failure envelope
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::InvalidParameter(e.body_text()))?;
        Ok(ApiJson(value))
    }
}

/// JSON body that may be left out entirely
///
/// An empty body yields `None`. A body that is present must be valid JSON for
/// `T`, otherwise the request is rejected like `ApiJson`.
pub struct OptionalApiJson<T>(pub Option<T>);

#[async_trait]
impl<S, T> FromRequest<S> for OptionalApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let headers = req.headers().clone();
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::InvalidParameter(e.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalApiJson(None));
        }

        let mut rebuilt = Request::new(Body::from(bytes));
        *rebuilt.headers_mut() = headers;
        let ApiJson(value) = ApiJson::<T>::from_request(rebuilt, state).await?;
        Ok(OptionalApiJson(Some(value)))
    }
}

/// `Query<T>` whose rejection is the API's failure envelope
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::InvalidParameter(e.body_text()))?;
        Ok(ApiQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer acn_123"), Some("acn_123"));
        assert_eq!(bearer_token("bearer  acn_123 "), Some("acn_123"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("acn_123"), None);
    }
}
