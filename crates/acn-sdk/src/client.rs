//! REST client for the credit network API

use std::sync::Arc;

use acn_types::{
    AcceptBidBody, AgentProfile, AgentRole, AnalyticsOverview, ApiResponse, AutoRepayConfig,
    AutoRepayExecution, Bid, BidId, BorrowerStanding, BrowseQuery, ConnectAutoRepayBody,
    CreditHistoryEntry, CreditScore, DailyVolume, EarningsBody, EarningsRouting, EarningsSource,
    ExecuteAutoRepayBody, Funding, HealthResponse, HistoryQuery, LeaderboardQuery, LedgerStats,
    LenderStanding, Loan, LoanDefault, LoanId, LoanListing, LoanRequestBody, PlaceBidBody,
    RegisterAgentRequest, RepayBody, Repayment, ReturnsQuery, ReturnsQuote, TierBucket,
    VolumeQuery, VolumeStanding,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::{Config, Credentials, SdkError, SdkResult};

/// Client skill for one agent
#[derive(Clone)]
pub struct AcnClient {
    config: Arc<Config>,
    client: Client,
    credentials: Option<Credentials>,
}

impl AcnClient {
    /// Client with explicit configuration; `config.api_key` authenticates it
    pub fn new(config: Config) -> SdkResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SdkError::ConnectionFailed(e.to_string()))?;
        let credentials = config.api_key.clone().map(Credentials::from_api_key);
        Ok(Self {
            config: Arc::new(config),
            client,
            credentials,
        })
    }

    /// Default endpoint, credentials from the environment or saved files
    pub fn from_env() -> SdkResult<Self> {
        let client = Self::new(Config::default())?;
        Ok(match Credentials::discover() {
            Some(creds) => client.with_credentials(creds),
            None => client,
        })
    }

    pub fn connect(endpoint: &str) -> SdkResult<Self> {
        Self::new(Config {
            endpoint: endpoint.to_string(),
            ..Default::default()
        })
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    fn public(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    fn authed(&self, method: Method, path: &str) -> SdkResult<RequestBuilder> {
        let creds = self.credentials.as_ref().ok_or(SdkError::NotAuthenticated)?;
        Ok(self.public(method, path).bearer_auth(&creds.api_key))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> SdkResult<T> {
        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(SdkError::ApiError {
                    status: status.as_u16(),
                    code: None,
                    message: body,
                })
            }
            Err(e) => return Err(e.into()),
        };

        if !status.is_success() || !envelope.success {
            return Err(SdkError::ApiError {
                status: status.as_u16(),
                code: envelope.code,
                message: envelope
                    .error
                    .unwrap_or_else(|| status.to_string()),
            });
        }

        envelope.data.ok_or_else(|| SdkError::ApiError {
            status: status.as_u16(),
            code: None,
            message: "response carried no data".to_string(),
        })
    }

    // ========================================================================
    // Borrower
    // ========================================================================

    /// Register this agent; the issued key authenticates later calls and is
    /// saved to the configured credentials path
    pub async fn register(
        &mut self,
        agent_name: &str,
        wallet_address: &str,
        role: AgentRole,
    ) -> SdkResult<AgentProfile> {
        let body = RegisterAgentRequest {
            agent_name: agent_name.to_string(),
            wallet_address: wallet_address.to_string(),
            role,
        };
        let profile: AgentProfile = self
            .send(self.public(Method::POST, "/agents/register").json(&body))
            .await?;

        let credentials = Credentials {
            api_key: profile.api_key.as_str().to_string(),
            agent_name: Some(profile.name.clone()),
            wallet_address: Some(profile.wallet_address.clone()),
        };
        if let Some(path) = &self.config.credentials_path {
            credentials.save(path)?;
        }
        self.credentials = Some(credentials);
        Ok(profile)
    }

    pub async fn request_loan(
        &self,
        amount: f64,
        duration_days: u32,
        purpose: &str,
    ) -> SdkResult<Loan> {
        let body = LoanRequestBody {
            amount,
            duration_days,
            purpose: purpose.to_string(),
        };
        self.send(self.authed(Method::POST, "/loans/request")?.json(&body))
            .await
    }

    pub async fn my_loan_requests(&self) -> SdkResult<Vec<Loan>> {
        self.send(self.authed(Method::GET, "/loans/my-requests")?)
            .await
    }

    pub async fn bids(&self, loan_id: &LoanId) -> SdkResult<Vec<Bid>> {
        self.send(self.public(Method::GET, &format!("/loans/{}/bids", loan_id)))
            .await
    }

    pub async fn accept_bid(&self, loan_id: &LoanId, bid_id: &BidId) -> SdkResult<Funding> {
        let body = AcceptBidBody {
            bid_id: bid_id.clone(),
        };
        self.send(
            self.authed(Method::POST, &format!("/loans/{}/accept-bid", loan_id))?
                .json(&body),
        )
        .await
    }

    /// `None` pays exactly the total due
    pub async fn repay_loan(&self, loan_id: &LoanId, amount: Option<f64>) -> SdkResult<Repayment> {
        self.send(
            self.authed(Method::POST, &format!("/loans/{}/repay", loan_id))?
                .json(&RepayBody { amount }),
        )
        .await
    }

    pub async fn cancel_loan(&self, loan_id: &LoanId) -> SdkResult<Loan> {
        self.send(self.authed(Method::POST, &format!("/loans/{}/cancel", loan_id))?)
            .await
    }

    pub async fn active_loans(&self) -> SdkResult<Vec<Loan>> {
        self.send(self.authed(Method::GET, "/loans/active")?).await
    }

    // ========================================================================
    // Lender
    // ========================================================================

    pub async fn browse_loans(
        &self,
        min_credit: Option<u32>,
        max_amount: Option<f64>,
    ) -> SdkResult<Vec<LoanListing>> {
        let query = BrowseQuery {
            min_credit,
            max_amount,
        };
        self.send(self.public(Method::GET, "/loans/open").query(&query))
            .await
    }

    pub async fn loan(&self, loan_id: &LoanId) -> SdkResult<Loan> {
        self.send(self.public(Method::GET, &format!("/loans/{}", loan_id)))
            .await
    }

    pub async fn place_bid(&self, loan_id: &LoanId, interest_rate: f64, message: &str) -> SdkResult<Bid> {
        let body = PlaceBidBody {
            interest_rate,
            message: message.to_string(),
        };
        self.send(
            self.authed(Method::POST, &format!("/loans/{}/bid", loan_id))?
                .json(&body),
        )
        .await
    }

    pub async fn my_bids(&self) -> SdkResult<Vec<Bid>> {
        self.send(self.authed(Method::GET, "/bids/my-bids")?).await
    }

    pub async fn lending_portfolio(&self) -> SdkResult<Vec<Loan>> {
        self.send(self.authed(Method::GET, "/loans/lending")?).await
    }

    /// Lender has waited out the term without repayment
    pub async fn mark_default(&self, loan_id: &LoanId) -> SdkResult<LoanDefault> {
        self.send(self.authed(Method::POST, &format!("/loans/{}/default", loan_id))?)
            .await
    }

    pub async fn calculate_returns(&self, amount: f64, rate: f64, duration: u32) -> SdkResult<ReturnsQuote> {
        let query = ReturnsQuery {
            amount,
            rate,
            duration,
        };
        self.send(self.public(Method::GET, "/calculator/returns").query(&query))
            .await
    }

    // ========================================================================
    // Credit
    // ========================================================================

    pub async fn credit_score(&self) -> SdkResult<CreditScore> {
        self.send(self.authed(Method::GET, "/credit/me")?).await
    }

    pub async fn credit_score_of(&self, agent: &str) -> SdkResult<CreditScore> {
        self.send(self.public(Method::GET, &format!("/credit/{}", agent)))
            .await
    }

    pub async fn credit_history(&self, agent: &str, limit: Option<usize>) -> SdkResult<Vec<CreditHistoryEntry>> {
        self.send(
            self.public(Method::GET, &format!("/credit/{}/history", agent))
                .query(&HistoryQuery { limit }),
        )
        .await
    }

    // ========================================================================
    // Auto-repay
    // ========================================================================

    pub async fn connect_auto_repay(&self, source: EarningsSource, percentage: u8) -> SdkResult<AutoRepayConfig> {
        let body = ConnectAutoRepayBody { source, percentage };
        self.send(self.authed(Method::POST, "/auto-repay/connect")?.json(&body))
            .await
    }

    pub async fn auto_repay_status(&self) -> SdkResult<Vec<AutoRepayConfig>> {
        self.send(self.authed(Method::GET, "/auto-repay/status")?)
            .await
    }

    pub async fn disable_auto_repay(&self, source: EarningsSource) -> SdkResult<AutoRepayConfig> {
        self.send(self.authed(Method::DELETE, &format!("/auto-repay/{}", source))?)
            .await
    }

    /// Hand an earnings payout to the hook for its source
    pub async fn report_earnings(&self, source: EarningsSource, amount: f64) -> SdkResult<EarningsRouting> {
        let body = EarningsBody { source, amount };
        self.send(self.authed(Method::POST, "/auto-repay/earnings")?.json(&body))
            .await
    }

    /// Repay `loan_id` from `balance` once it exceeds `threshold`, keeping `min_balance`
    pub async fn execute_auto_repay(
        &self,
        loan_id: &LoanId,
        balance: f64,
        threshold: f64,
        min_balance: f64,
    ) -> SdkResult<AutoRepayExecution> {
        let body = ExecuteAutoRepayBody {
            balance,
            threshold,
            min_balance,
        };
        self.send(
            self.authed(Method::POST, &format!("/auto-repay/loans/{}/execute", loan_id))?
                .json(&body),
        )
        .await
    }

    // ========================================================================
    // Leaderboards & analytics
    // ========================================================================

    pub async fn top_lenders(&self, limit: Option<usize>) -> SdkResult<Vec<LenderStanding>> {
        self.send(
            self.public(Method::GET, "/leaderboard/lenders")
                .query(&LeaderboardQuery { limit }),
        )
        .await
    }

    pub async fn top_borrowers(&self, limit: Option<usize>) -> SdkResult<Vec<BorrowerStanding>> {
        self.send(
            self.public(Method::GET, "/leaderboard/borrowers")
                .query(&LeaderboardQuery { limit }),
        )
        .await
    }

    pub async fn top_volume(&self, limit: Option<usize>) -> SdkResult<Vec<VolumeStanding>> {
        self.send(
            self.public(Method::GET, "/leaderboard/volume")
                .query(&LeaderboardQuery { limit }),
        )
        .await
    }

    pub async fn analytics_overview(&self) -> SdkResult<AnalyticsOverview> {
        self.send(self.public(Method::GET, "/analytics/overview"))
            .await
    }

    pub async fn daily_volume(&self, days: Option<u32>) -> SdkResult<Vec<DailyVolume>> {
        self.send(
            self.public(Method::GET, "/analytics/volume")
                .query(&VolumeQuery { days }),
        )
        .await
    }

    pub async fn tier_distribution(&self) -> SdkResult<Vec<TierBucket>> {
        self.send(self.public(Method::GET, "/analytics/tiers"))
            .await
    }

    // ========================================================================
    // Utility
    // ========================================================================

    pub async fn profile(&self) -> SdkResult<AgentProfile> {
        self.send(self.authed(Method::GET, "/agents/me")?).await
    }

    pub async fn stats(&self) -> SdkResult<LedgerStats> {
        self.send(self.public(Method::GET, "/stats")).await
    }

    pub async fn health(&self) -> SdkResult<HealthResponse> {
        self.send(self.public(Method::GET, "/health")).await
    }
}
