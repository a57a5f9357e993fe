//! API Integration Tests
//!
//! Drive the router end to end against an in-memory ledger.

use std::sync::Arc;

use acn_ledger::{CreditLedger, LedgerState};
use acn_server::{create_router, AppState, ServerConfig};
use acn_types::AgentRole;
use chrono::{Duration, Utc};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn create_test_router() -> Router {
    create_router(Arc::new(AppState::in_memory()))
}

/// Make a request and get the JSON response
async fn json_request(
    router: &Router,
    method: &str,
    uri: &str,
    api_key: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(key) = api_key {
        request = request.header("Authorization", format!("Bearer {}", key));
    }

    let body = match body {
        Some(json_body) => Body::from(serde_json::to_vec(&json_body).unwrap()),
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));

    (status, json)
}

/// Register an agent and return its api key
async fn register(router: &Router, name: &str, role: &str) -> String {
    let (status, body) = json_request(
        router,
        "POST",
        "/v1/agents/register",
        None,
        Some(json!({"agent_name": name, "wallet_address": format!("0x{}", name), "type": role})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["api_key"].as_str().unwrap().to_string()
}

async fn request_loan(router: &Router, key: &str, amount: f64) -> String {
    let (status, body) = json_request(
        router,
        "POST",
        "/v1/loans/request",
        Some(key),
        Some(json!({"amount": amount, "duration_days": 30, "purpose": "compute"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn place_bid(router: &Router, key: &str, loan_id: &str, rate: f64) -> String {
    let (status, body) = json_request(
        router,
        "POST",
        &format!("/v1/loans/{}/bid", loan_id),
        Some(key),
        Some(json!({"interest_rate": rate, "message": "happy to help"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

/// Request a loan as `borrower`, bid on it as `lender` at 12% and accept
async fn funded_loan(router: &Router, borrower: &str, lender: &str, amount: f64) -> String {
    let loan_id = request_loan(router, borrower, amount).await;
    let bid = place_bid(router, lender, &loan_id, 12.0).await;
    let (status, body) = json_request(
        router,
        "POST",
        &format!("/v1/loans/{}/accept-bid", loan_id),
        Some(borrower),
        Some(json!({"bid_id": bid})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    loan_id
}

// =============================================================================
// Public Endpoint Tests (No Auth Required)
// =============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let router = create_test_router();

    for uri in ["/health", "/v1/health"] {
        let (status, body) = json_request(&router, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "healthy");
    }
}

#[tokio::test]
async fn test_calculator_returns() {
    let router = create_test_router();

    let (status, body) = json_request(
        &router,
        "GET",
        "/v1/calculator/returns?amount=1000&rate=10&duration=365",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!((body["data"]["interest"].as_f64().unwrap() - 100.0).abs() < 1e-9);
    assert!((body["data"]["total_return"].as_f64().unwrap() - 1100.0).abs() < 1e-9);

    let (status, body) = json_request(
        &router,
        "GET",
        "/v1/calculator/returns?amount=0&rate=10&duration=30",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (status, body) =
        json_request(&router, "GET", "/v1/calculator/returns?amount=5", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_unknown_loan_is_404() {
    let router = create_test_router();
    let (status, body) = json_request(&router, "GET", "/v1/loans/LOAN_999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "LOAN_NOT_FOUND");
}

#[tokio::test]
async fn test_credit_lookup_is_read_only() {
    let router = create_test_router();

    let (status, body) = json_request(&router, "GET", "/v1/credit/newcomer", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "AGENT_NOT_FOUND");

    // The miss left no record behind
    let (_, body) = json_request(&router, "GET", "/v1/stats", None, None).await;
    assert_eq!(body["data"]["credit_scores"], json!({}));

    register(&router, "newcomer", "borrower").await;
    let (status, body) = json_request(&router, "GET", "/v1/credit/newcomer", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["score"], 400);
    assert_eq!(body["data"]["tier"], "Bronze");
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_auth_required() {
    let router = create_test_router();

    let (status, body) = json_request(&router, "GET", "/v1/agents/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "MISSING_API_KEY");

    let (status, body) =
        json_request(&router, "GET", "/v1/loans/active", Some("acn_bogus"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_API_KEY");
}

#[tokio::test]
async fn test_register_and_profile() {
    let router = create_test_router();
    let key = register(&router, "alice", "both").await;

    let (status, body) = json_request(&router, "GET", "/v1/agents/me", Some(&key), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "alice");
    assert_eq!(body["data"]["type"], "both");

    let (status, body) = json_request(
        &router,
        "POST",
        "/v1/agents/register",
        None,
        Some(json!({"agent_name": "alice", "wallet_address": "0x2"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "AGENT_EXISTS");
}

// =============================================================================
// Loan lifecycle
// =============================================================================

#[tokio::test]
async fn test_full_lifecycle() {
    let router = create_test_router();
    let alice = register(&router, "alice", "borrower").await;
    let bob = register(&router, "bob", "lender").await;
    let carol = register(&router, "carol", "lender").await;

    let loan_id = request_loan(&router, &alice, 50.0).await;

    let (_, body) = json_request(&router, "GET", "/v1/loans/open?min_credit=300", None, None).await;
    let listings = body["data"].as_array().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["id"], loan_id.as_str());
    assert_eq!(listings[0]["borrower_score"], 400);

    let (_, body) = json_request(&router, "GET", "/v1/loans/open?min_credit=500", None, None).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let bob_bid = place_bid(&router, &bob, &loan_id, 12.0).await;
    let carol_bid = place_bid(&router, &carol, &loan_id, 15.0).await;

    // Only the borrower may accept
    let (status, body) = json_request(
        &router,
        "POST",
        &format!("/v1/loans/{}/accept-bid", loan_id),
        Some(&bob),
        Some(json!({"bid_id": bob_bid})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "NOT_BORROWER");

    let (status, body) = json_request(
        &router,
        "POST",
        &format!("/v1/loans/{}/accept-bid", loan_id),
        Some(&alice),
        Some(json!({"bid_id": bob_bid})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["loan"]["status"], "funded");
    assert_eq!(body["data"]["loan"]["lender"], "bob");

    let (_, body) = json_request(&router, "GET", &format!("/v1/loans/{}/bids", loan_id), None, None).await;
    let carol_status = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == carol_bid.as_str())
        .map(|b| b["status"].clone())
        .unwrap();
    assert_eq!(carol_status, "rejected");

    let (_, body) = json_request(&router, "GET", "/v1/loans/lending", Some(&bob), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    let (_, body) = json_request(&router, "GET", "/v1/loans/active", Some(&alice), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Short payment is refused and changes nothing
    let (status, body) = json_request(
        &router,
        "POST",
        &format!("/v1/loans/{}/repay", loan_id),
        Some(&alice),
        Some(json!({"amount": 10.0})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INSUFFICIENT_REPAYMENT");

    let (status, body) = json_request(
        &router,
        "POST",
        &format!("/v1/loans/{}/repay", loan_id),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["loan"]["status"], "repaid");
    assert_eq!(body["data"]["old_score"], 400);
    assert_eq!(body["data"]["credit"]["score"], 410);

    let (_, body) = json_request(&router, "GET", "/v1/credit/me", Some(&alice), None).await;
    assert_eq!(body["data"]["score"], 410);

    let (_, body) =
        json_request(&router, "GET", "/v1/credit/alice/history?limit=5", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = json_request(&router, "GET", "/v1/stats", None, None).await;
    assert_eq!(body["data"]["total_loans"], 1);
    assert_eq!(body["data"]["total_bids"], 2);
    assert_eq!(body["data"]["total_agents"], 3);
    assert_eq!(body["data"]["loans_by_status"]["repaid"], 1);

    let (_, body) = json_request(&router, "GET", "/v1/bids/my-bids", Some(&carol), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_request_above_tier_ceiling() {
    let router = create_test_router();
    let alice = register(&router, "alice", "borrower").await;

    let (status, body) = json_request(
        &router,
        "POST",
        "/v1/loans/request",
        Some(&alice),
        Some(json!({"amount": 251.0, "duration_days": 30})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "EXCEEDS_MAX_LOAN");
}

#[tokio::test]
async fn test_malformed_body_uses_envelope() {
    let router = create_test_router();
    let alice = register(&router, "alice", "borrower").await;

    let (status, body) = json_request(
        &router,
        "POST",
        "/v1/loans/request",
        Some(&alice),
        Some(json!({"amount": "lots"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_default_rules() {
    let router = create_test_router();
    let alice = register(&router, "alice", "borrower").await;
    let bob = register(&router, "bob", "lender").await;
    let carol = register(&router, "carol", "lender").await;

    let loan_id = request_loan(&router, &alice, 20.0).await;
    let bid = place_bid(&router, &bob, &loan_id, 10.0).await;
    json_request(
        &router,
        "POST",
        &format!("/v1/loans/{}/accept-bid", loan_id),
        Some(&alice),
        Some(json!({"bid_id": bid})),
    )
    .await;

    let uri = format!("/v1/loans/{}/default", loan_id);

    let (status, body) = json_request(&router, "POST", &uri, Some(&carol), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "NOT_LENDER");

    let (status, body) = json_request(&router, "POST", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "LOAN_NOT_OVERDUE");

    let (_, body) = json_request(&router, "GET", &format!("/v1/loans/{}", loan_id), None, None).await;
    assert_eq!(body["data"]["status"], "funded");
}

#[tokio::test]
async fn test_lender_defaults_overdue_loan() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");

    // Fund a loan, then move its funding date past the 30 day term
    let ledger = CreditLedger::open_file(&path).await.unwrap();
    ledger
        .register_agent("alice", "0xa11ce", AgentRole::Borrower)
        .await
        .unwrap();
    let bob = ledger
        .register_agent("bob", "0xb0b", AgentRole::Lender)
        .await
        .unwrap();
    let loan = ledger.request_loan("alice", 20.0, 30, "compute").await.unwrap();
    let bid = ledger.place_bid(&loan.id, "bob", 10.0, "").await.unwrap();
    ledger.accept_bid(&loan.id, &bid.id).await.unwrap();
    drop(ledger);

    let mut state: LedgerState =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    state.loans[0].funded_at = Some(Utc::now() - Duration::days(31));
    std::fs::write(&path, serde_json::to_vec(&state).unwrap()).unwrap();

    let ledger = CreditLedger::open_file(&path).await.unwrap();
    let router = create_router(Arc::new(AppState::new(ledger, ServerConfig::default())));

    let uri = format!("/v1/loans/{}/default", loan.id);
    let (status, body) = json_request(&router, "POST", &uri, Some(bob.api_key.as_str()), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["loan"]["status"], "defaulted");
    assert_eq!(body["data"]["old_score"], 400);
    assert_eq!(body["data"]["credit"]["score"], 350);

    // Terminal: a second default is refused
    let (status, body) = json_request(&router, "POST", &uri, Some(bob.api_key.as_str()), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "LOAN_NOT_FUNDED");

    let (_, body) = json_request(&router, "GET", "/v1/credit/alice", None, None).await;
    assert_eq!(body["data"]["defaulted_loans"], 1);
}

#[tokio::test]
async fn test_malformed_repay_body_is_rejected() {
    let router = create_test_router();
    let alice = register(&router, "alice", "borrower").await;
    let bob = register(&router, "bob", "lender").await;
    let loan_id = funded_loan(&router, &alice, &bob, 100.0).await;
    let uri = format!("/v1/loans/{}/repay", loan_id);

    for bad in [json!({"amount": "1"}), json!("everything"), json!([1, 2])] {
        let (status, body) = json_request(&router, "POST", &uri, Some(&alice), Some(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(body["code"], "INVALID_PARAMETER");
    }

    let (_, body) = json_request(&router, "GET", &format!("/v1/loans/{}", loan_id), None, None).await;
    assert_eq!(body["data"]["status"], "funded");
    let (_, body) = json_request(&router, "GET", "/v1/credit/alice", None, None).await;
    assert_eq!(body["data"]["score"], 400);

    // An empty object still means "pay the total due"
    let (status, body) = json_request(&router, "POST", &uri, Some(&alice), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["loan"]["status"], "repaid");
}

#[tokio::test]
async fn test_cancel_rules() {
    let router = create_test_router();
    let alice = register(&router, "alice", "borrower").await;
    let bob = register(&router, "bob", "lender").await;

    let loan_id = request_loan(&router, &alice, 20.0).await;
    let uri = format!("/v1/loans/{}/cancel", loan_id);

    let (status, _) = json_request(&router, "POST", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = json_request(&router, "POST", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "cancelled");

    let (status, body) = json_request(&router, "POST", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "LOAN_NOT_OPEN");

    let (_, body) = json_request(&router, "GET", "/v1/loans/my-requests", Some(&alice), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_auto_repay() {
    let router = create_test_router();
    let alice = register(&router, "alice", "borrower").await;

    let (status, body) = json_request(
        &router,
        "POST",
        "/v1/auto-repay/connect",
        Some(&alice),
        Some(json!({"source": "openwork"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["percentage"], 50);

    let (status, body) = json_request(
        &router,
        "POST",
        "/v1/auto-repay/connect",
        Some(&alice),
        Some(json!({"source": "simmer", "percentage": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (_, body) = json_request(&router, "GET", "/v1/auto-repay/status", Some(&alice), None).await;
    let hooks = body["data"].as_array().unwrap();
    assert_eq!(hooks.len(), 1);
    assert_eq!(hooks[0]["source"], "openwork");
}

#[tokio::test]
async fn test_auto_repay_routes_earnings_and_rules() {
    let router = create_test_router();
    let alice = register(&router, "alice", "borrower").await;
    let bob = register(&router, "bob", "lender").await;
    let small = funded_loan(&router, &alice, &bob, 10.0).await;
    let large = funded_loan(&router, &alice, &bob, 100.0).await;

    let (status, body) = json_request(
        &router,
        "POST",
        "/v1/auto-repay/earnings",
        Some(&alice),
        Some(json!({"source": "skills", "amount": 40.0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "AUTO_REPAY_NOT_FOUND");

    json_request(
        &router,
        "POST",
        "/v1/auto-repay/connect",
        Some(&alice),
        Some(json!({"source": "skills", "percentage": 50})),
    )
    .await;
    let (status, body) = json_request(
        &router,
        "POST",
        "/v1/auto-repay/earnings",
        Some(&alice),
        Some(json!({"source": "skills", "amount": 40.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["routed"], 20.0);
    let repayments = body["data"]["repayments"].as_array().unwrap();
    assert_eq!(repayments.len(), 1);
    assert_eq!(repayments[0]["loan"]["id"], small.as_str());

    // Balance rule on the remaining loan: only the borrower may run it
    let execute = format!("/v1/auto-repay/loans/{}/execute", large);
    let rule = json!({"balance": 500.0, "threshold": 200.0, "min_balance": 50.0});
    let (status, body) = json_request(&router, "POST", &execute, Some(&bob), Some(rule.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "NOT_BORROWER");

    let (status, body) = json_request(
        &router,
        "POST",
        &execute,
        Some(&alice),
        Some(json!({"balance": 150.0, "threshold": 200.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["triggered"], false);

    let (status, body) = json_request(&router, "POST", &execute, Some(&alice), Some(rule)).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["triggered"], true);
    assert_eq!(body["data"]["repayment"]["loan"]["status"], "repaid");

    let (status, body) =
        json_request(&router, "DELETE", "/v1/auto-repay/skills", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["enabled"], false);

    let (status, body) =
        json_request(&router, "DELETE", "/v1/auto-repay/payroll", Some(&alice), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_leaderboards_and_analytics() {
    let router = create_test_router();
    let alice = register(&router, "alice", "borrower").await;
    let dave = register(&router, "dave", "borrower").await;
    let bob = register(&router, "bob", "lender").await;
    let carol = register(&router, "carol", "lender").await;

    let repaid = funded_loan(&router, &alice, &bob, 50.0).await;
    funded_loan(&router, &dave, &carol, 20.0).await;
    request_loan(&router, &dave, 30.0).await;
    let (status, body) = json_request(
        &router,
        "POST",
        &format!("/v1/loans/{}/repay", repaid),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let (status, body) = json_request(&router, "GET", "/v1/leaderboard/lenders", None, None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let lenders = body["data"].as_array().unwrap();
    assert_eq!(lenders.len(), 2);
    assert_eq!(lenders[0]["lender"], "bob");
    assert_eq!(lenders[0]["total_lent"], 50.0);
    assert_eq!(lenders[1]["lender"], "carol");

    let (_, body) =
        json_request(&router, "GET", "/v1/leaderboard/borrowers?limit=1", None, None).await;
    let borrowers = body["data"].as_array().unwrap();
    assert_eq!(borrowers.len(), 1);
    assert_eq!(borrowers[0]["agent"], "alice");
    assert_eq!(borrowers[0]["score"], 410);

    let (_, body) = json_request(&router, "GET", "/v1/leaderboard/volume", None, None).await;
    let volume = body["data"].as_array().unwrap();
    assert_eq!(volume.len(), 4);
    assert_eq!(volume[0]["total_volume"], 50.0);

    let (_, body) = json_request(&router, "GET", "/v1/analytics/overview", None, None).await;
    assert_eq!(body["data"]["total_loans"], 3);
    assert_eq!(body["data"]["active_loans"], 1);
    assert_eq!(body["data"]["repaid_loans"], 1);
    assert_eq!(body["data"]["pending_loans"], 1);
    assert_eq!(body["data"]["total_agents"], 4);
    assert_eq!(body["data"]["loans_24h"], 3);
    assert_eq!(body["data"]["volume_24h"], 100.0);

    let (_, body) = json_request(&router, "GET", "/v1/analytics/volume?days=7", None, None).await;
    let days = body["data"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["loan_count"], 3);

    let (_, body) = json_request(&router, "GET", "/v1/analytics/tiers", None, None).await;
    let tiers = body["data"].as_array().unwrap();
    assert_eq!(tiers.len(), 1);
    assert_eq!(tiers[0]["tier"], "Bronze");
    assert_eq!(tiers[0]["count"], 4);

    for days in ["0", "366"] {
        let (status, body) = json_request(
            &router,
            "GET",
            &format!("/v1/analytics/volume?days={}", days),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }
}
