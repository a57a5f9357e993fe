//! API Routes

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Routes mounted under `/v1`
pub fn api_v1_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/stats", get(handlers::stats::stats))
        .nest("/agents", agent_routes())
        .nest("/loans", loan_routes())
        .route("/bids/my-bids", get(handlers::bids::my_bids))
        .nest("/credit", credit_routes())
        .route("/calculator/returns", get(handlers::calculator::returns))
        .nest("/auto-repay", auto_repay_routes())
        .nest("/leaderboard", leaderboard_routes())
        .nest("/analytics", analytics_routes())
}

fn agent_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(handlers::agents::register))
        .route("/me", get(handlers::agents::me))
}

fn loan_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Borrower
        .route("/request", post(handlers::loans::request_loan))
        .route("/my-requests", get(handlers::loans::my_requests))
        .route("/active", get(handlers::loans::active))
        .route("/:id/accept-bid", post(handlers::loans::accept_bid))
        .route("/:id/repay", post(handlers::loans::repay))
        .route("/:id/cancel", post(handlers::loans::cancel))
        // Lender
        .route("/open", get(handlers::loans::open_loans))
        .route("/lending", get(handlers::loans::lending))
        .route("/:id/bid", post(handlers::loans::place_bid))
        .route("/:id/default", post(handlers::loans::mark_default))
        // Public
        .route("/:id", get(handlers::loans::get_loan))
        .route("/:id/bids", get(handlers::loans::loan_bids))
}

fn credit_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/me", get(handlers::credit::me))
        .route("/:agent", get(handlers::credit::score_of))
        .route("/:agent/history", get(handlers::credit::history))
}

fn auto_repay_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/connect", post(handlers::autorepay::connect))
        .route("/status", get(handlers::autorepay::status))
        .route("/earnings", post(handlers::autorepay::earnings))
        .route("/loans/:id/execute", post(handlers::autorepay::execute))
        .route("/:source", delete(handlers::autorepay::disable))
}

fn leaderboard_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lenders", get(handlers::leaderboard::lenders))
        .route("/borrowers", get(handlers::leaderboard::borrowers))
        .route("/volume", get(handlers::leaderboard::volume))
}

fn analytics_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/overview", get(handlers::analytics::overview))
        .route("/volume", get(handlers::analytics::volume))
        .route("/tiers", get(handlers::analytics::tiers))
}
