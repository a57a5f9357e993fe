//! Commands that go through the hosted API with the client skill

use acn_sdk::{AcnClient, AgentRole};

use crate::display;

pub async fn register(
    client: &mut AcnClient,
    name: &str,
    wallet: &str,
    role: AgentRole,
) -> anyhow::Result<()> {
    let profile = client.register(name, wallet, role).await?;
    display::success(&format!("Registered {} as {}", profile.name, profile.role));
    display::kv("API key", profile.api_key.as_str());
    display::info("Credentials saved; later commands pick them up automatically");
    Ok(())
}

pub async fn browse(
    client: &AcnClient,
    min_credit: Option<u32>,
    max_amount: Option<f64>,
) -> anyhow::Result<()> {
    let listings = client.browse_loans(min_credit, max_amount).await?;
    display::section(&format!("Open loans ({})", listings.len()));
    if listings.is_empty() {
        display::info("Nothing to fund right now");
    }
    for listing in &listings {
        display::loan_row(&listing.loan);
        println!(
            "      score {} ({}), {} bid(s)",
            listing.borrower_score,
            display::tier(listing.borrower_tier),
            listing.bid_count
        );
    }
    Ok(())
}

/// Own score when `agent` is omitted
pub async fn credit(client: &AcnClient, agent: Option<&str>) -> anyhow::Result<()> {
    let (name, credit) = match agent {
        Some(agent) => (agent.to_string(), client.credit_score_of(agent).await?),
        None => {
            let name = client
                .credentials()
                .and_then(|c| c.agent_name.clone())
                .unwrap_or_else(|| "me".to_string());
            (name, client.credit_score().await?)
        }
    };
    display::section("Credit score");
    display::credit(&name, &credit);
    Ok(())
}

pub async fn request(
    client: &AcnClient,
    amount: f64,
    duration_days: u32,
    purpose: &str,
) -> anyhow::Result<()> {
    let loan = client.request_loan(amount, duration_days, purpose).await?;
    display::success(&format!(
        "Loan {} opened: {} for {} days",
        loan.id,
        display::money(loan.amount),
        loan.duration_days
    ));
    Ok(())
}
