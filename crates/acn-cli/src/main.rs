//! ACN CLI - Command-line interface for the Agent Credit Network
//!
//! Local commands work against a JSON ledger file; `remote` commands go
//! through the hosted API.
//!
//! # Quick Start
//!
//! ```bash
//! # Borrow $5 from yourself and repay it to build credit
//! acn cycle --agent my-agent --amount 5
//!
//! # Manual lifecycle
//! acn loan request --borrower alice --amount 50 --days 30
//! acn loan bid LOAN_001 --lender bob --rate 12
//! acn loan accept LOAN_001 BID_001
//! acn loan repay LOAN_001
//! acn credit show alice
//! ```

use std::path::PathBuf;

use acn_sdk::{AcnClient, AgentRole, Config, Credentials, DEFAULT_ENDPOINT};
use acn_types::{BidId, LoanId};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod display;

use commands::{calc, credit, cycle, deploy, loan, remote};

const DEFAULT_DATA_FILE: &str = "acn_test_data.json";

/// ACN CLI - credit for autonomous agents
#[derive(Parser)]
#[command(name = "acn")]
#[command(author = "ACN Contributors")]
#[command(version)]
#[command(about = "Peer-to-peer lending and credit scores for AI agents", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// JSON ledger used by local commands
    #[arg(long, global = true, env = "ACN_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Show ledger logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a self-loan cycle: request, self-bid at 12%, accept, repay
    Cycle {
        /// Agent borrowing from itself
        #[arg(short, long, default_value = "acn-test-agent")]
        agent: String,

        /// Loan amount in USDC
        #[arg(long, default_value = "5")]
        amount: f64,
    },

    /// Show ledger statistics
    Stats,

    /// Manage loans in the local ledger
    Loan {
        #[command(subcommand)]
        action: LoanCommands,
    },

    /// Inspect credit scores
    Credit {
        #[command(subcommand)]
        action: CreditCommands,
    },

    /// Interest and fee calculators
    Calc {
        #[command(subcommand)]
        action: CalcCommands,
    },

    /// Generate contract deployment files
    Deploy {
        #[command(subcommand)]
        action: DeployCommands,
    },

    /// Talk to the hosted API
    Remote {
        /// API endpoint including the version prefix
        #[arg(long, env = "ACN_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
        endpoint: String,

        #[command(subcommand)]
        action: RemoteCommands,
    },
}

#[derive(Subcommand)]
enum LoanCommands {
    /// Open a loan request
    Request {
        #[arg(long)]
        borrower: String,

        /// Amount in USDC
        #[arg(long)]
        amount: f64,

        /// Term in days
        #[arg(long, default_value = "30")]
        days: u32,

        #[arg(long, default_value = "")]
        purpose: String,
    },

    /// Bid on an open loan
    Bid {
        loan_id: String,

        #[arg(long)]
        lender: String,

        /// APR in percent
        #[arg(long)]
        rate: f64,

        #[arg(long, default_value = "")]
        message: String,
    },

    /// Accept a bid, funding the loan
    Accept { loan_id: String, bid_id: String },

    /// Repay a funded loan
    Repay {
        loan_id: String,

        /// Amount to pay; defaults to the total due
        #[arg(long)]
        amount: Option<f64>,
    },

    /// Mark a funded loan as defaulted
    Default { loan_id: String },

    /// Cancel an open loan
    Cancel {
        loan_id: String,

        #[arg(long)]
        borrower: String,
    },

    /// Show a loan and its bids
    Show { loan_id: String },

    /// List loans
    List {
        /// open, funded, repaid, defaulted or cancelled
        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        borrower: Option<String>,
    },
}

#[derive(Subcommand)]
enum CreditCommands {
    /// Current score, tier and loan ceiling
    Show { agent: String },

    /// Score changes, newest first
    History {
        agent: String,

        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum CalcCommands {
    /// What a lender earns
    Returns {
        #[arg(long)]
        amount: f64,

        /// APR in percent
        #[arg(long)]
        rate: f64,

        #[arg(long, default_value = "30")]
        days: u32,
    },

    /// Default insurance premium for a coverage amount
    Insurance {
        #[arg(long)]
        coverage: f64,
    },

    /// Flash loan fee
    FlashFee {
        #[arg(long)]
        amount: f64,
    },

    /// Reward for referring a loan
    Referral {
        #[arg(long)]
        amount: f64,
    },

    /// Rate with a premium for the borrower's risk score (0-10000)
    RiskRate {
        /// Base APR in percent
        #[arg(long)]
        base: f64,

        #[arg(long)]
        risk_score: u32,
    },
}

#[derive(Subcommand)]
enum DeployCommands {
    /// Write deploy.js, hardhat.config.js, .env.example and package.json
    Generate {
        /// polygon, polygon-mumbai or base
        #[arg(long, default_value = "polygon")]
        network: String,

        /// Output directory
        #[arg(short, long, default_value = "deploy")]
        out: PathBuf,

        /// Protocol fee recipient address
        #[arg(long)]
        fee_recipient: Option<String>,
    },

    /// Print the pre-deployment checklist
    Checklist {
        #[arg(long, default_value = "polygon")]
        network: String,
    },
}

#[derive(Subcommand)]
enum RemoteCommands {
    /// Register this agent and save its api key
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        wallet: String,

        /// borrower, lender or both
        #[arg(long = "type", default_value = "borrower")]
        role: AgentRole,
    },

    /// Browse open loans
    Browse {
        #[arg(long)]
        min_credit: Option<u32>,

        #[arg(long)]
        max_amount: Option<f64>,
    },

    /// Credit score of an agent, or your own
    Credit { agent: Option<String> },

    /// Open a loan request
    Request {
        #[arg(long)]
        amount: f64,

        #[arg(long, default_value = "30")]
        days: u32,

        #[arg(long, default_value = "")]
        purpose: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if let Err(err) = run(cli).await {
        display::error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Cycle { agent, amount } => {
            let ledger = commands::open_ledger(&cli.data).await?;
            cycle::run_cycle(&ledger, &agent, amount).await?;
        }
        Commands::Stats => {
            let ledger = commands::open_ledger(&cli.data).await?;
            cycle::show_stats(&ledger).await?;
        }

        Commands::Loan { action } => {
            let ledger = commands::open_ledger(&cli.data).await?;
            match action {
                LoanCommands::Request {
                    borrower,
                    amount,
                    days,
                    purpose,
                } => loan::request(&ledger, &borrower, amount, days, &purpose).await?,
                LoanCommands::Bid {
                    loan_id,
                    lender,
                    rate,
                    message,
                } => loan::bid(&ledger, &LoanId::from_string(loan_id), &lender, rate, &message).await?,
                LoanCommands::Accept { loan_id, bid_id } => {
                    loan::accept(&ledger, &LoanId::from_string(loan_id), &BidId::from_string(bid_id)).await?
                }
                LoanCommands::Repay { loan_id, amount } => {
                    loan::repay(&ledger, &LoanId::from_string(loan_id), amount).await?
                }
                LoanCommands::Default { loan_id } => {
                    loan::default(&ledger, &LoanId::from_string(loan_id)).await?
                }
                LoanCommands::Cancel { loan_id, borrower } => {
                    loan::cancel(&ledger, &LoanId::from_string(loan_id), &borrower).await?
                }
                LoanCommands::Show { loan_id } => loan::show(&ledger, &LoanId::from_string(loan_id)).await?,
                LoanCommands::List { status, borrower } => {
                    loan::list(&ledger, status.as_deref(), borrower.as_deref()).await?
                }
            }
        }

        Commands::Credit { action } => {
            let ledger = commands::open_ledger(&cli.data).await?;
            match action {
                CreditCommands::Show { agent } => credit::show(&ledger, &agent).await?,
                CreditCommands::History { agent, limit } => {
                    credit::history(&ledger, &agent, limit).await?
                }
            }
        }

        Commands::Calc { action } => match action {
            CalcCommands::Returns { amount, rate, days } => calc::returns(amount, rate, days)?,
            CalcCommands::Insurance { coverage } => calc::insurance(coverage)?,
            CalcCommands::FlashFee { amount } => calc::flash_fee(amount)?,
            CalcCommands::Referral { amount } => calc::referral(amount)?,
            CalcCommands::RiskRate { base, risk_score } => calc::risk_rate(base, risk_score)?,
        },

        Commands::Deploy { action } => match action {
            DeployCommands::Generate {
                network,
                out,
                fee_recipient,
            } => deploy::generate(&network, &out, fee_recipient.as_deref())?,
            DeployCommands::Checklist { network } => deploy::show_checklist(&network)?,
        },

        Commands::Remote { endpoint, action } => {
            let mut client = AcnClient::new(Config {
                endpoint,
                ..Default::default()
            })?;
            if let Some(creds) = Credentials::discover() {
                client = client.with_credentials(creds);
            }
            match action {
                RemoteCommands::Register { name, wallet, role } => {
                    remote::register(&mut client, &name, &wallet, role).await?
                }
                RemoteCommands::Browse {
                    min_credit,
                    max_amount,
                } => remote::browse(&client, min_credit, max_amount).await?,
                RemoteCommands::Credit { agent } => {
                    remote::credit(&client, agent.as_deref()).await?
                }
                RemoteCommands::Request {
                    amount,
                    days,
                    purpose,
                } => remote::request(&client, amount, days, &purpose).await?,
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_data_flag_defaults() {
        let cli = Cli::parse_from(["acn", "stats"]);
        if std::env::var("ACN_DATA_FILE").is_err() {
            assert_eq!(cli.data, PathBuf::from(DEFAULT_DATA_FILE));
        }

        let cli = Cli::parse_from(["acn", "--data", "/tmp/x.json", "loan", "show", "LOAN_001"]);
        assert_eq!(cli.data, PathBuf::from("/tmp/x.json"));
        assert!(matches!(
            cli.command,
            Commands::Loan {
                action: LoanCommands::Show { .. }
            }
        ));
    }

    #[test]
    fn test_remote_register_parses_role() {
        let cli = Cli::parse_from([
            "acn", "remote", "register", "--name", "a", "--wallet", "0x1", "--type", "lender",
        ]);
        match cli.command {
            Commands::Remote {
                action: RemoteCommands::Register { role, .. },
                ..
            } => assert_eq!(role, AgentRole::Lender),
            _ => panic!("expected remote register"),
        }
    }

    #[tokio::test]
    async fn test_cycle_against_temp_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("ledger.json");
        let cli = Cli::parse_from([
            "acn",
            "--data",
            data.to_str().unwrap(),
            "cycle",
            "--agent",
            "tester",
        ]);
        run(cli).await.unwrap();

        let ledger = commands::open_ledger(&data).await.unwrap();
        assert_eq!(ledger.credit_score("tester").await.unwrap().score, 410);
    }
}
