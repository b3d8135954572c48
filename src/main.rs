//! # GISource — academic-opportunity posting automation
//!
//! One invocation processes one posting: pull candidates from the intake
//! spreadsheet, select one with the weighted-random policy, validate it,
//! persist the transformed record, move the row to the Filled sheet, and
//! route the rendered chat message and article.
//!
//! Usage:
//!   gisource                          # run with ~/.gisource/config.toml
//!   gisource --config ./config.toml   # custom config
//!   gisource --table Coding_Test      # write events to a test table

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use gisource_channels::{DocsClient, SheetsClient, SmtpMailer};
use gisource_core::config::GisourceConfig;
use gisource_core::members::GroupMembers;
use gisource_pipeline::{RunContext, RunOutcome};
use gisource_store::MySqlStore;

#[derive(Parser)]
#[command(
    name = "gisource",
    version,
    about = "🌍 GISource — academic opportunity posting automation"
)]
struct Cli {
    /// Config file path (default: ~/.gisource/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Operator name; chat prompts are routed to this group member
    #[arg(long)]
    operator: Option<String>,

    /// Event table override (point at a test table for rehearsal runs)
    #[arg(long)]
    table: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            let expanded = shellexpand::tilde(path).to_string();
            GisourceConfig::load_from(Path::new(&expanded))?
        }
        None => GisourceConfig::load()?,
    };
    if let Some(operator) = cli.operator {
        config.operator = operator;
    }
    if let Some(table) = cli.table {
        config.database.event_table = table;
    }

    let members_path = shellexpand::tilde(&config.group_members_file).to_string();
    let members = GroupMembers::load(Path::new(&members_path))?;

    let store = MySqlStore::connect(&config.database).await?;
    let source = SheetsClient::new(config.sheets.clone());
    let document = DocsClient::new(config.docs.clone());
    let mailer = SmtpMailer::new(config.smtp.clone());

    let ctx = RunContext {
        config: &config,
        members: &members,
        source: &source,
        store: &store,
        mailer: &mailer,
        document: &document,
    };

    let mut rng = StdRng::from_entropy();
    match ctx.run(&mut rng).await? {
        RunOutcome::Completed { event_id } => {
            tracing::info!("🎉 Run complete, event id {event_id}");
        }
        RunOutcome::NoEligibleCandidates => {
            tracing::info!("Run complete: no eligible postings, reminder broadcast sent");
        }
        RunOutcome::ValidationFailed { verifier } => {
            tracing::warn!("Run complete: validation failed, {verifier} notified");
        }
        RunOutcome::UnknownVerifier { verifier } => {
            tracing::warn!("Run complete: validation failed, verifier {verifier} not in directory");
        }
        RunOutcome::AbbreviationUnavailable { event_id } => {
            tracing::warn!(
                "Run complete: event {event_id} persisted, but no role abbreviation could be generated"
            );
        }
    }
    Ok(())
}
