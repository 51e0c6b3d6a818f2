pub mod commands;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::gateway::Gateway;
use crate::session::SessionStore;

#[derive(Parser)]
#[command(name = "baft")]
#[command(about = "BAFT admin console - operations CLI for the payments platform")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, logout and session inspection")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "End-user account lookup and interventions")]
    Users {
        #[command(subcommand)]
        cmd: commands::users::UserCommands,
    },

    #[command(about = "Transaction explorer with ledger drill-down")]
    Txn {
        #[command(subcommand)]
        cmd: commands::transactions::TxnCommands,
    },

    #[command(about = "Reward campaign management")]
    Campaigns {
        #[command(subcommand)]
        cmd: commands::campaigns::CampaignCommands,
    },

    #[command(about = "Reward ledger and held-reward moderation")]
    Rewards {
        #[command(subcommand)]
        cmd: commands::rewards::RewardCommands,
    },

    #[command(about = "Campaign and pool analytics")]
    Analytics {
        #[command(subcommand)]
        cmd: commands::analytics::AnalyticsCommands,
    },

    #[command(about = "Fraud and risk reports")]
    Risk {
        #[command(subcommand)]
        cmd: commands::risk::RiskCommands,
    },

    #[command(about = "Platform balances and maintenance mode")]
    System {
        #[command(subcommand)]
        cmd: commands::system::SystemCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let store = Arc::new(SessionStore::load(config::session_file()?));
    let gateway = Gateway::new(store)?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &gateway, output_format).await,
        Commands::Users { cmd } => commands::users::handle(cmd, &gateway, output_format).await,
        Commands::Txn { cmd } => commands::transactions::handle(cmd, &gateway, output_format).await,
        Commands::Campaigns { cmd } => {
            commands::campaigns::handle(cmd, &gateway, output_format).await
        }
        Commands::Rewards { cmd } => commands::rewards::handle(cmd, &gateway, output_format).await,
        Commands::Analytics { cmd } => {
            commands::analytics::handle(cmd, &gateway, output_format).await
        }
        Commands::Risk { cmd } => commands::risk::handle(cmd, &gateway, output_format).await,
        Commands::System { cmd } => commands::system::handle(cmd, &gateway, output_format).await,
    }
}
