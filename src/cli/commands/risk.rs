use clap::Subcommand;

use crate::api::risk;
use crate::cli::{utils, OutputFormat};
use crate::gateway::Gateway;

#[derive(Subcommand)]
pub enum RiskCommands {
    #[command(about = "Accounts transacting unusually fast")]
    HighVelocity {
        #[arg(long, default_value_t = 60, help = "Rolling window in minutes")]
        interval_minutes: u32,

        #[arg(long, default_value_t = 10, help = "Transaction count that trips the report")]
        txn_threshold: u64,
    },

    #[command(about = "Transfers above a minor-unit amount in the last 24h")]
    Large {
        #[arg(long, default_value_t = 1_000_000, help = "Minimum amount in paise")]
        min_amount: u64,
    },
}

pub async fn handle(
    cmd: RiskCommands,
    gateway: &Gateway,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        RiskCommands::HighVelocity { interval_minutes, txn_threshold } => {
            utils::require_role(gateway, &["OPS", "SUPPORT", "SUPERADMIN"])?;
            let report = risk::high_velocity(gateway, interval_minutes, txn_threshold)
                .await
                .map_err(utils::describe)?;
            utils::output_body(&output_format, &report, |r| {
                for user in &r.data {
                    println!(
                        "{}  {:<32}  peak {}/hr at {}  ({})",
                        user.user_id,
                        user.email,
                        user.peak_hourly_count,
                        user.peak_hour_time,
                        user.peak_hourly_amount
                    );
                }
                println!(
                    "window {}m, threshold {} txns, generated {}",
                    r.window_minutes, r.threshold, r.generated_at
                );
            })
        }
        RiskCommands::Large { min_amount } => {
            utils::require_role(gateway, &["OPS", "FINANCE", "SUPERADMIN"])?;
            let report = risk::large_transactions(gateway, min_amount)
                .await
                .map_err(utils::describe)?;
            utils::output_body(&output_format, &report, |r| {
                for txn in &r.data {
                    println!(
                        "{}  {:>12}  {} -> {}  {}",
                        txn.transaction_id, txn.amount, txn.source_name, txn.destination_name, txn.created_at
                    );
                }
                println!(
                    "min amount {} paise over {}m, generated {}",
                    r.min_amount_paise, r.window_minutes, r.generated_at
                );
            })
        }
    }
}
