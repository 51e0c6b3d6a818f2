use clap::Subcommand;

use crate::api::analytics;
use crate::cli::{utils, OutputFormat};
use crate::gateway::Gateway;

const REQUIRED_ROLES: &[&str] = &["OPS", "FINANCE", "SUPERADMIN"];

#[derive(Subcommand)]
pub enum AnalyticsCommands {
    #[command(about = "Burn rate and spend across all campaigns")]
    Global,

    #[command(about = "Conversion and fraud stats for one campaign")]
    Campaign { id: String },

    #[command(about = "Reward pool balance and runway")]
    Pool,

    #[command(about = "Fraud monitor aggregates")]
    Risk,
}

pub async fn handle(
    cmd: AnalyticsCommands,
    gateway: &Gateway,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    utils::require_role(gateway, REQUIRED_ROLES)?;

    match cmd {
        AnalyticsCommands::Global => {
            let stats = analytics::global(gateway).await.map_err(utils::describe)?;
            utils::output_body(&output_format, &stats, |stats| {
                for stat in stats {
                    println!(
                        "{:<28}  burn/hr {:>10}  paid today {:>10}",
                        stat.name, stat.burn_rate_per_hour, stat.paid_today
                    );
                }
            })
        }
        AnalyticsCommands::Campaign { id } => {
            let stats = analytics::campaign(gateway, &id).await.map_err(utils::describe)?;
            utils::output_body(&output_format, &stats, |s| {
                println!("conversion      {:.2}%", s.conversion_rate * 100.0);
                println!("avg reward      {}", s.avg_reward_per_user);
                println!("fraud held      {:.2}%", s.fraud_held_percent);
            })
        }
        AnalyticsCommands::Pool => {
            let pool = analytics::pool(gateway).await.map_err(utils::describe)?;
            utils::output_body(&output_format, &pool, |p| {
                println!("balance {}  runway {:.1} days  [{}]", p.current_balance, p.runway_days, p.status);
                if p.is_critical() {
                    println!("top up the reward pool now");
                }
            })
        }
        AnalyticsCommands::Risk => {
            let monitor = analytics::risk(gateway).await.map_err(utils::describe)?;
            utils::output_body(&output_format, &monitor, |m| {
                println!("{} top earners, {} suspicious users", m.top_earners.len(), m.suspicious_users.len());
            })
        }
    }
}
