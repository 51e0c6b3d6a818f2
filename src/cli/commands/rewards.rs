use clap::Subcommand;

use crate::api::rewards::{self, RewardAction};
use crate::cli::{utils, OutputFormat};
use crate::gateway::Gateway;

const REQUIRED_ROLES: &[&str] = &["OPS", "FINANCE", "SUPERADMIN"];

#[derive(Subcommand)]
pub enum RewardCommands {
    #[command(about = "Reward payout ledger")]
    Ledger {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 20)]
        limit: u32,
    },

    #[command(about = "Held rewards awaiting moderation")]
    Pending {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 50)]
        limit: u32,
    },

    #[command(about = "Approve, reject or escalate a held reward")]
    Action {
        id: String,

        #[arg(value_enum)]
        action: RewardAction,

        #[arg(long, default_value = "", help = "Moderator note")]
        note: String,
    },
}

pub async fn handle(
    cmd: RewardCommands,
    gateway: &Gateway,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    utils::require_role(gateway, REQUIRED_ROLES)?;

    match cmd {
        RewardCommands::Ledger { page, limit } => {
            let ledger = rewards::ledger(gateway, page, limit).await.map_err(utils::describe)?;
            utils::output_body(&output_format, &ledger, |l| {
                for reward in &l.data {
                    println!(
                        "{}  {:>10}  {:<9?}  {:<24}  {}",
                        reward.reward_id,
                        reward.amount,
                        reward.status,
                        reward.campaign.name,
                        reward.user_name()
                    );
                }
                println!("{} rewards total", l.total);
            })
        }
        RewardCommands::Pending { page, limit } => {
            let held = rewards::pending(gateway, page, limit).await.map_err(utils::describe)?;
            utils::output_body(&output_format, &held, |rewards| {
                if rewards.is_empty() {
                    println!("No rewards held for review");
                }
                for reward in rewards {
                    println!(
                        "{}  {:>10}  {:<24}  {}",
                        reward.reward_id,
                        reward.amount,
                        reward.campaign.name,
                        reward.user_name()
                    );
                }
            })
        }
        RewardCommands::Action { id, action, note } => {
            rewards::action(gateway, &id, action, &note).await.map_err(utils::describe)?;
            utils::output_success(&output_format, &format!("Applied {action:?} to reward {id}"), None)
        }
    }
}
