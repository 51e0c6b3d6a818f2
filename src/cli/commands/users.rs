use clap::Subcommand;

use crate::api::users::{self, StatusAction};
use crate::cli::{utils, OutputFormat};
use crate::gateway::Gateway;

const REQUIRED_ROLES: &[&str] = &["OPS", "SUPPORT", "SUPERADMIN"];

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "List end users")]
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 20)]
        limit: u32,

        #[arg(long, help = "Match against email, phone or name")]
        search: Option<String>,
    },

    #[command(about = "Profile, wallets and recent activity for one user")]
    Show { id: String },

    #[command(about = "Freeze, unfreeze or flag an account")]
    SetStatus {
        id: String,

        #[arg(value_enum)]
        action: StatusAction,

        #[arg(long, help = "Audit note recorded with the action")]
        reason: Option<String>,
    },
}

pub async fn handle(
    cmd: UserCommands,
    gateway: &Gateway,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    utils::require_role(gateway, REQUIRED_ROLES)?;

    match cmd {
        UserCommands::List { page, limit, search } => {
            let page = users::list(gateway, page, limit, search.as_deref())
                .await
                .map_err(utils::describe)?;
            utils::output_body(&output_format, &page, |p| {
                for user in &p.data {
                    println!(
                        "{}  {:<32}  {:<8}  {}",
                        user.id,
                        user.email,
                        user.status,
                        user.full_name.as_deref().unwrap_or("-")
                    );
                }
                println!(
                    "page {}/{} ({} users)",
                    p.pagination.page,
                    p.pagination.total_pages(),
                    p.pagination.total
                );
            })
        }
        UserCommands::Show { id } => {
            let detail = users::detail(gateway, &id).await.map_err(utils::describe)?;
            utils::output_body(&output_format, &detail, |d| {
                println!("{} <{}> [{}]", d.profile.id, d.profile.email, d.profile.status);
                for wallet in &d.wallets {
                    println!("  {:<12} {:<10} {}", wallet.account_category, wallet.account_id, wallet.balance);
                }
                for txn in &d.recent_transactions {
                    println!("  {} {:<10} {:<10} {}", txn.created_at, txn.kind, txn.status, txn.amount);
                }
            })
        }
        UserCommands::SetStatus { id, action, reason } => {
            users::set_status(gateway, &id, action, reason.as_deref())
                .await
                .map_err(utils::describe)?;
            utils::output_success(&output_format, &format!("Applied {action:?} to {id}"), None)
        }
    }
}
