use clap::Subcommand;

use crate::api::transactions;
use crate::cli::{utils, OutputFormat};
use crate::gateway::Gateway;

const REQUIRED_ROLES: &[&str] = &["OPS", "FINANCE", "SUPERADMIN"];

#[derive(Subcommand)]
pub enum TxnCommands {
    #[command(about = "List transactions")]
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 20)]
        limit: u32,

        #[arg(long, help = "Filter by end-user id")]
        user_id: Option<String>,

        #[arg(long, help = "Exact transaction id lookup")]
        txn_id: Option<String>,
    },

    #[command(about = "One transaction with its double-entry ledger lines")]
    Show { id: String },
}

pub async fn handle(
    cmd: TxnCommands,
    gateway: &Gateway,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    utils::require_role(gateway, REQUIRED_ROLES)?;

    match cmd {
        TxnCommands::List { page, limit, user_id, txn_id } => {
            let page = transactions::list(gateway, page, limit, user_id.as_deref(), txn_id.as_deref())
                .await
                .map_err(utils::describe)?;
            utils::output_body(&output_format, &page, |p| {
                for txn in &p.data {
                    println!(
                        "{}  {:<14}  {:<10}  {:>12}  {}",
                        txn.id, txn.kind, txn.status, txn.amount, txn.created_at
                    );
                }
                println!(
                    "page {}/{} ({} transactions)",
                    p.pagination.page,
                    p.pagination.total_pages(),
                    p.pagination.total
                );
            })
        }
        TxnCommands::Show { id } => {
            let detail = transactions::detail(gateway, &id).await.map_err(utils::describe)?;
            utils::output_body(&output_format, &detail, |d| {
                let txn = &d.transaction;
                println!("{}  {} {}  amount {}", txn.id, txn.kind, txn.status, txn.amount);
                println!("  from {} ({})", txn.source.name, txn.source.account_id);
                println!("  to   {} ({})", txn.destination.name, txn.destination.account_id);
                for line in &d.ledger_entries {
                    println!(
                        "  {:<24} dr {:>12} cr {:>12} {}",
                        line.account, line.debit, line.credit, line.currency
                    );
                }
            })
        }
    }
}
