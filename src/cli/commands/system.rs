use clap::Subcommand;

use crate::api::{merchants, system};
use crate::api::system::MaintenanceConfig;
use crate::cli::{utils, OutputFormat};
use crate::gateway::Gateway;

#[derive(Subcommand)]
pub enum SystemCommands {
    #[command(about = "Platform-owned account balances")]
    Balances,

    #[command(about = "Show the maintenance-mode switch")]
    Maintenance,

    #[command(about = "Enable or disable maintenance mode")]
    SetMaintenance {
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        #[arg(long)]
        disable: bool,

        #[arg(
            long,
            default_value = "We are performing scheduled maintenance. Please try again later.",
            help = "Message shown to consumer apps while enabled"
        )]
        message: String,
    },

    #[command(about = "Printable QR card material for a merchant")]
    Qr { merchant_id: String },
}

pub async fn handle(
    cmd: SystemCommands,
    gateway: &Gateway,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        SystemCommands::Balances => {
            utils::require_role(gateway, &["OPS", "FINANCE", "SUPERADMIN"])?;
            let balances = system::balances(gateway).await.map_err(utils::describe)?;
            utils::output_body(&output_format, &balances, |b| {
                for balance in &b.data {
                    println!(
                        "{:<12}  {:<28}  {} {:>16}  (as of {})",
                        balance.acc_type,
                        balance.display_name,
                        balance.currency,
                        balance.balance,
                        balance.last_updated_at
                    );
                }
            })
        }
        SystemCommands::Maintenance => {
            utils::require_role(gateway, &["SUPERADMIN"])?;
            let response = system::maintenance(gateway).await.map_err(utils::describe)?;
            utils::output_body(&output_format, &response, |r| {
                println!(
                    "maintenance {}: {}",
                    if r.config.is_enabled { "ON" } else { "off" },
                    r.config.message
                );
            })
        }
        SystemCommands::SetMaintenance { enable, disable, message } => {
            utils::require_role(gateway, &["SUPERADMIN"])?;
            if enable == disable {
                anyhow::bail!("Pass exactly one of --enable or --disable");
            }
            let config = MaintenanceConfig {
                is_enabled: enable,
                message,
            };
            let response = system::set_maintenance(gateway, &config).await.map_err(utils::describe)?;
            utils::output_success(&output_format, &response.message, None)
        }
        SystemCommands::Qr { merchant_id } => {
            utils::require_role(gateway, &["SUPERADMIN"])?;
            let qr = merchants::qr_card(gateway, &merchant_id).await.map_err(utils::describe)?;
            utils::output_body(&output_format, &qr, |q| {
                println!("{} ({}) [{}]", q.name, q.id, q.category);
                println!("{}", q.qr_image_url);
            })
        }
    }
}
