use std::path::PathBuf;

use clap::Subcommand;

use crate::api::campaigns::{self, CampaignStatus, CreateCampaign, UpdateCampaign};
use crate::cli::{utils, OutputFormat};
use crate::gateway::Gateway;

const REQUIRED_ROLES: &[&str] = &["OPS", "FINANCE", "SUPERADMIN"];

#[derive(Subcommand)]
pub enum CampaignCommands {
    #[command(about = "List reward campaigns")]
    List,

    #[command(about = "Show one campaign")]
    Show { id: String },

    #[command(about = "Create a campaign from a JSON definition file")]
    Create {
        #[arg(help = "Path to a JSON campaign definition")]
        file: PathBuf,
    },

    #[command(about = "Apply a JSON patch file to a campaign")]
    Update {
        id: String,

        #[arg(help = "Path to a JSON file with the fields to change")]
        file: PathBuf,
    },

    #[command(about = "Pause an active campaign")]
    Pause { id: String },

    #[command(about = "Resume a paused campaign")]
    Resume { id: String },

    #[command(about = "Delete a campaign")]
    Delete { id: String },
}

pub async fn handle(
    cmd: CampaignCommands,
    gateway: &Gateway,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    utils::require_role(gateway, REQUIRED_ROLES)?;

    match cmd {
        CampaignCommands::List => {
            let campaigns = campaigns::list(gateway).await.map_err(utils::describe)?;
            utils::output_body(&output_format, &campaigns, |list| {
                for c in list {
                    println!(
                        "{}  {:<28}  {:<9?} {:<8?}  budget {:>12}  remaining {:>12}",
                        c.id,
                        c.name,
                        c.kind,
                        c.status,
                        c.total_budget,
                        c.remaining_amount()
                    );
                }
            })
        }
        CampaignCommands::Show { id } => {
            let campaign = campaigns::get(gateway, &id).await.map_err(utils::describe)?;
            utils::output_body(&output_format, &campaign, |c| {
                println!("{}  {} ({:?}, {:?})", c.id, c.name, c.kind, c.status);
                println!("  window    {} .. {}", c.start_date, c.end_date);
                println!("  budget    {} (burned {}, remaining {})", c.total_budget, c.burned_amount(), c.remaining_amount());
                println!("  per-user  {}  priority {}", c.per_user_cap, c.priority);
            })
        }
        CampaignCommands::Create { file } => {
            let req: CreateCampaign = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
            let campaign = campaigns::create(gateway, &req).await.map_err(utils::describe)?;
            utils::output_success(
                &output_format,
                &format!("Created campaign {} ({})", campaign.name, campaign.id),
                Some(serde_json::to_value(&campaign)?),
            )
        }
        CampaignCommands::Update { id, file } => {
            let req: UpdateCampaign = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
            let campaign = campaigns::update(gateway, &id, &req).await.map_err(utils::describe)?;
            utils::output_success(
                &output_format,
                &format!("Updated campaign {}", campaign.id),
                Some(serde_json::to_value(&campaign)?),
            )
        }
        CampaignCommands::Pause { id } => {
            set_status(gateway, &id, CampaignStatus::Paused, &output_format).await
        }
        CampaignCommands::Resume { id } => {
            set_status(gateway, &id, CampaignStatus::Active, &output_format).await
        }
        CampaignCommands::Delete { id } => {
            campaigns::delete(gateway, &id).await.map_err(utils::describe)?;
            utils::output_success(&output_format, &format!("Deleted campaign {id}"), None)
        }
    }
}

async fn set_status(
    gateway: &Gateway,
    id: &str,
    status: CampaignStatus,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    let req = UpdateCampaign {
        status: Some(status),
        ..Default::default()
    };
    let campaign = campaigns::update(gateway, id, &req).await.map_err(utils::describe)?;
    utils::output_success(
        output_format,
        &format!("Campaign {} is now {:?}", campaign.id, campaign.status),
        None,
    )
}
