use clap::Subcommand;
use serde_json::json;

use crate::auth::{LoginFlow, LoginStep};
use crate::cli::{utils, OutputFormat};
use crate::gateway::Gateway;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Sign in with email, password and an authenticator code")]
    Login {
        email: String,

        #[arg(long, help = "Password (prompted when omitted)")]
        password: Option<String>,
    },

    #[command(about = "Revoke the server session and clear local state")]
    Logout,

    #[command(about = "Show the signed-in admin")]
    Whoami,

    #[command(about = "Show session and target environment")]
    Status,
}

pub async fn handle(
    cmd: AuthCommands,
    gateway: &Gateway,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => login(gateway, &email, password, &output_format).await,
        AuthCommands::Logout => logout(gateway, &output_format).await,
        AuthCommands::Whoami => whoami(gateway, &output_format),
        AuthCommands::Status => status(gateway, &output_format),
    }
}

async fn login(
    gateway: &Gateway,
    email: &str,
    password: Option<String>,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => utils::prompt("Password: ")?,
    };

    let mut flow = LoginFlow::new(gateway);
    match flow.begin(email, &password).await.map_err(utils::describe)? {
        LoginStep::MfaSetup { qr_code_url, otpauth_url, .. } => {
            println!("First sign-in: enroll this account in your authenticator app.");
            println!("  QR code:  {qr_code_url}");
            println!("  Manual:   {otpauth_url}");
        }
        LoginStep::MfaCode { .. } => {
            println!("Enter the 6-digit code from your authenticator app.");
        }
        LoginStep::Credentials | LoginStep::Authenticated => {}
    }

    let code = utils::prompt("Code: ")?;
    let admin = flow.verify(&code).await.map_err(utils::describe)?;

    utils::output_success(
        output_format,
        &format!("Logged in as {} ({})", admin.email, admin.role),
        Some(json!({ "admin": { "id": admin.id, "email": admin.email, "role": admin.role } })),
    )
}

async fn logout(gateway: &Gateway, output_format: &OutputFormat) -> anyhow::Result<()> {
    gateway.logout().await?;
    utils::output_success(output_format, "Logged out", None)
}

fn whoami(gateway: &Gateway, output_format: &OutputFormat) -> anyhow::Result<()> {
    match gateway.session().admin {
        Some(admin) => utils::output_success(
            output_format,
            &format!("{} ({})", admin.email, admin.role),
            Some(json!({ "admin": {
                "id": admin.id,
                "email": admin.email,
                "role": admin.role,
                "fullName": admin.full_name,
            }})),
        ),
        None => utils::output_error(output_format, "Not logged in", None),
    }
}

fn status(gateway: &Gateway, output_format: &OutputFormat) -> anyhow::Result<()> {
    let config = crate::config::config();
    let session = gateway.session();
    utils::output_success(
        output_format,
        &format!(
            "{} ({}) - {}",
            config.api.base_url,
            config.environment,
            if session.is_authenticated() { "logged in" } else { "logged out" }
        ),
        Some(json!({
            "base_url": config.api.base_url,
            "environment": config.environment.to_string(),
            "authenticated": session.is_authenticated(),
            "admin": session.admin.as_ref().map(|a| a.email.clone()),
        })),
    )
}
