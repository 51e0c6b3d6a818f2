use std::io::{self, Write};

use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::error::GatewayError;
use crate::gateway::Gateway;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(obj), Some(extra)) =
                (response.as_object_mut(), data.as_ref().and_then(Value::as_object))
            {
                obj.extend(extra.clone());
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Render a typed API response: pretty JSON in json mode, else the
/// caller-supplied text renderer.
pub fn output_body<T, F>(
    output_format: &OutputFormat,
    body: &T,
    render_text: F,
) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T),
{
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(body)?);
        }
        OutputFormat::Text => render_text(body),
    }
    Ok(())
}

/// Map gateway failures to operator-facing messages. An expired session
/// is the one case with a fixed next step.
pub fn describe(err: GatewayError) -> anyhow::Error {
    if err.is_session_expired() {
        anyhow::anyhow!("Session expired. Run `baft auth login` to sign in again.")
    } else {
        anyhow::Error::new(err)
    }
}

/// Refuse up-front when the signed-in admin lacks every required role.
pub fn require_role(gateway: &Gateway, roles: &[&str]) -> anyhow::Result<()> {
    if !gateway.is_authenticated() {
        anyhow::bail!("Not logged in. Run `baft auth login` first.");
    }
    if !gateway.has_role(roles) {
        anyhow::bail!("This command requires one of the roles: {}", roles.join(", "));
    }
    Ok(())
}

/// Prompt on stdout and read one trimmed line from stdin.
pub fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
