use chrono::{DateTime, Utc};
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::types::{query_string, Pagination};
use crate::error::GatewayError;
use crate::gateway::Gateway;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersPage {
    pub data: Vec<UserSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub status: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub account_id: String,
    pub account_category: String,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentTransaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub profile: UserProfile,
    pub wallets: Vec<Wallet>,
    pub recent_transactions: Vec<RecentTransaction>,
}

/// Account-level interventions available to OPS staff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusAction {
    Freeze,
    Unfreeze,
    Flag,
    Unflag,
}

pub async fn list(
    gateway: &Gateway,
    page: u32,
    limit: u32,
    search: Option<&str>,
) -> Result<UsersPage, GatewayError> {
    let qs = query_string(&[
        ("page", Some(page.to_string())),
        ("limit", Some(limit.to_string())),
        ("q", search.map(str::to_string)),
    ]);
    gateway.get(&format!("/users?{qs}")).await
}

pub async fn detail(gateway: &Gateway, id: &str) -> Result<UserDetail, GatewayError> {
    gateway.get(&format!("/users/{id}")).await
}

/// `PATCH /users/{id}/status`. The backend records the acting admin from the
/// bearer token; `reason` is free-form audit context.
pub async fn set_status(
    gateway: &Gateway,
    id: &str,
    action: StatusAction,
    reason: Option<&str>,
) -> Result<Value, GatewayError> {
    let mut body = json!({ "status": action });
    if let Some(reason) = reason {
        body["reason"] = json!(reason);
    }
    gateway.patch(&format!("/users/{id}/status"), body).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_action_serializes_screaming() {
        assert_eq!(serde_json::to_value(StatusAction::Freeze).unwrap(), json!("FREEZE"));
        assert_eq!(serde_json::to_value(StatusAction::Unflag).unwrap(), json!("UNFLAG"));
    }

    #[test]
    fn user_summary_accepts_camel_case_wire_form() {
        let user: UserSummary = serde_json::from_value(json!({
            "id": "u_1",
            "email": "a@x.com",
            "fullName": "Asha",
            "status": "ACTIVE",
            "createdAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(user.full_name.as_deref(), Some("Asha"));
        assert!(user.last_sign_in_at.is_none());
    }
}
