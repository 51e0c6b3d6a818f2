use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::types::query_string;
use crate::error::GatewayError;
use crate::gateway::Gateway;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardStatus {
    Pending,
    Paid,
    Held,
    Reversed,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMeta {
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(default)]
    pub raw_user_meta_data: UserMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
    pub reward_id: String,
    pub amount: Decimal,
    pub status: RewardStatus,
    pub campaign: CampaignRef,
    #[serde(default)]
    pub user: UserRef,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub hold_reason: Option<String>,
}

impl Reward {
    pub fn user_name(&self) -> &str {
        self.user
            .raw_user_meta_data
            .full_name
            .as_deref()
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsPage {
    pub data: Vec<Reward>,
    pub total: u64,
}

/// Moderation verdicts for held rewards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardAction {
    Approve,
    Reject,
    Escalate,
}

pub async fn ledger(gateway: &Gateway, page: u32, limit: u32) -> Result<RewardsPage, GatewayError> {
    let qs = query_string(&[
        ("page", Some(page.to_string())),
        ("limit", Some(limit.to_string())),
    ]);
    gateway.get(&format!("/rewards?{qs}")).await
}

/// Held rewards awaiting moderation. Filtered client-side off the ledger,
/// matching the admin UI (the backend has no status filter yet).
pub async fn pending(gateway: &Gateway, page: u32, limit: u32) -> Result<Vec<Reward>, GatewayError> {
    let ledger = ledger(gateway, page, limit).await?;
    Ok(ledger
        .data
        .into_iter()
        .filter(|r| r.status == RewardStatus::Held)
        .collect())
}

pub async fn action(
    gateway: &Gateway,
    id: &str,
    action: RewardAction,
    note: &str,
) -> Result<Value, GatewayError> {
    gateway
        .patch(&format!("/rewards/{id}"), json!({ "action": action, "note": note }))
        .await
}
