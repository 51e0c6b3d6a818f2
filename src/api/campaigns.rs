use chrono::{DateTime, Utc};
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayError;
use crate::gateway::Gateway;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignType {
    Cashback,
    Referral,
    Goal,
    Gamified,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Active,
    Paused,
    Expired,
    Draft,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashbackType {
    Fixed,
    Percentage,
}

/// Slab reward: a fixed amount or an inclusive [low, high] range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlabReward {
    Fixed(Decimal),
    Range([Decimal; 2]),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slab {
    pub min: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
    pub reward: SlabReward,
}

/// Eligibility predicates and reward calculators, all optional; the backend
/// interprets whichever subset is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_categories: Option<Vec<String>>,
    /// HH:MM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub happy_hour_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub happy_hour_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_kyc_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_cap: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashback_type: Option<CashbackType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashback_value: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashback_percent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_reward_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slabs: Option<Vec<Slab>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CampaignType,
    pub status: CampaignStatus,
    pub start_date: String,
    pub end_date: String,
    pub total_budget: Decimal,
    pub priority: i32,
    pub per_user_cap: Decimal,
    pub rules: CampaignRules,
    #[serde(default)]
    pub burned: Option<Decimal>,
    #[serde(default)]
    pub remaining_budget: Option<Decimal>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Campaign {
    pub fn burned_amount(&self) -> Decimal {
        self.burned.unwrap_or_default()
    }

    /// Remaining budget as reported, else derived from total minus burned.
    pub fn remaining_amount(&self) -> Decimal {
        self.remaining_budget
            .unwrap_or_else(|| self.total_budget - self.burned_amount())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCampaign {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CampaignType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    pub start_date: String,
    pub end_date: String,
    pub total_budget: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_user_cap: Option<Decimal>,
    pub rules: CampaignRules,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCampaign {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_user_cap: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<CampaignRules>,
}

pub async fn list(gateway: &Gateway) -> Result<Vec<Campaign>, GatewayError> {
    gateway.get("/campaigns").await
}

pub async fn get(gateway: &Gateway, id: &str) -> Result<Campaign, GatewayError> {
    gateway.get(&format!("/campaigns/{id}")).await
}

pub async fn create(gateway: &Gateway, req: &CreateCampaign) -> Result<Campaign, GatewayError> {
    gateway.post("/campaigns", serde_json::to_value(req)?).await
}

pub async fn update(
    gateway: &Gateway,
    id: &str,
    req: &UpdateCampaign,
) -> Result<Campaign, GatewayError> {
    gateway
        .patch(&format!("/campaigns/{id}"), serde_json::to_value(req)?)
        .await
}

pub async fn delete(gateway: &Gateway, id: &str) -> Result<Value, GatewayError> {
    gateway.delete(&format!("/campaigns/{id}")).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slab_reward_accepts_fixed_and_range() {
        let slabs: Vec<Slab> = serde_json::from_value(json!([
            { "min": 100, "reward": 10 },
            { "min": 500, "max": 1000, "reward": [25, 75] }
        ]))
        .unwrap();
        assert_eq!(slabs[0].reward, SlabReward::Fixed(Decimal::from(10)));
        assert_eq!(
            slabs[1].reward,
            SlabReward::Range([Decimal::from(25), Decimal::from(75)])
        );
    }

    #[test]
    fn remaining_budget_is_derived_when_absent() {
        let campaign: Campaign = serde_json::from_value(json!({
            "id": "c_1",
            "name": "Diwali Cashback",
            "type": "CASHBACK",
            "status": "ACTIVE",
            "start_date": "2024-10-01",
            "end_date": "2024-11-15",
            "total_budget": 100000,
            "priority": 1,
            "per_user_cap": 500,
            "rules": {},
            "burned": 25000
        }))
        .unwrap();
        assert_eq!(campaign.remaining_amount(), Decimal::from(75000));
    }

    #[test]
    fn update_request_omits_unset_fields() {
        let req = UpdateCampaign {
            status: Some(CampaignStatus::Paused),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "status": "PAUSED" }));
    }
}
