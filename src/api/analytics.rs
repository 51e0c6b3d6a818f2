use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayError;
use crate::gateway::Gateway;

/// Per-campaign burn stats for the global dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalStat {
    pub name: String,
    pub burn_rate_per_hour: Decimal,
    pub paid_today: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignAnalytics {
    pub conversion_rate: f64,
    pub avg_reward_per_user: Decimal,
    pub fraud_held_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolHealth {
    pub current_balance: Decimal,
    pub runway_days: f64,
    pub status: String,
}

impl PoolHealth {
    pub fn is_critical(&self) -> bool {
        self.status.eq_ignore_ascii_case("CRITICAL")
    }
}

/// Fraud-monitor aggregates. The backend's shapes here are still in flux,
/// so the collections stay schemaless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskMonitor {
    #[serde(default)]
    pub top_earners: Vec<Value>,
    #[serde(default)]
    pub suspicious_users: Vec<Value>,
    #[serde(default)]
    pub risk_distribution: Value,
}

pub async fn global(gateway: &Gateway) -> Result<Vec<GlobalStat>, GatewayError> {
    gateway.get("/analytics/global").await
}

pub async fn campaign(gateway: &Gateway, id: &str) -> Result<CampaignAnalytics, GatewayError> {
    gateway.get(&format!("/analytics/campaign/{id}")).await
}

pub async fn pool(gateway: &Gateway) -> Result<PoolHealth, GatewayError> {
    gateway.get("/analytics/pool").await
}

pub async fn risk(gateway: &Gateway) -> Result<RiskMonitor, GatewayError> {
    gateway.get("/analytics/risk").await
}
