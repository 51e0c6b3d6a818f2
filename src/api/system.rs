use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::GatewayError;
use crate::gateway::Gateway;

/// One platform-owned account (escrow, settlement pool, reserve).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub acc_type: String,
    pub display_name: String,
    pub currency: String,
    pub balance: Decimal,
    pub last_updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalancesResponse {
    pub data: Vec<Balance>,
}

/// Global maintenance switch. When enabled all consumer APIs return 503
/// with the configured message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceConfig {
    pub is_enabled: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceResponse {
    pub message: String,
    pub config: MaintenanceConfig,
}

pub async fn balances(gateway: &Gateway) -> Result<BalancesResponse, GatewayError> {
    gateway.get("/system/balances").await
}

pub async fn maintenance(gateway: &Gateway) -> Result<MaintenanceResponse, GatewayError> {
    gateway.get("/config/maintenance").await
}

pub async fn set_maintenance(
    gateway: &Gateway,
    config: &MaintenanceConfig,
) -> Result<MaintenanceResponse, GatewayError> {
    gateway
        .patch(
            "/config/maintenance",
            json!({ "is_enabled": config.is_enabled, "message": config.message }),
        )
        .await
}
