use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::query_string;
use crate::error::GatewayError;
use crate::gateway::Gateway;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighVelocityUser {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub peak_hourly_count: u64,
    pub peak_hour_time: String,
    pub peak_hourly_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighVelocityReport {
    pub data: Vec<HighVelocityUser>,
    pub window_minutes: u32,
    pub threshold: u64,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LargeTransaction {
    pub transaction_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub source_user_id: Option<String>,
    pub source_name: String,
    pub destination_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LargeTransactionsReport {
    pub data: Vec<LargeTransaction>,
    pub min_amount_paise: Decimal,
    pub window_minutes: u32,
    pub generated_at: DateTime<Utc>,
}

/// Accounts exceeding `txn_threshold` transactions inside a rolling
/// `interval_minutes` window.
pub async fn high_velocity(
    gateway: &Gateway,
    interval_minutes: u32,
    txn_threshold: u64,
) -> Result<HighVelocityReport, GatewayError> {
    let qs = query_string(&[
        ("interval_minutes", Some(interval_minutes.to_string())),
        ("txn_threshold", Some(txn_threshold.to_string())),
    ]);
    gateway.get(&format!("/risk/high-velocity?{qs}")).await
}

/// Transfers above `min_amount` (minor units) in the last 24h.
pub async fn large_transactions(
    gateway: &Gateway,
    min_amount: u64,
) -> Result<LargeTransactionsReport, GatewayError> {
    let qs = query_string(&[("min_amount", Some(min_amount.to_string()))]);
    gateway.get(&format!("/risk/large-transactions?{qs}")).await
}
