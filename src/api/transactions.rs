use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{query_string, Pagination};
use crate::error::GatewayError;
use crate::gateway::Gateway;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    /// Amount in minor units (paise).
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub source_account_id: String,
    pub destination_account_id: String,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub destination_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsPage {
    pub data: Vec<TransactionSummary>,
    pub pagination: Pagination,
}

/// Counterparty of a transfer; external legs carry no platform user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub account_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub vpa_handle: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub source: Party,
    pub destination: Party,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerLine {
    pub id: String,
    pub account: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionWithLedger {
    pub transaction: TransactionDetail,
    #[serde(rename = "ledgerEntries")]
    pub ledger_entries: Vec<LedgerLine>,
}

pub async fn list(
    gateway: &Gateway,
    page: u32,
    limit: u32,
    user_id: Option<&str>,
    transaction_id: Option<&str>,
) -> Result<TransactionsPage, GatewayError> {
    let qs = query_string(&[
        ("page", Some(page.to_string())),
        ("limit", Some(limit.to_string())),
        ("user_id", user_id.map(str::to_string)),
        ("transaction_id", transaction_id.map(str::to_string)),
    ]);
    gateway.get(&format!("/transactions?{qs}")).await
}

pub async fn detail(gateway: &Gateway, id: &str) -> Result<TransactionWithLedger, GatewayError> {
    gateway.get(&format!("/transactions/{id}")).await
}
