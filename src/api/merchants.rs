use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::gateway::Gateway;

/// Printable QR card material for a merchant. `qr_image_url` is either a
/// hosted URL or a data:image/png;base64 payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantQr {
    pub id: String,
    pub name: String,
    pub category: String,
    pub qr_image_url: String,
}

pub async fn qr_card(gateway: &Gateway, merchant_id: &str) -> Result<MerchantQr, GatewayError> {
    gateway.get(&format!("/merchants/{}/qr", merchant_id.trim())).await
}
