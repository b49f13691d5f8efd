//! Consumable stock models

use serde::{Deserialize, Serialize};

use super::Status;

/// Consumable stock item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumable {
    pub id: i64,

    pub name: String,

    /// e.g. Injection, First Aid, Hygiene
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default, alias = "quantity")]
    pub stock_quantity: Option<i64>,

    /// e.g. pieces, box, packets
    #[serde(default)]
    pub unit: Option<String>,

    #[serde(default)]
    pub status: Option<Status>,
}

/// Request body for `admin/consumable/add`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConsumable {
    pub name: String,
    pub category: String,
    pub stock_quantity: i64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// One row of `admin/consumable/usage-summary`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumableUsageSummary {
    pub consumable_id: i64,
    pub name: String,
    #[serde(default)]
    pub total_quantity_used: i64,
}
