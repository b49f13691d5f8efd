//! Consumable display models

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{Consumable, ConsumableUsageSummary};
use crate::output::formatters::{opt, or_dash};

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ConsumableDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "CATEGORY")]
    pub category: String,

    #[tabled(rename = "STOCK")]
    pub stock: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<Consumable> for ConsumableDisplay {
    fn from(c: Consumable) -> Self {
        let stock = match (c.stock_quantity, c.unit.as_deref()) {
            (Some(qty), Some(unit)) if !unit.trim().is_empty() => format!("{} {}", qty, unit),
            (qty, _) => opt(qty),
        };

        Self {
            id: c.id,
            name: c.name,
            category: or_dash(c.category.as_deref()),
            stock,
            status: opt(c.status.map(|s| s.as_str())),
        }
    }
}

/// One row of the consumable usage report.
#[derive(Debug, Clone, Tabled, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageDisplay {
    #[tabled(rename = "ID")]
    pub consumable_id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "USED")]
    pub total_used: i64,
}

impl From<ConsumableUsageSummary> for UsageDisplay {
    fn from(u: ConsumableUsageSummary) -> Self {
        Self {
            consumable_id: u.consumable_id,
            name: u.name,
            total_used: u.total_quantity_used,
        }
    }
}
