//! Dashboard statistics

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Admin dashboard counters from `admin/dashboard-stats`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_patients: i64,
    #[serde(default)]
    pub active_volunteers: i64,
    #[serde(default)]
    pub equipments_total: i64,
    #[serde(default)]
    pub total_visit_done: i64,
    #[serde(default)]
    pub pending_visits: i64,
}

/// Volunteer dashboard counters from `volunteer/dashboard`.
///
/// The server's shape for this one is loose, so counters are kept by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolunteerDashboardStats {
    #[serde(flatten)]
    pub counters: BTreeMap<String, serde_json::Value>,
}
