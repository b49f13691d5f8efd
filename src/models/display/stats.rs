//! Dashboard counters as metric/value rows

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{DashboardStats, VolunteerDashboardStats};

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DashboardStatDisplay {
    #[tabled(rename = "METRIC")]
    pub metric: String,

    #[tabled(rename = "VALUE")]
    pub value: String,
}

impl DashboardStatDisplay {
    fn new(metric: impl Into<String>, value: impl ToString) -> Self {
        Self {
            metric: metric.into(),
            value: value.to_string(),
        }
    }

    pub fn from_admin(stats: &DashboardStats) -> Vec<Self> {
        vec![
            Self::new("Total patients", stats.total_patients),
            Self::new("Active volunteers", stats.active_volunteers),
            Self::new("Equipment", stats.equipments_total),
            Self::new("Visits done", stats.total_visit_done),
            Self::new("Pending visits", stats.pending_visits),
        ]
    }

    /// The volunteer dashboard has no fixed shape, so every counter is shown.
    pub fn from_volunteer(stats: &VolunteerDashboardStats) -> Vec<Self> {
        stats
            .counters
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Self::new(key.clone(), value)
            })
            .collect()
    }
}
