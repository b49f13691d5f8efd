//! Visit scheduling and reporting models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Consumable;

/// Lifecycle status shared by visits, consumables and procedures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Active,
    Inactive,
    Pending,
    Completed,
    Cancelled,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "ACTIVE",
            Status::Inactive => "INACTIVE",
            Status::Pending => "PENDING",
            Status::Completed => "COMPLETED",
            Status::Cancelled => "CANCELLED",
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Status::Active),
            "INACTIVE" => Ok(Status::Inactive),
            "PENDING" => Ok(Status::Pending),
            "COMPLETED" => Ok(Status::Completed),
            "CANCELLED" => Ok(Status::Cancelled),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// A scheduled or completed visit (visit report)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: i64,

    #[serde(default)]
    pub visit_code: Option<String>,

    #[serde(default)]
    pub patient_id: Option<i64>,

    #[serde(default)]
    pub patient_name: Option<String>,

    #[serde(default)]
    pub volunteer_id: Option<i64>,

    #[serde(default)]
    pub volunteer_name: Option<String>,

    #[serde(default)]
    pub visit_date: Option<NaiveDate>,

    #[serde(default)]
    pub completed_date: Option<NaiveDate>,

    /// Procedure names recorded on the visit
    #[serde(default)]
    pub procedures_done: Vec<String>,

    #[serde(default)]
    pub consumables_used: Vec<ConsumableUsed>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub submitted_by: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Consumable usage line attached to a visit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumableUsed {
    #[serde(default)]
    pub consumable: Option<Consumable>,
    #[serde(default)]
    pub quantity_used: Option<i64>,
}

/// Request body for `admin/assign-volunteer`.
///
/// The server accepts a list of patients; a single assignment is a one-element list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitAssignment {
    pub volunteer_id: i64,
    pub patient_ids: Vec<i64>,
    pub visit_date: NaiveDate,
}

/// Consumable quantity consumed during a visit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumableUsage {
    pub consumable_id: i64,
    pub quantity: i64,
}

/// Request body for `volunteer/submit-report`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitReportRequest {
    pub visit_id: i64,
    pub procedure_ids: Vec<i64>,
    pub consumables: Vec<ConsumableUsage>,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
