//! Volunteer models

use serde::{Deserialize, Serialize};

/// Volunteer as returned by `admin/list-volunteers`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub email: Option<String>,

    /// Some responses use `mobileNumber`, the volunteer form uses `phoneNumber`
    #[serde(default, alias = "mobileNumber")]
    pub phone_number: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    /// Discipline, e.g. "Nurse" or "Physiotherapist"
    #[serde(default)]
    pub specialization: Option<String>,
}

/// Request body for `admin/add-volunteer`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVolunteer {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}
