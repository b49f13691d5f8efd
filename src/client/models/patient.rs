//! Patient models

use serde::{Deserialize, Serialize};

/// Patient as returned by `admin/list-patients`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub mobile_number: Option<String>,

    #[serde(default)]
    pub age: Option<u32>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub medical_condition: Option<String>,

    #[serde(default)]
    pub emergency_contact: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// Record status (ACTIVE, INACTIVE)
    #[serde(default)]
    pub status: Option<String>,

    /// Alive/deceased marker, lower-cased by the server
    #[serde(default, alias = "aliveStatus")]
    pub alivestatus: Option<String>,
}

/// Request body for `admin/add-patient`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub mobile_number: String,
    pub age: u32,
    pub gender: String,
    pub address: String,
    pub medical_condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Body for `api/patients/{id}/location`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientLocation {
    pub latitude: f64,
    pub longitude: f64,
}
