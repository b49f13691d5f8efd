//! Patient display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Patient;
use crate::output::formatters::{format_location, opt, or_dash, truncate};

/// Patient display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "AGE")]
    pub age: String,

    #[tabled(rename = "GENDER")]
    pub gender: String,

    #[tabled(rename = "MOBILE")]
    pub mobile: String,

    /// Condition, shortened for table output
    #[tabled(rename = "CONDITION")]
    pub condition: String,

    #[tabled(rename = "LOCATION")]
    pub location: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<Patient> for PatientDisplay {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            age: opt(p.age),
            gender: or_dash(p.gender.as_deref()),
            mobile: or_dash(p.mobile_number.as_deref()),
            condition: truncate(&or_dash(p.medical_condition.as_deref()), 30),
            location: format_location(p.latitude, p.longitude),
            status: or_dash(p.alivestatus.as_deref().or(p.status.as_deref())),
            name: p.name,
        }
    }
}
