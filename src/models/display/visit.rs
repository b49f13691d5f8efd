//! Visit display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Visit;
use crate::output::formatters::{format_date, format_list, or_dash};

/// Visit row used by the admin visit list and both volunteer visit lists.
#[derive(Debug, Clone, Tabled, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "CODE")]
    pub code: String,

    #[tabled(rename = "PATIENT")]
    pub patient: String,

    #[tabled(rename = "VOLUNTEER")]
    pub volunteer: String,

    #[tabled(rename = "DATE")]
    pub date: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "PROCEDURES")]
    pub procedures: String,
}

impl From<Visit> for VisitDisplay {
    fn from(v: Visit) -> Self {
        Self {
            id: v.id,
            code: or_dash(v.visit_code.as_deref()),
            patient: or_dash(v.patient_name.as_deref()),
            volunteer: or_dash(v.volunteer_name.as_deref()),
            date: format_date(v.completed_date.or(v.visit_date)),
            status: or_dash(v.status.as_deref()),
            procedures: format_list(&v.procedures_done),
        }
    }
}
