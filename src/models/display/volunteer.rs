//! Volunteer display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Volunteer;
use crate::output::formatters::or_dash;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct VolunteerDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "PHONE")]
    pub phone: String,

    #[tabled(rename = "SPECIALIZATION")]
    pub specialization: String,
}

impl From<Volunteer> for VolunteerDisplay {
    fn from(v: Volunteer) -> Self {
        Self {
            id: v.id,
            email: or_dash(v.email.as_deref()),
            phone: or_dash(v.phone_number.as_deref()),
            specialization: or_dash(v.specialization.as_deref()),
            name: v.name,
        }
    }
}
