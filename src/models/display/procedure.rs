//! Procedure display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Procedure;
use crate::output::formatters::or_dash;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ProcedureDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<Procedure> for ProcedureDisplay {
    fn from(p: Procedure) -> Self {
        Self {
            id: p.id,
            name: p.name,
            status: or_dash(p.status.as_deref()),
        }
    }
}
