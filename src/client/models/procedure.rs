//! Procedure catalogue models

use serde::{Deserialize, Serialize};

/// A procedure that can be recorded against a visit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Procedure {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Input for `admin/procedure` (sent as a query parameter)
#[derive(Debug, Clone)]
pub struct NewProcedure {
    pub name: String,
}
