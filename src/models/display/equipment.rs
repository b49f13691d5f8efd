//! Equipment display models

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{Equipment, EquipmentType};
use crate::output::formatters::or_dash;

/// Equipment row; the holder column is only filled while allocated.
#[derive(Debug, Clone, Tabled, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "TYPE")]
    pub equipment_type: String,

    #[tabled(rename = "STATE")]
    pub state: String,

    #[tabled(rename = "PATIENT")]
    pub patient: String,
}

impl From<Equipment> for EquipmentDisplay {
    fn from(e: Equipment) -> Self {
        let (state, patient) = if e.allocated {
            ("Allocated", or_dash(e.patient_name.as_deref()))
        } else {
            ("Available", or_dash(None))
        };

        Self {
            id: e.id,
            name: e.name,
            equipment_type: or_dash(e.equipment_type_name.as_deref()),
            state: state.to_string(),
            patient,
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct EquipmentTypeDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<EquipmentType> for EquipmentTypeDisplay {
    fn from(t: EquipmentType) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: or_dash(t.description.as_deref()),
        }
    }
}
