//! Equipment models

use serde::{Deserialize, Serialize};

/// Equipment item as returned by `admin/view-equipments`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub allocated: bool,

    /// Name of the patient holding the item, when allocated
    #[serde(default)]
    pub patient_name: Option<String>,

    #[serde(default)]
    pub patient_id: Option<i64>,

    #[serde(default)]
    pub equipment_type_name: Option<String>,
}

/// Equipment category (water bed, leg support, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentType {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Reference to an existing equipment type inside a create request
#[derive(Debug, Clone, Serialize)]
pub struct EquipmentTypeRef {
    pub id: i64,
}

/// Request body for `admin/add-equipment`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEquipment {
    pub name: String,
    pub equipment_type: EquipmentTypeRef,
}

/// Request body for `admin/equipment-types`
#[derive(Debug, Clone, Serialize)]
pub struct NewEquipmentType {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
