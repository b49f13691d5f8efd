//! Administrator API trait

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::client::models::{
    Consumable, ConsumableUsageSummary, DashboardStats, Equipment, EquipmentType, NewConsumable,
    NewEquipment, NewEquipmentType, NewPatient, NewProcedure, NewVolunteer, Patient,
    PatientLocation, Procedure, Visit, VisitAssignment, Volunteer,
};
use crate::client::pagination::{PageEnvelope, PageQuery};
use crate::error::Result;

/// Management operations available to administrators
///
/// Mutations return the server's confirmation message.
#[async_trait]
pub trait AdminApi: Send + Sync {
    // ========================================================================
    // Patients
    // ========================================================================

    async fn list_patients(&self, query: &PageQuery) -> Result<PageEnvelope<Patient>>;

    async fn add_patient(&self, patient: &NewPatient) -> Result<String>;

    async fn delete_patient(&self, id: i64) -> Result<String>;

    async fn update_patient_location(
        &self,
        id: i64,
        location: &PatientLocation,
    ) -> Result<PatientLocation>;

    /// Server-rendered patient export (raw bytes, passed through untouched)
    async fn export_patients(&self, search: Option<&str>) -> Result<Vec<u8>>;

    // ========================================================================
    // Volunteers
    // ========================================================================

    async fn list_volunteers(&self, query: &PageQuery) -> Result<PageEnvelope<Volunteer>>;

    async fn add_volunteer(&self, volunteer: &NewVolunteer) -> Result<String>;

    async fn delete_volunteer(&self, id: i64) -> Result<String>;

    // ========================================================================
    // Equipment
    // ========================================================================

    async fn list_equipment(&self, query: &PageQuery) -> Result<PageEnvelope<Equipment>>;

    async fn add_equipment(&self, equipment: &NewEquipment) -> Result<String>;

    async fn delete_equipment(&self, id: i64) -> Result<String>;

    async fn allocate_equipment(&self, equipment_id: i64, patient_id: i64) -> Result<String>;

    async fn deallocate_equipment(&self, equipment_id: i64) -> Result<String>;

    async fn list_equipment_types(&self) -> Result<Vec<EquipmentType>>;

    async fn create_equipment_type(&self, equipment_type: &NewEquipmentType)
    -> Result<EquipmentType>;

    // ========================================================================
    // Consumables
    // ========================================================================

    async fn list_consumables(&self, query: &PageQuery) -> Result<PageEnvelope<Consumable>>;

    async fn add_consumable(&self, consumable: &NewConsumable) -> Result<String>;

    async fn add_stock(&self, id: i64, quantity: i64) -> Result<Consumable>;

    async fn subtract_stock(&self, id: i64, quantity: i64) -> Result<Consumable>;

    async fn delete_consumable(&self, id: i64) -> Result<String>;

    async fn consumable_usage(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<ConsumableUsageSummary>>;

    // ========================================================================
    // Procedures
    // ========================================================================

    /// Full catalogue; the endpoint is not paginated
    async fn list_procedures(&self) -> Result<Vec<Procedure>>;

    async fn add_procedure(&self, procedure: &NewProcedure) -> Result<String>;

    async fn delete_procedure(&self, id: i64) -> Result<String>;

    // ========================================================================
    // Visits
    // ========================================================================

    async fn list_visits(&self, query: &PageQuery) -> Result<PageEnvelope<Visit>>;

    async fn assign_volunteer(&self, assignment: &VisitAssignment) -> Result<String>;

    /// Server-rendered visit export for a date range
    async fn export_visits(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<u8>>;

    // ========================================================================
    // Dashboard
    // ========================================================================

    async fn dashboard_stats(&self) -> Result<DashboardStats>;
}
