//! Mock care service client for testing
//!
//! Provides an in-memory implementation of the API traits for unit testing
//! without making real API calls. Mutations change the in-memory lists so a
//! reload after a delete sees the row gone.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::api::{AdminApi, AuthApi, VolunteerApi};
use super::models::{
    AuthResponse, Consumable, ConsumableUsageSummary, DashboardStats, Equipment, EquipmentType,
    NewConsumable, NewEquipment, NewEquipmentType, NewPatient, NewProcedure, NewVolunteer,
    Patient, PatientLocation, Procedure, Visit, VisitAssignment, VisitReportRequest, Volunteer,
    VolunteerDashboardStats,
};
use super::pagination::{PageEnvelope, PageQuery};
use crate::error::{ApiError, Result};
use crate::validation::Validate;

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockCareClient::new()
///     .with_patients(vec![patient(1, "Asha")])
///     .await;
///
/// let page = mock.list_patients(&PageQuery::default()).await?;
/// assert_eq!(page.content.len(), 1);
/// ```
#[derive(Default)]
pub struct MockCareClient {
    patients: Arc<Mutex<Vec<Patient>>>,
    volunteers: Arc<Mutex<Vec<Volunteer>>>,
    equipment: Arc<Mutex<Vec<Equipment>>>,
    equipment_types: Arc<Mutex<Vec<EquipmentType>>>,
    consumables: Arc<Mutex<Vec<Consumable>>>,
    procedures: Arc<Mutex<Vec<Procedure>>>,
    visits: Arc<Mutex<Vec<Visit>>>,
    todays_visits: Arc<Mutex<Vec<Visit>>>,
    stats: Arc<Mutex<DashboardStats>>,
    /// Credential to return from authenticate
    token: Arc<Mutex<Option<String>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
    /// Bodies sent to assign_volunteer
    assignments: Arc<Mutex<Vec<VisitAssignment>>>,
    /// Bodies sent to submit_report
    reports: Arc<Mutex<Vec<VisitReportRequest>>>,
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The API method called (e.g., "list_patients", "delete_patient")
    pub method: &'static str,
    /// Query, for list calls
    pub query: Option<PageQuery>,
    /// Target id, for calls that address one row
    pub id: Option<i64>,
}

impl MockCareClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_patients(self, patients: Vec<Patient>) -> Self {
        *self.patients.lock().await = patients;
        self
    }

    /// Configure the credential returned from authenticate.
    pub async fn with_token(self, token: impl Into<String>) -> Self {
        *self.token.lock().await = Some(token.into());
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Number of calls made to the named method.
    pub async fn call_count(&self, method: &str) -> usize {
        self.captured_requests
            .lock()
            .await
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    pub async fn assignments(&self) -> Vec<VisitAssignment> {
        self.assignments.lock().await.clone()
    }

    pub async fn reports(&self) -> Vec<VisitReportRequest> {
        self.reports.lock().await.clone()
    }

    /// Record the call, then fail if an error is pending.
    async fn call(&self, method: &'static str, query: Option<&PageQuery>, id: Option<i64>) -> Result<()> {
        self.captured_requests.lock().await.push(CapturedRequest {
            method,
            query: query.cloned(),
            id,
        });

        let mut error = self.error.lock().await;
        match error.take() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

/// Apply the search term to a name, case-insensitively.
fn matches_search(name: &str, query: &PageQuery) -> bool {
    match query.search {
        Some(ref term) => name.to_lowercase().contains(&term.to_lowercase()),
        None => true,
    }
}

fn not_found(what: &str, id: i64) -> ApiError {
    ApiError::RequestFailed {
        status: 404,
        message: format!("{} {} not found", what, id),
    }
}

// ============================================================================
// AuthApi Implementation
// ============================================================================

#[async_trait]
impl AuthApi for MockCareClient {
    async fn authenticate(&self, _email: &str, _password: &str) -> Result<AuthResponse> {
        self.call("authenticate", None, None).await?;
        let token = self.token.lock().await.clone();
        token
            .map(|token| AuthResponse { token })
            .ok_or_else(|| ApiError::RequestFailed {
                status: 401,
                message: "Bad credentials".to_string(),
            }
            .into())
    }
}

// ============================================================================
// AdminApi Implementation
// ============================================================================

#[async_trait]
impl AdminApi for MockCareClient {
    async fn list_patients(&self, query: &PageQuery) -> Result<PageEnvelope<Patient>> {
        self.call("list_patients", Some(query), None).await?;
        let rows: Vec<Patient> = self
            .patients
            .lock()
            .await
            .iter()
            .filter(|p| matches_search(&p.name, query))
            .cloned()
            .collect();
        Ok(PageEnvelope::from_all(rows, query))
    }

    async fn add_patient(&self, patient: &NewPatient) -> Result<String> {
        patient.validate()?;
        self.call("add_patient", None, None).await?;
        let mut patients = self.patients.lock().await;
        let id = patients.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        patients.push(Patient {
            id,
            name: patient.name.clone(),
            mobile_number: Some(patient.mobile_number.clone()),
            age: Some(patient.age),
            gender: Some(patient.gender.clone()),
            address: Some(patient.address.clone()),
            medical_condition: Some(patient.medical_condition.clone()),
            emergency_contact: patient.emergency_contact.clone(),
            latitude: patient.latitude,
            longitude: patient.longitude,
            status: Some("ACTIVE".to_string()),
            alivestatus: Some("alive".to_string()),
        });
        Ok("Patient added successfully".to_string())
    }

    async fn delete_patient(&self, id: i64) -> Result<String> {
        self.call("delete_patient", None, Some(id)).await?;
        let mut patients = self.patients.lock().await;
        let before = patients.len();
        patients.retain(|p| p.id != id);
        if patients.len() == before {
            return Err(not_found("Patient", id).into());
        }
        Ok("Patient deleted successfully".to_string())
    }

    async fn update_patient_location(
        &self,
        id: i64,
        location: &PatientLocation,
    ) -> Result<PatientLocation> {
        self.call("update_patient_location", None, Some(id)).await?;
        let mut patients = self.patients.lock().await;
        let patient = patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found("Patient", id))?;
        patient.latitude = Some(location.latitude);
        patient.longitude = Some(location.longitude);
        Ok(location.clone())
    }

    async fn export_patients(&self, _search: Option<&str>) -> Result<Vec<u8>> {
        self.call("export_patients", None, None).await?;
        Ok(b"ID,Name,Phone,Address\n".to_vec())
    }

    async fn list_volunteers(&self, query: &PageQuery) -> Result<PageEnvelope<Volunteer>> {
        self.call("list_volunteers", Some(query), None).await?;
        let rows: Vec<Volunteer> = self
            .volunteers
            .lock()
            .await
            .iter()
            .filter(|v| matches_search(&v.name, query))
            .cloned()
            .collect();
        Ok(PageEnvelope::from_all(rows, query))
    }

    async fn add_volunteer(&self, volunteer: &NewVolunteer) -> Result<String> {
        volunteer.validate()?;
        self.call("add_volunteer", None, None).await?;
        let mut volunteers = self.volunteers.lock().await;
        let id = volunteers.iter().map(|v| v.id).max().unwrap_or(0) + 1;
        volunteers.push(Volunteer {
            id,
            name: volunteer.name.clone(),
            email: Some(volunteer.email.clone()),
            phone_number: volunteer.phone_number.clone(),
            address: volunteer.address.clone(),
            specialization: volunteer.specialization.clone(),
        });
        Ok("Volunteer added successfully".to_string())
    }

    async fn delete_volunteer(&self, id: i64) -> Result<String> {
        self.call("delete_volunteer", None, Some(id)).await?;
        self.volunteers.lock().await.retain(|v| v.id != id);
        Ok("Volunteer deleted".to_string())
    }

    async fn list_equipment(&self, query: &PageQuery) -> Result<PageEnvelope<Equipment>> {
        self.call("list_equipment", Some(query), None).await?;
        let rows: Vec<Equipment> = self
            .equipment
            .lock()
            .await
            .iter()
            .filter(|e| matches_search(&e.name, query))
            .cloned()
            .collect();
        Ok(PageEnvelope::from_all(rows, query))
    }

    async fn add_equipment(&self, equipment: &NewEquipment) -> Result<String> {
        equipment.validate()?;
        self.call("add_equipment", None, None).await?;
        let type_name = self
            .equipment_types
            .lock()
            .await
            .iter()
            .find(|t| t.id == equipment.equipment_type.id)
            .map(|t| t.name.clone());
        let mut items = self.equipment.lock().await;
        let id = items.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        items.push(Equipment {
            id,
            name: equipment.name.clone(),
            allocated: false,
            patient_name: None,
            patient_id: None,
            equipment_type_name: type_name,
        });
        Ok("Equipment added successfully".to_string())
    }

    async fn delete_equipment(&self, id: i64) -> Result<String> {
        self.call("delete_equipment", None, Some(id)).await?;
        self.equipment.lock().await.retain(|e| e.id != id);
        Ok("Equipment deleted".to_string())
    }

    async fn allocate_equipment(&self, equipment_id: i64, patient_id: i64) -> Result<String> {
        self.call("allocate_equipment", None, Some(equipment_id)).await?;
        let patient_name = self
            .patients
            .lock()
            .await
            .iter()
            .find(|p| p.id == patient_id)
            .map(|p| p.name.clone());
        let mut items = self.equipment.lock().await;
        let item = items
            .iter_mut()
            .find(|e| e.id == equipment_id)
            .ok_or_else(|| not_found("Equipment", equipment_id))?;
        if item.allocated {
            return Err(ApiError::RequestFailed {
                status: 400,
                message: "Equipment already allocated".to_string(),
            }
            .into());
        }
        item.allocated = true;
        item.patient_id = Some(patient_id);
        item.patient_name = patient_name;
        Ok("Equipment allocated successfully".to_string())
    }

    async fn deallocate_equipment(&self, equipment_id: i64) -> Result<String> {
        self.call("deallocate_equipment", None, Some(equipment_id)).await?;
        let mut items = self.equipment.lock().await;
        let item = items
            .iter_mut()
            .find(|e| e.id == equipment_id)
            .ok_or_else(|| not_found("Equipment", equipment_id))?;
        item.allocated = false;
        item.patient_id = None;
        item.patient_name = None;
        Ok("Equipment deallocated successfully".to_string())
    }

    async fn list_equipment_types(&self) -> Result<Vec<EquipmentType>> {
        self.call("list_equipment_types", None, None).await?;
        Ok(self.equipment_types.lock().await.clone())
    }

    async fn create_equipment_type(
        &self,
        equipment_type: &NewEquipmentType,
    ) -> Result<EquipmentType> {
        equipment_type.validate()?;
        self.call("create_equipment_type", None, None).await?;
        let mut types = self.equipment_types.lock().await;
        let created = EquipmentType {
            id: types.iter().map(|t| t.id).max().unwrap_or(0) + 1,
            name: equipment_type.name.clone(),
            description: equipment_type.description.clone(),
        };
        types.push(created.clone());
        Ok(created)
    }

    async fn list_consumables(&self, query: &PageQuery) -> Result<PageEnvelope<Consumable>> {
        self.call("list_consumables", Some(query), None).await?;
        let rows: Vec<Consumable> = self
            .consumables
            .lock()
            .await
            .iter()
            .filter(|c| matches_search(&c.name, query))
            .cloned()
            .collect();
        Ok(PageEnvelope::from_all(rows, query))
    }

    async fn add_consumable(&self, consumable: &NewConsumable) -> Result<String> {
        consumable.validate()?;
        self.call("add_consumable", None, None).await?;
        let mut items = self.consumables.lock().await;
        let id = items.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        items.push(Consumable {
            id,
            name: consumable.name.clone(),
            category: Some(consumable.category.clone()),
            stock_quantity: Some(consumable.stock_quantity),
            unit: Some(consumable.unit.clone()),
            status: consumable.status,
        });
        Ok("Consumable added".to_string())
    }

    async fn add_stock(&self, id: i64, quantity: i64) -> Result<Consumable> {
        self.call("add_stock", None, Some(id)).await?;
        let mut items = self.consumables.lock().await;
        let item = items
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Consumable", id))?;
        item.stock_quantity = Some(item.stock_quantity.unwrap_or(0) + quantity);
        Ok(item.clone())
    }

    async fn subtract_stock(&self, id: i64, quantity: i64) -> Result<Consumable> {
        self.call("subtract_stock", None, Some(id)).await?;
        let mut items = self.consumables.lock().await;
        let item = items
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Consumable", id))?;
        let current = item.stock_quantity.unwrap_or(0);
        if current < quantity {
            return Err(ApiError::RequestFailed {
                status: 400,
                message: "Insufficient stock".to_string(),
            }
            .into());
        }
        item.stock_quantity = Some(current - quantity);
        Ok(item.clone())
    }

    async fn delete_consumable(&self, id: i64) -> Result<String> {
        self.call("delete_consumable", None, Some(id)).await?;
        self.consumables.lock().await.retain(|c| c.id != id);
        Ok(String::new())
    }

    async fn consumable_usage(
        &self,
        _start: Option<NaiveDate>,
        _end: Option<NaiveDate>,
    ) -> Result<Vec<ConsumableUsageSummary>> {
        self.call("consumable_usage", None, None).await?;
        Ok(Vec::new())
    }

    async fn list_procedures(&self) -> Result<Vec<Procedure>> {
        self.call("list_procedures", None, None).await?;
        Ok(self.procedures.lock().await.clone())
    }

    async fn add_procedure(&self, procedure: &NewProcedure) -> Result<String> {
        procedure.validate()?;
        self.call("add_procedure", None, None).await?;
        let mut items = self.procedures.lock().await;
        let id = items.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        items.push(Procedure {
            id,
            name: procedure.name.trim().to_string(),
            status: Some("ACTIVE".to_string()),
        });
        Ok("Procedure added".to_string())
    }

    async fn delete_procedure(&self, id: i64) -> Result<String> {
        self.call("delete_procedure", None, Some(id)).await?;
        self.procedures.lock().await.retain(|p| p.id != id);
        Ok("Procedure deleted".to_string())
    }

    async fn list_visits(&self, query: &PageQuery) -> Result<PageEnvelope<Visit>> {
        self.call("list_visits", Some(query), None).await?;
        let rows: Vec<Visit> = self
            .visits
            .lock()
            .await
            .iter()
            .filter(|v| match query.status {
                Some(status) => v.status.as_deref() == Some(status.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        Ok(PageEnvelope::from_all(rows, query))
    }

    async fn assign_volunteer(&self, assignment: &VisitAssignment) -> Result<String> {
        assignment.validate()?;
        self.call("assign_volunteer", None, Some(assignment.volunteer_id))
            .await?;
        self.assignments.lock().await.push(assignment.clone());
        Ok("Volunteer assigned successfully".to_string())
    }

    async fn export_visits(
        &self,
        _start: Option<NaiveDate>,
        _end: Option<NaiveDate>,
    ) -> Result<Vec<u8>> {
        self.call("export_visits", None, None).await?;
        Ok(b"VisitID,PatientName,VolunteerName,Date,ProceduresDone,Status,Notes\n".to_vec())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.call("dashboard_stats", None, None).await?;
        Ok(self.stats.lock().await.clone())
    }
}

// ============================================================================
// VolunteerApi Implementation
// ============================================================================

#[async_trait]
impl VolunteerApi for MockCareClient {
    async fn todays_visits(&self) -> Result<Vec<Visit>> {
        self.call("todays_visits", None, None).await?;
        Ok(self.todays_visits.lock().await.clone())
    }

    async fn completed_visits(&self, query: &PageQuery) -> Result<PageEnvelope<Visit>> {
        self.call("completed_visits", Some(query), None).await?;
        let rows: Vec<Visit> = self
            .visits
            .lock()
            .await
            .iter()
            .filter(|v| v.status.as_deref() == Some("COMPLETED"))
            .cloned()
            .collect();
        Ok(PageEnvelope::from_all(rows, query))
    }

    async fn report_procedures(&self) -> Result<Vec<Procedure>> {
        self.call("report_procedures", None, None).await?;
        Ok(self.procedures.lock().await.clone())
    }

    async fn report_consumables(&self) -> Result<Vec<Consumable>> {
        self.call("report_consumables", None, None).await?;
        Ok(self.consumables.lock().await.clone())
    }

    async fn submit_report(&self, report: &VisitReportRequest) -> Result<String> {
        report.validate()?;
        self.call("submit_report", None, Some(report.visit_id)).await?;
        self.reports.lock().await.push(report.clone());
        Ok("Report submitted successfully".to_string())
    }

    async fn volunteer_dashboard(&self) -> Result<VolunteerDashboardStats> {
        self.call("volunteer_dashboard", None, None).await?;
        Ok(VolunteerDashboardStats::default())
    }
}

/// Minimal patient row for tests
pub fn patient(id: i64, name: &str) -> Patient {
    Patient {
        id,
        name: name.to_string(),
        mobile_number: Some("9876543210".to_string()),
        age: Some(70),
        gender: Some("Female".to_string()),
        address: Some("Beach Road".to_string()),
        medical_condition: None,
        emergency_contact: None,
        latitude: None,
        longitude: None,
        status: Some("ACTIVE".to_string()),
        alivestatus: Some("alive".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_list_patients_pages() {
        let mock = MockCareClient::new()
            .with_patients((1..=8).map(|i| patient(i, &format!("Patient {}", i))).collect())
            .await;

        let page = mock.list_patients(&PageQuery::default().page(1)).await.unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_pages, 2);

        let captured = mock.captured_requests().await;
        assert_eq!(captured[0].query.as_ref().map(|q| q.page), Some(1));
    }

    #[tokio::test]
    async fn test_mock_search_filters() {
        let mock = MockCareClient::new()
            .with_patients(vec![patient(1, "Asha"), patient(2, "Ravi")])
            .await;

        let page = mock
            .list_patients(&PageQuery::default().search("ash"))
            .await
            .unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].name, "Asha");
    }

    #[tokio::test]
    async fn test_mock_error_is_consumed() {
        let mock = MockCareClient::new()
            .with_error(ApiError::Network("down".to_string()))
            .await;

        assert!(mock.dashboard_stats().await.is_err());
        assert!(mock.dashboard_stats().await.is_ok());
        assert_eq!(mock.call_count("dashboard_stats").await, 2);
    }

    #[tokio::test]
    async fn test_mock_delete_removes_row() {
        let mock = MockCareClient::new()
            .with_patients(vec![patient(1, "Asha")])
            .await;

        mock.delete_patient(1).await.unwrap();
        assert!(mock.delete_patient(1).await.is_err());
        let page = mock.list_patients(&PageQuery::default()).await.unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_mock_authenticate_needs_token() {
        let mock = MockCareClient::new();
        assert!(mock.authenticate("a@b.org", "secret1").await.is_err());

        let mock = MockCareClient::new().with_token("h.p.s").await;
        let response = mock.authenticate("a@b.org", "secret1").await.unwrap();
        assert_eq!(response.token, "h.p.s");
    }

    #[tokio::test]
    async fn test_mock_submit_report_records_valid_bodies() {
        use crate::client::models::{ConsumableUsage, Status};

        let mock = MockCareClient::new();
        let mut report = VisitReportRequest {
            visit_id: 8,
            procedure_ids: vec![2],
            consumables: vec![ConsumableUsage {
                consumable_id: 5,
                quantity: 2,
            }],
            status: Status::Completed,
            notes: None,
        };
        mock.submit_report(&report).await.unwrap();

        report.status = Status::Active;
        assert!(mock.submit_report(&report).await.is_err());

        let reports = mock.reports().await;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].consumables[0].quantity, 2);
    }
}
