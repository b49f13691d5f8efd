//! Care service API client implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Value, json};

use super::api::{AdminApi, AuthApi, VolunteerApi};
use super::gateway::{Gateway, decode};
use super::models::{
    AuthResponse, Consumable, ConsumableUsageSummary, DashboardStats, Equipment, EquipmentType,
    NewConsumable, NewEquipment, NewEquipmentType, NewPatient, NewProcedure, NewVolunteer,
    Patient, PatientLocation, Procedure, Visit, VisitAssignment, VisitReportRequest, Volunteer,
    VolunteerDashboardStats,
};
use super::pagination::{PageEnvelope, PageQuery};
use crate::error::Result;
use crate::validation::{Validate, validate_date_range, validate_stock_delta};

/// Care service API client
///
/// Request bodies are validated locally before anything is sent.
pub struct CareClient {
    gateway: Gateway,
}

impl CareClient {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}

/// The server's confirmation text, or a fallback when it sent none.
fn confirmation(value: Value, fallback: &str) -> String {
    match value {
        Value::String(s) if !s.trim().is_empty() => s,
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string()),
        _ => fallback.to_string(),
    }
}

fn date_params(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(start) = start {
        params.push(("startDate", start.format("%Y-%m-%d").to_string()));
    }
    if let Some(end) = end {
        params.push(("endDate", end.format("%Y-%m-%d").to_string()));
    }
    params
}

fn id_param(id: i64) -> [(&'static str, String); 1] {
    [("id", id.to_string())]
}

#[async_trait]
impl AuthApi for CareClient {
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthResponse> {
        self.gateway.authenticate(email, password).await
    }
}

#[async_trait]
impl AdminApi for CareClient {
    async fn list_patients(&self, query: &PageQuery) -> Result<PageEnvelope<Patient>> {
        self.gateway
            .get("admin/list-patients", &query.to_query_params())
            .await
    }

    async fn add_patient(&self, patient: &NewPatient) -> Result<String> {
        patient.validate()?;
        let value = self
            .gateway
            .post("admin/add-patient", &[], Some(patient))
            .await?;
        Ok(confirmation(value, "Patient added"))
    }

    async fn delete_patient(&self, id: i64) -> Result<String> {
        let value = self
            .gateway
            .delete("admin/delete-patient", &id_param(id))
            .await?;
        Ok(confirmation(value, "Patient deleted"))
    }

    async fn update_patient_location(
        &self,
        id: i64,
        location: &PatientLocation,
    ) -> Result<PatientLocation> {
        let path = format!("api/patients/{}/location", id);
        let value = self.gateway.put(&path, &[], Some(location)).await?;
        Ok(serde_json::from_value(value).unwrap_or_else(|_| location.clone()))
    }

    async fn export_patients(&self, search: Option<&str>) -> Result<Vec<u8>> {
        let query: Vec<(&'static str, String)> = search
            .filter(|s| !s.trim().is_empty())
            .map(|s| vec![("search", s.to_string())])
            .unwrap_or_default();
        self.gateway.get_bytes("admin/export/patients", &query).await
    }

    async fn list_volunteers(&self, query: &PageQuery) -> Result<PageEnvelope<Volunteer>> {
        self.gateway
            .get("admin/list-volunteers", &query.to_query_params())
            .await
    }

    async fn add_volunteer(&self, volunteer: &NewVolunteer) -> Result<String> {
        volunteer.validate()?;
        let value = self
            .gateway
            .post("admin/add-volunteer", &[], Some(volunteer))
            .await?;
        Ok(confirmation(value, "Volunteer added"))
    }

    async fn delete_volunteer(&self, id: i64) -> Result<String> {
        let value = self
            .gateway
            .delete("admin/delete-volunteer", &id_param(id))
            .await?;
        Ok(confirmation(value, "Volunteer deleted"))
    }

    async fn list_equipment(&self, query: &PageQuery) -> Result<PageEnvelope<Equipment>> {
        self.gateway
            .get("admin/view-equipments", &query.to_query_params())
            .await
    }

    async fn add_equipment(&self, equipment: &NewEquipment) -> Result<String> {
        equipment.validate()?;
        let value = self
            .gateway
            .post("admin/add-equipment", &[], Some(equipment))
            .await?;
        Ok(confirmation(value, "Equipment added"))
    }

    async fn delete_equipment(&self, id: i64) -> Result<String> {
        let value = self
            .gateway
            .delete("admin/delete-equipment", &id_param(id))
            .await?;
        Ok(confirmation(value, "Equipment deleted"))
    }

    async fn allocate_equipment(&self, equipment_id: i64, patient_id: i64) -> Result<String> {
        let path = format!("admin/allocate-equipment/{}/to/{}", equipment_id, patient_id);
        let value = self.gateway.post::<Value>(&path, &[], None).await?;
        Ok(confirmation(value, "Equipment allocated"))
    }

    async fn deallocate_equipment(&self, equipment_id: i64) -> Result<String> {
        let path = format!("admin/deallocate-equipment/{}", equipment_id);
        let value = self.gateway.post::<Value>(&path, &[], None).await?;
        Ok(confirmation(value, "Equipment deallocated"))
    }

    async fn list_equipment_types(&self) -> Result<Vec<EquipmentType>> {
        self.gateway.get("admin/equipment-types", &[]).await
    }

    async fn create_equipment_type(
        &self,
        equipment_type: &NewEquipmentType,
    ) -> Result<EquipmentType> {
        equipment_type.validate()?;
        let value = self
            .gateway
            .post("admin/equipment-types", &[], Some(equipment_type))
            .await?;
        decode(value)
    }

    async fn list_consumables(&self, query: &PageQuery) -> Result<PageEnvelope<Consumable>> {
        self.gateway
            .get("admin/consumable/list", &query.to_query_params())
            .await
    }

    async fn add_consumable(&self, consumable: &NewConsumable) -> Result<String> {
        consumable.validate()?;
        let value = self
            .gateway
            .post("admin/consumable/add", &[], Some(consumable))
            .await?;
        Ok(confirmation(value, "Consumable added"))
    }

    async fn add_stock(&self, id: i64, quantity: i64) -> Result<Consumable> {
        validate_stock_delta(quantity)?;
        let path = format!("admin/consumable/{}/add-stock", id);
        let value = self
            .gateway
            .put(&path, &[("quantity", quantity.to_string())], Some(&json!({})))
            .await?;
        decode(value)
    }

    async fn subtract_stock(&self, id: i64, quantity: i64) -> Result<Consumable> {
        validate_stock_delta(quantity)?;
        let path = format!("admin/consumable/{}/subtract-stock", id);
        let value = self
            .gateway
            .put(&path, &[("quantity", quantity.to_string())], Some(&json!({})))
            .await?;
        decode(value)
    }

    async fn delete_consumable(&self, id: i64) -> Result<String> {
        let path = format!("admin/consumable/delete/{}", id);
        let value = self.gateway.delete(&path, &[]).await?;
        Ok(confirmation(value, "Consumable deleted"))
    }

    async fn consumable_usage(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<ConsumableUsageSummary>> {
        validate_date_range(start, end)?;
        self.gateway
            .get("admin/consumable/usage-summary", &date_params(start, end))
            .await
    }

    async fn list_procedures(&self) -> Result<Vec<Procedure>> {
        self.gateway.get("admin/procedures", &[]).await
    }

    async fn add_procedure(&self, procedure: &NewProcedure) -> Result<String> {
        procedure.validate()?;
        let value = self
            .gateway
            .post::<Value>(
                "admin/procedure",
                &[("name", procedure.name.trim().to_string())],
                None,
            )
            .await?;
        Ok(confirmation(value, "Procedure added"))
    }

    async fn delete_procedure(&self, id: i64) -> Result<String> {
        let value = self
            .gateway
            .delete("admin/delete-procedure", &id_param(id))
            .await?;
        Ok(confirmation(value, "Procedure deleted"))
    }

    async fn list_visits(&self, query: &PageQuery) -> Result<PageEnvelope<Visit>> {
        validate_date_range(query.start_date, query.end_date)?;
        self.gateway
            .get("admin/visits", &query.to_query_params())
            .await
    }

    async fn assign_volunteer(&self, assignment: &VisitAssignment) -> Result<String> {
        assignment.validate()?;
        let value = self
            .gateway
            .post("admin/assign-volunteer", &[], Some(assignment))
            .await?;
        Ok(confirmation(value, "Visit scheduled"))
    }

    async fn export_visits(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<u8>> {
        validate_date_range(start, end)?;
        self.gateway
            .get_bytes("admin/export/visits", &date_params(start, end))
            .await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.gateway.get("admin/dashboard-stats", &[]).await
    }
}

#[async_trait]
impl VolunteerApi for CareClient {
    async fn todays_visits(&self) -> Result<Vec<Visit>> {
        self.gateway.get("volunteer/assigned-visits", &[]).await
    }

    async fn completed_visits(&self, query: &PageQuery) -> Result<PageEnvelope<Visit>> {
        let params = [
            ("page", query.page.to_string()),
            ("size", query.size.to_string()),
        ];
        self.gateway.get("volunteer/completed-visits", &params).await
    }

    async fn report_procedures(&self) -> Result<Vec<Procedure>> {
        self.gateway.get("volunteer/procedures", &[]).await
    }

    async fn report_consumables(&self) -> Result<Vec<Consumable>> {
        self.gateway.get("volunteer/consumables", &[]).await
    }

    async fn submit_report(&self, report: &VisitReportRequest) -> Result<String> {
        report.validate()?;
        let value = self
            .gateway
            .post("volunteer/submit-report", &[], Some(report))
            .await?;
        Ok(confirmation(value, "Report submitted"))
    }

    async fn volunteer_dashboard(&self) -> Result<VolunteerDashboardStats> {
        self.gateway.get("volunteer/dashboard", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Status;
    use crate::error::Error;
    use crate::session::MemoryTokenStore;
    use mockito::Matcher;
    use serde_json::json;
    use std::sync::Arc;

    fn client(url: &str) -> CareClient {
        let store = Arc::new(MemoryTokenStore::with_token("t.t.t"));
        CareClient::new(Gateway::new(url, store).unwrap())
    }

    #[test]
    fn test_confirmation_text() {
        assert_eq!(confirmation(json!("Patient added successfully"), "x"), "Patient added successfully");
        assert_eq!(confirmation(json!({ "message": "ok" }), "x"), "ok");
        assert_eq!(confirmation(Value::Null, "Deleted"), "Deleted");
    }

    #[tokio::test]
    async fn test_invalid_patient_is_never_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/admin/add-patient")
            .expect(0)
            .create_async()
            .await;

        let patient = NewPatient {
            name: "Asha".to_string(),
            mobile_number: "123".to_string(),
            age: 70,
            gender: "Female".to_string(),
            address: "Beach Road".to_string(),
            medical_condition: "COPD".to_string(),
            emergency_contact: None,
            latitude: None,
            longitude: None,
        };

        let err = client(&server.url()).add_patient(&patient).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_assignment_sends_plural_patient_ids() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/admin/assign-volunteer")
            .match_body(Matcher::Json(json!({
                "volunteerId": 3,
                "patientIds": [11],
                "visitDate": "2026-03-02",
            })))
            .with_status(200)
            .with_body("Volunteer assigned successfully")
            .create_async()
            .await;

        let assignment = VisitAssignment {
            volunteer_id: 3,
            patient_ids: vec![11],
            visit_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        };
        let message = client(&server.url())
            .assign_volunteer(&assignment)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(message, "Volunteer assigned successfully");
    }

    #[tokio::test]
    async fn test_stock_adjustment_uses_query_quantity() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/admin/consumable/8/add-stock")
            .match_query(Matcher::UrlEncoded("quantity".into(), "5".into()))
            .with_status(200)
            .with_body(r#"{"id":8,"name":"Gauze","stockQuantity":25,"unit":"packets"}"#)
            .create_async()
            .await;

        let consumable = client(&server.url()).add_stock(8, 5).await.unwrap();
        mock.assert_async().await;
        assert_eq!(consumable.stock_quantity, Some(25));
    }

    #[tokio::test]
    async fn test_procedures_add_sends_name_param() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/admin/procedure")
            .match_query(Matcher::UrlEncoded("name".into(), "Wound dressing".into()))
            .with_status(200)
            .create_async()
            .await;

        let message = client(&server.url())
            .add_procedure(&NewProcedure {
                name: " Wound dressing ".to_string(),
            })
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(message, "Procedure added");
    }

    #[tokio::test]
    async fn test_visits_accept_wrapper_shape() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/admin/visits")
            .match_query(Matcher::UrlEncoded("status".into(), "PENDING".into()))
            .with_status(200)
            .with_body(
                json!({
                    "visits": {
                        "content": [{ "id": 1, "patientName": "Asha", "status": "PENDING", "visitDate": "2026-02-01" }],
                        "totalPages": 1,
                        "number": 0
                    },
                    "newPatientsCount": 2
                })
                .to_string(),
            )
            .create_async()
            .await;

        let page = client(&server.url())
            .list_visits(&PageQuery::default().status(Some(Status::Pending)))
            .await
            .unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.new_patients_count, Some(2));
    }

    #[tokio::test]
    async fn test_reversed_date_range_rejected_locally() {
        let server = mockito::Server::new_async().await;
        let err = client(&server.url())
            .consumable_usage(
                NaiveDate::from_ymd_opt(2026, 5, 1),
                NaiveDate::from_ymd_opt(2026, 4, 1),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
