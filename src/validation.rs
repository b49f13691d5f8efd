//! Client-side form validation
//!
//! Every create/update request is checked locally before any network call.
//! Rejected fields are reported individually so the CLI can annotate each one.

use std::fmt;

use chrono::NaiveDate;

use crate::client::models::{
    NewConsumable, NewEquipment, NewEquipmentType, NewPatient, NewProcedure, NewVolunteer,
    Status, VisitAssignment, VisitReportRequest,
};

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All field errors found for one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(fields: Vec<FieldError>) -> Self {
        Self { fields }
    }

    /// Message for a specific field, if it was rejected.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.field == name)
            .map(|f| f.message.as_str())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid input:")?;
        for field in &self.fields {
            write!(f, "\n  {}: {}", field.field, field.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Types that can be checked before they are sent to the API.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Collects field errors and converts them into a result.
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn required(&mut self, field: &'static str, value: &str, label: &str) -> bool {
        if value.trim().is_empty() {
            self.errors
                .push(FieldError::new(field, format!("{} is required", label)));
            false
        } else {
            true
        }
    }

    fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.errors))
        }
    }
}

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

impl Validate for NewPatient {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::default();

        check.required("name", &self.name, "Name");

        let mobile = self.mobile_number.trim();
        if check.required("mobileNumber", mobile, "Mobile number")
            && !(mobile.len() == 10 && all_digits(mobile))
        {
            check.reject("mobileNumber", "Enter a valid 10-digit mobile number");
        }

        if !(1..=120).contains(&self.age) {
            check.reject("age", "Enter a valid age (1-120)");
        }

        check.required("gender", &self.gender, "Gender");
        check.required("address", &self.address, "Address");
        check.required("medicalCondition", &self.medical_condition, "Medical condition");

        if let Some(contact) = self.emergency_contact.as_deref().map(str::trim) {
            if !contact.is_empty() && !((7..=15).contains(&contact.len()) && all_digits(contact)) {
                check.reject("emergencyContact", "Enter a valid emergency contact");
            }
        }

        check.finish()
    }
}

impl Validate for NewVolunteer {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::default();

        check.required("name", &self.name, "Name");
        if check.required("email", &self.email, "Email") && !looks_like_email(self.email.trim()) {
            check.reject("email", "Enter a valid email address");
        }
        if self.password.chars().count() < 6 {
            check.reject("password", "Password must be at least 6 characters");
        }
        if let Some(phone) = self.phone_number.as_deref().map(str::trim) {
            if !phone.is_empty() && !all_digits(phone) {
                check.reject("phoneNumber", "Phone number must contain digits only");
            }
        }

        check.finish()
    }
}

impl Validate for NewEquipment {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::default();
        check.required("name", &self.name, "Name");
        if self.equipment_type.id <= 0 {
            check.reject("equipmentType", "Equipment type is required");
        }
        check.finish()
    }
}

impl Validate for NewEquipmentType {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::default();
        check.required("name", &self.name, "Name");
        check.finish()
    }
}

impl Validate for NewConsumable {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::default();
        check.required("name", &self.name, "Name");
        check.required("category", &self.category, "Category");
        check.required("unit", &self.unit, "Unit");
        if self.stock_quantity < 0 {
            check.reject("stockQuantity", "Stock quantity cannot be negative");
        }
        check.finish()
    }
}

impl Validate for NewProcedure {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::default();
        check.required("name", &self.name, "Name");
        check.finish()
    }
}

impl Validate for VisitAssignment {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::default();
        if self.patient_ids.is_empty() {
            check.reject("patientIds", "Select at least one patient");
        }
        if self.volunteer_id <= 0 {
            check.reject("volunteerId", "Select a volunteer");
        }
        check.finish()
    }
}

impl Validate for VisitReportRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::default();
        if self.visit_id <= 0 {
            check.reject("visitId", "Visit is required");
        }
        if !matches!(
            self.status,
            Status::Completed | Status::Pending | Status::Cancelled
        ) {
            check.reject("status", "Status must be COMPLETED, PENDING or CANCELLED");
        }
        check.finish()
    }
}

/// Stock adjustments must move at least one unit.
pub fn validate_stock_delta(quantity: i64) -> Result<(), ValidationError> {
    if quantity <= 0 {
        return Err(ValidationError::new(vec![FieldError::new(
            "quantity",
            "Enter a valid quantity",
        )]));
    }
    Ok(())
}

/// A date filter must not start after it ends.
pub fn validate_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(ValidationError::new(vec![FieldError::new(
                "startDate",
                "Invalid date range: 'From' is after 'To'",
            )]));
        }
    }
    Ok(())
}
