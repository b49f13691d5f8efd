//! Care service API data models
//!
//! Domain types exchanged with the REST API, organized by resource.

mod auth;
mod consumable;
mod equipment;
mod patient;
mod procedure;
mod stats;
mod visit;
mod volunteer;

pub use auth::{AuthRequest, AuthResponse};
pub use consumable::{Consumable, ConsumableUsageSummary, NewConsumable};
pub use equipment::{Equipment, EquipmentType, EquipmentTypeRef, NewEquipment, NewEquipmentType};
pub use patient::{NewPatient, Patient, PatientLocation};
pub use procedure::{NewProcedure, Procedure};
pub use stats::{DashboardStats, VolunteerDashboardStats};
pub use visit::{
    ConsumableUsage, Status, Visit, VisitAssignment, VisitReportRequest,
};
pub use volunteer::{NewVolunteer, Volunteer};
