//! Display models for CLI output
//!
//! Converts API response types into CLI-friendly rows for table, pretty
//! and JSON output.

pub mod display;

pub use display::{
    ConsumableDisplay, DashboardStatDisplay, EquipmentDisplay, EquipmentTypeDisplay,
    PatientDisplay, ProcedureDisplay, UsageDisplay, VisitDisplay, VolunteerDisplay,
};
