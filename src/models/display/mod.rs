//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod consumable;
mod equipment;
mod patient;
mod procedure;
mod stats;
mod visit;
mod volunteer;

pub use consumable::{ConsumableDisplay, UsageDisplay};
pub use equipment::{EquipmentDisplay, EquipmentTypeDisplay};
pub use patient::PatientDisplay;
pub use procedure::ProcedureDisplay;
pub use stats::DashboardStatDisplay;
pub use visit::VisitDisplay;
pub use volunteer::VolunteerDisplay;
