//! API trait definitions split by responsibility
//!
//! This module organizes the care service API surface into focused sub-traits:
//! - [`AuthApi`] - Credential exchange
//! - [`AdminApi`] - Management screens (patients, volunteers, stock, visits)
//! - [`VolunteerApi`] - The volunteer's own visits and reports
//!
//! The [`CareApi`] super-trait combines all three.

mod admin;
mod auth;
mod volunteer;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use volunteer::VolunteerApi;

/// Complete care service API
pub trait CareApi: AuthApi + AdminApi + VolunteerApi {}

impl<T: AuthApi + AdminApi + VolunteerApi> CareApi for T {}
