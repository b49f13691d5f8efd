//! Care service API client

pub mod api;
pub mod care;
pub mod gateway;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;

pub use api::{AdminApi, AuthApi, CareApi, VolunteerApi};
pub use care::CareClient;
pub use gateway::Gateway;
#[cfg(test)]
pub use mock::MockCareClient;
pub use pagination::{DEFAULT_PAGE_SIZE, PageEnvelope, PageQuery};
