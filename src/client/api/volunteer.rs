//! Volunteer API trait

use async_trait::async_trait;

use crate::client::models::{
    Consumable, Procedure, Visit, VisitReportRequest, VolunteerDashboardStats,
};
use crate::client::pagination::{PageEnvelope, PageQuery};
use crate::error::Result;

/// Operations a volunteer performs on their own visits
#[async_trait]
pub trait VolunteerApi: Send + Sync {
    /// Visits assigned to the caller for today
    async fn todays_visits(&self) -> Result<Vec<Visit>>;

    async fn completed_visits(&self, query: &PageQuery) -> Result<PageEnvelope<Visit>>;

    /// Procedure catalogue offered when filing a report
    async fn report_procedures(&self) -> Result<Vec<Procedure>>;

    /// Consumables offered when filing a report
    async fn report_consumables(&self) -> Result<Vec<Consumable>>;

    async fn submit_report(&self, report: &VisitReportRequest) -> Result<String>;

    async fn volunteer_dashboard(&self) -> Result<VolunteerDashboardStats>;
}
