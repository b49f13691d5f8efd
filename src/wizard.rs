//! Create-visit wizard
//!
//! Four steps: pick patients, pick a volunteer, pick a date, review. A step
//! only advances once its own selection is present; confirming issues a
//! single assignment call and starts over.

use chrono::NaiveDate;

use crate::client::AdminApi;
use crate::client::models::VisitAssignment;
use crate::error::Result;
use crate::validation::{FieldError, Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectPatients,
    SelectVolunteer,
    SelectDate,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::SelectPatients,
        WizardStep::SelectVolunteer,
        WizardStep::SelectDate,
        WizardStep::Review,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::SelectPatients => "Select Patients",
            WizardStep::SelectVolunteer => "Select Volunteer",
            WizardStep::SelectDate => "Select Date",
            WizardStep::Review => "Review & Confirm",
        }
    }

    /// One-based position, for progress display
    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).map_or(1, |i| i + 1)
    }
}

/// Wizard state
#[derive(Debug, Clone)]
pub struct VisitWizard {
    step: WizardStep,
    patient_ids: Vec<i64>,
    volunteer_id: Option<i64>,
    visit_date: Option<NaiveDate>,
}

impl Default for VisitWizard {
    fn default() -> Self {
        Self::new()
    }
}

fn missing(field: &'static str, message: &str) -> ValidationError {
    ValidationError::new(vec![FieldError::new(field, message)])
}

impl VisitWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::SelectPatients,
            patient_ids: Vec::new(),
            volunteer_id: None,
            visit_date: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn patient_ids(&self) -> &[i64] {
        &self.patient_ids
    }

    pub fn volunteer_id(&self) -> Option<i64> {
        self.volunteer_id
    }

    pub fn visit_date(&self) -> Option<NaiveDate> {
        self.visit_date
    }

    pub fn set_patients(&mut self, ids: impl IntoIterator<Item = i64>) {
        self.patient_ids.clear();
        for id in ids {
            if !self.patient_ids.contains(&id) {
                self.patient_ids.push(id);
            }
        }
    }

    pub fn select_volunteer(&mut self, id: i64) {
        self.volunteer_id = Some(id);
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.visit_date = Some(date);
    }

    /// Advance if the current step's selection is present.
    pub fn next(&mut self) -> std::result::Result<WizardStep, ValidationError> {
        self.step = match self.step {
            WizardStep::SelectPatients if self.patient_ids.is_empty() => {
                return Err(missing("patientIds", "Select at least one patient"));
            }
            WizardStep::SelectPatients => WizardStep::SelectVolunteer,
            WizardStep::SelectVolunteer if self.volunteer_id.is_none() => {
                return Err(missing("volunteerId", "Select a volunteer"));
            }
            WizardStep::SelectVolunteer => WizardStep::SelectDate,
            WizardStep::SelectDate if self.visit_date.is_none() => {
                return Err(missing("visitDate", "Select a visit date"));
            }
            WizardStep::SelectDate => WizardStep::Review,
            WizardStep::Review => WizardStep::Review,
        };
        Ok(self.step)
    }

    /// Step back, keeping selections. No-op on the first step.
    pub fn back(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::SelectPatients | WizardStep::SelectVolunteer => WizardStep::SelectPatients,
            WizardStep::SelectDate => WizardStep::SelectVolunteer,
            WizardStep::Review => WizardStep::SelectDate,
        };
        self.step
    }

    /// The request the wizard would send, if every selection is present.
    pub fn assignment(&self) -> std::result::Result<VisitAssignment, ValidationError> {
        let (Some(volunteer_id), Some(visit_date)) = (self.volunteer_id, self.visit_date) else {
            return Err(missing(
                "review",
                "Please complete all steps before confirming.",
            ));
        };

        let assignment = VisitAssignment {
            volunteer_id,
            patient_ids: self.patient_ids.clone(),
            visit_date,
        };
        assignment.validate()?;
        Ok(assignment)
    }

    /// Send the assignment and reset to the first step on success.
    pub async fn confirm<A: AdminApi + ?Sized>(&mut self, api: &A) -> Result<String> {
        if self.step != WizardStep::Review {
            return Err(missing("review", "Review the visit before confirming").into());
        }

        let assignment = self.assignment()?;
        let message = api.assign_volunteer(&assignment).await?;
        log::info!(
            "Scheduled {} patient(s) with volunteer {} on {}",
            assignment.patient_ids.len(),
            assignment.volunteer_id,
            assignment.visit_date
        );

        *self = Self::new();
        Ok(message)
    }
}
