//! Visit command implementations: list, assign (wizard) and export

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use colored::Colorize;
use dialoguer::{Input, MultiSelect, Select, theme::ColorfulTheme};

use crate::cli::handlers::{ListCommand, report_success, with_spinner, write_export};
use crate::cli::{CommandContext, GlobalOptions, VisitCommands, parse_date};
use crate::client::models::{Patient, Status, Volunteer};
use crate::client::{AdminApi, PageQuery};
use crate::controller::FnSource;
use crate::error::{Error, Result};
use crate::models::VisitDisplay;
use crate::wizard::{VisitWizard, WizardStep};

const LIST_ROUTE: &str = "/admin/visits";
const WIZARD_ROUTE: &str = "/admin/createnewvisit";
const ASSIGN_ROUTE: &str = "/admin/assign-volunteer";

/// Rows fetched for the wizard's pick lists
const PICK_LIST_SIZE: usize = 500;

pub async fn run(opts: &GlobalOptions, command: VisitCommands) -> Result<()> {
    match command {
        VisitCommands::List {
            list,
            range,
            status,
        } => {
            let ctx = CommandContext::for_route(opts, LIST_ROUTE)?;
            let status = status
                .as_deref()
                .map(str::parse::<Status>)
                .transpose()
                .map_err(Error::Other)?;

            let client = Arc::clone(&ctx.client);
            let source = FnSource::new(move |query| {
                let client = Arc::clone(&client);
                async move { client.list_visits(&query).await }
            });

            let screen = ListCommand::new(&ctx, "visits", Arc::new(source)).with_filters();
            screen
                .controller()
                .set_filters(range.from, range.to, status)
                .await?;
            screen.run::<VisitDisplay>(&ctx, &list).await
        }
        VisitCommands::Assign {
            patients,
            volunteer,
            date,
        } => {
            let complete = !patients.is_empty() && volunteer.is_some() && date.is_some();
            let route = if complete { ASSIGN_ROUTE } else { WIZARD_ROUTE };
            let ctx = CommandContext::for_route(opts, route)?;

            let mut wizard = VisitWizard::new();
            wizard.set_patients(patients);
            if let Some(id) = volunteer {
                wizard.select_volunteer(id);
            }
            if let Some(date) = date {
                wizard.select_date(date);
            }
            advance(&mut wizard);

            if complete {
                let message = with_spinner(
                    ctx.format,
                    "Scheduling visit...",
                    wizard.confirm(ctx.client.as_ref()),
                )
                .await?;
                return report_success(ctx.format, &message);
            }

            run_wizard(&ctx, wizard).await
        }
        VisitCommands::Export { range, output } => {
            let ctx = CommandContext::for_route(opts, LIST_ROUTE)?;
            let bytes = with_spinner(
                ctx.format,
                "Exporting visits...",
                ctx.client.export_visits(range.from, range.to),
            )
            .await?;
            write_export(&bytes, output.as_deref())
        }
    }
}

/// Move forward past every step whose selection is already present.
fn advance(wizard: &mut VisitWizard) {
    while wizard.step() != WizardStep::Review && wizard.next().is_ok() {}
}

/// Pick lists, fetched the first time a step needs them.
#[derive(Default)]
struct PickLists {
    patients: Option<Vec<Patient>>,
    volunteers: Option<Vec<Volunteer>>,
}

impl PickLists {
    async fn patients(&mut self, ctx: &CommandContext) -> Result<&[Patient]> {
        if self.patients.is_none() {
            let page = with_spinner(
                ctx.format,
                "Loading patients...",
                ctx.client.list_patients(&PageQuery::new(PICK_LIST_SIZE).alive_only(true)),
            )
            .await?;
            self.patients = Some(page.content);
        }
        Ok(self.patients.as_deref().unwrap_or_default())
    }

    async fn volunteers(&mut self, ctx: &CommandContext) -> Result<&[Volunteer]> {
        if self.volunteers.is_none() {
            let page = with_spinner(
                ctx.format,
                "Loading volunteers...",
                ctx.client.list_volunteers(&PageQuery::new(PICK_LIST_SIZE)),
            )
            .await?;
            self.volunteers = Some(page.content);
        }
        Ok(self.volunteers.as_deref().unwrap_or_default())
    }

    fn patient_name(&self, id: i64) -> String {
        self.patients
            .iter()
            .flatten()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("Patient #{}", id))
    }

    fn volunteer_name(&self, id: i64) -> String {
        self.volunteers
            .iter()
            .flatten()
            .find(|v| v.id == id)
            .map(|v| v.name.clone())
            .unwrap_or_else(|| format!("Volunteer #{}", id))
    }
}

async fn run_wizard(ctx: &CommandContext, mut wizard: VisitWizard) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut lists = PickLists::default();

    loop {
        let step = wizard.step();
        println!(
            "\n{} {}",
            format!("Step {}/{}:", step.number(), WizardStep::ALL.len()).bold(),
            step.title()
        );

        let proceed = match step {
            WizardStep::SelectPatients => {
                let patients = lists.patients(ctx).await?;
                if patients.is_empty() {
                    return Err(Error::Other("No patients to schedule".to_string()));
                }
                let labels: Vec<String> = patients
                    .iter()
                    .map(|p| format!("#{} {}", p.id, p.name))
                    .collect();
                let checked: Vec<bool> = patients
                    .iter()
                    .map(|p| wizard.patient_ids().contains(&p.id))
                    .collect();

                let Some(picked) = MultiSelect::with_theme(&theme)
                    .with_prompt("Patients to visit (space to toggle)")
                    .items(&labels)
                    .defaults(&checked)
                    .interact_opt()?
                else {
                    return cancelled();
                };
                let ids: Vec<i64> = picked.into_iter().map(|i| patients[i].id).collect();
                wizard.set_patients(ids);
                true
            }
            WizardStep::SelectVolunteer => {
                let volunteers = lists.volunteers(ctx).await?;
                let mut labels: Vec<String> = volunteers
                    .iter()
                    .map(|v| format!("#{} {}", v.id, v.name))
                    .collect();
                labels.push("← Back".to_string());

                let current = wizard
                    .volunteer_id()
                    .and_then(|id| volunteers.iter().position(|v| v.id == id))
                    .unwrap_or(0);
                let Some(choice) = Select::with_theme(&theme)
                    .with_prompt("Volunteer")
                    .items(&labels)
                    .default(current)
                    .interact_opt()?
                else {
                    return cancelled();
                };

                match volunteers.get(choice) {
                    Some(v) => {
                        wizard.select_volunteer(v.id);
                        true
                    }
                    None => {
                        wizard.back();
                        false
                    }
                }
            }
            WizardStep::SelectDate => {
                let default = wizard
                    .visit_date()
                    .unwrap_or_else(|| Local::now().date_naive());
                let answer: String = Input::with_theme(&theme)
                    .with_prompt("Visit date (YYYY-MM-DD, or 'back')")
                    .default(default.format("%Y-%m-%d").to_string())
                    .interact_text()?;

                if answer.trim().eq_ignore_ascii_case("back") {
                    wizard.back();
                    false
                } else {
                    match parse_date(&answer) {
                        Ok(date) => {
                            wizard.select_date(date);
                            true
                        }
                        Err(e) => {
                            eprintln!("{} {}", "✗".red(), e);
                            false
                        }
                    }
                }
            }
            WizardStep::Review => {
                print_review(&wizard, &lists);
                let choice = Select::with_theme(&theme)
                    .items(&["Confirm", "Back", "Cancel"])
                    .default(0)
                    .interact_opt()?;

                match choice {
                    Some(0) => {
                        let message = with_spinner(
                            ctx.format,
                            "Scheduling visit...",
                            wizard.confirm(ctx.client.as_ref()),
                        )
                        .await?;
                        return report_success(ctx.format, &message);
                    }
                    Some(1) => {
                        wizard.back();
                        false
                    }
                    _ => return cancelled(),
                }
            }
        };

        if proceed {
            if let Err(e) = wizard.next() {
                for field in &e.fields {
                    eprintln!("{} {}", "✗".red(), field.message);
                }
            }
        }
    }
}

fn print_review(wizard: &VisitWizard, lists: &PickLists) {
    let patients: Vec<String> = wizard
        .patient_ids()
        .iter()
        .map(|id| lists.patient_name(*id))
        .collect();

    println!("  Patients:  {}", patients.join(", "));
    if let Some(id) = wizard.volunteer_id() {
        println!("  Volunteer: {}", lists.volunteer_name(id));
    }
    if let Some(date) = wizard.visit_date() {
        println!("  Date:      {}", format_review_date(date));
    }
}

fn format_review_date(date: NaiveDate) -> String {
    date.format("%A, %d %B %Y").to_string()
}

fn cancelled() -> Result<()> {
    println!("{}", "Cancelled.".dimmed());
    Ok(())
}
