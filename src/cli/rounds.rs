//! Volunteer-side commands: today's visits, completed visits, reports

use std::io::IsTerminal;
use std::sync::Arc;

use dialoguer::{Input, MultiSelect, theme::ColorfulTheme};

use crate::cli::handlers::{ListCommand, run_mutation, with_spinner};
use crate::cli::{CommandContext, GlobalOptions, OutputFormat, RoundsCommands};
use crate::client::VolunteerApi;
use crate::client::models::{
    Consumable, ConsumableUsage, Procedure, Status, Visit, VisitReportRequest,
};
use crate::controller::FnSource;
use crate::error::{Error, Result};
use crate::models::{DashboardStatDisplay, VisitDisplay};
use crate::output::Formattable;
use crate::output::json::format_json;

const HOME_ROUTE: &str = "/volunteer";
const TODAY_ROUTE: &str = "/volunteer/todays-visits";
const COMPLETED_ROUTE: &str = "/volunteer/completed-visits";

pub async fn run(opts: &GlobalOptions, command: RoundsCommands) -> Result<()> {
    match command {
        RoundsCommands::Today { list } => {
            let ctx = CommandContext::for_route(opts, TODAY_ROUTE)?;
            let client = Arc::clone(&ctx.client);
            let source = FnSource::from_all(
                move || {
                    let client = Arc::clone(&client);
                    async move { client.todays_visits().await }
                },
                patient_matches,
            );

            ListCommand::new(&ctx, "today's visits", Arc::new(source))
                .run::<VisitDisplay>(&ctx, &list)
                .await
        }
        RoundsCommands::Completed { list } => {
            let ctx = CommandContext::for_route(opts, COMPLETED_ROUTE)?;
            let client = Arc::clone(&ctx.client);
            let source = FnSource::new(move |query| {
                let client = Arc::clone(&client);
                async move { client.completed_visits(&query).await }
            });

            // The server offers no search over completed visits.
            ListCommand::new(&ctx, "completed visits", Arc::new(source))
                .without_search()
                .run::<VisitDisplay>(&ctx, &list.into())
                .await
        }
        RoundsCommands::Report {
            visit,
            status,
            procedures,
            consumables,
            notes,
        } => {
            let ctx = CommandContext::for_route(opts, TODAY_ROUTE)?;
            let status: Status = status.parse().map_err(Error::Other)?;

            let interactive = std::io::stdin().is_terminal();
            let procedure_ids = if procedures.is_empty() && interactive {
                pick_procedures(&ctx).await?
            } else {
                procedures
            };
            let consumables = if consumables.is_empty() && interactive {
                pick_consumables(&ctx).await?
            } else {
                consumables
            };

            let report = VisitReportRequest {
                visit_id: visit,
                procedure_ids,
                consumables,
                status,
                notes,
            };
            run_mutation(&ctx, "Submitting report...", ctx.client.submit_report(&report)).await
        }
        RoundsCommands::Dashboard => {
            let ctx = CommandContext::for_route(opts, HOME_ROUTE)?;
            let stats = with_spinner(
                ctx.format,
                "Loading dashboard...",
                ctx.client.volunteer_dashboard(),
            )
            .await?;

            match ctx.format {
                OutputFormat::Json => println!("{}", format_json(&stats)?),
                _ => DashboardStatDisplay::from_volunteer(&stats).print(ctx.format)?,
            }
            Ok(())
        }
    }
}

/// Search today's visits by patient name; `term` is already lower-cased.
fn patient_matches(visit: &Visit, term: &str) -> bool {
    visit
        .patient_name
        .as_deref()
        .is_some_and(|name| name.to_lowercase().contains(term))
}

/// Offer the procedure catalogue; an unavailable catalogue means none picked.
async fn pick_procedures(ctx: &CommandContext) -> Result<Vec<i64>> {
    let catalogue: Vec<Procedure> = match ctx.client.report_procedures().await {
        Ok(list) => list,
        Err(e) => {
            log::warn!("Could not load procedures: {}", e);
            Vec::new()
        }
    };
    if catalogue.is_empty() {
        return Ok(Vec::new());
    }

    let labels: Vec<&str> = catalogue.iter().map(|p| p.name.as_str()).collect();
    let picked = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Procedures performed (space to toggle)")
        .items(&labels)
        .interact_opt()?
        .unwrap_or_default();

    Ok(picked.into_iter().map(|i| catalogue[i].id).collect())
}

/// Offer the consumables and ask how many of each were used.
async fn pick_consumables(ctx: &CommandContext) -> Result<Vec<ConsumableUsage>> {
    let catalogue: Vec<Consumable> = match ctx.client.report_consumables().await {
        Ok(list) => list,
        Err(e) => {
            log::warn!("Could not load consumables: {}", e);
            Vec::new()
        }
    };
    if catalogue.is_empty() {
        return Ok(Vec::new());
    }

    let theme = ColorfulTheme::default();
    let labels: Vec<&str> = catalogue.iter().map(|c| c.name.as_str()).collect();
    let picked = MultiSelect::with_theme(&theme)
        .with_prompt("Consumables used (space to toggle)")
        .items(&labels)
        .interact_opt()?
        .unwrap_or_default();

    let mut usage = Vec::with_capacity(picked.len());
    for index in picked {
        let consumable = &catalogue[index];
        let quantity: i64 = Input::with_theme(&theme)
            .with_prompt(format!("Quantity of {}", consumable.name))
            .default(1)
            .validate_with(|q: &i64| {
                if *q > 0 {
                    Ok(())
                } else {
                    Err("quantity must be at least 1")
                }
            })
            .interact_text()?;
        usage.push(ConsumableUsage {
            consumable_id: consumable.id,
            quantity,
        });
    }
    Ok(usage)
}

/// Parse `ID=QUANTITY` for `--consumable`.
pub fn parse_usage(value: &str) -> std::result::Result<ConsumableUsage, String> {
    let (id, quantity) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QUANTITY, got '{}'", value))?;

    let consumable_id: i64 = id
        .trim()
        .parse()
        .map_err(|_| format!("invalid consumable id '{}'", id))?;
    let quantity: i64 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity '{}'", quantity))?;

    if quantity <= 0 {
        return Err("quantity must be at least 1".to_string());
    }

    Ok(ConsumableUsage {
        consumable_id,
        quantity,
    })
}
