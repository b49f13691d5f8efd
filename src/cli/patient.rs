//! Patient command implementations

use std::sync::Arc;

use crate::cli::handlers::{
    ListCommand, report_success, run_delete, run_mutation, with_spinner, write_export,
};
use crate::cli::{CommandContext, GlobalOptions, ListArgs, PatientCommands};
use crate::client::AdminApi;
use crate::client::models::{NewPatient, PatientLocation};
use crate::controller::FnSource;
use crate::error::Result;
use crate::models::PatientDisplay;

const ROUTE: &str = "/admin/patient";

pub async fn run(opts: &GlobalOptions, command: PatientCommands) -> Result<()> {
    let ctx = CommandContext::for_route(opts, ROUTE)?;

    match command {
        PatientCommands::List { list } => self::list(&ctx, &list).await,
        PatientCommands::Add {
            name,
            mobile,
            age,
            gender,
            address,
            condition,
            emergency_contact,
            latitude,
            longitude,
        } => {
            let patient = NewPatient {
                name,
                mobile_number: mobile,
                age,
                gender,
                address,
                medical_condition: condition,
                emergency_contact,
                latitude,
                longitude,
            };
            run_mutation(&ctx, "Adding patient...", ctx.client.add_patient(&patient)).await
        }
        PatientCommands::Delete { id } => {
            run_delete(&ctx, &format!("patient #{}", id), || ctx.client.delete_patient(id)).await
        }
        PatientCommands::Locate {
            id,
            latitude,
            longitude,
        } => {
            let location = PatientLocation {
                latitude,
                longitude,
            };
            let saved = with_spinner(
                ctx.format,
                "Saving location...",
                ctx.client.update_patient_location(id, &location),
            )
            .await?;
            report_success(
                ctx.format,
                &format!(
                    "Location of patient #{} set to {:.5}, {:.5}",
                    id, saved.latitude, saved.longitude
                ),
            )
        }
        PatientCommands::Export { search, output } => {
            let bytes = with_spinner(
                ctx.format,
                "Exporting patients...",
                ctx.client.export_patients(search.as_deref()),
            )
            .await?;
            write_export(&bytes, output.as_deref())
        }
    }
}

async fn list(ctx: &CommandContext, args: &ListArgs) -> Result<()> {
    let client = Arc::clone(&ctx.client);
    let source = FnSource::new(move |query| {
        let client = Arc::clone(&client);
        async move { client.list_patients(&query).await }
    });

    let delete_client = Arc::clone(&ctx.client);
    ListCommand::new(ctx, "patients", Arc::new(source))
        .with_delete(Box::new(move |id| {
            let client = Arc::clone(&delete_client);
            Box::pin(async move { client.delete_patient(id).await })
        }))
        .run::<PatientDisplay>(ctx, args)
        .await
}
