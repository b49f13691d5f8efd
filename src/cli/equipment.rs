//! Equipment command implementations

use std::sync::Arc;

use crate::cli::handlers::{ListCommand, report_success, run_delete, run_mutation, with_spinner};
use crate::cli::{CommandContext, EquipmentCommands, GlobalOptions};
use crate::client::AdminApi;
use crate::client::models::{EquipmentTypeRef, NewEquipment, NewEquipmentType};
use crate::controller::FnSource;
use crate::error::Result;
use crate::models::{EquipmentDisplay, EquipmentTypeDisplay};
use crate::output::Formattable;

const ROUTE: &str = "/admin/equipment";

pub async fn run(opts: &GlobalOptions, command: EquipmentCommands) -> Result<()> {
    let ctx = CommandContext::for_route(opts, ROUTE)?;

    match command {
        EquipmentCommands::List { list } => {
            let client = Arc::clone(&ctx.client);
            let source = FnSource::new(move |query| {
                let client = Arc::clone(&client);
                async move { client.list_equipment(&query).await }
            });

            let delete_client = Arc::clone(&ctx.client);
            ListCommand::new(&ctx, "equipment", Arc::new(source))
                .with_delete(Box::new(move |id| {
                    let client = Arc::clone(&delete_client);
                    Box::pin(async move { client.delete_equipment(id).await })
                }))
                .run::<EquipmentDisplay>(&ctx, &list)
                .await
        }
        EquipmentCommands::Add { name, type_id } => {
            let equipment = NewEquipment {
                name,
                equipment_type: EquipmentTypeRef { id: type_id },
            };
            run_mutation(&ctx, "Adding equipment...", ctx.client.add_equipment(&equipment)).await
        }
        EquipmentCommands::Delete { id } => {
            run_delete(&ctx, &format!("equipment #{}", id), || {
                ctx.client.delete_equipment(id)
            })
            .await
        }
        EquipmentCommands::Allocate { id, patient } => {
            run_mutation(
                &ctx,
                "Allocating...",
                ctx.client.allocate_equipment(id, patient),
            )
            .await
        }
        EquipmentCommands::Deallocate { id } => {
            run_mutation(&ctx, "Returning equipment...", ctx.client.deallocate_equipment(id)).await
        }
        EquipmentCommands::Types => {
            let types = with_spinner(
                ctx.format,
                "Loading equipment types...",
                ctx.client.list_equipment_types(),
            )
            .await?;
            let display: Vec<EquipmentTypeDisplay> =
                types.into_iter().map(EquipmentTypeDisplay::from).collect();
            display.print(ctx.format)
        }
        EquipmentCommands::AddType { name, description } => {
            let new_type = NewEquipmentType { name, description };
            let created = with_spinner(
                ctx.format,
                "Creating equipment type...",
                ctx.client.create_equipment_type(&new_type),
            )
            .await?;
            report_success(
                ctx.format,
                &format!("Created equipment type #{} {}", created.id, created.name),
            )
        }
    }
}
