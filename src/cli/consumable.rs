//! Consumable command implementations

use std::sync::Arc;

use crate::cli::handlers::{ListCommand, report_success, run_delete, run_mutation, with_spinner};
use crate::cli::{CommandContext, ConsumableCommands, GlobalOptions};
use crate::client::AdminApi;
use crate::client::models::{Consumable, NewConsumable, Status};
use crate::controller::FnSource;
use crate::error::Result;
use crate::models::{ConsumableDisplay, UsageDisplay};
use crate::output::Formattable;

const ROUTE: &str = "/admin/consumables";

pub async fn run(opts: &GlobalOptions, command: ConsumableCommands) -> Result<()> {
    let ctx = CommandContext::for_route(opts, ROUTE)?;

    match command {
        ConsumableCommands::List { list } => {
            let client = Arc::clone(&ctx.client);
            let source = FnSource::new(move |query| {
                let client = Arc::clone(&client);
                async move { client.list_consumables(&query).await }
            });

            let delete_client = Arc::clone(&ctx.client);
            ListCommand::new(&ctx, "consumables", Arc::new(source))
                .with_delete(Box::new(move |id| {
                    let client = Arc::clone(&delete_client);
                    Box::pin(async move { client.delete_consumable(id).await })
                }))
                .run::<ConsumableDisplay>(&ctx, &list)
                .await
        }
        ConsumableCommands::Add {
            name,
            category,
            stock,
            unit,
        } => {
            let consumable = NewConsumable {
                name,
                category,
                stock_quantity: stock,
                unit,
                status: Some(Status::Active),
            };
            run_mutation(&ctx, "Adding consumable...", ctx.client.add_consumable(&consumable)).await
        }
        ConsumableCommands::AddStock { id, quantity } => {
            let updated = with_spinner(
                ctx.format,
                "Updating stock...",
                ctx.client.add_stock(id, quantity),
            )
            .await?;
            report_success(ctx.format, &stock_message(&updated))
        }
        ConsumableCommands::SubtractStock { id, quantity } => {
            let updated = with_spinner(
                ctx.format,
                "Updating stock...",
                ctx.client.subtract_stock(id, quantity),
            )
            .await?;
            report_success(ctx.format, &stock_message(&updated))
        }
        ConsumableCommands::Delete { id } => {
            run_delete(&ctx, &format!("consumable #{}", id), || {
                ctx.client.delete_consumable(id)
            })
            .await
        }
        ConsumableCommands::Usage { range } => {
            let usage = with_spinner(
                ctx.format,
                "Loading usage...",
                ctx.client.consumable_usage(range.from, range.to),
            )
            .await?;
            let display: Vec<UsageDisplay> = usage.into_iter().map(UsageDisplay::from).collect();
            display.print(ctx.format)
        }
    }
}

fn stock_message(consumable: &Consumable) -> String {
    match consumable.stock_quantity {
        Some(qty) => format!(
            "{} now has {} {}",
            consumable.name,
            qty,
            consumable.unit.as_deref().unwrap_or("in stock")
        ),
        None => format!("Stock updated for {}", consumable.name),
    }
}
