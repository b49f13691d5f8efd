//! Volunteer management commands (admin side)

use std::sync::Arc;

use dialoguer::{Password, theme::ColorfulTheme};

use crate::cli::handlers::{ListCommand, run_delete, run_mutation};
use crate::cli::{CommandContext, GlobalOptions, VolunteerCommands};
use crate::client::AdminApi;
use crate::client::models::NewVolunteer;
use crate::controller::FnSource;
use crate::error::Result;
use crate::models::VolunteerDisplay;

const ROUTE: &str = "/admin/volunteers";

pub async fn run(opts: &GlobalOptions, command: VolunteerCommands) -> Result<()> {
    let ctx = CommandContext::for_route(opts, ROUTE)?;

    match command {
        VolunteerCommands::List { list } => {
            let client = Arc::clone(&ctx.client);
            let source = FnSource::new(move |query| {
                let client = Arc::clone(&client);
                async move { client.list_volunteers(&query).await }
            });

            let delete_client = Arc::clone(&ctx.client);
            ListCommand::new(&ctx, "volunteers", Arc::new(source))
                .with_delete(Box::new(move |id| {
                    let client = Arc::clone(&delete_client);
                    Box::pin(async move { client.delete_volunteer(id).await })
                }))
                .run::<VolunteerDisplay>(&ctx, &list)
                .await
        }
        VolunteerCommands::Add {
            name,
            email,
            password,
            phone,
            address,
            specialization,
        } => {
            let password = match password {
                Some(p) => p,
                None => Password::with_theme(&ColorfulTheme::default())
                    .with_prompt("Initial password for the volunteer")
                    .with_confirmation("Repeat password", "Passwords do not match")
                    .interact()?,
            };

            let volunteer = NewVolunteer {
                name,
                email,
                password,
                phone_number: phone,
                address,
                specialization,
            };
            run_mutation(&ctx, "Adding volunteer...", ctx.client.add_volunteer(&volunteer)).await
        }
        VolunteerCommands::Delete { id } => {
            run_delete(&ctx, &format!("volunteer #{}", id), || {
                ctx.client.delete_volunteer(id)
            })
            .await
        }
    }
}
