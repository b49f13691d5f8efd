//! Procedure command implementations

use std::sync::Arc;

use crate::cli::handlers::{ListCommand, run_delete, run_mutation};
use crate::cli::{CommandContext, GlobalOptions, ProcedureCommands};
use crate::client::models::{NewProcedure, Procedure};
use crate::client::AdminApi;
use crate::controller::FnSource;
use crate::error::Result;
use crate::models::ProcedureDisplay;

const ROUTE: &str = "/admin/procedures";

pub async fn run(opts: &GlobalOptions, command: ProcedureCommands) -> Result<()> {
    let ctx = CommandContext::for_route(opts, ROUTE)?;

    match command {
        ProcedureCommands::List { list } => {
            // The endpoint returns every procedure; paging and search are local.
            let client = Arc::clone(&ctx.client);
            let source = FnSource::from_all(
                move || {
                    let client = Arc::clone(&client);
                    async move { client.list_procedures().await }
                },
                name_matches,
            );

            let delete_client = Arc::clone(&ctx.client);
            ListCommand::new(&ctx, "procedures", Arc::new(source))
                .with_delete(Box::new(move |id| {
                    let client = Arc::clone(&delete_client);
                    Box::pin(async move { client.delete_procedure(id).await })
                }))
                .run::<ProcedureDisplay>(&ctx, &list)
                .await
        }
        ProcedureCommands::Add { name } => {
            let procedure = NewProcedure { name };
            run_mutation(&ctx, "Adding procedure...", ctx.client.add_procedure(&procedure)).await
        }
        ProcedureCommands::Delete { id } => {
            run_delete(&ctx, &format!("procedure #{}", id), || {
                ctx.client.delete_procedure(id)
            })
            .await
        }
    }
}

/// Case-insensitive name filter; `term` is already lower-cased.
fn name_matches(procedure: &Procedure, term: &str) -> bool {
    procedure.name.to_lowercase().contains(term)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn procedure(id: i64, name: &str) -> Procedure {
        Procedure {
            id,
            name: name.to_string(),
            status: None,
        }
    }

    #[test]
    fn test_name_matches_ignores_case() {
        assert!(name_matches(&procedure(1, "Wound dressing"), "dress"));
        assert!(!name_matches(&procedure(2, "Catheter care"), "dress"));
    }
}
