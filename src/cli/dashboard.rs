//! Admin dashboard command

use crate::cli::handlers::with_spinner;
use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::AdminApi;
use crate::error::Result;
use crate::models::DashboardStatDisplay;
use crate::output::Formattable;
use crate::output::json::format_json;

const ROUTE: &str = "/admin";

pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::for_route(opts, ROUTE)?;

    let stats = with_spinner(ctx.format, "Loading dashboard...", ctx.client.dashboard_stats()).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&stats)?),
        _ => DashboardStatDisplay::from_admin(&stats).print(ctx.format)?,
    }
    Ok(())
}
