//! Helpers for commands that change data

use std::future::Future;
use std::path::Path;

use colored::Colorize;
use serde_json::json;

use crate::cli::handlers::with_spinner;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::output::json::format_json;

/// Print the server's confirmation for a completed change.
pub fn report_success(format: OutputFormat, message: &str) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", format_json(&json!({ "message": message }))?),
        _ => println!("{} {}", "✓".green(), message),
    }
    Ok(())
}

/// Run one change behind a spinner and print its confirmation.
pub async fn run_mutation<F>(ctx: &CommandContext, progress: &str, action: F) -> Result<()>
where
    F: Future<Output = Result<String>>,
{
    let message = with_spinner(ctx.format, progress, action).await?;
    report_success(ctx.format, &message)
}

/// Ask before deleting, then delete. A declined prompt sends nothing.
pub async fn run_delete<F, Fut>(ctx: &CommandContext, what: &str, action: F) -> Result<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String>>,
{
    if !ctx.confirmer().confirm(&format!("Delete {}?", what))? {
        println!("{}", "Cancelled.".dimmed());
        return Ok(());
    }
    run_mutation(ctx, &format!("Deleting {}...", what), action()).await
}

/// Write an export to a file, or to stdout when no path is given.
pub fn write_export(bytes: &[u8], output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(Path::new(path), bytes)?;
            eprintln!(
                "{} Wrote {} bytes to {}",
                "✓".green(),
                bytes.len(),
                path.cyan()
            );
        }
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
