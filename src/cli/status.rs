//! Status command implementation

use chrono::Utc;
use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::cli::auth::describe_expiry;
use crate::cli::context::open_session;
use crate::config::Config;
use crate::error::{DecodeError, Result};
use crate::router::landing_route;

/// Run the status command to display configuration and session status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "carectl Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();

            match config.resolve_api_url(opts.api_url_ref()) {
                Ok(url) => println!("{} API URL: {}", "✓".green(), url),
                Err(e) => {
                    println!("{} {}", "✗".red(), e);
                    println!("  → Run 'carectl init' to configure");
                }
            }

            if config.maps_api_key.is_some() {
                println!("{} Maps API key configured", "✓".green());
            } else {
                println!("{} Maps API key not set (locations are entered by hand)", "○".dimmed());
            }

            println!(
                "{} Page size {}, search delay {} ms",
                "○".dimmed(),
                config.preferences.page_size,
                config.preferences.search_debounce_ms
            );
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            match opts.api_url_ref() {
                Some(url) => println!("{} API URL (from flag/env): {}", "○".dimmed(), url),
                None => println!("  → Run {} to create one", "carectl init".cyan()),
            }
        }
    }

    println!();
    let session = open_session(opts)?;
    match session.current() {
        Ok(current) => {
            let ends = current
                .expiry
                .map(|exp| describe_expiry(exp, Utc::now()))
                .unwrap_or_else(|| "on logout".to_string());

            if current.is_expired() {
                println!("{} Session expired ({})", "⚠".yellow(), ends);
                println!("  → Run 'carectl login' to sign in again");
            } else {
                println!(
                    "{} Signed in as {} ({}), session ends {}",
                    "✓".green(),
                    current.display_name.bold(),
                    current.role,
                    ends
                );
                println!("  Home: {}", landing_route(current.role).path);
            }
        }
        Err(DecodeError::Missing) => {
            println!("{} Not signed in", "○".dimmed());
            println!("  → Run 'carectl login' to sign in");
        }
        Err(e) => {
            println!("{} Stored session is unusable: {}", "✗".red(), e);
            println!("  → Run 'carectl login' to sign in again");
        }
    }
    println!();

    Ok(())
}
