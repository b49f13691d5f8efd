//! Init command implementation

use colored::Colorize;
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};

use crate::cli::GlobalOptions;
use crate::client::DEFAULT_PAGE_SIZE;
use crate::config::{Config, validate_api_url};
use crate::error::Result;

const FORMATS: [&str; 3] = ["table", "pretty", "json"];

/// Run the init command
///
/// Existing values are offered as defaults, so running init again edits the
/// configuration in place.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let theme = ColorfulTheme::default();

    println!("{}", "Welcome to carectl!".bold().green());
    println!("Let's point carectl at your care service.\n");

    let mut config = Config::load_or_default(opts.config_ref())?;

    let default_url = opts
        .api_url
        .clone()
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| "http://localhost:8080/".to_string());

    let api_url: String = Input::with_theme(&theme)
        .with_prompt("Care service API URL")
        .default(default_url)
        .validate_with(|input: &String| validate_api_url(input.trim()).map_err(|e| e.to_string()))
        .interact_text()?;
    config.api_url = Some(api_url.trim().to_string());

    let set_maps_key = Confirm::with_theme(&theme)
        .with_prompt("Configure a maps API key for patient locations?")
        .default(config.maps_api_key.is_some())
        .interact()?;
    config.maps_api_key = if set_maps_key {
        let key: String = Password::with_theme(&theme)
            .with_prompt("Maps API key")
            .allow_empty_password(true)
            .interact()?;
        Some(key).filter(|k| !k.trim().is_empty()).or(config.maps_api_key)
    } else {
        None
    };

    let current_format = config
        .preferences
        .format
        .as_deref()
        .and_then(|f| FORMATS.iter().position(|name| *name == f))
        .unwrap_or(0);
    let format = Select::with_theme(&theme)
        .with_prompt("Default output format")
        .items(&FORMATS)
        .default(current_format)
        .interact()?;
    config.preferences.format = Some(FORMATS[format].to_string());

    let page_size: usize = Input::with_theme(&theme)
        .with_prompt("Rows per page")
        .default(if config.preferences.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            config.preferences.page_size
        })
        .interact_text()?;
    config.preferences.page_size = page_size.max(1);

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Sign in", "carectl login".cyan());
    println!("  {} - Show configuration and session status", "carectl status".cyan());

    Ok(())
}
