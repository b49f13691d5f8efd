//! Login, logout and whoami

use chrono::{DateTime, Utc};
use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use serde::Serialize;

use crate::cli::context::open_session;
use crate::cli::handlers::{report_success, with_spinner};
use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::AuthApi;
use crate::error::{ApiError, DecodeError, Result};
use crate::output::json::format_json;
use crate::router::{Router, landing_route};
use crate::session::Session;

/// Session summary for JSON output
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionSummary {
    display_name: String,
    role: String,
    expires_at: Option<DateTime<Utc>>,
    landing: &'static str,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            display_name: session.display_name.clone(),
            role: session.role.to_string(),
            expires_at: session.expiry,
            landing: landing_route(session.role).path,
        }
    }
}

/// Run the login command
pub async fn login(
    opts: &GlobalOptions,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let theme = ColorfulTheme::default();

    let email = match email {
        Some(e) => e,
        None => Input::with_theme(&theme)
            .with_prompt("Email")
            .interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::with_theme(&theme)
            .with_prompt("Password")
            .interact()?,
    };

    let response = with_spinner(
        ctx.format,
        "Signing in...",
        ctx.client.authenticate(email.trim(), &password),
    )
    .await?;

    let session = ctx.router.complete_login(&response.token)?;
    print_session(ctx.format, &session)
}

/// Run the logout command. Logging out without a session is not an error.
pub fn logout(opts: &GlobalOptions, format: OutputFormat) -> Result<()> {
    let router = Router::new(open_session(opts)?);
    router.logout()?;
    report_success(format, "Signed out")
}

/// Run the whoami command
pub fn whoami(opts: &GlobalOptions, format: OutputFormat) -> Result<()> {
    let session = open_session(opts)?;

    match session.current() {
        Ok(current) if !current.is_expired() => print_session(format, &current),
        Ok(_) => {
            log::debug!("Stored credential has expired");
            session.logout()?;
            Err(ApiError::Unauthenticated.into())
        }
        Err(DecodeError::Missing) => Err(ApiError::Unauthenticated.into()),
        Err(e) => {
            log::debug!("Stored credential not usable: {}", e);
            Err(ApiError::Unauthenticated.into())
        }
    }
}

fn print_session(format: OutputFormat, session: &Session) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", format_json(&SessionSummary::from(session))?);
        return Ok(());
    }

    println!(
        "{} Signed in as {} ({})",
        "✓".green(),
        session.display_name.bold(),
        session.role
    );
    match session.expiry {
        Some(expiry) => println!("  Session ends: {}", describe_expiry(expiry, Utc::now())),
        None => println!("  Session ends: {}", "on logout".dimmed()),
    }
    println!("  Home: {}", landing_route(session.role).path.cyan());
    Ok(())
}

/// "in 2h 5m (2026-01-05 14:00 UTC)"
pub fn describe_expiry(expiry: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = expiry.signed_duration_since(now);
    let stamp = expiry.format("%Y-%m-%d %H:%M UTC");
    if remaining.num_seconds() <= 0 {
        return format!("expired ({})", stamp);
    }
    format!(
        "in {}h {}m ({})",
        remaining.num_hours(),
        remaining.num_minutes() % 60,
        stamp
    )
}
