//! carectl - command-line companion for the palliative-care visit service

use clap::Parser;
use colored::Colorize;

mod cli;
mod client;
mod config;
mod controller;
mod error;
mod models;
mod output;
mod router;
mod session;
mod validation;
mod wizard;

use cli::{Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), err);
        if err.is_session_ending() {
            eprintln!("  → Run 'carectl login' to sign in");
        }
        std::process::exit(1);
    }
}

/// Warn by default, debug with `--debug`; `RUST_LOG` always wins.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
    log::debug!("Debug logging enabled");
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);
    let format = opts.format.unwrap_or_default();

    match cli.command {
        Commands::Init => cli::init::run(&opts),
        Commands::Login { email, password } => cli::auth::login(&opts, email, password).await,
        Commands::Logout => cli::auth::logout(&opts, format),
        Commands::Status => cli::status::run(&opts),
        Commands::Whoami => cli::auth::whoami(&opts, format),
        Commands::Patient(cmd) => cli::patient::run(&opts, cmd).await,
        Commands::Volunteer(cmd) => cli::volunteer::run(&opts, cmd).await,
        Commands::Equipment(cmd) => cli::equipment::run(&opts, cmd).await,
        Commands::Consumable(cmd) => cli::consumable::run(&opts, cmd).await,
        Commands::Procedure(cmd) => cli::procedure::run(&opts, cmd).await,
        Commands::Visit(cmd) => cli::visit::run(&opts, cmd).await,
        Commands::Dashboard => cli::dashboard::run(&opts).await,
        Commands::Rounds(cmd) => cli::rounds::run(&opts, cmd).await,
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
    }
}
