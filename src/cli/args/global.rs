//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// For most options, the precedence is: CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; config file defaults are resolved later in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format; `None` defers to the config file preference
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.carectl/config.yaml)
    pub config: Option<String>,

    /// Custom session file path (defaults to ~/.carectl/session.yaml)
    pub session: Option<String>,

    /// API base URL override
    pub api_url: Option<String>,

    /// Answer "yes" to every confirmation prompt
    pub assume_yes: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            session: cli.session.clone(),
            api_url: cli.api_url.clone(),
            assume_yes: cli.yes,
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn session_ref(&self) -> Option<&str> {
        self.session.as_deref()
    }

    pub fn api_url_ref(&self) -> Option<&str> {
        self.api_url.as_deref()
    }
}
