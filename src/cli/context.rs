//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, session restoration, route checks and client
//! initialization.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{CareApi, CareClient, Gateway};
use crate::config::Config;
use crate::controller::{Confirmer, confirmer};
use crate::error::Result;
use crate::router::{Router, TerminalNavigator};
use crate::session::{FileTokenStore, Scheduled, SessionManager, TokenStore};

/// Open the session file named by `--session`, or the default one.
pub fn open_session(opts: &GlobalOptions) -> Result<Arc<SessionManager>> {
    let path = match opts.session_ref() {
        Some(p) => PathBuf::from(p),
        None => FileTokenStore::default_path()?,
    };
    log::debug!("Using session file {}", path.display());

    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(path));
    Ok(Arc::new(SessionManager::new(
        store,
        Arc::new(TerminalNavigator::new()),
    )))
}

/// Context for command execution containing config, session, client and
/// runtime options.
pub struct CommandContext {
    pub config: Config,
    pub session: Arc<SessionManager>,
    pub router: Router,
    /// API client (Arc-wrapped so page sources can hold it)
    pub client: Arc<dyn CareApi>,
    pub format: OutputFormat,
    pub assume_yes: bool,
}

impl CommandContext {
    /// Build the context without any route check (used by `login`).
    ///
    /// # Errors
    /// Returns an error if the config file is unreadable or no API URL is
    /// configured.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_or_default(opts.config_ref())?;
        let base_url = config.resolve_api_url(opts.api_url_ref())?;
        let session = open_session(opts)?;
        let router = Router::new(Arc::clone(&session));
        let gateway = Gateway::new(&base_url, session.store())?;

        let format = opts
            .format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(|f| f.parse().ok())
            })
            .unwrap_or_default();

        Ok(Self {
            config,
            session,
            router,
            client: Arc::new(CareClient::new(gateway)),
            format,
            assume_yes: opts.assume_yes,
        })
    }

    /// Build the context for a screen route: restore the session, arm
    /// auto-logout and check the route against the current role.
    pub fn for_route(opts: &GlobalOptions, path: &str) -> Result<Self> {
        let ctx = Self::new(opts)?;
        match ctx.session.init() {
            Scheduled::Armed(remaining) => {
                log::debug!("Session ends in {}s", remaining.as_secs())
            }
            other => log::debug!("Auto-logout: {:?}", other),
        }
        ctx.router.require(path)?;
        Ok(ctx)
    }

    pub fn page_size(&self) -> usize {
        self.config.preferences.page_size.max(1)
    }

    pub fn search_debounce(&self) -> Duration {
        self.config.preferences.search_debounce()
    }

    pub fn confirmer(&self) -> Box<dyn Confirmer> {
        confirmer(self.assume_yes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use tempfile::TempDir;

    fn opts_in(dir: &TempDir) -> GlobalOptions {
        GlobalOptions {
            config: Some(dir.path().join("config.yaml").to_string_lossy().into_owned()),
            session: Some(dir.path().join("session.yaml").to_string_lossy().into_owned()),
            ..GlobalOptions::default()
        }
    }

    #[test]
    fn test_context_requires_api_url() {
        let dir = TempDir::new().unwrap();
        let err = CommandContext::new(&opts_in(&dir)).err().unwrap();
        assert!(matches!(err, Error::Config(ConfigError::MissingApiUrl)));
    }

    #[test]
    fn test_format_falls_back_to_preference() {
        let dir = TempDir::new().unwrap();
        let opts = opts_in(&dir);
        let mut config = Config::default();
        config.api_url = Some("http://localhost:9/".to_string());
        config.preferences.format = Some("json".to_string());
        config.save_at(opts.config_ref()).unwrap();

        let ctx = CommandContext::new(&opts).unwrap();
        assert_eq!(ctx.format, OutputFormat::Json);
        assert_eq!(ctx.page_size(), 6);

        let flagged = GlobalOptions {
            format: Some(OutputFormat::Pretty),
            ..opts
        };
        assert_eq!(CommandContext::new(&flagged).unwrap().format, OutputFormat::Pretty);
    }

    #[test]
    fn test_for_route_without_session_is_unauthenticated() {
        let dir = TempDir::new().unwrap();
        let opts = GlobalOptions {
            api_url: Some("http://localhost:9/".to_string()),
            ..opts_in(&dir)
        };

        let err = CommandContext::for_route(&opts, "/admin/patient").err().unwrap();
        assert!(err.is_session_ending());
    }
}
