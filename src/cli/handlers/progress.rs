//! Spinner shown on stderr while a request is in flight

use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::OutputFormat;

/// Whether a spinner may be drawn: never for JSON or when stderr is piped.
fn spinner_enabled(format: OutputFormat) -> bool {
    format != OutputFormat::Json && std::io::stderr().is_terminal()
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Await `fut` behind a spinner, clearing it when done.
pub async fn with_spinner<F: Future>(format: OutputFormat, message: &str, fut: F) -> F::Output {
    if !spinner_enabled(format) {
        return fut.await;
    }

    let pb = spinner(message);
    let output = fut.await;
    pb.finish_and_clear();
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_spinner_for_json() {
        assert!(!spinner_enabled(OutputFormat::Json));
    }

    #[tokio::test]
    async fn test_with_spinner_returns_output() {
        let value = with_spinner(OutputFormat::Json, "Loading", async { 42 }).await;
        assert_eq!(value, 42);
    }
}
