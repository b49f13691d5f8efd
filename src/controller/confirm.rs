//! Confirmation prompts for destructive actions

use dialoguer::Confirm;

use crate::error::Result;

/// Asks the user before a destructive action.
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Interactive yes/no prompt on the terminal. Defaults to "no".
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}

/// Answers every prompt the same way (`--yes`, or scripted tests).
pub struct FixedAnswer(pub bool);

impl Confirmer for FixedAnswer {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        log::debug!("Auto-answering {:?} with {}", prompt, self.0);
        Ok(self.0)
    }
}

/// Pick the confirmer for the `--yes` flag.
pub fn confirmer(assume_yes: bool) -> Box<dyn Confirmer> {
    if assume_yes {
        Box::new(FixedAnswer(true))
    } else {
        Box::new(TerminalConfirmer)
    }
}
