//! Shared command handlers

pub mod list;
pub mod mutation;
pub mod progress;

pub use list::ListCommand;
pub use mutation::{report_success, run_delete, run_mutation, write_export};
pub use progress::with_spinner;
