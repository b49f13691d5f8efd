//! Generic list command handler
//!
//! Every list command follows the same flow:
//! 1. Build a page source over the API call
//! 2. Load the requested page through the controller
//! 3. Convert rows to the display type and print them with the page footer
//! 4. Optionally browse interactively (paging, search, filters, delete)

use std::sync::Arc;

use colored::Colorize;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use futures::future::BoxFuture;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::handlers::with_spinner;
use crate::cli::{CommandContext, ListArgs, OutputFormat};
use crate::cli::parse_date;
use crate::client::models::{Consumable, Equipment, Patient, Procedure, Status, Visit, Volunteer};
use crate::controller::{
    ListState, LoadOutcome, MutationOutcome, PagedListController, PagedSource,
};
use crate::error::Result;
use crate::output::Formattable;
use crate::output::json::{PageMeta, format_json_page};

/// Rows that can be picked and deleted from an interactive list.
pub trait ListRow: Clone + Send + Sync + 'static {
    fn row_id(&self) -> i64;
    fn row_label(&self) -> String;
}

/// Deletes the row with the given id, returning the server's confirmation.
pub type DeleteAction = Box<dyn Fn(i64) -> BoxFuture<'static, Result<String>> + Send + Sync>;

/// A list screen: a controller plus an optional delete action.
pub struct ListCommand<T> {
    resource: &'static str,
    controller: PagedListController<T>,
    delete: Option<DeleteAction>,
    searchable: bool,
    filterable: bool,
}

impl<T: ListRow> ListCommand<T> {
    /// Build a list over `source`, sized from the user's preferences.
    pub fn new(ctx: &CommandContext, resource: &'static str, source: Arc<dyn PagedSource<T>>) -> Self {
        let controller = PagedListController::new(source)
            .with_page_size(ctx.page_size())
            .with_debounce(ctx.search_debounce());

        Self {
            resource,
            controller,
            delete: None,
            searchable: true,
            filterable: false,
        }
    }

    pub fn with_delete(mut self, delete: DeleteAction) -> Self {
        self.delete = Some(delete);
        self
    }

    /// Drop the search actions when browsing.
    pub fn without_search(mut self) -> Self {
        self.searchable = false;
        self
    }

    /// Offer status and date-range filters when browsing.
    pub fn with_filters(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn controller(&self) -> &PagedListController<T> {
        &self.controller
    }

    /// Load the requested page, print it and browse if asked to.
    pub async fn run<D>(mut self, ctx: &CommandContext, args: &ListArgs) -> Result<()>
    where
        D: From<T> + Tabled + Serialize,
    {
        log::debug!("Listing {} (page {})", self.resource, args.page);
        if let Some(size) = args.size {
            self.controller = self.controller.with_page_size(size);
        }

        let message = format!("Loading {}...", self.resource);
        with_spinner(
            ctx.format,
            &message,
            self.controller.load(args.page_index(), args.search_term()),
        )
        .await?;

        print_page::<T, D>(ctx.format, &self.controller.snapshot().await)?;

        if args.interactive {
            self.browse::<D>(ctx).await?;
        }
        Ok(())
    }

    async fn browse<D>(&self, ctx: &CommandContext) -> Result<()>
    where
        D: From<T> + Tabled + Serialize,
    {
        let theme = ColorfulTheme::default();
        let mut actions = vec!["Next page", "Previous page"];
        if self.searchable {
            actions.extend(["Search", "Clear search"]);
        }
        if self.filterable {
            actions.extend(["Filter by status", "Filter by dates"]);
        }
        actions.push("Refresh");
        if self.delete.is_some() {
            actions.push("Delete...");
        }
        actions.push("Quit");

        loop {
            let Some(choice) = Select::with_theme(&theme)
                .with_prompt(format!("Browse {}", self.resource))
                .items(&actions)
                .default(0)
                .interact_opt()?
            else {
                return Ok(());
            };

            let outcome = match actions[choice] {
                "Next page" => self.controller.next_page().await,
                "Previous page" => self.controller.prev_page().await,
                "Search" => {
                    let term: String = Input::with_theme(&theme)
                        .with_prompt("Search (empty to clear)")
                        .allow_empty(true)
                        .interact_text()?;
                    self.controller
                        .search_debounced(&term)
                        .await
                        .map(|o| o.unwrap_or(LoadOutcome::Stale))
                }
                "Clear search" => self.controller.set_search("").await,
                "Filter by status" => match pick_status(&theme)? {
                    Some(status) => self.controller.set_status(status).await,
                    None => continue,
                },
                "Filter by dates" => {
                    let start = prompt_date(&theme, "From (YYYY-MM-DD, empty for none)")?;
                    let end = prompt_date(&theme, "To (YYYY-MM-DD, empty for none)")?;
                    self.controller.set_date_range(start, end).await
                }
                "Refresh" => self.controller.refresh().await,
                "Delete..." => match self.delete_one(ctx, &theme).await {
                    Ok(Some(message)) => {
                        println!("{} {}", "✓".green(), message);
                        Ok(LoadOutcome::Unchanged)
                    }
                    Ok(None) => continue,
                    Err(e) => Err(e),
                },
                _ => return Ok(()),
            };

            match outcome {
                Ok(LoadOutcome::Unchanged) if actions[choice] != "Delete..." => {
                    println!("{}", "No more pages in that direction.".dimmed());
                }
                Ok(_) => print_page::<T, D>(ctx.format, &self.controller.snapshot().await)?,
                Err(e) => eprintln!("{} {}", "✗".red(), e),
            }
        }
    }

    /// Pick a row on the current page and delete it after confirmation.
    async fn delete_one(&self, ctx: &CommandContext, theme: &ColorfulTheme) -> Result<Option<String>> {
        let Some(delete) = self.delete.as_ref() else {
            return Ok(None);
        };

        let rows = self.controller.snapshot().await.rows;
        if rows.is_empty() {
            println!("{}", "Nothing to delete on this page.".dimmed());
            return Ok(None);
        }

        let labels: Vec<String> = rows.iter().map(T::row_label).collect();
        let Some(index) = Select::with_theme(theme)
            .with_prompt("Delete which row?")
            .items(&labels)
            .interact_opt()?
        else {
            return Ok(None);
        };

        let row = &rows[index];
        let id = row.row_id();
        let prompt = format!("Delete {}?", row.row_label());
        let confirmer = ctx.confirmer();

        match self
            .controller
            .delete_confirmed(confirmer.as_ref(), &prompt, || delete(id))
            .await?
        {
            MutationOutcome::Done(message) => Ok(Some(message)),
            MutationOutcome::Cancelled => Ok(None),
        }
    }
}

/// Ask for a status filter. `Some(None)` clears it; `None` means cancelled.
fn pick_status(theme: &ColorfulTheme) -> Result<Option<Option<Status>>> {
    const CHOICES: [(&str, Option<Status>); 4] = [
        ("Any status", None),
        ("Pending", Some(Status::Pending)),
        ("Completed", Some(Status::Completed)),
        ("Cancelled", Some(Status::Cancelled)),
    ];
    let labels: Vec<&str> = CHOICES.iter().map(|(label, _)| *label).collect();

    let choice = Select::with_theme(theme)
        .with_prompt("Status")
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| CHOICES[i].1))
}

/// Ask for an optional date, re-prompting until it parses.
fn prompt_date(theme: &ColorfulTheme, prompt: &str) -> Result<Option<chrono::NaiveDate>> {
    let answer: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Ok(())
            } else {
                parse_date(input).map(|_| ())
            }
        })
        .interact_text()?;

    if answer.trim().is_empty() {
        return Ok(None);
    }
    parse_date(&answer).map(Some).map_err(crate::error::Error::Other)
}

/// Print the current page and, for human formats, a page footer.
pub fn print_page<T, D>(format: OutputFormat, state: &ListState<T>) -> Result<()>
where
    T: Clone,
    D: From<T> + Tabled + Serialize,
{
    let rows: Vec<D> = state.rows.iter().cloned().map(D::from).collect();

    match format {
        OutputFormat::Json => {
            let page = PageMeta {
                index: state.page_index,
                total_pages: state.total_pages,
            };
            println!("{}", format_json_page(&rows, page)?);
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            rows.print(format)?;
            if let Some(footer) = page_footer(state) {
                println!("{}", footer.dimmed());
            }
        }
    }
    Ok(())
}

fn page_footer<T>(state: &ListState<T>) -> Option<String> {
    if state.total_pages == 0 {
        return None;
    }
    let mut footer = format!("Page {} of {}", state.page_index + 1, state.total_pages);
    if !state.search.is_empty() {
        footer.push_str(&format!(" (search: \"{}\")", state.search));
    }
    Some(footer)
}

impl ListRow for Patient {
    fn row_id(&self) -> i64 {
        self.id
    }

    fn row_label(&self) -> String {
        format!("#{} {}", self.id, self.name)
    }
}

impl ListRow for Volunteer {
    fn row_id(&self) -> i64 {
        self.id
    }

    fn row_label(&self) -> String {
        format!("#{} {}", self.id, self.name)
    }
}

impl ListRow for Equipment {
    fn row_id(&self) -> i64 {
        self.id
    }

    fn row_label(&self) -> String {
        format!("#{} {}", self.id, self.name)
    }
}

impl ListRow for Consumable {
    fn row_id(&self) -> i64 {
        self.id
    }

    fn row_label(&self) -> String {
        format!("#{} {}", self.id, self.name)
    }
}

impl ListRow for Procedure {
    fn row_id(&self) -> i64 {
        self.id
    }

    fn row_label(&self) -> String {
        format!("#{} {}", self.id, self.name)
    }
}

impl ListRow for Visit {
    fn row_id(&self) -> i64 {
        self.id
    }

    fn row_label(&self) -> String {
        let who = self.patient_name.as_deref().unwrap_or("unknown patient");
        match self.visit_date {
            Some(date) => format!("#{} {} on {}", self.id, who, date),
            None => format!("#{} {}", self.id, who),
        }
    }
}
