//! Paginated resource list controller
//!
//! Every management screen runs the same protocol: load a page for the
//! current search and filters, move between pages, mutate a row and reload.
//! The controller owns that protocol once, generic over the row type.
//!
//! Loads may overlap. Each load takes a ticket from a generation counter and
//! only the most recently issued load is allowed to write its result; earlier
//! responses that arrive late are discarded.

mod confirm;
mod source;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::Mutex;

pub use confirm::{Confirmer, confirmer};
#[cfg(test)]
pub use confirm::FixedAnswer;
pub use source::{FnSource, PagedSource};

use crate::client::models::Status;
use crate::client::{DEFAULT_PAGE_SIZE, PageQuery};
use crate::error::Result;
use crate::validation::validate_date_range;

/// Default quiet period before a typed search is sent.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Observable list state
#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub rows: Vec<T>,
    pub page_index: usize,
    pub total_pages: usize,
    pub search: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<Status>,
    pub loading: bool,
    /// Message from the most recent failed load, cleared by the next success
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            page_index: 0,
            total_pages: 0,
            search: String::new(),
            start_date: None,
            end_date: None,
            status: None,
            loading: false,
            error: None,
        }
    }
}

/// What a load did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Rows replaced with the given page
    Loaded { page_index: usize, total_pages: usize },
    /// A newer load was issued while this one was in flight; result dropped
    Stale,
    /// Nothing to do (already on the first or last page)
    Unchanged,
}

/// What a confirmed mutation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Done(String),
    Cancelled,
}

/// Whether a page index no longer fits the reported page count.
fn out_of_range(page_index: usize, total_pages: usize) -> bool {
    if total_pages == 0 {
        page_index > 0
    } else {
        page_index >= total_pages
    }
}

/// Paginated list over a page source
pub struct PagedListController<T> {
    source: Arc<dyn PagedSource<T>>,
    page_size: usize,
    debounce: Duration,
    state: Mutex<ListState<T>>,
    generation: AtomicU64,
    search_ticket: AtomicU64,
}

impl<T: Clone + Send + Sync + 'static> PagedListController<T> {
    pub fn new(source: Arc<dyn PagedSource<T>>) -> Self {
        Self {
            source,
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_SEARCH_DEBOUNCE,
            state: Mutex::new(ListState::default()),
            generation: AtomicU64::new(0),
            search_ticket: AtomicU64::new(0),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> ListState<T> {
        self.state.lock().await.clone()
    }

    /// Load a page for a search term.
    ///
    /// A page index past the end is clamped to the last page (or 0) and
    /// reloaded once. On failure the previous rows, page and search term
    /// stay in place.
    pub async fn load(&self, page_index: usize, search: &str) -> Result<LoadOutcome> {
        let mut target = page_index;
        let mut clamped = false;

        loop {
            let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let query = {
                let mut state = self.state.lock().await;
                state.loading = true;
                PageQuery::new(self.page_size)
                    .page(target)
                    .search(search)
                    .date_range(state.start_date, state.end_date)
                    .status(state.status)
            };

            log::debug!("Loading page {} (search {:?}, ticket {})", target, search, ticket);
            let result = self.source.fetch(query).await;

            let mut state = self.state.lock().await;
            if self.generation.load(Ordering::SeqCst) != ticket {
                log::debug!("Discarding stale response for ticket {}", ticket);
                return Ok(LoadOutcome::Stale);
            }
            state.loading = false;

            let page = match result {
                Ok(page) => page,
                Err(e) => {
                    log::warn!("Failed to load page {}: {}", target, e);
                    state.error = Some(e.to_string());
                    return Err(e);
                }
            };

            let page_index = page.number.unwrap_or(target);
            if !clamped && out_of_range(page_index, page.total_pages) {
                drop(state);
                target = page.total_pages.saturating_sub(1);
                clamped = true;
                log::debug!(
                    "Page {} is past the end ({} pages); reloading page {}",
                    page_index,
                    page.total_pages,
                    target
                );
                continue;
            }

            state.rows = page.content;
            state.total_pages = page.total_pages;
            state.page_index = page_index;
            state.search = search.to_string();
            state.error = None;

            return Ok(LoadOutcome::Loaded {
                page_index,
                total_pages: state.total_pages,
            });
        }
    }

    /// Reload the current page and search.
    pub async fn refresh(&self) -> Result<LoadOutcome> {
        let (page, search) = {
            let state = self.state.lock().await;
            (state.page_index, state.search.clone())
        };
        self.load(page, &search).await
    }

    /// Apply a new search immediately, from the first page.
    pub async fn set_search(&self, term: &str) -> Result<LoadOutcome> {
        self.search_ticket.fetch_add(1, Ordering::SeqCst);
        self.load(0, term).await
    }

    /// Apply a search after the quiet period, unless a newer one arrives first.
    ///
    /// Returns `None` when superseded; no request is made in that case.
    pub async fn search_debounced(&self, term: &str) -> Result<Option<LoadOutcome>> {
        let ticket = self.search_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.debounce).await;

        if self.search_ticket.load(Ordering::SeqCst) != ticket {
            return Ok(None);
        }
        self.load(0, term).await.map(Some)
    }

    pub async fn next_page(&self) -> Result<LoadOutcome> {
        let (page, total, search) = {
            let state = self.state.lock().await;
            (state.page_index, state.total_pages, state.search.clone())
        };
        if page + 1 >= total {
            return Ok(LoadOutcome::Unchanged);
        }
        self.load(page + 1, &search).await
    }

    pub async fn prev_page(&self) -> Result<LoadOutcome> {
        let (page, search) = {
            let state = self.state.lock().await;
            (state.page_index, state.search.clone())
        };
        if page == 0 {
            return Ok(LoadOutcome::Unchanged);
        }
        self.load(page - 1, &search).await
    }

    /// Set date and status filters without loading.
    pub async fn set_filters(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        status: Option<Status>,
    ) -> Result<()> {
        validate_date_range(start, end)?;
        let mut state = self.state.lock().await;
        state.start_date = start;
        state.end_date = end;
        state.status = status;
        Ok(())
    }

    /// Filter by date range and reload from the first page.
    pub async fn set_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<LoadOutcome> {
        validate_date_range(start, end)?;
        let search = {
            let mut state = self.state.lock().await;
            state.start_date = start;
            state.end_date = end;
            state.search.clone()
        };
        self.load(0, &search).await
    }

    /// Filter by status and reload from the first page.
    pub async fn set_status(&self, status: Option<Status>) -> Result<LoadOutcome> {
        let search = {
            let mut state = self.state.lock().await;
            state.status = status;
            state.search.clone()
        };
        self.load(0, &search).await
    }

    /// Run one mutating call; on success reload the current page.
    ///
    /// A failed mutation leaves the list untouched. A failed reload after a
    /// successful mutation is recorded in the state but does not fail the call.
    pub async fn mutate<F, Fut>(&self, action: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let message = action().await?;
        if let Err(e) = self.refresh().await {
            log::warn!("Reload after change failed: {}", e);
        }
        Ok(message)
    }

    /// Ask first, then mutate. A declined prompt makes no call.
    pub async fn delete_confirmed<F, Fut>(
        &self,
        confirmer: &dyn Confirmer,
        prompt: &str,
        action: F,
    ) -> Result<MutationOutcome>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        if !confirmer.confirm(prompt)? {
            log::debug!("Declined: {}", prompt);
            return Ok(MutationOutcome::Cancelled);
        }
        self.mutate(action).await.map(MutationOutcome::Done)
    }
}
