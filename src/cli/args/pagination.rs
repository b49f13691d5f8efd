//! Paging and filter argument types for list commands

use chrono::NaiveDate;
use clap::Args;

use super::parse_date;

/// Shared arguments for paged list commands.
///
/// Flatten this into any list command:
/// ```ignore
/// List {
///     #[command(flatten)]
///     list: ListArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long, short = 'p', default_value_t = 1)]
    pub page: usize,

    /// Search term
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Rows per page (overrides the config preference)
    #[arg(long, short = 'n')]
    pub size: Option<usize>,

    /// Browse interactively: next/previous/search/refresh
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

impl ListArgs {
    /// 0-based page index for the controller.
    pub fn page_index(&self) -> usize {
        self.page.saturating_sub(1)
    }

    pub fn search_term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

/// Paging arguments for lists the server cannot search.
#[derive(Args, Debug, Default, Clone)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long, short = 'p', default_value_t = 1)]
    pub page: usize,

    /// Rows per page (overrides the config preference)
    #[arg(long, short = 'n')]
    pub size: Option<usize>,

    /// Browse interactively: next/previous/refresh
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

impl From<PageArgs> for ListArgs {
    fn from(args: PageArgs) -> Self {
        Self {
            page: args.page,
            search: None,
            size: args.size,
            interactive: args.interactive,
        }
    }
}

/// Inclusive date filter.
#[derive(Args, Debug, Default, Clone)]
pub struct DateRangeArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,
}
