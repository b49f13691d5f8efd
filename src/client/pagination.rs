//! Pagination helpers for API requests
//!
//! List endpoints answer in one of three shapes: a Spring-style page object,
//! the visits wrapper `{ visits: <page>, newPatientsCount }`, or a bare array.
//! `PageEnvelope` accepts all three so callers see one shape.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::models::Status;

/// Rows per page on every management screen.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Query parameters for one page request.
///
/// Use the builder pattern to configure filters.
///
/// # Example
/// ```ignore
/// let query = PageQuery::new(DEFAULT_PAGE_SIZE)
///     .page(2)
///     .search("asha");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Zero-based page index
    pub page: usize,
    pub size: usize,
    pub search: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<Status>,
    /// Patients only: leave out deceased patients
    pub alive_only: bool,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageQuery {
    pub fn new(size: usize) -> Self {
        Self {
            page: 0,
            size,
            search: None,
            start_date: None,
            end_date: None,
            status: None,
            alive_only: false,
        }
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Set the free-text search. Blank terms clear it.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = (!term.trim().is_empty()).then_some(term);
        self
    }

    pub fn date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn status(mut self, status: Option<Status>) -> Self {
        self.status = status;
        self
    }

    pub fn alive_only(mut self, alive_only: bool) -> Self {
        self.alive_only = alive_only;
        self
    }

    /// Convert to query string parameters.
    ///
    /// `page` and `size` are always sent; filters only when set.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
        ];

        if let Some(ref search) = self.search {
            params.push(("search", search.clone()));
        }
        if let Some(start) = self.start_date {
            params.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if self.alive_only {
            params.push(("aliveOnly", "true".to_string()));
        }

        params
    }
}

/// One page of rows plus the paging counters the controller needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub content: Vec<T>,

    /// Page index echoed by the server, when it sends one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<usize>,

    pub total_pages: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<u64>,

    /// Extra counter carried by the visits wrapper
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_patients_count: Option<i64>,
}

impl<T> PageEnvelope<T> {
    /// Page through a complete list locally, for endpoints that return everything.
    pub fn from_all(items: Vec<T>, query: &PageQuery) -> Self {
        let size = query.size.max(1);
        let total = items.len();
        let total_pages = total.div_ceil(size);
        let content = items
            .into_iter()
            .skip(query.page.saturating_mul(size))
            .take(size)
            .collect();

        Self {
            content,
            number: Some(query.page),
            total_pages,
            total_elements: Some(total as u64),
            new_patients_count: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpringPage<T> {
    #[serde(default = "Vec::new")]
    content: Vec<T>,
    #[serde(default)]
    number: Option<usize>,
    #[serde(default)]
    total_pages: usize,
    #[serde(default)]
    total_elements: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPage<T> {
    Bare(Vec<T>),
    #[serde(rename_all = "camelCase")]
    Visits {
        visits: SpringPage<T>,
        #[serde(default)]
        new_patients_count: Option<i64>,
    },
    Page(SpringPage<T>),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for PageEnvelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let envelope = match RawPage::<T>::deserialize(deserializer)? {
            RawPage::Visits {
                visits,
                new_patients_count,
            } => PageEnvelope {
                content: visits.content,
                number: visits.number,
                total_pages: visits.total_pages,
                total_elements: visits.total_elements,
                new_patients_count,
            },
            RawPage::Page(page) => PageEnvelope {
                content: page.content,
                number: page.number,
                total_pages: page.total_pages,
                total_elements: page.total_elements,
                new_patients_count: None,
            },
            RawPage::Bare(items) => PageEnvelope {
                total_pages: usize::from(!items.is_empty()),
                total_elements: Some(items.len() as u64),
                number: Some(0),
                content: items,
                new_patients_count: None,
            },
        };
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
    }

    #[test]
    fn test_query_params_defaults() {
        let params = PageQuery::default().to_query_params();
        assert_eq!(
            params,
            vec![("page", "0".to_string()), ("size", "6".to_string())]
        );
    }

    #[test]
    fn test_query_params_with_filters() {
        let query = PageQuery::new(10)
            .page(3)
            .search("asha")
            .date_range(NaiveDate::from_ymd_opt(2026, 1, 1), NaiveDate::from_ymd_opt(2026, 1, 31))
            .status(Some(Status::Completed));

        let params = query.to_query_params();
        assert!(params.contains(&("page", "3".to_string())));
        assert!(params.contains(&("search", "asha".to_string())));
        assert!(params.contains(&("startDate", "2026-01-01".to_string())));
        assert!(params.contains(&("endDate", "2026-01-31".to_string())));
        assert!(params.contains(&("status", "COMPLETED".to_string())));
    }

    #[test]
    fn test_alive_only_flag() {
        let params = PageQuery::default().alive_only(true).to_query_params();
        assert!(params.contains(&("aliveOnly", "true".to_string())));
        assert_eq!(PageQuery::default().to_query_params().len(), 2);
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let query = PageQuery::default().search("   ");
        assert!(query.search.is_none());
    }

    #[test]
    fn test_spring_page_shape() {
        let page: PageEnvelope<Row> = serde_json::from_value(json!({
            "content": [{ "id": 1 }, { "id": 2 }],
            "number": 1,
            "totalPages": 4,
            "totalElements": 20,
            "size": 6,
        }))
        .unwrap();

        assert_eq!(page.content, vec![Row { id: 1 }, Row { id: 2 }]);
        assert_eq!(page.number, Some(1));
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn test_visits_wrapper_shape() {
        let page: PageEnvelope<Row> = serde_json::from_value(json!({
            "visits": { "content": [{ "id": 9 }], "totalPages": 2, "number": 0 },
            "newPatientsCount": 3,
        }))
        .unwrap();

        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.new_patients_count, Some(3));
    }

    #[test]
    fn test_bare_array_shape() {
        let page: PageEnvelope<Row> = serde_json::from_value(json!([{ "id": 5 }])).unwrap();
        assert_eq!(page.total_pages, 1);

        let page: PageEnvelope<Row> = serde_json::from_value(json!([])).unwrap();
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_from_all_pages_locally() {
        let rows: Vec<i64> = (1..=14).collect();

        let page = PageEnvelope::from_all(rows.clone(), &PageQuery::new(6).page(2));
        assert_eq!(page.content, vec![13, 14]);
        assert_eq!(page.total_pages, 3);

        let page = PageEnvelope::from_all(rows, &PageQuery::new(6).page(5));
        assert!(page.content.is_empty());
    }
}
