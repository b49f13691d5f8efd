//! Page sources
//!
//! A controller is generic over where its rows come from. API-backed screens
//! wrap a client call in an `FnSource`; tests wrap scripted futures.

use std::future::Future;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::client::{PageEnvelope, PageQuery};
use crate::error::{Error, Result};

/// Something that can fetch one page for a query.
#[async_trait]
pub trait PagedSource<T>: Send + Sync {
    async fn fetch(&self, query: PageQuery) -> Result<PageEnvelope<T>>;
}

type Fetch<T> = Box<dyn Fn(PageQuery) -> BoxFuture<'static, Result<PageEnvelope<T>>> + Send + Sync>;

/// A page source backed by a closure returning a future.
///
/// # Example
/// ```ignore
/// let client = ctx.client.clone();
/// let source = FnSource::new(move |query| {
///     let client = client.clone();
///     async move { client.list_patients(&query).await }
/// });
/// ```
pub struct FnSource<T> {
    fetch: Fetch<T>,
}

impl<T: Send + 'static> FnSource<T> {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(PageQuery) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<PageEnvelope<T>>> + Send + 'static,
    {
        Self {
            fetch: Box::new(move |query| Box::pin(f(query))),
        }
    }

    /// A source for endpoints that return the whole list at once; search
    /// and paging happen locally.
    ///
    /// `matches` receives each row and the lower-cased search term.
    pub fn from_all<F, Fut>(f: F, matches: fn(&T, &str) -> bool) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>>> + Send + 'static,
    {
        Self::new(move |query: PageQuery| {
            let all = f();
            async move {
                let items = all.await?;
                let items = match query.search.as_deref().map(str::to_lowercase) {
                    Some(term) => items.into_iter().filter(|item| matches(item, &term)).collect(),
                    None => items,
                };
                Ok::<_, Error>(PageEnvelope::from_all(items, &query))
            }
        })
    }
}

#[async_trait]
impl<T: Send + 'static> PagedSource<T> for FnSource<T> {
    async fn fetch(&self, query: PageQuery) -> Result<PageEnvelope<T>> {
        (self.fetch)(query).await
    }
}
