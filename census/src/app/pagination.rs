//! Pagination
//!
//! Pull-based traversal of linked pages. A paginator owns the locator of the
//! next page and a fetch function; each call to [`Paginator::next_page`]
//! performs exactly one fetch.

use std::future::Future;

use crate::domain::ports::Page;

/// Walks a chain of pages until one comes back without a next locator
pub struct Paginator<L, F> {
    next: Option<L>,
    fetch: F,
    fetched: usize,
}

impl<L, F> Paginator<L, F> {
    pub fn new(start: L, fetch: F) -> Self {
        Self::from_locator(Some(start), fetch)
    }

    /// A paginator that yields nothing when `start` is `None`
    pub fn from_locator(start: Option<L>, fetch: F) -> Self {
        Self {
            next: start,
            fetch,
            fetched: 0,
        }
    }

    /// Number of fetches performed so far
    pub fn pages_fetched(&self) -> usize {
        self.fetched
    }
}

impl<L, F, Fut, T, E> Paginator<L, F>
where
    F: FnMut(L) -> Fut,
    Fut: Future<Output = Result<Page<T, L>, E>>,
{
    /// Fetch the next page.
    ///
    /// Returns `None` once the chain has ended. A failed fetch is returned
    /// as-is and ends the chain, since there is no locator to continue from.
    pub async fn next_page(&mut self) -> Option<Result<Vec<T>, E>> {
        let locator = self.next.take()?;
        let result = (self.fetch)(locator).await;
        self.fetched += 1;

        Some(result.map(|page| {
            self.next = page.next;
            page.items
        }))
    }

    /// Drain every page into one vector, stopping at the first failure
    #[cfg(test)]
    pub async fn collect_all(mut self) -> Result<Vec<T>, E> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await {
            items.extend(page?);
        }
        Ok(items)
    }
}
