//! Invoice listing cache using Moka.
//!
//! Listing pages are cached by `(query, page)`. A successful invoice write
//! calls [`Revalidator::invalidate`] with the listing path, which drops every
//! cached page so the next read goes back to the database.
//!
//! Keys also carry a generation that every invalidation bumps. A reader
//! captures the generation before querying and stores its page under it, so a
//! page read before a write can never be served after that write's
//! invalidation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use tracing::debug;

use invoicer_core::invoice::{INVOICES_PATH, Revalidator};
use invoicer_db::repositories::FilteredInvoice;
use invoicer_shared::types::PageLink;

/// One page of the invoice listing, as served to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceListing {
    /// Rows on this page.
    pub invoices: Vec<FilteredInvoice>,
    /// Page number actually served (at least 1).
    pub current_page: u64,
    /// Pages available for the same query.
    pub total_pages: u64,
    /// Page-number strip for the listing footer.
    pub pagination: Vec<PageLink>,
}

/// (generation, query, page)
type ListingKey = (u64, String, u64);

/// Cache of invoice listing pages.
#[derive(Clone)]
pub struct ListingCache {
    pages: Cache<ListingKey, InvoiceListing>,
    generation: Arc<AtomicU64>,
}

impl ListingCache {
    /// Creates a cache holding at most `max_entries` pages for `ttl_secs` each.
    #[must_use]
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let pages = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            pages,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current generation. Capture it before reading the pages to be cached.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Returns the cached page for `query` in the current generation, if any.
    pub async fn get(&self, query: &str, page: u64) -> Option<InvoiceListing> {
        self.pages
            .get(&(self.generation(), query.to_string(), page))
            .await
    }

    /// Stores a page read while `generation` was current. A page from an
    /// invalidated generation is stored under a key no reader will ask for.
    pub async fn insert(
        &self,
        generation: u64,
        query: &str,
        page: u64,
        listing: InvoiceListing,
    ) {
        self.pages
            .insert((generation, query.to_string(), page), listing)
            .await;
    }

    /// Starts a new generation and drops every cached page.
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.pages.invalidate_all();
    }
}

impl std::fmt::Debug for ListingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingCache")
            .field("generation", &self.generation())
            .field("entries", &self.pages.entry_count())
            .finish()
    }
}

impl Revalidator for ListingCache {
    fn invalidate(&self, scope: &str) {
        // A scope covers the listing if it is the listing path or one of its ancestors.
        if INVOICES_PATH.starts_with(scope) {
            self.clear();
            debug!(scope, "Invoice listing cache cleared");
        }
    }
}
