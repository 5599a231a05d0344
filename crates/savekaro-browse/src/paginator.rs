//! Listing state for a category page.
//!
//! The paginator owns no I/O. A caller asks it for a [`LoadTicket`], fetches
//! the full product set however it likes, and hands the result back with
//! the ticket. Only the most recent ticket is honored.

use crate::error::LOAD_FAILED_MESSAGE;
use savekaro_catalog::catalog::{FilterDescriptor, Product};
use savekaro_catalog::search::{apply_filters, FilterState, Pagination};
use savekaro_data::FetchError;
use tracing::{debug, info, warn};

/// Where the listing is in its load cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    LoadingInitial,
    Ready,
    LoadingMore,
    /// Load failed; carries the message for the shopper.
    Error(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::LoadingInitial | LoadState::LoadingMore)
    }
}

/// Identifies one full-set load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a load must be completed with its ticket"]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`CatalogPaginator::complete_load`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Results are now displayed.
    Applied { total: usize },
    /// The load failed and the listing is in the error state.
    Failed,
    /// A newer load started since this one; the result was dropped.
    Discarded,
}

/// Filtered, sorted and paged listing for one route.
#[derive(Debug, Clone)]
pub struct CatalogPaginator {
    descriptor: FilterDescriptor,
    filter: FilterState,
    page_size: usize,
    state: LoadState,
    generation: u64,
    filtered: Vec<Product>,
    available_brands: Vec<String>,
    page: usize,
}

impl CatalogPaginator {
    pub fn new(descriptor: FilterDescriptor, page_size: usize) -> Self {
        let filter = FilterState::for_descriptor(&descriptor);
        Self {
            descriptor,
            filter,
            page_size: page_size.max(1),
            state: LoadState::Idle,
            generation: 0,
            filtered: Vec::new(),
            available_brands: Vec::new(),
            page: 1,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn descriptor(&self) -> &FilterDescriptor {
        &self.descriptor
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of products passing every filter.
    pub fn total(&self) -> usize {
        self.filtered.len()
    }

    /// Brands offered in the sidebar for the current route.
    pub fn available_brands(&self) -> &[String] {
        &self.available_brands
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size, self.filtered.len())
    }

    /// Products shown so far: pages `1..=page`, in sorted order.
    pub fn visible(&self) -> &[Product] {
        &self.filtered[self.pagination().visible_range()]
    }

    pub fn has_more(&self) -> bool {
        self.pagination().has_more()
    }

    /// Start a full reload: clears the listing and supersedes any load in
    /// flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::LoadingInitial;
        self.filtered.clear();
        self.page = 1;
        debug!(generation = self.generation, "Listing load started");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Finish the load identified by `ticket`.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Vec<Product>, FetchError>) -> LoadOutcome {
        if ticket.generation() != self.generation {
            warn!(
                generation = ticket.generation(),
                latest = self.generation,
                "Discarding stale listing load"
            );
            return LoadOutcome::Discarded;
        }

        match result {
            Ok(products) => {
                let fetched = products.len();
                let catalog = apply_filters(products, &self.descriptor, &self.filter);
                let total = catalog.len();
                self.filtered = catalog.products;
                self.available_brands = catalog.available_brands;
                self.page = 1;
                self.state = LoadState::Ready;
                info!(fetched, total, "Listing loaded");
                LoadOutcome::Applied { total }
            }
            Err(e) => {
                warn!(error = %e, "Listing load failed");
                self.filtered.clear();
                self.page = 1;
                self.state = LoadState::Error(LOAD_FAILED_MESSAGE.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Replace the sidebar filters and start a reload.
    pub fn set_filter(&mut self, filter: FilterState) -> LoadTicket {
        self.filter = filter;
        self.begin_load()
    }

    /// Change the sidebar filters in place and start a reload.
    pub fn update_filter(&mut self, update: impl FnOnce(&mut FilterState)) -> LoadTicket {
        update(&mut self.filter);
        self.begin_load()
    }

    /// Move to a different route. Filters start over from the new route's
    /// URL brand.
    pub fn set_descriptor(&mut self, descriptor: FilterDescriptor) -> LoadTicket {
        self.filter = FilterState::for_descriptor(&descriptor);
        self.descriptor = descriptor;
        self.begin_load()
    }

    /// Claim the next page. Returns `None` unless the listing is ready and
    /// has more, which coalesces repeated triggers.
    pub fn begin_load_more(&mut self) -> Option<usize> {
        if self.state != LoadState::Ready || !self.has_more() {
            return None;
        }
        self.state = LoadState::LoadingMore;
        Some(self.page + 1)
    }

    /// Reveal the page claimed by [`begin_load_more`](Self::begin_load_more).
    pub fn finish_load_more(&mut self) {
        if self.state == LoadState::LoadingMore {
            self.page += 1;
            self.state = LoadState::Ready;
            debug!(page = self.page, "Revealed next page");
        }
    }

    /// Reveal the next page at once. Returns whether anything changed.
    pub fn load_more(&mut self) -> bool {
        if self.begin_load_more().is_some() {
            self.finish_load_more();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use savekaro_catalog::catalog::CategoryResolver;
    use savekaro_catalog::search::{MinDiscount, SortKey};

    fn products(n: usize) -> Vec<Product> {
        (0..n)
            .map(|i| {
                Product::new(format!("p{}", i), format!("Jeans {}", i), if i % 2 == 0 { "Outfitters" } else { "Breakout" })
                    .with_gender("men")
                    .with_category("jeans")
                    .with_price(1000.0 + i as f64, (i % 60) as u32)
            })
            .collect()
    }

    fn loaded(n: usize) -> CatalogPaginator {
        let mut p = CatalogPaginator::new(CategoryResolver::new().resolve("/men/jeans", None), 20);
        let ticket = p.begin_load();
        p.complete_load(ticket, Ok(products(n)));
        p
    }

    #[test]
    fn test_initial_state() {
        let p = CatalogPaginator::new(FilterDescriptor::default(), 20);
        assert_eq!(p.state(), &LoadState::Idle);
        assert!(p.visible().is_empty());
        assert!(!p.has_more());
    }

    #[test]
    fn test_first_page_after_load() {
        let p = loaded(45);
        assert_eq!(p.state(), &LoadState::Ready);
        assert_eq!(p.total(), 45);
        assert_eq!(p.visible().len(), 20);
        assert!(p.has_more());
        assert_eq!(p.available_brands(), ["Breakout", "Outfitters"]);
    }

    #[test]
    fn test_visible_is_prefix_of_sorted_set() {
        let mut p = loaded(45);
        let first: Vec<_> = p.visible().iter().map(|x| x.id.clone()).collect();
        assert!(p.load_more());
        let second: Vec<_> = p.visible().iter().map(|x| x.id.clone()).collect();
        assert_eq!(second.len(), 40);
        assert_eq!(&second[..20], &first[..]);

        assert!(p.load_more());
        assert_eq!(p.visible().len(), 45);
        assert!(!p.has_more());
        assert!(!p.load_more());
    }

    #[test]
    fn test_load_more_is_coalesced() {
        let mut p = loaded(45);
        assert_eq!(p.begin_load_more(), Some(2));
        assert_eq!(p.begin_load_more(), None);
        p.finish_load_more();
        p.finish_load_more();
        assert_eq!(p.page(), 2);
    }

    #[test]
    fn test_load_more_ignored_while_loading() {
        let mut p = loaded(45);
        let _ticket = p.begin_load();
        assert!(p.state().is_loading());
        assert!(!p.load_more());
        assert_eq!(p.state(), &LoadState::LoadingInitial);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut p = CatalogPaginator::new(FilterDescriptor::default(), 20);
        let first = p.begin_load();
        let second = p.set_filter(FilterState::new().with_sort(SortKey::PriceAsc));
        assert!(second.generation() > first.generation());

        assert_eq!(p.complete_load(second, Ok(products(5))), LoadOutcome::Applied { total: 5 });
        assert_eq!(p.complete_load(first, Ok(products(50))), LoadOutcome::Discarded);
        assert_eq!(p.total(), 5);
        assert_eq!(p.filter().sort, SortKey::PriceAsc);
    }

    #[test]
    fn test_filter_change_resets_to_first_page() {
        let mut p = loaded(45);
        p.load_more();
        let ticket = p.update_filter(|f| f.min_discount = MinDiscount::new(30).unwrap());
        assert_eq!(p.state(), &LoadState::LoadingInitial);
        assert!(p.visible().is_empty());

        p.complete_load(ticket, Ok(products(45)));
        assert_eq!(p.page(), 1);
        assert!(p.visible().iter().all(|x| x.discount_percent >= 30));
    }

    #[test]
    fn test_failure_leaves_empty_error_state() {
        let mut p = loaded(45);
        let ticket = p.begin_load();
        assert_eq!(p.complete_load(ticket, Err(FetchError::Timeout)), LoadOutcome::Failed);
        assert_eq!(p.state(), &LoadState::Error(LOAD_FAILED_MESSAGE.to_string()));
        assert!(p.visible().is_empty());
        assert!(!p.load_more());
    }

    #[test]
    fn test_navigation_resets_filters_to_url_brand() {
        let mut p = loaded(10);
        let _ = p.update_filter(|f| f.toggle_brand("Breakout"));
        let ticket = p.set_descriptor(CategoryResolver::new().resolve_url("/men?brand=outfitters"));
        p.complete_load(ticket, Ok(products(10)));

        assert_eq!(p.filter().selected_brands.len(), 1);
        assert!(p.visible().iter().all(|x| x.brand == "Outfitters"));
        assert_eq!(p.available_brands(), ["Breakout", "Outfitters"]);
    }

    #[test]
    fn test_min_discount_leaves_twelve_of_fifty_on_one_page() {
        let catalog: Vec<Product> = (0..50)
            .map(|i| {
                let discount = if i < 12 { 30 + (i % 3) * 10 } else { i % 30 };
                Product::new(format!("p{}", i), "Tee", "Brand").with_price(1000.0, discount as u32)
            })
            .collect();

        let mut p = CatalogPaginator::new(FilterDescriptor::default(), 20);
        let ticket = p.update_filter(|f| f.set_min_discount(MinDiscount::new(30).unwrap()));
        assert_eq!(p.complete_load(ticket, Ok(catalog)), LoadOutcome::Applied { total: 12 });

        assert_eq!(p.visible().len(), 12);
        assert!(!p.has_more());
        assert!(!p.load_more());
        assert!(!p.state().is_loading());
    }
}
