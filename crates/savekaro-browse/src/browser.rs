//! Async driver that feeds a [`CatalogPaginator`] from a [`ProductSource`].

use crate::config::CatalogConfig;
use crate::paginator::{CatalogPaginator, LoadOutcome, LoadState, LoadTicket};
use savekaro_catalog::catalog::{CategoryResolver, FilterDescriptor, Product};
use savekaro_catalog::search::FilterState;
use savekaro_data::ProductSource;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Point-in-time copy of a listing, for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    pub title: String,
    pub products: Vec<Product>,
    pub total: usize,
    pub page: usize,
    pub has_more: bool,
    pub available_brands: Vec<String>,
    pub filter: FilterState,
    #[serde(skip)]
    pub state: LoadState,
}

/// A category listing backed by a product source.
///
/// The paginator lock is never held across a fetch, so a filter change
/// made while a load is in flight starts a newer load and the older
/// result is discarded on arrival.
pub struct CatalogBrowser<S: ?Sized> {
    source: Arc<S>,
    resolver: CategoryResolver,
    batch_size: usize,
    paginator: Mutex<CatalogPaginator>,
}

impl<S: ProductSource + ?Sized> CatalogBrowser<S> {
    pub fn new(source: Arc<S>, config: CatalogConfig) -> Self {
        Self {
            source,
            resolver: CategoryResolver::new(),
            batch_size: config.batch_size,
            paginator: Mutex::new(CatalogPaginator::new(FilterDescriptor::default(), config.page_size)),
        }
    }

    /// Navigate to a storefront URL (`/women/eastern?brand=khaadi`) and load it.
    pub async fn open(&self, url: &str) -> LoadOutcome {
        self.open_with(url, |_| {}).await
    }

    /// Navigate and adjust the route's fresh filters before the first load.
    pub async fn open_with(&self, url: &str, update: impl FnOnce(&mut FilterState)) -> LoadOutcome {
        let descriptor = self.resolver.resolve_url(url);
        let ticket = {
            let mut paginator = self.paginator.lock().await;
            let _superseded = paginator.set_descriptor(descriptor);
            paginator.update_filter(update)
        };
        self.run(ticket).await
    }

    /// Load the current route again.
    pub async fn reload(&self) -> LoadOutcome {
        let ticket = self.paginator.lock().await.begin_load();
        self.run(ticket).await
    }

    pub async fn set_filter(&self, filter: FilterState) -> LoadOutcome {
        let ticket = self.paginator.lock().await.set_filter(filter);
        self.run(ticket).await
    }

    pub async fn update_filter(&self, update: impl FnOnce(&mut FilterState)) -> LoadOutcome {
        let ticket = self.paginator.lock().await.update_filter(update);
        self.run(ticket).await
    }

    /// Reveal the next page. Returns whether anything changed.
    pub async fn load_more(&self) -> bool {
        self.paginator.lock().await.load_more()
    }

    pub async fn view(&self) -> ListingView {
        let paginator = self.paginator.lock().await;
        ListingView {
            title: paginator.descriptor().page_title(),
            products: paginator.visible().to_vec(),
            total: paginator.total(),
            page: paginator.page(),
            has_more: paginator.has_more(),
            available_brands: paginator.available_brands().to_vec(),
            filter: paginator.filter().clone(),
            state: paginator.state().clone(),
        }
    }

    async fn run(&self, ticket: LoadTicket) -> LoadOutcome {
        let result = self.source.fetch_all(self.batch_size).await;
        self.paginator.lock().await.complete_load(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use savekaro_catalog::search::SortKey;
    use savekaro_data::FetchError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn product(i: usize, gender: &str, category: &str, brand: &str, discount: u32) -> Product {
        Product::new(format!("p{}", i), format!("{} {}", category, i), brand)
            .with_gender(gender)
            .with_category(category)
            .with_price(500.0 + (i * 10) as f64, discount)
    }

    /// Fixed catalog served in batches.
    struct FixedSource {
        products: Vec<Product>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProductSource for FixedSource {
        async fn fetch_batch(&self, limit: usize, skip: usize) -> Result<Vec<Product>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.products.iter().skip(skip).take(limit).cloned().collect())
        }
    }

    /// First fetch is slow and large; later fetches are fast and small.
    struct RacingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProductSource for RacingSource {
        async fn fetch_batch(&self, _limit: usize, _skip: usize) -> Result<Vec<Product>, FetchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok((0..50).map(|i| product(i, "men", "jeans", "Slow", 10)).collect())
            } else {
                Ok((0..5).map(|i| product(i, "men", "jeans", "Fast", 10)).collect())
            }
        }
    }

    fn mixed_catalog() -> Vec<Product> {
        let mut products = Vec::new();
        for i in 0..130 {
            let (gender, category) = match i % 3 {
                0 => ("men", "jeans"),
                1 => ("women", "kurta"),
                _ => ("men", "hoodie"),
            };
            let brand = if i % 2 == 0 { "Outfitters" } else { "Khaadi" };
            products.push(product(i, gender, category, brand, (i % 6) as u32 * 10));
        }
        products
    }

    #[tokio::test]
    async fn test_open_route_and_page_through() {
        let source = Arc::new(FixedSource {
            products: mixed_catalog(),
            calls: AtomicUsize::new(0),
        });
        let browser = CatalogBrowser::new(source.clone(), CatalogConfig::default());

        let outcome = browser.open("/men/jeans").await;
        assert_eq!(outcome, LoadOutcome::Applied { total: 44 });
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);

        let view = browser.view().await;
        assert_eq!(view.title, "Jeans for Men");
        assert_eq!(view.products.len(), 20);
        assert!(view.has_more);
        assert!(view.products.windows(2).all(|w| w[0].discount_percent >= w[1].discount_percent));

        assert!(browser.load_more().await);
        assert!(browser.load_more().await);
        assert!(!browser.load_more().await);
        assert_eq!(browser.view().await.products.len(), 44);
    }

    #[tokio::test]
    async fn test_open_with_loads_once() {
        let source = Arc::new(FixedSource {
            products: mixed_catalog(),
            calls: AtomicUsize::new(0),
        });
        let browser = CatalogBrowser::new(source.clone(), CatalogConfig::default());

        browser
            .open_with("/men?brand=khaadi", |f| f.toggle_brand("Outfitters"))
            .await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);

        let view = browser.view().await;
        assert_eq!(view.filter.selected_brands.len(), 2);
        assert_eq!(view.total, 87);
    }

    #[tokio::test]
    async fn test_filter_change_refetches() {
        let source = Arc::new(FixedSource {
            products: mixed_catalog(),
            calls: AtomicUsize::new(0),
        });
        let browser = CatalogBrowser::new(source.clone(), CatalogConfig::default());
        browser.open("/eastern").await;

        browser.update_filter(|f| f.sort = SortKey::PriceDesc).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 4);

        let view = browser.view().await;
        assert!(view.products.iter().all(|p| p.category.as_deref() == Some("kurta")));
        assert!(view.products.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_stale_load_never_overwrites_newer_one() {
        let browser = CatalogBrowser::new(
            Arc::new(RacingSource {
                calls: AtomicUsize::new(0),
            }),
            CatalogConfig::default(),
        );

        let (first, second) = tokio::join!(browser.open("/men"), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            browser.update_filter(|f| f.sort = SortKey::PriceAsc).await
        });

        assert_eq!(second, LoadOutcome::Applied { total: 5 });
        assert_eq!(first, LoadOutcome::Discarded);
        let view = browser.view().await;
        assert_eq!(view.total, 5);
        assert!(view.products.iter().all(|p| p.brand == "Fast"));
    }
}
