//! Catalog listing, pagination and search for the SaveKaro storefront.
//!
//! - [`CatalogPaginator`]: the listing state machine (pure)
//! - [`CatalogBrowser`]: drives a paginator from a product source
//! - [`SearchBox`]: debounced header search
//! - [`load_product_detail`]: product page with related items
//!
//! # Example
//!
//! ```rust,ignore
//! use savekaro_browse::{CatalogBrowser, CatalogConfig};
//!
//! let browser = CatalogBrowser::new(Arc::new(products_api), CatalogConfig::default());
//! browser.open("/women/eastern").await;
//! browser.update_filter(|f| f.toggle_brand("Khaadi")).await;
//! while browser.load_more().await {}
//! ```

pub mod config;
mod debounce;
mod detail;
mod error;
mod paginator;
mod browser;
mod search;

pub use browser::{CatalogBrowser, ListingView};
pub use config::{CatalogConfig, SearchConfig, DEFAULT_DEBOUNCE_MS};
pub use debounce::Debouncer;
pub use detail::{load_product_detail, ProductDetail};
pub use error::{BrowseError, LOAD_FAILED_MESSAGE};
pub use paginator::{CatalogPaginator, LoadOutcome, LoadState, LoadTicket};
pub use search::{SearchBox, SearchState};
