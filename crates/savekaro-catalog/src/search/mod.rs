//! Listing module.
//!
//! Contains the sidebar filter state, the in-memory filter/sort pipeline and
//! pagination.

mod filter;
mod results;

pub use filter::{
    apply_filters, brand_options, FilterState, FilteredCatalog, MinDiscount, PriceRange, SortKey,
    DISCOUNT_THRESHOLDS,
};
pub use results::{Pagination, DEFAULT_PAGE_SIZE};
