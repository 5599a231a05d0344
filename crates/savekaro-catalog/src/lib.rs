//! Catalog domain types and logic for the SaveKaro storefront.
//!
//! This crate is pure: it performs no I/O. It provides:
//!
//! - **Catalog**: products, variants, category resolution from storefront
//!   paths, the category navigation menu, related products
//! - **Search**: sidebar filters, the filter/sort pipeline, pagination
//! - **Route**: the client-visible route table
//!
//! # Example
//!
//! ```rust,ignore
//! use savekaro_catalog::prelude::*;
//!
//! let descriptor = CategoryResolver::new().resolve_url("/men/jeans?brand=outfitters");
//! let state = FilterState::for_descriptor(&descriptor).with_sort(SortKey::PriceAsc);
//!
//! let result = apply_filters(all_products, &descriptor, &state);
//! let first_page = Pagination::first(DEFAULT_PAGE_SIZE, result.len());
//! let visible = &result.products[first_page.visible_range()];
//! ```

pub mod error;
pub mod ids;

pub mod catalog;
pub mod route;
pub mod search;

pub use error::CatalogError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{
        CategoriesByGender, CategoryMenu, CategoryResolver, FilterDescriptor, Gender, MenuEntry,
        Product, ProductVariant,
    };

    // Routes
    pub use crate::route::Route;

    // Search
    pub use crate::search::{
        apply_filters, FilterState, FilteredCatalog, MinDiscount, Pagination, PriceRange, SortKey,
        DEFAULT_PAGE_SIZE,
    };
}
