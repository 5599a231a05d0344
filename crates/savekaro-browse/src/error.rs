//! Browse errors.

use savekaro_catalog::ProductId;
use savekaro_data::FetchError;
use thiserror::Error;

/// Message shown when a listing cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products. Please try again later.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrowseError {
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
