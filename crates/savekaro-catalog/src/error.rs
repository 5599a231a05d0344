//! Catalog error types.

use thiserror::Error;

/// Errors raised while building catalog filters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Unknown sort key.
    #[error("Unknown sort key: {0}")]
    InvalidSortKey(String),

    /// Minimum discount outside the offered thresholds.
    #[error("Unsupported minimum discount: {0}% (expected 0, 20, 30, 40 or 50)")]
    InvalidDiscount(u32),

    /// Price bound that is not a number.
    #[error("Invalid price bound: {0}")]
    InvalidPrice(String),

    /// Lower price bound above the upper one.
    #[error("Invalid price range: min {min} is greater than max {max}")]
    InvalidPriceRange { min: f64, max: f64 },

    /// Unknown gender token.
    #[error("Unknown gender: {0}")]
    InvalidGender(String),
}
