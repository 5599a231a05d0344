//! User-selected listing filters.

use crate::catalog::{FilterDescriptor, Product};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Sort order for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Highest discount first.
    #[default]
    DiscountDesc,
    /// Price, low to high.
    PriceAsc,
    /// Price, high to low.
    PriceDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DiscountDesc => "discount-desc",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::DiscountDesc => "Highest Discount",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
        }
    }

    /// Stable in-place sort; equal keys keep their relative order.
    pub fn sort(&self, products: &mut [Product]) {
        match self {
            SortKey::DiscountDesc => products.sort_by(|a, b| b.discount_percent.cmp(&a.discount_percent)),
            SortKey::PriceAsc => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortKey::PriceDesc => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    /// Accepts both the kebab-case names and the storefront's select values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discount-desc" | "discount_percent" => Ok(SortKey::DiscountDesc),
            "price-asc" | "price_low" => Ok(SortKey::PriceAsc),
            "price-desc" | "price_high" => Ok(SortKey::PriceDesc),
            other => Err(CatalogError::InvalidSortKey(other.to_string())),
        }
    }
}

/// Minimum discount thresholds offered in the sidebar.
pub const DISCOUNT_THRESHOLDS: [u32; 5] = [0, 20, 30, 40, 50];

/// Minimum discount percentage; 0 means "All".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub struct MinDiscount(u32);

impl MinDiscount {
    pub const ANY: MinDiscount = MinDiscount(0);

    pub fn new(percent: u32) -> Result<Self, CatalogError> {
        if DISCOUNT_THRESHOLDS.contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(CatalogError::InvalidDiscount(percent))
        }
    }

    pub fn percent(&self) -> u32 {
        self.0
    }

    pub fn label(&self) -> String {
        if self.0 == 0 {
            "All".to_string()
        } else {
            format!("{}% & above", self.0)
        }
    }
}

impl TryFrom<u32> for MinDiscount {
    type Error = CatalogError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MinDiscount> for u32 {
    fn from(value: MinDiscount) -> Self {
        value.0
    }
}

/// Inclusive price bounds; either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Result<Self, CatalogError> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(CatalogError::InvalidPriceRange { min, max });
            }
        }
        Ok(Self { min, max })
    }

    /// Parse the sidebar's free-text inputs; blank means unbounded.
    pub fn parse(min: &str, max: &str) -> Result<Self, CatalogError> {
        Self::new(parse_bound(min)?, parse_bound(max)?)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

fn parse_bound(raw: &str) -> Result<Option<f64>, CatalogError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| CatalogError::InvalidPrice(raw.to_string()))
}

/// Filters chosen in the listing sidebar.
///
/// Created fresh per route and discarded on navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilterState {
    pub selected_brands: BTreeSet<String>,
    pub price_range: PriceRange,
    pub min_discount: MinDiscount,
    pub sort: SortKey,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state for a route: the URL brand, if any, is the only selection.
    pub fn for_descriptor(descriptor: &FilterDescriptor) -> Self {
        let mut state = Self::default();
        state.sync_brand_from_url(descriptor);
        state
    }

    /// Replace the brand selection with the descriptor's URL brand.
    ///
    /// Runs on every path/query change and overrides manual selection.
    pub fn sync_brand_from_url(&mut self, descriptor: &FilterDescriptor) {
        self.selected_brands = descriptor.brand_from_url.iter().cloned().collect();
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_min_discount(mut self, min_discount: MinDiscount) -> Self {
        self.min_discount = min_discount;
        self
    }

    pub fn with_price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = price_range;
        self
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_brands = brands.into_iter().map(Into::into).collect();
        self
    }

    /// Add the brand if absent, remove it otherwise.
    pub fn toggle_brand(&mut self, brand: &str) {
        if !self.selected_brands.remove(brand) {
            self.selected_brands.insert(brand.to_string());
        }
    }

    pub fn set_brands<I, S>(&mut self, brands: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_brands = brands.into_iter().map(Into::into).collect();
    }

    pub fn set_price_range(&mut self, price_range: PriceRange) {
        self.price_range = price_range;
    }

    pub fn set_min_discount(&mut self, min_discount: MinDiscount) {
        self.min_discount = min_discount;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Reset every filter, including the sort order.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches_brand(&self, product: &Product) -> bool {
        self.selected_brands.is_empty() || self.selected_brands.contains(&product.brand)
    }

    pub fn matches_price(&self, product: &Product) -> bool {
        self.price_range.min.map_or(true, |min| product.price >= min)
            && self.price_range.max.map_or(true, |max| product.price <= max)
    }

    pub fn matches_discount(&self, product: &Product) -> bool {
        product.discount_percent >= self.min_discount.percent()
    }
}

/// Outcome of running the listing pipeline over a complete product set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredCatalog {
    /// Filtered and sorted products.
    pub products: Vec<Product>,
    /// Sorted unique brands of the gender/category-filtered set.
    pub available_brands: Vec<String>,
}

impl FilteredCatalog {
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Filter and sort a complete product set.
///
/// Order: gender → category → brand → price-min → price-max → min-discount,
/// then a stable sort. Brand options come from the set after the gender and
/// category steps.
pub fn apply_filters(products: Vec<Product>, descriptor: &FilterDescriptor, state: &FilterState) -> FilteredCatalog {
    let scoped: Vec<Product> = products
        .into_iter()
        .filter(|p| descriptor.matches_gender(p))
        .filter(|p| descriptor.matches_category(p))
        .collect();

    let available_brands = brand_options(&scoped);

    let mut filtered: Vec<Product> = scoped
        .into_iter()
        .filter(|p| state.matches_brand(p))
        .filter(|p| state.matches_price(p))
        .filter(|p| state.matches_discount(p))
        .collect();
    state.sort.sort(&mut filtered);

    FilteredCatalog {
        products: filtered,
        available_brands,
    }
}

/// Unique, non-empty brands in alphabetical order.
pub fn brand_options(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.brand.as_str())
        .filter(|b| !b.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
