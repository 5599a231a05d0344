//! Product and variant types.

use crate::error::CatalogError;
use crate::ids::ProductId;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shopper-facing gender section of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "men",
            Gender::Women => "women",
        }
    }

    /// Title used for collection pages ("Men's Collection").
    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Men => "Men",
            Gender::Women => "Women",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "men" => Ok(Gender::Men),
            "women" => Ok(Gender::Women),
            other => Err(CatalogError::InvalidGender(other.to_string())),
        }
    }
}

/// A size variant of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductVariant {
    /// Size label (e.g., "M", "32").
    #[serde(default)]
    pub size: Option<String>,
    /// Whether this size can be ordered at the source store.
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_stock: bool,
    /// Variant price when it differs from the product price.
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub sku: Option<String>,
    /// Units reported by the source store.
    #[serde(default, deserialize_with = "null_as_default")]
    pub inventory_quantity: i64,
}

/// A deal listing scraped from a partner store.
///
/// Owned by the backend; this crate only reads it. Every field except the id
/// tolerates absence on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand: String,
    /// Free-text category assigned by the scraper.
    #[serde(default)]
    pub category: Option<String>,
    /// Free-text gender ("men", "women", "kids", ...).
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discount_percent: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Product page on the source store.
    #[serde(default)]
    pub url: Option<String>,
    /// Source store domain.
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default = "default_currency", deserialize_with = "null_as_currency")]
    pub currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<ProductVariant>,
}

fn default_currency() -> String {
    "PKR".to_string()
}

/// Read an explicit `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn null_as_currency<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|c| c.unwrap_or_else(default_currency))
}

impl Product {
    /// Create a product with the given id, title and brand; everything else defaults.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            brand: brand.into(),
            category: None,
            gender: None,
            price: 0.0,
            original_price: None,
            discount_percent: 0,
            image_url: None,
            url: None,
            source: String::new(),
            currency: default_currency(),
            tags: Vec::new(),
            variants: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Set price and discount together.
    pub fn with_price(mut self, price: f64, discount_percent: u32) -> Self {
        self.price = price;
        self.discount_percent = discount_percent;
        self
    }

    pub fn with_original_price(mut self, original_price: f64) -> Self {
        self.original_price = Some(original_price);
        self
    }

    pub fn with_variant(mut self, variant: ProductVariant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Lower-cased gender, empty when unspecified.
    pub fn gender_lower(&self) -> String {
        self.gender.as_deref().unwrap_or_default().to_lowercase()
    }

    /// Lower-cased category, empty when unspecified.
    pub fn category_lower(&self) -> String {
        self.category.as_deref().unwrap_or_default().to_lowercase()
    }

    /// Whether the original price is shown struck through.
    pub fn is_discounted(&self) -> bool {
        self.original_price.is_some_and(|orig| orig > self.price)
    }

    /// Amount saved against the original price.
    pub fn savings(&self) -> Option<f64> {
        self.original_price
            .filter(|orig| *orig > self.price)
            .map(|orig| orig - self.price)
    }

    /// A product without variant data is treated as available.
    pub fn in_stock(&self) -> bool {
        self.variants.is_empty() || self.variants.iter().any(|v| v.in_stock)
    }

    /// Sizes that are currently in stock, in listing order.
    pub fn available_sizes(&self) -> Vec<&str> {
        self.variants
            .iter()
            .filter(|v| v.in_stock)
            .filter_map(|v| v.size.as_deref())
            .collect()
    }

    /// Price formatted the way listings show it, e.g. `Rs.1,999`.
    pub fn display_price(&self) -> String {
        format_rupees(self.price)
    }
}

/// Format an amount with thousands separators, dropping a zero fraction.
pub fn format_rupees(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let whole = rounded.trunc() as i64;
    let frac = ((rounded - whole as f64).abs() * 100.0).round() as i64;

    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if whole < 0 { "-" } else { "" };
    if frac == 0 {
        format!("Rs.{}{}", sign, grouped)
    } else {
        format!("Rs.{}{}.{:02}", sign, grouped, frac)
    }
}
