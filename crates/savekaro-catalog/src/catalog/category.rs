//! Category resolution from storefront paths.
//!
//! A navigation path such as `/men/jeans` or `/eastern` is turned into a
//! [`FilterDescriptor`]: an optional gender, the category patterns matched
//! against product category/title text, and the brand carried in the query
//! string.

use crate::catalog::{Gender, Product};
use serde::{Deserialize, Serialize};

/// URL category token → pattern(s) stored by the scraper.
///
/// Multiple patterns are `|`-separated.
const CATEGORY_ALIASES: &[(&str, &str)] = &[
    ("jackets", "jacket"),
    ("hoodies", "hoodie"),
    ("jeans", "jeans"),
    ("pants", "jeans"),
    ("shirts", "shirt"),
    ("sweaters", "sweater"),
    ("dresses", "dress"),
    ("eastern", "kurta|shalwar"),
    ("western", "jacket|hoodie|shirt|jeans|sweater|t-shirt"),
    ("t-shirts", "t-shirt"),
    ("tshirts", "t-shirt"),
    ("suits", "suit"),
    ("kurtas", "kurta"),
];

/// Expand a raw category token through the alias table.
///
/// The token is lower-cased; unknown tokens pass through unchanged.
pub fn expand_category(token: &str) -> Vec<String> {
    let token = token.to_lowercase();
    let mapped = CATEGORY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, target)| *target)
        .unwrap_or(token.as_str());

    mapped
        .split('|')
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Filters derived from the current route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    /// Gender section, if the path starts with `men` or `women`.
    pub gender: Option<Gender>,
    /// Category token as it appeared in the path.
    pub raw_category: Option<String>,
    /// Lower-cased patterns after alias expansion. Empty means "any category".
    pub category_patterns: Vec<String>,
    /// Title-cased brand from the `brand` query parameter.
    pub brand_from_url: Option<String>,
}

impl FilterDescriptor {
    /// Whether the product passes the gender filter.
    pub fn matches_gender(&self, product: &Product) -> bool {
        match self.gender {
            Some(gender) => product.gender_lower() == gender.as_str(),
            None => true,
        }
    }

    /// Whether the product passes the category filter.
    pub fn matches_category(&self, product: &Product) -> bool {
        if self.category_patterns.is_empty() {
            return true;
        }
        let category = product.category_lower();
        let title = product.title.to_lowercase();

        self.category_patterns.iter().any(|pattern| {
            category.contains(pattern.as_str())
                || title.contains(pattern.as_str())
                || category == *pattern
        })
    }

    /// Gender then category.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_gender(product) && self.matches_category(product)
    }

    /// Heading shown above the product grid.
    pub fn page_title(&self) -> String {
        match (self.gender, self.raw_category.as_deref()) {
            (Some(gender), Some(category)) => {
                format!("{} for {}", format_category_name(category), gender.display_name())
            }
            (Some(gender), None) => format!("{}'s Collection", gender.display_name()),
            (None, Some(category)) => format!("{} Collection", format_category_name(category)),
            (None, None) => "All Collection".to_string(),
        }
    }
}

/// Resolves storefront paths into filter descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryResolver;

impl CategoryResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a path with an optional query string (`/men?brand=limelight`).
    pub fn resolve_url(&self, url: &str) -> FilterDescriptor {
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (url, None),
        };
        let brand = query.and_then(|q| query_param(q, "brand"));
        self.resolve(path, brand.as_deref())
    }

    /// Resolve a path and the raw `brand` query value.
    pub fn resolve(&self, path: &str, brand: Option<&str>) -> FilterDescriptor {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.resolve_segments(&segments, brand)
    }

    /// Resolve pre-split path segments. Empty segments are ignored.
    pub fn resolve_segments(&self, segments: &[&str], brand: Option<&str>) -> FilterDescriptor {
        let segments: Vec<&str> = segments.iter().copied().filter(|s| !s.is_empty()).collect();

        let (gender, raw_category) = match segments.as_slice() {
            [] => (None, None),
            [first, rest @ ..] if *first == "men" || *first == "women" => {
                (first.parse::<Gender>().ok(), rest.first().copied())
            }
            ["category", category, ..] => (None, Some(*category)),
            [first, ..] => (None, Some(*first)),
        };

        let category_patterns = raw_category.map(expand_category).unwrap_or_default();

        FilterDescriptor {
            gender,
            raw_category: raw_category.map(str::to_string),
            category_patterns,
            brand_from_url: brand.and_then(normalize_brand),
        }
    }
}

/// Title-case a brand query value: first letter upper, rest lower.
///
/// Returns `None` for a blank value.
pub fn normalize_brand(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let mut chars = raw.chars();
    let first = chars.next()?;
    let mut name: String = first.to_uppercase().collect();
    name.push_str(&chars.as_str().to_lowercase());
    Some(name)
}

/// "t-shirts" → "T Shirts".
pub fn format_category_name(token: &str) -> String {
    token
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Look up a query parameter, percent-decoding the value.
fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| {
            let v = v.replace('+', " ");
            urlencoding::decode(&v)
                .map(|decoded| decoded.into_owned())
                .unwrap_or(v)
        })
}
