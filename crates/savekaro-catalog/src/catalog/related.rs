//! "You may also like" selection for the product detail page.

use crate::catalog::Product;

/// How many related products the detail page shows.
pub const RELATED_LIMIT: usize = 8;

/// Pick up to `limit` products related to `current` from `candidates`.
///
/// Preference order: same category and brand, same category, same brand,
/// then anything else. Candidate order is preserved within each tier and
/// `current` itself is never returned.
pub fn related_products<'a>(current: &Product, candidates: &'a [Product], limit: usize) -> Vec<&'a Product> {
    let pool: Vec<&Product> = candidates.iter().filter(|p| p.id != current.id).collect();
    let category = current.category.as_deref();
    let brand = (!current.brand.is_empty()).then_some(current.brand.as_str());

    let same_category = |p: &Product| category.is_some() && p.category.as_deref() == category;
    let same_brand = |p: &Product| brand.is_some() && Some(p.brand.as_str()) == brand;

    let mut picked: Vec<&Product> = Vec::with_capacity(limit);
    for tier in 0..4 {
        for &candidate in &pool {
            if picked.len() >= limit {
                return picked;
            }
            let matches = match tier {
                0 => same_category(candidate) && same_brand(candidate),
                1 => same_category(candidate),
                2 => same_brand(candidate),
                _ => true,
            };
            if matches && !picked.iter().any(|p| p.id == candidate.id) {
                picked.push(candidate);
            }
        }
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str, brand: &str) -> Product {
        Product::new(id, format!("Item {}", id), brand).with_category(category)
    }

    #[test]
    fn test_related_prefers_category_and_brand() {
        let current = product("0", "jeans", "Outfitters");
        let candidates = vec![
            current.clone(),
            product("1", "shirt", "Breakout"),
            product("2", "jeans", "Breakout"),
            product("3", "shirt", "Outfitters"),
            product("4", "jeans", "Outfitters"),
        ];

        let ids: Vec<&str> = related_products(&current, &candidates, 8)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["4", "2", "3", "1"]);
    }

    #[test]
    fn test_related_respects_limit() {
        let current = product("0", "jeans", "A");
        let candidates: Vec<Product> = (1..20).map(|i| product(&i.to_string(), "jeans", "A")).collect();
        assert_eq!(related_products(&current, &candidates, RELATED_LIMIT).len(), RELATED_LIMIT);
    }
}
