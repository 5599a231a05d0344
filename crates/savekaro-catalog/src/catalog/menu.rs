//! Navigation menu built from the backend's per-gender category listing.
//!
//! The raw listing is noisy (scraper categories such as "shalwar kameez",
//! "T-Shirts ", "kids - boys"). Menu overrides collapse, rename and order
//! those entries into the short lists shown under "Men" and "Women".

use crate::catalog::Gender;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Categories grouped by normalized gender, as returned by
/// `GET /api/products/categories/by-gender`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoriesByGender {
    #[serde(default)]
    pub men: Vec<String>,
    #[serde(default)]
    pub women: Vec<String>,
    #[serde(default)]
    pub kids: Vec<String>,
    #[serde(default)]
    pub other: Vec<String>,
}

impl CategoriesByGender {
    pub fn is_empty(&self) -> bool {
        self.men.is_empty() && self.women.is_empty() && self.kids.is_empty()
    }

    /// Organize a flat `"<gender> - <category>"` listing.
    ///
    /// Entries without a recognized gender prefix land in `other`.
    pub fn from_flat(categories: &[String]) -> Self {
        let mut grouped = Self::default();
        for entry in categories {
            let (prefix, category) = match entry.split_once(" - ") {
                Some((prefix, category)) => (prefix.to_lowercase(), category.to_string()),
                None => (entry.to_lowercase(), entry.clone()),
            };
            match prefix.as_str() {
                "men" => grouped.men.push(category),
                "women" => grouped.women.push(category),
                "kids" => grouped.kids.push(category),
                _ => grouped.other.push(category),
            }
        }
        grouped
    }

    /// Men and women lists with kids categories folded in.
    ///
    /// Boys/junior/youth entries go to men, girls entries to women, and
    /// anything else to both.
    pub fn merged(&self) -> (Vec<String>, Vec<String>) {
        let mut boys = Vec::new();
        let mut girls = Vec::new();
        let mut unknown = Vec::new();

        for entry in &self.kids {
            let lower = entry.to_lowercase();
            let words: Vec<&str> = lower
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
                .collect();
            if words.iter().any(|w| matches!(*w, "boy" | "boys" | "junior" | "youth")) {
                boys.push(entry.clone());
            } else if words.iter().any(|w| matches!(*w, "girl" | "girls")) {
                girls.push(entry.clone());
            } else {
                unknown.push(entry.clone());
            }
        }

        let men = uniq(self.men.iter().chain(&boys).chain(&unknown).cloned());
        let women = uniq(self.women.iter().chain(&girls).chain(&unknown).cloned());
        (men, women)
    }
}

/// A labeled bucket that absorbs every entry containing one of its needles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuGroup {
    pub label: String,
    pub includes: Vec<String>,
}

impl MenuGroup {
    pub fn new(label: impl Into<String>, includes: &[&str]) -> Self {
        Self {
            label: label.into(),
            includes: includes.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Per-gender menu adjustments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuOverrides {
    /// When non-empty, replaces the listing entirely.
    #[serde(default)]
    pub custom: Vec<String>,
    /// Entries listed first, in this order; the rest follow alphabetically.
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Case-insensitive renames.
    #[serde(default)]
    pub rename: HashMap<String, String>,
    /// Entries pinned to the end, in this order.
    #[serde(default)]
    pub last: Vec<String>,
    #[serde(default)]
    pub groups: Vec<MenuGroup>,
}

impl MenuOverrides {
    /// The storefront defaults for a gender section.
    pub fn storefront(gender: Gender) -> Self {
        let mut rename: HashMap<String, String> = [
            ("hoodie", "Hoodies"),
            ("hoodies", "Hoodies"),
            ("sweater", "Sweaters"),
            ("sweaters", "Sweaters"),
            ("jacket", "Jackets"),
            ("jackets", "Jackets"),
            ("jeans", "Jeans"),
            ("t-shirts", "Shirts"),
            ("tshirt", "Shirts"),
            ("tshirts", "Shirts"),
            ("t shirt", "Shirts"),
            ("other", "Others"),
            ("others", "Others"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let mut eastern = vec![
            "shalwar",
            "shalwar kameez",
            "shalwar qameez",
            "kurta",
            "kameez",
            "suit",
            "suits",
        ];
        if gender == Gender::Women {
            eastern = ["dress", "dresses"].into_iter().chain(eastern).collect();
        } else {
            rename.insert("t-shirts ".to_string(), "Shirts".to_string());
        }

        Self {
            custom: Vec::new(),
            order: vec!["Eastern".to_string()],
            exclude: Vec::new(),
            rename,
            last: vec!["Others".to_string()],
            groups: vec![
                MenuGroup::new("Eastern", &eastern),
                MenuGroup::new(
                    "Shirts",
                    &["shirt", "shirts", "tshirt", "t-shirts", "t shirt", "tee", "tees"],
                ),
            ],
        }
    }

    /// Apply groups, exclude, rename, order and last, in that order.
    pub fn apply(&self, items: &[String]) -> Vec<String> {
        if !self.custom.is_empty() {
            return uniq(self.custom.iter().map(|s| s.trim().to_string()));
        }

        let mut entries: Vec<String> = items.iter().map(|s| s.trim().to_string()).collect();

        if !self.groups.is_empty() {
            let lowered: Vec<String> = entries.iter().map(|s| s.to_lowercase()).collect();
            let mut absorbed = HashSet::new();
            let mut labels = Vec::new();

            for group in &self.groups {
                let label = group.label.trim().to_string();
                if label.is_empty() {
                    continue;
                }
                let needles: Vec<String> = group.includes.iter().map(|s| s.trim().to_lowercase()).collect();
                let mut matched = false;
                for (idx, entry) in lowered.iter().enumerate() {
                    if needles.iter().any(|needle| entry.contains(needle.as_str())) {
                        matched = true;
                        absorbed.insert(idx);
                    }
                }
                if matched && !labels.contains(&label) {
                    labels.push(label);
                }
            }

            if !absorbed.is_empty() || !labels.is_empty() {
                let kept = entries
                    .into_iter()
                    .enumerate()
                    .filter(|(idx, _)| !absorbed.contains(idx))
                    .map(|(_, entry)| entry);
                entries = uniq(kept.chain(labels));
            }
        }

        if !self.exclude.is_empty() {
            let excluded: HashSet<String> = self.exclude.iter().map(|s| s.trim().to_lowercase()).collect();
            entries.retain(|entry| !excluded.contains(&entry.to_lowercase()));
        }

        if !self.rename.is_empty() {
            let renames: HashMap<String, String> = self
                .rename
                .iter()
                .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
                .collect();
            entries = uniq(entries.into_iter().map(|entry| {
                renames.get(&entry.to_lowercase()).cloned().unwrap_or(entry)
            }));
        }

        if !self.order.is_empty() {
            let positions: HashMap<String, usize> = self
                .order
                .iter()
                .enumerate()
                .map(|(i, name)| (name.trim().to_lowercase(), i))
                .collect();
            entries.sort_by(|a, b| {
                let ai = positions.get(&a.to_lowercase());
                let bi = positions.get(&b.to_lowercase());
                match (ai, bi) {
                    (Some(ai), Some(bi)) => ai.cmp(bi),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => a.cmp(b),
                }
            });
        }

        if !self.last.is_empty() {
            let pinned: Vec<String> = self.last.iter().map(|s| s.trim().to_lowercase()).collect();
            let (mut tail, head): (Vec<String>, Vec<String>) = entries
                .into_iter()
                .partition(|entry| pinned.contains(&entry.to_lowercase()));
            tail.sort_by_key(|entry| {
                let lower = entry.to_lowercase();
                pinned.iter().position(|p| *p == lower)
            });
            entries = head.into_iter().chain(tail).collect();
        }

        entries
    }
}

/// One link in a gender dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub label: String,
    pub path: String,
}

impl MenuEntry {
    fn new(gender: Gender, label: String) -> Self {
        let slug = label
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        Self {
            path: format!("/{}/{}", gender.as_str(), slug),
            label,
        }
    }
}

/// Dropdown contents for both gender sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryMenu {
    pub men: Vec<MenuEntry>,
    pub women: Vec<MenuEntry>,
}

impl CategoryMenu {
    /// Build the menu with the storefront overrides.
    pub fn build(listing: &CategoriesByGender) -> Self {
        Self::build_with(
            listing,
            &MenuOverrides::storefront(Gender::Men),
            &MenuOverrides::storefront(Gender::Women),
        )
    }

    pub fn build_with(listing: &CategoriesByGender, men: &MenuOverrides, women: &MenuOverrides) -> Self {
        let (men_items, women_items) = listing.merged();
        Self {
            men: men
                .apply(&men_items)
                .into_iter()
                .map(|label| MenuEntry::new(Gender::Men, label))
                .collect(),
            women: women
                .apply(&women_items)
                .into_iter()
                .map(|label| MenuEntry::new(Gender::Women, label))
                .collect(),
        }
    }

    pub fn entries(&self, gender: Gender) -> &[MenuEntry] {
        match gender {
            Gender::Men => &self.men,
            Gender::Women => &self.women,
        }
    }
}

/// Deduplicate preserving first occurrence, dropping empty strings.
fn uniq(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_groups_collapse_into_label() {
        let overrides = MenuOverrides::storefront(Gender::Men);
        let menu = overrides.apply(&strings(&["kurta", "shalwar kameez", "jeans", "hoodie", "t-shirts"]));
        assert_eq!(menu, strings(&["Eastern", "Hoodies", "Jeans", "Shirts"]));
    }

    #[test]
    fn test_others_pinned_last() {
        let overrides = MenuOverrides::storefront(Gender::Women);
        let menu = overrides.apply(&strings(&["other", "jacket", "dresses", "sweaters"]));
        assert_eq!(menu, strings(&["Eastern", "Jackets", "Sweaters", "Others"]));
    }

    #[test]
    fn test_exclude_is_case_insensitive() {
        let overrides = MenuOverrides {
            exclude: strings(&["SHOES"]),
            ..Default::default()
        };
        assert_eq!(overrides.apply(&strings(&["shoes", "jeans"])), strings(&["jeans"]));
    }

    #[test]
    fn test_custom_replaces_listing() {
        let overrides = MenuOverrides {
            custom: strings(&["Shirts", " Jeans ", "Shirts"]),
            ..Default::default()
        };
        assert_eq!(overrides.apply(&strings(&["anything"])), strings(&["Shirts", "Jeans"]));
    }

    #[test]
    fn test_kids_partition() {
        let listing = CategoriesByGender {
            men: strings(&["jeans"]),
            women: strings(&["dress"]),
            kids: strings(&["Boys Shirts", "girls frocks", "Baby Sets"]),
            other: Vec::new(),
        };
        let (men, women) = listing.merged();
        assert_eq!(men, strings(&["jeans", "Boys Shirts", "Baby Sets"]));
        assert_eq!(women, strings(&["dress", "girls frocks", "Baby Sets"]));
    }

    #[test]
    fn test_from_flat() {
        let listing = CategoriesByGender::from_flat(&strings(&["Men - Jeans", "Women - Kurta", "Belts"]));
        assert_eq!(listing.men, strings(&["Jeans"]));
        assert_eq!(listing.women, strings(&["Kurta"]));
        assert_eq!(listing.other, strings(&["Belts"]));
    }

    #[test]
    fn test_menu_links() {
        let listing = CategoriesByGender {
            men: strings(&["jeans", "kurta", "polo shirts tall"]),
            ..Default::default()
        };
        let menu = CategoryMenu::build(&listing);
        let paths: Vec<&str> = menu.men.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/men/eastern", "/men/jeans", "/men/shirts"]);
    }
}
