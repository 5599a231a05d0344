//! Product catalog module.
//!
//! Contains product types, category resolution, the navigation menu and
//! related-product selection.

mod category;
mod menu;
mod product;
mod related;

pub use category::{
    expand_category, format_category_name, normalize_brand, CategoryResolver, FilterDescriptor,
};
pub use menu::{CategoriesByGender, CategoryMenu, MenuEntry, MenuGroup, MenuOverrides};
pub use product::{format_rupees, Gender, Product, ProductVariant};
pub use related::{related_products, RELATED_LIMIT};
