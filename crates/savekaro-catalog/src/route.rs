//! Client-visible storefront routes.

use crate::catalog::{CategoryResolver, FilterDescriptor};
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Top-level category shortcuts reachable without a gender prefix.
pub const CATEGORY_SHORTCUTS: &[&str] = &[
    "jeans", "pants", "jackets", "hoodies", "shirts", "sweaters", "eastern", "western",
];

/// A storefront view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Home,
    Deals,
    Login,
    ForgotPassword,
    ResetPassword,
    VerifyEmail,
    MyAccount,
    Favorites,
    Product(ProductId),
    /// A catalog listing; holds the normalized path (`/men/jeans`).
    Category(String),
}

impl Route {
    /// Match a path (query string ignored). Unknown paths yield `None`.
    pub fn parse(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["deals"] => Route::Deals,
            ["login"] => Route::Login,
            ["forgot-password"] => Route::ForgotPassword,
            ["reset-password"] => Route::ResetPassword,
            ["verify-email"] => Route::VerifyEmail,
            ["my-account"] => Route::MyAccount,
            ["favorites"] => Route::Favorites,
            ["product", id] => Route::Product(ProductId::new(*id)),
            [gender] | [gender, _] if *gender == "men" || *gender == "women" => {
                Route::Category(format!("/{}", segments.join("/")))
            }
            ["category", _] => Route::Category(format!("/{}", segments.join("/"))),
            [shortcut] if CATEGORY_SHORTCUTS.contains(shortcut) => {
                Route::Category(format!("/{}", shortcut))
            }
            _ => return None,
        };
        Some(route)
    }

    /// Catalog filters for listing routes.
    pub fn filter_descriptor(&self, resolver: &CategoryResolver, brand: Option<&str>) -> Option<FilterDescriptor> {
        match self {
            Route::Category(path) => Some(resolver.resolve(path, brand)),
            _ => None,
        }
    }

    /// Whether the view needs a signed-in user.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::MyAccount)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Deals => "/deals".to_string(),
            Route::Login => "/login".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::ResetPassword => "/reset-password".to_string(),
            Route::VerifyEmail => "/verify-email".to_string(),
            Route::MyAccount => "/my-account".to_string(),
            Route::Favorites => "/favorites".to_string(),
            Route::Product(id) => format!("/product/{}", id),
            Route::Category(path) => path.clone(),
        }
    }
}
