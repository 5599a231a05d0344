//! Favorited products.
//!
//! Signed-in shoppers keep favorites on the backend. The local `favorites`
//! list holds product ids for guests and catches toggles the backend
//! rejected.

use crate::{AuthError, AuthSession};
use savekaro_catalog::catalog::Product;
use savekaro_catalog::ProductId;
use savekaro_data::AuthApi;
use savekaro_store::{keys, ClientStorage, StoreExt};
use tracing::warn;

/// Where a toggle was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persisted {
    Remote,
    /// The backend call failed; only the local list changed.
    Local,
}

/// Outcome of [`Favorites::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggled {
    /// Favorite state after the toggle.
    pub is_favorite: bool,
    pub persisted: Persisted,
}

#[derive(Debug, Clone)]
pub struct Favorites {
    api: AuthApi,
}

impl Favorites {
    pub fn new(api: AuthApi) -> Self {
        Self { api }
    }

    /// Favorited products of the signed-in shopper.
    pub async fn products(&self, session: &AuthSession) -> Result<Vec<Product>, AuthError> {
        let token = session.require_token()?;
        Ok(self.api.favorites(token).await?)
    }

    /// Whether `id` is a favorite.
    ///
    /// Signed-in: asks the backend and reports `false` if that fails.
    /// Guest: reads the local list.
    pub async fn contains(&self, session: &AuthSession, id: &ProductId) -> Result<bool, AuthError> {
        match session.token() {
            Some(token) if session.is_authenticated() => match self.api.favorites(token).await {
                Ok(products) => Ok(products.iter().any(|p| &p.id == id)),
                Err(e) => {
                    warn!(error = %e, "Failed to fetch favorites");
                    Ok(false)
                }
            },
            _ => Ok(local_favorites(session.storage())?.contains(id)),
        }
    }

    /// Flip the favorite state of `id`, given its current state.
    ///
    /// Guests get [`AuthError::LoginRequired`]. A failed backend call falls
    /// back to toggling the local list.
    pub async fn toggle(&self, session: &AuthSession, id: &ProductId, is_favorite: bool) -> Result<Toggled, AuthError> {
        let token = session.require_token()?;
        let result = if is_favorite {
            self.api.remove_favorite(token, id).await
        } else {
            self.api.add_favorite(token, id).await
        };

        match result {
            Ok(()) => Ok(Toggled {
                is_favorite: !is_favorite,
                persisted: Persisted::Remote,
            }),
            Err(e) => {
                warn!(error = %e, product = %id, "Favorite toggle failed, using local list");
                let mut local = local_favorites(session.storage())?;
                if is_favorite {
                    local.retain(|fav| fav != id);
                } else if !local.contains(id) {
                    local.push(id.clone());
                }
                session.storage().local().set_json(keys::FAVORITES, &local)?;
                Ok(Toggled {
                    is_favorite: !is_favorite,
                    persisted: Persisted::Local,
                })
            }
        }
    }

    /// Remove from the backend list, with no local fallback.
    pub async fn remove(&self, session: &AuthSession, id: &ProductId) -> Result<(), AuthError> {
        let token = session.require_token()?;
        Ok(self.api.remove_favorite(token, id).await?)
    }
}

/// The local favorites list. Missing or unreadable reads as empty.
pub fn local_favorites(storage: &ClientStorage) -> Result<Vec<ProductId>, AuthError> {
    match storage.local().get_json::<Vec<ProductId>>(keys::FAVORITES) {
        Ok(list) => Ok(list.unwrap_or_default()),
        Err(savekaro_store::StoreError::SerializeError(e)) => {
            warn!(error = %e, "Local favorites unreadable, treating as empty");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use savekaro_data::testing::{product_json, MockTransport};
    use savekaro_data::{ApiClient, FetchError, Method, Response, User};
    use serde_json::json;
    use std::sync::Arc;

    fn signed_in() -> AuthSession {
        let mut session = AuthSession::guest(ClientStorage::in_memory());
        let user: User = serde_json::from_value(json!({"id": "u1", "email": "a@b.pk"})).unwrap();
        session.login(user, "jwt").unwrap();
        session
    }

    fn favorites(mock: &Arc<MockTransport>) -> Favorites {
        Favorites::new(AuthApi::new(ApiClient::new("http://h", mock.clone())))
    }

    #[tokio::test]
    async fn test_guest_toggle_requires_login() {
        let mock = MockTransport::new(|_| Ok(Response::json_value(200, &json!({}))));
        let session = AuthSession::guest(ClientStorage::in_memory());
        let err = favorites(&mock)
            .toggle(&session, &ProductId::new("p1"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::LoginRequired));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_toggle_uses_api() {
        let mock = MockTransport::new(|_| Ok(Response::json_value(200, &json!({"message": "Added to favorites"}))));
        let session = signed_in();
        let toggled = favorites(&mock)
            .toggle(&session, &ProductId::new("p1"), false)
            .await
            .unwrap();
        assert_eq!(
            toggled,
            Toggled {
                is_favorite: true,
                persisted: Persisted::Remote
            }
        );
        assert_eq!(mock.requests()[0].path(), "/api/auth/favorites/add");
        assert!(local_favorites(session.storage()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_falls_back_to_local_list() {
        let mock = MockTransport::new(|_| Err(FetchError::Connection("refused".to_string())));
        let session = signed_in();
        let favs = favorites(&mock);
        let id = ProductId::new("p9");

        let added = favs.toggle(&session, &id, false).await.unwrap();
        assert_eq!(added.persisted, Persisted::Local);
        assert_eq!(local_favorites(session.storage()).unwrap(), vec![id.clone()]);

        let removed = favs.toggle(&session, &id, true).await.unwrap();
        assert!(!removed.is_favorite);
        assert!(local_favorites(session.storage()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_contains() {
        let mock = MockTransport::new(|req| match (req.method, req.path()) {
            (Method::Get, "/api/auth/favorites") => {
                Ok(Response::json_value(200, &json!({"favorites": product_json(0, 2)})))
            }
            _ => Ok(Response::json_value(404, &json!({}))),
        });
        let favs = favorites(&mock);

        let session = signed_in();
        assert!(favs.contains(&session, &ProductId::new("p1")).await.unwrap());
        assert!(!favs.contains(&session, &ProductId::new("p5")).await.unwrap());

        let guest = AuthSession::guest(ClientStorage::in_memory());
        guest.storage().local().set_json(keys::FAVORITES, &["p5"]).unwrap();
        assert!(favs.contains(&guest, &ProductId::new("p5")).await.unwrap());
    }

    #[test]
    fn test_unreadable_local_list_is_empty() {
        let storage = ClientStorage::in_memory();
        storage.local().set(keys::FAVORITES, "nope").unwrap();
        assert!(local_favorites(&storage).unwrap().is_empty());
    }
}
