//! Auth and account endpoints under `/api/auth`.

use crate::{ApiClient, FetchError};
use chrono::NaiveDateTime;
use savekaro_catalog::catalog::Product;
use savekaro_catalog::{ProductId, UserId};
use serde::{Deserialize, Serialize};

/// A registered shopper as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl User {
    /// Name to greet the user with; the email when no name is set.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// Response to register and login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct FavoritesResponse {
    #[serde(default)]
    favorites: Vec<Product>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct Registration<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct TokenBody<'a> {
    token: &'a str,
}

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct ResetBody<'a> {
    token: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
struct FavoriteBody<'a> {
    product_id: &'a str,
}

#[derive(Serialize)]
struct ProfileBody<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct PasswordChangeBody<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// Typed wrappers for `/api/auth`.
///
/// Calls that act on the signed-in user take the bearer token explicitly.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<TokenResponse, FetchError> {
        self.client
            .post("/api/auth/register")
            .json(&Registration { email, password, name })?
            .send_json()
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, FetchError> {
        self.client
            .post("/api/auth/login")
            .json(&Credentials { email, password })?
            .send_json()
            .await
    }

    pub async fn me(&self, token: &str) -> Result<User, FetchError> {
        self.client.get("/api/auth/me").bearer_auth(token).send_json().await
    }

    /// Returns the backend's confirmation message.
    pub async fn verify_email(&self, verification_token: &str) -> Result<String, FetchError> {
        let response: MessageResponse = self
            .client
            .post("/api/auth/verify-email")
            .json(&TokenBody { token: verification_token })?
            .send_json()
            .await?;
        Ok(response.message)
    }

    pub async fn resend_verification(&self, token: &str) -> Result<String, FetchError> {
        let response: MessageResponse = self
            .client
            .post("/api/auth/resend-verification")
            .bearer_auth(token)
            .send_json()
            .await?;
        Ok(response.message)
    }

    pub async fn forgot_password(&self, email: &str) -> Result<String, FetchError> {
        let response: MessageResponse = self
            .client
            .post("/api/auth/forgot-password")
            .json(&EmailBody { email })?
            .send_json()
            .await?;
        Ok(response.message)
    }

    pub async fn reset_password(&self, reset_token: &str, new_password: &str) -> Result<String, FetchError> {
        let response: MessageResponse = self
            .client
            .post("/api/auth/reset-password")
            .json(&ResetBody {
                token: reset_token,
                new_password,
            })?
            .send_json()
            .await?;
        Ok(response.message)
    }

    pub async fn favorites(&self, token: &str) -> Result<Vec<Product>, FetchError> {
        let response: FavoritesResponse = self
            .client
            .get("/api/auth/favorites")
            .bearer_auth(token)
            .send_json()
            .await?;
        Ok(response.favorites)
    }

    pub async fn add_favorite(&self, token: &str, product_id: &ProductId) -> Result<(), FetchError> {
        self.client
            .post("/api/auth/favorites/add")
            .bearer_auth(token)
            .json(&FavoriteBody {
                product_id: product_id.as_str(),
            })?
            .send_ok()
            .await
    }

    pub async fn remove_favorite(&self, token: &str, product_id: &ProductId) -> Result<(), FetchError> {
        self.client
            .post("/api/auth/favorites/remove")
            .bearer_auth(token)
            .json(&FavoriteBody {
                product_id: product_id.as_str(),
            })?
            .send_ok()
            .await
    }

    pub async fn update_profile(&self, token: &str, name: &str, email: &str) -> Result<(), FetchError> {
        self.client
            .put("/api/auth/update-profile")
            .bearer_auth(token)
            .json(&ProfileBody { name, email })?
            .send_ok()
            .await
    }

    pub async fn change_password(
        &self,
        token: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<String, FetchError> {
        let response: MessageResponse = self
            .client
            .put("/api/auth/change-password")
            .bearer_auth(token)
            .json(&PasswordChangeBody {
                current_password,
                new_password,
            })?
            .send_json()
            .await?;
        Ok(response.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{product_json, MockTransport};
    use crate::{Method, Response};
    use serde_json::json;

    fn user_json() -> serde_json::Value {
        json!({
            "id": "u1",
            "email": "ayesha@example.pk",
            "name": "Ayesha",
            "is_verified": false,
            "created_at": "2024-05-01T10:30:00.123456"
        })
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let mock = MockTransport::new(|_| {
            Ok(Response::json_value(
                200,
                &json!({"access_token": "jwt", "token_type": "bearer", "user": user_json()}),
            ))
        });
        let api = AuthApi::new(ApiClient::new("http://h", mock.clone()));

        let token = api.login("ayesha@example.pk", "secret1").await.unwrap();
        assert_eq!(token.access_token, "jwt");
        assert_eq!(token.user.display_name(), "Ayesha");
        assert!(token.user.created_at.is_some());

        let req = &mock.requests()[0];
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path(), "/api/auth/login");
        let body: serde_json::Value = req.json_body().unwrap();
        assert_eq!(body, json!({"email": "ayesha@example.pk", "password": "secret1"}));
    }

    #[tokio::test]
    async fn test_me_sends_bearer_token() {
        let mock = MockTransport::new(|_| Ok(Response::json_value(200, &user_json())));
        let api = AuthApi::new(ApiClient::new("http://h", mock.clone()));
        let user = api.me("jwt").await.unwrap();
        assert_eq!(user.id.as_str(), "u1");
        assert_eq!(mock.requests()[0].header_value("authorization"), Some("Bearer jwt"));
    }

    #[tokio::test]
    async fn test_register_conflict_surfaces_detail() {
        let mock = MockTransport::new(|_| Ok(Response::json_value(400, &json!({"detail": "Email already registered"}))));
        let api = AuthApi::new(ApiClient::new("http://h", mock));
        let err = api.register("a@b.pk", "secret1", "A").await.unwrap_err();
        assert_eq!(err.user_message("Registration failed"), "Email already registered");
    }

    #[tokio::test]
    async fn test_favorites_round_trip() {
        let mock = MockTransport::new(|req| match (req.method, req.path()) {
            (Method::Get, "/api/auth/favorites") => {
                Ok(Response::json_value(200, &json!({"favorites": product_json(0, 3)})))
            }
            (Method::Post, "/api/auth/favorites/add") => Ok(Response::json_value(200, &json!({"message": "ok"}))),
            _ => Ok(Response::json_value(404, &json!({"detail": "nope"}))),
        });
        let api = AuthApi::new(ApiClient::new("http://h", mock.clone()));

        assert_eq!(api.favorites("jwt").await.unwrap().len(), 3);
        api.add_favorite("jwt", &ProductId::new("p7")).await.unwrap();

        let body: serde_json::Value = mock.requests()[1].json_body().unwrap();
        assert_eq!(body, json!({"product_id": "p7"}));
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user: User = serde_json::from_value(json!({"id": "u2", "email": "x@y.pk"})).unwrap();
        assert_eq!(user.display_name(), "x@y.pk");
        assert!(!user.is_verified);
    }
}
