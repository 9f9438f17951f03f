//! API client for the FoodCourt backend gateway.
//!
//! One method per documented endpoint. Authenticated calls carry a bearer
//! token; login and registration do not. There is no retry policy - every
//! failure is reported once and the caller decides what to do.

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    LoginRequest, LoginResponse, MenuItem, MenuPage, MenuQuery, NewMenuItem, Order,
    PlaceOrderRequest, PlaceOrderResponse, RegisterRequest, RegisterResponse, StatusUpdate,
    UserProfile,
};

use super::ApiError;

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the ordering backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Drop the bearer token (logout).
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if a response is successful, mapping failures into the error
    /// taxonomy with the server's own message attached.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn patch<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .patch(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send PATCH request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send DELETE request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    // ===== Authentication =====

    /// Authenticate and return the session token and user id.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let url = self.url("/login");
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to send login request")?;

        let response = Self::check_response(response).await?;
        response.json().await.context("Failed to parse login response")
    }

    /// Create an account. The caller still has to log in afterwards.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisterResponse> {
        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let url = self.url("/register");
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to send registration request")?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .context("Failed to parse registration response")
    }

    /// Fetch the profile for a user id.
    pub async fn fetch_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.get(&format!("/users/{}", user_id)).await
    }

    // ===== Menu =====

    /// Paginated, filterable, sortable menu query.
    pub async fn search_menu(&self, query: &MenuQuery) -> Result<MenuPage> {
        self.post("/menu/search", query).await
    }

    /// Batch id -> item lookup for resolving order contents.
    pub async fn fetch_menu_items(&self, ids: &[String]) -> Result<Vec<MenuItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let body = BatchLookupRequest { ids };
        self.post("/menu/multiple", &body).await
    }

    /// Full menu list (admin view, unpaginated).
    pub async fn list_menu(&self) -> Result<Vec<MenuItem>> {
        self.get("/menu").await
    }

    /// Create a menu item; returns the new item's id.
    pub async fn create_menu_item(&self, item: &NewMenuItem) -> Result<String> {
        let response: CreatedResponse = self.post("/menu", item).await?;
        debug!(id = %response.id, "Menu item created");
        Ok(response.id)
    }

    /// Update a menu item in place.
    pub async fn update_menu_item(&self, id: &str, item: &NewMenuItem) -> Result<()> {
        let _: MessageResponse = self.patch(&format!("/menu/{}", id), item).await?;
        Ok(())
    }

    /// Delete a menu item.
    pub async fn delete_menu_item(&self, id: &str) -> Result<()> {
        let _: MessageResponse = self.delete(&format!("/menu/{}", id)).await?;
        Ok(())
    }

    // ===== Orders =====

    /// Place an order from a list of item ids; returns the order id.
    /// Prices are deliberately not part of the payload - the backend
    /// recomputes the total from its own menu.
    pub async fn place_order(&self, user_id: &str, item_ids: Vec<String>) -> Result<String> {
        let body = PlaceOrderRequest {
            user_id: user_id.to_string(),
            item_ids,
        };
        let response: PlaceOrderResponse = self.post("/orders", &body).await?;
        debug!(order_id = %response.order_id, "Order placed");
        Ok(response.order_id)
    }

    /// All orders (admin view).
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        self.get("/orders").await
    }

    /// Orders belonging to one user.
    pub async fn list_user_orders(&self, user_id: &str) -> Result<Vec<Order>> {
        self.get(&format!("/orders/user/{}", user_id)).await
    }

    /// Update an order's status (admin). The status string is forwarded
    /// as-is; the server contract decides what values are acceptable.
    pub async fn update_order_status(&self, order_id: &str, status: &str) -> Result<()> {
        let body = StatusUpdate {
            status: status.to_string(),
        };
        let _: MessageResponse = self
            .patch(&format!("/orders/{}/status", order_id), &body)
            .await?;
        Ok(())
    }

    /// Delete an order (admin).
    pub async fn delete_order(&self, order_id: &str) -> Result<()> {
        let _: MessageResponse = self.delete(&format!("/orders/{}", order_id)).await?;
        Ok(())
    }
}

// Internal API response types for parsing

#[derive(Debug, Serialize)]
struct BatchLookupRequest<'a> {
    ids: &'a [String],
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    #[allow(dead_code)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_lookup_wire_format() {
        let ids = vec!["m-1".to_string(), "m-2".to_string()];
        let body = BatchLookupRequest { ids: &ids };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["ids"][0], "m-1");
        assert_eq!(value["ids"][1], "m-2");
    }

    #[test]
    fn test_parse_created_and_message_responses() {
        let created: CreatedResponse = serde_json::from_str(r#"{"id":"m-9"}"#).unwrap();
        assert_eq!(created.id, "m-9");

        let msg: MessageResponse =
            serde_json::from_str(r#"{"message":"menu item deleted"}"#).unwrap();
        assert_eq!(msg.message, "menu item deleted");

        // Some handlers return an empty object
        let msg: MessageResponse = serde_json::from_str("{}").unwrap();
        assert!(msg.message.is_empty());
    }

    #[test]
    fn test_url_join() {
        let client = ApiClient::new("http://localhost:8080").unwrap();
        assert_eq!(client.url("/menu/search"), "http://localhost:8080/menu/search");
    }
}
