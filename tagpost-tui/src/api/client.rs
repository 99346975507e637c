use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::{ApiError, ApiResult};
use tagpost_types::*;

/// Default server used when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Anything that can list the current user's friends.
///
/// The tagging session only needs this one read, so it talks to the trait
/// rather than the concrete client.
#[async_trait]
pub trait FriendsSource: Send + Sync {
    async fn list_friends(&self) -> ApiResult<Vec<Friend>>;
}

/// API client for communicating with the post server
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session_token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session_token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the session token for authenticated requests
    pub fn set_session_token(&mut self, token: Option<String>) {
        self.session_token = token;
    }

    fn add_auth_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.session_token {
            req.header("X-Session-Token", token)
        } else {
            req
        }
    }

    /// Map a response onto `T`, or onto the matching `ApiError` for non-2xx
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }

        let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

        // Proxies answer with whole HTML pages; keep the message short
        let clean_error = if error_text.contains("<html>") || error_text.contains("<!DOCTYPE") {
            format!("Server returned {} error. Please check the server URL.", status.as_u16())
        } else if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(&error_text) {
            parsed.error
        } else {
            error_text
        };

        match status.as_u16() {
            404 => Err(ApiError::NotFound(clean_error)),
            401 => Err(ApiError::Unauthorized(clean_error)),
            400 => Err(ApiError::BadRequest(clean_error)),
            code => Err(ApiError::Server {
                status: code,
                message: clean_error,
            }),
        }
    }

    // Friend endpoints

    /// Get the friends the current user can tag
    pub async fn get_friends(&self) -> ApiResult<Vec<Friend>> {
        let url = format!("{}/friends", self.base_url);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        let body: FriendsResponse = self.handle_response(response).await?;
        Ok(body.friends)
    }

    // Post endpoints

    /// Get a single post by ID
    pub async fn get_post(&self, post_id: Uuid) -> ApiResult<Post> {
        let url = format!("{}/posts/{}", self.base_url, post_id);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Create a new post
    pub async fn create_post(&self, request: &CreatePostRequest) -> ApiResult<Post> {
        let url = format!("{}/posts", self.base_url);
        let req = self.add_auth_header(self.client.post(&url).json(request));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Update content, tags and location of an existing post
    pub async fn update_post(&self, post_id: Uuid, request: &UpdatePostRequest) -> ApiResult<Post> {
        let url = format!("{}/posts/{}", self.base_url, post_id);
        let req = self.add_auth_header(self.client.put(&url).json(request));
        let response = req.send().await?;
        self.handle_response(response).await
    }
}

#[async_trait]
impl FriendsSource for ApiClient {
    async fn list_friends(&self) -> ApiResult<Vec<Friend>> {
        self.get_friends().await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        let base_url =
            std::env::var("TAGPOST_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        Self::new(base_url)
    }
}
