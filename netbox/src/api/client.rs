use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::common::{ApiErrorDetails, ApiQueryParams, Endpoint, Paginated};
use super::error::ApiError;
use super::pool::ConnectionPoolConfig;

/// NetBox REST API client
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new API client with default pool settings
    pub fn new(server_url: &str, api_token: &str, insecure: bool) -> Result<Self, ApiError> {
        Self::with_config(server_url, api_token, insecure, ConnectionPoolConfig::default())
    }

    pub fn with_config(
        server_url: &str,
        api_token: &str,
        insecure: bool,
        pool_config: ConnectionPoolConfig,
    ) -> Result<Self, ApiError> {
        let parsed = url::Url::parse(server_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", server_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                server_url
            )));
        }

        let http_client = pool_config.build_client(insecure)?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                base_url: server_url.trim_end_matches('/').to_string(),
                auth_header: format!("Token {}", api_token),
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Execute a GET request
    pub async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        self.parse_success_response(response).await
    }

    /// Execute a GET request with query parameters
    pub async fn get_with_params<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        params: &ApiQueryParams,
    ) -> Result<T, ApiError> {
        let full_path = format!("{}{}", path, params.to_query_string());
        self.get(&full_path).await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        self.parse_success_response(response).await
    }

    pub async fn put<T: for<'de> Deserialize<'de>, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        self.parse_success_response(response).await
    }

    pub async fn patch<T: for<'de> Deserialize<'de>, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::PATCH, path, Some(body)).await?;
        self.parse_success_response(response).await
    }

    /// Execute a DELETE request; NetBox answers 204 without a body
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// First page of a collection filtered by `params`
    pub async fn list<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &Endpoint,
        params: &ApiQueryParams,
    ) -> Result<Paginated<T>, ApiError> {
        self.get_with_params(&endpoint.path(), params).await
    }

    pub async fn retrieve<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &Endpoint,
        id: i64,
    ) -> Result<T, ApiError> {
        self.get(&endpoint.object_path(id)).await
    }

    pub async fn create<T: for<'de> Deserialize<'de>, B: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint,
        body: &B,
    ) -> Result<T, ApiError> {
        self.post(&endpoint.path(), body).await
    }

    /// Full replacement (PUT)
    pub async fn update<T: for<'de> Deserialize<'de>, B: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint,
        id: i64,
        body: &B,
    ) -> Result<T, ApiError> {
        self.put(&endpoint.object_path(id), body).await
    }

    /// Partial update (PATCH)
    pub async fn partial_update<T: for<'de> Deserialize<'de>, B: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint,
        id: i64,
        body: &B,
    ) -> Result<T, ApiError> {
        self.patch(&endpoint.object_path(id), body).await
    }

    pub async fn destroy(&self, endpoint: &Endpoint, id: i64) -> Result<(), ApiError> {
        self.delete(&endpoint.object_path(id)).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.inner.base_url, path);
        tracing::debug!("{} request to: {}", method, url);

        let mut request = self
            .inner
            .http_client
            .request(method, &url)
            .header(AUTHORIZATION, &self.inner.auth_header)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            if tracing::enabled!(tracing::Level::DEBUG) {
                if let Ok(json) = serde_json::to_string(body) {
                    tracing::debug!("API request body: {}", json);
                }
            }
            request = request.json(body);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(self.handle_error_response(response).await)
        }
    }

    /// Parse successful response
    async fn parse_success_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let text = response.text().await?;
        tracing::debug!("API response body: {}", text);

        serde_json::from_str::<T>(&text).map_err(|e| {
            tracing::error!("Failed to deserialize response: {}, body: {}", e, text);
            ApiError::ParseError(format!("Failed to parse response: {}", e))
        })
    }

    /// Handle error response
    async fn handle_error_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::debug!("API error response (HTTP {}): {}", status.as_u16(), text);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return ApiError::AuthError {
                status: status.as_u16(),
                message: text,
            };
        }

        let details = ApiErrorDetails::parse(&text).map(Box::new);
        ApiError::ApiError {
            status: status.as_u16(),
            message: text,
            details,
        }
    }
}

#[cfg(test)]
#[path = "./client_test.rs"]
mod client_test;
