use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};

pub const DEFAULT_QUERY_SERVICE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_QUERY_SERVICE_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the remote Query Service REST API.
#[derive(Debug, Clone)]
pub struct QueryService {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl QueryService {
    /// Reads `QUERY_SERVICE_URL` and `QUERY_SERVICE_TIMEOUT_SECS`.
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var("QUERY_SERVICE_URL").unwrap_or(DEFAULT_QUERY_SERVICE_URL.to_string());
        let timeout_secs = std::env::var("QUERY_SERVICE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_QUERY_SERVICE_TIMEOUT_SECS);
        Self::new(base_url, Duration::from_secs(timeout_secs))
    }

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { base_url, http, token: None })
    }

    /// Sends `Authorization: Bearer <token>` on every request when set.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> anyhow::Result<T> {
        let request = self.request(Method::GET, path).query(query);
        let text = self.send(request, Method::GET, path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Body of a GET as raw bytes, with the content type the service answered with.
    pub async fn get_raw(&self, path: &str, query: &[(&str, String)]) -> anyhow::Result<(Option<String>, bytes::Bytes)> {
        let request = self.request(Method::GET, path).query(query);
        tracing::info!("query service: GET {}", path);
        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.bytes().await?;
        if status.is_client_error() || status.is_server_error() {
            let message = error_message(&String::from_utf8_lossy(&body));
            tracing::error!("query service: GET {} failed: {}: {}", path, status, message);
            anyhow::bail!("{}: {}", status, message);
        }
        Ok((content_type, body))
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> anyhow::Result<T> {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> anyhow::Result<T> {
        self.send_json(Method::PUT, path, body).await
    }

    /// PUT without a request body.
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let request = self.request(Method::PUT, path);
        let text = self.send(request, Method::PUT, path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> anyhow::Result<T> {
        let request = self.request(Method::DELETE, path).query(query);
        let text = self.send(request, Method::DELETE, path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(&self, method: Method, path: &str, body: &B) -> anyhow::Result<T> {
        let request = self
            .request(method.clone(), path)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_string(body)?);
        let text = self.send(request, method, path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, method: Method, path: &str) -> anyhow::Result<String> {
        tracing::info!("query service: {} {}", method, path);
        let t0 = std::time::Instant::now();
        let response = request.send().await.inspect_err(|e| {
            tracing::error!("query service: {} {} unreachable: {}", method, path, e);
        })?;
        let status = response.status();
        let response_txt = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            let message = error_message(&response_txt);
            tracing::error!("query service: {} {} failed: {}: {}", method, path, status, message);
            anyhow::bail!("{}: {}", status, message);
        }
        tracing::debug!("query service: {} {} took {}ms, len = {}", method, path, t0.elapsed().as_millis(), response_txt.len());
        Ok(response_txt)
    }
}

/// The service puts a human readable reason in `message`; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_json_message() {
        assert_eq!(error_message(r#"{"success":false,"message":"Entry not found"}"#), "Entry not found");
        assert_eq!(error_message(" Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let service = QueryService::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(service.base_url(), "http://localhost:5000");
    }

    #[test]
    fn blank_token_is_ignored() {
        let service = QueryService::new("http://localhost:5000", Duration::from_secs(1))
            .unwrap()
            .with_token(Some("  ".into()));
        assert!(service.token.is_none());
    }
}
