use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::GatewayError;

/// Shared HTTP plumbing for the API gateways.
#[derive(Clone)]
pub struct ApiClient {
    inner: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let inner = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, GatewayError> {
        let url = self.url(path);
        log::debug!("GET {url}");
        let response = send(with_token(self.inner.get(&url), token)).await?;
        Ok(response.json().await?)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, GatewayError> {
        let url = self.url(path);
        log::debug!("POST {url}");
        let response = send(with_token(self.inner.post(&url).json(body), token)).await?;
        Ok(response.json().await?)
    }

    /// POST and return the raw body, for endpoints whose reply shape varies.
    pub async fn post_text<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<String, GatewayError> {
        let url = self.url(path);
        log::debug!("POST {url}");
        let response = send(with_token(self.inner.post(&url).json(body), token)).await?;
        Ok(response.text().await?)
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(), GatewayError> {
        let url = self.url(path);
        log::debug!("DELETE {url}");
        send(with_token(self.inner.delete(&url), token)).await?;
        Ok(())
    }
}

fn with_token(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

async fn send(request: RequestBuilder) -> Result<Response, GatewayError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(GatewayError::Unauthorized);
    }

    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::Status {
        status: status.as_u16(),
        body,
    })
}
