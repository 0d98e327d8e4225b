use crate::common::{AuthRequest, AuthResponse};

use super::client::ApiClient;
use super::error::GatewayError;

/// Client for the `/auth` endpoints.
#[derive(Clone)]
pub struct AuthGateway {
    api: ApiClient,
}

impl AuthGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, GatewayError> {
        self.api
            .post_json("/auth/login", &AuthRequest { email, password }, None)
            .await
    }

    /// Register a new account. Returns the token when the server issues one.
    pub async fn register(&self, email: &str, password: &str) -> Result<Option<String>, GatewayError> {
        let body = self
            .api
            .post_text("/auth/register", &AuthRequest { email, password }, None)
            .await?;

        Ok(serde_json::from_str::<AuthResponse>(&body)
            .ok()
            .map(|response| response.token))
    }
}
