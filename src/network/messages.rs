use crate::common::ChatMessage;

use super::client::ApiClient;
use super::error::GatewayError;

const MESSAGES_PATH: &str = "/messages";

/// Client for the `/messages` endpoints.
#[derive(Clone)]
pub struct MessageGateway {
    api: ApiClient,
}

impl MessageGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All messages, in the order the server keeps them.
    pub async fn get_messages(&self, token: Option<&str>) -> Result<Vec<ChatMessage>, GatewayError> {
        self.api.get_json(MESSAGES_PATH, token).await
    }

    /// Post a draft and return the message as stored by the server.
    pub async fn send_message(
        &self,
        token: Option<&str>,
        draft: &ChatMessage,
    ) -> Result<ChatMessage, GatewayError> {
        self.api.post_json(MESSAGES_PATH, draft, token).await
    }

    pub async fn clear_messages(&self, token: Option<&str>) -> Result<(), GatewayError> {
        self.api.delete(MESSAGES_PATH, token).await
    }
}
