use super::types::{ChatMessage, User};

/// Events the gateway worker reports back to the UI.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    LoggedIn(User),
    Registered,
    LoggedOut,
    AuthFailed(String),
    MessagesLoaded(Vec<ChatMessage>),
    MessageSent(ChatMessage),
    MessagesCleared,
    RequestFailed(String),
}
