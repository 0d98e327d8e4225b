use super::types::ChatMessage;

/// Commands the UI sends to the gateway worker.
#[derive(Debug, Clone)]
pub enum GatewayCommand {
    Login { email: String, password: String },
    Register { email: String, password: String },
    LoadMessages,
    /// Post a draft; the server reply carries the canonical timestamp.
    SendMessage(ChatMessage),
    ClearMessages,
    Logout,
}
