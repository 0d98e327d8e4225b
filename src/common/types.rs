use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single chat message as exchanged with the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub avatar: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_own_message: bool,
}

impl ChatMessage {
    /// Build an outgoing draft for `user`. The server assigns the canonical timestamp.
    pub fn draft(user: &User, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            author: user.username.clone(),
            content: content.into(),
            avatar: user.avatar.clone(),
            timestamp,
            is_own_message: true,
        }
    }
}

/// Identity of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub avatar: String,
}

const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/bottts/svg";

impl User {
    /// User with the generated default avatar.
    pub fn with_default_avatar(username: impl Into<String>) -> Self {
        let username = username.into();
        let avatar = format!("{AVATAR_BASE_URL}?seed={username}");
        Self { username, avatar }
    }
}

/// The user plus the bearer token issued by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Body of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}
