pub mod commands;
pub mod events;
pub mod types;

pub use commands::GatewayCommand;
pub use events::GatewayEvent;
pub use types::{AuthRequest, AuthResponse, ChatMessage, Session, User};
