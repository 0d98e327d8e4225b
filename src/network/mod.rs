pub mod auth;
pub mod client;
pub mod error;
pub mod messages;
pub mod worker;

pub use auth::AuthGateway;
pub use client::ApiClient;
pub use error::GatewayError;
pub use messages::MessageGateway;
pub use worker::GatewayWorker;
