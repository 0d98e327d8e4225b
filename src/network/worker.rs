use tokio::sync::mpsc;

use crate::common::{ChatMessage, GatewayCommand, GatewayEvent, User};
use crate::storage::{KeyValueStore, SessionStore};

use super::auth::AuthGateway;
use super::error::GatewayError;
use super::messages::MessageGateway;

/// Background task executing UI commands against the API, one at a time.
pub struct GatewayWorker<S: KeyValueStore> {
    event_sender: mpsc::Sender<GatewayEvent>,
    command_receiver: mpsc::Receiver<GatewayCommand>,
    auth: AuthGateway,
    messages: MessageGateway,
    sessions: SessionStore<S>,
}

impl<S: KeyValueStore> GatewayWorker<S> {
    pub fn new(
        event_sender: mpsc::Sender<GatewayEvent>,
        command_receiver: mpsc::Receiver<GatewayCommand>,
        auth: AuthGateway,
        messages: MessageGateway,
        sessions: SessionStore<S>,
    ) -> Self {
        Self {
            event_sender,
            command_receiver,
            auth,
            messages,
            sessions,
        }
    }

    /// Process commands until the UI drops its sender.
    pub async fn run(mut self) {
        log::info!("Gateway worker started");
        while let Some(command) = self.command_receiver.recv().await {
            let event = self.handle_command(command).await;
            if self.event_sender.send(event).await.is_err() {
                log::warn!("UI is gone; stopping gateway worker");
                break;
            }
        }
        log::info!("Gateway worker stopped");
    }

    async fn handle_command(&mut self, command: GatewayCommand) -> GatewayEvent {
        match command {
            GatewayCommand::Login { email, password } => {
                log::debug!("Logging in as {email}");
                match self.login(&email, &password).await {
                    Ok(user) => GatewayEvent::LoggedIn(user),
                    Err(err) => {
                        log::warn!("Login failed: {err}");
                        GatewayEvent::AuthFailed(err.to_string())
                    }
                }
            }
            GatewayCommand::Register { email, password } => {
                log::debug!("Registering {email}");
                match self.register(&email, &password).await {
                    Ok(()) => GatewayEvent::Registered,
                    Err(err) => {
                        log::warn!("Registration failed: {err}");
                        GatewayEvent::AuthFailed(err.to_string())
                    }
                }
            }
            GatewayCommand::LoadMessages => {
                log::debug!("Loading messages");
                request_outcome(self.load_messages().await, GatewayEvent::MessagesLoaded)
            }
            GatewayCommand::SendMessage(draft) => {
                log::debug!("Sending message as {}", draft.author);
                request_outcome(self.send_message(&draft).await, GatewayEvent::MessageSent)
            }
            GatewayCommand::ClearMessages => {
                log::debug!("Clearing messages");
                request_outcome(self.clear_messages().await, |()| GatewayEvent::MessagesCleared)
            }
            GatewayCommand::Logout => {
                if let Some(user) = self.sessions.current_user() {
                    log::info!("Logging out {}", user.username);
                }
                if let Err(err) = self.sessions.logout() {
                    log::warn!("Failed to clear stored session: {err}");
                }
                GatewayEvent::LoggedOut
            }
        }
    }

    async fn login(&mut self, email: &str, password: &str) -> Result<User, GatewayError> {
        let response = self.auth.login(email, password).await?;
        self.sessions.save_token(&response.token)?;

        let user = User::with_default_avatar(email);
        self.sessions.save_user(user.clone())?;
        log::info!("Logged in as {email}");
        Ok(user)
    }

    async fn register(&mut self, email: &str, password: &str) -> Result<(), GatewayError> {
        if let Some(token) = self.auth.register(email, password).await? {
            self.sessions.save_token(&token)?;
        }
        log::info!("Registered {email}");
        Ok(())
    }

    async fn load_messages(&mut self) -> Result<Vec<ChatMessage>, GatewayError> {
        let token = self.sessions.token()?;
        self.messages.get_messages(token.as_deref()).await
    }

    async fn send_message(&mut self, draft: &ChatMessage) -> Result<ChatMessage, GatewayError> {
        let token = self.sessions.token()?;
        self.messages.send_message(token.as_deref(), draft).await
    }

    async fn clear_messages(&mut self) -> Result<(), GatewayError> {
        let token = self.sessions.token()?;
        self.messages.clear_messages(token.as_deref()).await
    }
}

fn request_outcome<T>(
    result: Result<T, GatewayError>,
    on_success: impl FnOnce(T) -> GatewayEvent,
) -> GatewayEvent {
    match result {
        Ok(value) => on_success(value),
        Err(err) => {
            log::warn!("Request failed: {err}");
            GatewayEvent::RequestFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::ApiClient;
    use crate::storage::MemoryStore;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Harness {
        commands: mpsc::Sender<GatewayCommand>,
        events: mpsc::Receiver<GatewayEvent>,
        user: tokio::sync::watch::Receiver<Option<User>>,
    }

    fn spawn_worker(server: &MockServer) -> Harness {
        let api = ApiClient::new(&format!("{}/api", server.uri()), Duration::from_secs(5)).unwrap();
        let sessions = SessionStore::open(MemoryStore::new());
        let user = sessions.subscribe();

        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(8);
        let worker = GatewayWorker::new(
            event_tx,
            cmd_rx,
            AuthGateway::new(api.clone()),
            MessageGateway::new(api),
            sessions,
        );
        tokio::spawn(worker.run());

        Harness {
            commands: cmd_tx,
            events: event_rx,
            user,
        }
    }

    impl Harness {
        async fn request(&mut self, command: GatewayCommand) -> GatewayEvent {
            self.commands.send(command).await.unwrap();
            self.events.recv().await.unwrap()
        }
    }

    fn login(email: &str) -> GatewayCommand {
        GatewayCommand::Login {
            email: email.to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn login_stores_session_and_authorizes_later_requests() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "jwt"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/messages"))
            .and(header("Authorization", "Bearer jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let mut harness = spawn_worker(&server);

        match harness.request(login("alice@example.com")).await {
            GatewayEvent::LoggedIn(user) => assert_eq!(user.username, "alice@example.com"),
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(
            harness.user.borrow().as_ref().map(|user| user.username.clone()),
            Some("alice@example.com".to_string())
        );

        match harness.request(GatewayCommand::LoadMessages).await {
            GatewayEvent::MessagesLoaded(messages) => assert!(messages.is_empty()),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_login_reports_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let mut harness = spawn_worker(&server);

        assert!(matches!(
            harness.request(login("alice@example.com")).await,
            GatewayEvent::AuthFailed(_)
        ));
        assert_eq!(*harness.user.borrow(), None);
    }

    #[tokio::test]
    async fn logout_clears_published_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "jwt"})))
            .mount(&server)
            .await;

        let mut harness = spawn_worker(&server);
        harness.request(login("alice@example.com")).await;

        assert!(matches!(
            harness.request(GatewayCommand::Logout).await,
            GatewayEvent::LoggedOut
        ));
        assert_eq!(*harness.user.borrow(), None);
    }

    #[tokio::test]
    async fn server_error_reports_request_failure() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/messages"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let mut harness = spawn_worker(&server);

        match harness.request(GatewayCommand::ClearMessages).await {
            GatewayEvent::RequestFailed(message) => assert!(message.contains("500")),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
