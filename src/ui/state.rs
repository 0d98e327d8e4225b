use chrono::{DateTime, Utc};

use crate::common::{ChatMessage, GatewayCommand, GatewayEvent, User};
use crate::validation;

/// Screen currently displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Chat,
    Login,
    Register,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Local state of the UI.
#[derive(Debug, Default)]
pub struct AppState {
    pub screen: Screen,
    pub messages: Vec<ChatMessage>,
    pub input_text: String,
    pub login: LoginForm,
    pub register: RegisterForm,
    pub status: Option<Status>,
    /// A request started from a form is in flight.
    pub busy: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate(&mut self, screen: Screen) {
        self.screen = screen;
        self.status = None;
    }

    /// Apply a worker event. Returns a follow-up command when one is needed.
    pub fn apply_event(&mut self, event: GatewayEvent) -> Option<GatewayCommand> {
        match event {
            GatewayEvent::LoggedIn(user) => {
                self.busy = false;
                self.login = LoginForm::default();
                self.navigate(Screen::Chat);
                self.status = Some(Status::Info(format!("Logged in as {}", user.username)));
                return Some(GatewayCommand::LoadMessages);
            }
            GatewayEvent::Registered => {
                self.busy = false;
                self.login.email = std::mem::take(&mut self.register.email);
                self.register = RegisterForm::default();
                self.navigate(Screen::Login);
                self.status = Some(Status::Info("Account created, you can log in.".to_string()));
            }
            GatewayEvent::AuthFailed(reason) => {
                self.busy = false;
                log::warn!("Authentication failed: {reason}");
                let message = match self.screen {
                    Screen::Register => "Registration failed. Please try again.",
                    _ => "Login failed. Please check your credentials.",
                };
                self.status = Some(Status::Error(message.to_string()));
            }
            GatewayEvent::LoggedOut => {
                self.messages.clear();
                self.input_text.clear();
                self.navigate(Screen::Login);
            }
            GatewayEvent::MessagesLoaded(messages) => {
                self.messages = messages;
            }
            GatewayEvent::MessageSent(message) => {
                self.messages.push(message);
                self.input_text.clear();
            }
            GatewayEvent::MessagesCleared => {
                self.messages.clear();
            }
            GatewayEvent::RequestFailed(reason) => {
                self.status = Some(Status::Error(reason));
            }
        }
        None
    }

    /// Validate the login form and build the command for it.
    pub fn submit_login(&mut self) -> Option<GatewayCommand> {
        if let Err(err) = validation::validate_login(&self.login.email, &self.login.password) {
            self.status = Some(Status::Error(err));
            return None;
        }
        self.busy = true;
        self.status = None;
        Some(GatewayCommand::Login {
            email: self.login.email.trim().to_string(),
            password: self.login.password.clone(),
        })
    }

    /// Validate the registration form and build the command for it.
    pub fn submit_registration(&mut self) -> Option<GatewayCommand> {
        let form = &self.register;
        if let Err(err) =
            validation::validate_registration(&form.email, &form.password, &form.confirm_password)
        {
            self.status = Some(Status::Error(err));
            return None;
        }
        self.busy = true;
        self.status = None;
        Some(GatewayCommand::Register {
            email: form.email.trim().to_string(),
            password: form.password.clone(),
        })
    }

    /// Draft for the current input, if there is something to send and someone to send it as.
    ///
    /// The input stays untouched until the server confirms the message.
    pub fn compose_message(&self, user: Option<&User>, now: DateTime<Utc>) -> Option<ChatMessage> {
        let user = user?;
        if self.input_text.trim().is_empty() {
            return None;
        }
        Some(ChatMessage::draft(user, self.input_text.clone(), now))
    }
}
