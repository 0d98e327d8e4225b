use chrono::{Local, TimeDelta, Utc};
use eframe::egui;
use tokio::sync::{mpsc, watch};

use crate::common::{GatewayCommand, GatewayEvent, User};
use crate::grouping::{self, Locale};

use super::components::{chat_area, input_bar, login_form, nav_bar, register_form};
use super::state::{AppState, Screen, Status};

/// How message bursts are grouped and labelled.
#[derive(Debug, Clone, Copy)]
pub struct Presentation {
    pub threshold: TimeDelta,
    pub locale: Locale,
}

pub struct ChatApp {
    state: AppState,
    presentation: Presentation,
    command_sender: mpsc::Sender<GatewayCommand>,
    event_receiver: mpsc::Receiver<GatewayEvent>,
    user: watch::Receiver<Option<User>>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<GatewayCommand>,
        event_receiver: mpsc::Receiver<GatewayEvent>,
        user: watch::Receiver<Option<User>>,
        presentation: Presentation,
    ) -> Self {
        let mut app = Self {
            state: AppState::new(),
            presentation,
            command_sender,
            event_receiver,
            user,
        };

        if app.current_user().is_some() {
            app.send_command(GatewayCommand::LoadMessages);
        } else {
            app.state.navigate(Screen::Login);
        }
        app
    }

    fn current_user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    fn handle_gateway_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            if let Some(command) = self.state.apply_event(event) {
                self.send_command(command);
            }
        }
    }

    fn send_command(&mut self, command: GatewayCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to gateway worker: {err}");
            self.state.busy = false;
            self.state.status = Some(Status::Error("Client is busy, try again.".to_string()));
        }
    }

    fn render_chat(&mut self, ui: &mut egui::Ui, user: Option<&User>) {
        ui.horizontal(|ui| {
            ui.heading("Chat room");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add_enabled(user.is_some(), egui::Button::new("Clear")).clicked() {
                    self.send_command(GatewayCommand::ClearMessages);
                }
            });
        });
        ui.separator();

        let layouts = grouping::layout(
            &self.state.messages,
            &Local::now(),
            self.presentation.threshold,
            self.presentation.locale,
        );

        let input_height = 36.0;
        ui.allocate_ui(
            egui::vec2(ui.available_width(), (ui.available_height() - input_height).max(0.0)),
            |ui| chat_area::render(ui, &self.state.messages, &layouts),
        );

        ui.separator();
        if user.is_none() {
            ui.label(egui::RichText::new("Log in to send messages").weak());
        }
        if input_bar::render(ui, &mut self.state.input_text, user.is_some()) {
            if let Some(draft) = self.state.compose_message(user, Utc::now()) {
                self.send_command(GatewayCommand::SendMessage(draft));
            }
        }
    }

    fn render_login(&mut self, ui: &mut egui::Ui) {
        let actions = login_form::render(ui, &mut self.state.login, self.state.busy);
        if actions.submit {
            if let Some(command) = self.state.submit_login() {
                self.send_command(command);
            }
        }
        if actions.go_to_register {
            self.state.navigate(Screen::Register);
        }
    }

    fn render_register(&mut self, ui: &mut egui::Ui) {
        let actions = register_form::render(ui, &mut self.state.register, self.state.busy);
        if actions.submit {
            if let Some(command) = self.state.submit_registration() {
                self.send_command(command);
            }
        }
        if actions.go_to_login {
            self.state.navigate(Screen::Login);
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_gateway_events();
        let user = self.current_user();

        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            let actions = nav_bar::render(ui, self.state.screen, user.as_ref());
            if let Some(screen) = actions.navigate {
                self.state.navigate(screen);
            }
            if actions.logout {
                self.send_command(GatewayCommand::Logout);
            }
        });

        if let Some(status) = &self.state.status {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| match status {
                Status::Info(text) => {
                    ui.label(text.as_str());
                }
                Status::Error(text) => {
                    ui.colored_label(egui::Color32::RED, text.as_str());
                }
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.state.screen {
            Screen::Chat => self.render_chat(ui, user.as_ref()),
            Screen::Login => self.render_login(ui),
            Screen::Register => self.render_register(ui),
        });

        ctx.request_repaint();
    }
}
