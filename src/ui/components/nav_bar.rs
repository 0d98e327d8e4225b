use eframe::egui;

use crate::common::User;
use crate::ui::state::Screen;

#[derive(Default)]
pub struct NavActions {
    pub navigate: Option<Screen>,
    pub logout: bool,
}

pub fn render(ui: &mut egui::Ui, current: Screen, user: Option<&User>) -> NavActions {
    let mut actions = NavActions::default();

    ui.horizontal(|ui| {
        ui.heading("Chatterbox");
        ui.separator();

        for (screen, label) in [
            (Screen::Chat, "Chat"),
            (Screen::Login, "Log in"),
            (Screen::Register, "Register"),
        ] {
            if ui.selectable_label(current == screen, label).clicked() && current != screen {
                actions.navigate = Some(screen);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            match user {
                Some(user) => {
                    if ui.button("Log out").clicked() {
                        actions.logout = true;
                    }
                    ui.label(user.username.as_str())
                        .on_hover_text(user.avatar.as_str());
                }
                None => {
                    ui.label(egui::RichText::new("Not logged in").weak());
                }
            }
        });
    });

    actions
}
