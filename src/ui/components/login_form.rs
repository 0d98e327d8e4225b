use eframe::egui;

use crate::ui::state::LoginForm;

#[derive(Default)]
pub struct LoginActions {
    pub submit: bool,
    pub go_to_register: bool,
}

pub fn render(ui: &mut egui::Ui, form: &mut LoginForm, busy: bool) -> LoginActions {
    let mut actions = LoginActions::default();

    ui.heading("Log in");
    ui.separator();

    egui::Grid::new("login_grid").num_columns(2).show(ui, |ui| {
        ui.label("Email:");
        ui.text_edit_singleline(&mut form.email);
        ui.end_row();

        ui.label("Password:");
        let password = ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
        if password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            actions.submit = true;
        }
        ui.end_row();
    });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui.add_enabled(!busy, egui::Button::new("Log in")).clicked() {
            actions.submit = true;
        }
        if ui.link("No account yet? Register").clicked() {
            actions.go_to_register = true;
        }
    });

    if busy {
        actions.submit = false;
    }
    actions
}
