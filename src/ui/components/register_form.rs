use eframe::egui;

use crate::ui::state::RegisterForm;

#[derive(Default)]
pub struct RegisterActions {
    pub submit: bool,
    pub go_to_login: bool,
}

pub fn render(ui: &mut egui::Ui, form: &mut RegisterForm, busy: bool) -> RegisterActions {
    let mut actions = RegisterActions::default();

    ui.heading("Create an account");
    ui.separator();

    egui::Grid::new("register_grid").num_columns(2).show(ui, |ui| {
        ui.label("Email:");
        ui.text_edit_singleline(&mut form.email);
        ui.end_row();

        ui.label("Password:");
        ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
        ui.end_row();

        ui.label("Confirm password:");
        ui.add(egui::TextEdit::singleline(&mut form.confirm_password).password(true));
        ui.end_row();
    });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui.add_enabled(!busy, egui::Button::new("Register")).clicked() {
            actions.submit = true;
        }
        if ui.link("Already registered? Log in").clicked() {
            actions.go_to_login = true;
        }
    });

    actions
}
