use eframe::egui;

/// Returns true when the user asked to send the current input.
pub fn render(ui: &mut egui::Ui, input_text: &mut String, enabled: bool) -> bool {
    let mut send = false;
    ui.horizontal(|ui| {
        ui.add_enabled_ui(enabled, |ui| {
            let response = ui.add(
                egui::TextEdit::singleline(input_text).hint_text("Write a message..."),
            );
            if ui.button("Send").clicked() {
                send = true;
            }

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                send = true;
            }
        });
    });

    send && !input_text.trim().is_empty()
}
