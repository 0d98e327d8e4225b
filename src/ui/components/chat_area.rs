use chrono::Local;
use eframe::egui;

use crate::common::ChatMessage;
use crate::grouping::MessageLayout;

pub fn render(ui: &mut egui::Ui, messages: &[ChatMessage], layouts: &[MessageLayout]) {
    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if messages.is_empty() {
                ui.label(egui::RichText::new("No messages yet").weak());
                return;
            }

            for (message, layout) in messages.iter().zip(layouts) {
                if let Some(label) = &layout.date_label {
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new(label.as_str()).weak().small());
                    });
                    ui.separator();
                }

                // Own messages sit on the right.
                let align = if message.is_own_message {
                    egui::Align::Max
                } else {
                    egui::Align::Min
                };
                ui.with_layout(egui::Layout::top_down(align), |ui| {
                    render_message(ui, message, layout);
                });
            }
        });
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage, layout: &MessageLayout) {
    if layout.show_header {
        ui.add_space(6.0);
        let header = ui.label(egui::RichText::new(message.author.as_str()).strong());
        if !message.avatar.is_empty() {
            header.on_hover_text(message.avatar.as_str());
        }
    }

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(message.content.as_str());
    });

    if layout.show_timestamp {
        let time = message.timestamp.with_timezone(&Local).format("%H:%M");
        ui.label(egui::RichText::new(time.to_string()).weak().small());
    }
}
