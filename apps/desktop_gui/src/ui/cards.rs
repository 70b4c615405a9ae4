//! Practitioner card widget.

use client_core::PractitionerCard;
use eframe::egui;
use egui::TextureHandle;

pub const AVATAR_SIZE: f32 = 72.0;

const CARD_FILL: egui::Color32 = egui::Color32::from_rgb(255, 255, 255);
const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(226, 232, 240);
const AVATAR_FILL: egui::Color32 = egui::Color32::from_rgb(191, 219, 254);
const AVATAR_TEXT: egui::Color32 = egui::Color32::from_rgb(29, 78, 216);
const MUTED_TEXT: egui::Color32 = egui::Color32::from_rgb(100, 116, 139);

pub enum Avatar<'a> {
    Photo(&'a TextureHandle),
    Initials,
}

fn show_avatar(ui: &mut egui::Ui, card: &PractitionerCard, avatar: Avatar<'_>) {
    let size = egui::vec2(AVATAR_SIZE, AVATAR_SIZE);
    match avatar {
        Avatar::Photo(texture) => {
            ui.add(egui::Image::new(texture).fit_to_exact_size(size));
        }
        Avatar::Initials => {
            let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
            let painter = ui.painter();
            painter.circle_filled(rect.center(), AVATAR_SIZE / 2.0, AVATAR_FILL);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                &card.initials,
                egui::FontId::proportional(24.0),
                AVATAR_TEXT,
            );
        }
    }
}

pub fn show_card(ui: &mut egui::Ui, card: &PractitionerCard, avatar: Avatar<'_>) {
    egui::Frame::new()
        .fill(CARD_FILL)
        .stroke(egui::Stroke::new(1.0, CARD_STROKE))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                show_avatar(ui, card, avatar);
                ui.add_space(12.0);
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&card.name).strong().size(17.0));
                    ui.label(&card.primary_speciality);
                    ui.label(egui::RichText::new(&card.experience).small().color(MUTED_TEXT));
                    ui.add_space(6.0);
                    ui.label(&card.clinic_name);
                    ui.label(egui::RichText::new(&card.location).color(MUTED_TEXT));
                    if let Some(languages) = &card.languages {
                        ui.label(egui::RichText::new(languages).small().color(MUTED_TEXT));
                    }
                });
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.label(egui::RichText::new(&card.fee).strong().size(17.0));
                    ui.add_space(8.0);
                    let _ = ui
                        .button("Book Appointment")
                        .on_hover_text("Appointment booking is not available here");
                });
            });
        });
}
