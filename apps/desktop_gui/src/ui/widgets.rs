//! Stateless widgets: each draws one render view and nothing else.

use client_core::{AssertionStyle, CodePillView, EntityRowView, StatCardView};
use egui::{Align, Frame, Layout, Margin, RichText, Stroke};

use crate::ui::theme;

pub fn stat_card(ui: &mut egui::Ui, card: &StatCardView) {
    Frame::new()
        .fill(theme::CARD_FILL)
        .stroke(theme::card_stroke())
        .corner_radius(theme::PANEL_RADIUS)
        .inner_margin(Margin::symmetric(14, 10))
        .show(ui, |ui| {
            ui.set_min_width(120.0);
            ui.vertical(|ui| {
                ui.label(RichText::new(card.title).small().color(theme::TEXT_MUTED));
                ui.label(
                    RichText::new(&card.value)
                        .size(22.0)
                        .strong()
                        .color(theme::TEXT_STRONG),
                );
                if let Some(sub) = &card.sub {
                    ui.label(RichText::new(sub).small().color(theme::TEXT_FAINT));
                }
            });
        });
}

pub fn code_pill(ui: &mut egui::Ui, pill: &CodePillView) {
    Frame::new()
        .fill(theme::CODE_FILL)
        .stroke(Stroke::new(1.0, theme::CODE_BORDER))
        .corner_radius(8.0)
        .inner_margin(Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(&pill.code)
                        .small()
                        .strong()
                        .color(theme::CODE_TEXT),
                );
                ui.label(RichText::new(&pill.display).color(theme::CODE_TEXT));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    badge(
                        ui,
                        &pill.confidence_label(),
                        theme::CARD_FILL,
                        theme::CODE_TEXT,
                        theme::CODE_BORDER,
                    );
                });
            });
        });
}

pub fn entity_row(ui: &mut egui::Ui, row: &EntityRowView) {
    let (fill, text, border) = match row.style {
        AssertionStyle::Present => (
            theme::PRESENT_FILL,
            theme::PRESENT_TEXT,
            theme::PRESENT_BORDER,
        ),
        AssertionStyle::NotPresent => (
            theme::NOT_PRESENT_FILL,
            theme::NOT_PRESENT_TEXT,
            theme::NOT_PRESENT_BORDER,
        ),
    };

    Frame::new()
        .fill(theme::CARD_FILL)
        .stroke(theme::card_stroke())
        .corner_radius(4.0)
        .inner_margin(Margin::same(8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                badge(ui, &row.type_tag, theme::TAG_FILL, theme::TAG_TEXT, theme::TAG_FILL);
                ui.label(RichText::new(&row.label).strong().color(theme::TEXT_STRONG));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    badge(ui, &row.badge, fill, text, border);
                });
            });
        });
}

pub fn placeholder(ui: &mut egui::Ui, text: &str) {
    ui.label(RichText::new(text).color(theme::TEXT_MUTED));
}

fn badge(
    ui: &mut egui::Ui,
    text: &str,
    fill: egui::Color32,
    color: egui::Color32,
    border: egui::Color32,
) {
    Frame::new()
        .fill(fill)
        .stroke(Stroke::new(1.0, border))
        .corner_radius(4.0)
        .inner_margin(Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small().color(color));
        });
}
