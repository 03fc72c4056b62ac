//! Shell chrome (header, footer) and the analyzer workspace.

use client_core::{RenderModel, Section};
use egui::{Align, Button, Frame, Layout, Margin, RichText, ScrollArea, TextEdit, TextStyle};

use crate::controller::reducer::AnalyzerController;
use crate::ui::{theme, widgets};

const TRANSCRIPT_HINT: &str = "Paste the patient-doctor conversation here...";
const FOOTER_TEXT: &str = "Auto-extracts entities from conversations and proposes ICD-10-CM codes. Demo-only lexicon; connect to full terminology services for production.";

pub fn header(ctx: &egui::Context) {
    egui::TopBottomPanel::top("shell_header")
        .frame(
            Frame::new()
                .fill(theme::CARD_FILL)
                .stroke(theme::card_stroke())
                .inner_margin(Margin::symmetric(16, 12)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("ClinDoc & Coding")
                        .size(18.0)
                        .strong()
                        .color(theme::TEXT_STRONG),
                );
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(RichText::new("System Check").color(theme::TEXT_MUTED));
                    ui.label(RichText::new("Analyzer").strong().color(theme::ACCENT));
                });
            });
        });
}

pub fn footer(ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("shell_footer")
        .frame(
            Frame::new()
                .fill(theme::CARD_FILL)
                .stroke(theme::card_stroke())
                .inner_margin(Margin::symmetric(16, 10)),
        )
        .show(ctx, |ui| {
            ui.label(RichText::new(FOOTER_TEXT).small().color(theme::TEXT_MUTED));
        });
}

pub fn analyzer(ctx: &egui::Context, controller: &mut AnalyzerController, model: &RenderModel) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            status_banner(ui, controller);
            title_row(ui, controller, model);
            ui.add_space(16.0);

            ui.columns(2, |columns| {
                transcript_column(&mut columns[0], controller, model);
                results_column(&mut columns[1], model);
            });

            if let Some(conversation) = &model.conversation {
                ui.add_space(16.0);
                card_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new("Conversation saved with ID:").color(theme::TEXT_MUTED));
                    ui.label(
                        RichText::new(&conversation.conversation_id)
                            .monospace()
                            .color(theme::TEXT_STRONG),
                    );
                    if let Some(at) = &conversation.completed_at {
                        ui.label(
                            RichText::new(format!("Analyzed at {at}"))
                                .small()
                                .color(theme::TEXT_FAINT),
                        );
                    }
                });
            }
        });
    });
}

fn status_banner(ui: &mut egui::Ui, controller: &mut AnalyzerController) {
    let Some(message) = controller.status_banner().map(str::to_string) else {
        return;
    };
    ui.horizontal(|ui| {
        ui.colored_label(theme::ERROR, message);
        if ui.small_button("Dismiss").clicked() {
            controller.dismiss_banner();
        }
    });
    ui.add_space(8.0);
}

fn title_row(ui: &mut egui::Ui, controller: &mut AnalyzerController, model: &RenderModel) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Clinical Conversation Analyzer")
                .size(24.0)
                .strong()
                .color(theme::TEXT_STRONG),
        );
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui
                .small_button("⟳")
                .on_hover_text("Refresh usage stats")
                .clicked()
            {
                controller.refresh_stats();
            }
            for card in model.stat_cards.iter().rev() {
                widgets::stat_card(ui, card);
            }
        });
    });
}

fn transcript_column(ui: &mut egui::Ui, controller: &mut AnalyzerController, model: &RenderModel) {
    ui.label(RichText::new("Transcript").strong().color(theme::TAG_TEXT));
    ui.add(
        TextEdit::multiline(controller.transcript_mut())
            .desired_rows(12)
            .desired_width(f32::INFINITY)
            .font(TextStyle::Monospace)
            .hint_text(TRANSCRIPT_HINT),
    );
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        let button = Button::new(model.submit.label).fill(theme::ACCENT);
        if ui.add_enabled(model.submit.enabled, button).clicked() {
            controller.submit();
        }
        if !model.submit.enabled {
            ui.spinner();
            if ui.small_button("Cancel").clicked() {
                controller.cancel_analysis();
            }
        }
        if let Some(error) = &model.error {
            ui.colored_label(theme::ERROR, error);
        }
    });
}

fn results_column(ui: &mut egui::Ui, model: &RenderModel) {
    section(ui, "Detected Entities", &model.entities, widgets::entity_row);
    ui.add_space(12.0);
    section(ui, "Proposed Codes", &model.codes, widgets::code_pill);
}

fn section<T>(
    ui: &mut egui::Ui,
    title: &str,
    section: &Section<T>,
    row: impl Fn(&mut egui::Ui, &T),
) {
    card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(title).strong().color(theme::TAG_TEXT));
        ui.add_space(6.0);
        match section {
            Section::Rows(rows) => {
                for item in rows {
                    row(ui, item);
                    ui.add_space(4.0);
                }
            }
            Section::Placeholder(text) => widgets::placeholder(ui, text),
        }
    });
}

fn card_frame() -> Frame {
    Frame::new()
        .fill(theme::CARD_FILL)
        .stroke(theme::card_stroke())
        .corner_radius(theme::PANEL_RADIUS)
        .inner_margin(Margin::same(14))
}
