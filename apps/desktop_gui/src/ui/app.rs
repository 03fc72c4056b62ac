use std::time::Duration;

use client_core::{ClientConfig, RenderModel, WorkflowState};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::reducer::AnalyzerController;
use crate::ui::panels;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub client: ClientConfig,
    pub initial_transcript: String,
}

pub struct AnalyzerApp {
    controller: AnalyzerController,
}

impl AnalyzerApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        tracing::info!(base_url = %startup.client.base_url, "starting analyzer ui");
        let mut controller =
            AnalyzerController::new(cmd_tx, ui_rx, WorkflowState::new(startup.initial_transcript));
        controller.mount();
        Self { controller }
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.process_ui_events();

        let model = RenderModel::derive(self.controller.workflow());
        panels::header(ctx);
        panels::footer(ctx);
        panels::analyzer(ctx, &mut self.controller, &model);

        // Events arrive off-thread, so keep polling even without input.
        if self.controller.workflow().is_loading() || !self.controller.backend_ready() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
