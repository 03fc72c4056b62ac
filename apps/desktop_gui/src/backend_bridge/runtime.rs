//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ClientConfig, CommandExecutor, HttpAnalysisService};
use crossbeam_channel::{Receiver, Sender};
use tokio::sync::mpsc;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    config: ClientConfig,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let service = match HttpAnalysisService::new(config.clone()) {
                Ok(service) => service,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        err.to_string(),
                    )));
                    tracing::error!("failed to build analysis service client: {err}");
                    return;
                }
            };

            let (event_tx, mut event_rx) = mpsc::unbounded_channel();
            let mut executor =
                CommandExecutor::new(Arc::new(service), config.request_timeout, event_tx);

            let ui_tx_events = ui_tx.clone();
            tokio::spawn(async move {
                while let Some(event) = event_rx.recv().await {
                    if ui_tx_events.send(UiEvent::Workflow(event)).is_err() {
                        break;
                    }
                }
            });

            tracing::info!(base_url = %config.base_url, "backend worker ready");
            let _ = ui_tx.try_send(UiEvent::BackendReady);

            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend: executing command");
                match cmd {
                    BackendCommand::Run(command) => executor.execute(command),
                    BackendCommand::CancelAnalysis => executor.cancel_analysis(),
                }
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    })
}
