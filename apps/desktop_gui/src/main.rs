use std::time::Duration;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context as _;
use clap::Parser;
use client_core::{load_config, workflow::SAMPLE_TRANSCRIPT, ClientConfig};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{theme, AnalyzerApp, StartupConfig};

const APP_TITLE: &str = "ClinDoc & Coding";

#[derive(Debug, Parser)]
#[command(about = "Desktop client for the clinical conversation analyzer")]
struct Args {
    /// Base URL of the analysis service, overriding config file and environment.
    #[arg(long)]
    backend_url: Option<String>,
    /// Upper bound in seconds for a single analysis or stats request.
    #[arg(long)]
    request_timeout_secs: Option<u64>,
}

fn resolve_config(args: &Args, base: ClientConfig) -> anyhow::Result<ClientConfig> {
    let mut config = match &args.backend_url {
        Some(url) => ClientConfig::new(url)
            .with_context(|| format!("invalid --backend-url '{url}'"))?
            .with_request_timeout(base.request_timeout),
        None => base,
    };
    if let Some(secs) = args.request_timeout_secs {
        anyhow::ensure!(secs > 0, "--request-timeout-secs must be greater than zero");
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let base = load_config().context("failed to load client configuration")?;
    let config = resolve_config(&args, base)?;
    tracing::info!(
        base_url = %config.base_url,
        timeout_ms = config.request_timeout.as_millis() as u64,
        "resolved client configuration"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, config.clone());

    let startup = StartupConfig {
        client: config,
        initial_transcript: SAMPLE_TRANSCRIPT.to_string(),
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(theme::analyzer_visuals());
            Ok(Box::new(AnalyzerApp::bootstrap(cmd_tx, ui_rx, startup)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to run desktop ui: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(backend_url: Option<&str>, request_timeout_secs: Option<u64>) -> Args {
        Args {
            backend_url: backend_url.map(str::to_string),
            request_timeout_secs,
        }
    }

    #[test]
    fn flags_override_loaded_config() {
        let base = ClientConfig::default().with_request_timeout(Duration::from_secs(5));

        let config =
            resolve_config(&args(Some("https://analyzer.example/"), None), base.clone())
                .expect("resolve");
        assert_eq!(config.base_url, "https://analyzer.example");
        assert_eq!(config.request_timeout, Duration::from_secs(5));

        let config = resolve_config(&args(None, Some(12)), base).expect("resolve");
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout, Duration::from_secs(12));
    }

    #[test]
    fn rejects_bad_flag_values() {
        let err = resolve_config(&args(Some("ftp://x"), None), ClientConfig::default())
            .expect_err("scheme");
        assert!(err.to_string().contains("--backend-url"));

        assert!(resolve_config(&args(None, Some(0)), ClientConfig::default()).is_err());
    }
}
