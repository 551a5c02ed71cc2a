//! Riskscope: diabetes risk dashboard
//!
//! Main entry point for the terminal application.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use riskscope::adapters::sanitize::SanitizingMakeWriter;
use riskscope::adapters::JsonArtifactStore;
use riskscope::application::PredictionService;
use riskscope::config::AppConfig;
use riskscope::tui::App;

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    // Writing logs to the terminal would corrupt the TUI (alternate screen),
    // so interactive runs log to a file by default.
    let interactive = std::io::stdout().is_terminal();
    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: a missing directory surfaces as the open error below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("Failed to open log file {:?}", config.log_file))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting Riskscope...");

    if !config.model_path.exists() {
        anyhow::bail!(
            "Model path not found at {:?}. Set RISKSCOPE_MODEL_PATH to a directory containing scaler.json, model.json and features.json.",
            config.model_path
        );
    }

    let store = JsonArtifactStore::new(&config.model_path)
        .require_digests(config.require_artifact_digests);

    // Refuse to start if the artifacts cannot be loaded (preloaded policy).
    let service = PredictionService::new(store, config.artifact_policy)
        .with_context(|| format!("Failed to load model artifacts from {:?}", config.model_path))?;

    let mut app = App::new(service);
    app.run()?;

    tracing::info!("Riskscope shutdown complete.");
    Ok(())
}
