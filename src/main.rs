//! Patch Rack - a modular synth patch editor
//!
//! Entry point for the application.

use eframe::egui;
use patch_rack::app::EditorApp;
use patch_rack::config::{EditorConfig, CONFIG_ENV_VAR};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let app = match EditorConfig::from_env() {
        Ok(config) => EditorApp::new(config),
        Err(e) => {
            tracing::warn!("ignoring {}: {}", CONFIG_ENV_VAR, e);
            EditorApp::new(EditorConfig::default())
                .with_status(format!("config not loaded: {}", e))
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Patch Rack"),
        ..Default::default()
    };

    eframe::run_native(
        "Patch Rack",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
