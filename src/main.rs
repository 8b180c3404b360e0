//! Spendview - Budget Dashboard Viewer
//!
//! A Rust application for viewing finance tracker dashboard exports as
//! interactive charts.

mod charts;
mod data;
mod gui;
mod money;

use eframe::egui;
use gui::SpendviewApp;
use tracing::info;

/// Initialize a default `tracing` subscriber, filterable via `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init();
}

fn main() -> eframe::Result<()> {
    init_tracing();
    info!("starting Spendview");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Spendview"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Spendview",
        options,
        Box::new(|cc| Ok(Box::new(SpendviewApp::new(cc)))),
    )
}
