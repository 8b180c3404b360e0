//! Spendview Main Application
//! Main window with control panel and dashboard view.

use crate::charts::SnapshotRenderer;
use crate::data::{DashboardPayload, PayloadLoader};
use crate::gui::{ControlPanel, ControlPanelAction, DashboardView};
use crate::money::DisplayCurrency;
use egui::SidePanel;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info, warn};

/// Snapshot export dimensions.
const EXPORT_WIDTH: u32 = 1200;
const EXPORT_HEIGHT: u32 = 900;

/// Payload loading result from background thread
enum LoadResult {
    Complete {
        payload: DashboardPayload,
        path: PathBuf,
    },
    Error(String),
}

/// Main application window.
pub struct SpendviewApp {
    loader: PayloadLoader,
    control_panel: ControlPanel,
    dashboard: DashboardView,

    // Async payload loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl SpendviewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            loader: PayloadLoader::new(),
            control_panel: ControlPanel::new(),
            dashboard: DashboardView::new(),
            load_rx: None,
            is_loading: false,
        };

        // A payload path on the command line loads before the first frame.
        if let Some(arg) = std::env::args().nth(1) {
            let path = PathBuf::from(arg);
            match app.loader.load_file(&path) {
                Ok(_) => {
                    app.control_panel.settings.payload_path = Some(path);
                    app.control_panel.export_enabled = true;
                    app.control_panel.set_progress(100.0, "Loaded export");
                }
                Err(e) => {
                    error!("could not load {}: {e}", path.display());
                    app.control_panel.set_progress(0.0, &format!("Error: {e}"));
                }
            }
        }

        app
    }

    /// Handle payload file selection - loads on a background thread.
    fn handle_browse_payload(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Dashboard exports", &["json"])
            .pick_file()
        {
            self.control_panel.settings.payload_path = Some(path.clone());
            self.control_panel.set_progress(0.0, "Loading export...");
            self.is_loading = true;

            let (tx, rx) = channel();
            self.load_rx = Some(rx);

            // Read and parse in a background thread
            thread::spawn(move || {
                let result = fs::read_to_string(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|text| PayloadLoader::parse(&text).map_err(|e| e.to_string()));

                match result {
                    Ok(payload) => {
                        let _ = tx.send(LoadResult::Complete { payload, path });
                    }
                    Err(e) => {
                        let _ = tx.send(LoadResult::Error(e));
                    }
                }
            });
        }
    }

    /// Check for payload loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Complete { payload, path } => {
                        // The trend section feeds both the line and bar charts.
                        let charts = usize::from(payload.trend.is_some()) * 2
                            + usize::from(payload.breakdown.is_some());

                        info!("payload loaded from {}", path.display());
                        self.loader.set_payload(payload, Some(path));
                        self.control_panel.export_enabled = true;
                        self.control_panel
                            .set_progress(100.0, &format!("Loaded. {charts} charts ready"));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(err) => {
                        error!("payload load failed: {err}");
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {err}"));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Load the built-in demo payload.
    fn handle_load_demo(&mut self) {
        self.loader.set_payload(DashboardPayload::demo(), None);
        self.control_panel.settings.payload_path = None;
        self.control_panel.export_enabled = true;
        self.control_panel.set_progress(100.0, "Loaded demo data");
    }

    /// Handle PNG export - render the dashboard to memory and write it out.
    fn handle_export_png(&mut self) {
        let Some(payload) = self.loader.payload() else {
            self.control_panel.set_progress(0.0, "No dashboard to export");
            return;
        };

        // Ask user for output location; name it after the source export.
        let default_name = self
            .loader
            .file_path()
            .and_then(|p| p.file_stem())
            .map(|stem| format!("{}_dashboard.png", stem.to_string_lossy()))
            .unwrap_or_else(|| "spendview_dashboard.png".to_string());

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name(default_name)
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        self.control_panel.set_progress(20.0, "Rendering snapshot...");

        let bytes =
            match SnapshotRenderer::render_dashboard_to_bytes(payload, EXPORT_WIDTH, EXPORT_HEIGHT)
            {
                Ok(bytes) => bytes,
                Err(e) => {
                    self.control_panel
                        .set_progress(0.0, &format!("Render error: {e}"));
                    return;
                }
            };

        self.control_panel.set_progress(70.0, "Writing PNG...");

        match fs::write(&output_path, bytes) {
            Ok(()) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Complete! Exported {}", output_path.display()),
                );
                if let Err(e) = open::that(&output_path) {
                    warn!("could not open exported snapshot: {e}");
                }
            }
            Err(e) => {
                self.control_panel
                    .set_progress(0.0, &format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for SpendviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowsePayload => self.handle_browse_payload(),
                        ControlPanelAction::LoadDemo => self.handle_load_demo(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            let display = DisplayCurrency::resolve(
                self.control_panel.settings.currency,
                self.loader.payload().and_then(|p| p.fx.as_ref()),
            );
            self.dashboard.show(ui, self.loader.payload(), display);
        });
    }
}
