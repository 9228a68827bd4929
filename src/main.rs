mod app;
mod ui;

use std::path::Path;

use anyhow::Context;
use app::BudgetDashboardApp;
use budget_dashboard::config::{DashboardConfig, CONFIG_FILE_NAME};
use budget_dashboard::state::AppState;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE_NAME))
        .context("loading dashboard configuration")?;
    let title = config.title.clone();

    let mut state = AppState::new(config);
    // A failed load is shown in the window; the error is already logged.
    if state.load().is_err() {
        log::warn!("Starting without data");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(BudgetDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}
