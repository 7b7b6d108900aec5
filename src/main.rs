//! Streaming History Dashboard
//!
//! A GUI application for exploring a personal music-streaming history.

use anyhow::Context;
use eframe::egui;

use streamstats::{Dashboard, DashboardConfig, Dataset, StreamStatsApp};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load().context("Failed to load configuration")?;
    let dataset = Dataset::load(&config.data_path, &config)
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;
    let dashboard = Dashboard::new(dataset, config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("My Spotify Streaming Data"),
        ..Default::default()
    };

    eframe::run_native(
        "My Spotify Streaming Data",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(egui::FontDefinitions::default());
            Ok(Box::new(StreamStatsApp::new(dashboard)) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| anyhow::anyhow!("Error running application: {}", e))
}
