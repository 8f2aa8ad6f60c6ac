use clap::Parser;
use eframe::egui;

use sunmap::app::SunmapApp;
use sunmap::config::{Cli, DashboardConfig};

fn main() -> eframe::Result {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = DashboardConfig::from(&cli);
    log::info!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sunmap – Solar Irradiance Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(SunmapApp::new(config)))),
    )
}
