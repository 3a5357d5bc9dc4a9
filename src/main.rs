#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use jadwal::cli::Cli;
use jadwal::config::Settings;
use jadwal::ui;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jadwal=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let settings = Settings::load(cli.overrides());

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1200.0, 900.0])
        .with_min_inner_size([480.0, 600.0])
        .with_title("Memuat jadwal ...");

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Jadwal",
        options,
        Box::new(move |cc| Ok(Box::new(ui::JadwalApp::new(cc, settings, cli.schedule_id)?))),
    )
}
