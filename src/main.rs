#![windows_subsystem = "windows"]
//! Jotter updater - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use eframe::egui;
use jotter_updater::app::App;
use jotter_updater::config::UpdateConfig;
use jotter_updater::constants::*;
use jotter_updater::settings::SettingsStore;
use std::path::PathBuf;
use tracing::info;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,jotter_updater=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME);

    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Jotter updater starting");

    let config = UpdateConfig::from_env();
    let store = SettingsStore::open(&data_dir);

    // Load saved window position/size
    let saved = store.settings().clone();
    let win_pos = match (saved.window_x, saved.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (saved.window_w, saved.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(720.0, 520.0)))
        .with_min_inner_size([560.0, 420.0])
        .with_title(APP_NAME);

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let app = App::new(cc, store, config)?;
            Ok(Box::new(app))
        }),
    )
}
