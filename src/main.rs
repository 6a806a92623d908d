// Hide the console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod config;
mod gui;
mod keys;
mod marquee;
mod media;

use std::time::Duration;

use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::gui::RemoteApp;
use crate::keys::PlatformKeys;
use crate::media::{MediaMonitor, PlatformMedia};

// ========================================================================
// LOGGING
// ========================================================================
//    Console plus a non-blocking daily file under the platform data dir.
//    The guard must stay alive for the whole run or buffered lines are
//    dropped on exit.

fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = AppConfig::log_dir().and_then(|dir| {
        std::fs::create_dir_all(&dir).ok()?;
        Some(tracing_appender::rolling::daily(dir, "vremote.log"))
    });

    match file_appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .init();
            Some(guard)
        }
        None => {
            // No writable data dir, console only
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
            None
        }
    }
}

fn main() {
    let _log_guard = init_logging();

    tracing::info!("[Main] VRemote starting");

    let config = AppConfig::load();

    // Media monitor thread -> GUI. Small bound: the GUI drains every frame
    // and stale records are worthless anyway.
    let (tx, rx) = bounded(8);
    let monitor = PlatformMedia::new();
    monitor.start(tx, Duration::from_millis(config.poll_interval_ms));

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(config.window_size)
        .with_title("VRemote")
        .with_resizable(true);

    if let Some(pos) = config.window_position {
        viewport = viewport.with_position(pos);
    }

    // On top so the overlay capture always finds the window uncovered
    if config.always_on_top {
        viewport = viewport.with_always_on_top();
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    tracing::info!("[Main] Starting GUI");

    // Blocks until the window closes; the app saves its config in on_exit
    let result = eframe::run_native(
        "VRemote",
        options,
        Box::new(move |_cc| Ok(Box::new(RemoteApp::new(config, rx, PlatformKeys::new())))),
    );

    if let Err(e) = result {
        tracing::error!("[Main] GUI error: {e}");
    }

    // The monitor thread notices the dropped receiver on its next send and
    // exits on its own
    tracing::info!("[Main] Shutdown complete");
}
