#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use gps_trace_viewer::TraceViewerApp;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // The fetch task runs on this runtime; the UI thread only enters it so
    // that `tokio::spawn` works from the eframe callbacks.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();
    let _guard = runtime.enter();

    eframe::run_native(
        "GPS Trace Viewer",
        eframe::NativeOptions::default(),
        Box::new(|cc| Ok(Box::new(TraceViewerApp::new(cc)))),
    )
}
