//! Application module
//!
//! The eframe shell: full-screen walkers map with the trace overlays, the
//! failure alert and the diagnostics window. It starts the one-shot load
//! pipeline on construction and polls its result from `update`, so the UI
//! thread never blocks on the network.

pub(crate) mod settings;
mod state;
mod ui_panels;

use eframe::egui;
use tokio::sync::oneshot;
use walkers::{HttpTiles, Map, MapMemory, sources::OpenStreetMap};

use crate::data::Result;
use crate::map::plugin::OverlayPlugin;
use crate::map::scene::MapScene;
use crate::map::{style, viewport};
use crate::session::MapSession;

use crate::app::settings::Settings;
use crate::app::state::AppState;

const OSM_ATTRIBUTION: &str = "\u{a9} OpenStreetMap contributors";

/// Main application structure
pub struct TraceViewerApp {
    /// Pipeline phase, popup selection and window state.
    state: AppState,

    /// Map tiles provider (OpenStreetMap).
    tiles: HttpTiles,

    /// Map state (camera position, zoom, etc.)
    map_memory: MapMemory,

    /// Pending result of the one-shot fetch task.
    scene_rx: Option<oneshot::Receiver<Result<MapScene>>>,
}

impl TraceViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = Settings::from_cli();

        let tiles = HttpTiles::new(OpenStreetMap, cc.egui_ctx.clone());

        // Initial view, identical to the degenerate-fit fallback.
        let mut map_memory = MapMemory::default();
        let initial = viewport::default_viewport();
        map_memory.center_at(walkers::lat_lon(initial.center.lat, initial.center.lon));
        let _ = map_memory.set_zoom(initial.zoom);

        // Kick off the single load; the result comes back over a oneshot
        // channel polled from `update`.
        let (tx, rx) = oneshot::channel();
        let ctx = cc.egui_ctx.clone();
        let session = MapSession::new(settings.data_url);
        tokio::spawn(async move {
            let result = session.load().await;
            let _ = tx.send(result);
            ctx.request_repaint();
        });

        Self {
            state: AppState::new(),
            tiles,
            map_memory,
            scene_rx: Some(rx),
        }
    }

    /// Poll the fetch task without blocking the UI thread.
    fn poll_load(&mut self) {
        let Some(rx) = self.scene_rx.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(scene)) => {
                self.state.scene_ready(scene);
                self.scene_rx = None;
            }
            Ok(Err(err)) => {
                self.state.load_failed(err.to_string());
                self.scene_rx = None;
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                self.state.load_failed("data task ended unexpectedly".into());
                self.scene_rx = None;
            }
        }
    }

    /// Frame the loaded scene, falling back to the default view when it has
    /// no usable bounds.
    fn apply_fit(&mut self, viewport_px: egui::Vec2) {
        let Some(scene) = self.state.scene() else {
            return;
        };
        let fitted = viewport::fit_viewport(scene, viewport_px, style::FIT_PADDING_PX);
        self.map_memory
            .center_at(walkers::lat_lon(fitted.center.lat, fitted.center.lon));
        let _ = self.map_memory.set_zoom(fitted.zoom);

        tracing::debug!(
            "viewport fitted to ({:.4}, {:.4}) zoom {:.1}",
            fitted.center.lat,
            fitted.center.lon,
            fitted.zoom
        );
    }
}

impl eframe::App for TraceViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                // Fitting is deferred until here so the real widget size is
                // available for the padding computation.
                if self.state.pending_fit {
                    self.state.pending_fit = false;
                    self.apply_fit(ui.max_rect().size());
                }

                let overlay = self
                    .state
                    .scene()
                    .map(|scene| OverlayPlugin::new(scene.clone(), self.state.selection.clone()));

                let home = viewport::default_viewport().center;
                let map = Map::new(
                    Some(&mut self.tiles),
                    &mut self.map_memory,
                    walkers::lat_lon(home.lat, home.lon),
                );
                let map = match overlay {
                    Some(plugin) => map.with_plugin(plugin),
                    None => map,
                };
                ui.add(map);

                ui_panels::attribution(ui, OSM_ATTRIBUTION);
            });

        ui_panels::data_unavailable_alert(ctx, &mut self.state);
        ui_panels::diagnostics_panel(ctx, &mut self.state);

        if self.state.is_loading() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
