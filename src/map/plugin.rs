//! Walkers plugin for drawing the trace scene on the map
//!
//! Draws the scene each frame through the map painter: route polylines,
//! circle markers with translucent fill, and a popup anchored to the marker
//! the user last clicked. The scene itself is immutable; the only mutable
//! plugin state is the popup selection, shared with the application.

use std::sync::{Arc, RwLock};

use egui::{Shape, Stroke};
use walkers::{Plugin, Projector};

use crate::map::scene::{LatLon, MapScene, Marker, MarkerGroup, RouteLine};

/// The two marker layers a popup can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerLayer {
    Jitter,
    Idling,
}

/// Marker the popup is currently open for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSelection {
    pub layer: MarkerLayer,
    pub index: usize,
}

/// Plugin rendering the route and anomaly overlays.
pub struct OverlayPlugin {
    scene: Arc<MapScene>,
    selection: Arc<RwLock<Option<MarkerSelection>>>,
}

impl OverlayPlugin {
    pub fn new(scene: Arc<MapScene>, selection: Arc<RwLock<Option<MarkerSelection>>>) -> Self {
        Self { scene, selection }
    }

    fn project(projector: &Projector, position: LatLon) -> egui::Pos2 {
        let screen_vec = projector.project(walkers::lat_lon(position.lat, position.lon));
        egui::Pos2::new(screen_vec.x, screen_vec.y)
    }

    fn draw_route(line: &RouteLine, projector: &Projector, painter: &egui::Painter) {
        let screen_points: Vec<egui::Pos2> = line
            .points
            .iter()
            .map(|p| Self::project(projector, *p))
            .collect();

        if screen_points.len() >= 2 {
            painter.add(Shape::line(
                screen_points,
                Stroke::new(line.style.weight, line.style.color),
            ));
        }
    }

    fn draw_group(group: &MarkerGroup, projector: &Projector, painter: &egui::Painter) {
        for marker in &group.markers {
            let center = Self::project(projector, marker.position);
            painter.circle(
                center,
                group.style.radius,
                group.style.fill_color(),
                Stroke::new(2.0, group.style.color),
            );
        }
    }

    /// Marker under the pointer, topmost (idling over jitter, later over
    /// earlier) first, matching draw order.
    fn hit_test(&self, projector: &Projector, pointer: egui::Pos2) -> Option<MarkerSelection> {
        let layers = [
            (MarkerLayer::Idling, &self.scene.idling),
            (MarkerLayer::Jitter, &self.scene.jitter),
        ];
        for (layer, group) in layers {
            for (index, marker) in group.markers.iter().enumerate().rev() {
                let center = Self::project(projector, marker.position);
                // Small slack so the stroke ring is clickable too.
                if center.distance(pointer) <= group.style.radius + 2.0 {
                    return Some(MarkerSelection { layer, index });
                }
            }
        }
        None
    }

    fn selected_marker(&self, selection: MarkerSelection) -> Option<&Marker> {
        let group = match selection.layer {
            MarkerLayer::Jitter => &self.scene.jitter,
            MarkerLayer::Idling => &self.scene.idling,
        };
        group.markers.get(selection.index)
    }

    fn show_popup(&self, ui: &egui::Ui, projector: &Projector, selection: MarkerSelection) {
        let Some(marker) = self.selected_marker(selection) else {
            return;
        };
        let anchor = Self::project(projector, marker.position);

        egui::Area::new(egui::Id::new("trace_marker_popup"))
            .fixed_pos(anchor + egui::vec2(12.0, -12.0))
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(&marker.popup);
                });
            });
    }
}

impl Plugin for OverlayPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        let painter = ui.painter();

        // Draw order mirrors the upstream viewer: routes below, markers on
        // top, idling above jitter.
        if let Some(line) = &self.scene.raw_route {
            Self::draw_route(line, projector, painter);
        }
        if let Some(line) = &self.scene.cleaned_route {
            Self::draw_route(line, projector, painter);
        }
        Self::draw_group(&self.scene.jitter, projector, painter);
        Self::draw_group(&self.scene.idling, projector, painter);

        if response.clicked()
            && let Some(pointer) = response.interact_pointer_pos()
        {
            *self.selection.write().unwrap() = self.hit_test(projector, pointer);
        }

        let selection = *self.selection.read().unwrap();
        if let Some(selection) = selection {
            self.show_popup(ui, projector, selection);
        }
    }
}
