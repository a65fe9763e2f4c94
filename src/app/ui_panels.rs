//! UI panels for the application
//!
//! The windows around the map: the blocking alert shown when no processed
//! data could be loaded, and the diagnostics window listing tolerated data
//! faults.

use egui::RichText;

use crate::app::state::{AppState, LoadPhase};

/// Blocking alert for the fatal acquisition failure.
pub fn data_unavailable_alert(ctx: &egui::Context, state: &mut AppState) {
    if !state.alert_open {
        return;
    }
    let LoadPhase::Failed(message) = &state.phase else {
        return;
    };
    let message = message.clone();

    egui::Window::new("No processed data")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label("Failed to load processed data.");
            ui.label("Go back and upload a JSON file first.");
            ui.add_space(8.0);
            ui.label(RichText::new(message).small().weak());
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                state.alert_open = false;
            }
        });
}

/// Window listing the malformed features that were tolerated while building
/// the scene.
pub fn diagnostics_panel(ctx: &egui::Context, state: &mut AppState) {
    let Some(scene) = state.scene().cloned() else {
        return;
    };
    if scene.faults.is_empty() {
        return;
    }

    egui::Window::new("Data quality")
        .open(&mut state.show_diagnostics)
        .resizable(true)
        .default_width(320.0)
        .show(ctx, |ui| {
            ui.label(format!(
                "{} feature(s) were malformed and rendered degraded:",
                scene.faults.len()
            ));
            ui.add_space(4.0);
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                for fault in &scene.faults {
                    ui.label(
                        RichText::new(format!("\u{2022} {}: {}", fault.group, fault.detail))
                            .small(),
                    );
                }
            });
        });
}

/// Tile attribution, painted over the map edge.
pub fn attribution(ui: &egui::Ui, text: &str) {
    let painter = ui.painter();
    let screen_rect = ui.max_rect();
    painter.text(
        screen_rect.center_bottom() + egui::vec2(0.0, -5.0),
        egui::Align2::CENTER_BOTTOM,
        text,
        egui::FontId::proportional(10.0),
        egui::Color32::from_black_alpha(180),
    );
}
