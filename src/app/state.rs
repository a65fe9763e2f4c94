//! Application state management
//!
//! Tracks where the one-shot load pipeline stands and the bits of UI state
//! around it: the popup selection shared with the overlay plugin, the
//! deferred viewport fit, and the failure alert.

use std::sync::{Arc, RwLock};

use crate::map::plugin::MarkerSelection;
use crate::map::scene::MapScene;

/// Where the load pipeline currently stands.
pub enum LoadPhase {
    /// The fetch task is still running.
    Loading,
    /// Scene built and ready to draw.
    Ready(Arc<MapScene>),
    /// Acquisition failed; message for the alert window.
    Failed(String),
}

/// Main application state
pub struct AppState {
    /// Pipeline phase.
    pub phase: LoadPhase,

    /// Popup selection, written by the overlay plugin on click.
    pub selection: Arc<RwLock<Option<MarkerSelection>>>,

    /// Fit the viewport on the next frame, once the widget size is known.
    pub pending_fit: bool,

    /// Failure alert window is open.
    pub alert_open: bool,

    /// Diagnostics window is open.
    pub show_diagnostics: bool,

    /// How many failure notifications were raised. The contract is exactly
    /// one per run.
    notifications: u32,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Loading,
            selection: Arc::new(RwLock::new(None)),
            pending_fit: false,
            alert_open: false,
            show_diagnostics: false,
            notifications: 0,
        }
    }

    /// The scene, once ready.
    pub fn scene(&self) -> Option<&Arc<MapScene>> {
        match &self.phase {
            LoadPhase::Ready(scene) => Some(scene),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Loading)
    }

    /// Accept the built scene and schedule the viewport fit.
    pub fn scene_ready(&mut self, scene: MapScene) {
        self.show_diagnostics = !scene.faults.is_empty();
        self.phase = LoadPhase::Ready(Arc::new(scene));
        self.pending_fit = true;
    }

    /// Record the fatal acquisition failure and raise the alert once.
    pub fn load_failed(&mut self, message: String) {
        if matches!(self.phase, LoadPhase::Failed(_)) {
            return;
        }
        tracing::error!("failed to load processed data: {message}");
        self.phase = LoadPhase::Failed(message);
        self.alert_open = true;
        self.notifications += 1;
    }

    #[cfg(test)]
    pub fn notifications(&self) -> u32 {
        self.notifications
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Classified;
    use crate::map::scene::build_scene;

    #[test]
    fn failure_raises_the_alert_exactly_once() {
        let mut state = AppState::new();

        state.load_failed("no processed data available (HTTP 404)".into());
        state.load_failed("no processed data available (HTTP 404)".into());

        assert!(state.alert_open);
        assert_eq!(state.notifications(), 1);
        assert!(state.scene().is_none());
    }

    #[test]
    fn ready_scene_schedules_one_fit() {
        let mut state = AppState::new();
        assert!(!state.pending_fit);

        state.scene_ready(build_scene(&Classified::default()));

        assert!(state.pending_fit);
        assert!(state.scene().is_some());
        assert!(!state.alert_open);
        // No faults, so the diagnostics window stays closed.
        assert!(!state.show_diagnostics);
    }
}
