//! Map presentation
//!
//! Turns classified features into an immutable [`MapScene`], computes the
//! viewport that frames it, and draws both through a walkers plugin. The
//! scene and viewport are plain data so every stage is testable without a
//! live rendering surface.

pub mod plugin;
pub mod scene;
pub mod style;
pub mod viewport;

pub use plugin::{MarkerLayer, MarkerSelection, OverlayPlugin};
pub use scene::{LatLon, MalformedFeature, MapScene, build_scene};
pub use viewport::{Viewport, default_viewport, fit_viewport, scene_bounds};
