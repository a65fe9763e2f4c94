//! Map session
//!
//! One owned object for the whole pipeline run, constructed once at startup.
//! Each stage is a method over immutable data, so the pipeline is testable
//! without a live rendering surface; the only suspension point is the fetch
//! inside [`MapSession::acquire`].

use geojson::FeatureCollection;

use crate::data::{self, Classified, Result};
use crate::map::scene::{MapScene, build_scene};
use crate::map::viewport::{Viewport, fit_viewport};

/// Owns the data source and exposes the pipeline stages.
pub struct MapSession {
    data_url: String,
}

impl MapSession {
    pub fn new(data_url: impl Into<String>) -> Self {
        Self {
            data_url: data_url.into(),
        }
    }

    /// Stage 1: the single network read.
    pub async fn acquire(&self) -> Result<FeatureCollection> {
        data::fetch_processed(&self.data_url).await
    }

    /// Stage 2: partition features into display groups.
    pub fn classify(&self, collection: FeatureCollection) -> Classified {
        data::classify(collection)
    }

    /// Stage 3: build the immutable scene with styles, popups and fault
    /// diagnostics.
    pub fn render(&self, classified: &Classified) -> MapScene {
        build_scene(classified)
    }

    /// Stage 4: frame the scene. Pure; the caller supplies the real widget
    /// size once it is known.
    pub fn fit(&self, scene: &MapScene, viewport_px: egui::Vec2, padding_px: f32) -> Viewport {
        fit_viewport(scene, viewport_px, padding_px)
    }

    /// Run acquire -> classify -> render in order. Fitting is applied by the
    /// UI when the map size is known.
    pub async fn load(&self) -> Result<MapScene> {
        let collection = self.acquire().await?;
        let classified = self.classify(collection);
        let scene = self.render(&classified);

        tracing::info!(
            raw_route = scene.raw_route.is_some(),
            cleaned_route = scene.cleaned_route.is_some(),
            jitter = scene.jitter.markers.len(),
            idling = scene.idling.markers.len(),
            faults = scene.faults.len(),
            "trace scene ready"
        );
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::style;
    use geojson::{Feature, Geometry, Value};
    use serde_json::json;

    fn feature(geometry: Value, properties: serde_json::Value) -> Feature {
        let serde_json::Value::Object(properties) = properties else {
            panic!("properties fixture must be an object");
        };
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(geometry)),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    fn mixed_collection() -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: vec![
                feature(
                    Value::LineString(vec![vec![72.8, 19.0], vec![73.6, 19.4]]),
                    json!({"layer": "raw_route"}),
                ),
                feature(
                    Value::LineString(vec![vec![72.9, 19.05], vec![73.5, 19.35]]),
                    json!({"layer": "cleaned_route"}),
                ),
                feature(
                    Value::Point(vec![73.1, 19.2]),
                    json!({"type": "jitter", "id": "J1", "gpstime": "t1"}),
                ),
                feature(
                    Value::Point(vec![73.2, 19.25]),
                    json!({"type": "jitter", "id": "J2", "gpstime": "t2"}),
                ),
                feature(
                    Value::Point(vec![73.3, 19.3]),
                    json!({
                        "type": "idling", "duration_sec": 125.6,
                        "start_time": "s", "end_time": "e"
                    }),
                ),
            ],
            foreign_members: None,
        }
    }

    #[test]
    fn synchronous_stages_render_a_mixed_collection_end_to_end() {
        let session = MapSession::new("http://localhost/api/processed");

        let classified = session.classify(mixed_collection());
        let scene = session.render(&classified);
        let viewport = session.fit(&scene, egui::vec2(800.0, 600.0), style::FIT_PADDING_PX);

        assert!(scene.raw_route.is_some());
        assert!(scene.cleaned_route.is_some());
        assert_eq!(scene.jitter.markers.len(), 2);
        assert_eq!(scene.idling.markers.len(), 1);
        assert!(scene.faults.is_empty());

        // The fitted view centers inside the data extent, not on the
        // fallback.
        assert!(viewport.center.lon > 72.8 && viewport.center.lon < 73.6);
        assert!(viewport.center.lat > 19.0 && viewport.center.lat < 19.4);
        assert!(viewport.zoom > style::DEFAULT_ZOOM);
    }

    #[test]
    fn empty_collection_ends_at_the_default_view() {
        let session = MapSession::new("http://localhost/api/processed");

        let classified = session.classify(FeatureCollection {
            bbox: None,
            features: Vec::new(),
            foreign_members: None,
        });
        let scene = session.render(&classified);
        let viewport = session.fit(&scene, egui::vec2(800.0, 600.0), style::FIT_PADDING_PX);

        assert!(scene.is_empty());
        assert_eq!(viewport.center.lat, 20.0);
        assert_eq!(viewport.center.lon, 73.0);
        assert_eq!(viewport.zoom, 6.0);
    }
}
