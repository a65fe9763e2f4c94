//! Scene construction (the layer renderer)
//!
//! Builds an immutable [`MapScene`] out of the classified features: one
//! styled polyline per route, one marker group per anomaly category with the
//! popup text precomputed, and a diagnostic per tolerated data fault. GeoJSON
//! coordinates arrive as `[lon, lat]`; everything past this module is
//! latitude/longitude.

use geojson::{Feature, Value};

use crate::data::Classified;
use crate::map::style::{self, MarkerStyle, RouteStyle};

/// A position in mapping-engine order (latitude first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// A styled route polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLine {
    pub points: Vec<LatLon>,
    pub style: RouteStyle,
}

/// A circular marker with its popup text.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLon,
    pub popup: String,
}

/// One anomaly category as a single aggregatable unit. Always present on the
/// scene, possibly with zero markers.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGroup {
    pub style: MarkerStyle,
    pub markers: Vec<Marker>,
}

/// A tolerated data-quality fault. Never aborts the pipeline; collected so
/// the degradation is observable in the diagnostics panel.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedFeature {
    /// Display group the feature belonged to.
    pub group: &'static str,
    pub detail: String,
}

/// Everything the map draws, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub raw_route: Option<RouteLine>,
    pub cleaned_route: Option<RouteLine>,
    pub jitter: MarkerGroup,
    pub idling: MarkerGroup,
    pub faults: Vec<MalformedFeature>,
}

impl MapScene {
    /// True when nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.raw_route.is_none()
            && self.cleaned_route.is_none()
            && self.jitter.markers.is_empty()
            && self.idling.markers.is_empty()
    }
}

/// Build the scene for a classified collection.
///
/// Malformed features degrade gracefully: a route without a LineString or a
/// marker without a Point is skipped, and a marker missing popup properties
/// is rendered with placeholder text. Each case records a fault.
pub fn build_scene(classified: &Classified) -> MapScene {
    let mut faults = Vec::new();

    let raw_route = classified
        .raw_route
        .as_ref()
        .and_then(|f| route_line(f, "raw route", style::RAW_ROUTE, &mut faults));
    let cleaned_route = classified
        .cleaned_route
        .as_ref()
        .and_then(|f| route_line(f, "cleaned route", style::CLEANED_ROUTE, &mut faults));

    let jitter = MarkerGroup {
        style: style::JITTER,
        markers: classified
            .jitter
            .iter()
            .filter_map(|f| jitter_marker(f, &mut faults))
            .collect(),
    };
    let idling = MarkerGroup {
        style: style::IDLING,
        markers: classified
            .idling
            .iter()
            .filter_map(|f| idling_marker(f, &mut faults))
            .collect(),
    };

    for fault in &faults {
        tracing::warn!("{}: {}", fault.group, fault.detail);
    }

    MapScene {
        raw_route,
        cleaned_route,
        jitter,
        idling,
        faults,
    }
}

fn route_line(
    feature: &Feature,
    group: &'static str,
    style: RouteStyle,
    faults: &mut Vec<MalformedFeature>,
) -> Option<RouteLine> {
    let Some(Value::LineString(coordinates)) = feature.geometry.as_ref().map(|g| &g.value) else {
        faults.push(MalformedFeature {
            group,
            detail: "expected a LineString geometry".into(),
        });
        return None;
    };

    let points: Vec<LatLon> = coordinates.iter().filter_map(|c| lat_lon(c)).collect();
    if points.len() < coordinates.len() {
        faults.push(MalformedFeature {
            group,
            detail: format!(
                "dropped {} unusable coordinate(s)",
                coordinates.len() - points.len()
            ),
        });
    }

    Some(RouteLine { points, style })
}

fn jitter_marker(feature: &Feature, faults: &mut Vec<MalformedFeature>) -> Option<Marker> {
    let position = point_position(feature, "jitter", faults)?;

    let (id, id_ok) = text_property(feature, "id");
    let (gpstime, time_ok) = text_property(feature, "gpstime");
    if !id_ok || !time_ok {
        faults.push(MalformedFeature {
            group: "jitter",
            detail: "missing id or gpstime property".into(),
        });
    }

    Some(Marker {
        position,
        popup: format!("Jitter\nID: {id}\nTime: {gpstime}"),
    })
}

fn idling_marker(feature: &Feature, faults: &mut Vec<MalformedFeature>) -> Option<Marker> {
    let position = point_position(feature, "idling", faults)?;

    let duration = feature.property("duration_sec").and_then(|v| v.as_f64());
    let (start, start_ok) = text_property(feature, "start_time");
    let (end, end_ok) = text_property(feature, "end_time");
    if duration.is_none() || !start_ok || !end_ok {
        faults.push(MalformedFeature {
            group: "idling",
            detail: "missing duration_sec, start_time or end_time property".into(),
        });
    }

    // Rounded to the nearest whole second for display.
    let duration = match duration {
        Some(seconds) => format!("{seconds:.0}"),
        None => style::MISSING_TEXT.into(),
    };

    Some(Marker {
        position,
        popup: format!("Idling\n{duration} sec\n{start} \u{2192} {end}"),
    })
}

fn point_position(
    feature: &Feature,
    group: &'static str,
    faults: &mut Vec<MalformedFeature>,
) -> Option<LatLon> {
    let position = match feature.geometry.as_ref().map(|g| &g.value) {
        Some(Value::Point(coordinates)) => lat_lon(coordinates),
        _ => None,
    };

    if position.is_none() {
        faults.push(MalformedFeature {
            group,
            detail: "expected a Point geometry".into(),
        });
    }
    position
}

/// Swap a GeoJSON `[lon, lat]` position into [`LatLon`], rejecting anything
/// short or non-finite.
fn lat_lon(coordinates: &[f64]) -> Option<LatLon> {
    match coordinates {
        [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Some(LatLon {
            lat: *lat,
            lon: *lon,
        }),
        _ => None,
    }
}

/// Property as display text, with the placeholder (and `false`) when absent.
fn text_property(feature: &Feature, key: &str) -> (String, bool) {
    match feature.property(key) {
        Some(serde_json::Value::String(s)) => (s.clone(), true),
        Some(serde_json::Value::Null) | None => (style::MISSING_TEXT.into(), false),
        Some(other) => (other.to_string(), true),
    }
}
