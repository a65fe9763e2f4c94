//! Viewport fitting
//!
//! Aggregates the bounds of everything the scene draws and solves the
//! Web-Mercator center/zoom that frames them with a fixed pixel padding.
//! When the scene has no usable geometry at all the fit falls back to the
//! default view silently; that is an expected degenerate case, not an error.

use geo::{Coord, Rect};

use crate::map::scene::{LatLon, MapScene};
use crate::map::style;

const TILE_SIZE: f64 = 256.0;

/// A map view: center position and slippy-map zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLon,
    pub zoom: f64,
}

/// The view shown before any data arrives and after a degenerate fit.
pub fn default_viewport() -> Viewport {
    Viewport {
        center: LatLon {
            lat: style::DEFAULT_CENTER.0,
            lon: style::DEFAULT_CENTER.1,
        },
        zoom: style::DEFAULT_ZOOM,
    }
}

/// Bounding rectangle over every coordinate the scene renders, as lon/lat
/// (`x = lon`, `y = lat`). `None` when nothing renderable exists.
pub fn scene_bounds(scene: &MapScene) -> Option<Rect<f64>> {
    let mut bounds: Option<Rect<f64>> = None;

    for line in [&scene.raw_route, &scene.cleaned_route].into_iter().flatten() {
        for point in &line.points {
            expand(&mut bounds, point);
        }
    }
    for group in [&scene.jitter, &scene.idling] {
        for marker in &group.markers {
            expand(&mut bounds, &marker.position);
        }
    }

    bounds
}

/// Fit the viewport to the scene with a fixed padding on each side.
///
/// `viewport_px` is the pixel size of the map widget. Degenerate scenes fall
/// back to [`default_viewport`]; a single-point scene zooms in close instead.
pub fn fit_viewport(scene: &MapScene, viewport_px: egui::Vec2, padding_px: f32) -> Viewport {
    let Some(bounds) = scene_bounds(scene) else {
        tracing::debug!("no renderable geometry, falling back to the default view");
        return default_viewport();
    };

    let (min_x, max_y) = mercator(&LatLon {
        lat: bounds.min().y,
        lon: bounds.min().x,
    });
    let (max_x, min_y) = mercator(&LatLon {
        lat: bounds.max().y,
        lon: bounds.max().x,
    });

    let center = LatLon {
        lat: mercator_y_to_lat((min_y + max_y) / 2.0),
        lon: (bounds.min().x + bounds.max().x) / 2.0,
    };

    // Zoom at which the mercator span fills the padded viewport exactly.
    let effective_w = (viewport_px.x as f64 - 2.0 * padding_px as f64).max(1.0);
    let effective_h = (viewport_px.y as f64 - 2.0 * padding_px as f64).max(1.0);
    let span_x = max_x - min_x;
    let span_y = max_y - min_y;

    let zoom_x = zoom_for(span_x, effective_w);
    let zoom_y = zoom_for(span_y, effective_h);
    let zoom = match zoom_x.min(zoom_y) {
        z if z.is_finite() => z.clamp(1.0, 19.0),
        _ => style::SINGLE_POINT_ZOOM,
    };

    Viewport { center, zoom }
}

fn expand(bounds: &mut Option<Rect<f64>>, point: &LatLon) {
    if !point.lat.is_finite() || !point.lon.is_finite() {
        return;
    }
    let c = Coord {
        x: point.lon,
        y: point.lat,
    };
    *bounds = Some(match bounds.take() {
        None => Rect::new(c, c),
        Some(r) => Rect::new(
            Coord {
                x: r.min().x.min(c.x),
                y: r.min().y.min(c.y),
            },
            Coord {
                x: r.max().x.max(c.x),
                y: r.max().y.max(c.y),
            },
        ),
    });
}

/// Largest zoom at which `span` (normalized world units) fits `pixels`.
/// Infinite for a zero span.
fn zoom_for(span: f64, pixels: f64) -> f64 {
    if span > 0.0 {
        (pixels / (TILE_SIZE * span)).log2()
    } else {
        f64::INFINITY
    }
}

/// Normalized Web-Mercator projection: world maps to the unit square, `y`
/// grows southwards.
fn mercator(point: &LatLon) -> (f64, f64) {
    let x = point.lon / 360.0 + 0.5;
    let lat_rad = point.lat.to_radians();
    let y = (1.0 - ((std::f64::consts::FRAC_PI_4 + lat_rad / 2.0).tan().ln()) / std::f64::consts::PI)
        / 2.0;
    (x, y)
}

fn mercator_y_to_lat(y: f64) -> f64 {
    (std::f64::consts::PI * (1.0 - 2.0 * y))
        .sinh()
        .atan()
        .to_degrees()
}
