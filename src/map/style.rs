//! Fixed visual encoding
//!
//! The colors, weights, radii and opacities are part of the interface: they
//! must match what the upstream pipeline's users already know from its web
//! viewer, so they are constants rather than settings.

use egui::Color32;

/// Stroke style of a route polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStyle {
    pub color: Color32,
    pub weight: f32,
}

/// Style of a circular anomaly marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub color: Color32,
    pub radius: f32,
    pub fill_opacity: f32,
}

impl MarkerStyle {
    /// Translucent fill derived from the stroke color.
    pub fn fill_color(&self) -> Color32 {
        Color32::from_rgba_unmultiplied(
            self.color.r(),
            self.color.g(),
            self.color.b(),
            (self.fill_opacity * 255.0) as u8,
        )
    }
}

/// Raw (pre-cleaning) route: dodger blue.
pub const RAW_ROUTE: RouteStyle = RouteStyle {
    color: Color32::from_rgb(0x1e, 0x90, 0xff),
    weight: 4.0,
};

/// Cleaned route: green.
pub const CLEANED_ROUTE: RouteStyle = RouteStyle {
    color: Color32::from_rgb(0x2e, 0xcc, 0x71),
    weight: 4.0,
};

/// Jitter anomaly markers: red.
pub const JITTER: MarkerStyle = MarkerStyle {
    color: Color32::from_rgb(0xe7, 0x4c, 0x3c),
    radius: 6.0,
    fill_opacity: 0.9,
};

/// Idling anomaly markers: yellow.
pub const IDLING: MarkerStyle = MarkerStyle {
    color: Color32::from_rgb(0xf1, 0xc4, 0x0f),
    radius: 7.0,
    fill_opacity: 0.8,
};

/// Default view, shown before any data arrives and whenever the data yields
/// no usable bounds. Latitude/longitude.
pub const DEFAULT_CENTER: (f64, f64) = (20.0, 73.0);
pub const DEFAULT_ZOOM: f64 = 6.0;

/// Padding kept between fitted data and each viewport edge.
pub const FIT_PADDING_PX: f32 = 20.0;

/// Zoom used when the data collapses to a single point: zoom in close rather
/// than fall back to the default view.
pub const SINGLE_POINT_ZOOM: f64 = 16.0;

/// Placeholder shown in popups for properties the producer failed to supply.
pub const MISSING_TEXT: &str = "unknown";
