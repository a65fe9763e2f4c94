//! GPS Trace Viewer - Application Library
//!
//! Renders the output of an external GPS-trace cleaning pipeline on an
//! interactive map: the raw route, the cleaned route and two classes of
//! anomaly markers (signal jitter, idling stops), auto-framed to the data.
//!
//! The pipeline is a single linear run per process:
//! acquire (`data::fetch`) -> classify (`data::classify`) -> render
//! (`map::scene`) -> fit (`map::viewport`), orchestrated by [`MapSession`]
//! and drawn by the eframe application shell.

mod app;
pub mod data;
pub mod map;
pub mod session;

pub use app::TraceViewerApp;
pub use session::MapSession;
