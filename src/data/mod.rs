//! Processed-trace payload handling
//!
//! This module owns the data side of the pipeline: the single fetch of the
//! processed GeoJSON payload and the classification of its features into the
//! display groups the map module renders.

mod classify;
mod fetch;

pub use classify::{Classified, classify};
pub use fetch::{decode_response, fetch_processed};

/// Errors that abort the pipeline run before anything is rendered.
///
/// All variants are the same class of failure from the user's point of view:
/// no processed data could be obtained. They are surfaced once as a blocking
/// notification and never retried.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("no processed data available (HTTP {status})")]
    Unavailable { status: u16 },

    #[error("failed to reach the processed-data endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("processed data is not a GeoJSON feature collection: {0}")]
    Parse(#[from] geojson::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
