//! Acquisition of the processed FeatureCollection
//!
//! Exactly one network read per pipeline run. No retries, no timeout: the
//! fetch either yields a parsed collection or a [`ViewerError`] that ends the
//! run before any rendering starts.

use geojson::{FeatureCollection, GeoJson};

use crate::data::{Result, ViewerError};

/// Perform the single GET of the processed-data endpoint and decode the body.
///
/// This is the only suspension point in the whole pipeline; everything after
/// it is synchronous.
pub async fn fetch_processed(url: &str) -> Result<FeatureCollection> {
    tracing::info!("fetching processed trace data from {url}");

    let response = reqwest::get(url).await?;
    let status = response.status().as_u16();
    let body = response.text().await?;

    decode_response(status, &body)
}

/// Decode an HTTP response into a FeatureCollection.
///
/// Pure function of status and body so the whole HTTP edge is testable
/// without a live endpoint. A non-success status wins over the body: the
/// upstream server answers non-200 precisely when no data has been produced
/// yet, whatever the body says.
pub fn decode_response(status: u16, body: &str) -> Result<FeatureCollection> {
    if !(200..300).contains(&status) {
        tracing::warn!("processed-data endpoint answered HTTP {status}");
        return Err(ViewerError::Unavailable { status });
    }

    let geojson: GeoJson = body.parse()?;
    let collection = FeatureCollection::try_from(geojson)?;

    tracing::info!("decoded {} features", collection.features.len());
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [73.0, 20.0] },
                "properties": { "type": "jitter", "id": "J1", "gpstime": "t" }
            }
        ]
    }"#;

    #[test]
    fn success_status_with_valid_body_decodes() {
        let collection = decode_response(200, MINIMAL_COLLECTION).unwrap();
        assert_eq!(collection.features.len(), 1);
    }

    #[test]
    fn non_success_status_is_unavailable() {
        let err = decode_response(404, MINIMAL_COLLECTION).unwrap_err();
        assert!(matches!(err, ViewerError::Unavailable { status: 404 }));
    }

    #[test]
    fn error_status_wins_over_error_body() {
        let err = decode_response(400, r#"{"error": "no data yet"}"#).unwrap_err();
        assert!(matches!(err, ViewerError::Unavailable { status: 400 }));
    }

    #[test]
    fn garbage_body_is_a_parse_error() {
        let err = decode_response(200, "not json at all").unwrap_err();
        assert!(matches!(err, ViewerError::Parse(_)));
    }

    #[test]
    fn non_collection_geojson_is_a_parse_error() {
        let feature = r#"{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
            "properties": {}
        }"#;
        let err = decode_response(200, feature).unwrap_err();
        assert!(matches!(err, ViewerError::Parse(_)));
    }
}
