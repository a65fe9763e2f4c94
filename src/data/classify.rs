//! Feature classification
//!
//! Partitions the flat feature list of the processed payload into the display
//! groups by the producer's property conventions: routes are tagged with
//! `properties.layer`, anomaly markers with `properties.type`. Classification
//! is permissive: a feature matching no tag is dropped silently, and geometry
//! is never inspected here (that is a rendering-time concern).

use geojson::{Feature, FeatureCollection};

/// Disjoint views over the feature collection, in collection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classified {
    /// First feature tagged `layer == "raw_route"`.
    pub raw_route: Option<Feature>,

    /// First feature tagged `layer == "cleaned_route"`.
    pub cleaned_route: Option<Feature>,

    /// All features tagged `type == "jitter"`.
    pub jitter: Vec<Feature>,

    /// All features tagged `type == "idling"`.
    pub idling: Vec<Feature>,
}

/// Split a collection into its display groups.
///
/// Deterministic: group order follows collection order, and when more than
/// one feature carries the same route tag the first one wins.
pub fn classify(collection: FeatureCollection) -> Classified {
    let mut classified = Classified::default();

    for feature in collection.features {
        match tag(&feature, "layer") {
            Some("raw_route") => {
                if classified.raw_route.is_none() {
                    classified.raw_route = Some(feature);
                } else {
                    tracing::debug!("ignoring duplicate raw_route feature");
                }
                continue;
            }
            Some("cleaned_route") => {
                if classified.cleaned_route.is_none() {
                    classified.cleaned_route = Some(feature);
                } else {
                    tracing::debug!("ignoring duplicate cleaned_route feature");
                }
                continue;
            }
            _ => {}
        }

        match tag(&feature, "type") {
            Some("jitter") => classified.jitter.push(feature),
            Some("idling") => classified.idling.push(feature),
            // Unmatched features are excluded, not an error.
            _ => {}
        }
    }

    classified
}

fn tag<'a>(feature: &'a Feature, key: &str) -> Option<&'a str> {
    feature.property(key).and_then(|value| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::{Geometry, Value};
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

    fn line(properties: serde_json::Value) -> Feature {
        feature(
            Value::LineString(vec![vec![73.0, 20.0], vec![73.1, 20.1]]),
            properties,
        )
    }

    fn point(lon: f64, lat: f64, properties: serde_json::Value) -> Feature {
        feature(Value::Point(vec![lon, lat]), properties)
    }

    fn collection(features: Vec<Feature>) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    fn mixed_collection() -> FeatureCollection {
        collection(vec![
            line(json!({"layer": "raw_route"})),
            line(json!({"layer": "cleaned_route"})),
            point(73.2, 20.2, json!({"type": "jitter", "id": "J1", "gpstime": "t1"})),
            point(73.3, 20.3, json!({"type": "jitter", "id": "J2", "gpstime": "t2"})),
            point(
                73.4,
                20.4,
                json!({"type": "idling", "duration_sec": 60.0, "start_time": "a", "end_time": "b"}),
            ),
            point(73.5, 20.5, json!({"note": "matches nothing"})),
        ])
    }

    #[test]
    fn every_tagged_feature_lands_in_exactly_one_group() {
        let classified = classify(mixed_collection());

        assert!(classified.raw_route.is_some());
        assert!(classified.cleaned_route.is_some());
        assert_eq!(classified.jitter.len(), 2);
        assert_eq!(classified.idling.len(), 1);

        // 5 tagged features in, 5 out across the groups.
        let total = classified.raw_route.iter().count()
            + classified.cleaned_route.iter().count()
            + classified.jitter.len()
            + classified.idling.len();
        assert_eq!(total, 5);
    }

    #[test]
    fn unmatched_features_are_silently_excluded() {
        let classified = classify(collection(vec![
            point(0.0, 0.0, json!({"note": "untagged"})),
            point(1.0, 1.0, json!({"layer": "something_else"})),
            point(2.0, 2.0, json!({"type": "unknown_kind"})),
        ]));

        assert_eq!(classified, Classified::default());
    }

    #[test]
    fn classification_is_deterministic() {
        let first = classify(mixed_collection());
        let second = classify(mixed_collection());

        assert_eq!(first, second);
        // Stable collection order within the sequence-valued groups.
        assert_eq!(first.jitter[0].property("id"), Some(&json!("J1")));
        assert_eq!(first.jitter[1].property("id"), Some(&json!("J2")));
    }

    #[test]
    fn first_route_tag_in_collection_order_wins() {
        let classified = classify(collection(vec![
            line(json!({"layer": "raw_route", "rank": "first"})),
            line(json!({"layer": "raw_route", "rank": "second"})),
            line(json!({"layer": "cleaned_route", "rank": "first"})),
            line(json!({"layer": "cleaned_route", "rank": "second"})),
        ]));

        assert_eq!(
            classified.raw_route.unwrap().property("rank"),
            Some(&json!("first"))
        );
        assert_eq!(
            classified.cleaned_route.unwrap().property("rank"),
            Some(&json!("first"))
        );
    }

    #[test]
    fn geometry_kind_does_not_affect_classification() {
        // A route tag on a Point still classifies as a route; the renderer
        // deals with the mismatch.
        let classified = classify(collection(vec![point(
            73.0,
            20.0,
            json!({"layer": "raw_route"}),
        )]));

        assert!(classified.raw_route.is_some());
    }

    #[test]
    fn empty_collection_classifies_to_empty_groups() {
        let classified = classify(collection(Vec::new()));

        assert!(classified.raw_route.is_none());
        assert!(classified.cleaned_route.is_none());
        assert!(classified.jitter.is_empty());
        assert!(classified.idling.is_empty());
    }
}
