//! GeoJSON export of planned routes and itineraries.

use geo::{BoundingRect, Coord, LineString, Rect};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};

use crate::pipeline::{ItineraryLeg, PlannedRoute};
use crate::polyline::Waypoint;

fn rect_to_bbox(rect: Rect<f64>) -> Vec<f64> {
    vec![rect.min().x, rect.min().y, rect.max().x, rect.max().y]
}

fn position(point: Waypoint) -> JsonValue {
    JsonValue::from(vec![point.lon, point.lat])
}

/// A single leg as a `LineString` feature carrying its endpoints, length and
/// diagnostics as properties.
pub fn route_feature(from: Waypoint, to: Waypoint, planned: &PlannedRoute) -> Feature {
    let points = planned.route.points();
    let line = LineString::from(
        points
            .iter()
            .map(|p| Coord { x: p.lon, y: p.lat })
            .collect::<Vec<_>>(),
    );
    let coordinates = points.iter().map(|p| vec![p.lon, p.lat]).collect();

    let mut properties = JsonObject::new();
    properties.insert("from".to_string(), position(from));
    properties.insert("to".to_string(), position(to));
    properties.insert(
        "distance_km".to_string(),
        JsonValue::from(planned.route.length_m() / 1000.0),
    );
    if let Ok(diagnostics) = serde_json::to_value(&planned.diagnostics) {
        properties.insert("diagnostics".to_string(), diagnostics);
    }

    Feature {
        bbox: line.bounding_rect().map(rect_to_bbox),
        geometry: Some(Geometry::new(Value::LineString(coordinates))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn collection(features: Vec<Feature>) -> GeoJson {
    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// A planned leg as a one-feature collection.
pub fn route_to_geojson(from: Waypoint, to: Waypoint, planned: &PlannedRoute) -> GeoJson {
    collection(vec![route_feature(from, to, planned)])
}

/// Every leg of an itinerary. Failed legs become geometry-less features with
/// an `error` property so the collection keeps one feature per leg.
pub fn itinerary_to_geojson(legs: &[ItineraryLeg]) -> GeoJson {
    let features = legs
        .iter()
        .map(|leg| {
            let mut feature = match &leg.result {
                Ok(planned) => route_feature(leg.from, leg.to, planned),
                Err(err) => {
                    let mut properties = JsonObject::new();
                    properties.insert("from".to_string(), position(leg.from));
                    properties.insert("to".to_string(), position(leg.to));
                    properties.insert("error".to_string(), JsonValue::from(err.to_string()));
                    Feature {
                        bbox: None,
                        geometry: None,
                        id: None,
                        properties: Some(properties),
                        foreign_members: None,
                    }
                }
            };
            feature.set_property("leg", leg.index);
            feature
        })
        .collect();
    collection(features)
}
