//! Destination records returned by the RATP API.
//!
//! These types map directly to the upstream JSON and are also the
//! payload we republish on the message bus, so they serialize back
//! to the same wire keys they were read from.

use serde::{Deserialize, Serialize};

/// A terminus reachable on a line, in one direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Terminus station name (e.g., "Pointe du Lac").
    #[serde(rename = "name")]
    pub station_name: String,

    /// Direction identifier ("A" or "R" on most lines).
    #[serde(rename = "way")]
    pub platform_id: String,
}

impl Destination {
    pub fn new(station_name: impl Into<String>, platform_id: impl Into<String>) -> Self {
        Self {
            station_name: station_name.into(),
            platform_id: platform_id.into(),
        }
    }
}

/// The `result` object of a destinations query.
///
/// Destinations keep the order the upstream API sent them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationResult {
    #[serde(default)]
    pub destinations: Vec<Destination>,
}

impl DestinationResult {
    /// The first destination, if any.
    pub fn first(&self) -> Option<&Destination> {
        self.destinations.first()
    }
}

/// Call descriptor attached to every upstream response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// The upstream call that produced the response (e.g., "GET /destinations/metros/8").
    #[serde(default)]
    pub call: String,

    /// Issue date as sent by the API (ISO 8601, not parsed).
    #[serde(default)]
    pub date: String,

    /// Upstream API version.
    #[serde(default)]
    pub version: f32,
}

/// Envelope returned by `GET /destinations/{type}/{line}`.
///
/// Either half may be missing upstream; it then comes through empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetAllDestinationsResponse {
    #[serde(default)]
    pub result: DestinationResult,

    #[serde(rename = "_metadata", default)]
    pub metadata: Metadata,
}

impl GetAllDestinationsResponse {
    /// Destinations in upstream order.
    pub fn destinations(&self) -> &[Destination] {
        &self.result.destinations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METROS_8: &str = include_str!("../../data/metros_8.json");

    #[test]
    fn deserialize_envelope() {
        let response: GetAllDestinationsResponse = serde_json::from_str(METROS_8).unwrap();

        assert_eq!(response.destinations().len(), 2);
        assert_eq!(
            response.result.first(),
            Some(&Destination::new("Pointe du Lac", "A"))
        );
        assert_eq!(response.destinations()[1].station_name, "Balard");
        assert_eq!(response.metadata.call, "GET /destinations/metros/8");
        assert_eq!(response.metadata.version, 4.0);
    }

    #[test]
    fn serialize_uses_wire_keys() {
        let response = GetAllDestinationsResponse {
            result: DestinationResult {
                destinations: vec![Destination::new("Gare de Lyon", "A")],
            },
            metadata: Metadata {
                call: "GET /destinations/rers/A".into(),
                date: "2020-04-18T14:02:11+02:00".into(),
                version: 4.0,
            },
        };

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["result"]["destinations"][0]["name"], "Gare de Lyon");
        assert_eq!(value["result"]["destinations"][0]["way"], "A");
        assert_eq!(value["_metadata"]["call"], "GET /destinations/rers/A");
        assert!(value.get("metadata").is_none());
        assert!(value["result"]["destinations"][0].get("station_name").is_none());
    }

    #[test]
    fn order_is_preserved() {
        let json = r#"{
            "result": {"destinations": [
                {"name": "C", "way": "A"},
                {"name": "A", "way": "R"},
                {"name": "B", "way": "A"}
            ]},
            "_metadata": {"call": "x", "date": "y", "version": 4}
        }"#;

        let response: GetAllDestinationsResponse = serde_json::from_str(json).unwrap();
        let names: Vec<_> = response
            .destinations()
            .iter()
            .map(|d| d.station_name.as_str())
            .collect();
        assert_eq!(names, ["C", "A", "B"]);
    }

    #[test]
    fn missing_metadata_fields_default() {
        let json = r#"{"result": {"destinations": []}, "_metadata": {}}"#;
        let response: GetAllDestinationsResponse = serde_json::from_str(json).unwrap();

        assert!(response.result.first().is_none());
        assert_eq!(response.metadata, Metadata::default());
    }

    #[test]
    fn missing_result_defaults_to_empty() {
        let json = r#"{"_metadata": {"call": "x", "date": "y", "version": 4}}"#;
        let response: GetAllDestinationsResponse = serde_json::from_str(json).unwrap();

        assert!(response.destinations().is_empty());
        assert_eq!(response.metadata.call, "x");
    }

    #[test]
    fn missing_metadata_defaults() {
        let json = r#"{"result": {"destinations": [{"name": "Balard", "way": "R"}]}}"#;
        let response: GetAllDestinationsResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.destinations()[0].station_name, "Balard");
        assert_eq!(response.metadata, Metadata::default());
    }

    #[test]
    fn non_object_body_is_an_error() {
        assert!(serde_json::from_str::<GetAllDestinationsResponse>("42").is_err());
        assert!(serde_json::from_str::<GetAllDestinationsResponse>("\"down\"").is_err());
    }
}
