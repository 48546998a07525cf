//! JSON-LD resource models.
//!
//! Field names follow the generated API's wire format; the `@`-prefixed
//! keywords are renamed onto plain Rust identifiers.

use serde::{Deserialize, Serialize};

/// The `@context` block resolving compact names to IRIs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(rename = "@vocab", skip_serializing_if = "Option::is_none")]
    pub vocab: Option<String>,
    #[serde(rename = "@base", skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Building {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(rename = "rdfs:label", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(rename = "rdfs:label", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(
        rename = "hasSubDevice",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub has_sub_device: Vec<Device>,
    #[serde(
        rename = "servesBuilding",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub serves_building: Vec<Building>,
    #[serde(
        rename = "associatedWithEvent",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub associated_with_event: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(rename = "rdfs:label", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(
        rename = "hasObservationTime",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub has_observation_time: Vec<String>,
    #[serde(rename = "hasValue", default, skip_serializing_if = "Vec::is_empty")]
    pub has_value: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn device_round_trips_jsonld_keywords() {
        let payload = json!({
            "@id": "device/meter-1",
            "@type": "Device",
            "rdfs:label": "Main energy meter",
            "hasSubDevice": [{ "@id": "device/meter-1-phase-a", "@type": "Device" }],
        });
        let device: Device = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(device.id.as_deref(), Some("device/meter-1"));
        assert_eq!(device.r#type.as_deref(), Some("Device"));
        assert_eq!(device.has_sub_device.len(), 1);

        assert_eq!(serde_json::to_value(&device).unwrap(), payload);
    }

    #[test]
    fn absent_collections_default_to_empty() {
        let device: Device = serde_json::from_value(json!({ "@id": "d" })).unwrap();
        assert!(device.has_sub_device.is_empty());
        assert!(device.serves_building.is_empty());
        assert!(device.associated_with_event.is_empty());
    }
}
