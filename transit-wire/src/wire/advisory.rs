//! Service advisory and destination codecs.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Destination, ServiceAdvisory};

use super::DecodeError;
use super::convert::{convert_destination, convert_service_advisory};
use super::types::{DestinationsEnvelope, ServiceAdvisoriesEnvelope, ServiceAdvisoryDto};

/// Decode a single service advisory.
pub fn decode_service_advisory(value: &Value) -> Result<ServiceAdvisory, DecodeError> {
    convert_service_advisory(ServiceAdvisoryDto::deserialize(value)?)
}

/// Decode a `{"service-advisories": [...]}` response, one result per advisory.
pub fn decode_service_advisories(
    value: &Value,
) -> Result<Vec<Result<ServiceAdvisory, DecodeError>>, DecodeError> {
    let envelope = ServiceAdvisoriesEnvelope::deserialize(value)?;
    Ok(envelope
        .service_advisories
        .iter()
        .map(decode_service_advisory)
        .collect())
}

/// Decode a `{"destinations": [...]}` response.
pub fn decode_destinations(value: &Value) -> Result<Vec<Destination>, DecodeError> {
    let envelope = DestinationsEnvelope::deserialize(value)?;
    Ok(envelope
        .destinations
        .into_iter()
        .map(convert_destination)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Priority};
    use serde_json::json;

    fn advisory_json() -> Value {
        json!({
            "key": 263,
            "priority": 2,
            "title": "Route 18 detour",
            "body": "Buses will detour via Princess Street.",
            "category": "Handi-Transit",
            "updated-at": "2024-03-15T08:00:00"
        })
    }

    #[test]
    fn decode_advisory() {
        let advisory = decode_service_advisory(&advisory_json()).unwrap();

        assert_eq!(advisory.key, 263);
        assert_eq!(advisory.priority, Priority::High);
        assert_eq!(advisory.category, Category::HandiTransit);
        assert_eq!(
            advisory.updated_at.format("%Y-%m-%d %H:%M").to_string(),
            "2024-03-15 08:00"
        );
    }

    #[test]
    fn decode_advisory_bad_values() {
        let mut value = advisory_json();
        value["priority"] = json!(7);
        assert_eq!(
            decode_service_advisory(&value),
            Err(DecodeError::MalformedPayload(
                "priority 7 is not in 1..=5".into()
            ))
        );

        let mut value = advisory_json();
        value["category"] = json!("Ferry");
        assert!(matches!(
            decode_service_advisory(&value),
            Err(DecodeError::MalformedPayload(_))
        ));

        let mut value = advisory_json();
        value.as_object_mut().unwrap().remove("updated-at");
        assert!(matches!(
            decode_service_advisory(&value),
            Err(DecodeError::MalformedPayload(_))
        ));
    }

    #[test]
    fn decode_advisories_isolates_failures() {
        let mut bad = advisory_json();
        bad["priority"] = json!(0);
        let value = json!({"service-advisories": [bad, advisory_json()]});

        let advisories = decode_service_advisories(&value).unwrap();
        assert_eq!(advisories.len(), 2);
        assert!(advisories[0].is_err());
        assert_eq!(advisories[1].as_ref().unwrap().key, 263);
    }

    #[test]
    fn decode_destination_list() {
        let value = json!({
            "destinations": [
                {"key": 2712, "name": "Legislative Building"},
                {"key": 1422, "name": "Polo Park"}
            ]
        });
        let destinations = decode_destinations(&value).unwrap();
        assert_eq!(destinations.len(), 2);
        assert_eq!(destinations[1].name, "Polo Park");

        assert!(decode_destinations(&json!({"destinations": [{"key": "x"}]})).is_err());
    }
}
