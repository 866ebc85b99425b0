//! Transit API wire codecs.
//!
//! This module converts between JSON payloads and the domain types.
//! Decoding goes through DTOs that mirror the payloads (`types`), checked
//! for shape first and then converted into validated domain values
//! (`convert`). Encoding builds JSON directly from the domain values, so it
//! cannot fail. Stops, schedules, advisories and destinations are only
//! ever received, so they have decoders alone.
//!
//! Key characteristics of the transit API:
//! - Different endpoint families use different conventions for the same
//!   polymorphic entity: the locations endpoint tags with a `type` field,
//!   the trip planner keys by variant name
//! - Wire keys are hyphenated (`street-number`, `cross-street`)
//! - Coordinates are sometimes sent as strings

mod advisory;
mod convert;
mod error;
mod location;
mod segment;
mod stop;
mod types;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::GeoLocation;

pub use advisory::{decode_destinations, decode_service_advisories, decode_service_advisory};
pub use error::{DecodeError, FieldProblem};
pub use location::{decode_tagged, decode_untagged, encode_tagged, encode_untagged};
pub use segment::{
    decode_plan, decode_plan_lenient, decode_plans, decode_segment, decode_trip_stop,
    encode_plan, encode_segment, encode_trip_stop, LenientPlan,
};
pub use stop::{decode_stop, decode_stop_features, decode_stop_schedule, decode_stops};

/// Parse raw bytes into a JSON value.
pub fn parse(bytes: &[u8]) -> Result<Value, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decode a geographic location.
///
/// # Examples
///
/// ```
/// use transit_wire::wire;
///
/// let value = serde_json::json!({"latitude": "49.8954", "longitude": "-97.1385"});
/// let geo = wire::decode_geo(&value).unwrap();
/// assert_eq!(geo.latitude(), 49.8954);
/// ```
pub fn decode_geo(value: &Value) -> Result<GeoLocation, DecodeError> {
    convert::convert_geo(types::GeoDto::deserialize(value)?)
}

/// Encode a geographic location as numeric `latitude`/`longitude`.
pub fn encode_geo(geo: &GeoLocation) -> Value {
    Value::Object(geo_fields(geo))
}

fn geo_fields(geo: &GeoLocation) -> Map<String, Value> {
    Map::from_iter([
        ("latitude".to_string(), Value::from(geo.latitude())),
        ("longitude".to_string(), Value::from(geo.longitude())),
    ])
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, DecodeError> {
    value
        .as_object()
        .ok_or_else(|| DecodeError::MalformedPayload(format!("expected an object, got {value}")))
}

/// A field counts as present only when it holds something other than null.
fn populated(obj: &Map<String, Value>, field: &str) -> bool {
    obj.get(field).is_some_and(|v| !v.is_null())
}
