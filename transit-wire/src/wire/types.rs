//! Transit API payload DTOs.
//!
//! These types map directly to the JSON the transit API sends. They use
//! `Option` liberally because the API omits fields rather than sending
//! nulls in many cases (and a null is treated the same as an omission).
//! Shape rules that span several fields, such as which variant owns which
//! field, are checked on the raw object before these are deserialized.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A number as sent on the wire. Some endpoints quote their numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberDto {
    Number(f64),
    Text(String),
}

/// A geographic point.
///
/// Accepts `latitude`/`longitude`, the `lat`/`lng` spellings, and a
/// `{"geographic": {...}}` wrapper around either.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoDto {
    #[serde(alias = "lat")]
    pub latitude: Option<NumberDto>,

    #[serde(alias = "lng", alias = "lon")]
    pub longitude: Option<NumberDto>,

    pub geographic: Option<Box<GeoDto>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoundsDto {
    pub maximum: GeoDto,
    pub minimum: GeoDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreetDto {
    pub key: u32,
    pub name: String,

    #[serde(rename = "type")]
    pub street_type: Option<String>,

    /// Full word or single letter
    pub leg: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressDto {
    pub key: u32,
    pub street: StreetDto,

    #[serde(rename = "street-number")]
    pub street_number: u32,

    pub centre: GeoDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonumentDto {
    pub key: u32,
    pub name: String,
    pub categories: Vec<String>,
    pub address: AddressDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntersectionDto {
    /// Composed from the two street keys, e.g. "1311-2265"
    pub key: String,
    pub street: StreetDto,

    #[serde(rename = "cross-street")]
    pub cross_street: StreetDto,

    pub centre: GeoDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopDto {
    pub key: u32,
    pub name: String,
    pub centre: Option<GeoDto>,
}

/// The payload of a tagged `point` location.
#[derive(Debug, Clone, Deserialize)]
pub struct PointDto {
    pub point: GeoDto,
}

/// Minutes per mode. Absent components are zero.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct DurationsDto {
    pub total: u32,
    pub walking: u32,
    pub waiting: u32,
    pub riding: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimesDto {
    /// Local time, e.g. "2024-03-15T10:30:00"
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,

    #[serde(default)]
    pub durations: DurationsDto,
}

/// A route key: numeric for most routes, named for rapid transit.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RouteKeyDto {
    Number(u32),
    Text(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassNamesDto {
    #[serde(rename = "class-name", default)]
    pub class_name: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BadgeStyleDto {
    #[serde(rename = "class-names", default)]
    pub class_names: ClassNamesDto,

    #[serde(rename = "background-color", default)]
    pub background_color: String,

    #[serde(rename = "border-color", default)]
    pub border_color: String,

    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantDto {
    pub key: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteDto {
    pub key: RouteKeyDto,

    /// Same as `key` when omitted
    pub number: Option<RouteKeyDto>,

    pub name: Option<String>,

    #[serde(rename = "customer-type")]
    pub customer_type: Option<String>,

    pub coverage: Option<String>,

    #[serde(rename = "badge-label")]
    pub badge_label: Option<RouteKeyDto>,

    #[serde(rename = "badge-style")]
    pub badge_style: Option<BadgeStyleDto>,

    pub variants: Option<Vec<VariantDto>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusDto {
    pub key: u32,

    #[serde(rename = "bike-rack", deserialize_with = "bool_or_string")]
    pub bike_rack: bool,

    #[serde(deserialize_with = "bool_or_string")]
    pub wifi: bool,
}

/// Fields of a walk segment. Trip stops stay raw: they are decoded by the
/// untagged location resolver, not by serde.
#[derive(Debug, Clone, Deserialize)]
pub struct WalkDto {
    pub bounds: Option<BoundsDto>,
    pub from: Option<Value>,
    pub times: TimesDto,
    pub to: Option<Value>,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RideDto {
    pub bounds: Option<BoundsDto>,
    pub times: TimesDto,
    pub bus: Option<BusDto>,
    pub route: RouteDto,
    pub variant: VariantDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferDto {
    pub bounds: Option<BoundsDto>,
    pub from: Value,
    pub to: Value,
}

/// A plan with its segments left raw, so each segment can fail on its own.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanDto {
    pub times: TimesDto,

    #[serde(default)]
    pub segments: Vec<Value>,
}

/// Response envelope of the trip-planner endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PlansEnvelope {
    #[serde(default)]
    pub plans: Vec<Value>,
}

/// Metres from a searched location, quoted by the stops endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DistancesDto {
    pub direct: NumberDto,
    pub walking: NumberDto,
}

/// A stop as served by the stops endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FullStopDto {
    pub key: u32,
    pub name: String,
    pub number: u32,
    pub distances: Option<DistancesDto>,
    pub direction: String,

    /// Absent for stops away from intersections
    pub side: Option<String>,

    pub street: StreetDto,

    #[serde(rename = "cross-street")]
    pub cross_street: StreetDto,

    pub centre: GeoDto,

    #[serde(rename = "internal-name")]
    pub internal_name: Option<String>,

    #[serde(rename = "sequence-on-street")]
    pub sequence_on_street: Option<u32>,

    #[serde(rename = "icon-style")]
    pub icon_style: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureDto {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PassingTimeDto {
    pub scheduled: NaiveDateTime,
    pub estimated: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScheduledTimesDto {
    pub arrival: Option<PassingTimeDto>,
    pub departure: Option<PassingTimeDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledStopDto {
    pub key: String,

    #[serde(default, deserialize_with = "bool_or_string")]
    pub cancelled: bool,

    #[serde(default)]
    pub times: ScheduledTimesDto,

    pub variant: VariantDto,
    pub bus: Option<BusDto>,
}

/// A route's passing buses, left raw so each can fail on its own.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteScheduleDto {
    pub route: RouteDto,

    #[serde(rename = "scheduled-stops", default)]
    pub scheduled_stops: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopScheduleDto {
    pub stop: FullStopDto,

    #[serde(rename = "route-schedules", default)]
    pub route_schedules: Vec<RouteScheduleDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAdvisoryDto {
    pub key: u32,

    /// 1 (very high) to 5 (very low)
    pub priority: u8,

    pub title: String,
    pub body: String,

    /// e.g. "Transit", "Handi-Transit", "All"
    pub category: String,

    #[serde(rename = "updated-at")]
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DestinationDto {
    pub key: u32,
    pub name: String,
}

/// Response envelopes of the list endpoints. Items stay raw so each one
/// succeeds or fails on its own.
#[derive(Debug, Clone, Deserialize)]
pub struct StopsEnvelope {
    #[serde(default)]
    pub stops: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopFeaturesEnvelope {
    #[serde(rename = "stop-features", default)]
    pub stop_features: Vec<FeatureDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAdvisoriesEnvelope {
    #[serde(rename = "service-advisories", default)]
    pub service_advisories: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DestinationsEnvelope {
    #[serde(default)]
    pub destinations: Vec<DestinationDto>,
}

/// Accept a JSON bool or the strings "true"/"false".
fn bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Text(s) => match s.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(serde::de::Error::custom(format!(
                "expected \"true\" or \"false\", got {s:?}"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_address() {
        let json = r#"{
            "key": 136590,
            "street": {"key": 2265, "name": "Portage Avenue", "type": "Avenue"},
            "street-number": 393,
            "centre": {
                "geographic": {"latitude": "49.89218", "longitude": "-97.14239"}
            }
        }"#;

        let address: AddressDto = serde_json::from_str(json).unwrap();

        assert_eq!(address.key, 136590);
        assert_eq!(address.street_number, 393);
        assert_eq!(address.street.street_type.as_deref(), Some("Avenue"));
        assert!(address.street.leg.is_none());
        assert!(address.centre.geographic.is_some());
    }

    #[test]
    fn deserialize_geo_aliases() {
        let geo: GeoDto = serde_json::from_str(r#"{"lat": 49.9, "lng": -97.1}"#).unwrap();
        assert!(matches!(geo.latitude, Some(NumberDto::Number(lat)) if lat == 49.9));
        assert!(matches!(geo.longitude, Some(NumberDto::Number(lon)) if lon == -97.1));
    }

    #[test]
    fn deserialize_bus_with_string_flags() {
        let json = r#"{"key": 921, "bike-rack": "true", "wifi": false}"#;
        let bus: BusDto = serde_json::from_str(json).unwrap();
        assert_eq!(bus.key, 921);
        assert!(bus.bike_rack);
        assert!(!bus.wifi);

        let json = r#"{"key": 921, "bike-rack": "maybe", "wifi": false}"#;
        assert!(serde_json::from_str::<BusDto>(json).is_err());
    }

    #[test]
    fn deserialize_route_with_named_key() {
        let json = r##"{
            "key": "BLUE",
            "number": "BLUE",
            "customer-type": "regular",
            "coverage": "rapid transit",
            "badge-label": "B",
            "badge-style": {
                "class-names": {"class-name": ["badge-label", "rapid-transit"]},
                "background-color": "#0060a9",
                "border-color": "#0060a9",
                "color": "#ffffff"
            },
            "variants": [{"key": "BLUE-1-U", "name": "BLUE to U of M"}]
        }"##;

        let route: RouteDto = serde_json::from_str(json).unwrap();

        assert!(matches!(route.key, RouteKeyDto::Text(ref s) if s == "BLUE"));
        assert_eq!(route.coverage.as_deref(), Some("rapid transit"));
        let style = route.badge_style.unwrap();
        assert_eq!(style.class_names.class_name.len(), 2);
        assert_eq!(style.background_color, "#0060a9");
        assert_eq!(route.variants.unwrap()[0].key, "BLUE-1-U");
    }

    #[test]
    fn deserialize_times_with_missing_durations() {
        let json = r#"{
            "start": "2024-03-15T10:30:00",
            "end": "2024-03-15T10:52:00",
            "durations": {"total": 22, "riding": 18}
        }"#;

        let times: TimesDto = serde_json::from_str(json).unwrap();

        assert_eq!(times.durations.total, 22);
        assert_eq!(times.durations.riding, 18);
        assert_eq!(times.durations.walking, 0);
        assert_eq!(times.durations.waiting, 0);
    }

    #[test]
    fn deserialize_plan_keeps_segments_raw() {
        let json = r#"{
            "times": {"start": "2024-03-15T10:30:00", "end": "2024-03-15T10:52:00"},
            "segments": [{"type": "walk"}, {"type": "hovercraft"}]
        }"#;

        let plan: PlanDto = serde_json::from_str(json).unwrap();

        assert_eq!(plan.segments.len(), 2);
        assert_eq!(plan.times.durations.total, 0);
    }
}
