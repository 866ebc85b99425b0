//! Location codecs for both wire conventions.
//!
//! Tagged objects carry a `type` discriminant with the payload fields
//! flattened alongside it:
//!
//! ```json
//! {"type": "stop", "key": 10064, "name": "Portage at Main"}
//! ```
//!
//! Untagged objects hold the payload under a key naming the kind, and the
//! kind is inferred from which key is present:
//!
//! ```json
//! {"Stop": {"key": 10064, "name": "Portage at Main"}}
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{Address, Intersection, Location, LocationKind, Monument, StopRef, Street};

use super::convert::{
    convert_address, convert_geo, convert_intersection, convert_monument, convert_stop,
};
use super::types::{AddressDto, GeoDto, IntersectionDto, MonumentDto, PointDto, StopDto};
use super::{DecodeError, FieldProblem, as_object, encode_geo, geo_fields, populated};

/// Every payload field of any tagged location kind.
const LOCATION_FIELDS: [&str; 9] = [
    "key",
    "street",
    "street-number",
    "centre",
    "name",
    "categories",
    "address",
    "cross-street",
    "point",
];

/// Required and optional payload fields of a tagged location kind.
fn owned_fields(kind: LocationKind) -> (&'static [&'static str], &'static [&'static str]) {
    match kind {
        LocationKind::Address => (&["key", "street", "street-number", "centre"], &[]),
        LocationKind::Monument => (&["key", "name", "categories", "address"], &[]),
        LocationKind::Intersection => (&["key", "street", "cross-street", "centre"], &[]),
        LocationKind::Point => (&["point"], &[]),
        LocationKind::Stop => (&["key", "name"], &["centre"]),
    }
}

fn check_owned_fields(obj: &Map<String, Value>, kind: LocationKind) -> Result<(), DecodeError> {
    let (required, optional) = owned_fields(kind);

    if let Some(field) = required.iter().copied().find(|field| !populated(obj, field)) {
        return Err(DecodeError::FieldMismatch {
            kind,
            field,
            problem: FieldProblem::Missing,
        });
    }

    let foreign = LOCATION_FIELDS
        .into_iter()
        .filter(|field| !required.contains(field) && !optional.contains(field))
        .find(|field| populated(obj, field));
    if let Some(field) = foreign {
        return Err(DecodeError::FieldMismatch {
            kind,
            field,
            problem: FieldProblem::Unexpected,
        });
    }

    Ok(())
}

/// Decode a location from the tagged convention.
///
/// Fields belonging to the declared kind must all be present, and fields
/// belonging to other kinds must be absent. Keys that belong to no kind
/// are ignored.
pub fn decode_tagged(value: &Value) -> Result<Location, DecodeError> {
    let obj = as_object(value)?;

    let tag = match obj.get("type") {
        None | Some(Value::Null) => {
            return Err(DecodeError::MalformedPayload(
                "tagged location has no `type`".into(),
            ));
        }
        Some(Value::String(tag)) => tag,
        Some(other) => {
            return Err(DecodeError::MalformedPayload(format!(
                "location `type` must be a string, got {other}"
            )));
        }
    };
    let kind = LocationKind::from_tag(tag).ok_or_else(|| DecodeError::UnknownVariant(tag.clone()))?;

    check_owned_fields(obj, kind)?;

    match kind {
        LocationKind::Point => {
            let dto = PointDto::deserialize(value)?;
            Ok(Location::Point(convert_geo(dto.point)?))
        }
        _ => decode_payload(kind, value),
    }
}

/// Returns the populated variant keys of an untagged object for one kind.
///
/// The capitalized key is canonical; the lowercase spelling is what the
/// trip planner sends.
fn variant_keys<'a>(
    obj: &'a Map<String, Value>,
    kind: LocationKind,
) -> impl Iterator<Item = (&'static str, &'a Value)> {
    [kind.key_name(), kind.tag()]
        .into_iter()
        .filter_map(move |key| obj.get(key).filter(|v| !v.is_null()).map(|v| (key, v)))
}

/// Decode a location from the untagged convention.
///
/// Each kind is tried in canonical order against the object's keys. The
/// object must match exactly one, and the variant key must stand alone: a
/// `type` tag or a flattened location field next to it is rejected, since
/// the object then reads as a tagged location too.
pub fn decode_untagged(value: &Value) -> Result<Location, DecodeError> {
    let obj = as_object(value)?;

    let matched: Vec<(LocationKind, &'static str, &Value)> = LocationKind::ALL
        .into_iter()
        .flat_map(|kind| variant_keys(obj, kind).map(move |(key, v)| (kind, key, v)))
        .collect();

    match matched.as_slice() {
        [] => Err(DecodeError::NoVariantMatched),
        [(kind, key, payload)] => {
            let sibling = std::iter::once("type")
                .chain(LOCATION_FIELDS)
                .filter(|field| *field != *key)
                .find(|field| populated(obj, field));
            if let Some(field) = sibling {
                return Err(DecodeError::FieldMismatch {
                    kind: *kind,
                    field,
                    problem: FieldProblem::Unexpected,
                });
            }
            decode_payload(*kind, payload)
        }
        many => Err(DecodeError::AmbiguousVariant(
            many.iter().map(|(_, key, _)| key.to_string()).collect(),
        )),
    }
}

/// Decode a bare payload of a known kind. A point's payload is the
/// geographic location itself.
fn decode_payload(kind: LocationKind, payload: &Value) -> Result<Location, DecodeError> {
    Ok(match kind {
        LocationKind::Address => Location::Address(convert_address(AddressDto::deserialize(payload)?)?),
        LocationKind::Monument => {
            Location::Monument(convert_monument(MonumentDto::deserialize(payload)?)?)
        }
        LocationKind::Intersection => {
            Location::Intersection(convert_intersection(IntersectionDto::deserialize(payload)?)?)
        }
        LocationKind::Point => Location::Point(convert_geo(GeoDto::deserialize(payload)?)?),
        LocationKind::Stop => Location::Stop(convert_stop(StopDto::deserialize(payload)?)?),
    })
}

/// Encode a location in the tagged convention.
pub fn encode_tagged(location: &Location) -> Value {
    let mut fields = match location {
        Location::Point(point) => Map::from_iter([("point".to_string(), encode_geo(point))]),
        other => payload_fields(other),
    };
    fields.insert("type".into(), Value::from(location.kind().tag()));
    Value::Object(fields)
}

/// Encode a location in the untagged convention, under its capitalized key.
pub fn encode_untagged(location: &Location) -> Value {
    let payload = Value::Object(payload_fields(location));
    Value::Object(Map::from_iter([(
        location.kind().key_name().to_string(),
        payload,
    )]))
}

fn payload_fields(location: &Location) -> Map<String, Value> {
    match location {
        Location::Address(address) => address_fields(address),
        Location::Monument(monument) => monument_fields(monument),
        Location::Intersection(intersection) => intersection_fields(intersection),
        Location::Point(point) => geo_fields(point),
        Location::Stop(stop) => stop_fields(stop),
    }
}

fn encode_street(street: &Street) -> Value {
    let mut fields = Map::from_iter([
        ("key".to_string(), Value::from(street.key)),
        ("name".to_string(), Value::from(street.name.as_str())),
    ]);
    if let Some(street_type) = &street.street_type {
        fields.insert("type".into(), Value::from(street_type.as_str()));
    }
    if let Some(leg) = street.leg {
        fields.insert("leg".into(), Value::from(leg.as_str()));
    }
    Value::Object(fields)
}

fn address_fields(address: &Address) -> Map<String, Value> {
    Map::from_iter([
        ("key".to_string(), Value::from(address.key)),
        ("street".to_string(), encode_street(&address.street)),
        ("street-number".to_string(), Value::from(address.street_number)),
        ("centre".to_string(), encode_geo(&address.centre)),
    ])
}

fn monument_fields(monument: &Monument) -> Map<String, Value> {
    Map::from_iter([
        ("key".to_string(), Value::from(monument.key)),
        ("name".to_string(), Value::from(monument.name.as_str())),
        (
            "categories".to_string(),
            Value::from(monument.categories.clone()),
        ),
        (
            "address".to_string(),
            Value::Object(address_fields(&monument.address)),
        ),
    ])
}

fn intersection_fields(intersection: &Intersection) -> Map<String, Value> {
    Map::from_iter([
        ("key".to_string(), Value::from(intersection.key.as_str())),
        ("street".to_string(), encode_street(&intersection.street)),
        (
            "cross-street".to_string(),
            encode_street(&intersection.cross_street),
        ),
        ("centre".to_string(), encode_geo(&intersection.centre)),
    ])
}

pub(super) fn stop_fields(stop: &StopRef) -> Map<String, Value> {
    let mut fields = Map::from_iter([
        ("key".to_string(), Value::from(stop.key)),
        ("name".to_string(), Value::from(stop.name.as_str())),
    ]);
    if let Some(centre) = &stop.centre {
        fields.insert("centre".into(), encode_geo(centre));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoLocation, StreetLeg};
    use serde_json::json;

    fn geo(lat: f64, lon: f64) -> GeoLocation {
        GeoLocation::new(lat, lon).unwrap()
    }

    fn address() -> Address {
        Address {
            key: 136590,
            street: Street::new(2265, "Portage Avenue").with_type("Avenue"),
            street_number: 393,
            centre: geo(49.89218, -97.14239),
        }
    }

    #[test]
    fn decode_tagged_address() {
        // A tagged address decodes; without `type` it is no untagged location either
        let tagged = json!({
            "type": "address",
            "key": 136590,
            "street": {"key": 2265, "name": "Portage Avenue", "type": "Avenue"},
            "street-number": 393,
            "centre": {"latitude": "49.89218", "longitude": "-97.14239"}
        });

        let location = decode_tagged(&tagged).unwrap();
        assert_eq!(location, Location::Address(address()));

        let mut untyped = tagged.clone();
        untyped.as_object_mut().unwrap().remove("type");
        assert_eq!(decode_untagged(&untyped), Err(DecodeError::NoVariantMatched));
    }

    #[test]
    fn decode_tagged_without_type() {
        let value = json!({"key": 10064, "name": "Portage at Main"});
        assert!(matches!(
            decode_tagged(&value),
            Err(DecodeError::MalformedPayload(_))
        ));

        let value = json!({"type": null, "key": 10064, "name": "Portage at Main"});
        assert!(matches!(
            decode_tagged(&value),
            Err(DecodeError::MalformedPayload(_))
        ));
    }

    #[test]
    fn decode_tagged_unknown_type() {
        let value = json!({"type": "station", "key": 10064});
        assert_eq!(
            decode_tagged(&value),
            Err(DecodeError::UnknownVariant("station".into()))
        );
    }

    #[test]
    fn decode_tagged_foreign_field() {
        let value = json!({
            "type": "point",
            "point": {"latitude": 49.9, "longitude": -97.1},
            "street": {"key": 2265, "name": "Portage Avenue"}
        });
        assert_eq!(
            decode_tagged(&value),
            Err(DecodeError::FieldMismatch {
                kind: LocationKind::Point,
                field: "street",
                problem: FieldProblem::Unexpected,
            })
        );
    }

    #[test]
    fn decode_tagged_missing_field() {
        let value = json!({
            "type": "intersection",
            "key": "1311-2265",
            "street": {"key": 2265, "name": "Portage Avenue"},
            "centre": {"latitude": 49.8955, "longitude": -97.1381}
        });
        assert_eq!(
            decode_tagged(&value),
            Err(DecodeError::FieldMismatch {
                kind: LocationKind::Intersection,
                field: "cross-street",
                problem: FieldProblem::Missing,
            })
        );
    }

    #[test]
    fn decode_tagged_null_counts_as_absent() {
        let value = json!({
            "type": "stop",
            "key": 10064,
            "name": "Portage at Main",
            "centre": null,
            "street": null,
            "distances": {"direct": 120}
        });
        let location = decode_tagged(&value).unwrap();
        assert_eq!(
            location,
            Location::Stop(StopRef {
                key: 10064,
                name: "Portage at Main".into(),
                centre: None,
            })
        );
    }

    #[test]
    fn decode_tagged_bad_values() {
        // Intersection keys are strings, address keys are integers
        let value = json!({
            "type": "address",
            "key": "136590",
            "street": {"key": 2265, "name": "Portage Avenue"},
            "street-number": 393,
            "centre": {"latitude": 49.9, "longitude": -97.1}
        });
        assert!(matches!(
            decode_tagged(&value),
            Err(DecodeError::MalformedPayload(_))
        ));

        let value = json!({"type": "point", "point": {"latitude": 95.0, "longitude": -97.1}});
        assert!(matches!(
            decode_tagged(&value),
            Err(DecodeError::MalformedPayload(_))
        ));
    }

    #[test]
    fn decode_untagged_each_spelling() {
        let canonical = json!({"Point": {"latitude": 49.86917, "longitude": -97.1391}});
        let lowercase = json!({"point": {"latitude": 49.86917, "longitude": -97.1391}});

        let expected = Location::Point(geo(49.86917, -97.1391));
        assert_eq!(decode_untagged(&canonical).unwrap(), expected);
        assert_eq!(decode_untagged(&lowercase).unwrap(), expected);
    }

    #[test]
    fn decode_untagged_ambiguous() {
        let value = json!({
            "Point": {"latitude": 49.9, "longitude": -97.1},
            "Stop": {"key": 10064, "name": "Portage at Main"}
        });
        assert_eq!(
            decode_untagged(&value),
            Err(DecodeError::AmbiguousVariant(vec!["Point".into(), "Stop".into()]))
        );

        // Two spellings of the same kind are just as ambiguous
        let value = json!({
            "Stop": {"key": 10064, "name": "Portage at Main"},
            "stop": {"key": 10064, "name": "Portage at Main"}
        });
        assert!(matches!(
            decode_untagged(&value),
            Err(DecodeError::AmbiguousVariant(keys)) if keys.len() == 2
        ));
    }

    #[test]
    fn decode_untagged_rejects_tagged_objects() {
        // A tagged monument carries a lowercase `address` field
        let monument = Location::Monument(Monument {
            key: 2712,
            name: "Legislative Building".into(),
            categories: vec!["Landmark".into()],
            address: address(),
        });
        assert_eq!(
            decode_untagged(&encode_tagged(&monument)),
            Err(DecodeError::FieldMismatch {
                kind: LocationKind::Address,
                field: "type",
                problem: FieldProblem::Unexpected,
            })
        );

        let value = json!({
            "Stop": {"key": 10064, "name": "Portage at Main"},
            "street-number": 4
        });
        assert_eq!(
            decode_untagged(&value),
            Err(DecodeError::FieldMismatch {
                kind: LocationKind::Stop,
                field: "street-number",
                problem: FieldProblem::Unexpected,
            })
        );
    }

    #[test]
    fn decode_untagged_ignores_unrelated_keys() {
        let value = json!({
            "point": {"latitude": 49.9, "longitude": -97.1},
            "type": null,
            "walking-distance": 120
        });
        assert_eq!(
            decode_untagged(&value).unwrap(),
            Location::Point(geo(49.9, -97.1))
        );
    }

    #[test]
    fn decode_untagged_ignores_null_keys() {
        let value = json!({
            "Address": null,
            "Stop": {"key": 10064, "name": "Portage at Main"}
        });
        assert!(matches!(decode_untagged(&value), Ok(Location::Stop(_))));
    }

    #[test]
    fn decode_non_object() {
        assert!(matches!(
            decode_untagged(&json!([1, 2])),
            Err(DecodeError::MalformedPayload(_))
        ));
        assert!(matches!(
            decode_tagged(&json!("address")),
            Err(DecodeError::MalformedPayload(_))
        ));
    }

    #[test]
    fn encode_tagged_point() {
        let location = Location::Point(geo(49.9, -97.1));
        assert_eq!(
            encode_tagged(&location),
            json!({"type": "point", "point": {"latitude": 49.9, "longitude": -97.1}})
        );
    }

    #[test]
    fn encode_untagged_stop_omits_missing_centre() {
        let location = Location::Stop(StopRef {
            key: 10064,
            name: "Portage at Main".into(),
            centre: None,
        });
        assert_eq!(
            encode_untagged(&location),
            json!({"Stop": {"key": 10064, "name": "Portage at Main"}})
        );
    }

    #[test]
    fn encode_street_leg_as_word() {
        let street = Street::new(3201, "Main Street").with_leg(StreetLeg::North);
        assert_eq!(
            encode_street(&street),
            json!({"key": 3201, "name": "Main Street", "leg": "North"})
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_geo() -> impl Strategy<Value = GeoLocation> {
            (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| geo(lat, lon))
        }

        fn arb_street() -> impl Strategy<Value = Street> {
            (
                any::<u32>(),
                "[A-Z][a-z]{2,12} Street",
                proptest::option::of("[A-Z][a-z]{2,8}"),
                proptest::option::of(prop::sample::select(vec![
                    StreetLeg::North,
                    StreetLeg::East,
                    StreetLeg::South,
                    StreetLeg::West,
                ])),
            )
                .prop_map(|(key, name, street_type, leg)| Street {
                    key,
                    name,
                    street_type,
                    leg,
                })
        }

        fn arb_address() -> impl Strategy<Value = Address> {
            (any::<u32>(), arb_street(), any::<u32>(), arb_geo()).prop_map(
                |(key, street, street_number, centre)| Address {
                    key,
                    street,
                    street_number,
                    centre,
                },
            )
        }

        fn arb_location() -> impl Strategy<Value = Location> {
            prop_oneof![
                arb_address().prop_map(Location::Address),
                (
                    any::<u32>(),
                    "[A-Za-z ]{1,30}",
                    prop::collection::vec("[A-Za-z]{1,12}", 0..4),
                    arb_address()
                )
                    .prop_map(|(key, name, categories, address)| {
                        Location::Monument(Monument {
                            key,
                            name,
                            categories,
                            address,
                        })
                    }),
                ("[0-9]{1,5}-[0-9]{1,5}", arb_street(), arb_street(), arb_geo()).prop_map(
                    |(key, street, cross_street, centre)| {
                        Location::Intersection(Intersection {
                            key,
                            street,
                            cross_street,
                            centre,
                        })
                    }
                ),
                arb_geo().prop_map(Location::Point),
                (any::<u32>(), "[A-Za-z ]{1,30}", proptest::option::of(arb_geo())).prop_map(
                    |(key, name, centre)| Location::Stop(StopRef { key, name, centre })
                ),
            ]
        }

        /// Encode, print, re-parse and decode, so float formatting is covered too.
        fn through_text(value: Value) -> Value {
            serde_json::from_str(&value.to_string()).unwrap()
        }

        proptest! {
            #[test]
            fn tagged_roundtrip(location in arb_location()) {
                let decoded = decode_tagged(&through_text(encode_tagged(&location))).unwrap();
                prop_assert_eq!(decoded, location);
            }

            #[test]
            fn untagged_roundtrip(location in arb_location()) {
                let decoded = decode_untagged(&through_text(encode_untagged(&location))).unwrap();
                prop_assert_eq!(decoded, location);
            }

            #[test]
            fn untagged_has_exactly_one_key(location in arb_location()) {
                let encoded = encode_untagged(&location);
                let obj = encoded.as_object().unwrap();
                prop_assert_eq!(obj.len(), 1);
                prop_assert!(obj.contains_key(location.kind().key_name()));
            }

            #[test]
            fn tagged_type_agrees_with_kind(location in arb_location()) {
                let encoded = encode_tagged(&location);
                prop_assert_eq!(encoded["type"].as_str(), Some(location.kind().tag()));
            }
        }
    }
}
