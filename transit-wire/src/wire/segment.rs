//! Trip plan, segment and trip-stop codecs.
//!
//! Segments are tagged by `type` (`walk`, `ride`, `transfer`) and each kind
//! owns a fixed set of fields. Trip stops are keyed by role (`origin`,
//! `stop`, `destination`), with origins and destinations holding untagged
//! locations.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::{
    BadgeStyle, Bounds, Bus, Durations, Plan, Ride, Route, RouteKey, Segment, SegmentKind,
    TripStop, Times, Transfer, Variant, Walk,
};

use super::convert::{
    convert_bounds, convert_bus, convert_route, convert_stop, convert_times, convert_variant,
};
use super::location::{decode_untagged, encode_untagged, stop_fields};
use super::types::{PlanDto, PlansEnvelope, RideDto, StopDto, TransferDto, WalkDto};
use super::{DecodeError, FieldProblem, as_object, encode_geo, populated};

/// Date-time format used for plan and segment times.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Every field any segment kind can carry.
const SEGMENT_FIELDS: [&str; 8] = [
    "bounds",
    "from",
    "times",
    "to",
    "bus",
    "route",
    "variant",
    "instructions",
];

/// Required and optional fields of a segment kind.
fn segment_contract(kind: SegmentKind) -> (&'static [&'static str], &'static [&'static str]) {
    match kind {
        SegmentKind::Walk => (&["times"], &["bounds", "from", "to", "instructions"]),
        SegmentKind::Ride => (&["times", "route", "variant"], &["bounds", "bus"]),
        SegmentKind::Transfer => (&["from", "to"], &["bounds"]),
    }
}

fn check_contract(obj: &Map<String, Value>, kind: SegmentKind) -> Result<(), DecodeError> {
    let (required, optional) = segment_contract(kind);

    if let Some(field) = required.iter().copied().find(|field| !populated(obj, field)) {
        return Err(DecodeError::SegmentShapeMismatch {
            kind,
            field,
            problem: FieldProblem::Missing,
        });
    }

    let foreign = SEGMENT_FIELDS
        .into_iter()
        .filter(|field| !required.contains(field) && !optional.contains(field))
        .find(|field| populated(obj, field));
    if let Some(field) = foreign {
        return Err(DecodeError::SegmentShapeMismatch {
            kind,
            field,
            problem: FieldProblem::Unexpected,
        });
    }

    Ok(())
}

/// Decode one segment of a trip plan.
pub fn decode_segment(value: &Value) -> Result<Segment, DecodeError> {
    let obj = as_object(value)?;

    let tag = match obj.get("type") {
        Some(Value::String(tag)) => tag,
        None | Some(Value::Null) => {
            return Err(DecodeError::MalformedPayload("segment has no `type`".into()));
        }
        Some(other) => {
            return Err(DecodeError::MalformedPayload(format!(
                "segment `type` must be a string, got {other}"
            )));
        }
    };
    let kind = SegmentKind::from_tag(tag).ok_or_else(|| DecodeError::UnknownVariant(tag.clone()))?;

    check_contract(obj, kind)?;

    match kind {
        SegmentKind::Walk => {
            let dto = WalkDto::deserialize(value)?;
            Ok(Segment::Walk(Walk {
                bounds: dto.bounds.map(convert_bounds).transpose()?,
                from: dto.from.as_ref().map(decode_trip_stop).transpose()?,
                times: convert_times(dto.times, Some(kind))?,
                to: dto.to.as_ref().map(decode_trip_stop).transpose()?,
                instructions: dto.instructions,
            }))
        }
        SegmentKind::Ride => {
            let dto = RideDto::deserialize(value)?;
            Ok(Segment::Ride(Ride {
                bounds: dto.bounds.map(convert_bounds).transpose()?,
                times: convert_times(dto.times, Some(kind))?,
                bus: dto.bus.map(convert_bus),
                route: convert_route(dto.route)?,
                variant: convert_variant(dto.variant),
            }))
        }
        SegmentKind::Transfer => {
            let dto = TransferDto::deserialize(value)?;
            Ok(Segment::Transfer(Transfer {
                bounds: dto.bounds.map(convert_bounds).transpose()?,
                from: decode_trip_stop(&dto.from)?,
                to: decode_trip_stop(&dto.to)?,
            }))
        }
    }
}

/// Decode a trip stop: exactly one of `origin`, `stop` or `destination`
/// (capitalized spellings are accepted too).
pub fn decode_trip_stop(value: &Value) -> Result<TripStop, DecodeError> {
    let obj = as_object(value)?;

    let matched: Vec<(&'static str, &Value)> = [
        "origin",
        "Origin",
        "stop",
        "Stop",
        "destination",
        "Destination",
    ]
    .into_iter()
    .filter_map(|key| obj.get(key).filter(|v| !v.is_null()).map(|v| (key, v)))
    .collect();

    match matched.as_slice() {
        [] => Err(DecodeError::NoVariantMatched),
        [(key, payload)] => match key.to_ascii_lowercase().as_str() {
            "origin" => Ok(TripStop::Origin(decode_untagged(payload)?)),
            "destination" => Ok(TripStop::Destination(decode_untagged(payload)?)),
            _ => Ok(TripStop::Stop(convert_stop(StopDto::deserialize(*payload)?)?)),
        },
        many => Err(DecodeError::AmbiguousVariant(
            many.iter().map(|(key, _)| key.to_string()).collect(),
        )),
    }
}

/// Decode a plan, failing on the first bad segment.
pub fn decode_plan(value: &Value) -> Result<Plan, DecodeError> {
    let dto = PlanDto::deserialize(value)?;
    let segments = dto
        .segments
        .iter()
        .map(decode_segment)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Plan {
        times: convert_times(dto.times, None)?,
        segments,
    })
}

/// A plan decoded leniently, with the segments that were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct LenientPlan {
    pub plan: Plan,

    /// Index into the payload's `segments` array, and why it was dropped
    pub rejected: Vec<(usize, DecodeError)>,
}

/// Decode a plan, skipping segments that fail to decode.
///
/// Only the plan's own times can fail the whole plan. Each skipped segment
/// is logged and reported in [`LenientPlan::rejected`].
pub fn decode_plan_lenient(value: &Value) -> Result<LenientPlan, DecodeError> {
    let dto = PlanDto::deserialize(value)?;
    let times = convert_times(dto.times, None)?;

    let mut segments = Vec::with_capacity(dto.segments.len());
    let mut rejected = Vec::new();

    for (index, raw) in dto.segments.iter().enumerate() {
        match decode_segment(raw) {
            Ok(segment) => segments.push(segment),
            Err(e) => {
                warn!(index, error = %e, "skipping segment");
                rejected.push((index, e));
            }
        }
    }

    Ok(LenientPlan {
        plan: Plan { times, segments },
        rejected,
    })
}

/// Decode the trip planner's `{"plans": [...]}` response.
///
/// Each plan succeeds or fails on its own; only a malformed envelope fails
/// the whole response.
pub fn decode_plans(value: &Value) -> Result<Vec<Result<Plan, DecodeError>>, DecodeError> {
    let envelope = PlansEnvelope::deserialize(value)?;
    Ok(envelope.plans.iter().map(decode_plan).collect())
}

pub fn encode_trip_stop(stop: &TripStop) -> Value {
    let payload = match stop {
        TripStop::Origin(location) | TripStop::Destination(location) => encode_untagged(location),
        TripStop::Stop(stop) => Value::Object(stop_fields(stop)),
    };
    Value::Object(Map::from_iter([(stop.key_name().to_string(), payload)]))
}

fn encode_bounds(bounds: &Bounds) -> Value {
    Value::Object(Map::from_iter([
        ("maximum".to_string(), encode_geo(&bounds.maximum())),
        ("minimum".to_string(), encode_geo(&bounds.minimum())),
    ]))
}

fn encode_durations(durations: &Durations) -> Value {
    Value::Object(Map::from_iter([
        ("total".to_string(), Value::from(durations.total)),
        ("walking".to_string(), Value::from(durations.walking)),
        ("waiting".to_string(), Value::from(durations.waiting)),
        ("riding".to_string(), Value::from(durations.riding)),
    ]))
}

fn encode_times(times: &Times) -> Value {
    Value::Object(Map::from_iter([
        (
            "start".to_string(),
            Value::from(times.start().format(TIME_FORMAT).to_string()),
        ),
        (
            "end".to_string(),
            Value::from(times.end().format(TIME_FORMAT).to_string()),
        ),
        ("durations".to_string(), encode_durations(&times.durations)),
    ]))
}

fn encode_route_key(key: &RouteKey) -> Value {
    match key {
        RouteKey::Number(n) => Value::from(*n),
        RouteKey::Named(name) => Value::from(name.as_str()),
    }
}

fn encode_badge_style(style: &BadgeStyle) -> Value {
    let class_names = Map::from_iter([(
        "class-name".to_string(),
        Value::from(style.class_names.clone()),
    )]);
    Value::Object(Map::from_iter([
        ("class-names".to_string(), Value::Object(class_names)),
        (
            "background-color".to_string(),
            Value::from(style.background_color.as_str()),
        ),
        (
            "border-color".to_string(),
            Value::from(style.border_color.as_str()),
        ),
        ("color".to_string(), Value::from(style.color.as_str())),
    ]))
}

fn encode_variant(variant: &Variant) -> Value {
    let mut fields = Map::from_iter([("key".to_string(), Value::from(variant.key.as_str()))]);
    if let Some(name) = &variant.name {
        fields.insert("name".into(), Value::from(name.as_str()));
    }
    Value::Object(fields)
}

fn encode_route(route: &Route) -> Value {
    let mut fields = Map::from_iter([
        ("key".to_string(), encode_route_key(&route.key)),
        ("number".to_string(), encode_route_key(&route.number)),
    ]);
    if let Some(name) = &route.name {
        fields.insert("name".into(), Value::from(name.as_str()));
    }
    if let Some(customer_type) = route.customer_type {
        fields.insert("customer-type".into(), Value::from(customer_type.as_str()));
    }
    if let Some(coverage) = route.coverage {
        fields.insert("coverage".into(), Value::from(coverage.as_str()));
    }
    if let Some(label) = &route.badge_label {
        fields.insert("badge-label".into(), encode_route_key(label));
    }
    if let Some(style) = &route.badge_style {
        fields.insert("badge-style".into(), encode_badge_style(style));
    }
    if !route.variants.is_empty() {
        fields.insert(
            "variants".into(),
            Value::Array(route.variants.iter().map(encode_variant).collect()),
        );
    }
    Value::Object(fields)
}

fn encode_bus(bus: &Bus) -> Value {
    Value::Object(Map::from_iter([
        ("key".to_string(), Value::from(bus.key)),
        ("bike-rack".to_string(), Value::from(bus.bike_rack)),
        ("wifi".to_string(), Value::from(bus.wifi)),
    ]))
}

/// Encode a segment. Optional fields that are unset are omitted.
pub fn encode_segment(segment: &Segment) -> Value {
    let mut fields = Map::from_iter([(
        "type".to_string(),
        Value::from(segment.kind().tag()),
    )]);
    if let Some(bounds) = segment.bounds() {
        fields.insert("bounds".into(), encode_bounds(bounds));
    }

    match segment {
        Segment::Walk(walk) => {
            if let Some(from) = &walk.from {
                fields.insert("from".into(), encode_trip_stop(from));
            }
            fields.insert("times".into(), encode_times(&walk.times));
            if let Some(to) = &walk.to {
                fields.insert("to".into(), encode_trip_stop(to));
            }
            if let Some(instructions) = &walk.instructions {
                fields.insert("instructions".into(), Value::from(instructions.as_str()));
            }
        }
        Segment::Ride(ride) => {
            fields.insert("times".into(), encode_times(&ride.times));
            if let Some(bus) = &ride.bus {
                fields.insert("bus".into(), encode_bus(bus));
            }
            fields.insert("route".into(), encode_route(&ride.route));
            fields.insert("variant".into(), encode_variant(&ride.variant));
        }
        Segment::Transfer(transfer) => {
            fields.insert("from".into(), encode_trip_stop(&transfer.from));
            fields.insert("to".into(), encode_trip_stop(&transfer.to));
        }
    }

    Value::Object(fields)
}

pub fn encode_plan(plan: &Plan) -> Value {
    Value::Object(Map::from_iter([
        ("times".to_string(), encode_times(&plan.times)),
        (
            "segments".to_string(),
            Value::Array(plan.segments.iter().map(encode_segment).collect()),
        ),
    ]))
}
