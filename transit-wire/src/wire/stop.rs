//! Stop, stop-feature and stop-schedule codecs.
//!
//! Single-entity decoders take the bare object; list decoders take the
//! endpoint's response envelope (`{"stops": [...]}`) and decode each item
//! on its own.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::{Feature, RouteSchedule, Stop, StopSchedule};

use super::DecodeError;
use super::convert::{convert_feature, convert_full_stop, convert_route, convert_scheduled_stop};
use super::types::{
    FullStopDto, ScheduledStopDto, StopFeaturesEnvelope, StopScheduleDto, StopsEnvelope,
};

/// Decode a stop as served by the stops endpoint.
pub fn decode_stop(value: &Value) -> Result<Stop, DecodeError> {
    convert_full_stop(FullStopDto::deserialize(value)?)
}

/// Decode a `{"stops": [...]}` response, one result per stop.
pub fn decode_stops(value: &Value) -> Result<Vec<Result<Stop, DecodeError>>, DecodeError> {
    let envelope = StopsEnvelope::deserialize(value)?;
    Ok(envelope.stops.iter().map(decode_stop).collect())
}

/// Decode a `{"stop-features": [...]}` response.
pub fn decode_stop_features(value: &Value) -> Result<Vec<Feature>, DecodeError> {
    let envelope = StopFeaturesEnvelope::deserialize(value)?;
    Ok(envelope
        .stop_features
        .into_iter()
        .map(convert_feature)
        .collect())
}

/// Decode a stop schedule.
///
/// The stop and each route must decode. A scheduled stop that doesn't is
/// logged and left out, so one bad bus doesn't hide the rest of the
/// schedule.
pub fn decode_stop_schedule(value: &Value) -> Result<StopSchedule, DecodeError> {
    let dto = StopScheduleDto::deserialize(value)?;
    let stop = convert_full_stop(dto.stop)?;

    let mut route_schedules = Vec::with_capacity(dto.route_schedules.len());
    for schedule in dto.route_schedules {
        let route = convert_route(schedule.route)?;
        let mut scheduled_stops = Vec::with_capacity(schedule.scheduled_stops.len());
        for (index, raw) in schedule.scheduled_stops.iter().enumerate() {
            match ScheduledStopDto::deserialize(raw) {
                Ok(dto) => scheduled_stops.push(convert_scheduled_stop(dto)),
                Err(e) => {
                    warn!(route = %route.key, index, error = %e, "skipping scheduled stop");
                }
            }
        }
        route_schedules.push(RouteSchedule {
            route,
            scheduled_stops,
        });
    }

    Ok(StopSchedule {
        stop,
        route_schedules,
    })
}
