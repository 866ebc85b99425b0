//! Conversion from transit API DTOs to domain types.
//!
//! Everything here runs after the shape checks in the location and segment
//! codecs, so the only failures left are bad values.

use crate::domain::{
    Address, BadgeStyle, Bounds, Bus, Category, Coverage, CustomerType, Destination, Direction,
    Distances, Durations, Feature, GeoLocation, Intersection, Monument, PassingTime, Priority,
    Route, RouteKey, ScheduledStop, ScheduledTimes, SegmentKind, ServiceAdvisory, Side, Stop,
    StopRef, Street, StreetLeg, Times, Variant,
};

use super::DecodeError;
use super::types::{
    AddressDto, BadgeStyleDto, BoundsDto, BusDto, DestinationDto, DistancesDto, DurationsDto,
    FeatureDto, FullStopDto, GeoDto, IntersectionDto, MonumentDto, NumberDto, PassingTimeDto,
    RouteDto, RouteKeyDto, ScheduledStopDto, ScheduledTimesDto, ServiceAdvisoryDto, StopDto,
    StreetDto, TimesDto, VariantDto,
};

/// A `geographic` wrapper must stand alone; coordinates next to it would
/// give two answers for one location.
pub fn convert_geo(dto: GeoDto) -> Result<GeoLocation, DecodeError> {
    if let Some(inner) = dto.geographic {
        if dto.latitude.is_some() || dto.longitude.is_some() {
            return Err(DecodeError::MalformedPayload(
                "coordinates alongside `geographic`".into(),
            ));
        }
        return convert_geo(*inner);
    }

    let latitude = dto
        .latitude
        .ok_or_else(|| DecodeError::MalformedPayload("missing latitude".into()))?;
    let longitude = dto
        .longitude
        .ok_or_else(|| DecodeError::MalformedPayload("missing longitude".into()))?;

    Ok(GeoLocation::new(
        convert_number(latitude, "coordinate")?,
        convert_number(longitude, "coordinate")?,
    )?)
}

fn convert_number(dto: NumberDto, what: &str) -> Result<f64, DecodeError> {
    match dto {
        NumberDto::Number(n) => Ok(n),
        NumberDto::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| DecodeError::MalformedPayload(format!("invalid {what} {s:?}"))),
    }
}

pub fn convert_bounds(dto: BoundsDto) -> Result<Bounds, DecodeError> {
    let maximum = convert_geo(dto.maximum)?;
    let minimum = convert_geo(dto.minimum)?;
    Ok(Bounds::new(maximum, minimum)?)
}

pub fn convert_street(dto: StreetDto) -> Result<Street, DecodeError> {
    let leg = dto
        .leg
        .as_deref()
        .map(StreetLeg::parse)
        .transpose()
        .map_err(|e| DecodeError::MalformedPayload(e.to_string()))?;

    Ok(Street {
        key: dto.key,
        name: dto.name,
        street_type: dto.street_type,
        leg,
    })
}

pub fn convert_address(dto: AddressDto) -> Result<Address, DecodeError> {
    Ok(Address {
        key: dto.key,
        street: convert_street(dto.street)?,
        street_number: dto.street_number,
        centre: convert_geo(dto.centre)?,
    })
}

pub fn convert_monument(dto: MonumentDto) -> Result<Monument, DecodeError> {
    Ok(Monument {
        key: dto.key,
        name: dto.name,
        categories: dto.categories,
        address: convert_address(dto.address)?,
    })
}

pub fn convert_intersection(dto: IntersectionDto) -> Result<Intersection, DecodeError> {
    Ok(Intersection {
        key: dto.key,
        street: convert_street(dto.street)?,
        cross_street: convert_street(dto.cross_street)?,
        centre: convert_geo(dto.centre)?,
    })
}

pub fn convert_stop(dto: StopDto) -> Result<StopRef, DecodeError> {
    Ok(StopRef {
        key: dto.key,
        name: dto.name,
        centre: dto.centre.map(convert_geo).transpose()?,
    })
}

/// Convert times, dropping duration components the segment kind doesn't use.
/// Plan-level times pass `None` and keep every component.
pub fn convert_times(dto: TimesDto, kind: Option<SegmentKind>) -> Result<Times, DecodeError> {
    let durations = convert_durations(dto.durations);
    let durations = match kind {
        Some(kind) => durations.masked(kind),
        None => durations,
    };
    Ok(Times::new(dto.start, dto.end, durations)?)
}

fn convert_durations(dto: DurationsDto) -> Durations {
    Durations {
        total: dto.total,
        walking: dto.walking,
        waiting: dto.waiting,
        riding: dto.riding,
    }
}

fn convert_route_key(dto: RouteKeyDto) -> RouteKey {
    match dto {
        RouteKeyDto::Number(n) => RouteKey::Number(n),
        RouteKeyDto::Text(s) => RouteKey::parse(&s),
    }
}

fn convert_badge_style(dto: BadgeStyleDto) -> BadgeStyle {
    BadgeStyle {
        class_names: dto.class_names.class_name,
        background_color: dto.background_color,
        border_color: dto.border_color,
        color: dto.color,
    }
}

pub fn convert_variant(dto: VariantDto) -> Variant {
    Variant {
        key: dto.key,
        name: dto.name,
    }
}

pub fn convert_route(dto: RouteDto) -> Result<Route, DecodeError> {
    let customer_type = dto
        .customer_type
        .map(|s| {
            CustomerType::parse(&s)
                .ok_or_else(|| DecodeError::MalformedPayload(format!("unknown customer type {s:?}")))
        })
        .transpose()?;
    let coverage = dto
        .coverage
        .map(|s| {
            Coverage::parse(&s)
                .ok_or_else(|| DecodeError::MalformedPayload(format!("unknown coverage {s:?}")))
        })
        .transpose()?;

    let key = convert_route_key(dto.key);
    let number = dto.number.map(convert_route_key).unwrap_or_else(|| key.clone());

    Ok(Route {
        key,
        number,
        name: dto.name,
        customer_type,
        coverage,
        badge_label: dto.badge_label.map(convert_route_key),
        badge_style: dto.badge_style.map(convert_badge_style),
        variants: dto
            .variants
            .unwrap_or_default()
            .into_iter()
            .map(convert_variant)
            .collect(),
    })
}

pub fn convert_bus(dto: BusDto) -> Bus {
    Bus {
        key: dto.key,
        bike_rack: dto.bike_rack,
        wifi: dto.wifi,
    }
}

fn convert_distances(dto: DistancesDto) -> Result<Distances, DecodeError> {
    let direct = convert_number(dto.direct, "distance")?;
    let walking = convert_number(dto.walking, "distance")?;
    if !direct.is_finite() || !walking.is_finite() {
        return Err(DecodeError::MalformedPayload(
            "distance must be a finite number".into(),
        ));
    }
    Ok(Distances { direct, walking })
}

pub fn convert_full_stop(dto: FullStopDto) -> Result<Stop, DecodeError> {
    let direction = Direction::parse(&dto.direction).ok_or_else(|| {
        DecodeError::MalformedPayload(format!("unknown direction {:?}", dto.direction))
    })?;
    let side = match dto.side {
        None => Side::default(),
        Some(side) => Side::parse(&side)
            .ok_or_else(|| DecodeError::MalformedPayload(format!("unknown side {side:?}")))?,
    };

    Ok(Stop {
        key: dto.key,
        name: dto.name,
        number: dto.number,
        direction,
        side,
        street: convert_street(dto.street)?,
        cross_street: convert_street(dto.cross_street)?,
        centre: convert_geo(dto.centre)?,
        distances: dto.distances.map(convert_distances).transpose()?,
        internal_name: dto.internal_name,
        sequence_on_street: dto.sequence_on_street,
        icon_style: dto.icon_style,
    })
}

pub fn convert_feature(dto: FeatureDto) -> Feature {
    Feature {
        name: dto.name,
        count: dto.count,
    }
}

fn convert_passing_time(dto: PassingTimeDto) -> PassingTime {
    PassingTime {
        scheduled: dto.scheduled,
        estimated: dto.estimated,
    }
}

fn convert_scheduled_times(dto: ScheduledTimesDto) -> ScheduledTimes {
    ScheduledTimes {
        arrival: dto.arrival.map(convert_passing_time),
        departure: dto.departure.map(convert_passing_time),
    }
}

pub fn convert_scheduled_stop(dto: ScheduledStopDto) -> ScheduledStop {
    ScheduledStop {
        key: dto.key,
        cancelled: dto.cancelled,
        times: convert_scheduled_times(dto.times),
        variant: convert_variant(dto.variant),
        bus: dto.bus.map(convert_bus),
    }
}

pub fn convert_service_advisory(dto: ServiceAdvisoryDto) -> Result<ServiceAdvisory, DecodeError> {
    let priority = Priority::try_from(dto.priority).map_err(|p| {
        DecodeError::MalformedPayload(format!("priority {p} is not in 1..=5"))
    })?;
    let category = Category::parse(&dto.category).ok_or_else(|| {
        DecodeError::MalformedPayload(format!("unknown category {:?}", dto.category))
    })?;

    Ok(ServiceAdvisory {
        key: dto.key,
        priority,
        title: dto.title,
        body: dto.body,
        category,
        updated_at: dto.updated_at,
    })
}

pub fn convert_destination(dto: DestinationDto) -> Destination {
    Destination {
        key: dto.key,
        name: dto.name,
    }
}
