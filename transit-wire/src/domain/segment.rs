//! Trip plan segments and the stops they run between.

use std::fmt;

use super::{Bounds, Bus, Location, Route, StopRef, Times, Variant};

/// One end of a segment: the trip origin, a transit stop, or the trip
/// destination.
#[derive(Debug, Clone, PartialEq)]
pub enum TripStop {
    Origin(Location),
    Stop(StopRef),
    Destination(Location),
}

impl TripStop {
    /// The object key used on the wire.
    pub fn key_name(&self) -> &'static str {
        match self {
            Self::Origin(_) => "origin",
            Self::Stop(_) => "stop",
            Self::Destination(_) => "destination",
        }
    }

    /// Returns the stop reference, if this end is a transit stop.
    pub fn as_stop(&self) -> Option<&StopRef> {
        match self {
            Self::Stop(stop) => Some(stop),
            Self::Origin(_) | Self::Destination(_) => None,
        }
    }
}

/// The kind of a [`Segment`], without its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Walk,
    Ride,
    Transfer,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 3] = [Self::Walk, Self::Ride, Self::Transfer];

    /// The `type` discriminant on the wire.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Ride => "ride",
            Self::Transfer => "transfer",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Walking between the origin, stops and the destination.
///
/// `from` and `to` are optional: the first walk of a plan that starts at a
/// stop has nothing to walk from.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    pub bounds: Option<Bounds>,
    pub from: Option<TripStop>,
    pub times: Times,
    pub to: Option<TripStop>,
    pub instructions: Option<String>,
}

/// Riding a bus on one route variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Ride {
    pub bounds: Option<Bounds>,
    pub times: Times,
    /// Only known for plans close to the current time
    pub bus: Option<Bus>,
    pub route: Route,
    pub variant: Variant,
}

/// Changing buses, either at the same stop or between nearby stops.
///
/// A transfer has no times of its own; the wait is part of the next ride.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub bounds: Option<Bounds>,
    pub from: TripStop,
    pub to: TripStop,
}

/// A unit of travel within a plan.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Walk(Walk),
    Ride(Ride),
    Transfer(Transfer),
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Self::Walk(_) => SegmentKind::Walk,
            Self::Ride(_) => SegmentKind::Ride,
            Self::Transfer(_) => SegmentKind::Transfer,
        }
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        match self {
            Self::Walk(walk) => walk.bounds.as_ref(),
            Self::Ride(ride) => ride.bounds.as_ref(),
            Self::Transfer(transfer) => transfer.bounds.as_ref(),
        }
    }

    /// Returns the segment's times. Transfers have none.
    pub fn times(&self) -> Option<&Times> {
        match self {
            Self::Walk(walk) => Some(&walk.times),
            Self::Ride(ride) => Some(&ride.times),
            Self::Transfer(_) => None,
        }
    }

    /// Returns where the segment starts, where the payload says.
    pub fn from_stop(&self) -> Option<&TripStop> {
        match self {
            Self::Walk(walk) => walk.from.as_ref(),
            Self::Ride(_) => None,
            Self::Transfer(transfer) => Some(&transfer.from),
        }
    }

    /// Returns where the segment ends, where the payload says.
    pub fn to_stop(&self) -> Option<&TripStop> {
        match self {
            Self::Walk(walk) => walk.to.as_ref(),
            Self::Ride(_) => None,
            Self::Transfer(transfer) => Some(&transfer.to),
        }
    }
}
