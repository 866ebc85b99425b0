//! Domain types for transit locations, stops, schedules and trip plans.
//!
//! This module contains the value types the wire codecs decode into and
//! encode from. Types with invariants enforce them at construction time,
//! so code that receives these types can trust their validity.

mod advisory;
mod error;
mod geo;
mod location;
mod partial;
mod place;
mod plan;
mod route;
mod schedule;
mod segment;
mod stop;
mod street;

pub use advisory::{Category, Priority, ServiceAdvisory};
pub use error::DomainError;
pub use geo::{Bounds, GeoLocation};
pub use location::{Location, LocationKind};
pub use partial::{PartialLocation, TargetFormat};
pub use place::{Address, Intersection, Monument};
pub use plan::{Durations, Plan, Times};
pub use route::{
    BadgeStyle, Bus, Coverage, CustomerType, Destination, Route, RouteKey, Variant,
};
pub use schedule::{PassingTime, RouteSchedule, ScheduledStop, ScheduledTimes, StopSchedule};
pub use segment::{Ride, Segment, SegmentKind, Transfer, TripStop, Walk};
pub use stop::{Direction, Distances, Feature, Side, Stop, StopRef};
pub use street::{InvalidStreetLeg, Street, StreetLeg};
