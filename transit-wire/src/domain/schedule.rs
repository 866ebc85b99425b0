//! Stop schedules: when buses on each route pass a stop.

use chrono::{Duration, NaiveDateTime};

use super::{Bus, Route, Stop, Variant};

/// The scheduled time of an arrival or departure, and the live estimate
/// when there is one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassingTime {
    pub scheduled: NaiveDateTime,

    /// Only known for today's service
    pub estimated: Option<NaiveDateTime>,
}

impl PassingTime {
    /// Returns the best known time: the estimate if there is one.
    pub fn expected(&self) -> NaiveDateTime {
        self.estimated.unwrap_or(self.scheduled)
    }

    /// Returns how late the bus is expected to be (negative when early).
    pub fn delay(&self) -> Duration {
        self.expected() - self.scheduled
    }
}

/// Arrival and departure at one stop. The first stop of a trip has no
/// arrival and the last has no departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScheduledTimes {
    pub arrival: Option<PassingTime>,
    pub departure: Option<PassingTime>,
}

/// One bus passing the stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledStop {
    pub key: String,
    pub cancelled: bool,
    pub times: ScheduledTimes,
    pub variant: Variant,
    pub bus: Option<Bus>,
}

impl ScheduledStop {
    /// Returns when the bus is expected to leave, falling back to its
    /// arrival at the last stop of a trip.
    pub fn leaves_at(&self) -> Option<NaiveDateTime> {
        self.times
            .departure
            .or(self.times.arrival)
            .map(|time| time.expected())
    }
}

/// The passing buses of one route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSchedule {
    pub route: Route,
    pub scheduled_stops: Vec<ScheduledStop>,
}

/// Everything passing a stop, grouped by route.
#[derive(Debug, Clone, PartialEq)]
pub struct StopSchedule {
    pub stop: Stop,
    pub route_schedules: Vec<RouteSchedule>,
}

impl StopSchedule {
    /// Returns the buses that aren't cancelled across all routes, soonest first.
    pub fn departures(&self) -> Vec<(&Route, &ScheduledStop)> {
        let mut departures: Vec<(&Route, &ScheduledStop)> = self
            .route_schedules
            .iter()
            .flat_map(|schedule| {
                schedule
                    .scheduled_stops
                    .iter()
                    .filter(|stop| !stop.cancelled)
                    .map(move |stop| (&schedule.route, stop))
            })
            .collect();
        departures.sort_by_key(|(_, stop)| stop.leaves_at());
        departures
    }
}
