//! Trip plans and their timing.

use chrono::{Duration, NaiveDateTime};

use super::{DomainError, Segment, SegmentKind, TripStop};

/// Minutes spent on each mode of travel.
///
/// Every component defaults to zero; components that aren't meaningful
/// for a segment kind are always zero (see [`Durations::masked`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Durations {
    pub total: u32,
    pub walking: u32,
    pub waiting: u32,
    pub riding: u32,
}

impl Durations {
    /// Zero out the components that don't apply to a segment kind.
    ///
    /// A walk only walks, a ride waits and rides, and a transfer has no
    /// durations of its own.
    pub fn masked(self, kind: SegmentKind) -> Self {
        match kind {
            SegmentKind::Walk => Self {
                waiting: 0,
                riding: 0,
                ..self
            },
            SegmentKind::Ride => Self { walking: 0, ..self },
            SegmentKind::Transfer => Self::default(),
        }
    }
}

/// Component-wise sum, saturating at `u32::MAX`.
impl std::ops::AddAssign for Durations {
    fn add_assign(&mut self, rhs: Self) {
        self.total = self.total.saturating_add(rhs.total);
        self.walking = self.walking.saturating_add(rhs.walking);
        self.waiting = self.waiting.saturating_add(rhs.waiting);
        self.riding = self.riding.saturating_add(rhs.riding);
    }
}

/// When a plan or segment starts and ends, and how the time is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Times {
    start: NaiveDateTime,
    end: NaiveDateTime,
    pub durations: Durations,
}

impl Times {
    /// Create times, rejecting an end before the start.
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        durations: Durations,
    ) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::EndsBeforeStart);
        }
        Ok(Self {
            start,
            end,
            durations,
        })
    }

    /// Returns the start time (local to the transit agency).
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the end time (local to the transit agency).
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns the wall-clock span from start to end.
    pub fn span(&self) -> Duration {
        self.end - self.start
    }
}

/// One way of getting from the origin to the destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    /// Start and end of the whole plan, with per-mode totals
    pub times: Times,

    /// Segments in travel order; the first starts at the trip origin
    pub segments: Vec<Segment>,
}

impl Plan {
    /// Returns where the plan starts, if the first segment says.
    pub fn origin(&self) -> Option<&TripStop> {
        self.segments.first().and_then(Segment::from_stop)
    }

    /// Returns where the plan ends, if the last segment says.
    pub fn destination(&self) -> Option<&TripStop> {
        self.segments.last().and_then(Segment::to_stop)
    }

    /// Returns the number of buses boarded.
    pub fn ride_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.kind() == SegmentKind::Ride)
            .count()
    }

    /// Returns the number of changes between buses.
    pub fn transfer_count(&self) -> usize {
        self.ride_count().saturating_sub(1)
    }

    /// Sum the durations of the individual segments.
    ///
    /// The result can differ from `times.durations`: the plan totals
    /// include waiting at the first stop, which no segment carries.
    pub fn summed_durations(&self) -> Durations {
        let mut sum = Durations::default();
        for times in self.segments.iter().filter_map(Segment::times) {
            sum += times.durations;
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoLocation, Location, Ride, Route, RouteKey, StopRef, Variant, Walk};
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn times(start: NaiveDateTime, end: NaiveDateTime, durations: Durations) -> Times {
        Times::new(start, end, durations).unwrap()
    }

    fn stop() -> StopRef {
        StopRef::new(10064, "Portage at Main", GeoLocation::new(49.8954, -97.1385).unwrap())
    }

    fn walk(start: NaiveDateTime, end: NaiveDateTime, minutes: u32) -> Segment {
        Segment::Walk(Walk {
            bounds: None,
            from: Some(TripStop::Origin(Location::Point(
                GeoLocation::new(49.86917, -97.1391).unwrap(),
            ))),
            times: times(
                start,
                end,
                Durations {
                    total: minutes,
                    walking: minutes,
                    ..Default::default()
                },
            ),
            to: Some(TripStop::Stop(stop())),
            instructions: None,
        })
    }

    fn ride(start: NaiveDateTime, end: NaiveDateTime, minutes: u32) -> Segment {
        Segment::Ride(Ride {
            bounds: None,
            times: times(
                start,
                end,
                Durations {
                    total: minutes,
                    riding: minutes,
                    ..Default::default()
                },
            ),
            bus: None,
            route: Route::new(RouteKey::Number(18)),
            variant: Variant::new("18-1-N", "North Main to Tyndall Park"),
        })
    }

    #[test]
    fn times_reject_end_before_start() {
        assert_eq!(
            Times::new(at(10, 30), at(10, 0), Durations::default()),
            Err(DomainError::EndsBeforeStart)
        );
        assert!(Times::new(at(10, 0), at(10, 0), Durations::default()).is_ok());
    }

    #[test]
    fn times_span() {
        let t = times(at(10, 0), at(10, 45), Durations::default());
        assert_eq!(t.span(), Duration::minutes(45));
    }

    #[test]
    fn masked_durations() {
        let all = Durations {
            total: 20,
            walking: 5,
            waiting: 3,
            riding: 12,
        };

        let walk = all.masked(SegmentKind::Walk);
        assert_eq!((walk.walking, walk.waiting, walk.riding), (5, 0, 0));

        let ride = all.masked(SegmentKind::Ride);
        assert_eq!((ride.walking, ride.waiting, ride.riding), (0, 3, 12));
        assert_eq!(ride.total, 20);

        assert_eq!(all.masked(SegmentKind::Transfer), Durations::default());
    }

    #[test]
    fn plan_summaries() {
        let plan = Plan {
            times: times(
                at(10, 0),
                at(10, 40),
                Durations {
                    total: 40,
                    walking: 5,
                    waiting: 10,
                    riding: 25,
                },
            ),
            segments: vec![
                walk(at(10, 0), at(10, 5), 5),
                ride(at(10, 15), at(10, 40), 25),
            ],
        };

        assert_eq!(plan.ride_count(), 1);
        assert_eq!(plan.transfer_count(), 0);
        assert!(matches!(plan.origin(), Some(TripStop::Origin(_))));
        // A ride has no `to`, so the destination is unknown
        assert_eq!(plan.destination(), None);

        let summed = plan.summed_durations();
        assert_eq!(summed.total, 30);
        assert_eq!(summed.walking, 5);
        assert_eq!(summed.riding, 25);
    }

    #[test]
    fn summed_durations_saturate() {
        let plan = Plan {
            times: times(at(10, 0), at(10, 10), Durations::default()),
            segments: vec![
                walk(at(10, 0), at(10, 5), u32::MAX),
                walk(at(10, 5), at(10, 10), u32::MAX),
            ],
        };

        let summed = plan.summed_durations();
        assert_eq!(summed.total, u32::MAX);
        assert_eq!(summed.walking, u32::MAX);
        assert_eq!(summed.riding, 0);
    }

    #[test]
    fn empty_plan() {
        let plan = Plan {
            times: times(at(10, 0), at(10, 0), Durations::default()),
            segments: Vec::new(),
        };
        assert_eq!(plan.origin(), None);
        assert_eq!(plan.transfer_count(), 0);
        assert_eq!(plan.summed_durations(), Durations::default());
    }
}
