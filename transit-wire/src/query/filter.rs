//! Filter options for the transit API's list endpoints.
//!
//! Each option serializes as a single-key object (`{"max-transfers": 2}`)
//! and contributes at most one URL parameter.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::{Category, DomainError, Priority, StreetLeg};

/// A filter option that can be rendered as a URL parameter.
pub trait QueryFilter: Serialize + Clone + fmt::Debug {
    /// Returns the parameter name and value, or `None` if the option
    /// contributes nothing (e.g. an empty route list).
    fn query_pair(&self) -> Option<(&'static str, String)>;
}

/// A time of day to the minute.
///
/// Serialized as `[hour, minute]`, rendered in URLs as `HH:MM:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Create a clock time on a 24-hour clock.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_wire::query::ClockTime;
    ///
    /// let time = ClockTime::new(7, 5).unwrap();
    /// assert_eq!(time.to_string(), "07:05:00");
    /// assert!(ClockTime::new(24, 0).is_err());
    /// ```
    pub fn new(hour: u8, minute: u8) -> Result<Self, DomainError> {
        if hour > 23 || minute > 59 {
            return Err(DomainError::InvalidClockTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:00", self.hour, self.minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.hour, self.minute).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (hour, minute) = <(u8, u8)>::deserialize(deserializer)?;
        ClockTime::new(hour, minute).map_err(serde::de::Error::custom)
    }
}

/// What a trip plan's time means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    DepartBefore,
    #[default]
    DepartAfter,
    ArriveBefore,
    ArriveAfter,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DepartBefore => "depart-before",
            Self::DepartAfter => "depart-after",
            Self::ArriveBefore => "arrive-before",
            Self::ArriveAfter => "arrive-after",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters for the service advisories endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceAdvisoryFilter {
    /// Only advisories of this priority or higher
    Priority(Priority),
    Category(Category),
    /// Only advisories created or updated in the last N days
    MaxAge(u32),
    /// At most N advisories
    Limit(u32),
}

impl QueryFilter for ServiceAdvisoryFilter {
    fn query_pair(&self) -> Option<(&'static str, String)> {
        Some(match self {
            Self::Priority(p) => ("priority", p.as_u8().to_string()),
            Self::Category(c) => ("category", c.as_str().to_string()),
            Self::MaxAge(days) => ("max_age", days.to_string()),
            Self::Limit(n) => ("limit", n.to_string()),
        })
    }
}

/// Filters for the trip planner endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripPlanFilter {
    /// Defaults to today
    Date(NaiveDate),
    /// Defaults to now; see [`Mode`] for what it means
    Time(ClockTime),
    Mode(Mode),
    /// Walking speed in km/h
    WalkSpeed(f32),
    /// Minutes
    MaxWalkTime(u32),
    MinTransferWait(u32),
    MaxTransferWait(u32),
    MaxTransfers(u32),
}

impl QueryFilter for TripPlanFilter {
    fn query_pair(&self) -> Option<(&'static str, String)> {
        Some(match self {
            Self::Date(date) => ("date", date.format("%Y-%m-%d").to_string()),
            Self::Time(time) => ("time", time.to_string()),
            Self::Mode(mode) => ("mode", mode.as_str().to_string()),
            Self::WalkSpeed(speed) => ("walk-speed", speed.to_string()),
            Self::MaxWalkTime(minutes) => ("max-walk-time", minutes.to_string()),
            Self::MinTransferWait(minutes) => ("min-transfer-wait", minutes.to_string()),
            Self::MaxTransferWait(minutes) => ("max-transfer-wait", minutes.to_string()),
            Self::MaxTransfers(n) => ("max-transfers", n.to_string()),
        })
    }
}

/// Filters for the streets endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreetFilter {
    Name(String),
    /// Street type, e.g. "Avenue"
    Type(String),
    Leg(#[serde(with = "leg_abbreviation")] StreetLeg),
}

impl QueryFilter for StreetFilter {
    fn query_pair(&self) -> Option<(&'static str, String)> {
        Some(match self {
            Self::Name(name) => ("name", name.clone()),
            Self::Type(street_type) => ("type", street_type.clone()),
            Self::Leg(leg) => ("leg", leg.abbreviation().to_string()),
        })
    }
}

/// Filters for a stop's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopScheduleFilter {
    /// Only these routes; all routes when empty
    Routes(Vec<u32>),
    /// Defaults to now
    Start(ClockTime),
    /// Defaults to two hours from now
    End(ClockTime),
    MaxResultsPerRoute(u32),
}

impl QueryFilter for StopScheduleFilter {
    fn query_pair(&self) -> Option<(&'static str, String)> {
        match self {
            Self::Routes(routes) => match routes.as_slice() {
                [] => None,
                [route] => Some(("route", route.to_string())),
                many => Some((
                    "routes",
                    many.iter()
                        .map(u32::to_string)
                        .collect::<Vec<_>>()
                        .join(","),
                )),
            },
            Self::Start(time) => Some(("start", time.to_string())),
            Self::End(time) => Some(("end", time.to_string())),
            Self::MaxResultsPerRoute(n) => Some(("max-results-per-route", n.to_string())),
        }
    }
}

/// Street legs in filters use the single-letter form.
mod leg_abbreviation {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::domain::StreetLeg;

    pub fn serialize<S: Serializer>(leg: &StreetLeg, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(leg.abbreviation())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<StreetLeg, D::Error> {
        let s = String::deserialize(deserializer)?;
        StreetLeg::parse(&s).map_err(serde::de::Error::custom)
    }
}
