//! Stops: the full entity served by the stops endpoint, and the reduced
//! reference used inside trip plans.

use std::fmt;

use super::{GeoLocation, Street};

/// Basic information about a stop, as it appears inside trip plans and
/// `stop`-kind locations.
///
/// A reduced projection of the full stop entity served by the stops
/// endpoint: no direction or schedule linkage. Fetch the full stop by `key`
/// when those are needed.
#[derive(Debug, Clone, PartialEq)]
pub struct StopRef {
    /// Unique identifier (also the stop number shown to riders)
    pub key: u32,

    /// Stop name
    pub name: String,

    /// Where the stop is. Some payloads omit it.
    pub centre: Option<GeoLocation>,
}

impl StopRef {
    /// Create a stop reference with a known position.
    pub fn new(key: u32, name: impl Into<String>, centre: GeoLocation) -> Self {
        Self {
            key,
            name: name.into(),
            centre: Some(centre),
        }
    }
}

/// Which way buses serving a stop are heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Northbound,
    Eastbound,
    Southbound,
    Westbound,
}

impl Direction {
    const ALL: [Direction; 4] = [
        Self::Northbound,
        Self::Eastbound,
        Self::Southbound,
        Self::Westbound,
    ];

    /// Parse the wire value (e.g. `"Northbound"`). Returns `None` if unknown.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str().eq_ignore_ascii_case(s))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Northbound => "Northbound",
            Self::Eastbound => "Eastbound",
            Self::Southbound => "Southbound",
            Self::Westbound => "Westbound",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the intersection a stop is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    DirectOpposite,
    Farside,
    FarsideOpposite,
    Nearside,
    NearsideOpposite,
    /// The stop isn't at an intersection
    #[default]
    NotApplicable,
}

impl Side {
    /// Parse the wire value (e.g. `"Farside Opposite"`). `"NA"` and `"N/A"`
    /// both mean not applicable. Returns `None` if unknown.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("NA") || s.eq_ignore_ascii_case("N/A") {
            return Some(Self::NotApplicable);
        }
        [
            Self::DirectOpposite,
            Self::Farside,
            Self::FarsideOpposite,
            Self::Nearside,
            Self::NearsideOpposite,
        ]
        .into_iter()
        .find(|side| side.as_str().eq_ignore_ascii_case(s))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectOpposite => "Direct Opposite",
            Self::Farside => "Farside",
            Self::FarsideOpposite => "Farside Opposite",
            Self::Nearside => "Nearside",
            Self::NearsideOpposite => "Nearside Opposite",
            Self::NotApplicable => "NA",
        }
    }
}

/// Metres from a searched location to a stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distances {
    pub direct: f64,
    pub walking: f64,
}

/// Something at a stop, such as a bench or a heated shelter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    pub count: u32,
}

/// A stop as served by the stops endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub key: u32,
    pub name: String,

    /// Number shown on the stop sign
    pub number: u32,

    pub direction: Direction,
    pub side: Side,
    pub street: Street,
    pub cross_street: Street,
    pub centre: GeoLocation,

    /// Only present when the stops were searched around a location
    pub distances: Option<Distances>,

    pub internal_name: Option<String>,
    pub sequence_on_street: Option<u32>,
    pub icon_style: Option<String>,
}

impl Stop {
    /// Returns the reduced reference used inside trip plans.
    pub fn to_ref(&self) -> StopRef {
        StopRef::new(self.key, self.name.clone(), self.centre)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_centre() {
        let centre = GeoLocation::new(49.8954, -97.1385).unwrap();
        let stop = StopRef::new(10064, "Portage at Main", centre);

        assert_eq!(stop.key, 10064);
        assert_eq!(stop.name, "Portage at Main");
        assert_eq!(stop.centre, Some(centre));
    }

    #[test]
    fn direction_parse() {
        assert_eq!(Direction::parse("Northbound"), Some(Direction::Northbound));
        assert_eq!(Direction::parse("westbound"), Some(Direction::Westbound));
        assert_eq!(Direction::parse("Inbound"), None);
        assert_eq!(Direction::Southbound.to_string(), "Southbound");
    }

    #[test]
    fn side_parse() {
        assert_eq!(Side::parse("Farside Opposite"), Some(Side::FarsideOpposite));
        assert_eq!(Side::parse("Nearside"), Some(Side::Nearside));
        assert_eq!(Side::parse("NA"), Some(Side::NotApplicable));
        assert_eq!(Side::parse("N/A"), Some(Side::NotApplicable));
        assert_eq!(Side::parse("Kerbside"), None);
    }

    #[test]
    fn full_stop_reduces_to_ref() {
        let centre = GeoLocation::new(49.8954, -97.1385).unwrap();
        let stop = Stop {
            key: 10064,
            name: "Northbound Main at Portage".into(),
            number: 10064,
            direction: Direction::Northbound,
            side: Side::Farside,
            street: Street::new(3201, "Main Street"),
            cross_street: Street::new(2265, "Portage Avenue"),
            centre,
            distances: None,
            internal_name: None,
            sequence_on_street: Some(12),
            icon_style: None,
        };

        assert_eq!(
            stop.to_ref(),
            StopRef::new(10064, "Northbound Main at Portage", centre)
        );
    }
}
