//! The location union.
//!
//! A `Location` is exactly one of five kinds, each carrying its own payload.
//! `LocationKind` is the payload-free discriminant, used by the wire codecs
//! to name variants without matching on payloads.

use std::fmt;

use super::{Address, GeoLocation, Intersection, Monument, StopRef};

/// The kind of a [`Location`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationKind {
    Address,
    Monument,
    Intersection,
    Point,
    Stop,
}

impl LocationKind {
    /// Every kind, in canonical order.
    pub const ALL: [LocationKind; 5] = [
        Self::Address,
        Self::Monument,
        Self::Intersection,
        Self::Point,
        Self::Stop,
    ];

    /// The `type` discriminant used by the tagged wire convention.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Monument => "monument",
            Self::Intersection => "intersection",
            Self::Point => "point",
            Self::Stop => "stop",
        }
    }

    /// The object key used by the untagged wire convention.
    pub fn key_name(&self) -> &'static str {
        match self {
            Self::Address => "Address",
            Self::Monument => "Monument",
            Self::Intersection => "Intersection",
            Self::Point => "Point",
            Self::Stop => "Stop",
        }
    }

    /// Look up a kind by its tagged-convention discriminant.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A position that is significant or reachable by address.
///
/// Exactly one payload is present, and `kind()` always agrees with it.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Address(Address),
    Monument(Monument),
    Intersection(Intersection),
    Point(GeoLocation),
    Stop(StopRef),
}

impl Location {
    /// Returns the kind of this location.
    pub fn kind(&self) -> LocationKind {
        match self {
            Self::Address(_) => LocationKind::Address,
            Self::Monument(_) => LocationKind::Monument,
            Self::Intersection(_) => LocationKind::Intersection,
            Self::Point(_) => LocationKind::Point,
            Self::Stop(_) => LocationKind::Stop,
        }
    }

    /// Returns the geographic centre of the location, if it has one.
    ///
    /// Only a stop reference can lack a centre.
    pub fn centre(&self) -> Option<GeoLocation> {
        match self {
            Self::Address(address) => Some(address.centre),
            Self::Monument(monument) => Some(monument.centre()),
            Self::Intersection(intersection) => Some(intersection.centre),
            Self::Point(point) => Some(*point),
            Self::Stop(stop) => stop.centre,
        }
    }

    /// Returns a human-readable name, where the location has one.
    pub fn display_name(&self) -> Option<String> {
        match self {
            Self::Address(address) => Some(format!(
                "{} {}",
                address.street_number, address.street.name
            )),
            Self::Monument(monument) => Some(monument.name.clone()),
            Self::Intersection(intersection) => Some(format!(
                "{} & {}",
                intersection.street.name, intersection.cross_street.name
            )),
            Self::Point(_) => None,
            Self::Stop(stop) => Some(stop.name.clone()),
        }
    }
}

/// Formats the location as the transit API's resource path,
/// e.g. `addresses/136590` or `geo/49.9,-97.1`.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(a) => write!(f, "addresses/{}", a.key),
            Self::Monument(m) => write!(f, "monuments/{}", m.key),
            Self::Intersection(i) => write!(f, "intersections/{}", i.key),
            Self::Point(p) => write!(f, "geo/{p}"),
            Self::Stop(s) => write!(f, "stops/{}", s.key),
        }
    }
}
