//! Partial locations for outbound requests.
//!
//! When asking for a trip plan the transit API doesn't need the whole
//! location, only enough to identify it. `PartialLocation` is that minimal
//! shape, and [`Location::to_partial`] is the projection onto it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DomainError, GeoLocation, Location};

/// A minimal location reference, always encoded untagged-by-key:
/// `{"Address": "136590"}`, `{"Point": [49.9, -97.1]}`, `{"Stop": 10064}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PartialLocation {
    /// Address key
    Address(String),

    /// Monument key, or the monument's name for services that only
    /// understand names
    Monument(String),

    /// Intersection key
    Intersection(String),

    /// Coordinates, encoded as a `[latitude, longitude]` pair
    Point(#[serde(with = "lat_lon_pair")] GeoLocation),

    /// Stop number, never stringified
    Stop(u32),
}

/// A `GeoLocation` as a bare `[latitude, longitude]` array, validated on
/// the way in.
mod lat_lon_pair {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::domain::GeoLocation;

    pub fn serialize<S: Serializer>(geo: &GeoLocation, serializer: S) -> Result<S::Ok, S::Error> {
        (geo.latitude(), geo.longitude()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GeoLocation, D::Error> {
        let (latitude, longitude) = <(f64, f64)>::deserialize(deserializer)?;
        GeoLocation::new(latitude, longitude).map_err(serde::de::Error::custom)
    }
}

/// Formats the reference as the transit API's resource path.
impl fmt::Display for PartialLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(key) => write!(f, "addresses/{key}"),
            Self::Monument(key) => write!(f, "monuments/{key}"),
            Self::Intersection(key) => write!(f, "intersections/{key}"),
            Self::Point(geo) => write!(f, "geo/{},{}", geo.latitude(), geo.longitude()),
            Self::Stop(key) => write!(f, "stops/{key}"),
        }
    }
}

/// Which service a partial location is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetFormat {
    /// The transit API, which resolves entities by key.
    #[default]
    TransitApi,

    /// Any other service (e.g. a geocoder), which only understands
    /// names and coordinates.
    External,
}

/// `true` selects the transit API format.
impl From<bool> for TargetFormat {
    fn from(target_is_transit_api: bool) -> Self {
        if target_is_transit_api {
            Self::TransitApi
        } else {
            Self::External
        }
    }
}

impl Location {
    /// Project this location onto a minimal outbound reference.
    ///
    /// For [`TargetFormat::TransitApi`] every kind maps to its own key
    /// (keys as strings, except stops which stay numeric, and points which
    /// carry their coordinates). This never fails.
    ///
    /// For [`TargetFormat::External`] a monument is referenced by name and
    /// every other kind by its geographic centre. A stop without a known
    /// centre yields [`DomainError::MissingCentre`].
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_wire::domain::{GeoLocation, Location, PartialLocation, TargetFormat};
    ///
    /// let geo = GeoLocation::new(49.9, -97.1).unwrap();
    /// assert_eq!(
    ///     Location::Point(geo).to_partial(TargetFormat::TransitApi).unwrap(),
    ///     PartialLocation::Point(geo)
    /// );
    /// ```
    pub fn to_partial(&self, target: TargetFormat) -> Result<PartialLocation, DomainError> {
        match target {
            TargetFormat::TransitApi => Ok(match self {
                Self::Address(address) => PartialLocation::Address(address.key.to_string()),
                Self::Monument(monument) => PartialLocation::Monument(monument.key.to_string()),
                Self::Intersection(intersection) => {
                    PartialLocation::Intersection(intersection.key.clone())
                }
                Self::Point(point) => PartialLocation::Point(*point),
                Self::Stop(stop) => PartialLocation::Stop(stop.key),
            }),
            TargetFormat::External => match self {
                Self::Monument(monument) => Ok(PartialLocation::Monument(monument.name.clone())),
                Self::Address(address) => Ok(PartialLocation::Point(address.centre)),
                Self::Intersection(intersection) => Ok(PartialLocation::Point(intersection.centre)),
                Self::Point(point) => Ok(PartialLocation::Point(*point)),
                Self::Stop(stop) => stop
                    .centre
                    .map(PartialLocation::Point)
                    .ok_or(DomainError::MissingCentre(self.kind())),
            },
        }
    }
}
