//! Geographic coordinate types.

use std::fmt;

use super::DomainError;

/// A point on the Earth, as latitude and longitude in decimal degrees.
///
/// Coordinates are validated at construction: both must be finite,
/// latitude must lie in `-90..=90` and longitude in `-180..=180`.
///
/// # Examples
///
/// ```
/// use transit_wire::domain::GeoLocation;
///
/// let forks = GeoLocation::new(49.8875, -97.1306).unwrap();
/// assert_eq!(forks.latitude(), 49.8875);
///
/// // Out of range is rejected
/// assert!(GeoLocation::new(91.0, 0.0).is_err());
/// assert!(GeoLocation::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

impl GeoLocation {
    /// Create a new location, validating both coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(DomainError::NonFiniteCoordinate);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::LongitudeOutOfRange(longitude));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Debug for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoLocation({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// The geographic boundaries of a plan or segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    maximum: GeoLocation,
    minimum: GeoLocation,
}

impl Bounds {
    /// Create bounds, rejecting a minimum that lies beyond the maximum on either axis.
    pub fn new(maximum: GeoLocation, minimum: GeoLocation) -> Result<Self, DomainError> {
        if minimum.latitude > maximum.latitude || minimum.longitude > maximum.longitude {
            return Err(DomainError::InvertedBounds);
        }
        Ok(Self { maximum, minimum })
    }

    /// Returns the north-east corner.
    pub fn maximum(&self) -> GeoLocation {
        self.maximum
    }

    /// Returns the south-west corner.
    pub fn minimum(&self) -> GeoLocation {
        self.minimum
    }

    /// Returns true if the point lies inside (or on the edge of) the bounds.
    pub fn contains(&self, point: &GeoLocation) -> bool {
        (self.minimum.latitude..=self.maximum.latitude).contains(&point.latitude)
            && (self.minimum.longitude..=self.maximum.longitude).contains(&point.longitude)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every in-range coordinate pair is accepted and read back unchanged
        #[test]
        fn in_range_roundtrip(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            let geo = GeoLocation::new(lat, lon).unwrap();
            prop_assert_eq!(geo.latitude(), lat);
            prop_assert_eq!(geo.longitude(), lon);
        }

        /// Latitudes beyond the poles are always rejected
        #[test]
        fn latitude_beyond_poles_rejected(lat in 90.0001f64..1e6, lon in -180.0f64..=180.0) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
            prop_assert!(GeoLocation::new(-lat, lon).is_err());
        }
    }
}
