//! Addressable places: addresses, monuments and street intersections.

use super::{GeoLocation, Street};

/// A residential or commercial address.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    /// Unique key of the address
    pub key: u32,

    /// The street the address is on. Owned: two addresses on the
    /// same street each carry their own copy.
    pub street: Street,

    /// House number
    pub street_number: u32,

    /// Geographic centre of the address
    pub centre: GeoLocation,
}

/// A significant point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct Monument {
    /// Unique key of the point of interest
    pub key: u32,

    /// What the point of interest is called
    pub name: String,

    /// Categories, in the order the dataset lists them
    pub categories: Vec<String>,

    /// Where the point of interest is
    pub address: Address,
}

impl Monument {
    /// Returns the geographic centre, taken from the monument's address.
    pub fn centre(&self) -> GeoLocation {
        self.address.centre
    }
}

/// The intersection of two streets.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    /// Unique key, composed from the keys of the two streets
    pub key: String,

    /// The main street
    pub street: Street,

    /// The street crossing the main street
    pub cross_street: Street,

    /// Geographic centre of the intersection
    pub centre: GeoLocation,
}

impl Intersection {
    /// Compose the conventional intersection key from two street keys.
    ///
    /// The smaller key always comes first, so the key doesn't depend on
    /// which street is considered the main one.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_wire::domain::Intersection;
    ///
    /// assert_eq!(Intersection::compose_key(2265, 1311), "1311-2265");
    /// assert_eq!(Intersection::compose_key(1311, 2265), "1311-2265");
    /// ```
    pub fn compose_key(a: u32, b: u32) -> String {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        format!("{low}-{high}")
    }
}
