//! Outbound query building: filter collections and URL parameters.

mod filter;

use std::mem;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::PartialLocation;

pub use crate::domain::{Category, Priority};
pub use filter::{
    ClockTime, Mode, QueryFilter, ServiceAdvisoryFilter, StopScheduleFilter, StreetFilter,
    TripPlanFilter,
};

/// How verbose the names in a response should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Usage {
    #[default]
    Normal,
    Long,
    Short,
}

impl Usage {
    /// Returns the `usage` parameter, or `None` for normal names.
    pub fn query_pair(&self) -> Option<(&'static str, String)> {
        match self {
            Self::Normal => None,
            Self::Long => Some(("usage", "long".into())),
            Self::Short => Some(("usage", "short".into())),
        }
    }
}

/// An ordered collection of filter options, at most one of each kind.
///
/// Pushing an option of a kind already present replaces it: the earlier
/// option is removed and the new one goes to the end.
///
/// # Examples
///
/// ```
/// use transit_wire::query::{FilterSet, TripPlanFilter};
///
/// let mut filters = FilterSet::new();
/// filters.push(TripPlanFilter::MaxTransfers(3));
/// filters.push(TripPlanFilter::MaxWalkTime(10));
/// filters.push(TripPlanFilter::MaxTransfers(1));
///
/// assert_eq!(filters.query_string(), "max-walk-time=10&max-transfers=1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterSet<F> {
    options: Vec<F>,
}

impl<F> Default for FilterSet<F> {
    fn default() -> Self {
        Self {
            options: Vec::new(),
        }
    }
}

impl<F: QueryFilter> FilterSet<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option, replacing any earlier option of the same kind.
    pub fn push(&mut self, option: F) {
        let kind = mem::discriminant(&option);
        if let Some(index) = self
            .options
            .iter()
            .position(|existing| mem::discriminant(existing) == kind)
        {
            let superseded = self.options.remove(index);
            debug!(?superseded, replacement = ?option, "filter option superseded");
        }
        self.options.push(option);
    }

    /// Builder form of [`FilterSet::push`].
    pub fn with(mut self, option: F) -> Self {
        self.push(option);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Encode as a JSON array of single-key objects.
    pub fn to_wire(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Returns the URL parameters, in insertion order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.options.iter().filter_map(QueryFilter::query_pair).collect()
    }

    /// Returns the URL-encoded query string (without a leading `?`).
    pub fn query_string(&self) -> String {
        encode_pairs(self.query_pairs())
    }
}

impl<F: QueryFilter> FromIterator<F> for FilterSet<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        let mut set = Self::new();
        for option in iter {
            set.push(option);
        }
        set
    }
}

impl<F: QueryFilter> Extend<F> for FilterSet<F> {
    fn extend<I: IntoIterator<Item = F>>(&mut self, iter: I) {
        for option in iter {
            self.push(option);
        }
    }
}

fn encode_pairs(pairs: impl IntoIterator<Item = (&'static str, String)>) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Build the trip planner query string.
///
/// Origin and destination are rendered as resource paths
/// (`geo/49.9,-97.1`, `stops/10064`), followed by the filters in order.
pub fn trip_plan_query(
    origin: &PartialLocation,
    destination: &PartialLocation,
    filters: &FilterSet<TripPlanFilter>,
    usage: Usage,
) -> String {
    let pairs = usage
        .query_pair()
        .into_iter()
        .chain([
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
        ])
        .chain(filters.query_pairs());
    encode_pairs(pairs)
}
