//! Trip settings: the rider's planning preferences.

use tracing::warn;

use crate::query::{FilterSet, TripPlanFilter};

/// Planning preferences applied to every trip plan request.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSettings {
    /// Walking speed in km/h.
    pub walking_speed: f32,

    /// Minimum minutes to wait at a transfer.
    pub min_waiting_time: u32,

    /// Maximum minutes to wait at a transfer.
    pub max_waiting_time: u32,

    /// Maximum number of transfers.
    pub max_transfers: u32,

    /// Maximum minutes of walking.
    pub max_walking_time: u32,
}

impl TripSettings {
    /// Create settings with the given parameters.
    pub fn new(
        walking_speed: f32,
        min_waiting_time: u32,
        max_waiting_time: u32,
        max_transfers: u32,
        max_walking_time: u32,
    ) -> Self {
        Self {
            walking_speed,
            min_waiting_time,
            max_waiting_time,
            max_transfers,
            max_walking_time,
        }
    }

    /// Defaults overridden by `TRANSIT_*` environment variables.
    ///
    /// Recognised: `TRANSIT_WALKING_SPEED`, `TRANSIT_MIN_WAITING_TIME`,
    /// `TRANSIT_MAX_WAITING_TIME`, `TRANSIT_MAX_TRANSFERS`,
    /// `TRANSIT_MAX_WALKING_TIME`. Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |name: &str, default: u32| override_with(&lookup, name, default);

        Self {
            walking_speed: override_with(&lookup, "TRANSIT_WALKING_SPEED", defaults.walking_speed),
            min_waiting_time: read("TRANSIT_MIN_WAITING_TIME", defaults.min_waiting_time),
            max_waiting_time: read("TRANSIT_MAX_WAITING_TIME", defaults.max_waiting_time),
            max_transfers: read("TRANSIT_MAX_TRANSFERS", defaults.max_transfers),
            max_walking_time: read("TRANSIT_MAX_WALKING_TIME", defaults.max_walking_time),
        }
    }

    /// Turn the settings into trip plan filters, values passed through as-is.
    pub fn trip_plan_filters(&self) -> FilterSet<TripPlanFilter> {
        FilterSet::new()
            .with(TripPlanFilter::WalkSpeed(self.walking_speed))
            .with(TripPlanFilter::MaxWalkTime(self.max_walking_time))
            .with(TripPlanFilter::MinTransferWait(self.min_waiting_time))
            .with(TripPlanFilter::MaxTransferWait(self.max_waiting_time))
            .with(TripPlanFilter::MaxTransfers(self.max_transfers))
    }
}

impl Default for TripSettings {
    fn default() -> Self {
        Self {
            walking_speed: 4.0,
            min_waiting_time: 0,
            max_waiting_time: 60,
            max_transfers: 10,
            max_walking_time: 30,
        }
    }
}

fn override_with<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> T {
    match lookup(name) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(variable = name, value = %raw, "ignoring unparseable setting");
                default
            }
        },
    }
}
