use jiff::{Zoned, civil::Weekday};

use crate::{geometry, problem::point::Point, traffic::traffic_params::TrafficParams};

/// Maps a hop and the local wall-clock time to a travel-time multiplier.
///
/// Values above 1 slow travel down, values below 1 speed it up. The time is
/// always passed in so the same arguments give the same factor.
pub trait TrafficModel {
    fn traffic_factor(&self, from: Point, to: Point, at: &Zoned) -> f64;
}

/// Rush hours, weekends and long hops, combined multiplicatively.
#[derive(Debug, Clone, Default)]
pub struct TimeOfDayTraffic {
    params: TrafficParams,
}

impl TimeOfDayTraffic {
    pub fn new(params: TrafficParams) -> Self {
        TimeOfDayTraffic { params }
    }

    pub fn params(&self) -> &TrafficParams {
        &self.params
    }
}

impl TrafficModel for TimeOfDayTraffic {
    fn traffic_factor(&self, from: Point, to: Point, at: &Zoned) -> f64 {
        let mut factor = 1.0;

        if self.params.is_rush_hour(at.hour()) {
            factor *= self.params.rush_hour_multiplier;
        }

        if matches!(at.weekday(), Weekday::Saturday | Weekday::Sunday) {
            factor *= self.params.weekend_multiplier;
        }

        if geometry::distance_km(from, to) > self.params.long_segment_threshold_km {
            factor *= self.params.long_segment_multiplier;
        }

        factor
    }
}

/// No congestion at any time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeFlowTraffic;

impl TrafficModel for FreeFlowTraffic {
    fn traffic_factor(&self, _from: Point, _to: Point, _at: &Zoned) -> f64 {
        1.0
    }
}
