use serde::Serialize;

use crate::problem::point::Point;

/// One timed hop between two consecutive stops.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    from: Point,
    to: Point,
    distance_km: f64,
    estimated_time_min: f64,
    traffic_factor: f64,
}

impl RouteSegment {
    pub fn new(
        from: Point,
        to: Point,
        distance_km: f64,
        estimated_time_min: f64,
        traffic_factor: f64,
    ) -> Self {
        RouteSegment {
            from,
            to,
            distance_km,
            estimated_time_min,
            traffic_factor,
        }
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn estimated_time_min(&self) -> f64 {
        self.estimated_time_min
    }

    pub fn traffic_factor(&self) -> f64 {
        self.traffic_factor
    }
}
