use serde::Serialize;

use crate::{
    problem::{point::Point, shipment::Shipment},
    routing::route_segment::RouteSegment,
};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Pickup,
    Drop,
}

/// A visit to one end of a shipment.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub kind: StopKind,
    pub shipment_id: String,
    pub point: Point,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedRoute {
    pub(crate) pool_id: String,
    pub(crate) shipments: Vec<Shipment>,
    pub(crate) route_coordinates: Vec<Point>,
    pub(crate) stops: Vec<RouteStop>,
    pub(crate) segments: Vec<RouteSegment>,
    pub(crate) total_distance_km: f64,
    pub(crate) total_time_min: f64,
    /// Shipments served per hour of driving.
    pub(crate) efficiency: f64,
}

impl OptimizedRoute {
    pub fn pool_id(&self) -> &str {
        &self.pool_id
    }

    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    /// Stop coordinates in visiting order.
    pub fn route_coordinates(&self) -> &[Point] {
        &self.route_coordinates
    }

    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn total_time_min(&self) -> f64 {
        self.total_time_min
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }
}

/// `shipments / max(1, hours)`, so short routes are not rewarded beyond
/// their shipment count.
pub fn route_efficiency(shipment_count: usize, total_time_min: f64) -> f64 {
    shipment_count as f64 / (total_time_min / 60.0).max(1.0)
}
