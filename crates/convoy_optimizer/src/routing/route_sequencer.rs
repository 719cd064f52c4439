use jiff::Zoned;

use crate::{
    geometry,
    problem::{point::Point, pool::Pool, shipment::Shipment},
    routing::{
        optimized_route::{OptimizedRoute, RouteStop, StopKind, route_efficiency},
        route_segment::RouteSegment,
    },
    traffic::{
        speed::{base_speed_kmh, segment_time_min},
        traffic_model::TrafficModel,
    },
};

/// Orders a pool's stops and estimates each hop.
///
/// The order is a nearest-neighbour heuristic: from a virtual origin (the
/// pickup centroid unless one is given) it repeatedly visits the closest
/// unvisited pickup, then does the same over the drops starting from the last
/// pickup. Pickups and drops are never interleaved. It is cheap and
/// deterministic but makes no claim to the shortest tour.
pub struct RouteSequencer<'a, T>
where
    T: TrafficModel + ?Sized,
{
    traffic: &'a T,
}

impl<'a, T> RouteSequencer<'a, T>
where
    T: TrafficModel + ?Sized,
{
    pub fn new(traffic: &'a T) -> Self {
        RouteSequencer { traffic }
    }

    pub fn sequence(&self, pool: &Pool, at: &Zoned) -> OptimizedRoute {
        self.sequence_from(pool, pool.pickup_centroid(), at)
    }

    /// Like [`RouteSequencer::sequence`] with an explicit starting location.
    /// The origin itself is not part of the emitted route.
    pub fn sequence_from(&self, pool: &Pool, origin: Point, at: &Zoned) -> OptimizedRoute {
        let stops = visiting_order(pool.shipments(), origin);

        let segments: Vec<RouteSegment> = stops
            .windows(2)
            .map(|hop| self.segment(hop[0].point, hop[1].point, at))
            .collect();

        let total_distance_km = segments.iter().map(RouteSegment::distance_km).sum();
        let total_time_min: f64 = segments.iter().map(RouteSegment::estimated_time_min).sum();

        OptimizedRoute {
            pool_id: pool.id().to_owned(),
            shipments: pool.shipments().to_vec(),
            route_coordinates: stops.iter().map(|stop| stop.point).collect(),
            stops,
            segments,
            total_distance_km,
            total_time_min,
            efficiency: route_efficiency(pool.len(), total_time_min),
        }
    }

    pub fn segment(&self, from: Point, to: Point, at: &Zoned) -> RouteSegment {
        let distance_km = geometry::distance_km(from, to);
        let traffic_factor = self.traffic.traffic_factor(from, to, at);
        let estimated_time_min =
            segment_time_min(distance_km, traffic_factor, base_speed_kmh(distance_km));

        RouteSegment::new(from, to, distance_km, estimated_time_min, traffic_factor)
    }
}

/// All pickups, then all drops, each phase nearest-neighbour from where the
/// previous one ended. Ties go to the shipment listed first.
pub fn visiting_order(shipments: &[Shipment], origin: Point) -> Vec<RouteStop> {
    let mut stops = Vec::with_capacity(shipments.len() * 2);

    let last_pickup = nearest_neighbour_pass(shipments, StopKind::Pickup, origin, &mut stops);
    nearest_neighbour_pass(shipments, StopKind::Drop, last_pickup, &mut stops);

    stops
}

fn nearest_neighbour_pass(
    shipments: &[Shipment],
    kind: StopKind,
    start: Point,
    stops: &mut Vec<RouteStop>,
) -> Point {
    let location = |shipment: &Shipment| match kind {
        StopKind::Pickup => shipment.pickup(),
        StopKind::Drop => shipment.drop(),
    };

    let mut visited = vec![false; shipments.len()];
    let mut current = start;

    for _ in 0..shipments.len() {
        let mut nearest: Option<(usize, f64)> = None;

        for (index, shipment) in shipments.iter().enumerate() {
            if visited[index] {
                continue;
            }

            let distance = geometry::distance_km(current, location(shipment));
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((index, distance));
            }
        }

        let Some((index, _)) = nearest else {
            break;
        };

        visited[index] = true;
        current = location(&shipments[index]);
        stops.push(RouteStop {
            kind,
            shipment_id: shipments[index].id().to_owned(),
            point: current,
        });
    }

    current
}
