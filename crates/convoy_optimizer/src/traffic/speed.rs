use crate::problem::kmh::Kmh;

const HIGHWAY_SPEED: Kmh = Kmh::new(50.0);
const ARTERIAL_SPEED: Kmh = Kmh::new(35.0);
const STREET_SPEED: Kmh = Kmh::new(20.0);

/// Free-flow speed for a hop. The hop length stands in for the road class:
/// long hops are assumed to run on faster roads.
pub fn base_speed_kmh(distance_km: f64) -> Kmh {
    if distance_km > 5.0 {
        HIGHWAY_SPEED
    } else if distance_km < 1.0 {
        STREET_SPEED
    } else {
        ARTERIAL_SPEED
    }
}

/// Minutes to cover `distance_km` at `base_speed` slowed by `traffic_factor`.
pub fn segment_time_min(distance_km: f64, traffic_factor: f64, base_speed: Kmh) -> f64 {
    base_speed
        .under_traffic(traffic_factor)
        .minutes_for(distance_km)
}
