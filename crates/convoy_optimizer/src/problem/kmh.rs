use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Kmh(f64);

impl Kmh {
    pub const fn new(value: f64) -> Self {
        Kmh(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Speed once slowed down by `traffic_factor` (a factor of 2 halves it).
    pub fn under_traffic(&self, traffic_factor: f64) -> Kmh {
        Kmh(self.0 / traffic_factor)
    }

    /// Minutes needed to cover `distance_km` at this speed.
    pub fn minutes_for(&self, distance_km: f64) -> f64 {
        distance_km / self.0 * 60.0
    }
}
