use crate::{
    geometry,
    pooling::pooling_params::PairwiseParams,
    problem::{pool::Pool, shipment::Shipment},
};

/// Alignment used when a direction is undefined: no preference either way.
pub const NEUTRAL_ALIGNMENT: f64 = 0.5;

/// Scores how well two trips fit in one vehicle.
///
/// The score mixes pickup proximity (1 at the same pickup, 0 at the join
/// distance) with direction alignment (1 for parallel pickup-to-drop
/// bearings, 0 for opposite ones). Anything past the join distance or under
/// the minimum score is ineligible and yields `None`.
#[derive(Debug, Clone)]
pub struct CompatibilityScorer {
    join_distance_km: f64,
    min_score: f64,
    proximity_weight: f64,
    alignment_weight: f64,
}

impl CompatibilityScorer {
    pub fn new(params: &PairwiseParams) -> Self {
        let (proximity_weight, alignment_weight) = params.normalized_weights();

        CompatibilityScorer {
            join_distance_km: params.pickup_join_distance_km,
            min_score: params.min_pair_score,
            proximity_weight,
            alignment_weight,
        }
    }

    pub fn pair_score(&self, a: &Shipment, b: &Shipment) -> Option<f64> {
        self.score(
            geometry::distance_km(a.pickup(), b.pickup()),
            shipment_bearing(a),
            shipment_bearing(b),
        )
    }

    /// Scores `shipment` against the pool's pickup centroid and aggregate bearing.
    pub fn admission_score(&self, pool: &Pool, shipment: &Shipment) -> Option<f64> {
        self.score(
            geometry::distance_km(pool.pickup_centroid(), shipment.pickup()),
            pool.bearing_deg(),
            shipment_bearing(shipment),
        )
    }

    pub fn score(
        &self,
        pickup_distance_km: f64,
        bearing_a: Option<f64>,
        bearing_b: Option<f64>,
    ) -> Option<f64> {
        if !pickup_distance_km.is_finite() || pickup_distance_km > self.join_distance_km {
            return None;
        }

        let proximity = 1.0 - pickup_distance_km / self.join_distance_km;
        let score = self.proximity_weight * proximity
            + self.alignment_weight * alignment(bearing_a, bearing_b);

        (score >= self.min_score).then_some(score)
    }
}

/// Bearing from pickup to drop, `None` for a round trip.
pub fn shipment_bearing(shipment: &Shipment) -> Option<f64> {
    geometry::try_bearing_deg(shipment.pickup(), shipment.drop())
}

/// `1 - Δ/180` for the angle Δ between the bearings.
pub fn alignment(bearing_a: Option<f64>, bearing_b: Option<f64>) -> f64 {
    match (bearing_a, bearing_b) {
        (Some(a), Some(b)) => 1.0 - geometry::angular_difference_deg(a, b) / 180.0,
        _ => NEUTRAL_ALIGNMENT,
    }
}
