use crate::error::PoolingError;

pub const DEFAULT_MAX_KMEANS_ITERATIONS: usize = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct PairwiseParams {
    pub max_pool_size: usize,
    /// Pickups further apart than this are never pooled.
    pub pickup_join_distance_km: f64,
    /// Minimum combined score, within `[0, 1]`, for a join to happen.
    ///
    /// With even weights a pair at the same pickup but heading in opposite
    /// directions scores exactly 0.5, so the default sits above that.
    pub min_pair_score: f64,
    pub proximity_weight: f64,
    pub alignment_weight: f64,
}

impl Default for PairwiseParams {
    fn default() -> Self {
        Self {
            max_pool_size: 5,
            pickup_join_distance_km: 5.0,
            min_pair_score: 0.55,
            proximity_weight: 0.5,
            alignment_weight: 0.5,
        }
    }
}

impl PairwiseParams {
    pub fn validate(&self) -> Result<(), PoolingError> {
        if self.max_pool_size < 1 {
            return Err(PoolingError::InvalidMaxPoolSize(self.max_pool_size as i64));
        }

        if !self.pickup_join_distance_km.is_finite() || self.pickup_join_distance_km <= 0.0 {
            return Err(PoolingError::InvalidJoinDistance(
                self.pickup_join_distance_km,
            ));
        }

        if !(0.0..=1.0).contains(&self.min_pair_score) {
            return Err(PoolingError::InvalidMinPairScore(self.min_pair_score));
        }

        Ok(())
    }

    /// Proximity and alignment weights scaled to sum to one. Falls back to an
    /// even split when both are zero or unusable.
    pub fn normalized_weights(&self) -> (f64, f64) {
        let proximity = self.proximity_weight.max(0.0);
        let alignment = self.alignment_weight.max(0.0);
        let total = proximity + alignment;

        if !total.is_finite() || total <= 0.0 {
            (0.5, 0.5)
        } else {
            (proximity / total, alignment / total)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KMeansParams {
    /// Requested cluster count; derived from the batch size when `None`.
    pub max_clusters: Option<usize>,
    pub max_iterations: usize,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self {
            max_clusters: None,
            max_iterations: DEFAULT_MAX_KMEANS_ITERATIONS,
        }
    }
}

impl KMeansParams {
    pub fn with_clusters(k: usize) -> Self {
        Self {
            max_clusters: Some(k),
            ..Self::default()
        }
    }

    /// Cluster count to use for `shipment_count` shipments.
    pub fn cluster_count(&self, shipment_count: usize) -> Result<usize, PoolingError> {
        match self.max_clusters {
            Some(0) => Err(PoolingError::InvalidClusterCount(0)),
            Some(k) => Ok(k),
            None => Ok(default_cluster_count(shipment_count)),
        }
    }
}

/// Roughly four shipments per pool, between 2 and 8 pools.
pub fn default_cluster_count(shipment_count: usize) -> usize {
    (shipment_count / 4).clamp(2, 8)
}
