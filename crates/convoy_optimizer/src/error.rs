use thiserror::Error;

/// Failure of a whole pooling run. No partial output accompanies it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoolingError {
    #[error("no valid shipments to pool ({rejected} rejected)")]
    NoValidShipments { rejected: usize },
    #[error("max pool size must be at least 1, got {0}")]
    InvalidMaxPoolSize(i64),
    #[error("pickup join distance must be a positive number of km, got {0}")]
    InvalidJoinDistance(f64),
    #[error("minimum pair score must be within [0, 1], got {0}")]
    InvalidMinPairScore(f64),
    #[error("cluster count must be at least 1, got {0}")]
    InvalidClusterCount(i64),
}

impl PoolingError {
    /// Stable machine-readable code for the error.
    pub fn kind(&self) -> &'static str {
        match self {
            PoolingError::NoValidShipments { .. } => "no_valid_shipments",
            PoolingError::InvalidMaxPoolSize(_) => "invalid_max_pool_size",
            PoolingError::InvalidJoinDistance(_) => "invalid_join_distance",
            PoolingError::InvalidMinPairScore(_) => "invalid_min_pair_score",
            PoolingError::InvalidClusterCount(_) => "invalid_cluster_count",
        }
    }
}

/// Why a single shipment was excluded before pooling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidShipment {
    #[error("shipment without an id")]
    MissingId,
    #[error("shipment {0} has no usable pickup coordinates")]
    MissingPickup(String),
    #[error("shipment {0} has no usable drop coordinates")]
    MissingDrop(String),
    #[error("shipment {0} has non-finite coordinates")]
    NonFiniteCoordinates(String),
    #[error("shipment {0} repeats an id already in the batch")]
    DuplicateId(String),
}
