use jiff::Timestamp;
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{
    engine::{BatchOptimization, GreedyPooling, OptimizationOutcome},
    error::PoolingError,
    problem::{point::Point, pool::Pool},
    routing::optimized_route::OptimizedRoute,
    summary::OptimizationSummary,
};

pub const ROUTING_METHOD: &str = "nearest_neighbor";

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum JsonOptimizationResponse {
    Batch(JsonBatchResponse),
    Greedy(JsonGreedyResponse),
    Error(JsonErrorResponse),
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonBatchResponse {
    pub success: bool,
    pub summary: OptimizationSummary,
    pub routes: Vec<OptimizedRoute>,
    pub clusters: Vec<JsonCluster>,
    pub metadata: JsonMetadata,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JsonCluster {
    pub id: String,
    pub shipment_ids: Vec<String>,
    pub centroid: Point,
    pub total_weight: f64,
    pub total_volume: f64,
    pub num_shipments: usize,
}

impl From<&Pool> for JsonCluster {
    fn from(pool: &Pool) -> Self {
        JsonCluster {
            id: pool.id().to_owned(),
            shipment_ids: pool.shipment_ids().map(str::to_owned).collect(),
            centroid: pool.pickup_centroid(),
            total_weight: pool.total_weight(),
            total_volume: pool.total_volume(),
            num_shipments: pool.len(),
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JsonMetadata {
    pub generated_at: Timestamp,
    pub algorithm_name: String,
    pub routing_method: String,
    pub num_clusters: usize,
    pub total_shipments: usize,
    pub rejected_shipments: usize,
    pub iterations: Option<usize>,
    pub converged: Option<bool>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonGreedyResponse {
    pub success: bool,
    pub pools: Vec<Pool>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct JsonErrorResponse {
    pub success: bool,
    pub error: JsonError,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct JsonError {
    pub kind: String,
    pub message: String,
}

impl From<&PoolingError> for JsonErrorResponse {
    fn from(error: &PoolingError) -> Self {
        JsonErrorResponse {
            success: false,
            error: JsonError {
                kind: error.kind().to_owned(),
                message: error.to_string(),
            },
        }
    }
}

impl JsonBatchResponse {
    pub fn new(batch: BatchOptimization, generated_at: Timestamp) -> Self {
        let clusters: Vec<JsonCluster> = batch.pools.iter().map(JsonCluster::from).collect();

        JsonBatchResponse {
            success: true,
            metadata: JsonMetadata {
                generated_at,
                algorithm_name: batch.algorithm_name.to_owned(),
                routing_method: ROUTING_METHOD.to_owned(),
                num_clusters: clusters.len(),
                total_shipments: batch.total_shipments,
                rejected_shipments: batch.rejected_shipments,
                iterations: batch.clustering.map(|report| report.iterations),
                converged: batch.clustering.map(|report| report.converged),
            },
            summary: batch.summary,
            routes: batch.routes,
            clusters,
        }
    }
}

impl From<GreedyPooling> for JsonGreedyResponse {
    fn from(greedy: GreedyPooling) -> Self {
        JsonGreedyResponse {
            success: true,
            pools: greedy.pools,
        }
    }
}

/// Converts an engine result into the response body. `generated_at` is
/// stamped into batch metadata.
pub fn build_response(
    result: Result<OptimizationOutcome, PoolingError>,
    generated_at: Timestamp,
) -> JsonOptimizationResponse {
    match result {
        Ok(OptimizationOutcome::Batch(batch)) => {
            JsonOptimizationResponse::Batch(JsonBatchResponse::new(batch, generated_at))
        }
        Ok(OptimizationOutcome::Greedy(greedy)) => JsonOptimizationResponse::Greedy(greedy.into()),
        Err(error) => JsonOptimizationResponse::Error(JsonErrorResponse::from(&error)),
    }
}
