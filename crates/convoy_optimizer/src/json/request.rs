use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};

use crate::{
    engine::OptimizationRequest,
    error::PoolingError,
    pooling::{
        pooling_params::{KMeansParams, PairwiseParams},
        pooling_strategy::PoolingStrategy,
    },
    problem::{
        carrier::Carrier,
        point::Point,
        shipment::{Priority, ShipmentBuilder},
    },
};

#[derive(Deserialize, JsonSchema)]
#[serde(rename = "OptimizationRequest", rename_all = "camelCase")]
pub struct JsonOptimizationRequest {
    /// Entries that are not shipment objects read as empty shipments, which
    /// fail validation on their own.
    #[serde(deserialize_with = "lenient_shipments")]
    pub shipments: Vec<JsonShipment>,
    #[serde(default)]
    pub carriers: Vec<Carrier>,
    pub strategy: JsonStrategy,
    #[serde(default)]
    pub options: JsonPoolingOptions,
    /// Seed for K-means centroid sampling.
    pub seed: Option<u64>,
}

#[derive(Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename = "Strategy", rename_all = "lowercase")]
pub enum JsonStrategy {
    Greedy,
    KMeans,
}

#[derive(Deserialize, JsonSchema, Debug, Default, Clone, PartialEq)]
#[serde(rename = "PoolingOptions", rename_all = "camelCase")]
pub struct JsonPoolingOptions {
    pub max_pool_size: Option<i64>,
    pub pickup_join_distance_km: Option<f64>,
    pub min_pair_score: Option<f64>,
    pub max_clusters: Option<i64>,
}

/// Malformed fields read as absent so that only the shipment carrying them is
/// rejected, never the whole request.
#[derive(Deserialize, JsonSchema, Debug, Default, Clone, PartialEq)]
#[serde(rename = "Shipment")]
pub struct JsonShipment {
    #[serde(default, deserialize_with = "lenient")]
    #[schemars(with = "Option<String>")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    #[schemars(with = "Option<JsonCoordinates>")]
    pub pickup: Option<JsonCoordinates>,
    #[serde(default, deserialize_with = "lenient")]
    #[schemars(with = "Option<JsonCoordinates>")]
    pub drop: Option<JsonCoordinates>,
    #[serde(default, deserialize_with = "lenient_number")]
    #[schemars(with = "Option<f64>")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    #[schemars(with = "Option<f64>")]
    pub volume: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    #[schemars(with = "Option<Priority>")]
    pub priority: Option<Priority>,
}

#[derive(Deserialize, JsonSchema, Debug, Default, Clone, PartialEq)]
#[serde(rename = "Coordinates")]
pub struct JsonCoordinates {
    #[serde(default, deserialize_with = "lenient_number")]
    #[schemars(with = "Option<f64>")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    #[schemars(with = "Option<f64>")]
    pub lng: Option<f64>,
}

impl JsonCoordinates {
    fn to_point(&self) -> Option<Point> {
        Some(Point::new(self.lat?, self.lng?))
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_shipments<'de, D>(deserializer: D) -> Result<Vec<JsonShipment>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<serde_json::Value>::deserialize(deserializer)?;

    Ok(entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).unwrap_or_default())
        .collect())
}

/// Numbers, or strings holding a number.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    Ok(match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    })
}

impl From<JsonShipment> for ShipmentBuilder {
    fn from(value: JsonShipment) -> Self {
        let mut builder = ShipmentBuilder::default();

        if let Some(id) = value.id {
            builder.set_id(id);
        }
        if let Some(pickup) = value.pickup.as_ref().and_then(JsonCoordinates::to_point) {
            builder.set_pickup(pickup);
        }
        if let Some(drop) = value.drop.as_ref().and_then(JsonCoordinates::to_point) {
            builder.set_drop(drop);
        }
        if let Some(weight) = value.weight {
            builder.set_weight(weight);
        }
        if let Some(volume) = value.volume {
            builder.set_volume(volume);
        }
        if let Some(priority) = value.priority {
            builder.set_priority(priority);
        }

        builder
    }
}

/// Applies the request options on top of the default parameters. Options
/// that do not concern the chosen strategy are ignored.
pub fn build_strategy(
    strategy: JsonStrategy,
    options: &JsonPoolingOptions,
) -> Result<PoolingStrategy, PoolingError> {
    match strategy {
        JsonStrategy::Greedy => {
            let mut params = PairwiseParams::default();

            if let Some(max_pool_size) = options.max_pool_size {
                if max_pool_size < 1 {
                    return Err(PoolingError::InvalidMaxPoolSize(max_pool_size));
                }
                params.max_pool_size = max_pool_size as usize;
            }
            if let Some(distance) = options.pickup_join_distance_km {
                params.pickup_join_distance_km = distance;
            }
            if let Some(score) = options.min_pair_score {
                params.min_pair_score = score;
            }

            params.validate()?;
            Ok(PoolingStrategy::Greedy(params))
        }
        JsonStrategy::KMeans => {
            let mut params = KMeansParams::default();

            if let Some(max_clusters) = options.max_clusters {
                if max_clusters < 1 {
                    return Err(PoolingError::InvalidClusterCount(max_clusters));
                }
                params.max_clusters = Some(max_clusters as usize);
            }

            Ok(PoolingStrategy::KMeans(params))
        }
    }
}

pub fn build_request(request: JsonOptimizationRequest) -> Result<OptimizationRequest, PoolingError> {
    let strategy = build_strategy(request.strategy, &request.options)?;

    Ok(OptimizationRequest {
        shipments: request.shipments.into_iter().map(ShipmentBuilder::from).collect(),
        carriers: request.carriers,
        strategy,
    })
}
