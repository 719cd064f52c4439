use schemars::schema_for;

use crate::{json::request, traffic::traffic_params::TrafficParams};

pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(request::JsonOptimizationRequest))
}

pub fn generate_traffic_params_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(TrafficParams))
}
