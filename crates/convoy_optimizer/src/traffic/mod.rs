pub mod speed;
pub mod traffic_model;
pub mod traffic_params;
