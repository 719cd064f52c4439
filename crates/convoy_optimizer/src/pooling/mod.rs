pub mod compatibility;
pub mod kmeans;
pub mod pairwise_matcher;
pub mod pooling_params;
pub mod pooling_strategy;
