pub mod engine;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod json;
pub mod pooling;
pub mod problem;
pub mod routing;
pub mod summary;
pub mod traffic;
mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
