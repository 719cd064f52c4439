pub mod carrier;
pub mod kmh;
pub mod point;
pub mod pool;
pub mod shipment;
