pub mod optimized_route;
pub mod route_segment;
pub mod route_sequencer;
