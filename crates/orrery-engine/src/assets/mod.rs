pub mod bodies;
pub mod registry;
