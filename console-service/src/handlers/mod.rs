pub mod metrics;
pub mod roles;
pub mod systems;
