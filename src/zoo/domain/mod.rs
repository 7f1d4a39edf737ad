pub mod biome;
pub mod capacity;
pub mod coexistence;
pub mod engine;
pub mod types;

pub use engine::{AllocationEngine, AllocationResult};
