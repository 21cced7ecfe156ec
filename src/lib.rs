pub mod chart;
pub mod chronicle;
pub mod config;
pub mod cultivator;
pub mod engine;
pub mod export;
pub mod report;
pub mod rng;
pub mod scenario;
pub mod stats;
pub mod systems;
pub mod tier;
pub mod world;

pub use config::{ConfigError, SimulationConfig};
pub use cultivator::{Cultivator, CultivatorId};
pub use engine::{Engine, EngineBuilder, EngineSettings};
pub use stats::YearStatistics;
pub use tier::Tier;
pub use world::World;
