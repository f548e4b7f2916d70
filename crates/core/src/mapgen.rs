//! Seeded run-map generation split into coherent submodules.

pub mod config;
pub mod factory;
pub mod model;
pub mod rng;

mod assign;
mod connect;
mod generator;
mod topology;

pub use config::{ConfigError, MapConfig, NodeCountRange, NodeRule, RowClass, RowCountRanges};
pub use factory::{FactoryError, NodeFactory, NodeToken, TokenFactory};
pub use generator::{GenerateError, MapGenerator};
pub use model::{ActMap, GameMap, MapNode};
pub use rng::SeededRandom;

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: i64 = 12_345;

/// One-shot convenience over [`MapGenerator`] for callers that never
/// regenerate.
pub fn generate_game_map<F: NodeFactory>(
    config: &MapConfig,
    mut factory: F,
    seed: i64,
) -> Result<GameMap<F::Handle>, GenerateError> {
    config.validate().map_err(GenerateError::Config)?;
    generator::build_game_map(config, &mut factory, seed)
}
