pub mod mapgen;
pub mod types;

pub use mapgen::{
    ActMap, ConfigError, DEFAULT_SEED, FactoryError, GameMap, GenerateError, MapConfig,
    MapGenerator, MapNode, NodeCountRange, NodeFactory, NodeRule, NodeToken, RowClass,
    RowCountRanges, SeededRandom, TokenFactory, generate_game_map,
};
pub use types::*;
