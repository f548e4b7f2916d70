//! Act-pipeline orchestration and atomic publication of generated maps.

use std::fmt;

use super::assign::assign_node_kinds;
use super::config::{ConfigError, MapConfig};
use super::connect::connect_rows;
use super::factory::{FactoryError, NodeFactory};
use super::model::{ActMap, GameMap};
use super::rng::SeededRandom;
use super::topology::build_topology;
use crate::types::NodeId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerateError {
    Config(ConfigError),
    SplitPointStarvation { upper_row: usize, requested: usize, available: usize },
    Factory(FactoryError),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(error) => write!(f, "invalid map configuration: {error}"),
            Self::SplitPointStarvation { upper_row, requested, available } => write!(
                f,
                "cannot draw {requested} distinct split points between rows {upper_row} and {} \
                 (only {available} positions available)",
                upper_row + 1
            ),
            Self::Factory(error) => write!(f, "node factory failed: {error}"),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(error) => Some(error),
            Self::Factory(error) => Some(error),
            Self::SplitPointStarvation { .. } => None,
        }
    }
}

/// Owns the validated configuration, the injected instance factory, and the
/// currently published map. Generation is synchronous and single-pass; a
/// map becomes visible only once it is complete.
pub struct MapGenerator<F: NodeFactory> {
    config: MapConfig,
    factory: F,
    game_map: Option<GameMap<F::Handle>>,
}

impl<F: NodeFactory> MapGenerator<F> {
    /// Validates `config` up front; nothing is generated on failure.
    pub fn new(config: MapConfig, factory: F) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, factory, game_map: None })
    }

    /// Builds a fresh map for `seed` and swaps it in only once complete; on
    /// error the previously published map stays untouched.
    pub fn generate(&mut self, seed: i64) -> Result<&GameMap<F::Handle>, GenerateError> {
        let game_map = build_game_map(&self.config, &mut self.factory, seed)?;
        Ok(self.game_map.insert(game_map))
    }

    /// Full replacement from a new seed; prior state is discarded entirely.
    pub fn regenerate(&mut self, seed: i64) -> Result<&GameMap<F::Handle>, GenerateError> {
        self.generate(seed)
    }

    /// Currently published map, if any, for read-only traversal.
    pub fn game_map(&self) -> Option<&GameMap<F::Handle>> {
        self.game_map.as_ref()
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }
}

pub(super) fn build_game_map<F: NodeFactory>(
    config: &MapConfig,
    factory: &mut F,
    seed: i64,
) -> Result<GameMap<F::Handle>, GenerateError> {
    let mut random = SeededRandom::new(seed);
    let mut acts = Vec::with_capacity(config.act_count as usize);
    for act_id in 1..=config.act_count {
        acts.push(generate_act(act_id, config, &mut random, factory)?);
    }
    Ok(GameMap { seed, acts })
}

fn generate_act<F: NodeFactory>(
    act_id: u32,
    config: &MapConfig,
    random: &mut SeededRandom,
    factory: &mut F,
) -> Result<ActMap<F::Handle>, GenerateError> {
    let mut act = build_topology(act_id, config, random);
    connect_rows(&mut act, random)?;
    assign_node_kinds(&mut act, config, random, factory)?;
    attach_remaining_handles(&mut act, factory)?;
    Ok(act)
}

/// Nodes that kept the default kind never met the factory during
/// assignment; every published node still has to carry a handle.
fn attach_remaining_handles<F: NodeFactory>(
    act: &mut ActMap<F::Handle>,
    factory: &mut F,
) -> Result<(), GenerateError> {
    let pending: Vec<NodeId> = act
        .rows
        .iter()
        .flatten()
        .copied()
        .filter(|&id| act.nodes[id].handle.is_none())
        .collect();
    for id in pending {
        let kind = act.nodes[id].kind;
        let handle = factory.create(kind).map_err(GenerateError::Factory)?;
        act.nodes[id].handle = Some(handle);
    }
    Ok(())
}
