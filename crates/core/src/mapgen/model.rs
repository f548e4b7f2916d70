//! Arena-backed map model published to renderer and UI collaborators.

use slotmap::SlotMap;
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{NodeId, NodeKind};

/// One generated node. `predecessors` and `successors` only ever reference
/// the row directly above/below, and column order within a row is fixed at
/// creation; that ordering is the basis of the non-crossing guarantee.
/// Consumers derive screen positions from `(row, col)` and edges from the
/// successor lists, nothing else.
#[derive(Clone, Debug)]
pub struct MapNode<H> {
    pub id: NodeId,
    pub row: usize,
    pub col: usize,
    pub kind: NodeKind,
    pub predecessors: Vec<NodeId>,
    pub successors: Vec<NodeId>,
    /// Opaque external representation attached by the injected factory.
    /// Present on every node of a successfully generated map.
    pub handle: Option<H>,
}

/// One act's row graph. Row 0 is the entry row, the last row the boss row.
#[derive(Clone, Debug)]
pub struct ActMap<H> {
    pub act_id: u32,
    pub nodes: SlotMap<NodeId, MapNode<H>>,
    pub rows: Vec<Vec<NodeId>>,
}

impl<H> ActMap<H> {
    pub fn node(&self, id: NodeId) -> &MapNode<H> {
        &self.nodes[id]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Stable byte serialization of topology and kinds. Relations are
    /// written as column coordinates, so the bytes are independent of arena
    /// keys and handles.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.act_id.to_le_bytes());
        bytes.extend((self.rows.len() as u32).to_le_bytes());
        for row in &self.rows {
            bytes.extend((row.len() as u32).to_le_bytes());
            for &id in row {
                let node = &self.nodes[id];
                bytes.push(kind_code(node.kind));
                bytes.extend((node.predecessors.len() as u32).to_le_bytes());
                for &predecessor in &node.predecessors {
                    bytes.extend((self.nodes[predecessor].col as u32).to_le_bytes());
                }
                bytes.extend((node.successors.len() as u32).to_le_bytes());
                for &successor in &node.successors {
                    bytes.extend((self.nodes[successor].col as u32).to_le_bytes());
                }
            }
        }
        bytes
    }
}

/// The whole generated run: the seed it came from plus one map per act.
#[derive(Clone, Debug)]
pub struct GameMap<H> {
    pub seed: i64,
    pub acts: Vec<ActMap<H>>,
}

impl<H> GameMap<H> {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.seed.to_le_bytes());
        bytes.extend((self.acts.len() as u32).to_le_bytes());
        for act in &self.acts {
            bytes.extend(act.canonical_bytes());
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn kind_code(kind: NodeKind) -> u8 {
    match kind {
        NodeKind::Basic => 0,
        NodeKind::Elite => 1,
        NodeKind::Rest => 2,
        NodeKind::Boss => 3,
    }
}
