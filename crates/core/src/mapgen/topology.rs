//! Row/column skeleton synthesis for one act.

use slotmap::SlotMap;

use super::config::MapConfig;
use super::model::{ActMap, MapNode};
use super::rng::SeededRandom;
use crate::types::NodeKind;

/// Builds the bare row skeleton: exactly one bounded count draw per row, in
/// row order, then `count` Basic nodes with column indices `0..count`. No
/// connections are formed here.
pub(super) fn build_topology<H>(
    act_id: u32,
    config: &MapConfig,
    random: &mut SeededRandom,
) -> ActMap<H> {
    let mut nodes = SlotMap::with_key();
    let mut rows = Vec::with_capacity(config.max_row_index + 1);

    for row in 0..=config.max_row_index {
        let range = config.row_count_range(row);
        let count = random.next_int(range.min as i64, range.max as i64) as usize;

        let mut row_ids = Vec::with_capacity(count);
        for col in 0..count {
            let id = nodes.insert_with_key(|id| MapNode {
                id,
                row,
                col,
                kind: NodeKind::Basic,
                predecessors: Vec::new(),
                successors: Vec::new(),
                handle: None,
            });
            row_ids.push(id);
        }
        rows.push(row_ids);
    }

    ActMap { act_id, nodes, rows }
}
