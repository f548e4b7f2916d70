//! Non-crossing bipartite wiring between adjacent rows.

use slotmap::SlotMap;

use super::generator::GenerateError;
use super::model::{ActMap, MapNode};
use super::rng::SeededRandom;
use crate::types::NodeId;

/// Links every adjacent row pair so that no node is left isolated and no
/// two edges cross when drawn between row-ordered columns.
pub(super) fn connect_rows<H>(
    act: &mut ActMap<H>,
    random: &mut SeededRandom,
) -> Result<(), GenerateError> {
    let ActMap { rows, nodes, .. } = act;
    for row in 0..rows.len().saturating_sub(1) {
        connect_adjacent_rows(nodes, &rows[row], &rows[row + 1], row, random)?;
    }
    Ok(())
}

fn connect_adjacent_rows<H>(
    nodes: &mut SlotMap<NodeId, MapNode<H>>,
    upper: &[NodeId],
    lower: &[NodeId],
    upper_row: usize,
    random: &mut SeededRandom,
) -> Result<(), GenerateError> {
    // Roles are fixed up front instead of swapping recursively; ties keep
    // the upper row as `small`, and `swapped` tracks which side the
    // predecessor role lands on.
    let (small, large, swapped) =
        if upper.len() > lower.len() { (lower, upper, true) } else { (upper, lower, false) };

    let split_points = draw_split_points(random, large.len(), small.len(), upper_row)?;

    let mut bounds = Vec::with_capacity(small.len() + 1);
    bounds.push(0);
    bounds.extend(split_points);
    bounds.push(large.len());

    let chunks: Vec<&[NodeId]> =
        bounds.windows(2).map(|window| &large[window[0]..window[1]]).collect();

    for (index, chunk) in chunks.iter().enumerate() {
        let anchor = small[index];
        for &member in *chunk {
            link(nodes, anchor, member, swapped);
        }
        // One extra branch per chunk boundary, at even odds. The target is
        // the next chunk's first node, so column order stays monotonic and
        // the edge set stays crossing-free.
        if let Some(next_chunk) = chunks.get(index + 1) {
            if *random.pick(&[true, false]) {
                link(nodes, anchor, next_chunk[0], swapped);
            }
        }
    }

    Ok(())
}

/// Draws `chunk_count - 1` distinct split positions from `[1, large_len - 1]`
/// via a bounded partial Fisher-Yates selection (exactly `chunk_count - 1`
/// draws), returned sorted ascending. Starvation is reported instead of
/// re-rolling until unique.
fn draw_split_points(
    random: &mut SeededRandom,
    large_len: usize,
    chunk_count: usize,
    upper_row: usize,
) -> Result<Vec<usize>, GenerateError> {
    let requested = chunk_count - 1;
    let mut positions: Vec<usize> = (1..large_len).collect();
    if positions.len() < requested {
        return Err(GenerateError::SplitPointStarvation {
            upper_row,
            requested,
            available: positions.len(),
        });
    }

    for index in 0..requested {
        let swap_with = random.next_int(index as i64, positions.len() as i64 - 1) as usize;
        positions.swap(index, swap_with);
    }

    positions.truncate(requested);
    positions.sort_unstable();
    Ok(positions)
}

/// Mirrors one edge into both endpoint lists. `anchor` sits in the smaller
/// row, `member` in the larger one; successors always point from the upper
/// row to the lower row.
fn link<H>(
    nodes: &mut SlotMap<NodeId, MapNode<H>>,
    anchor: NodeId,
    member: NodeId,
    swapped: bool,
) {
    let (source, target) = if swapped { (member, anchor) } else { (anchor, member) };
    nodes[source].successors.push(target);
    nodes[target].predecessors.push(source);
}
