//! Greedy constraint-based node-kind assignment.

use std::collections::BTreeMap;

use super::config::{MapConfig, NodeRule};
use super::factory::NodeFactory;
use super::generator::GenerateError;
use super::model::ActMap;
use super::rng::SeededRandom;
use crate::types::{NodeId, NodeKind};

/// Overwrites default kinds under the configured caps, row exclusions, and
/// adjacency rules: fixed rows first, then one greedy shuffled pass over the
/// editable nodes. A node no candidate fits simply stays Basic; that is
/// expected fallback behavior, not a failure.
pub(super) fn assign_node_kinds<F: NodeFactory>(
    act: &mut ActMap<F::Handle>,
    config: &MapConfig,
    random: &mut SeededRandom,
    factory: &mut F,
) -> Result<(), GenerateError> {
    let mut counters: BTreeMap<NodeKind, usize> = BTreeMap::new();
    counters.insert(NodeKind::Basic, act.node_count());
    for &kind in config.node_rules.keys() {
        counters.entry(kind).or_insert(0);
    }

    apply_fixed_rows(act, config, &mut counters, factory)?;

    let editable = collect_editable_nodes(act, config);
    let editable = random.shuffle(&editable);

    // Basic is the default and Boss only ever comes from a fixed row; the
    // remaining rule kinds are tried in declaration order.
    let candidates: Vec<(NodeKind, &NodeRule)> = config
        .node_rules
        .iter()
        .filter(|&(&kind, _)| kind != NodeKind::Basic && kind != NodeKind::Boss)
        .map(|(&kind, rule)| (kind, rule))
        .collect();

    for id in editable {
        for &(kind, rule) in &candidates {
            let used = counters.get(&kind).copied().unwrap_or(0);
            if !can_assign(act, rule, used, id, kind) {
                continue;
            }
            let handle = factory.create(kind).map_err(GenerateError::Factory)?;
            let node = &mut act.nodes[id];
            node.kind = kind;
            node.handle = Some(handle);
            *counters.entry(kind).or_insert(0) += 1;
            *counters.entry(NodeKind::Basic).or_insert(0) -= 1;
            break;
        }
    }

    Ok(())
}

/// Forces whole rows to their configured kinds, in ascending row order, and
/// attaches their handles right away.
fn apply_fixed_rows<F: NodeFactory>(
    act: &mut ActMap<F::Handle>,
    config: &MapConfig,
    counters: &mut BTreeMap<NodeKind, usize>,
    factory: &mut F,
) -> Result<(), GenerateError> {
    for (&row, &kind) in &config.fixed_rows {
        for id in act.rows[row].clone() {
            let handle = factory.create(kind).map_err(GenerateError::Factory)?;
            let node = &mut act.nodes[id];
            node.kind = kind;
            node.handle = Some(handle);
            *counters.entry(kind).or_insert(0) += 1;
            *counters.entry(NodeKind::Basic).or_insert(0) -= 1;
        }
    }
    Ok(())
}

/// Nodes eligible for special assignment: outside every fixed row and still
/// carrying the default kind, collected in row/column order.
fn collect_editable_nodes<H>(act: &ActMap<H>, config: &MapConfig) -> Vec<NodeId> {
    let mut editable = Vec::new();
    for (row, ids) in act.rows.iter().enumerate() {
        if config.fixed_rows.contains_key(&row) {
            continue;
        }
        for &id in ids {
            if act.nodes[id].kind == NodeKind::Basic {
                editable.push(id);
            }
        }
    }
    editable
}

fn can_assign<H>(
    act: &ActMap<H>,
    rule: &NodeRule,
    used: usize,
    id: NodeId,
    kind: NodeKind,
) -> bool {
    if used >= rule.max_count {
        return false;
    }
    let node = act.node(id);
    if rule.disabled_rows.contains(&node.row) {
        return false;
    }
    if rule.disable_consecutive {
        let mut neighbors = node.predecessors.iter().chain(node.successors.iter());
        if neighbors.any(|&neighbor| act.nodes[neighbor].kind == kind) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::super::connect::connect_rows;
    use super::super::factory::{NodeToken, TokenFactory};
    use super::super::topology::build_topology;
    use super::*;

    fn assigned_act(seed: i64, config: &MapConfig) -> ActMap<NodeToken> {
        let mut random = SeededRandom::new(seed);
        let mut factory = TokenFactory::default();
        let mut act = build_topology(1, config, &mut random);
        connect_rows(&mut act, &mut random).expect("wiring should succeed");
        assign_node_kinds(&mut act, config, &mut random, &mut factory)
            .expect("assignment should succeed");
        act
    }

    fn kind_count(act: &ActMap<NodeToken>, kind: NodeKind) -> usize {
        act.nodes.values().filter(|node| node.kind == kind).count()
    }

    #[test]
    fn fixed_rows_take_their_mapped_kinds() {
        let config = MapConfig::default();
        let act = assigned_act(2_024, &config);
        for (&row, &kind) in &config.fixed_rows {
            for &id in &act.rows[row] {
                assert_eq!(act.node(id).kind, kind, "row {row} must be fixed to {kind:?}");
            }
        }
    }

    #[test]
    fn per_kind_caps_hold() {
        let config = MapConfig::default();
        for seed in [1, 13, 555, 80_085] {
            let act = assigned_act(seed, &config);
            for (&kind, rule) in &config.node_rules {
                if kind == NodeKind::Basic {
                    continue;
                }
                let placed = kind_count(&act, kind);
                assert!(
                    placed <= rule.max_count,
                    "{placed} {kind:?} nodes exceed cap {} (seed {seed})",
                    rule.max_count
                );
            }
        }
    }

    #[test]
    fn disabled_rows_never_receive_the_excluded_kind() {
        let config = MapConfig::default();
        for seed in [4, 44, 444] {
            let act = assigned_act(seed, &config);
            for (&kind, rule) in &config.node_rules {
                for &row in &rule.disabled_rows {
                    for &id in &act.rows[row] {
                        assert_ne!(
                            act.node(id).kind,
                            kind,
                            "{kind:?} placed in disabled row {row} (seed {seed})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn guarded_kinds_never_sit_on_both_ends_of_an_edge() {
        let config = MapConfig::default();
        for seed in [6, 66, 666] {
            let act = assigned_act(seed, &config);
            for node in act.nodes.values() {
                let rule = &config.node_rules[&node.kind];
                if !rule.disable_consecutive {
                    continue;
                }
                for &successor in &node.successors {
                    assert_ne!(
                        act.node(successor).kind,
                        node.kind,
                        "connected {:?} pair at rows {}/{} (seed {seed})",
                        node.kind,
                        node.row,
                        node.row + 1
                    );
                }
            }
        }
    }

    #[test]
    fn nodes_without_a_fitting_candidate_keep_the_default_kind() {
        let mut config = MapConfig::default();
        for (&kind, rule) in config.node_rules.iter_mut() {
            if kind != NodeKind::Basic && kind != NodeKind::Boss {
                rule.max_count = 0;
            }
        }
        let act = assigned_act(7, &config);
        for (row, ids) in act.rows.iter().enumerate() {
            if config.fixed_rows.contains_key(&row) {
                continue;
            }
            for &id in ids {
                assert_eq!(act.node(id).kind, NodeKind::Basic);
            }
        }
    }

    #[test]
    fn only_fixed_and_specially_assigned_nodes_get_handles_here() {
        let act = assigned_act(15, &MapConfig::default());
        for node in act.nodes.values() {
            let fixed = MapConfig::default().fixed_rows.contains_key(&node.row);
            if fixed || node.kind != NodeKind::Basic {
                assert!(node.handle.is_some(), "assigned node must hold a handle");
            } else {
                assert!(node.handle.is_none(), "plain nodes are handled by the orchestrator");
            }
        }
    }

    #[test]
    fn assignment_is_deterministic_for_a_seed() {
        let config = MapConfig::default();
        let left = assigned_act(321, &config);
        let right = assigned_act(321, &config);
        assert_eq!(left.canonical_bytes(), right.canonical_bytes());
    }
}
