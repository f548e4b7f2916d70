use anyhow::Result;
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use runmap_core::{ActMap, MapConfig, NodeKind, NodeToken, TokenFactory, generate_game_map};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the sweep itself, not for any single map
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of maps to generate and verify
    #[arg(short, long, default_value_t = 1000)]
    maps: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    println!("Soaking {} generated maps from sweep seed {}...", args.maps, args.seed);

    let config = MapConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for iteration in 0..args.maps {
        let map_seed = rng.next_u64() as i64;
        let map = generate_game_map(&config, TokenFactory::default(), map_seed)
            .unwrap_or_else(|error| panic!("generation failed for seed {map_seed}: {error}"));

        for act in &map.acts {
            assert_connected(act, map_seed);
            assert_non_crossing(act, map_seed);
            assert_rules_respected(act, &config, map_seed);
        }

        if (iteration + 1) % 100 == 0 {
            println!("  {} maps verified", iteration + 1);
        }
    }

    println!("Soak completed successfully.");
    Ok(())
}

fn assert_connected(act: &ActMap<NodeToken>, map_seed: i64) {
    let last_row = act.rows.len() - 1;
    for (row, ids) in act.rows.iter().enumerate() {
        for &id in ids {
            let node = act.node(id);
            assert!(
                row == 0 || !node.predecessors.is_empty(),
                "Invariant failed: orphan node at ({row}, {}) for seed {map_seed}",
                node.col
            );
            assert!(
                row == last_row || !node.successors.is_empty(),
                "Invariant failed: dead-end node at ({row}, {}) for seed {map_seed}",
                node.col
            );
        }
    }
}

fn assert_non_crossing(act: &ActMap<NodeToken>, map_seed: i64) {
    for ids in &act.rows {
        let mut edges: Vec<(usize, usize)> = Vec::new();
        for &id in ids {
            let node = act.node(id);
            for &successor in &node.successors {
                edges.push((node.col, act.node(successor).col));
            }
        }
        edges.sort_unstable();
        for pair in edges.windows(2) {
            assert!(
                pair[0].1 <= pair[1].1,
                "Invariant failed: crossing edges {:?}/{:?} for seed {map_seed}",
                pair[0],
                pair[1]
            );
        }
    }
}

fn assert_rules_respected(act: &ActMap<NodeToken>, config: &MapConfig, map_seed: i64) {
    for (&row, &kind) in &config.fixed_rows {
        for &id in &act.rows[row] {
            assert!(
                act.node(id).kind == kind,
                "Invariant failed: fixed row {row} broke for seed {map_seed}"
            );
        }
    }

    for (&kind, rule) in &config.node_rules {
        if kind != NodeKind::Basic {
            let placed = act.nodes.values().filter(|node| node.kind == kind).count();
            assert!(
                placed <= rule.max_count,
                "Invariant failed: {placed} {kind:?} nodes exceed the cap for seed {map_seed}"
            );
        }
        for &row in &rule.disabled_rows {
            for &id in &act.rows[row] {
                assert!(
                    act.node(id).kind != kind,
                    "Invariant failed: {kind:?} in disabled row {row} for seed {map_seed}"
                );
            }
        }
    }

    for node in act.nodes.values() {
        assert!(
            node.handle.is_some(),
            "Invariant failed: node without a handle for seed {map_seed}"
        );
        if config.node_rules[&node.kind].disable_consecutive {
            for &successor in &node.successors {
                assert!(
                    act.node(successor).kind != node.kind,
                    "Invariant failed: connected {:?} pair for seed {map_seed}",
                    node.kind
                );
            }
        }
    }
}
