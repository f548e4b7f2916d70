use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::Parser;
use runmap_core::{
    DEFAULT_SEED, GameMap, MapConfig, NodeKind, NodeToken, TokenFactory, generate_game_map,
};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the generation run
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    seed: i64,
    /// Emit the summary as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ActSummary {
    act_id: u32,
    node_count: usize,
    edge_count: usize,
    row_sizes: Vec<usize>,
    kind_counts: BTreeMap<NodeKind, usize>,
}

#[derive(Serialize)]
struct MapSummary {
    seed: i64,
    fingerprint: u64,
    acts: Vec<ActSummary>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let map = generate_game_map(&MapConfig::default(), TokenFactory::default(), args.seed)
        .context("map generation failed")?;
    let summary = summarize(&map);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Seed: {}", summary.seed);
    println!("Fingerprint: {:016x}", summary.fingerprint);
    for act in &summary.acts {
        println!(
            "Act {}: {} nodes over {} rows, {} edges",
            act.act_id,
            act.node_count,
            act.row_sizes.len(),
            act.edge_count
        );
        println!("  row sizes: {:?}", act.row_sizes);
        for (kind, count) in &act.kind_counts {
            println!("  {kind:?}: {count}");
        }
    }

    Ok(())
}

fn summarize(map: &GameMap<NodeToken>) -> MapSummary {
    let acts = map
        .acts
        .iter()
        .map(|act| {
            let mut kind_counts = BTreeMap::new();
            let mut edge_count = 0;
            for node in act.nodes.values() {
                *kind_counts.entry(node.kind).or_insert(0) += 1;
                edge_count += node.successors.len();
            }
            ActSummary {
                act_id: act.act_id,
                node_count: act.node_count(),
                edge_count,
                row_sizes: act.rows.iter().map(|row| row.len()).collect(),
                kind_counts,
            }
        })
        .collect();

    MapSummary { seed: map.seed, fingerprint: map.fingerprint(), acts }
}
