use std::collections::HashMap;

use proptest::prelude::*;
use witu_core::{Edge, Node, UNREACHABLE_RANK, classify_ranks};

fn graph_strategy() -> impl Strategy<Value = (Vec<Node>, Vec<Edge>)> {
    (1usize..12).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n), 0..(n * 3));
        (Just(n), edges).prop_map(|(n, pairs)| {
            let nodes = (0..n)
                .map(|i| Node::new(format!("n{i}"), format!("Node {i}")))
                .collect();
            let edges = pairs
                .into_iter()
                .map(|(s, t)| Edge::new(format!("n{s}"), format!("n{t}")))
                .collect();
            (nodes, edges)
        })
    })
}

/// Shortest hop counts by repeated relaxation, independent of queue order.
fn reference_ranks(nodes: &[Node], edges: &[Edge], root: &str) -> HashMap<String, u32> {
    let mut dist: HashMap<String, Option<u32>> =
        nodes.iter().map(|n| (n.id.clone(), None)).collect();
    dist.insert(root.to_string(), Some(0));
    for _ in 0..nodes.len() {
        for edge in edges {
            let Some(Some(d)) = dist.get(&edge.source_id).copied() else {
                continue;
            };
            let entry = dist.get_mut(&edge.target_id).unwrap();
            if entry.is_none_or(|cur| d + 1 < cur) {
                *entry = Some(d + 1);
            }
        }
    }
    dist.into_iter()
        .map(|(id, d)| (id, d.unwrap_or(UNREACHABLE_RANK)))
        .collect()
}

proptest! {
    #[test]
    fn ranks_are_shortest_paths((nodes, edges) in graph_strategy()) {
        let ranks = classify_ranks(&nodes, &edges, "n0");
        prop_assert_eq!(ranks, reference_ranks(&nodes, &edges, "n0"));
    }

    #[test]
    fn ranks_ignore_edge_order((nodes, edges) in graph_strategy()) {
        let mut reversed = edges.clone();
        reversed.reverse();
        prop_assert_eq!(
            classify_ranks(&nodes, &edges, "n0"),
            classify_ranks(&nodes, &reversed, "n0")
        );
    }

    #[test]
    fn every_node_gets_a_finite_rank((nodes, edges) in graph_strategy()) {
        let ranks = classify_ranks(&nodes, &edges, "n0");
        prop_assert_eq!(ranks.len(), nodes.len());
        prop_assert_eq!(ranks["n0"], 0);
        for (id, rank) in &ranks {
            if id != "n0" {
                prop_assert!(*rank >= 1);
                prop_assert!((*rank as usize) < nodes.len().max(2));
            }
        }
    }
}
