use proptest::prelude::*;
use witu_core::layout::{H_SPACING, ROW_SPACING};
use witu_core::{Node, layout};

fn nodes_strategy() -> impl Strategy<Value = Vec<Node>> {
    prop::collection::vec(("[A-Za-z]{1,6}", 0u32..5), 0..20).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (name, rank))| Node::new(format!("id{i}"), name).with_rank(rank))
            .collect()
    })
}

fn layer_order(nodes: &[Node], rank: u32) -> Vec<&Node> {
    let mut layer: Vec<&Node> = nodes.iter().filter(|n| n.layer() == rank).collect();
    layer.sort_by(|a, b| a.name.cmp(&b.name));
    layer
}

proptest! {
    #[test]
    fn layout_is_idempotent(nodes in nodes_strategy()) {
        prop_assert_eq!(layout(&nodes), layout(&nodes));
    }

    #[test]
    fn same_rank_rows_are_evenly_spaced(nodes in nodes_strategy()) {
        let out = layout(&nodes);
        for rank in 0..5 {
            let layer = layer_order(&nodes, rank);
            for (i, a) in layer.iter().enumerate() {
                for (j, b) in layer.iter().enumerate() {
                    let pa = out.position(&a.id).unwrap();
                    let pb = out.position(&b.id).unwrap();
                    prop_assert_eq!(pb.y - pa.y, (j as f64 - i as f64) * ROW_SPACING);
                    prop_assert_eq!(pa.x, pb.x);
                }
            }
        }
    }

    #[test]
    fn columns_follow_rank(nodes in nodes_strategy()) {
        let out = layout(&nodes);
        for a in &nodes {
            for b in &nodes {
                let dx = out.position(&b.id).unwrap().x - out.position(&a.id).unwrap().x;
                let dr = f64::from(b.layer()) - f64::from(a.layer());
                prop_assert_eq!(dx, dr * H_SPACING);
            }
        }
    }

    #[test]
    fn canvas_contains_every_node(nodes in nodes_strategy()) {
        let out = layout(&nodes);
        for p in out.positions.values() {
            prop_assert!(p.x < out.width);
            prop_assert!(p.y < out.height);
        }
    }
}
