//! Hop-distance classification from a root node.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, trace};

use crate::model::{Edge, Node};

/// Rank given to nodes the traversal never reaches. 0 belongs to the root.
pub const UNREACHABLE_RANK: u32 = 1;

/// Forward adjacency over edges whose endpoints both name known nodes.
fn forward_adjacency<'a>(
    known: &HashSet<&'a str>,
    edges: &'a [Edge],
) -> HashMap<&'a str, Vec<&'a str>> {
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        let (source, target) = (edge.source_id.as_str(), edge.target_id.as_str());
        if known.contains(source) && known.contains(target) {
            adjacency.entry(source).or_default().push(target);
        } else {
            trace!(source, target, "dropping edge with unknown endpoint");
        }
    }
    adjacency
}

/// Compute the shortest hop distance from `root_id` for every node.
///
/// Breadth-first over forward edges. A target's rank is relaxed to the
/// smallest depth seen, and each node is expanded at most once, so cycles
/// terminate. Nodes the root cannot reach get [`UNREACHABLE_RANK`].
///
/// Returns an empty map when `root_id` is not one of `nodes`.
pub fn classify_ranks(nodes: &[Node], edges: &[Edge], root_id: &str) -> HashMap<String, u32> {
    let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    if !known.contains(root_id) {
        debug!(root_id, "root not in node set, skipping classification");
        return HashMap::new();
    }

    let adjacency = forward_adjacency(&known, edges);

    let mut ranks: HashMap<&str, u32> = HashMap::with_capacity(known.len());
    ranks.insert(root_id, 0);

    let mut visited: HashSet<&str> = HashSet::with_capacity(known.len());
    let mut queue: VecDeque<(&str, u32)> = VecDeque::from([(root_id, 0)]);

    while let Some((id, depth)) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }

        let Some(targets) = adjacency.get(id) else {
            continue;
        };
        let next = depth + 1;
        for &target in targets {
            let rank = ranks.entry(target).or_insert(next);
            if next < *rank {
                *rank = next;
            }
            if !visited.contains(target) {
                queue.push_back((target, next));
            }
        }
    }

    nodes
        .iter()
        .map(|node| {
            let rank = ranks
                .get(node.id.as_str())
                .copied()
                .unwrap_or(UNREACHABLE_RANK);
            (node.id.clone(), rank)
        })
        .collect()
}

/// Ids of nodes on a directed cycle reachable from `root_id`.
///
/// Tarjan's strongly connected components, run iteratively from the root so
/// only reachable nodes are considered. A component counts as a cycle when it
/// has more than one member or its single member has a self-loop.
pub fn cycle_members(nodes: &[Node], edges: &[Edge], root_id: &str) -> HashSet<String> {
    let mut position: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    for (pos, node) in nodes.iter().enumerate() {
        position.entry(node.id.as_str()).or_insert(pos);
    }
    let Some(&root) = position.get(root_id) else {
        return HashSet::new();
    };

    let n = nodes.len();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut self_loop = vec![false; n];
    for edge in edges {
        let (Some(&from), Some(&to)) = (
            position.get(edge.source_id.as_str()),
            position.get(edge.target_id.as_str()),
        ) else {
            continue;
        };
        if from == to {
            self_loop[from] = true;
        }
        adjacency[from].push(to);
    }

    const UNVISITED: usize = usize::MAX;
    let mut order = vec![UNVISITED; n];
    let mut low = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut members = HashSet::new();

    let mut counter = 1;
    order[root] = 0;
    stack.push(root);
    on_stack[root] = true;
    // (node, index of the next child to look at)
    let mut frames: Vec<(usize, usize)> = vec![(root, 0)];

    while let Some(frame) = frames.last_mut() {
        let v = frame.0;
        if frame.1 < adjacency[v].len() {
            let w = adjacency[v][frame.1];
            frame.1 += 1;
            if order[w] == UNVISITED {
                order[w] = counter;
                low[w] = counter;
                counter += 1;
                stack.push(w);
                on_stack[w] = true;
                frames.push((w, 0));
            } else if on_stack[w] {
                low[v] = low[v].min(order[w]);
            }
            continue;
        }

        frames.pop();
        if let Some(&(parent, _)) = frames.last() {
            low[parent] = low[parent].min(low[v]);
        }
        if low[v] != order[v] {
            continue;
        }

        let mut component = Vec::new();
        while let Some(w) = stack.pop() {
            on_stack[w] = false;
            component.push(w);
            if w == v {
                break;
            }
        }
        if component.len() > 1 || self_loop[v] {
            members.extend(component.into_iter().map(|i| nodes[i].id.clone()));
        }
    }

    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|id| Node::new(*id, id.to_uppercase())).collect()
    }

    fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
        pairs.iter().map(|(s, t)| Edge::new(*s, *t)).collect()
    }

    #[test]
    fn test_shortest_path_wins() {
        // a -> b -> c -> d, plus shortcut a -> d
        let ranks = classify_ranks(
            &nodes(&["a", "b", "c", "d"]),
            &edges(&[("a", "b"), ("b", "c"), ("c", "d"), ("a", "d")]),
            "a",
        );
        assert_eq!(ranks["a"], 0);
        assert_eq!(ranks["b"], 1);
        assert_eq!(ranks["c"], 2);
        assert_eq!(ranks["d"], 1);
    }

    #[test]
    fn test_cycle_through_root_terminates() {
        let ranks = classify_ranks(
            &nodes(&["a", "b", "c"]),
            &edges(&[("a", "b"), ("b", "c"), ("c", "a")]),
            "a",
        );
        assert_eq!(ranks["a"], 0);
        assert_eq!(ranks["b"], 1);
        assert_eq!(ranks["c"], 2);
    }

    #[test]
    fn test_unreachable_nodes_default_to_one() {
        let ranks = classify_ranks(
            &nodes(&["a", "b", "island", "far"]),
            &edges(&[("a", "b"), ("island", "far")]),
            "a",
        );
        assert_eq!(ranks["island"], UNREACHABLE_RANK);
        assert_eq!(ranks["far"], UNREACHABLE_RANK);
        assert_eq!(ranks.len(), 4);
    }

    #[test]
    fn test_missing_root_returns_empty() {
        let ranks = classify_ranks(&nodes(&["a"]), &edges(&[("a", "a")]), "nope");
        assert!(ranks.is_empty());
    }

    #[test]
    fn test_unknown_endpoints_do_not_bridge() {
        // The only path to c goes through a node that is not in the graph.
        let ranks = classify_ranks(
            &nodes(&["a", "c"]),
            &edges(&[("a", "ghost"), ("ghost", "c")]),
            "a",
        );
        assert_eq!(ranks["c"], UNREACHABLE_RANK);
    }

    #[test]
    fn test_cycle_members_reachable_only() {
        let members = cycle_members(
            &nodes(&["a", "b", "c", "x", "y", "s"]),
            &edges(&[
                ("a", "b"),
                ("b", "c"),
                ("c", "b"),
                ("x", "y"),
                ("y", "x"),
                ("a", "s"),
                ("s", "s"),
            ]),
            "a",
        );
        let mut got: Vec<_> = members.into_iter().collect();
        got.sort();
        assert_eq!(got, vec!["b", "c", "s"]);
    }

    #[test]
    fn test_acyclic_has_no_members() {
        let members = cycle_members(
            &nodes(&["a", "b", "c"]),
            &edges(&[("a", "b"), ("a", "c"), ("b", "c")]),
            "a",
        );
        assert!(members.is_empty());
    }
}
