use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};

use fixedbitset::FixedBitSet;
use tracing::{debug, trace};

/// One half of an edge as seen from its tail: the head vertex and the id of
/// the physical edge it belongs to. Undirected edges are stored as two arcs
/// sharing an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    pub to: usize,
    pub edge: usize,
}

/// Finds an Eulerian cycle of a directed multigraph starting at `start`.
///
/// `graph[u]` lists the heads of the arcs leaving `u`; repeated entries are
/// parallel arcs. The graph must actually have an Eulerian cycle through
/// `start`, otherwise the result is a closed trail over some of the edges.
///
/// # Panics
///
/// Panics if `start` or any neighbor is not below `vertex_count`.
///
/// ```
/// use classic_algos::hierholzer::find_cycle_directed;
///
/// let graph = vec![vec![1], vec![2, 3], vec![0], vec![4], vec![1]];
/// assert_eq!(find_cycle_directed(&graph, 5, 0), vec![0, 1, 3, 4, 1, 2, 0]);
/// ```
pub fn find_cycle_directed(graph: &[Vec<usize>], vertex_count: usize, start: usize) -> Vec<usize> {
    let mut next_id = 0;
    let adjacency: Vec<Vec<HalfEdge>> = (0..vertex_count)
        .map(|u| {
            graph
                .get(u)
                .map(|neighbors| {
                    neighbors
                        .iter()
                        .map(|&to| {
                            let arc = HalfEdge { to, edge: next_id };
                            next_id += 1;
                            arc
                        })
                        .collect()
                })
                .unwrap_or_default()
        })
        .collect();

    walk(&adjacency, next_id, start)
}

/// Finds an Eulerian cycle of an undirected multigraph starting at `start`.
///
/// Every edge `{u, v}` must be listed once in `graph[u]` and once in
/// `graph[v]`; a self-loop is listed twice in its vertex's list. The k-th
/// occurrence of `v` in `graph[u]` is taken to be the same edge as the k-th
/// occurrence of `u` in `graph[v]`, so parallel edges are each used once.
///
/// # Panics
///
/// Panics if `start` or any neighbor is not below `vertex_count`.
pub fn find_cycle_undirected(graph: &[Vec<usize>], vertex_count: usize, start: usize) -> Vec<usize> {
    let (adjacency, edge_count) = pair_undirected(graph, vertex_count);
    walk(&adjacency, edge_count, start)
}

/// Assigns one id per physical edge of a symmetric adjacency list in one
/// pass. Arcs from the lower endpoint queue their ids per unordered pair and
/// arcs from the higher endpoint take them in order; a self-loop's second
/// occurrence takes the id of the first.
pub(crate) fn pair_undirected(graph: &[Vec<usize>], vertex_count: usize) -> (Vec<Vec<HalfEdge>>, usize) {
    let mut pending: HashMap<(usize, usize), VecDeque<usize>> = HashMap::new();
    let mut edge_count = 0;
    let mut new_id = || {
        edge_count += 1;
        edge_count - 1
    };

    let adjacency: Vec<Vec<HalfEdge>> = (0..vertex_count)
        .map(|u| {
            graph
                .get(u)
                .into_iter()
                .flatten()
                .map(|&to| {
                    let queue = pending.entry((u.min(to), u.max(to))).or_default();
                    let edge = match u.cmp(&to) {
                        Ordering::Less => {
                            let id = new_id();
                            queue.push_back(id);
                            id
                        }
                        Ordering::Greater => queue.pop_front().unwrap_or_else(&mut new_id),
                        Ordering::Equal => match queue.pop_front() {
                            Some(id) => id,
                            None => {
                                let id = new_id();
                                queue.push_back(id);
                                id
                            }
                        },
                    };
                    HalfEdge { to, edge }
                })
                .collect()
        })
        .collect();

    (adjacency, edge_count)
}

/// Iterative Hierholzer over arcs tagged with edge ids.
pub(crate) fn walk(adjacency: &[Vec<HalfEdge>], edge_count: usize, start: usize) -> Vec<usize> {
    let mut cursor = vec![0usize; adjacency.len()];
    let mut used = FixedBitSet::with_capacity(edge_count);
    let mut stack = vec![start];
    let mut cycle = Vec::with_capacity(edge_count + 1);

    while let Some(mut u) = stack.pop() {
        while let Some(arc) = adjacency[u].get(cursor[u]) {
            cursor[u] += 1;
            if used.put(arc.edge) {
                continue;
            }
            trace!(from = u, to = arc.to, edge = arc.edge, "traverse");
            stack.push(u);
            u = arc.to;
        }
        cycle.push(u);
    }

    cycle.reverse();
    debug!(start, edges = edge_count, len = cycle.len(), "eulerian walk finished");
    cycle
}
