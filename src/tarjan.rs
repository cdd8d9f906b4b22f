const UNVISITED: usize = usize::MAX;

/// Tarjan's strongly connected components over `adjacency[u] = heads of u`.
///
/// Components come out in reverse topological order. The depth-first search
/// keeps its own frame stack, so long paths don't grow the call stack.
/// Neighbors outside `[0, adjacency.len())` are ignored.
pub fn strongly_connected_components(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = adjacency.len();

    // Step 1: Initialize per-vertex state
    let mut index = 0; // Global index counter
    let mut indices = vec![UNVISITED; n]; // Discovery time of each node
    let mut low_links = vec![UNVISITED; n]; // Lowest reachable discovery time
    let mut on_stack = vec![false; n]; // Nodes currently on the component stack
    let mut stack: Vec<usize> = Vec::new(); // Component stack
    let mut frames: Vec<(usize, usize)> = Vec::new(); // (node, next neighbor position)
    let mut sccs: Vec<Vec<usize>> = Vec::new(); // Resulting SCCs

    // Step 2: Start a search from every node not yet visited
    for root in 0..n {
        if indices[root] != UNVISITED {
            continue;
        }

        indices[root] = index;
        low_links[root] = index;
        index += 1;
        stack.push(root);
        on_stack[root] = true;
        frames.push((root, 0));

        while let Some(frame) = frames.last_mut() {
            let v = frame.0;

            // Step 3: Consider the next successor of v
            if let Some(&w) = adjacency[v].get(frame.1) {
                frame.1 += 1;
                if w >= n {
                    continue;
                }
                if indices[w] == UNVISITED {
                    // Successor w has not yet been visited; descend into it
                    indices[w] = index;
                    low_links[w] = index;
                    index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    frames.push((w, 0));
                } else if on_stack[w] {
                    // Successor w is in the stack and hence in the current SCC
                    low_links[v] = low_links[v].min(indices[w]);
                }
                continue;
            }

            // Step 4: v is finished; if it is a root node, pop its SCC
            frames.pop();
            if low_links[v] == indices[v] {
                let mut scc = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    scc.push(w);
                    if w == v {
                        break;
                    }
                }
                sccs.push(scc);
            }

            // propagate low link to the parent frame
            if let Some(&(parent, _)) = frames.last() {
                low_links[parent] = low_links[parent].min(low_links[v]);
            }
        }
    }

    sccs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut sccs: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        for scc in &mut sccs {
            scc.sort_unstable();
        }
        sccs.sort();
        sccs
    }

    #[test]
    fn test_two_cycles_joined_by_bridge() {
        let adjacency = vec![vec![1], vec![2], vec![0, 3], vec![4], vec![5], vec![3]];
        let sccs = strongly_connected_components(&adjacency);
        assert_eq!(sorted(sccs.clone()), vec![vec![0, 1, 2], vec![3, 4, 5]]);
        // reverse topological order: the sink component comes first
        assert!(sccs[0].contains(&3));
    }

    #[test]
    fn test_isolated_vertices_are_singletons() {
        let adjacency = vec![vec![], vec![], vec![2]];
        assert_eq!(sorted(strongly_connected_components(&adjacency)), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_long_path_does_not_recurse() {
        let n = 200_000;
        let adjacency: Vec<Vec<usize>> = (0..n).map(|u| vec![(u + 1) % n]).collect();
        let sccs = strongly_connected_components(&adjacency);
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), n);
    }

    #[test]
    fn test_empty_graph() {
        assert!(strongly_connected_components(&[]).is_empty());
    }
}
