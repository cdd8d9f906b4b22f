use std::fmt;

use tracing::debug;

use crate::error::GraphError;
use crate::hierholzer::{self, HalfEdge};
use crate::tarjan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    Directed,   // Each edge is traversed from source to target
    Undirected, // Each edge is traversed once, in either direction
}

/// A multigraph over vertices `0..n` where every edge keeps its own id, so
/// parallel edges and self-loops are tracked one by one.
#[derive(Debug, Clone)]
pub struct Graph {
    kind: GraphKind,
    adjacency_list: Vec<Vec<HalfEdge>>, // Outgoing arcs per vertex, tagged with edge ids
    edges: Vec<(usize, usize)>,         // Endpoints of each edge, indexed by id
    in_degrees: Vec<usize>,             // Arcs entering each vertex (directed only)
}

impl Graph {
    pub fn new(kind: GraphKind, n: usize) -> Self {
        Graph {
            kind,
            adjacency_list: vec![Vec::new(); n],
            edges: Vec::new(),
            in_degrees: vec![0; n],
        }
    }

    pub fn directed(n: usize) -> Self {
        Self::new(GraphKind::Directed, n)
    }

    pub fn undirected(n: usize) -> Self {
        Self::new(GraphKind::Undirected, n)
    }

    /// Builds a graph from neighbor lists.
    ///
    /// For an undirected graph every edge `{u, v}` is expected in both lists
    /// (a self-loop twice in its own list); occurrences are paired in order
    /// and an unmatched occurrence becomes an edge of its own.
    pub fn from_adjacency(kind: GraphKind, adjacency: &[Vec<usize>]) -> Result<Self, GraphError> {
        let n = adjacency.len();
        for &vertex in adjacency.iter().flatten() {
            if vertex >= n {
                return Err(GraphError::VertexOutOfRange { vertex, vertex_count: n });
            }
        }

        let mut graph = Self::new(kind, n);
        match kind {
            GraphKind::Directed => {
                for (source, neighbors) in adjacency.iter().enumerate() {
                    for &target in neighbors {
                        graph.add_edge(source, target)?;
                    }
                }
            }
            GraphKind::Undirected => {
                let (arcs, edge_count) = hierholzer::pair_undirected(adjacency, n);
                let mut edges = vec![None; edge_count];
                for (source, list) in arcs.iter().enumerate() {
                    for arc in list {
                        edges[arc.edge].get_or_insert((source, arc.to));
                    }
                }
                graph.edges = edges.into_iter().flatten().collect();
                graph.adjacency_list = arcs;
            }
        }
        Ok(graph)
    }

    // Add an edge from `source` to `target` and return its id
    pub fn add_edge(&mut self, source: usize, target: usize) -> Result<usize, GraphError> {
        self.check_vertex(source)?;
        self.check_vertex(target)?;

        let edge = self.edges.len();
        self.edges.push((source, target));
        self.adjacency_list[source].push(HalfEdge { to: target, edge });
        match self.kind {
            GraphKind::Directed => self.in_degrees[target] += 1,
            // a self-loop lands twice in the same list, counting 2 towards the degree
            GraphKind::Undirected => self.adjacency_list[target].push(HalfEdge { to: source, edge }),
        }
        Ok(edge)
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency_list.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Endpoints of every edge, indexed by edge id.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    // Get the neighbors of a node
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency_list
            .get(node)
            .into_iter()
            .flatten()
            .map(|arc| arc.to)
    }

    /// Number of arc ends at `node`; for undirected graphs this is the degree
    /// with self-loops counted twice.
    pub fn out_degree(&self, node: usize) -> usize {
        self.adjacency_list.get(node).map_or(0, Vec::len)
    }

    pub fn in_degree(&self, node: usize) -> usize {
        match self.kind {
            GraphKind::Directed => self.in_degrees.get(node).copied().unwrap_or(0),
            GraphKind::Undirected => self.out_degree(node),
        }
    }

    pub fn degree(&self, node: usize) -> usize {
        match self.kind {
            GraphKind::Directed => self.in_degree(node) + self.out_degree(node),
            GraphKind::Undirected => self.out_degree(node),
        }
    }

    // (in, out) degree of each node
    fn calculate_degrees(&self) -> Vec<(usize, usize)> {
        (0..self.vertex_count())
            .map(|node| (self.in_degree(node), self.out_degree(node)))
            .collect()
    }

    fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange { vertex, vertex_count: self.vertex_count() })
        }
    }

    /// Checks that the graph has an Eulerian cycle passing through `start`.
    ///
    /// A graph without edges trivially has one (the single vertex `start`).
    pub fn check_eulerian_cycle(&self, start: usize) -> Result<(), GraphError> {
        self.check_vertex(start)?;
        if self.edges.is_empty() {
            return Ok(());
        }

        let degrees = self.calculate_degrees();

        // Step 1: Degree condition
        for (vertex, &(in_degree, out_degree)) in degrees.iter().enumerate() {
            match self.kind {
                GraphKind::Directed if in_degree != out_degree => {
                    return Err(GraphError::UnbalancedVertex { vertex, in_degree, out_degree });
                }
                GraphKind::Undirected if out_degree % 2 != 0 => {
                    return Err(GraphError::OddDegree { vertex, degree: out_degree });
                }
                _ => {}
            }
        }

        // Step 2: All edges in one (strongly) connected component
        let heads: Vec<Vec<usize>> = self
            .adjacency_list
            .iter()
            .map(|arcs| arcs.iter().map(|arc| arc.to).collect())
            .collect();
        let components = tarjan::strongly_connected_components(&heads)
            .into_iter()
            .filter(|scc| scc.iter().any(|&v| degrees[v].1 > 0))
            .count();
        if components > 1 {
            return Err(GraphError::Disconnected { components });
        }

        // Step 3: The start vertex must touch the cycle
        if degrees[start].1 == 0 {
            return Err(GraphError::StartNotOnCycle { vertex: start });
        }

        Ok(())
    }

    /// Hierholzer's algorithm after verifying the Eulerian preconditions.
    ///
    /// The returned walk starts and ends at `start` and has `edge_count() + 1`
    /// vertices.
    pub fn eulerian_cycle(&self, start: usize) -> Result<Vec<usize>, GraphError> {
        if let Err(err) = self.check_eulerian_cycle(start) {
            debug!(%err, start, "graph has no eulerian cycle");
            return Err(err);
        }
        Ok(self.eulerian_cycle_unchecked(start))
    }

    /// Hierholzer's algorithm without validation; on a non-Eulerian graph the
    /// result covers only part of the edges.
    ///
    /// # Panics
    ///
    /// Panics if `start` is out of range.
    pub fn eulerian_cycle_unchecked(&self, start: usize) -> Vec<usize> {
        hierholzer::walk(&self.adjacency_list, self.edges.len(), start)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, arcs) in self.adjacency_list.iter().enumerate() {
            let neighbors: Vec<usize> = arcs.iter().map(|arc| arc.to).collect();
            writeln!(f, "Node {} -> {:?}", node, neighbors)?;
        }
        Ok(())
    }
}
