/// Errors returned by the validated [`Graph`](crate::graph::Graph) API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An endpoint or start vertex lies outside `[0, vertex_count)`
    #[error("Vertex {vertex} out of range (graph has {vertex_count} vertices)")]
    VertexOutOfRange {
        /// The vertex that was requested
        vertex: usize,
        /// Number of vertices in the graph
        vertex_count: usize,
    },
    /// A directed graph vertex whose in-degree differs from its out-degree
    #[error("Vertex {vertex} is unbalanced (in-degree {in_degree}, out-degree {out_degree})")]
    UnbalancedVertex {
        /// The offending vertex
        vertex: usize,
        /// Number of arcs entering it
        in_degree: usize,
        /// Number of arcs leaving it
        out_degree: usize,
    },
    /// An undirected graph vertex with odd degree
    #[error("Vertex {vertex} has odd degree {degree}")]
    OddDegree {
        /// The offending vertex
        vertex: usize,
        /// Its degree, self-loops counted twice
        degree: usize,
    },
    /// The edges are spread over more than one (strongly) connected component
    #[error("Edges span {components} components, expected 1")]
    Disconnected {
        /// Number of components containing at least one edge
        components: usize,
    },
    /// The start vertex has no incident edges while the graph has some
    #[error("Start vertex {vertex} has no incident edges")]
    StartNotOnCycle {
        /// The requested start vertex
        vertex: usize,
    },
}
