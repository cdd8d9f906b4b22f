//! Classic algorithm and data-structure implementations: Eulerian cycles via
//! Hierholzer's algorithm and a separate-chaining hash map.

pub mod error;
pub mod graph;
pub mod hashmap;
pub mod hierholzer;
pub mod tarjan;

pub use error::GraphError;
pub use graph::{Graph, GraphKind};
pub use hashmap::{ChainedHashMap, KeyHasher};
pub use hierholzer::{find_cycle_directed, find_cycle_undirected};
