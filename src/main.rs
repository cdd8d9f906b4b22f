use classic_algos::graph::Graph;
use classic_algos::hashmap::ChainedHashMap;
use classic_algos::{find_cycle_directed, find_cycle_undirected, GraphError};
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{fmt, fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<(), GraphError> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_timer(ChronoLocal::rfc_3339()))
        .with(EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy())
        .init();

    eulerian_samples()?;
    hashmap_sample();
    Ok(())
}

fn format_walk(walk: &[usize]) -> String {
    walk.iter().map(|v| format!(" {}", v)).collect()
}

fn eulerian_samples() -> Result<(), GraphError> {
    let directed = vec![vec![1], vec![2, 3], vec![0], vec![4], vec![1]];
    let cycle = find_cycle_directed(&directed, 5, 0);
    println!("Eulerian cycle (directed):{}", format_walk(&cycle));

    let mut undirected = Graph::undirected(5);
    for (u, v) in [(0, 1), (1, 2), (2, 3), (0, 3), (0, 4), (1, 4), (0, 2), (1, 3)] {
        undirected.add_edge(u, v)?;
    }
    print!("{}", undirected);

    let adjacency: Vec<Vec<usize>> = (0..undirected.vertex_count())
        .map(|u| undirected.neighbors(u).collect())
        .collect();
    let walk = find_cycle_undirected(&adjacency, 5, 2);
    println!("Eulerian cycle (undirected):{}", format_walk(&walk));

    // vertices 2 and 3 have odd degree, so the walk above is only a trail
    match undirected.eulerian_cycle(2) {
        Ok(cycle) => info!(len = cycle.len(), "undirected sample is eulerian"),
        Err(err) => warn!(%err, "undirected sample has no eulerian cycle"),
    }
    Ok(())
}

fn hashmap_sample() {
    let mut map: ChainedHashMap<String, i32> = ChainedHashMap::new();
    *map.get_or_insert_default("foo".to_string()) = 1;
    map.insert("bar".to_string(), 2);
    println!("{}{}", read(&mut map, "foo"), read(&mut map, "bar")); // 12
    println!("{}{}", read(&mut map, "baz"), read(&mut map, "qux")); // 00
    map.remove(&"foo".to_string());
    println!("{}", map.len()); // 3
    println!("{}{}", read(&mut map, "foo"), read(&mut map, "bar")); // 02
}

fn read(map: &mut ChainedHashMap<String, i32>, key: &str) -> i32 {
    *map.get_or_insert_default(key.to_string())
}
