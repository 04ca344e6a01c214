//! Known-topology regression tests for the task graph engine.
//!
//! Each test builds a small hand-crafted task batch whose answers were
//! worked out by hand and are hardcoded here, so any change in traversal
//! order, tie-breaking or edge weighting shows up as a failure.

use petgraph::algo::{dijkstra as pg_dijkstra, kosaraju_scc, min_spanning_tree};
use petgraph::data::Element;
use petgraph::graph::NodeIndex;

use taskgraph_core::algo::flow::max_flow;
use taskgraph_core::algo::shortest_path::{BellmanFordOutcome, bellman_ford};
use taskgraph_core::config::{DfsStrategy, EngineConfig, FlowMethod};
use taskgraph_core::graph::CapacityMatrix;
use taskgraph_core::task::read_records;
use taskgraph_core::{Edge, Graph, GraphBuilder, GraphError, TaskAnalytics, TaskRecord};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const SCENARIO_JSON: &str = r#"[
    {"id": 1, "name": "design"},
    {"id": 2, "name": "build", "dependencies": [1]},
    {"id": 3, "name": "ship", "dependencies": [1, 2]}
]"#;

fn scenario() -> TaskAnalytics {
    let records = read_records(SCENARIO_JSON.as_bytes()).expect("records");
    TaskAnalytics::build(&records, &EngineConfig::default()).expect("session")
}

fn sorted_partition(mut components: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    for component in &mut components {
        component.sort_unstable();
    }
    components.sort();
    components
}

// ---------------------------------------------------------------------------
// Three-task scenario
// ---------------------------------------------------------------------------

#[test]
fn scenario_graph_shape() {
    let session = scenario();
    let stats = session.stats();
    assert_eq!(stats.capacity, 100);
    assert_eq!(stats.edge_count, 3);
    assert_eq!(stats.arc_count, 3);
    assert_eq!(stats.dangling_count, 0);
    // {1,2,3} plus 97 isolated vertices.
    assert_eq!(stats.component_count, 98);
    assert_eq!(stats.isolated_vertex_count, 97);
    assert!(stats.content_hash.starts_with("blake3:"));

    let edges = session.graph().undirected.edges();
    assert_eq!(
        edges,
        &[Edge::new(2, 1, 3), Edge::new(3, 1, 4), Edge::new(3, 2, 5)]
    );
}

#[test]
fn scenario_traversals() {
    let session = scenario();
    for start in 1..=3 {
        assert_eq!(session.bfs_count(start), Ok(3));
        assert_eq!(session.dfs_count(start), Ok(3));
    }
    assert_eq!(session.bfs_count(42), Ok(1));
    assert_eq!(session.bfs_order(1), Ok(vec![1, 2, 3]));
}

#[test]
fn scenario_spanning_trees() {
    let session = scenario();
    let kruskal = session.kruskal();
    assert_eq!(kruskal.edges, vec![Edge::new(2, 1, 3), Edge::new(3, 1, 4)]);
    assert_eq!(kruskal.total_weight(), 7);

    let prim = session.prim(1).expect("prim");
    assert_eq!(prim.edges, vec![Edge::new(1, 2, 3), Edge::new(1, 3, 4)]);
    assert_eq!(prim.total_weight(), 7);
}

#[test]
fn scenario_shortest_paths() {
    let session = scenario();
    let paths = session.dijkstra(1).expect("dijkstra");
    assert_eq!(paths.distance_to(2), Some(3));
    assert_eq!(paths.distance_to(3), Some(4));
    assert_eq!(paths.path_to(3), Some(vec![1, 3]));
    assert_eq!(paths.path_to(50), None);

    let from_two = session.dijkstra(2).expect("dijkstra");
    assert_eq!(from_two.distance_to(3), Some(5));
    assert_eq!(from_two.path_to(3), Some(vec![2, 3]));

    match session.bellman_ford(1).expect("bellman-ford") {
        BellmanFordOutcome::Distances(bf) => assert_eq!(bf, paths),
        BellmanFordOutcome::NegativeCycle(edge) => panic!("unexpected cycle at {edge:?}"),
    }
}

#[test]
fn scenario_components_are_acyclic() {
    let session = scenario();
    let components = session.strongly_connected_components();
    assert_eq!(components.len(), 100);
    assert!(session.dependency_cycles().is_empty());
}

#[test]
fn scenario_queries_are_repeatable() {
    let session = scenario();
    let before = session.graph().undirected.clone();
    let first = (
        session.bfs_count(1),
        session.kruskal(),
        session.dijkstra(1),
        session.strongly_connected_components(),
    );
    let second = (
        session.bfs_count(1),
        session.kruskal(),
        session.dijkstra(1),
        session.strongly_connected_components(),
    );
    assert_eq!(first, second);
    assert_eq!(session.graph().undirected, before);
}

// ---------------------------------------------------------------------------
// Dependency cycles
// ---------------------------------------------------------------------------

#[test]
fn mutual_dependencies_form_one_component() {
    // 0 <-> 1 <-> 2 in a ring, 3 depends on the ring, 4 on itself.
    let records = vec![
        TaskRecord::new(0, [2]),
        TaskRecord::new(1, [0]),
        TaskRecord::new(2, [1]),
        TaskRecord::new(3, [2]),
        TaskRecord::new(4, [4]),
    ];
    let config = EngineConfig {
        max_vertices: 5,
        ..EngineConfig::default()
    };
    let session = TaskAnalytics::build(&records, &config).expect("session");

    assert_eq!(
        sorted_partition(session.strongly_connected_components()),
        vec![vec![0, 1, 2], vec![3], vec![4]]
    );
    assert_eq!(
        sorted_partition(session.dependency_cycles()),
        vec![vec![0, 1, 2], vec![4]]
    );

    let pg = session.graph().directed.to_petgraph();
    let oracle: Vec<Vec<usize>> = kosaraju_scc(&pg)
        .into_iter()
        .map(|c| c.into_iter().map(NodeIndex::index).collect())
        .collect();
    assert_eq!(
        sorted_partition(session.strongly_connected_components()),
        sorted_partition(oracle)
    );
}

// ---------------------------------------------------------------------------
// Dangling and malformed input
// ---------------------------------------------------------------------------

#[test]
fn dangling_dependency_is_one_sided() {
    let records = vec![TaskRecord::new(1, [150]), TaskRecord::new(2, [1])];
    let session = TaskAnalytics::build(&records, &EngineConfig::default()).expect("session");

    assert_eq!(session.graph().dangling, vec![(1, 150)]);
    assert_eq!(session.stats().dangling_count, 1);
    // The dangling entry is listed but never followed.
    assert_eq!(session.graph().undirected.degree(1), 2);
    assert_eq!(session.bfs_count(1), Ok(2));
    assert_eq!(session.kruskal().edges, vec![Edge::new(2, 1, 3)]);
}

#[test]
fn malformed_batches_build_nothing() {
    let config = EngineConfig::default();

    let out_of_range = vec![TaskRecord::new(100, [])];
    assert_eq!(
        TaskAnalytics::build(&out_of_range, &config).map(|_| ()),
        Err(GraphError::InvalidVertex {
            vertex: 100,
            capacity: 100
        })
    );

    let crowded = vec![TaskRecord::new(0, 1..=11)];
    assert_eq!(
        TaskAnalytics::build(&crowded, &config).map(|_| ()),
        Err(GraphError::TooManyDependencies {
            task: 0,
            count: 11,
            max: 10
        })
    );

    let duplicated = vec![TaskRecord::new(4, []), TaskRecord::new(4, [1])];
    assert_eq!(
        TaskAnalytics::build(&duplicated, &config).map(|_| ()),
        Err(GraphError::DuplicateTask { task: 4 })
    );
}

#[test]
fn builds_are_content_addressed() {
    let records = vec![TaskRecord::new(2, [1]), TaskRecord::new(3, [1, 2])];
    let a = GraphBuilder::new(10).build(&records).expect("build");
    let b = GraphBuilder::new(10).build(&records).expect("build");
    assert_eq!(a.content_hash, b.content_hash);

    let reordered = vec![TaskRecord::new(3, [1, 2]), TaskRecord::new(2, [1])];
    let c = GraphBuilder::new(10).build(&reordered).expect("build");
    assert_ne!(a.content_hash, c.content_hash);
}

// ---------------------------------------------------------------------------
// Hand-built graphs
// ---------------------------------------------------------------------------

#[test]
fn negative_cycle_is_reported_not_raised() {
    let mut g = Graph::new(2).expect("graph");
    g.add_arc(0, 1, 1).expect("arc");
    g.add_arc(1, 0, -3).expect("arc");

    let outcome = bellman_ford(&g, 0).expect("bellman-ford");
    assert!(outcome.has_negative_cycle());
    assert!(matches!(
        outcome.into_result(),
        Err(GraphError::NegativeCycleDetected { .. })
    ));
}

#[test]
fn weights_match_petgraph_oracles() {
    let records = vec![
        TaskRecord::new(1, [0]),
        TaskRecord::new(2, [0, 1]),
        TaskRecord::new(3, [1]),
        TaskRecord::new(4, [2, 3]),
        TaskRecord::new(5, [4, 0]),
        TaskRecord::new(7, [6]),
    ];
    let config = EngineConfig {
        max_vertices: 8,
        ..EngineConfig::default()
    };
    let session = TaskAnalytics::build(&records, &config).expect("session");
    let pg = session.graph().undirected.to_petgraph();

    let oracle_mst: i64 = min_spanning_tree(&pg)
        .filter_map(|element| match element {
            Element::Edge { weight, .. } => Some(weight),
            Element::Node { .. } => None,
        })
        .sum();
    assert_eq!(session.kruskal().total_weight(), oracle_mst);

    let paths = session.dijkstra(0).expect("dijkstra");
    let oracle = pg_dijkstra(&pg, NodeIndex::new(0), None, |e| *e.weight());
    for vertex in 0..8 {
        assert_eq!(
            paths.distance_to(vertex),
            oracle.get(&NodeIndex::new(vertex)).copied(),
            "distance to {vertex}"
        );
    }
}

#[test]
fn iterative_strategy_matches_recursive_on_scenario() {
    let records = read_records(SCENARIO_JSON.as_bytes()).expect("records");
    let recursive = TaskAnalytics::build(
        &records,
        &EngineConfig {
            dfs: DfsStrategy::Recursive,
            ..EngineConfig::default()
        },
    )
    .expect("session");
    let iterative = scenario();
    assert_eq!(iterative.dfs_count(3), recursive.dfs_count(3));
    assert_eq!(
        iterative.strongly_connected_components(),
        recursive.strongly_connected_components()
    );
}

// ---------------------------------------------------------------------------
// Max flow
// ---------------------------------------------------------------------------

#[test]
fn flow_from_json_matrix() {
    let capacity: CapacityMatrix = serde_json::from_str(
        "[[0, 10, 10, 0], [0, 0, 2, 4], [0, 0, 0, 9], [0, 0, 0, 0]]",
    )
    .expect("matrix");

    for method in [FlowMethod::FordFulkerson, FlowMethod::EdmondsKarp] {
        let result = max_flow(&capacity, 0, 3, method).expect("flow");
        assert_eq!(result.value(), 13, "{method:?}");
        assert_eq!(result.min_cut_source_side().first(), Some(&0));
    }
}

#[test]
fn ragged_matrix_is_rejected() {
    let parsed: Result<CapacityMatrix, _> = serde_json::from_str("[[0, 1], [0]]");
    assert!(parsed.is_err());
}
