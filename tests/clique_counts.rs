// Licensed under the Apache License, Version 2.0 (the "License"); you may
// not use this file except in compliance with the License. You may obtain
// a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the
// License for the specific language governing permissions and limitations
// under the License.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use petgraph::graph::{DiGraph, UnGraph};
use rand::prelude::*;
use rand_pcg::Pcg64;

use rustworkx_pivoter::{
    clique_count_map, count_cliques, count_cliques_batch, count_cliques_with_config, degeneracy,
    AdjacencyGraph, CliqueCountError, CountConfig, LabeledGraphBuilder, Symmetry,
};

fn random_edges(n: usize, p: f64, rng: &mut Pcg64) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for a in 0..n {
        for b in a + 1..n {
            if rng.random_bool(p) {
                edges.push((a, b));
            }
        }
    }
    edges
}

fn complete_edges(n: usize) -> Vec<(usize, usize)> {
    (0..n).flat_map(|a| (a + 1..n).map(move |b| (a, b))).collect()
}

/// Count cliques by testing every vertex subset.
fn brute_force(n: usize, edges: &[(usize, usize)]) -> Vec<u64> {
    assert!(n <= 16);
    let mut adj = vec![0u32; n];
    for &(a, b) in edges {
        adj[a] |= 1 << b;
        adj[b] |= 1 << a;
    }
    let mut counts = vec![0u64; n + 1];
    for subset in 0u32..(1 << n) {
        let is_clique = (0..n)
            .filter(|&v| subset & (1 << v) != 0)
            .all(|v| (adj[v] | (1 << v)) & subset == subset);
        if is_clique {
            counts[subset.count_ones() as usize] += 1;
        }
    }
    counts
}

fn binomial(n: usize, k: usize) -> BigUint {
    let mut value = BigUint::one();
    for j in 0..k {
        value *= (n - j) as u64;
        value /= (j + 1) as u64;
    }
    value
}

fn decimal_pairs(graph: &AdjacencyGraph) -> Vec<(usize, String)> {
    count_cliques(graph)
        .unwrap()
        .to_decimal_map()
        .into_iter()
        .collect()
}

fn pairs(expected: &[(usize, &str)]) -> Vec<(usize, String)> {
    expected.iter().map(|&(k, c)| (k, c.to_string())).collect()
}

#[test]
fn test_triangle_scenario() {
    let graph = AdjacencyGraph::from_edges(3, vec![(0, 1), (1, 2), (0, 2)]).unwrap();
    assert_eq!(
        decimal_pairs(&graph),
        pairs(&[(1, "3"), (2, "3"), (3, "1")])
    );
}

#[test]
fn test_path_scenario() {
    let graph = AdjacencyGraph::from_edges(4, vec![(0, 1), (1, 2), (2, 3)]).unwrap();
    assert_eq!(decimal_pairs(&graph), pairs(&[(1, "4"), (2, "3")]));
}

#[test]
fn test_two_triangles_scenario() {
    let graph = AdjacencyGraph::from_edges(
        6,
        vec![(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)],
    )
    .unwrap();
    assert_eq!(
        decimal_pairs(&graph),
        pairs(&[(1, "6"), (2, "6"), (3, "2")])
    );
}

#[test]
fn test_matches_brute_force_on_random_graphs() {
    let mut rng = Pcg64::seed_from_u64(0x5eed);
    for trial in 0..120 {
        let n = rng.random_range(1..=12);
        let p = [0.1, 0.3, 0.5, 0.7, 0.9][trial % 5];
        let edges = random_edges(n, p, &mut rng);
        let graph = AdjacencyGraph::from_edges(n, edges.clone()).unwrap();
        let counts = count_cliques(&graph).unwrap();
        let expected = brute_force(n, &edges);
        for (k, &want) in expected.iter().enumerate() {
            assert_eq!(
                counts.get(k),
                BigUint::from(want),
                "trial {trial}, n = {n}, k = {k}, edges = {edges:?}"
            );
        }
        assert_eq!(counts.get(n + 1), BigUint::zero());
    }
}

#[test]
fn test_vertex_and_edge_counts() {
    let mut rng = Pcg64::seed_from_u64(7);
    for _ in 0..10 {
        let n = rng.random_range(20..60);
        let edges = random_edges(n, 0.4, &mut rng);
        let graph = AdjacencyGraph::from_edges(n, edges.clone()).unwrap();
        let counts = count_cliques(&graph).unwrap();
        assert_eq!(counts.get(0), BigUint::one());
        assert_eq!(counts.get(1), BigUint::from(n));
        assert_eq!(counts.get(2), BigUint::from(edges.len()));
    }
}

#[test]
fn test_complete_graph_exceeds_u64() {
    let n = 70;
    let graph = AdjacencyGraph::from_edges(n, complete_edges(n)).unwrap();
    let counts = count_cliques(&graph).unwrap();
    assert_eq!(counts.max_k(), n);
    for k in 1..=n {
        assert_eq!(counts.get(k), binomial(n, k), "k = {k}");
    }
    assert!(counts.get(35) > BigUint::from(u64::MAX));
    assert_eq!(counts.largest_clique_size(), n);
    // Every nonempty subset of the vertices is a clique.
    assert_eq!(counts.total(), (BigUint::one() << n) - 1u32);
}

#[test]
fn test_complete_graph_past_small_binomial_rows() {
    let n = 140;
    let graph = AdjacencyGraph::from_edges(n, complete_edges(n)).unwrap();
    let counts = count_cliques(&graph).unwrap();
    for k in [1, 2, 3, 70, 139, 140] {
        assert_eq!(counts.get(k), binomial(n, k), "k = {k}");
    }
    assert_eq!(counts.get(141), BigUint::zero());
}

#[test]
fn test_empty_graph() {
    let graph = AdjacencyGraph::from_edges(9, Vec::new()).unwrap();
    let counts = count_cliques(&graph).unwrap();
    assert_eq!(counts.get(1), BigUint::from(9u32));
    for k in 2..12 {
        assert_eq!(counts.get(k), BigUint::zero());
    }
    assert_eq!(decimal_pairs(&graph), pairs(&[(1, "9")]));
}

#[test]
fn test_idempotent() {
    let mut rng = Pcg64::seed_from_u64(11);
    let n = 45;
    let edges = random_edges(n, 0.6, &mut rng);
    let graph = AdjacencyGraph::from_edges(n, edges).unwrap();
    let first = count_cliques(&graph).unwrap();
    let second = count_cliques(&graph).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_relabeling_invariance() {
    let mut rng = Pcg64::seed_from_u64(42);
    for _ in 0..5 {
        let n = 35;
        let edges = random_edges(n, 0.55, &mut rng);
        let mut perm: Vec<usize> = (0..n).collect();
        perm.shuffle(&mut rng);
        let relabeled: Vec<(usize, usize)> =
            edges.iter().map(|&(a, b)| (perm[a], perm[b])).collect();
        let original = count_cliques(&AdjacencyGraph::from_edges(n, edges).unwrap()).unwrap();
        let permuted = count_cliques(&AdjacencyGraph::from_edges(n, relabeled).unwrap()).unwrap();
        assert_eq!(original, permuted);
    }
}

#[test]
fn test_cap_matches_uncapped_prefix() {
    let mut rng = Pcg64::seed_from_u64(3);
    let n = 40;
    let edges = random_edges(n, 0.7, &mut rng);
    let graph = AdjacencyGraph::from_edges(n, edges).unwrap();
    let full = count_cliques(&graph).unwrap();
    for cap in 1..=full.largest_clique_size() {
        let config = CountConfig {
            max_clique_size: Some(cap),
            ..CountConfig::default()
        };
        let capped = count_cliques_with_config(&graph, &config).unwrap();
        assert_eq!(capped.max_k(), cap);
        for k in 0..=cap {
            assert_eq!(capped.get(k), full.get(k), "cap = {cap}, k = {k}");
        }
    }
}

#[test]
fn test_clique_count_map_symmetry() {
    let adjacency = vec![vec![1, 2], vec![2], vec![]];
    let err = clique_count_map(adjacency.clone(), &CountConfig::default()).unwrap_err();
    assert!(matches!(err, CliqueCountError::AsymmetricAdjacency { .. }));

    let config = CountConfig {
        symmetry: Symmetry::Symmetrize,
        ..CountConfig::default()
    };
    let map = clique_count_map(adjacency, &config).unwrap();
    assert_eq!(map[&1], "3");
    assert_eq!(map[&2], "3");
    assert_eq!(map[&3], "1");
}

#[test]
fn test_malformed_input_fails_before_counting() {
    let err = clique_count_map(vec![vec![0usize]], &CountConfig::default()).unwrap_err();
    assert_eq!(err, CliqueCountError::SelfLoop { vertex: 0 });
    let err = clique_count_map(vec![vec![3usize]], &CountConfig::default()).unwrap_err();
    assert_eq!(
        err,
        CliqueCountError::VertexOutOfRange {
            vertex: 3,
            node_count: 1
        }
    );
}

#[test]
fn test_batch_matches_sequential() {
    let mut rng = Pcg64::seed_from_u64(99);
    let graphs: Vec<AdjacencyGraph> = (0..8)
        .map(|i| {
            let n = 10 + 3 * i;
            AdjacencyGraph::from_edges(n, random_edges(n, 0.5, &mut rng)).unwrap()
        })
        .collect();
    let config = CountConfig::default();
    let batch = count_cliques_batch(&graphs, &config);
    assert_eq!(batch.len(), graphs.len());
    for (graph, result) in graphs.iter().zip(batch) {
        assert_eq!(result.unwrap(), count_cliques(graph).unwrap());
    }
}

#[test]
fn test_petgraph_input() {
    let mut g = UnGraph::<&str, ()>::new_undirected();
    let nodes: Vec<_> = ["a", "b", "c", "d"].iter().map(|&w| g.add_node(w)).collect();
    for (i, j) in [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)] {
        g.add_edge(nodes[i], nodes[j], ());
    }
    let graph = AdjacencyGraph::from_petgraph(&g).unwrap();
    assert_eq!(degeneracy(&graph).unwrap(), 3);
    assert_eq!(
        decimal_pairs(&graph),
        pairs(&[(1, "4"), (2, "6"), (3, "4"), (4, "1")])
    );
}

#[test]
fn test_directed_petgraph_ignores_direction() {
    let mut g = DiGraph::<(), ()>::new();
    let a = g.add_node(());
    let b = g.add_node(());
    let c = g.add_node(());
    g.extend_with_edges([(a, b), (b, c), (c, a)]);
    let graph = AdjacencyGraph::from_petgraph(&g).unwrap();
    assert_eq!(
        decimal_pairs(&graph),
        pairs(&[(1, "3"), (2, "3"), (3, "1")])
    );

    g.add_edge(b, a, ());
    assert!(matches!(
        AdjacencyGraph::from_petgraph(&g),
        Err(CliqueCountError::DuplicateEdge { .. })
    ));
}

#[test]
fn test_collaboration_graph() {
    let papers: [&[&str]; 4] = [
        &["knuth", "lamport", "dijkstra"],
        &["knuth", "lamport"],
        &["hoare", "dijkstra"],
        &["liskov"],
    ];
    let mut builder = LabeledGraphBuilder::new();
    for authors in papers {
        for (i, &a) in authors.iter().enumerate() {
            builder.add_node(a).unwrap();
            for &b in &authors[i + 1..] {
                builder.add_edge(a, b).unwrap();
            }
        }
    }
    let labeled = builder.build().unwrap();
    assert_eq!(labeled.graph.node_count(), 5);
    assert_eq!(labeled.graph.edge_count(), 4);
    let counts = count_cliques(&labeled.graph).unwrap();
    assert_eq!(counts.to_json(), r#"{"1":"5","2":"4","3":"1"}"#);
}
