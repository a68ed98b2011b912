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

//! Exact clique counting for undirected graphs.
//!
//! Counts the cliques of every size, up to the clique number, without
//! listing them. The search follows a degeneracy ordering, pivots on the
//! candidate with the most candidate neighbors, and closes whole families of
//! cliques with a binomial count instead of recursing into them. Counts are
//! arbitrary precision.
//!
//! ```
//! use rustworkx_pivoter::{count_cliques, AdjacencyGraph};
//!
//! // Two triangles sharing an edge.
//! let graph = AdjacencyGraph::from_edges(4, vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)])?;
//! let counts = count_cliques(&graph)?;
//! assert_eq!(counts.to_decimal_map()[&3], "2");
//! # Ok::<(), rustworkx_pivoter::CliqueCountError>(())
//! ```

pub mod cliques;
pub mod config;
pub mod error;
pub mod graph;

use indexmap::IndexMap;
use rayon::prelude::*;

pub use cliques::{CliqueCounter, CliqueCounts, DegeneracyOrder, ProgressObserver};
pub use config::{CountConfig, Symmetry};
pub use error::CliqueCountError;
pub use graph::{AdjacencyGraph, LabeledGraph, LabeledGraphBuilder};

/// Count the cliques of every size in `graph`.
pub fn count_cliques(graph: &AdjacencyGraph) -> Result<CliqueCounts, CliqueCountError> {
    count_cliques_with_config(graph, &CountConfig::default())
}

pub fn count_cliques_with_config(
    graph: &AdjacencyGraph,
    config: &CountConfig,
) -> Result<CliqueCounts, CliqueCountError> {
    CliqueCounter::new(graph, config)?.run()
}

/// Count cliques of a graph given as one neighbor list per vertex and
/// return the nonzero counts as decimal strings keyed by clique size.
///
/// ```
/// use rustworkx_pivoter::{clique_count_map, CountConfig};
///
/// let adjacency = vec![vec![1, 2], vec![0, 2], vec![0, 1]];
/// let map = clique_count_map(adjacency, &CountConfig::default()).unwrap();
/// assert_eq!(map.into_iter().collect::<Vec<_>>(), vec![
///     (1, "3".to_string()),
///     (2, "3".to_string()),
///     (3, "1".to_string()),
/// ]);
/// ```
pub fn clique_count_map<I, N>(
    adjacency: I,
    config: &CountConfig,
) -> Result<IndexMap<usize, String>, CliqueCountError>
where
    I: IntoIterator<Item = N>,
    N: IntoIterator<Item = usize>,
{
    let graph = AdjacencyGraph::from_adjacency(adjacency, config.symmetry)?;
    Ok(count_cliques_with_config(&graph, config)?.to_decimal_map())
}

/// Degeneracy of `graph`: the largest minimum degree over its subgraphs.
pub fn degeneracy(graph: &AdjacencyGraph) -> Result<usize, CliqueCountError> {
    Ok(DegeneracyOrder::compute(graph)?.degeneracy())
}

/// Count many independent graphs in parallel.
///
/// Results are returned in input order. Each graph is still counted by a
/// single sequential search; only separate graphs run concurrently.
pub fn count_cliques_batch(
    graphs: &[AdjacencyGraph],
    config: &CountConfig,
) -> Vec<Result<CliqueCounts, CliqueCountError>> {
    graphs
        .par_iter()
        .map(|graph| count_cliques_with_config(graph, config))
        .collect()
}
