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

//! Validated input graphs.
//!
//! Everything the counting engine reads goes through [`AdjacencyGraph`],
//! which guarantees a simple undirected graph on vertices `0..n` with sorted
//! neighbor lists. Malformed input is rejected here, before any counting
//! work starts.

use std::hash::Hash;

use foldhash::{HashSet, HashSetExt};
use indexmap::IndexSet;
use petgraph::visit::{EdgeRef, IntoEdgeReferences, IntoNodeIdentifiers, NodeIndexable};

use crate::config::Symmetry;
use crate::error::CliqueCountError;

/// An immutable simple undirected graph in compressed adjacency form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyGraph {
    offsets: Vec<usize>,
    targets: Vec<u32>,
}

impl AdjacencyGraph {
    /// Build a graph from one neighbor list per vertex.
    ///
    /// Vertex `i` is the `i`-th item of `adjacency`. Self-loops, out of range
    /// ids and repeated neighbors are rejected. With [`Symmetry::Require`] a
    /// relation listed on only one side is an error; with
    /// [`Symmetry::Symmetrize`] the missing side is added.
    ///
    /// ```
    /// use rustworkx_pivoter::{AdjacencyGraph, Symmetry};
    ///
    /// let graph = AdjacencyGraph::from_adjacency(
    ///     vec![vec![1, 2], vec![0, 2], vec![0, 1]],
    ///     Symmetry::Require,
    /// )
    /// .unwrap();
    /// assert_eq!(graph.edge_count(), 3);
    /// ```
    pub fn from_adjacency<I, N>(adjacency: I, symmetry: Symmetry) -> Result<Self, CliqueCountError>
    where
        I: IntoIterator<Item = N>,
        N: IntoIterator<Item = usize>,
    {
        let rows: Vec<Vec<usize>> = adjacency
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect();
        let node_count = rows.len();
        check_node_count(node_count)?;

        let mut lists: Vec<Vec<u32>> = Vec::with_capacity(node_count);
        for (vertex, row) in rows.into_iter().enumerate() {
            let mut list = Vec::with_capacity(row.len());
            for neighbor in row {
                check_vertex(neighbor, node_count)?;
                if neighbor == vertex {
                    return Err(CliqueCountError::SelfLoop { vertex });
                }
                list.push(neighbor as u32);
            }
            list.sort_unstable();
            if let Some(pair) = list.windows(2).find(|pair| pair[0] == pair[1]) {
                return Err(CliqueCountError::DuplicateEdge {
                    source: vertex,
                    target: pair[0] as usize,
                });
            }
            lists.push(list);
        }

        let mut missing: Vec<(u32, u32)> = Vec::new();
        for (vertex, list) in lists.iter().enumerate() {
            for &neighbor in list {
                if lists[neighbor as usize].binary_search(&(vertex as u32)).is_err() {
                    match symmetry {
                        Symmetry::Require => {
                            return Err(CliqueCountError::AsymmetricAdjacency {
                                source: vertex,
                                target: neighbor as usize,
                            })
                        }
                        Symmetry::Symmetrize => missing.push((neighbor, vertex as u32)),
                    }
                }
            }
        }
        for (vertex, neighbor) in missing {
            lists[vertex as usize].push(neighbor);
        }

        Ok(Self::from_sorted_lists(lists))
    }

    /// Build a graph on `node_count` vertices from an edge list.
    ///
    /// Each unordered pair may appear only once, in either orientation.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self, CliqueCountError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        check_node_count(node_count)?;
        let mut lists: Vec<Vec<u32>> = vec![Vec::new(); node_count];
        for (source, target) in edges {
            check_vertex(source, node_count)?;
            check_vertex(target, node_count)?;
            if source == target {
                return Err(CliqueCountError::SelfLoop { vertex: source });
            }
            lists[source].push(target as u32);
            lists[target].push(source as u32);
        }
        for (vertex, list) in lists.iter_mut().enumerate() {
            list.sort_unstable();
            if let Some(pair) = list.windows(2).find(|pair| pair[0] == pair[1]) {
                return Err(CliqueCountError::DuplicateEdge {
                    source: vertex,
                    target: pair[0] as usize,
                });
            }
        }
        Ok(Self::from_sorted_lists(lists))
    }

    /// Build a graph from any petgraph graph.
    ///
    /// Nodes are renumbered `0..n` in node identifier order, which makes
    /// graphs with removed nodes (e.g. `StableGraph`) usable. Edge direction
    /// is ignored, so a directed graph holding both `a -> b` and `b -> a`
    /// is reported as a duplicate edge.
    pub fn from_petgraph<G>(graph: G) -> Result<Self, CliqueCountError>
    where
        G: IntoNodeIdentifiers + IntoEdgeReferences + NodeIndexable,
    {
        let mut compact: Vec<Option<usize>> = vec![None; graph.node_bound()];
        let mut node_count = 0;
        for node in graph.node_identifiers() {
            compact[graph.to_index(node)] = Some(node_count);
            node_count += 1;
        }
        let lookup = |index: usize| {
            compact
                .get(index)
                .copied()
                .flatten()
                .ok_or(CliqueCountError::VertexOutOfRange {
                    vertex: index,
                    node_count,
                })
        };
        let mut edges = Vec::new();
        for edge in graph.edge_references() {
            let source = lookup(graph.to_index(edge.source()))?;
            let target = lookup(graph.to_index(edge.target()))?;
            edges.push((source, target));
        }
        Self::from_edges(node_count, edges)
    }

    fn from_sorted_lists(mut lists: Vec<Vec<u32>>) -> Self {
        let mut offsets = Vec::with_capacity(lists.len() + 1);
        let total: usize = lists.iter().map(Vec::len).sum();
        let mut targets = Vec::with_capacity(total);
        offsets.push(0);
        for list in &mut lists {
            // Symmetrized neighbors are appended unsorted.
            list.sort_unstable();
            targets.extend_from_slice(list);
            offsets.push(targets.len());
        }
        AdjacencyGraph { offsets, targets }
    }

    /// Number of vertices.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of undirected edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }

    #[inline]
    pub fn degree(&self, vertex: usize) -> usize {
        self.offsets[vertex + 1] - self.offsets[vertex]
    }

    /// Sorted neighbors of `vertex`.
    #[inline]
    pub fn neighbors(&self, vertex: usize) -> &[u32] {
        &self.targets[self.offsets[vertex]..self.offsets[vertex + 1]]
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        a < self.node_count()
            && b < self.node_count()
            && self.neighbors(a).binary_search(&(b as u32)).is_ok()
    }

    /// Highest vertex degree, 0 for an edgeless graph.
    pub fn max_degree(&self) -> usize {
        (0..self.node_count())
            .map(|v| self.degree(v))
            .max()
            .unwrap_or(0)
    }
}

fn check_node_count(node_count: usize) -> Result<(), CliqueCountError> {
    // u32::MAX itself is reserved as a sentinel by the degeneracy buckets.
    if node_count >= u32::MAX as usize {
        return Err(CliqueCountError::TooManyVertices { node_count });
    }
    Ok(())
}

#[inline]
fn check_vertex(vertex: usize, node_count: usize) -> Result<(), CliqueCountError> {
    if vertex >= node_count {
        return Err(CliqueCountError::VertexOutOfRange { vertex, node_count });
    }
    Ok(())
}

/// A graph together with the labels its vertex ids were assigned from.
#[derive(Debug, Clone)]
pub struct LabeledGraph<L> {
    pub graph: AdjacencyGraph,
    labels: IndexSet<L, foldhash::fast::RandomState>,
}

impl<L: Hash + Eq> LabeledGraph<L> {
    /// The label of vertex `id`.
    pub fn label(&self, id: usize) -> Option<&L> {
        self.labels.get_index(id)
    }

    /// The vertex id assigned to `label`.
    pub fn id_of(&self, label: &L) -> Option<usize> {
        self.labels.get_index_of(label)
    }
}

/// Collects relations between arbitrary labels (author names, keys, ...)
/// into an [`AdjacencyGraph`].
///
/// Ids are handed out in first-seen order. Repeating a relation, in either
/// direction, is not an error: the builder keeps a single edge.
///
/// ```
/// use rustworkx_pivoter::LabeledGraphBuilder;
///
/// let mut builder = LabeledGraphBuilder::new();
/// builder.add_edge("ada", "grace").unwrap();
/// builder.add_edge("grace", "ada").unwrap();
/// let labeled = builder.build().unwrap();
/// assert_eq!(labeled.graph.edge_count(), 1);
/// assert_eq!(labeled.label(1), Some(&"grace"));
/// ```
#[derive(Debug, Clone)]
pub struct LabeledGraphBuilder<L> {
    labels: IndexSet<L, foldhash::fast::RandomState>,
    edges: HashSet<(u32, u32)>,
}

impl<L: Hash + Eq> Default for LabeledGraphBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Hash + Eq> LabeledGraphBuilder<L> {
    pub fn new() -> Self {
        LabeledGraphBuilder {
            labels: IndexSet::with_hasher(foldhash::fast::RandomState::default()),
            edges: HashSet::new(),
        }
    }

    /// Register `label` as a vertex and return its id.
    pub fn add_node(&mut self, label: L) -> Result<usize, CliqueCountError> {
        if let Some(id) = self.labels.get_index_of(&label) {
            return Ok(id);
        }
        check_node_count(self.labels.len() + 1)?;
        Ok(self.labels.insert_full(label).0)
    }

    /// Relate two labels. Returns `false` if the edge was already present.
    pub fn add_edge(&mut self, a: L, b: L) -> Result<bool, CliqueCountError> {
        let a = self.add_node(a)?;
        let b = self.add_node(b)?;
        if a == b {
            return Err(CliqueCountError::SelfLoop { vertex: a });
        }
        let key = (a.min(b) as u32, a.max(b) as u32);
        Ok(self.edges.insert(key))
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn build(self) -> Result<LabeledGraph<L>, CliqueCountError> {
        let edges = self
            .edges
            .iter()
            .map(|&(a, b)| (a as usize, b as usize));
        let graph = AdjacencyGraph::from_edges(self.labels.len(), edges)?;
        Ok(LabeledGraph {
            graph,
            labels: self.labels,
        })
    }
}
