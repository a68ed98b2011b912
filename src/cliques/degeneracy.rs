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

use fixedbitset::FixedBitSet;

use crate::error::{try_filled, try_reserve, CliqueCountError};
use crate::graph::AdjacencyGraph;

const NONE: u32 = u32::MAX;

/// Degree buckets as intrusive doubly linked lists, one list per degree.
///
/// Insertion is at the front, so among vertices of equal degree the most
/// recently (re)bucketed one is peeled first.
struct DegreeBuckets {
    head: Vec<u32>,
    next: Vec<u32>,
    prev: Vec<u32>,
    degree: Vec<usize>,
}

impl DegreeBuckets {
    fn push_front(&mut self, vertex: u32) {
        let v = vertex as usize;
        let bucket = self.degree[v];
        let old_head = self.head[bucket];
        self.prev[v] = NONE;
        self.next[v] = old_head;
        if old_head != NONE {
            self.prev[old_head as usize] = vertex;
        }
        self.head[bucket] = vertex;
    }

    fn unlink(&mut self, vertex: u32) {
        let v = vertex as usize;
        let (prev, next) = (self.prev[v], self.next[v]);
        if prev != NONE {
            self.next[prev as usize] = next;
        } else {
            self.head[self.degree[v]] = next;
        }
        if next != NONE {
            self.prev[next as usize] = prev;
        }
    }
}

/// A smallest-last vertex ordering with each vertex's neighbors split into
/// those peeled before it (`earlier`) and after it (`later`).
///
/// The largest `later` list has exactly `degeneracy` entries, so no clique
/// can have more than `degeneracy + 1` vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegeneracyOrder {
    order: Vec<u32>,
    order_number: Vec<u32>,
    later_offsets: Vec<usize>,
    later: Vec<u32>,
    earlier_offsets: Vec<usize>,
    earlier: Vec<u32>,
    degeneracy: usize,
}

impl DegeneracyOrder {
    /// Peel `graph` with a bucket queue in O(n + m).
    ///
    /// Vertices are bucketed in descending id order, so among untouched
    /// vertices of equal degree the smallest id is peeled first. The result
    /// is a deterministic function of the graph.
    pub fn compute(graph: &AdjacencyGraph) -> Result<Self, CliqueCountError> {
        let n = graph.node_count();
        let mut degree = try_filled(n, 0usize, "vertex degrees")?;
        for (v, d) in degree.iter_mut().enumerate() {
            *d = graph.degree(v);
        }
        let max_degree = graph.max_degree();
        let mut buckets = DegreeBuckets {
            head: try_filled(max_degree + 1, NONE, "degree buckets")?,
            next: try_filled(n, NONE, "degree buckets")?,
            prev: try_filled(n, NONE, "degree buckets")?,
            degree,
        };
        for v in (0..n as u32).rev() {
            buckets.push_front(v);
        }

        let mut removed = FixedBitSet::with_capacity(n);
        let mut order: Vec<u32> = Vec::new();
        try_reserve(&mut order, n, "degeneracy order")?;
        let mut order_number = try_filled(n, 0u32, "degeneracy order")?;
        let mut degeneracy = 0;
        let mut cursor = 0;

        while order.len() < n {
            while buckets.head[cursor] == NONE {
                cursor += 1;
            }
            let vertex = buckets.head[cursor];
            buckets.unlink(vertex);
            degeneracy = degeneracy.max(cursor);
            order_number[vertex as usize] = order.len() as u32;
            order.push(vertex);
            removed.insert(vertex as usize);

            for &neighbor in graph.neighbors(vertex as usize) {
                if !removed.contains(neighbor as usize) {
                    buckets.unlink(neighbor);
                    buckets.degree[neighbor as usize] -= 1;
                    buckets.push_front(neighbor);
                }
            }
            // Remaining degrees dropped by at most one.
            cursor = cursor.saturating_sub(1);
        }

        let mut later_offsets = try_filled(n + 1, 0usize, "later neighbor lists")?;
        let mut earlier_offsets = try_filled(n + 1, 0usize, "earlier neighbor lists")?;
        let mut later = Vec::new();
        let mut earlier = Vec::new();
        try_reserve(&mut later, graph.edge_count(), "later neighbor lists")?;
        try_reserve(&mut earlier, graph.edge_count(), "earlier neighbor lists")?;
        for v in 0..n {
            let rank = order_number[v];
            for &neighbor in graph.neighbors(v) {
                if order_number[neighbor as usize] > rank {
                    later.push(neighbor);
                } else {
                    earlier.push(neighbor);
                }
            }
            later_offsets[v + 1] = later.len();
            earlier_offsets[v + 1] = earlier.len();
        }

        let ordering = DegeneracyOrder {
            order,
            order_number,
            later_offsets,
            later,
            earlier_offsets,
            earlier,
            degeneracy,
        };
        debug_assert_eq!(
            (0..n).map(|v| ordering.later(v as u32).len()).max().unwrap_or(0),
            degeneracy
        );
        Ok(ordering)
    }

    /// Check the ordering against `graph`: `order` must be a permutation,
    /// and every neighbor of a vertex must sit in exactly the side list its
    /// order number says.
    pub fn verify(&self, graph: &AdjacencyGraph) -> Result<(), CliqueCountError> {
        let n = graph.node_count();
        if self.order.len() != n || self.order_number.len() != n {
            return Err(CliqueCountError::InconsistentOrdering {
                vertex: self.order.len().min(n),
            });
        }
        for (position, &vertex) in self.order.iter().enumerate() {
            if self.order_number[vertex as usize] as usize != position {
                return Err(CliqueCountError::InconsistentOrdering {
                    vertex: vertex as usize,
                });
            }
        }
        for v in 0..n {
            let vertex = v as u32;
            let rank = self.order_number[v];
            let earlier = self.earlier(vertex);
            let later = self.later(vertex);
            let consistent = earlier.len() + later.len() == graph.degree(v)
                && later
                    .iter()
                    .all(|&w| self.order_number[w as usize] > rank && graph.has_edge(v, w as usize))
                && earlier
                    .iter()
                    .all(|&w| self.order_number[w as usize] < rank && graph.has_edge(v, w as usize));
            if !consistent {
                return Err(CliqueCountError::InconsistentOrdering { vertex: v });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Vertices in peel order.
    #[inline]
    pub fn vertices(&self) -> &[u32] {
        &self.order
    }

    #[inline]
    pub fn order_number(&self, vertex: u32) -> usize {
        self.order_number[vertex as usize] as usize
    }

    /// Neighbors of `vertex` peeled after it.
    #[inline]
    pub fn later(&self, vertex: u32) -> &[u32] {
        let v = vertex as usize;
        &self.later[self.later_offsets[v]..self.later_offsets[v + 1]]
    }

    /// Neighbors of `vertex` peeled before it.
    #[inline]
    pub fn earlier(&self, vertex: u32) -> &[u32] {
        let v = vertex as usize;
        &self.earlier[self.earlier_offsets[v]..self.earlier_offsets[v + 1]]
    }

    #[inline]
    pub fn degeneracy(&self) -> usize {
        self.degeneracy
    }

    /// Upper bound on the clique number: `degeneracy + 1`, or 0 for the
    /// graph without vertices.
    #[inline]
    pub fn max_clique_bound(&self) -> usize {
        if self.order.is_empty() {
            0
        } else {
            self.degeneracy + 1
        }
    }
}
