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

// Jain, S.; Seshadhri, C. (2020). "The Power of Pivoting for Exact Clique
// Counting". WSDM '20: 268–276. doi:10.1145/3336191.3371839.

use super::counts::{Binomials, CliqueCounts};
use super::degeneracy::DegeneracyOrder;
use super::partition::{PartitionedSearchState, Regions};
use super::pivot::PivotSelector;
use crate::config::CountConfig;
use crate::error::CliqueCountError;
use crate::graph::AdjacencyGraph;

/// Receives progress notifications from a running count.
pub trait ProgressObserver {
    /// Called after the search rooted at each vertex completes.
    fn on_root_finished(&mut self, finished: usize, total: usize);
}

impl<F: FnMut(usize, usize)> ProgressObserver for F {
    fn on_root_finished(&mut self, finished: usize, total: usize) {
        self(finished, total)
    }
}

/// One open level of the search.
#[derive(Debug)]
struct Frame {
    regions: Regions,
    /// Size of the committed set.
    rsize: usize,
    /// How many committed vertices were pivots.
    drop: usize,
    pivot: u32,
    branch: Vec<u32>,
    next: usize,
}

/// Counts cliques of every size with the pivoting search.
///
/// Each vertex roots one search over its later neighbors in the degeneracy
/// order, so every clique is reached from its earliest member only. Inside a
/// search, a level branches on the pivot and on the candidates the pivot
/// does not dominate. A root-to-leaf path commits some vertices as pivots
/// (`drop` of them); any subset of those can be omitted and the rest is
/// still a clique, so a leaf accounts for `C(drop, i)` cliques of size
/// `rsize - i` without descending further.
///
/// Levels are kept on an explicit stack, so the depth of the search (up to
/// the clique number) does not consume call stack.
///
/// ```
/// use rustworkx_pivoter::{AdjacencyGraph, CliqueCounter, CountConfig};
///
/// let graph = AdjacencyGraph::from_edges(3, vec![(0, 1), (1, 2), (0, 2)]).unwrap();
/// let counts = CliqueCounter::new(&graph, &CountConfig::default())
///     .unwrap()
///     .run()
///     .unwrap();
/// assert_eq!(counts.to_decimal_map()[&3], "1");
/// ```
#[derive(Debug)]
pub struct CliqueCounter {
    ordering: DegeneracyOrder,
    max_k: usize,
}

impl CliqueCounter {
    /// Order the vertices of `graph` and check the ordering against it.
    pub fn new(graph: &AdjacencyGraph, config: &CountConfig) -> Result<Self, CliqueCountError> {
        let ordering = DegeneracyOrder::compute(graph)?;
        ordering.verify(graph)?;
        let max_k = config.clamp_max_k(ordering.max_clique_bound());
        Ok(CliqueCounter { ordering, max_k })
    }

    pub fn degeneracy(&self) -> usize {
        self.ordering.degeneracy()
    }

    /// Largest clique size this run will count.
    pub fn max_k(&self) -> usize {
        self.max_k
    }

    pub fn ordering(&self) -> &DegeneracyOrder {
        &self.ordering
    }

    pub fn run(self) -> Result<CliqueCounts, CliqueCountError> {
        self.run_with_progress(&mut |_: usize, _: usize| {})
    }

    /// Count, reporting to `observer` after every root vertex.
    pub fn run_with_progress<P>(self, observer: &mut P) -> Result<CliqueCounts, CliqueCountError>
    where
        P: ProgressObserver + ?Sized,
    {
        let counts = CliqueCounts::zeroed(self.max_k)?;
        if self.max_k == 0 {
            return Ok(counts.finish());
        }
        let mut search = Search {
            state: PartitionedSearchState::new(&self.ordering)?,
            selector: PivotSelector::new(self.ordering.node_count()),
            binomials: Binomials::new(),
            counts,
            stack: Vec::new(),
            spare: Vec::new(),
            max_k: self.max_k,
        };
        let total = self.ordering.node_count();
        for (finished, &root) in self.ordering.vertices().iter().enumerate() {
            search.count_from_root(&self.ordering, root);
            observer.on_root_finished(finished + 1, total);
        }
        Ok(search.counts.finish())
    }
}

struct Search {
    state: PartitionedSearchState,
    selector: PivotSelector,
    binomials: Binomials,
    counts: CliqueCounts,
    stack: Vec<Frame>,
    /// Branch buffers of closed frames, reused by later ones.
    spare: Vec<Vec<u32>>,
    max_k: usize,
}

impl Search {
    fn count_from_root(&mut self, ordering: &DegeneracyOrder, root: u32) {
        let regions = self.state.seed_for_root(ordering, root);
        if !self.enter(regions, 1, 0) {
            return;
        }

        while let Some(top) = self.stack.last_mut() {
            if let Some(&vertex) = top.branch.get(top.next) {
                top.next += 1;
                let child = self.state.move_to_committed(&mut top.regions, vertex);
                let rsize = top.rsize + 1;
                let drop = top.drop + usize::from(vertex == top.pivot);
                if !self.enter(child, rsize, drop) {
                    self.close_child();
                }
                continue;
            }

            // Every branch tried: hand excluded vertices back to the parent.
            let Some(mut frame) = self.stack.pop() else {
                break;
            };
            self.state
                .return_excluded_to_candidate(&mut frame.regions, &frame.branch);
            self.spare.push(frame.branch);
            if !self.stack.is_empty() {
                self.close_child();
            }
        }
        debug_assert_eq!(self.state.open_levels(), 0);
    }

    /// Open a level for `regions`, or tally it as a leaf. Returns whether a
    /// frame was pushed.
    fn enter(&mut self, regions: Regions, rsize: usize, drop: usize) -> bool {
        if rsize - drop >= self.max_k || !regions.has_candidates() {
            self.counts.tally(&self.binomials, rsize, drop);
            return false;
        }
        let mut branch = self.spare.pop().unwrap_or_default();
        let Some(pivot) = self.selector.select(&self.state, regions, &mut branch) else {
            self.spare.push(branch);
            self.counts.tally(&self.binomials, rsize, drop);
            return false;
        };
        self.stack.push(Frame {
            regions,
            rsize,
            drop,
            pivot,
            branch,
            next: 0,
        });
        true
    }

    /// Undo the commit of the branch vertex the top frame tried last.
    fn close_child(&mut self) {
        if let Some(top) = self.stack.last_mut() {
            let vertex = top.branch[top.next - 1];
            self.state
                .move_committed_to_excluded(&mut top.regions, vertex);
        }
    }
}
