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

use super::partition::{PartitionedSearchState, Regions};

/// Chooses the pivot of a search level and the vertices to branch on.
///
/// Holds a scratch bitset sized to the graph; it is cleared after every
/// selection so one selector serves the whole run.
#[derive(Debug)]
pub struct PivotSelector {
    marked: FixedBitSet,
}

impl PivotSelector {
    pub fn new(node_count: usize) -> Self {
        PivotSelector {
            marked: FixedBitSet::with_capacity(node_count),
        }
    }

    /// Pick the candidate with the most neighbors among the candidates and
    /// fill `branch` with every candidate that is not one of its neighbors,
    /// followed by the pivot itself.
    ///
    /// Ties go to the candidate nearest the start of the region. Must be
    /// called on a freshly opened level, while the caches are exact. Returns
    /// `None`, leaving `branch` empty, when there are no candidates.
    pub fn select(
        &mut self,
        state: &PartitionedSearchState,
        regions: Regions,
        branch: &mut Vec<u32>,
    ) -> Option<u32> {
        branch.clear();
        let candidates = state.vertices(regions.candidate());
        let mut pivot = *candidates.first()?;
        let mut best = state.neighbors_in_candidate(pivot).len();
        for &vertex in &candidates[1..] {
            let count = state.neighbors_in_candidate(vertex).len();
            if count > best {
                pivot = vertex;
                best = count;
            }
        }

        let pivot_neighbors = state.neighbors_in_candidate(pivot);
        for &neighbor in pivot_neighbors {
            self.marked.insert(neighbor as usize);
        }
        branch.extend(
            candidates
                .iter()
                .copied()
                .filter(|&v| v != pivot && !self.marked.contains(v as usize)),
        );
        branch.push(pivot);
        for &neighbor in pivot_neighbors {
            self.marked.set(neighbor as usize, false);
        }
        Some(pivot)
    }
}
