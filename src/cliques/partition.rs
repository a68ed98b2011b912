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

//! In-place excluded / candidate / committed vertex partition.
//!
//! All vertices live in one permutation buffer. A search level is described
//! by three indices into it:
//!
//! ```text
//!   begin_x      begin_p      begin_r         n
//!      |-- excluded --|-- candidate --|-- committed --|
//! ```
//!
//! Moving a vertex across a boundary is a swap plus a boundary shift, so no
//! level of the search allocates. Each vertex additionally owns a fixed slot
//! (sized to its degree) in a shared pool; the first `cache_len[v]` entries of
//! the slot are its neighbors inside the candidate region the current level
//! started with. Deeper levels reorder a prefix of that prefix and record the
//! lengths they overwrite, so unwinding a level restores its parent's caches
//! exactly.

use std::ops::Range;

use super::degeneracy::DegeneracyOrder;
use crate::error::{try_filled, try_reserve, CliqueCountError};

/// Region boundaries of one search level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    begin_x: usize,
    begin_p: usize,
    begin_r: usize,
}

impl Regions {
    #[inline]
    pub fn excluded(&self) -> Range<usize> {
        self.begin_x..self.begin_p
    }

    #[inline]
    pub fn candidate(&self) -> Range<usize> {
        self.begin_p..self.begin_r
    }

    #[inline]
    pub fn committed_start(&self) -> usize {
        self.begin_r
    }

    #[inline]
    pub fn candidate_len(&self) -> usize {
        self.begin_r - self.begin_p
    }

    #[inline]
    pub fn has_candidates(&self) -> bool {
        self.begin_p < self.begin_r
    }

    /// Whether buffer index `rank` lies in the candidate region.
    #[inline]
    pub fn in_candidate(&self, rank: usize) -> bool {
        self.begin_p <= rank && rank < self.begin_r
    }

    #[inline]
    pub fn in_excluded(&self, rank: usize) -> bool {
        self.begin_x <= rank && rank < self.begin_p
    }
}

/// The shared mutable state of one clique count run.
#[derive(Debug)]
pub struct PartitionedSearchState {
    /// Buffer index -> vertex.
    position: Vec<u32>,
    /// Vertex -> buffer index.
    rank: Vec<u32>,
    cache_offsets: Vec<usize>,
    cache_pool: Vec<u32>,
    cache_len: Vec<u32>,
    /// `(vertex, cache_len)` pairs overwritten by open levels.
    saved_lens: Vec<(u32, u32)>,
    /// Start of each open level's entries in `saved_lens`.
    frames: Vec<usize>,
}

impl PartitionedSearchState {
    /// Allocate the buffers for every vertex of `ordering`.
    pub fn new(ordering: &DegeneracyOrder) -> Result<Self, CliqueCountError> {
        let n = ordering.node_count();
        let mut position = try_filled(n, 0u32, "partition buffer")?;
        let mut rank = try_filled(n, 0u32, "partition buffer")?;
        for v in 0..n {
            position[v] = v as u32;
            rank[v] = v as u32;
        }
        let mut cache_offsets = Vec::new();
        try_reserve(&mut cache_offsets, n + 1, "neighbor caches")?;
        cache_offsets.push(0);
        let mut total = 0;
        for v in 0..n as u32 {
            total += ordering.earlier(v).len() + ordering.later(v).len();
            cache_offsets.push(total);
        }
        Ok(PartitionedSearchState {
            position,
            rank,
            cache_offsets,
            cache_pool: try_filled(total, 0u32, "neighbor caches")?,
            cache_len: try_filled(n, 0u32, "neighbor caches")?,
            saved_lens: Vec::new(),
            frames: Vec::new(),
        })
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.position.len()
    }

    #[inline]
    pub fn rank(&self, vertex: u32) -> usize {
        self.rank[vertex as usize] as usize
    }

    #[inline]
    pub fn vertex_at(&self, index: usize) -> u32 {
        self.position[index]
    }

    /// Vertices occupying `range` of the permutation buffer.
    #[inline]
    pub fn vertices(&self, range: Range<usize>) -> &[u32] {
        &self.position[range]
    }

    /// The cached neighbors of `vertex` for the level that is currently open.
    ///
    /// At level entry this is exactly `N(vertex) ∩ candidate`. Candidates the
    /// level later moves to the excluded region stay in the cache, so callers
    /// past the first branch filter by [`Regions::in_candidate`].
    #[inline]
    pub fn neighbors_in_candidate(&self, vertex: u32) -> &[u32] {
        let start = self.cache_offsets[vertex as usize];
        &self.cache_pool[start..start + self.cache_len[vertex as usize] as usize]
    }

    #[inline]
    fn place(&mut self, vertex: u32, index: usize) {
        let from = self.rank[vertex as usize] as usize;
        let displaced = self.position[index];
        self.position.swap(from, index);
        self.rank[vertex as usize] = index as u32;
        self.rank[displaced as usize] = from as u32;
    }

    #[inline]
    fn push_cache(&mut self, vertex: u32, neighbor: u32) {
        let slot = self.cache_offsets[vertex as usize] + self.cache_len[vertex as usize] as usize;
        self.cache_pool[slot] = neighbor;
        self.cache_len[vertex as usize] += 1;
    }

    /// Start a top-level search at `vertex`: commit it alone, make its later
    /// neighbors the candidates, leave the excluded region empty, and build
    /// fresh caches for the new candidates.
    ///
    /// Committing a root never conflicts with a previous root, since no
    /// top-level region outlives its own search.
    pub fn seed_for_root(&mut self, ordering: &DegeneracyOrder, vertex: u32) -> Regions {
        debug_assert!(self.frames.is_empty());
        let begin_r = self.node_count() - 1;
        self.place(vertex, begin_r);
        let mut begin_p = begin_r;
        for &neighbor in ordering.later(vertex) {
            begin_p -= 1;
            self.place(neighbor, begin_p);
        }
        let regions = Regions {
            begin_x: begin_p,
            begin_p,
            begin_r,
        };

        for index in regions.candidate() {
            let candidate = self.position[index];
            self.cache_len[candidate as usize] = 0;
        }
        for index in regions.candidate() {
            let candidate = self.position[index];
            for &neighbor in ordering.later(candidate) {
                if regions.in_candidate(self.rank(neighbor)) {
                    self.push_cache(candidate, neighbor);
                    self.push_cache(neighbor, candidate);
                }
            }
        }
        regions
    }

    /// Commit candidate `vertex` and open a child level.
    ///
    /// `regions` shrinks by one candidate. The returned child regions hold
    /// `vertex`'s neighbors among the remaining candidates, with an empty
    /// excluded region; their caches are narrowed to the child candidates.
    /// Must be paired with [`move_committed_to_excluded`] for the same vertex
    /// once the child level is finished.
    ///
    /// [`move_committed_to_excluded`]: Self::move_committed_to_excluded
    pub fn move_to_committed(&mut self, regions: &mut Regions, vertex: u32) -> Regions {
        debug_assert!(regions.in_candidate(self.rank(vertex)));
        regions.begin_r -= 1;
        self.place(vertex, regions.begin_r);

        let mut child_end = regions.begin_p;
        let start = self.cache_offsets[vertex as usize];
        for k in start..start + self.cache_len[vertex as usize] as usize {
            let neighbor = self.cache_pool[k];
            if regions.in_candidate(self.rank(neighbor)) {
                self.place(neighbor, child_end);
                child_end += 1;
            }
        }
        let child = Regions {
            begin_x: regions.begin_p,
            begin_p: regions.begin_p,
            begin_r: child_end,
        };

        self.frames.push(self.saved_lens.len());
        for index in child.candidate() {
            let candidate = self.position[index];
            let len = self.cache_len[candidate as usize];
            self.saved_lens.push((candidate, len));

            let start = self.cache_offsets[candidate as usize];
            let mut kept = start;
            for k in start..start + len as usize {
                let neighbor = self.cache_pool[k];
                if child.in_candidate(self.rank(neighbor)) {
                    self.cache_pool.swap(kept, k);
                    kept += 1;
                }
            }
            self.cache_len[candidate as usize] = (kept - start) as u32;
        }
        child
    }

    /// Close the child level opened by committing `vertex` and move `vertex`
    /// to the excluded region, so later siblings neither branch on it nor
    /// see it as a candidate.
    pub fn move_committed_to_excluded(&mut self, regions: &mut Regions, vertex: u32) {
        debug_assert_eq!(self.rank(vertex), regions.begin_r);
        if let Some(start) = self.frames.pop() {
            for &(candidate, len) in &self.saved_lens[start..] {
                self.cache_len[candidate as usize] = len;
            }
            self.saved_lens.truncate(start);
        } else {
            debug_assert!(false, "no open level for {vertex}");
        }
        self.place(vertex, regions.begin_p);
        regions.begin_p += 1;
        regions.begin_r += 1;
    }

    /// Return vertices this level excluded back to the candidate region, in
    /// the order they were excluded, restoring the parent's view.
    pub fn return_excluded_to_candidate(&mut self, regions: &mut Regions, vertices: &[u32]) {
        for &vertex in vertices {
            debug_assert!(regions.in_excluded(self.rank(vertex)));
            regions.begin_p -= 1;
            self.place(vertex, regions.begin_p);
        }
    }

    /// Number of levels opened by [`move_to_committed`] and not yet closed.
    ///
    /// [`move_to_committed`]: Self::move_to_committed
    #[inline]
    pub fn open_levels(&self) -> usize {
        self.frames.len()
    }
}
