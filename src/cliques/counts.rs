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

use indexmap::IndexMap;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{try_reserve, CliqueCountError};

/// Rows of Pascal's triangle that fit in `u128`: C(127, 63) < 2^127.
const SMALL_ROWS: usize = 128;

/// Exact binomial coefficients `C(n, i)`.
///
/// Rows below [`SMALL_ROWS`] are tabulated as `u128`; larger ones are
/// produced term by term with the multiplicative recurrence in `BigUint`.
#[derive(Debug, Clone)]
pub(crate) struct Binomials {
    rows: Vec<Vec<u128>>,
}

impl Binomials {
    pub(crate) fn new() -> Self {
        let mut rows: Vec<Vec<u128>> = Vec::with_capacity(SMALL_ROWS);
        rows.push(vec![1]);
        for n in 1..SMALL_ROWS {
            let prev = &rows[n - 1];
            let mut row = Vec::with_capacity(n + 1);
            row.push(1);
            for i in 1..n {
                row.push(prev[i - 1] + prev[i]);
            }
            row.push(1);
            rows.push(row);
        }
        Binomials { rows }
    }

    #[inline]
    pub(crate) fn small_row(&self, n: usize) -> Option<&[u128]> {
        self.rows.get(n).map(Vec::as_slice)
    }

    /// `C(n, i)` for any `i <= n`.
    pub(crate) fn get(&self, n: usize, i: usize) -> BigUint {
        debug_assert!(i <= n);
        if let Some(row) = self.small_row(n) {
            return BigUint::from(row[i]);
        }
        let i = i.min(n - i);
        let mut value = BigUint::one();
        for j in 0..i {
            value *= (n - j) as u64;
            value /= (j + 1) as u64;
        }
        value
    }
}

/// Exact number of cliques of each size `0..=max_k`.
///
/// `count[0]` is 1 (the empty clique). Sizes above the largest clique of the
/// graph are zero. Produced once per run and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliqueCounts {
    counts: Vec<BigUint>,
}

impl CliqueCounts {
    /// All-zero counts for sizes `0..=max_k`.
    pub(crate) fn zeroed(max_k: usize) -> Result<Self, CliqueCountError> {
        let mut counts = Vec::new();
        try_reserve(&mut counts, max_k + 1, "clique counts")?;
        counts.resize(max_k + 1, BigUint::zero());
        Ok(CliqueCounts { counts })
    }

    /// Close a search leaf: the committed set holds `rsize` vertices, `drop`
    /// of which were pivots. Each subset of the pivots may be left out, so
    /// `C(drop, i)` cliques of size `rsize - i` are added for every `i` that
    /// keeps the size within range.
    pub(crate) fn tally(&mut self, binomials: &Binomials, rsize: usize, drop: usize) {
        let max_k = self.max_k();
        let smallest = rsize - drop;
        if smallest > max_k {
            return;
        }
        let largest = rsize.min(max_k);
        if let Some(row) = binomials.small_row(drop) {
            for k in smallest..=largest {
                self.counts[k] += row[rsize - k];
            }
            return;
        }
        // Walk i = drop, drop-1, ... using C(d, i-1) = C(d, i) * i / (d - i + 1).
        let mut term = BigUint::one();
        for k in smallest..=largest {
            let i = rsize - k;
            if k > smallest {
                term *= (i + 1) as u64;
                term /= (drop - i) as u64;
            }
            self.counts[k] += &term;
        }
    }

    pub(crate) fn finish(mut self) -> Self {
        self.counts[0] = BigUint::one();
        self
    }

    /// Largest size tracked by this run.
    #[inline]
    pub fn max_k(&self) -> usize {
        self.counts.len() - 1
    }

    /// Number of cliques with exactly `k` vertices; zero beyond `max_k`.
    pub fn get(&self, k: usize) -> BigUint {
        self.counts.get(k).cloned().unwrap_or_default()
    }

    /// Borrow the count for `k`, if `k <= max_k`.
    #[inline]
    pub fn count(&self, k: usize) -> Option<&BigUint> {
        self.counts.get(k)
    }

    /// Size of the largest clique found, 0 for a graph without vertices.
    pub fn largest_clique_size(&self) -> usize {
        self.counts
            .iter()
            .rposition(|c| !c.is_zero())
            .unwrap_or(0)
    }

    /// Total number of nonempty cliques counted.
    pub fn total(&self) -> BigUint {
        self.counts.iter().skip(1).sum()
    }

    /// Nonzero `(k, count)` pairs for `k >= 1`, in ascending `k`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BigUint)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, c)| !c.is_zero())
    }

    /// Counts as decimal strings keyed by clique size, omitting zeros.
    pub fn to_decimal_map(&self) -> IndexMap<usize, String> {
        self.iter().map(|(k, c)| (k, c.to_str_radix(10))).collect()
    }

    /// JSON object mapping each clique size to its decimal count.
    pub fn to_json(&self) -> String {
        // Keys are integers and values strings; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl Serialize for CliqueCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nonzero = self.iter().count();
        let mut map = serializer.serialize_map(Some(nonzero))?;
        for (k, c) in self.iter() {
            map.serialize_entry(&k, &c.to_str_radix(10))?;
        }
        map.end()
    }
}
