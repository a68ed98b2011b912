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

use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;

/// Error returned when a graph cannot be counted.
///
/// Every variant is a precondition or resource failure detected before (or
/// instead of) producing counts. There is no partial-result mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliqueCountError {
    /// A vertex lists itself as a neighbor.
    SelfLoop { vertex: usize },
    /// A neighbor id is not in `0..node_count`.
    VertexOutOfRange { vertex: usize, node_count: usize },
    /// The same unordered pair was supplied more than once.
    DuplicateEdge { source: usize, target: usize },
    /// `target` is listed as a neighbor of `source` but not the reverse.
    AsymmetricAdjacency { source: usize, target: usize },
    /// The derived earlier/later lists of `vertex` disagree with its adjacency.
    InconsistentOrdering { vertex: usize },
    /// The graph has more vertices than the internal `u32` ids can address.
    TooManyVertices { node_count: usize },
    /// An allocation needed for the search could not be satisfied.
    ResourceExhausted { what: &'static str, elements: usize },
    /// A configuration document could not be parsed.
    InvalidConfig(String),
}

impl fmt::Display for CliqueCountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliqueCountError::SelfLoop { vertex } => {
                write!(f, "vertex {vertex} has a self-loop")
            }
            CliqueCountError::VertexOutOfRange { vertex, node_count } => write!(
                f,
                "vertex id {vertex} is out of range for a graph with {node_count} vertices"
            ),
            CliqueCountError::DuplicateEdge { source, target } => {
                write!(f, "edge ({source}, {target}) appears more than once")
            }
            CliqueCountError::AsymmetricAdjacency { source, target } => write!(
                f,
                "{target} is a neighbor of {source} but {source} is not a neighbor of {target}"
            ),
            CliqueCountError::InconsistentOrdering { vertex } => write!(
                f,
                "degeneracy ordering disagrees with the adjacency of vertex {vertex}"
            ),
            CliqueCountError::TooManyVertices { node_count } => write!(
                f,
                "graph has {node_count} vertices, more than the supported {}",
                u32::MAX
            ),
            CliqueCountError::ResourceExhausted { what, elements } => {
                write!(f, "unable to allocate {elements} elements for {what}")
            }
            CliqueCountError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl Error for CliqueCountError {}

/// Reserve `additional` slots in `buf`, reporting failure as a resource error.
pub(crate) fn try_reserve<T>(
    buf: &mut Vec<T>,
    additional: usize,
    what: &'static str,
) -> Result<(), CliqueCountError> {
    buf.try_reserve_exact(additional)
        .map_err(|_: TryReserveError| CliqueCountError::ResourceExhausted {
            what,
            elements: additional,
        })
}

/// Allocate a vector of `len` copies of `value` without aborting on OOM.
pub(crate) fn try_filled<T: Clone>(
    len: usize,
    value: T,
    what: &'static str,
) -> Result<Vec<T>, CliqueCountError> {
    let mut buf = Vec::new();
    try_reserve(&mut buf, len, what)?;
    buf.resize(len, value);
    Ok(buf)
}
