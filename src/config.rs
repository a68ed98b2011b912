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

use serde::{Deserialize, Serialize};

use crate::error::CliqueCountError;

/// How adjacency-list input is checked for symmetry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symmetry {
    /// Reject input where `v` lists `u` but `u` does not list `v`.
    #[default]
    Require,
    /// Treat every listed relation `u -> v` as the undirected edge `{u, v}`.
    Symmetrize,
}

/// Options for a clique count run.
///
/// ```
/// use rustworkx_pivoter::CountConfig;
///
/// let config = CountConfig::from_json_str(r#"{"max_clique_size": 4}"#).unwrap();
/// assert_eq!(config.max_clique_size, Some(4));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CountConfig {
    /// Largest clique size to count. `None` counts every size up to
    /// degeneracy + 1.
    pub max_clique_size: Option<usize>,
    /// Symmetry handling for adjacency-list input.
    pub symmetry: Symmetry,
}

impl CountConfig {
    /// Parse a configuration from a JSON object. Missing keys take their
    /// default values; unknown keys are rejected.
    pub fn from_json_str(text: &str) -> Result<Self, CliqueCountError> {
        serde_json::from_str(text).map_err(|e| CliqueCountError::InvalidConfig(e.to_string()))
    }

    /// Effective upper clique size for a graph whose degeneracy bound is
    /// `bound`.
    #[inline]
    pub(crate) fn clamp_max_k(&self, bound: usize) -> usize {
        match self.max_clique_size {
            Some(cap) => cap.min(bound),
            None => bound,
        }
    }
}
