//! Probability mass over graph nodes.

use std::collections::BTreeMap;

use crate::graph::{LinkGraph, NodeId};

/// Mass per node. Every graph node has an entry, zero-mass entries included.
///
/// Iteration is in ascending node order; that order is for presentation only and carries no
/// ranking meaning.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Distribution<N: Ord> {
    masses: BTreeMap<N, f64>,
}

/// Output of either estimator.
pub type RankResult<N> = Distribution<N>;

impl<N: NodeId> Distribution<N> {
    /// Pair index-space masses with the graph's node identifiers.
    pub(crate) fn from_indexed(graph: &LinkGraph<N>, masses: &[f64]) -> Self {
        debug_assert_eq!(graph.node_count(), masses.len());
        Self {
            masses: graph.nodes().iter().cloned().zip(masses.iter().copied()).collect(),
        }
    }

    pub fn get(&self, node: &N) -> Option<f64> {
        self.masses.get(node).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N, f64)> + '_ {
        self.masses.iter().map(|(n, &m)| (n, m))
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Sum of all masses; 1 up to rounding for any estimator output.
    pub fn total(&self) -> f64 {
        self.masses.values().sum()
    }

    /// Largest per-node absolute difference. A node missing from `other` counts as zero mass.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.masses
            .iter()
            .map(|(n, &m)| (m - other.get(n).unwrap_or(0.0)).abs())
            .chain(
                other
                    .masses
                    .iter()
                    .filter(|(n, _)| !self.masses.contains_key(n))
                    .map(|(_, &m)| m.abs()),
            )
            .fold(0.0, f64::max)
    }

    /// The `k` highest-mass nodes, descending. Ties go to the smaller node.
    pub fn top_k(&self, k: usize) -> Vec<(&N, f64)> {
        let mut ranked: Vec<(&N, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(k);
        ranked
    }

    pub fn into_inner(self) -> BTreeMap<N, f64> {
        self.masses
    }
}

impl<'a, N: NodeId> IntoIterator for &'a Distribution<N> {
    type Item = (&'a N, &'a f64);
    type IntoIter = std::collections::btree_map::Iter<'a, N, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.masses.iter()
    }
}
