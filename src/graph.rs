//! Immutable link graph.
//!
//! Nodes are stored in ascending identifier order as dense indices `0..n`. Estimators work in
//! index space through [`GraphRef`] and translate back to identifiers only when they return.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use crate::{Error, Result};

/// Identifier of a ranked node (e.g. a page name).
pub trait NodeId: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> NodeId for T {}

/// Borrowed adjacency view in index space.
pub trait GraphRef {
    fn node_count(&self) -> usize;

    /// Out-neighbors of `node`. Must be in `0..node_count()`.
    fn neighbors_ref(&self, node: usize) -> &[usize];

    fn out_degree(&self, node: usize) -> usize {
        self.neighbors_ref(node).len()
    }
}

#[derive(Debug, Clone)]
pub struct LinkGraph<N> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    out_links: Vec<Vec<usize>>,
}

impl<N: NodeId> LinkGraph<N> {
    /// Build a closed graph from `(node, raw link targets)` pairs.
    ///
    /// Self-links and links to nodes that are not declared in `pages` are dropped. A node
    /// declared more than once gets the union of its link sets. Nodes whose links are all
    /// pruned stay in the graph as sinks.
    pub fn from_links<I, L>(pages: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, L)>,
        L: IntoIterator<Item = N>,
    {
        let mut raw: BTreeMap<N, BTreeSet<N>> = BTreeMap::new();
        for (node, links) in pages {
            raw.entry(node).or_default().extend(links);
        }
        if raw.is_empty() {
            return Err(Error::EmptyGraph);
        }

        let nodes: Vec<N> = raw.keys().cloned().collect();
        let index: HashMap<N, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();

        let mut pruned = 0usize;
        let mut out_links = Vec::with_capacity(nodes.len());
        for (i, links) in raw.values().enumerate() {
            // BTreeSet iteration keeps each list sorted and de-duplicated.
            let kept: Vec<usize> = links
                .iter()
                .filter_map(|target| index.get(target).copied())
                .filter(|&j| j != i)
                .collect();
            pruned += links.len() - kept.len();
            out_links.push(kept);
        }

        let graph = Self {
            nodes,
            index,
            out_links,
        };
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            pruned,
            "built link graph"
        );
        Ok(graph)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes in ascending order; position equals index.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&N> {
        self.nodes.get(index)
    }

    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.index.get(node).copied()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Out-links of `node`, or `None` if the node is not in the graph.
    pub fn out_links(&self, node: &N) -> Option<impl Iterator<Item = &N> + '_> {
        let i = self.index_of(node)?;
        Some(self.out_links[i].iter().map(move |&j| &self.nodes[j]))
    }

    pub fn is_sink(&self, index: usize) -> bool {
        self.out_links
            .get(index)
            .map_or(false, |links| links.is_empty())
    }

    pub fn sinks(&self) -> impl Iterator<Item = &N> + '_ {
        self.out_links
            .iter()
            .zip(&self.nodes)
            .filter(|(links, _)| links.is_empty())
            .map(|(_, n)| n)
    }

    pub fn edge_count(&self) -> usize {
        self.out_links.iter().map(Vec::len).sum()
    }

    pub(crate) fn require_index(&self, node: &N) -> Result<usize> {
        self.index_of(node)
            .ok_or_else(|| Error::UnknownNode(format!("{node:?}")))
    }
}

impl<N> GraphRef for LinkGraph<N> {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn neighbors_ref(&self, node: usize) -> &[usize] {
        &self.out_links[node]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prunes_self_and_external_links() {
        let g = LinkGraph::from_links([
            ("1.html", vec!["1.html", "2.html", "https://elsewhere.org"]),
            ("2.html", vec!["1.html"]),
        ])
        .unwrap();
        let links: Vec<_> = g.out_links(&"1.html").unwrap().collect();
        assert_eq!(links, vec![&"2.html"]);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn fully_pruned_node_remains_as_sink() {
        let g = LinkGraph::from_links([("a", vec!["a", "zzz"]), ("b", vec!["a"])]).unwrap();
        assert_eq!(g.node_count(), 2);
        assert!(g.is_sink(g.index_of(&"a").unwrap()));
        assert_eq!(g.sinks().collect::<Vec<_>>(), vec![&"a"]);
    }

    #[test]
    fn empty_input_is_rejected() {
        let pages: Vec<(String, Vec<String>)> = Vec::new();
        assert!(matches!(LinkGraph::from_links(pages), Err(Error::EmptyGraph)));
    }

    #[test]
    fn duplicate_declarations_are_merged() {
        let g = LinkGraph::from_links([
            ("a", vec!["b"]),
            ("b", vec![]),
            ("c", vec![]),
            ("a", vec!["c", "b"]),
        ])
        .unwrap();
        assert_eq!(g.node_count(), 3);
        let links: Vec<_> = g.out_links(&"a").unwrap().collect();
        assert_eq!(links, vec![&"b", &"c"]);
    }

    #[test]
    fn node_order_is_canonical() {
        let a = LinkGraph::from_links([("z", vec!["y"]), ("y", vec![]), ("x", vec!["z"])]).unwrap();
        let b = LinkGraph::from_links([("x", vec!["z"]), ("z", vec!["y"]), ("y", vec![])]).unwrap();
        assert_eq!(a.nodes(), &["x", "y", "z"]);
        assert_eq!(a.nodes(), b.nodes());
        for i in 0..a.node_count() {
            assert_eq!(a.neighbors_ref(i), b.neighbors_ref(i));
        }
    }

    #[test]
    fn unknown_node_lookup() {
        let g = LinkGraph::from_links([("a", vec![])]).unwrap();
        assert!(g.out_links(&"b").is_none());
        let err = g.require_index(&"b").unwrap_err();
        assert!(format!("{err}").contains("\"b\""));
    }
}
