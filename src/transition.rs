//! Single-step transition model of the random surfer.

use crate::config::validate_damping;
use crate::distribution::Distribution;
use crate::graph::{GraphRef, LinkGraph, NodeId};
use crate::Result;

/// Distribution over the next node, given the surfer is at `node`.
///
/// From a node with out-links, every node gets the teleport share `(1 - damping) / n` and each
/// out-link additionally gets `damping / out_degree`. From a sink, the next node is uniform
/// over the whole graph.
pub fn transition<N: NodeId>(
    graph: &LinkGraph<N>,
    node: &N,
    damping: f64,
) -> Result<Distribution<N>> {
    validate_damping(damping)?;
    let from = graph.require_index(node)?;
    let mut masses = vec![0.0; graph.node_count()];
    transition_masses(graph, from, damping, &mut masses);
    Ok(Distribution::from_indexed(graph, &masses))
}

/// Index-space kernel behind [`transition`]. Overwrites all of `out`.
///
/// `out.len()` must equal `graph.node_count()` and `from` must be a valid index.
pub(crate) fn transition_masses<G: GraphRef + ?Sized>(
    graph: &G,
    from: usize,
    damping: f64,
    out: &mut [f64],
) {
    let n_f64 = graph.node_count() as f64;
    let links = graph.neighbors_ref(from);
    if links.is_empty() {
        out.fill(1.0 / n_f64);
        return;
    }
    out.fill((1.0 - damping) / n_f64);
    let share = damping / links.len() as f64;
    for &v in links {
        out[v] += share;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use proptest::prelude::*;

    #[test]
    fn follows_links_with_damping() {
        let g = LinkGraph::from_links([
            ("1.html", vec!["2.html", "3.html"]),
            ("2.html", vec!["3.html"]),
            ("3.html", vec!["2.html"]),
        ])
        .unwrap();
        let d = transition(&g, &"1.html", 0.85).unwrap();
        assert!((d.get(&"1.html").unwrap() - 0.05).abs() < 1e-12);
        assert!((d.get(&"2.html").unwrap() - 0.475).abs() < 1e-12);
        assert!((d.get(&"3.html").unwrap() - 0.475).abs() < 1e-12);
    }

    #[test]
    fn sink_is_uniform() {
        let g = LinkGraph::from_links([("a", vec![]), ("b", vec!["a"]), ("c", vec!["a"])]).unwrap();
        let d = transition(&g, &"a", 0.85).unwrap();
        for (_, m) in d.iter() {
            assert_eq!(m, 1.0 / 3.0);
        }
    }

    #[test]
    fn unknown_node_is_an_error() {
        let g = LinkGraph::from_links([("a", vec!["b"]), ("b", vec![])]).unwrap();
        let err = transition(&g, &"c", 0.85).unwrap_err();
        assert!(matches!(err, Error::UnknownNode(_)));
    }

    #[test]
    fn rejects_out_of_range_damping() {
        let g = LinkGraph::from_links([("a", vec!["b"]), ("b", vec![])]).unwrap();
        assert!(matches!(
            transition(&g, &"a", 1.0),
            Err(Error::InvalidParameter(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_transition_sums_to_one_with_teleport_floor(
            n in 1usize..12,
            edges in proptest::collection::vec((0usize..12, 0usize..12), 0..60),
            from in 0usize..12,
            damping in 0.01f64..0.99,
        ) {
            let mut links: Vec<Vec<usize>> = vec![Vec::new(); n];
            for (u, v) in edges {
                if u < n && v < n {
                    links[u].push(v);
                }
            }
            let g = LinkGraph::from_links(links.into_iter().enumerate()).unwrap();
            let from = from % n;
            let d = transition(&g, &from, damping).unwrap();

            prop_assert_eq!(d.len(), n);
            prop_assert!((d.total() - 1.0).abs() < 1e-9, "sum={}", d.total());
            let floor = (1.0 - damping) / n as f64;
            for (_, m) in d.iter() {
                prop_assert!(m >= floor - 1e-15, "m={} floor={}", m, floor);
            }
            if g.is_sink(from) {
                for (_, m) in d.iter() {
                    prop_assert_eq!(m, 1.0 / n as f64);
                }
            }
        }
    }
}
