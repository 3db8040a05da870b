//! Run both estimators over one shared graph.
//!
//! The estimators never touch each other's state; with the `parallel` feature they run
//! concurrently on the rayon pool, otherwise back to back.

use rand::{rngs::StdRng, SeedableRng};

use crate::config::RankConfig;
use crate::distribution::RankResult;
use crate::graph::{LinkGraph, NodeId};
use crate::pagerank::iterate_with_config;
use crate::random_walk::sample_with_config;
use crate::Result;

#[derive(Debug, Clone)]
pub struct Comparison<N: Ord> {
    pub sampled: RankResult<N>,
    pub iterated: RankResult<N>,
    /// Largest per-node gap between the two estimates.
    pub max_abs_diff: f64,
}

/// Sample (seeded with `seed`) and iterate the same graph under one config.
pub fn compare<N>(graph: &LinkGraph<N>, config: &RankConfig, seed: u64) -> Result<Comparison<N>>
where
    N: NodeId + Send + Sync,
{
    config.validate()?;
    let run_sampler = || sample_with_config(graph, config, &mut StdRng::seed_from_u64(seed));
    let run_solver = || iterate_with_config(graph, config);

    #[cfg(feature = "parallel")]
    let (sampled, iterated) = rayon::join(run_sampler, run_solver);
    #[cfg(not(feature = "parallel"))]
    let (sampled, iterated) = (run_sampler(), run_solver());

    let (sampled, iterated) = (sampled?, iterated?);
    let max_abs_diff = sampled.max_abs_diff(&iterated);
    tracing::debug!(
        nodes = graph.node_count(),
        samples = config.sample_count,
        max_abs_diff,
        "compared sampler and solver"
    );
    Ok(Comparison {
        sampled,
        iterated,
        max_abs_diff,
    })
}
