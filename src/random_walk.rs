//! Monte-Carlo PageRank: visit frequencies of one long random-surfer walk.

use rand::distributions::{Distribution as _, WeightedIndex};
use rand::Rng;

use crate::config::{validate_damping, validate_sample_count, RankConfig};
use crate::distribution::{Distribution, RankResult};
use crate::graph::{LinkGraph, NodeId};
use crate::transition::transition_masses;
use crate::{Error, Result};

/// Randomness needed by the sampler.
///
/// Every [`rand::Rng`] is a `RandomSource`; tests pass a seeded `StdRng`.
pub trait RandomSource {
    /// Uniform draw from `0..n`. `n` must be > 0.
    fn choose_uniform(&mut self, n: usize) -> usize;

    /// Index drawn with probability proportional to `weights[i]`.
    ///
    /// Weights must be finite, non-negative, and sum to a positive value.
    fn choose_weighted(&mut self, weights: &[f64]) -> Result<usize>;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn choose_uniform(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }

    fn choose_weighted(&mut self, weights: &[f64]) -> Result<usize> {
        let dist = WeightedIndex::new(weights)
            .map_err(|e| Error::InvalidParameter(format!("transition weights: {e}")))?;
        Ok(dist.sample(self))
    }
}

/// Estimate PageRank by walking `num_samples` steps of the surfer chain.
///
/// The first node is uniform; each later node is drawn from the
/// [`transition`](crate::transition::transition) distribution of the current one. Every visited
/// node, the first included, adds one count; the result is counts divided by `num_samples`.
pub fn sample<N, R>(
    graph: &LinkGraph<N>,
    damping: f64,
    num_samples: usize,
    rng: &mut R,
) -> Result<RankResult<N>>
where
    N: NodeId,
    R: RandomSource + ?Sized,
{
    validate_damping(damping)?;
    validate_sample_count(num_samples)?;

    let n = graph.node_count();
    let mut visits = vec![0usize; n];
    let mut weights = vec![0.0; n];

    let mut current = rng.choose_uniform(n);
    visits[current] += 1;
    for _ in 1..num_samples {
        transition_masses(graph, current, damping, &mut weights);
        current = rng.choose_weighted(&weights)?;
        visits[current] += 1;
    }

    let total = num_samples as f64;
    let freqs: Vec<f64> = visits.iter().map(|&c| c as f64 / total).collect();
    tracing::debug!(
        nodes = n,
        samples = num_samples,
        visited = visits.iter().filter(|&&c| c > 0).count(),
        "random walk sampling finished"
    );
    Ok(Distribution::from_indexed(graph, &freqs))
}

/// [`sample`] with damping and walk length taken from `config`.
pub fn sample_with_config<N, R>(
    graph: &LinkGraph<N>,
    config: &RankConfig,
    rng: &mut R,
) -> Result<RankResult<N>>
where
    N: NodeId,
    R: RandomSource + ?Sized,
{
    config.validate()?;
    sample(graph, config.damping_factor, config.sample_count, rng)
}
