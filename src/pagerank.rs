//! PageRank by power iteration.

use crate::config::{validate_damping, RankConfig};
use crate::distribution::{Distribution, RankResult};
use crate::graph::{GraphRef, LinkGraph, NodeId};
use crate::{Error, Result};

/// Solver output with convergence reporting.
///
/// `iterations` is the number of update steps performed.
/// `max_diff` is the final \(L_\infty\) residual (largest per-node change).
/// When `converged` is false, `ranks` is the last iterate before the safety cap stopped the run.
#[derive(Debug, Clone)]
pub struct IterationRun<N: Ord> {
    pub ranks: RankResult<N>,
    pub iterations: usize,
    pub max_diff: f64,
    pub converged: bool,
}

/// Power-iteration PageRank with the default threshold (0.001) and safety cap.
pub fn iterate<N: NodeId>(graph: &LinkGraph<N>, damping: f64) -> Result<RankResult<N>> {
    validate_damping(damping)?;
    iterate_with_config(graph, &RankConfig::default().with_damping_factor(damping))
}

/// Power-iteration PageRank; an exhausted iteration cap is an error.
///
/// Use [`iterate_run`] to get the best ranks found when the cap is hit.
pub fn iterate_with_config<N: NodeId>(
    graph: &LinkGraph<N>,
    config: &RankConfig,
) -> Result<RankResult<N>> {
    let run = iterate_run(graph, config)?;
    if !run.converged {
        return Err(Error::NotConverged {
            iterations: run.iterations,
            max_diff: run.max_diff,
        });
    }
    Ok(run.ranks)
}

/// Power-iteration PageRank with convergence reporting.
///
/// Starting from the uniform distribution, every node `p` is updated to
///
/// \[
///   PR'(p) = \frac{1-d}{n} + d \Big( \sum_{q \to p} \frac{PR(q)}{|out(q)|}
///            + \sum_{s \text{ sink}} \frac{PR(s)}{n} \Big)
/// \]
///
/// until no node moves by `config.convergence_threshold` or more.
pub fn iterate_run<N: NodeId>(
    graph: &LinkGraph<N>,
    config: &RankConfig,
) -> Result<IterationRun<N>> {
    config.validate()?;
    let run = power_iteration(graph, config);
    Ok(IterationRun {
        ranks: Distribution::from_indexed(graph, &run.scores),
        iterations: run.iterations,
        max_diff: run.max_diff,
        converged: run.converged,
    })
}

struct ScoresRun {
    scores: Vec<f64>,
    iterations: usize,
    max_diff: f64,
    converged: bool,
}

fn power_iteration<G: GraphRef + ?Sized>(graph: &G, config: &RankConfig) -> ScoresRun {
    let n = graph.node_count();
    let n_f64 = n as f64;
    let damping = config.damping_factor;
    let mut scores = vec![1.0 / n_f64; n];
    let mut new_scores = vec![0.0; n];
    let out_degrees: Vec<usize> = (0..n).map(|i| graph.out_degree(i)).collect();
    let teleport = (1.0 - damping) / n_f64;

    let mut iters = 0usize;
    let mut last_diff = f64::INFINITY;
    let mut converged = false;
    for _ in 0..config.max_iterations {
        iters += 1;
        let sink_sum: f64 = out_degrees
            .iter()
            .enumerate()
            .filter(|(_, &deg)| deg == 0)
            .map(|(i, _)| scores[i])
            .sum();
        new_scores.fill(teleport + damping * sink_sum / n_f64);

        for u in 0..n {
            let deg = out_degrees[u];
            if deg > 0 {
                let share = damping * scores[u] / deg as f64;
                for &v in graph.neighbors_ref(u) {
                    new_scores[v] += share;
                }
            }
        }

        let diff = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(old, new)| (old - new).abs())
            .fold(0.0, f64::max);
        last_diff = diff;
        std::mem::swap(&mut scores, &mut new_scores);

        let total: f64 = scores.iter().sum();
        debug_assert!((total - 1.0).abs() < 1e-9, "rank mass drifted: {total}");
        tracing::trace!(iteration = iters, max_diff = diff, total, "power iteration step");

        if diff < config.convergence_threshold {
            converged = true;
            break;
        }
    }

    if converged {
        tracing::debug!(
            nodes = n,
            iterations = iters,
            max_diff = last_diff,
            "power iteration converged"
        );
    } else {
        tracing::warn!(
            nodes = n,
            iterations = iters,
            max_diff = last_diff,
            threshold = config.convergence_threshold,
            "power iteration hit max_iterations without converging"
        );
    }
    ScoresRun {
        scores,
        iterations: iters,
        max_diff: last_diff,
        converged,
    }
}
