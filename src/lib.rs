//! `linkrank`: PageRank over small hyperlink graphs.
//!
//! Two independent estimators of the same stationary distribution:
//! - [`sample`]: a Monte-Carlo random walk driven by the [`transition`] model.
//! - [`iterate`]: a power-iteration fixed-point solver.
//!
//! Public invariants (must not drift):
//! - **Closed graph**: a [`LinkGraph`] has no self-links and no links to undeclared nodes;
//!   both are pruned at construction time.
//! - **Explicit mass**: every [`Distribution`] has one entry per graph node, zeros included,
//!   and its values sum to 1 within floating-point tolerance.
//! - **Determinism**: the solver is deterministic given identical inputs + configs; the
//!   sampler is deterministic given identical inputs + an identically seeded [`RandomSource`].
//!
//! Swappable (allowed to change without breaking the contract):
//! - the random source behind the sampler
//! - serial vs parallel comparison runs (`parallel` feature)
//! - internal data structures (so long as invariants hold)

pub mod compare;
pub mod config;
pub mod distribution;
pub mod graph;
pub mod pagerank;
pub mod random_walk;
pub mod transition;

pub use compare::{compare, Comparison};
pub use config::RankConfig;
pub use distribution::{Distribution, RankResult};
pub use graph::{GraphRef, LinkGraph, NodeId};
pub use pagerank::{iterate, iterate_run, iterate_with_config, IterationRun};
pub use random_walk::{sample, sample_with_config, RandomSource};
pub use transition::transition;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph has no nodes")]
    EmptyGraph,
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("node not in graph: {0}")]
    UnknownNode(String),
    #[error("did not converge after {iterations} iterations (max diff {max_diff})")]
    NotConverged { iterations: usize, max_diff: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
