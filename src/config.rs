//! Ranking configuration shared by both estimators.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RankConfig {
    /// Probability of following an out-link instead of teleporting.
    pub damping_factor: f64,
    /// Length of the sampler's Markov chain.
    pub sample_count: usize,
    /// Solver stops once no node moves by this much or more in one update.
    pub convergence_threshold: f64,
    /// Safety cap on solver updates.
    pub max_iterations: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            sample_count: 10_000,
            convergence_threshold: 0.001,
            max_iterations: 1_000,
        }
    }
}

impl RankConfig {
    pub fn with_damping_factor(mut self, damping_factor: f64) -> Self {
        self.damping_factor = damping_factor;
        self
    }

    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_convergence_threshold(mut self, convergence_threshold: f64) -> Self {
        self.convergence_threshold = convergence_threshold;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_damping(self.damping_factor)?;
        validate_sample_count(self.sample_count)?;
        if !self.convergence_threshold.is_finite() || self.convergence_threshold <= 0.0 {
            return Err(Error::InvalidParameter(
                "convergence_threshold must be finite and > 0".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidParameter(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_damping(damping: f64) -> Result<()> {
    if !damping.is_finite() {
        return Err(Error::InvalidParameter(
            "damping_factor must be finite".to_string(),
        ));
    }
    if damping <= 0.0 || damping >= 1.0 {
        return Err(Error::InvalidParameter(format!(
            "damping_factor must be in (0,1), got {damping}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_sample_count(sample_count: usize) -> Result<()> {
    if sample_count == 0 {
        return Err(Error::InvalidParameter(
            "sample_count must be > 0".to_string(),
        ));
    }
    Ok(())
}
