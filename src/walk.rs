use crate::config::WalkConfig;
use anyhow::{Context, Result};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rand_distr::weighted::WeightedIndex;

/// Discrete random walk.
///
/// Sample `i` is taken at time `i`; the position is the cumulative sum of
/// steps drawn from the configured step distribution.
pub struct RandomWalk {
    pub times: Vec<f64>,
    pub positions: Vec<f64>,
}

impl RandomWalk {
    /// Generate a walk with a fresh generator, seeded from `cfg.seed` if set.
    pub fn generate(cfg: &WalkConfig) -> Result<Self> {
        let mut rng = match cfg.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::try_from_os_rng().context("failed to seed rng from os")?,
        };
        Self::generate_with(cfg, &mut rng)
    }

    pub fn generate_with<R: Rng + ?Sized>(cfg: &WalkConfig, rng: &mut R) -> Result<Self> {
        let step_dist =
            WeightedIndex::new(&cfg.prob_steps).context("failed to build step distribution")?;

        let times = (0..cfg.n_steps).map(|i_step| i_step as f64).collect();

        let mut positions = Vec::with_capacity(cfg.n_steps);
        let mut pos = 0.0;
        for _ in 0..cfg.n_steps {
            pos += cfg.step_vals[step_dist.sample(rng)];
            positions.push(pos);
        }

        Ok(Self { times, positions })
    }

    /// Variance of a single step, the MSD slope of an uncorrelated walk.
    pub fn step_variance(cfg: &WalkConfig) -> f64 {
        let steps = || cfg.step_vals.iter().zip(&cfg.prob_steps);
        let mean: f64 = steps().map(|(val, prob)| val * prob).sum();
        steps().map(|(val, prob)| prob * (val - mean).powi(2)).sum()
    }
}
