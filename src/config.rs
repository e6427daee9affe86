use crate::kernel::StandardKernel;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Self-test configuration.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Random walk parameters.
    pub walk: WalkConfig,
    /// Binning and kernel parameters.
    pub analysis: AnalysisConfig,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Number of samples of the walk.
    pub n_steps: usize,
    /// Possible displacements of a single step.
    pub step_vals: Vec<f64>,
    /// Probability of each displacement.
    pub prob_steps: Vec<f64>,
    /// Seed of the random number generator (drawn from the OS if absent).
    pub seed: Option<u64>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Bin edges of the time lag.
    pub bins: Vec<f64>,
    /// Kernel averaged in each bin.
    #[serde(default)]
    pub kernel: StandardKernel,
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // The pair grid holds n_steps^2 entries.
        check_num(self.walk.n_steps, 1..=5_000).context("invalid number of steps")?;

        let n_step_vals = self.walk.step_vals.len();
        check_num(n_step_vals, 1..100).context("invalid number of step values")?;
        if self.walk.step_vals.iter().any(|val| !val.is_finite()) {
            bail!("step values must be finite");
        }
        check_vec(&self.walk.prob_steps, n_step_vals, true)
            .context("invalid step probabilities")?;

        check_num(self.analysis.bins.len(), 2..).context("invalid number of bin edges")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

fn check_vec(vec: &[f64], exp_len: usize, prob_vec: bool) -> Result<()> {
    // Ensure vector has expected length.
    let len = vec.len();
    if len != exp_len {
        bail!("vector length must be {exp_len}, but is {len}");
    }
    if !prob_vec {
        return Ok(());
    }
    // For probability vectors: non-negative elements and sums to ~1.0.
    if vec.iter().any(|&ele| ele < 0.0) {
        bail!("vector must have only non-negative elements");
    }
    let sum: f64 = vec.iter().sum();
    let tol = 1e-8;
    if (sum - 1.0).abs() > tol {
        bail!("vector must sum to 1.0 (tolerance: {tol}), but sums to {sum}");
    }
    Ok(())
}
