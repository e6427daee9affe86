//! Windowed stochastic-mean estimator.
//!
//! Averages a [`Kernel`] over every ordered pair of samples of a trajectory,
//! grouped by the time difference of the pair. All pairs are used, not only
//! consecutive ones, so each bin is a true time and ensemble average.

use crate::error::{StochMeanError, StochMeanResult};
use crate::kernel::{Kernel, StandardKernel};
use crate::stats::Accumulator;
use serde::{Deserialize, Serialize};

const PROBE_LEN: usize = 10;

/// Bin-wise mean of a kernel over all pairs of a trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StochasticMean {
    /// Left edges of the bins (the last input edge is dropped).
    pub bins: Vec<f64>,
    /// Mean of the finite kernel outputs of each bin, `0.0` if there are none.
    pub means: Vec<f64>,
    /// Sample standard deviation of those outputs, `NaN` below two values.
    pub std_devs: Vec<f64>,
    /// Number of finite kernel outputs averaged in each bin.
    pub n_vals: Vec<usize>,
}

impl StochasticMean {
    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }
}

/// All ordered pairs `(i, j)` of a trajectory, stored row-major.
///
/// Pair `(i, j)` has time difference `x[i] - x[j]`, earlier value `y[j]`
/// and later value `y[i]`.
pub struct PairGrid {
    delta: Vec<f64>,
    y_1: Vec<f64>,
    y_2: Vec<f64>,
}

impl PairGrid {
    pub fn new(x: &[f64], y: &[f64]) -> Self {
        let n_pairs = x.len() * x.len();
        let mut delta = Vec::with_capacity(n_pairs);
        let mut y_1 = Vec::with_capacity(n_pairs);
        let mut y_2 = Vec::with_capacity(n_pairs);

        for (&x_i, &y_i) in x.iter().zip(y) {
            for (&x_j, &y_j) in x.iter().zip(y) {
                delta.push(x_i - x_j);
                y_1.push(y_j);
                y_2.push(y_i);
            }
        }

        Self { delta, y_1, y_2 }
    }

    pub fn n_pairs(&self) -> usize {
        self.delta.len()
    }

    /// Earlier and later values of the pairs with `low <= delta < high`.
    pub fn select(&self, low: f64, high: f64) -> (Vec<f64>, Vec<f64>) {
        let mut sel_y_1 = Vec::new();
        let mut sel_y_2 = Vec::new();
        for (i_pair, &delta) in self.delta.iter().enumerate() {
            if delta >= low && delta < high {
                sel_y_1.push(self.y_1[i_pair]);
                sel_y_2.push(self.y_2[i_pair]);
            }
        }
        (sel_y_1, sel_y_2)
    }
}

/// Compute the windowed average of `kernel` over the trajectory `(x, y)`.
///
/// For each bin `[bins[b], bins[b + 1])` the kernel is applied to every pair
/// of samples whose time difference falls in the bin, non-finite outputs are
/// discarded, and the rest are averaged. Bins with nothing left to average
/// stay at `0.0`.
///
/// # Errors
/// Returns [`StochMeanError::InvalidInput`] if `x` or `bins` is not sorted
/// ascending or if `x` and `y` differ in length, and
/// [`StochMeanError::InvalidKernel`] if the kernel does not return one output
/// per input pair.
pub fn compute_stochastic_mean<K>(
    x: &[f64],
    y: &[f64],
    bins: &[f64],
    kernel: &K,
) -> StochMeanResult<StochasticMean>
where
    K: Kernel + ?Sized,
{
    validate(x, y, bins, kernel)?;

    let grid = PairGrid::new(x, y);
    log::debug!("built pair grid with {} pairs", grid.n_pairs());

    let n_bins = bins.len().saturating_sub(1);
    let mut result = StochasticMean {
        bins: bins[..n_bins].to_vec(),
        means: vec![0.0; n_bins],
        std_devs: vec![f64::NAN; n_bins],
        n_vals: vec![0; n_bins],
    };

    for i_bin in 0..n_bins {
        let (sel_y_1, sel_y_2) = grid.select(bins[i_bin], bins[i_bin + 1]);
        if sel_y_1.is_empty() {
            log::trace!("bin {i_bin} has no pairs");
            continue;
        }

        let vals = kernel.apply(&sel_y_1, &sel_y_2);
        check_kernel_output(vals.len(), sel_y_1.len())?;

        let mut acc = Accumulator::new();
        for val in vals {
            if val.is_finite() {
                acc.add(val);
            }
        }

        let report = acc.report();
        log::trace!(
            "bin {i_bin}: {} pairs, {} finite values",
            sel_y_1.len(),
            report.n_vals
        );
        result.means[i_bin] = report.mean;
        result.std_devs[i_bin] = report.std_dev;
        result.n_vals[i_bin] = report.n_vals;
    }

    Ok(result)
}

/// Mean square displacement, i.e. [`compute_stochastic_mean`] with
/// [`StandardKernel::Square`].
pub fn compute_msd(x: &[f64], y: &[f64], bins: &[f64]) -> StochMeanResult<StochasticMean> {
    compute_stochastic_mean(x, y, bins, &StandardKernel::Square)
}

fn validate<K>(x: &[f64], y: &[f64], bins: &[f64], kernel: &K) -> StochMeanResult<()>
where
    K: Kernel + ?Sized,
{
    if !is_sorted(x) {
        return Err(StochMeanError::InvalidInput(
            "time-like variable x must be sorted ascending".to_string(),
        ));
    }
    if x.len() != y.len() {
        return Err(StochMeanError::InvalidInput(format!(
            "x and y must have the same length, but have {} and {}",
            x.len(),
            y.len()
        )));
    }
    if !is_sorted(bins) {
        return Err(StochMeanError::InvalidInput(
            "bins must be sorted ascending".to_string(),
        ));
    }

    let probe = [1.0; PROBE_LEN];
    check_kernel_output(kernel.apply(&probe, &probe).len(), PROBE_LEN)
}

fn check_kernel_output(n_out: usize, n_pairs: usize) -> StochMeanResult<()> {
    if n_out != n_pairs {
        return Err(StochMeanError::InvalidKernel(format!(
            "kernel must take two batches of values and return one value per pair, \
             but returned {n_out} values for {n_pairs} pairs"
        )));
    }
    Ok(())
}

// NaN compares false, so it is reported as unsorted.
fn is_sorted(vals: &[f64]) -> bool {
    vals.windows(2).all(|w| w[0] <= w[1])
}
