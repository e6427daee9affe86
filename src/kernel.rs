//! Kernels mapped onto pairs of values of the stochastic variable.
//!
//! A kernel receives two equal-length batches, the values at the earlier
//! time points and the values at the later ones, and returns one output per
//! pair.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Batched two-argument function of (earlier, later) values.
///
/// Implemented for the [`StandardKernel`]s, for closures of the form
/// `Fn(&[f64], &[f64]) -> Vec<f64>`, and for scalar closures wrapped with
/// [`elementwise`].
pub trait Kernel {
    fn apply(&self, y_1: &[f64], y_2: &[f64]) -> Vec<f64>;
}

/// Kernels shipped with the crate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardKernel {
    /// Displacement `y_2 - y_1`.
    Identity,
    /// Squared displacement `(y_2 - y_1)^2`, used for the MSD.
    #[default]
    Square,
    /// Product `y_2 * y_1`, used for the autocorrelator.
    Autocorrelator,
}

impl StandardKernel {
    pub fn eval(self, y_1: f64, y_2: f64) -> f64 {
        match self {
            StandardKernel::Identity => y_2 - y_1,
            StandardKernel::Square => (y_2 - y_1).powi(2),
            StandardKernel::Autocorrelator => y_2 * y_1,
        }
    }
}

impl Kernel for StandardKernel {
    fn apply(&self, y_1: &[f64], y_2: &[f64]) -> Vec<f64> {
        y_1.iter()
            .zip(y_2)
            .map(|(&val_1, &val_2)| self.eval(val_1, val_2))
            .collect()
    }
}

impl fmt::Display for StandardKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StandardKernel::Identity => "identity",
            StandardKernel::Square => "square",
            StandardKernel::Autocorrelator => "autocorrelator",
        };
        f.write_str(name)
    }
}

impl FromStr for StandardKernel {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "identity" => Ok(StandardKernel::Identity),
            "square" => Ok(StandardKernel::Square),
            "autocorrelator" => Ok(StandardKernel::Autocorrelator),
            _ => bail!("unknown kernel {name:?} (expected identity, square or autocorrelator)"),
        }
    }
}

impl<F> Kernel for F
where
    F: Fn(&[f64], &[f64]) -> Vec<f64>,
{
    fn apply(&self, y_1: &[f64], y_2: &[f64]) -> Vec<f64> {
        self(y_1, y_2)
    }
}

/// Scalar function lifted to a batched [`Kernel`].
pub struct Elementwise<F>(F);

/// Lift `func(y_1, y_2)` to a kernel applied pair by pair.
pub fn elementwise<F>(func: F) -> Elementwise<F>
where
    F: Fn(f64, f64) -> f64,
{
    Elementwise(func)
}

impl<F> Kernel for Elementwise<F>
where
    F: Fn(f64, f64) -> f64,
{
    fn apply(&self, y_1: &[f64], y_2: &[f64]) -> Vec<f64> {
        y_1.iter()
            .zip(y_2)
            .map(|(&val_1, &val_2)| (self.0)(val_1, val_2))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_kernels() {
        let y_1 = [1.0, 2.0, -3.0];
        let y_2 = [4.0, 2.0, 1.0];
        assert_eq!(StandardKernel::Identity.apply(&y_1, &y_2), vec![3.0, 0.0, 4.0]);
        assert_eq!(StandardKernel::Square.apply(&y_1, &y_2), vec![9.0, 0.0, 16.0]);
        assert_eq!(
            StandardKernel::Autocorrelator.apply(&y_1, &y_2),
            vec![4.0, 4.0, -3.0]
        );
    }

    #[test]
    fn default_is_square() {
        assert_eq!(StandardKernel::default(), StandardKernel::Square);
    }

    #[test]
    fn names_round_trip() {
        for kernel in [
            StandardKernel::Identity,
            StandardKernel::Square,
            StandardKernel::Autocorrelator,
        ] {
            let name = kernel.to_string();
            assert_eq!(name.parse::<StandardKernel>().unwrap(), kernel);
        }
        assert!("cube".parse::<StandardKernel>().is_err());
    }

    #[test]
    fn closures_are_kernels() {
        let sum = |y_1: &[f64], y_2: &[f64]| -> Vec<f64> {
            y_1.iter().zip(y_2).map(|(a, b)| a + b).collect()
        };
        assert_eq!(sum.apply(&[1.0, 2.0], &[3.0, 4.0]), vec![4.0, 6.0]);

        let max = elementwise(f64::max);
        assert_eq!(max.apply(&[1.0, 5.0], &[3.0, 4.0]), vec![3.0, 5.0]);
    }
}
