//! Ensemble-averaged statistics of time-displacement-invariant quantities.
//!
//! Given a single trajectory `y(x)`, [`compute_stochastic_mean`] averages a
//! [`Kernel`] of `(y(x_j), y(x_i))` over all pairs of samples, binned by the
//! time lag `x_i - x_j`. With the default [`StandardKernel::Square`] this is
//! the mean square displacement.
//!
//! ```
//! use stochmean::{StandardKernel, compute_stochastic_mean};
//!
//! let x = [0.0, 1.0, 2.0, 3.0];
//! let y = [0.0, 1.0, 0.0, 1.0];
//! let res = compute_stochastic_mean(&x, &y, &[0.0, 1.0, 2.0], &StandardKernel::Square).unwrap();
//! assert_eq!(res.bins, vec![0.0, 1.0]);
//! assert_eq!(res.means, vec![0.0, 1.0]);
//! ```

pub mod config;
pub mod error;
pub mod estimator;
pub mod kernel;
pub mod stats;
pub mod walk;

pub use error::{StochMeanError, StochMeanResult};
pub use estimator::{PairGrid, StochasticMean, compute_msd, compute_stochastic_mean};
pub use kernel::{Elementwise, Kernel, StandardKernel, elementwise};
