//! Fits computed scattering intensities against experimental SAXS measurements.
//!
//! The model curve is linear in an overall scale `a` and a constant background `b`;
//! the hydration weighting `c_w` (and, for form-factor-resolved histograms, the
//! excluded-volume weighting `c_x`) enter nonlinearly and are minimised by an outer
//! bracketing search. The reduced problem for fixed nonlinear parameters is solved in
//! closed form by [`SimpleLeastSquares`](SimpleLeastSquares), so every outer evaluation
//! costs one Debye transform and one 2x2 solve.

#![allow(clippy::needless_return)]

mod dataset;
mod least_squares;
mod fit_result;
mod smart_fitter;

pub use dataset::{DatasetError, SaxsData};
pub use least_squares::{LinearFit, SimpleLeastSquares};
pub use fit_result::{FitOptions, FitResult, FittedParameter};
pub use smart_fitter::SmartFitter;
