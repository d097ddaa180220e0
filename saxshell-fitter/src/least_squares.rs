use nalgebra::{Matrix2, Vector2};
use crate::dataset::SaxsData;

/// The closed-form result of a weighted linear fit `y = a x + b`.
#[derive(Clone, Copy, Debug)]
pub struct LinearFit {
    pub a: f64,
    pub b: f64,
    pub a_err: f64,
    pub b_err: f64,
    pub chi2: f64,
}

/// Weighted linear least squares in two parameters.
///
/// Solves `min_a,b sum_i ((y_i - a x_i - b) / sigma_i)^2` through the normal equations;
/// the parameter errors come from the diagonal of the inverted normal matrix.
///
/// # Examples
/// ```
/// use saxshell_fitter::{SaxsData, SimpleLeastSquares};
/// let data = SaxsData::new(vec![0.0, 1.0, 2.0], vec![1.0, 3.0, 5.0], vec![0.1, 0.1, 0.1]);
/// let fit = SimpleLeastSquares::new(&data, &[0.0, 1.0, 2.0]).fit();
/// assert!((fit.a - 2.0).abs() < 1e-9);
/// assert!((fit.b - 1.0).abs() < 1e-9);
/// assert!(fit.chi2 < 1e-12);
/// ```
pub struct SimpleLeastSquares<'a> {
    data: &'a SaxsData,
    model: &'a [f64],
}

impl<'a> SimpleLeastSquares<'a> {
    /// Pairs a measurement with model values evaluated on the same q points
    pub fn new(data: &'a SaxsData, model: &'a [f64]) -> SimpleLeastSquares<'a> {
        assert_eq!(data.len(), model.len(), "model and measurement sizes disagree");
        SimpleLeastSquares { data, model }
    }

    /// The fitted `(a, b)` without errors or the goodness of fit
    pub fn fit_params_only(&self) -> (f64, f64) {
        let (normal, rhs) = self.normal_equations();
        let solution = normal.try_inverse().map(|inv| inv * rhs).unwrap_or(Vector2::new(0.0, 0.0));
        return (solution[0], solution[1]);
    }

    /// The full fit with parameter errors and the chi-square value
    pub fn fit(&self) -> LinearFit {
        let (normal, rhs) = self.normal_equations();
        let covariance = normal.try_inverse().unwrap_or(Matrix2::zeros());
        let solution = covariance * rhs;
        let (a, b) = (solution[0], solution[1]);
        return LinearFit {
            a,
            b,
            a_err: covariance[(0, 0)].max(0.0).sqrt(),
            b_err: covariance[(1, 1)].max(0.0).sqrt(),
            chi2: self.chi2(a, b),
        };
    }

    /// The chi-square of given parameters against the measurement
    pub fn chi2(&self, a: f64, b: f64) -> f64 {
        let mut chi = 0.0;
        for i in 0..self.data.len() {
            let v = (self.data.y()[i] - (a * self.model[i] + b)) / self.data.yerr()[i];
            chi += v * v;
        }
        return chi;
    }

    fn normal_equations(&self) -> (Matrix2<f64>, Vector2<f64>) {
        let (mut s, mut sx, mut sy, mut sxx, mut sxy) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for i in 0..self.data.len() {
            let w = 1.0 / (self.data.yerr()[i] * self.data.yerr()[i]);
            let x = self.model[i];
            let y = self.data.y()[i];
            s += w;
            sx += w * x;
            sy += w * y;
            sxx += w * x * x;
            sxy += w * x * y;
        }
        return (Matrix2::new(sxx, sx, sx, s), Vector2::new(sxy, sy));
    }
}
