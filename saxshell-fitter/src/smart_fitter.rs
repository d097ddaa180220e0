use log::debug;
use saxshell_scatter::CompositeHistogram;
use crate::dataset::SaxsData;
use crate::fit_result::{FitOptions, FitResult, FittedParameter};
use crate::least_squares::SimpleLeastSquares;

/// golden ratio step of the section search
const PHI: f64 = 0.618_033_988_749_894_8;
/// bracket width below which the outer minimisation is considered converged
const TOLERANCE: f64 = 1e-5;

#[derive(Clone, Copy, PartialEq)]
enum Param {
    Water,
    ExcludedVolume,
}

/// Fits a model histogram to a measurement.
///
/// The scale `a` and background `b` are linear and solved in closed form for every
/// trial of the nonlinear parameters; the hydration weighting `c` is minimised by a
/// bracketing scan refined with a golden-section search, and for models carrying an
/// excluded-volume channel the weighting `c_x` joins through coordinate descent.
///
/// A fit that exhausts its evaluation budget is still returned, flagged with a non-zero
/// status; callers decide what to make of it.
pub struct SmartFitter {
    data: SaxsData,
    model: Box<dyn CompositeHistogram>,
    options: FitOptions,
}

impl SmartFitter {
    pub fn new(data: SaxsData, model: Box<dyn CompositeHistogram>) -> SmartFitter {
        SmartFitter { data, model, options: FitOptions::default() }
    }

    pub fn with_options(data: SaxsData, model: Box<dyn CompositeHistogram>, options: FitOptions) -> SmartFitter {
        SmartFitter { data, model, options }
    }

    /// Replaces the model histogram, e.g. after the assembly moved
    pub fn set_model(&mut self, model: Box<dyn CompositeHistogram>) {
        self.model = model;
    }

    /// The measurement this fitter compares against
    pub fn data(&self) -> &SaxsData { &self.data }

    fn objective(&mut self, which: Param, x: f64, other: f64, evaluations: &mut usize) -> f64 {
        let (cw, cx) = match which {
            Param::Water => (x, other),
            Param::ExcludedVolume => (other, x),
        };
        self.model.apply_water_scaling_factor(cw);
        if self.model.has_excluded_volume() {
            self.model.apply_excluded_volume_scaling_factor(cx);
        }
        let curve = self.model.debye_transform();
        let spliced = self.data.splice(&curve.q, &curve.i);
        let lsq = SimpleLeastSquares::new(&self.data, &spliced);
        let (a, b) = lsq.fit_params_only();
        *evaluations += 1;
        let chi2 = lsq.chi2(a, b);
        if self.options.verbose {
            debug!("objective: cw = {:.5}, cx = {:.5}, chi2 = {:.6e}", cw, cx, chi2);
        }
        return chi2;
    }

    /// Scan-then-golden-section minimisation of one nonlinear parameter.
    fn minimize(&mut self, which: Param, other: f64, lo: f64, hi: f64, evaluations: &mut usize) -> (f64, bool) {
        let budget = self.options.max_iterations;
        let n_scan = 16;
        let mut best = (lo, f64::INFINITY);
        for i in 0..=n_scan {
            let x = lo + (hi - lo) * i as f64 / n_scan as f64;
            let chi2 = self.objective(which, x, other, evaluations);
            if chi2 < best.1 { best = (x, chi2); }
        }

        let step = (hi - lo) / n_scan as f64;
        let mut a = (best.0 - step).max(lo);
        let mut b = (best.0 + step).min(hi);
        let mut c1 = b - PHI * (b - a);
        let mut c2 = a + PHI * (b - a);
        let mut f1 = self.objective(which, c1, other, evaluations);
        let mut f2 = self.objective(which, c2, other, evaluations);
        let mut converged = false;
        let mut refinements = 0;
        while refinements < budget {
            if b - a < TOLERANCE {
                converged = true;
                break;
            }
            if f1 < f2 {
                b = c2;
                c2 = c1;
                f2 = f1;
                c1 = b - PHI * (b - a);
                f1 = self.objective(which, c1, other, evaluations);
            } else {
                a = c1;
                c1 = c2;
                f1 = f2;
                c2 = a + PHI * (b - a);
                f2 = self.objective(which, c2, other, evaluations);
            }
            refinements += 1;
        }
        return (0.5 * (a + b), converged);
    }

    /// Symmetric parameter error from the curvature of the objective at its minimum
    fn curvature_error(&mut self, which: Param, x: f64, other: f64, evaluations: &mut usize) -> f64 {
        let h = 1e-3;
        let f0 = self.objective(which, x, other, evaluations);
        let fp = self.objective(which, x + h, other, evaluations);
        let fm = self.objective(which, (x - h).max(0.0), other, evaluations);
        let curvature = (fp - 2.0 * f0 + fm) / (h * h);
        if curvature <= 0.0 { return 0.0; }
        return (2.0 / curvature).sqrt();
    }

    fn minimize_all(&mut self, evaluations: &mut usize) -> (f64, f64, bool) {
        let has_exv = self.model.has_excluded_volume();
        let mut cw = 1.0;
        let mut cx = 1.0;
        let mut converged = true;
        if has_exv {
            for _ in 0..2 {
                let (w, ok_w) = self.minimize(Param::Water, cx, 0.0, 10.0, evaluations);
                cw = w;
                let (x, ok_x) = self.minimize(Param::ExcludedVolume, cw, 0.5, 1.5, evaluations);
                cx = x;
                converged = ok_w && ok_x;
            }
        } else {
            let (w, ok) = self.minimize(Param::Water, 1.0, 0.0, 10.0, evaluations);
            cw = w;
            converged = ok;
        }
        return (cw, cx, converged);
    }

    /// The full fit: parameters with errors, chi-square, degrees of freedom and the
    /// evaluation count.
    pub fn fit(&mut self) -> FitResult {
        let mut evaluations = 0;
        let (cw, cx, converged) = self.minimize_all(&mut evaluations);
        let has_exv = self.model.has_excluded_volume();

        self.model.apply_water_scaling_factor(cw);
        if has_exv { self.model.apply_excluded_volume_scaling_factor(cx); }
        let curve = self.model.debye_transform();
        let spliced = self.data.splice(&curve.q, &curve.i);
        let linear = SimpleLeastSquares::new(&self.data, &spliced).fit();

        let cw_err = self.curvature_error(Param::Water, cw, cx, &mut evaluations);
        let mut parameters = vec![
            FittedParameter::new("a", linear.a, linear.a_err),
            FittedParameter::new("b", linear.b, linear.b_err),
            FittedParameter::new("c", cw, cw_err),
        ];
        let mut n_params = 3;
        if has_exv {
            let cx_err = self.curvature_error(Param::ExcludedVolume, cx, cw, &mut evaluations);
            parameters.push(FittedParameter::new("cx", cx, cx_err));
            n_params += 1;
        }

        return FitResult {
            parameters,
            chi2: linear.chi2,
            degrees_of_freedom: self.data.len().saturating_sub(n_params),
            evaluations,
            status: if converged { 0 } else { 1 },
        };
    }

    /// Only the minimised chi-square; the cheap entry point for optimisation loops
    pub fn fit_chi2_only(&mut self) -> f64 {
        let mut evaluations = 0;
        let (cw, cx, _) = self.minimize_all(&mut evaluations);
        return self.objective(Param::Water, cw, cx, &mut evaluations);
    }
}
