use saxshell_fitter::{FitResult, FittedParameter, SmartFitter};
use saxshell_scatter::{Body, CompositeHistogram};
use crate::constraint_manager::ConstraintManager;

/// Wraps a fitter and adds the distance-constraint penalty to its objective.
///
/// The penalty enters the reported chi-square, so an optimisation loop comparing
/// configurations automatically disfavours geometry violations.
pub struct ConstrainedFitter {
    inner: SmartFitter,
    constraints: ConstraintManager,
}

impl ConstrainedFitter {
    pub fn new(inner: SmartFitter, constraints: ConstraintManager) -> ConstrainedFitter {
        ConstrainedFitter { inner, constraints }
    }

    /// The constraint set this fitter penalises against
    pub fn constraints(&self) -> &ConstraintManager { &self.constraints }

    /// Replaces the model histogram, e.g. after the assembly moved
    pub fn set_model(&mut self, model: Box<dyn CompositeHistogram>) {
        self.inner.set_model(model);
    }

    /// The penalised goodness of fit of the current configuration
    pub fn fit_chi2_only(&mut self, bodies: &[Body]) -> f64 {
        return self.inner.fit_chi2_only() + self.constraints.evaluate(bodies);
    }

    /// The full fit; the constraint penalty is added to the chi-square and reported
    /// as its own pseudo-parameter.
    pub fn fit(&mut self, bodies: &[Body]) -> FitResult {
        let mut result = self.inner.fit();
        let penalty = self.constraints.evaluate(bodies);
        result.chi2 += penalty;
        result.parameters.push(FittedParameter::new("penalty", penalty, 0.0));
        return result;
    }
}
