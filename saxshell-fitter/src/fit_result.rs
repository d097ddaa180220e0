use std::fmt::{Display, Formatter};
use std::io::Write;
use log::info;
use saxshell_io::out_writer;

/// Controls of the nonlinear fitting stage.
#[derive(Clone, Debug)]
pub struct FitOptions {
    /// bound on the number of objective evaluations of the outer minimisation
    pub max_iterations: usize,
    /// print one line per objective evaluation
    pub verbose: bool,
}

impl Default for FitOptions {
    fn default() -> FitOptions {
        FitOptions { max_iterations: 100, verbose: false }
    }
}

/// One fitted parameter with its asymmetric errors.
#[derive(Clone, Debug)]
pub struct FittedParameter {
    pub name: String,
    pub value: f64,
    pub minus: f64,
    pub plus: f64,
}

impl FittedParameter {
    pub fn new(name: &str, value: f64, error: f64) -> FittedParameter {
        FittedParameter { name: name.to_string(), value, minus: error, plus: error }
    }
}

/// The outcome of one fit.
///
/// A non-zero `status` means the minimiser did not converge within its evaluation budget;
/// the result is still usable, but an optimisation loop should treat it as worse than any
/// committed configuration.
#[derive(Clone, Debug)]
pub struct FitResult {
    pub parameters: Vec<FittedParameter>,
    pub chi2: f64,
    pub degrees_of_freedom: usize,
    pub evaluations: usize,
    pub status: u32,
}

impl FitResult {
    /// Looks up a fitted parameter by name
    pub fn parameter(&self, name: &str) -> Option<&FittedParameter> {
        return self.parameters.iter().find(|p| p.name == name);
    }

    /// The chi-square per degree of freedom
    pub fn reduced_chi2(&self) -> f64 {
        if self.degrees_of_freedom == 0 { return f64::NAN; }
        return self.chi2 / self.degrees_of_freedom as f64;
    }

    /// Writes the textual report to a file (or stream) and echoes it to the log
    pub fn write_report(&self, out_fname: &str) -> std::io::Result<()> {
        let mut writer = out_writer(out_fname, false);
        write!(writer, "{}", self)?;
        info!("fit report written to {}", out_fname);
        return Ok(());
    }
}

impl Display for FitResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "+------------------------------ fit report ------------------------------+")?;
        for p in &self.parameters {
            writeln!(f, "| {:<8} {:>14.6e}   -{:<12.4e} +{:<12.4e}              |",
                     p.name, p.value, p.minus, p.plus)?;
        }
        writeln!(f, "| chi2: {:<14.6e}  dof: {:<6}  chi2/dof: {:<10.4}             |",
                 self.chi2, self.degrees_of_freedom, self.reduced_chi2())?;
        writeln!(f, "| evaluations: {:<6}  status: {:<3}                                      |",
                 self.evaluations, self.status)?;
        writeln!(f, "+-------------------------------------------------------------------------+")?;
        return Ok(());
    }
}
