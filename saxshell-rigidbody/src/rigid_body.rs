use log::{debug, info};
use saxshell_fitter::{FitResult, SaxsData, SmartFitter};
use saxshell_scatter::Molecule;
use crate::best_conf::BestConf;
use crate::constrained_fitter::ConstrainedFitter;
use crate::constraint::ConstraintError;
use crate::constraint_manager::ConstraintManager;
use crate::options::{BodySelectorChoice, RigidBodyOptions, TransformStrategyChoice};
use crate::parameters::{ParameterGenerationStrategy, SimpleParameterGeneration};
use crate::selection::{BodySelectStrategy, RandomBodySelect, RandomConstraintSelect, SequentialBodySelect};
use crate::transform::{RigidTransform, SingleTransform, TransformStrategy};
use crate::trajectory::XYZWriter;

/// Drives the rigid-body optimisation of a multi-body assembly.
///
/// One iteration: the body selector yields a target, the parameter generator a step, the
/// transform strategy applies it; the hydration layer is regenerated, the histogram
/// manager delivers the new model intensity and the constrained fitter the new objective.
/// An improvement is committed, anything else undone. Termination is a fixed iteration
/// count; the best configuration found remains in the molecule.
pub struct RigidBody {
    molecule: Molecule,
    selector: Box<dyn BodySelectStrategy>,
    transform: Box<dyn TransformStrategy>,
    parameters: Box<dyn ParameterGenerationStrategy>,
    constraints: ConstraintManager,
    options: RigidBodyOptions,
}

impl RigidBody {
    /// Prepares the optimisation: builds the configured strategies and generates the
    /// initial constraint set.
    pub fn new(molecule: Molecule, options: RigidBodyOptions) -> Result<RigidBody, ConstraintError> {
        let constraints = ConstraintManager::generate(
            molecule.bodies(), options.constraint_generation_strategy, options.bond_distance)?;

        let selector: Box<dyn BodySelectStrategy> = match options.body_selector {
            BodySelectorChoice::RandomBody => Box::new(RandomBodySelect::new()),
            BodySelectorChoice::RandomConstraint => Box::new(RandomConstraintSelect::new()),
            BodySelectorChoice::Sequential => Box::new(SequentialBodySelect::new()),
        };
        let transform: Box<dyn TransformStrategy> = match options.transform_strategy {
            TransformStrategyChoice::Single => Box::new(SingleTransform::new()),
            TransformStrategyChoice::Rigid => Box::new(RigidTransform::new()),
        };
        let parameters = Box::new(SimpleParameterGeneration::from_choice(
            options.parameter_strategy, options.iterations, options.max_translation, options.max_rotation));

        return Ok(RigidBody { molecule, selector, transform, parameters, constraints, options });
    }

    /// Replaces the body-selection strategy
    pub fn set_body_selector(&mut self, selector: Box<dyn BodySelectStrategy>) {
        self.selector = selector;
    }

    /// Replaces the transform strategy
    pub fn set_transform_strategy(&mut self, transform: Box<dyn TransformStrategy>) {
        self.transform = transform;
    }

    /// Replaces the parameter-generation strategy
    pub fn set_parameter_strategy(&mut self, parameters: Box<dyn ParameterGenerationStrategy>) {
        self.parameters = parameters;
    }

    /// The assembly being optimised
    pub fn molecule(&self) -> &Molecule { &self.molecule }

    /// The constraints of the assembly
    pub fn constraints(&self) -> &ConstraintManager { &self.constraints }

    /// Runs the optimisation against a measurement and returns the final fit.
    ///
    /// The trajectory of accepted configurations is appended to
    /// `<output>/trajectory.xyz`; the fit report goes to `<output>/fit.txt` and the log.
    pub fn optimize(&mut self, data: SaxsData) -> Result<FitResult, std::io::Error> {
        let output = self.molecule.options().general.output.clone();
        let verbose = self.molecule.options().general.verbose;
        std::fs::create_dir_all(&output)?;

        self.molecule.generate_hydration();
        let fitter = SmartFitter::new(data, self.molecule.histogram_all());
        let mut fitter = ConstrainedFitter::new(fitter, self.constraints.clone());

        let initial_chi2 = fitter.fit_chi2_only(self.molecule.bodies());
        let mut best = BestConf::new(self.molecule.waters().to_vec(), initial_chi2);
        info!("starting rigid body optimization; initial chi2: {:.4}", best.chi2);

        let mut trajectory = XYZWriter::new(&format!("{}/trajectory.xyz", output));
        trajectory.write_frame(self.molecule.bodies())?;

        for iteration in 0..self.options.iterations {
            if self.optimize_step(&mut fitter, &mut best) {
                trajectory.write_frame(self.molecule.bodies())?;
                info!("iteration {}: accepted, new best chi2: {:.4}", iteration, best.chi2);
            } else if verbose {
                debug!("iteration {}: rejected (best chi2 {:.4})", iteration, best.chi2);
            }
        }

        fitter.set_model(self.molecule.histogram_all());
        let fit = fitter.fit(self.molecule.bodies());
        fit.write_report(&format!("{}/fit.txt", output))?;
        info!("optimization finished; final chi2: {:.4} over {} degrees of freedom",
              fit.chi2, fit.degrees_of_freedom);
        return Ok(fit);
    }

    /// One proposal-evaluate-accept/reject step; says whether the proposal was committed.
    fn optimize_step(&mut self, fitter: &mut ConstrainedFitter, best: &mut BestConf) -> bool {
        let (ibody, iconstraint) = self.selector.next(self.molecule.body_count(), &self.constraints);
        let parameter = self.parameters.next();
        self.transform.apply(self.molecule.bodies_mut(), &self.constraints, parameter, ibody, iconstraint);
        self.molecule.generate_hydration();

        fitter.set_model(self.molecule.histogram_all());
        let new_chi2 = fitter.fit_chi2_only(self.molecule.bodies());

        if new_chi2 >= best.chi2 {
            // the previous configuration was better; take everything back
            self.transform.undo(self.molecule.bodies_mut());
            self.molecule.set_waters(best.waters.clone());
            return false;
        }
        best.waters = self.molecule.waters().to_vec();
        best.chi2 = new_chi2;
        return true;
    }
}
