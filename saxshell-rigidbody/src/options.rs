/// Which body (or constraint) to perturb next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodySelectorChoice {
    /// a uniformly random body, moved freely
    RandomBody,
    /// a uniformly random constraint; the transform pivots about it
    RandomConstraint,
    /// bodies in round-robin order
    Sequential,
}

/// How a proposed parameter is applied to the assembly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformStrategyChoice {
    /// rotate and translate the selected body about its own centre
    Single,
    /// rotate the constrained body about the constraint pivot
    Rigid,
}

/// How large a step to propose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterStrategyChoice {
    /// rotations and translations, with amplitudes decaying over the run
    Simple,
    /// rotations only
    RotationsOnly,
    /// translations only
    TranslationsOnly,
}

/// How the initial set of constraints is generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintGenerationChoice {
    /// no constraints; all bodies move freely
    None,
    /// one constraint between each pair of consecutive bodies, at their closest carbons
    Linear,
}

/// Controls of the optimisation loop.
#[derive(Clone, Debug)]
pub struct RigidBodyOptions {
    /// number of proposal-evaluate-accept/reject iterations
    pub iterations: usize,
    pub body_selector: BodySelectorChoice,
    pub transform_strategy: TransformStrategyChoice,
    pub parameter_strategy: ParameterStrategyChoice,
    pub constraint_generation_strategy: ConstraintGenerationChoice,
    /// largest allowed equilibrium distance of a constraint, in A
    pub bond_distance: f64,
    /// largest proposed translation amplitude, in A
    pub max_translation: f64,
    /// largest proposed rotation amplitude, in radians
    pub max_rotation: f64,
}

impl Default for RigidBodyOptions {
    fn default() -> RigidBodyOptions {
        RigidBodyOptions {
            iterations: 100,
            body_selector: BodySelectorChoice::RandomBody,
            transform_strategy: TransformStrategyChoice::Single,
            parameter_strategy: ParameterStrategyChoice::Simple,
            constraint_generation_strategy: ConstraintGenerationChoice::None,
            bond_distance: 4.0,
            max_translation: 5.0,
            max_rotation: std::f64::consts::PI / 3.0,
        }
    }
}
