//! Rigid-body optimisation of multi-body assemblies against experimental scattering curves.
//!
//! One optimisation step follows a fixed pipeline: a body-selection strategy picks what to
//! move, a parameter strategy proposes how far, a transform strategy applies the move (and
//! remembers how to undo it), the hydration layer is regenerated, the histogram manager
//! delivers the new intensity and the fitter the new goodness of fit. Distance constraints
//! add a quartic penalty to the objective, so geometry violations disfavour acceptance
//! without hard-blocking moves. The default controller is pure hill descent: a step is
//! committed only if it improves on the best configuration seen so far.

#![allow(clippy::needless_return)]

mod options;
mod constraint;
mod constraint_manager;
mod selection;
mod parameters;
mod transform;
mod constrained_fitter;
mod best_conf;
mod trajectory;
mod rigid_body;

pub use options::{BodySelectorChoice, ConstraintGenerationChoice, ParameterStrategyChoice,
                  RigidBodyOptions, TransformStrategyChoice};
pub use constraint::{ConstraintError, DistanceConstraint};
pub use constraint_manager::ConstraintManager;
pub use selection::{BodySelectStrategy, RandomBodySelect, RandomConstraintSelect, SequentialBodySelect};
pub use parameters::{ParameterGenerationStrategy, SimpleParameterGeneration, TransformParameter};
pub use transform::{RigidTransform, SingleTransform, TransformStrategy};
pub use constrained_fitter::ConstrainedFitter;
pub use best_conf::BestConf;
pub use trajectory::XYZWriter;
pub use rigid_body::RigidBody;
