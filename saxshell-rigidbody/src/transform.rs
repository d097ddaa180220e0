use saxshell_pdb::calc::{Rototranslation, Vec3};
use saxshell_scatter::Body;
use crate::constraint_manager::ConstraintManager;
use crate::parameters::TransformParameter;

/// Applies a proposed perturbation to the assembly and knows how to take it back.
///
/// `apply` records everything needed for an exact-inverse `undo`; an optimisation loop
/// calls `undo` at most once per `apply`, on rejection.
pub trait TransformStrategy: Send {
    fn apply(&mut self, bodies: &mut [Body], constraints: &ConstraintManager,
             parameter: TransformParameter, ibody: usize, iconstraint: Option<usize>);

    fn undo(&mut self, bodies: &mut [Body]);
}

/// one remembered move, for the undo
struct AppliedMove {
    ibody: usize,
    transform: Rototranslation,
}

/// Rotates and translates the selected body about its own centre of mass.
pub struct SingleTransform {
    last: Option<AppliedMove>,
}

impl SingleTransform {
    pub fn new() -> SingleTransform {
        SingleTransform { last: None }
    }
}

impl TransformStrategy for SingleTransform {
    fn apply(&mut self, bodies: &mut [Body], _constraints: &ConstraintManager,
             parameter: TransformParameter, ibody: usize, _iconstraint: Option<usize>) {
        let origin = bodies[ibody].center_of_mass();
        let transform = Rototranslation::from_euler_angles(&origin, &parameter.rotation, &parameter.translation);
        bodies[ibody].transform(&transform);
        self.last = Some(AppliedMove { ibody, transform });
    }

    fn undo(&mut self, bodies: &mut [Body]) {
        if let Some(applied) = self.last.take() {
            bodies[applied.ibody].transform_inverse(&applied.transform);
        }
    }
}

/// Pivots the constrained body about the constraint anchor, so the constrained distance
/// is approximately preserved while the relative orientation changes.
///
/// Without a constraint the strategy falls back to a centre-of-mass move.
pub struct RigidTransform {
    last: Option<AppliedMove>,
}

impl RigidTransform {
    pub fn new() -> RigidTransform {
        RigidTransform { last: None }
    }
}

impl TransformStrategy for RigidTransform {
    fn apply(&mut self, bodies: &mut [Body], constraints: &ConstraintManager,
             parameter: TransformParameter, ibody: usize, iconstraint: Option<usize>) {
        let (pivot, target): (Vec3, usize) = match iconstraint {
            Some(index) => {
                let constraint = constraints.constraint(index);
                // rotate the second body about the anchor atom of the first
                let anchor = bodies[constraint.ibody1].atom(constraint.iatom1).pos.clone();
                (anchor, constraint.ibody2)
            }
            None => (bodies[ibody].center_of_mass(), ibody),
        };
        let transform = Rototranslation::from_euler_angles(&pivot, &parameter.rotation, &parameter.translation);
        bodies[target].transform(&transform);
        self.last = Some(AppliedMove { ibody: target, transform });
    }

    fn undo(&mut self, bodies: &mut [Body]) {
        if let Some(applied) = self.last.take() {
            bodies[applied.ibody].transform_inverse(&applied.transform);
        }
    }
}
