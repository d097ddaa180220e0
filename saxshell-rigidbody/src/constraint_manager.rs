use std::collections::HashMap;
use log::info;
use saxshell_pdb::Element;
use saxshell_scatter::Body;
use crate::constraint::{ConstraintError, DistanceConstraint};
use crate::options::ConstraintGenerationChoice;

/// Holds the distance constraints of an assembly and maps them back to the bodies
/// they touch.
#[derive(Clone, Debug, Default)]
pub struct ConstraintManager {
    constraints: Vec<DistanceConstraint>,
    by_body: HashMap<usize, Vec<usize>>,
}

impl ConstraintManager {
    pub fn new() -> ConstraintManager {
        ConstraintManager::default()
    }

    /// Generates the initial constraint set for an assembly.
    pub fn generate(bodies: &[Body], strategy: ConstraintGenerationChoice, bond_distance: f64)
        -> Result<ConstraintManager, ConstraintError>
    {
        let mut manager = ConstraintManager::new();
        match strategy {
            ConstraintGenerationChoice::None => {}
            ConstraintGenerationChoice::Linear => {
                for i in 0..bodies.len().saturating_sub(1) {
                    let constraint = closest_carbon_pair(bodies, i, i + 1, bond_distance)?;
                    manager.add(constraint);
                }
                info!("{} linear constraints generated", manager.count());
            }
        }
        return Ok(manager);
    }

    /// Registers a constraint
    pub fn add(&mut self, constraint: DistanceConstraint) {
        let index = self.constraints.len();
        self.by_body.entry(constraint.ibody1).or_default().push(index);
        self.by_body.entry(constraint.ibody2).or_default().push(index);
        self.constraints.push(constraint);
    }

    pub fn count(&self) -> usize { self.constraints.len() }

    pub fn is_empty(&self) -> bool { self.constraints.is_empty() }

    pub fn constraints(&self) -> &[DistanceConstraint] { &self.constraints }

    pub fn constraint(&self, index: usize) -> &DistanceConstraint { &self.constraints[index] }

    /// Indices of the constraints touching a given body
    pub fn constraints_of_body(&self, ibody: usize) -> &[usize] {
        return self.by_body.get(&ibody).map(|v| v.as_slice()).unwrap_or(&[]);
    }

    /// The summed penalty of the current configuration
    pub fn evaluate(&self, bodies: &[Body]) -> f64 {
        return self.constraints.iter().map(|c| c.evaluate(bodies)).sum();
    }
}

/// Finds the closest carbon-carbon pair between two bodies and constrains it.
fn closest_carbon_pair(bodies: &[Body], ibody1: usize, ibody2: usize, bond_distance: f64)
    -> Result<DistanceConstraint, ConstraintError>
{
    let mut best: Option<(usize, usize, f64)> = None;
    for (i, a) in bodies[ibody1].atoms().iter().enumerate() {
        if a.element != Element::C { continue; }
        for (j, b) in bodies[ibody2].atoms().iter().enumerate() {
            if b.element != Element::C { continue; }
            let d2 = a.pos.distance_squared_to(&b.pos);
            if best.map_or(true, |(_, _, d)| d2 < d) {
                best = Some((i, j, d2));
            }
        }
    }
    let (iatom1, iatom2, _) = best.ok_or(ConstraintError::NoValidPair(ibody1, ibody2))?;
    return DistanceConstraint::new(bodies, ibody1, iatom1, ibody2, iatom2, bond_distance);
}
