use thiserror::Error;
use saxshell_pdb::Element;
use saxshell_scatter::Body;

/// Errors raised when a distance constraint cannot be constructed.
#[derive(Debug, Error)]
pub enum ConstraintError {
    #[error("Constraints only make sense between carbon atoms; got {0} and {1}")]
    NonCarbonEndpoint(Element, Element),
    #[error("Cannot create a constraint between atoms of the same body (id {0})")]
    SameBody(u32),
    #[error("The constrained atoms are {distance:.2} A apart, beyond the allowed {cap:.2} A")]
    TooFarApart { distance: f64, cap: f64 },
    #[error("No valid atom pair found between bodies {0} and {1}")]
    NoValidPair(usize, usize),
}

/// A penalty term anchoring two carbon atoms of different bodies to their initial distance.
///
/// The penalty is `10 * (r_base - r)^4`, zero at the equilibrium distance and growing
/// steeply with the violation, so the optimiser may bend a constraint a little but never
/// tear the assembly apart.
///
/// # Examples
/// ```
/// use saxshell_pdb::calc::Vec3;
/// use saxshell_pdb::Element;
/// use saxshell_scatter::{Atom, Body};
/// use saxshell_rigidbody::DistanceConstraint;
///
/// let b1 = Body::from_atoms(vec![Atom::from_coordinates(Vec3::new(0.0, 0.0, 0.0), 6.0, Element::C)]);
/// let b2 = Body::from_atoms(vec![Atom::from_coordinates(Vec3::new(1.5, 0.0, 0.0), 6.0, Element::C)]);
/// let bodies = vec![b1, b2];
/// let constraint = DistanceConstraint::new(&bodies, 0, 0, 1, 0, 4.0).unwrap();
/// assert_eq!(constraint.evaluate(&bodies), 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct DistanceConstraint {
    pub ibody1: usize,
    pub iatom1: usize,
    pub ibody2: usize,
    pub iatom2: usize,
    r_base: f64,
}

impl DistanceConstraint {
    /// Creates a constraint between atom `iatom1` of body `ibody1` and atom `iatom2` of
    /// body `ibody2`; the current distance becomes the equilibrium distance.
    ///
    /// Fails when an endpoint is not a carbon, the atoms share a body, or they are
    /// further apart than `bond_distance`.
    pub fn new(bodies: &[Body], ibody1: usize, iatom1: usize, ibody2: usize, iatom2: usize,
               bond_distance: f64) -> Result<DistanceConstraint, ConstraintError> {
        let atom1 = bodies[ibody1].atom(iatom1);
        let atom2 = bodies[ibody2].atom(iatom2);

        if atom1.element != Element::C || atom2.element != Element::C {
            return Err(ConstraintError::NonCarbonEndpoint(atom1.element, atom2.element));
        }
        if bodies[ibody1].id() == bodies[ibody2].id() {
            return Err(ConstraintError::SameBody(bodies[ibody1].id()));
        }
        let r_base = atom1.pos.distance_to(&atom2.pos);
        if r_base > bond_distance {
            return Err(ConstraintError::TooFarApart { distance: r_base, cap: bond_distance });
        }
        return Ok(DistanceConstraint { ibody1, iatom1, ibody2, iatom2, r_base });
    }

    /// The equilibrium distance fixed at construction
    pub fn r_base(&self) -> f64 { self.r_base }

    /// The penalty of the current configuration
    pub fn evaluate(&self, bodies: &[Body]) -> f64 {
        let atom1 = bodies[self.ibody1].atom(self.iatom1);
        let atom2 = bodies[self.ibody2].atom(self.iatom2);
        return Self::transform(self.r_base - atom1.pos.distance_to(&atom2.pos));
    }

    fn transform(offset: f64) -> f64 {
        return offset * offset * offset * offset * 10.0;
    }
}
