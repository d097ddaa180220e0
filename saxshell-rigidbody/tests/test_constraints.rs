use saxshell_pdb::calc::Vec3;
use saxshell_pdb::Element;
use saxshell_scatter::{Atom, Body};
use saxshell_rigidbody::{ConstraintGenerationChoice, ConstraintManager, DistanceConstraint};

fn atom(x: f64, element: Element) -> Atom {
    Atom::from_coordinates(Vec3::new(x, 0.0, 0.0), element.atomic_number() as f64, element)
}

fn two_bodies(separation: f64) -> Vec<Body> {
    let b1 = Body::from_atoms(vec![atom(0.0, Element::C)]);
    let b2 = Body::from_atoms(vec![atom(separation, Element::C)]);
    return vec![b1, b2];
}

#[test]
fn test_penalty_is_zero_at_rest() {
    let bodies = two_bodies(1.5);
    let constraint = DistanceConstraint::new(&bodies, 0, 0, 1, 0, 4.0).unwrap();
    assert_eq!(constraint.evaluate(&bodies), 0.0);
    assert!((constraint.r_base() - 1.5).abs() < 1e-12);
}

#[test]
fn test_penalty_of_a_small_displacement() {
    let mut bodies = two_bodies(1.5);
    let constraint = DistanceConstraint::new(&bodies, 0, 0, 1, 0, 4.0).unwrap();

    bodies[1].translate(&Vec3::new(0.1, 0.0, 0.0));
    let penalty = constraint.evaluate(&bodies);
    assert!((penalty - 1e-3).abs() < 1e-12, "penalty = {}", penalty);
}

#[test]
fn test_penalty_grows_monotonically() {
    let bodies = two_bodies(1.5);
    let constraint = DistanceConstraint::new(&bodies, 0, 0, 1, 0, 4.0).unwrap();

    let mut previous = 0.0;
    for step in 1..=10 {
        let mut moved = bodies.clone();
        moved[1].translate(&Vec3::new(0.05 * step as f64, 0.0, 0.0));
        let penalty = constraint.evaluate(&moved);
        assert!(penalty > previous, "penalty not increasing at step {}", step);
        previous = penalty;
    }
}

#[test]
fn test_compression_is_also_penalised() {
    let mut bodies = two_bodies(2.0);
    let constraint = DistanceConstraint::new(&bodies, 0, 0, 1, 0, 4.0).unwrap();
    bodies[1].translate(&Vec3::new(-0.5, 0.0, 0.0));
    assert!(constraint.evaluate(&bodies) > 0.0);
}

#[test]
fn test_non_carbon_endpoints_are_rejected() {
    let b1 = Body::from_atoms(vec![atom(0.0, Element::N)]);
    let b2 = Body::from_atoms(vec![atom(1.5, Element::C)]);
    assert!(DistanceConstraint::new(&[b1, b2], 0, 0, 1, 0, 4.0).is_err());
}

#[test]
fn test_same_body_is_rejected() {
    let body = Body::from_atoms(vec![atom(0.0, Element::C), atom(1.5, Element::C)]);
    let bodies = vec![body.clone(), body];
    // both indices resolve to bodies with the same identifier
    assert!(DistanceConstraint::new(&bodies, 0, 0, 1, 1, 4.0).is_err());
}

#[test]
fn test_too_distant_endpoints_are_rejected() {
    let bodies = two_bodies(6.0);
    assert!(DistanceConstraint::new(&bodies, 0, 0, 1, 0, 4.0).is_err());
    // but a close pair under the same cap is fine, even closer than a bond length
    let bodies = two_bodies(0.8);
    let constraint = DistanceConstraint::new(&bodies, 0, 0, 1, 0, 4.0).unwrap();
    assert!(constraint.evaluate(&bodies) < 1e-12);
}

#[test]
fn test_linear_generation_chains_consecutive_bodies() {
    let b1 = Body::from_atoms(vec![atom(0.0, Element::C), atom(1.0, Element::C)]);
    let b2 = Body::from_atoms(vec![atom(3.5, Element::C), atom(6.0, Element::C)]);
    let b3 = Body::from_atoms(vec![atom(8.0, Element::C)]);
    let bodies = vec![b1, b2, b3];

    let manager = ConstraintManager::generate(&bodies, ConstraintGenerationChoice::Linear, 4.0).unwrap();
    assert_eq!(manager.count(), 2);
    // the closest carbons were picked: (1.0, 3.5) and (6.0, 8.0)
    assert!((manager.constraint(0).r_base() - 2.5).abs() < 1e-12);
    assert!((manager.constraint(1).r_base() - 2.0).abs() < 1e-12);
    assert_eq!(manager.constraints_of_body(1).len(), 2);
    assert_eq!(manager.evaluate(&bodies), 0.0);
}

#[test]
fn test_linear_generation_fails_on_disconnected_bodies() {
    let bodies = two_bodies(20.0);
    assert!(ConstraintManager::generate(&bodies, ConstraintGenerationChoice::Linear, 4.0).is_err());
}
