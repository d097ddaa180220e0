use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use saxshell_pdb::calc::Vec3;
use saxshell_pdb::Element;
use saxshell_fitter::SaxsData;
use saxshell_scatter::{Atom, Body, CompositeHistogram, Molecule, RuntimeOptions};
use saxshell_rigidbody::{ConstraintManager, RandomBodySelect, RigidBody, RigidBodyOptions,
                         SimpleParameterGeneration, SingleTransform, TransformStrategy};

fn random_body(n: usize, seed: u64, offset: Vec3) -> Body {
    let mut rng = SmallRng::seed_from_u64(seed);
    let atoms = (0..n).map(|_| Atom::from_coordinates(
        Vec3::new(
            rng.gen_range(-6.0..6.0) + offset.x,
            rng.gen_range(-6.0..6.0) + offset.y,
            rng.gen_range(-6.0..6.0) + offset.z,
        ),
        6.0, Element::C,
    )).collect();
    return Body::from_atoms(atoms);
}

fn options() -> RuntimeOptions {
    let mut options = RuntimeOptions::default();
    options.axes.distance_bin_width = 0.5;
    options.axes.max_distance = 200.0;
    options.general.output = std::env::temp_dir().join("saxshell_rigidbody_test")
        .to_str().unwrap().to_string();
    options.general.verbose = false;
    return options;
}

/// a two-body assembly in its reference configuration, and the measurement it produces
fn reference_assembly() -> (Vec<Body>, SaxsData) {
    let bodies = vec![
        random_body(20, 51, Vec3::new(0.0, 0.0, 0.0)),
        random_body(20, 52, Vec3::new(14.0, 0.0, 0.0)),
    ];
    let mut molecule = Molecule::from_bodies(bodies.clone(), options());
    let curve = molecule.histogram_all().debye_transform();
    let data = SaxsData::from_model(&curve.q, &curve.i, 0.01);
    return (bodies, data);
}

#[test]
fn test_descent_never_worsens_the_best() {
    let (mut bodies, data) = reference_assembly();
    // perturb the assembly away from the configuration that generated the data
    bodies[1].translate(&Vec3::new(3.0, 1.0, -1.0));

    let molecule = Molecule::from_bodies(bodies, options());
    let mut rigid_options = RigidBodyOptions::default();
    rigid_options.iterations = 15;
    rigid_options.max_translation = 2.0;

    let mut rigidbody = RigidBody::new(molecule, rigid_options).unwrap();
    rigidbody.set_body_selector(Box::new(RandomBodySelect::seeded(7)));
    rigidbody.set_parameter_strategy(Box::new(SimpleParameterGeneration::seeded(
        15, 2.0, std::f64::consts::PI / 6.0, 11)));

    // the perturbed assembly fits worse than the reference it was generated from
    let initial = {
        let mut molecule = Molecule::from_bodies(
            vec![random_body(20, 51, Vec3::new(0.0, 0.0, 0.0)),
                 random_body(20, 52, Vec3::new(17.0, 1.0, -1.0))],
            options());
        let mut fitter = saxshell_fitter::SmartFitter::new(data.clone(), molecule.histogram_all());
        fitter.fit_chi2_only()
    };
    assert!(initial > 1.0);

    let fit = rigidbody.optimize(data).unwrap();
    assert!(fit.chi2 <= initial * (1.0 + 1e-9),
            "descent ended at {} above the starting point {}", fit.chi2, initial);
}

#[test]
fn test_rejected_moves_are_undone_exactly() {
    let mut bodies = vec![
        random_body(10, 61, Vec3::new(0.0, 0.0, 0.0)),
        random_body(10, 62, Vec3::new(12.0, 0.0, 0.0)),
    ];
    let before: Vec<Vec3> = bodies[1].atoms().iter().map(|a| a.pos.clone()).collect();

    let constraints = ConstraintManager::new();
    let mut transform = SingleTransform::new();
    let mut generator = SimpleParameterGeneration::seeded(10, 3.0, 0.7, 5);
    use saxshell_rigidbody::ParameterGenerationStrategy;
    transform.apply(&mut bodies, &constraints, generator.next(), 1, None);
    transform.undo(&mut bodies);

    for (a, b) in bodies[1].atoms().iter().zip(before.iter()) {
        assert!(a.pos.distance_to(b) < 1e-9, "undo did not restore the body");
    }
}

#[test]
fn test_optimize_writes_trajectory_and_report() {
    let (bodies, data) = reference_assembly();
    let opts = options();
    let output = opts.general.output.clone();
    let molecule = Molecule::from_bodies(bodies, opts);

    let mut rigid_options = RigidBodyOptions::default();
    rigid_options.iterations = 3;
    let mut rigidbody = RigidBody::new(molecule, rigid_options).unwrap();
    let fit = rigidbody.optimize(data).unwrap();

    assert!(fit.parameter("a").is_some());
    assert!(fit.parameter("penalty").is_some());
    assert!(std::path::Path::new(&format!("{}/trajectory.xyz", output)).exists());
    assert!(std::path::Path::new(&format!("{}/fit.txt", output)).exists());
}

#[test]
fn test_constrained_assembly_keeps_its_geometry() {
    use saxshell_rigidbody::{BodySelectorChoice, ConstraintGenerationChoice, TransformStrategyChoice};

    // two bodies with carbons close enough to chain
    let b1 = random_body(12, 71, Vec3::new(0.0, 0.0, 0.0));
    let b2 = random_body(12, 72, Vec3::new(9.0, 0.0, 0.0));
    let bodies = vec![b1, b2];

    let mut molecule = Molecule::from_bodies(bodies.clone(), options());
    let curve = molecule.histogram_all().debye_transform();
    let data = SaxsData::from_model(&curve.q, &curve.i, 0.01);

    let mut rigid_options = RigidBodyOptions::default();
    rigid_options.iterations = 10;
    rigid_options.constraint_generation_strategy = ConstraintGenerationChoice::Linear;
    rigid_options.body_selector = BodySelectorChoice::RandomConstraint;
    rigid_options.transform_strategy = TransformStrategyChoice::Rigid;
    rigid_options.bond_distance = 10.0;
    rigid_options.max_translation = 1.0;

    let molecule = Molecule::from_bodies(bodies, options());
    let mut rigidbody = RigidBody::new(molecule, rigid_options).unwrap();
    assert_eq!(rigidbody.constraints().count(), 1);

    let fit = rigidbody.optimize(data).unwrap();
    // the optimum is the starting configuration, so the penalty must stay negligible
    let penalty = fit.parameter("penalty").unwrap().value;
    assert!(penalty < 1e-3, "constraint penalty grew to {}", penalty);
}
