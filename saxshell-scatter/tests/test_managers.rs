use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use saxshell_pdb::calc::Vec3;
use saxshell_pdb::Element;
use saxshell_scatter::managers::{HistogramManager, PartialHistogramManager, SimpleHistogramManager};
use saxshell_scatter::{Atom, Body, HistogramManagerChoice, RuntimeOptions, Symmetry, Water,
                       WeightedDistribution1D, Distribution1D};

fn random_body(n: usize, seed: u64, offset: f64) -> Body {
    let mut rng = SmallRng::seed_from_u64(seed);
    let atoms = (0..n).map(|_| Atom::from_coordinates(
        Vec3::new(
            rng.gen_range(-10.0..10.0) + offset,
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
        ),
        6.0, Element::C,
    )).collect();
    return Body::from_atoms(atoms);
}

fn test_options() -> RuntimeOptions {
    let mut options = RuntimeOptions::default();
    options.axes.distance_bin_width = 0.5;
    options.axes.max_distance = 200.0;
    return options;
}

fn assert_histograms_equal(a: &[f64], b: &[f64], tolerance: f64, context: &str) {
    assert_eq!(a.len(), b.len(), "{}: lengths differ ({} vs {})", context, a.len(), b.len());
    for k in 0..a.len() {
        assert!((a[k] - b[k]).abs() < tolerance, "{}: bin {} differs ({} vs {})", context, k, a[k], b[k]);
    }
}

/// wires manager probes into the bodies, the way a molecule does
fn install_probes(manager: &mut dyn HistogramManager, bodies: &mut [Body]) {
    let state = manager.state_manager();
    for (i, body) in bodies.iter_mut().enumerate() {
        body.set_signaller(state.probe(i));
    }
}

#[test]
fn test_partial_equals_simple_initially() {
    let options = test_options();
    let bodies = vec![random_body(30, 1, 0.0), random_body(25, 2, 15.0), random_body(20, 3, -15.0)];
    let waters: Vec<Water> = (0..10).map(|i| Water::new(Vec3::new(i as f64, 12.0, 0.0))).collect();

    let mut simple = SimpleHistogramManager::<WeightedDistribution1D>::new(&options, 3);
    let mut partial = PartialHistogramManager::<WeightedDistribution1D>::new(&options, 3);

    let h_simple = simple.calculate(&bodies, &waters);
    let h_partial = partial.calculate(&bodies, &waters);
    assert_histograms_equal(h_simple.p(), h_partial.p(), 1e-8, "fresh managers");
}

#[test]
fn test_incremental_equivalence_after_mutations() {
    // the incremental-correctness law: whatever the mutation sequence, the partial
    // manager agrees with a from-scratch recomputation
    let options = test_options();
    let mut bodies = vec![random_body(30, 4, 0.0), random_body(25, 5, 15.0), random_body(20, 6, -15.0)];
    let waters: Vec<Water> = (0..8).map(|i| Water::new(Vec3::new(0.0, 14.0 + i as f64, 0.0))).collect();

    let mut partial = PartialHistogramManager::<WeightedDistribution1D>::new(&options, 3);
    install_probes(&mut partial, &mut bodies);
    let _first = partial.calculate(&bodies, &waters);

    // translate body 1 and recompute incrementally
    bodies[1].translate(&Vec3::new(5.0, 0.0, 0.0));
    let h_partial = partial.calculate(&bodies, &waters);

    let mut simple = SimpleHistogramManager::<WeightedDistribution1D>::new(&options, 3);
    let h_simple = simple.calculate(&bodies, &waters);
    assert_histograms_equal(h_simple.p(), h_partial.p(), 1e-7, "after translating body 1");
    assert!(partial.validate_master(1e-7));
}

#[test]
fn test_incremental_equivalence_after_longer_sequence() {
    let options = test_options();
    let mut bodies = vec![random_body(20, 7, 0.0), random_body(20, 8, 12.0), random_body(20, 9, -12.0)];
    let mut waters: Vec<Water> = (0..5).map(|i| Water::new(Vec3::new(i as f64, -14.0, 3.0))).collect();

    let mut partial = PartialHistogramManager::<WeightedDistribution1D>::new(&options, 3);
    install_probes(&mut partial, &mut bodies);
    let _ = partial.calculate(&bodies, &waters);

    let mut rng = SmallRng::seed_from_u64(123);
    for step in 0..6 {
        let which = rng.gen_range(0..3);
        bodies[which].translate(&Vec3::new(
            rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0)));
        if step % 2 == 0 {
            bodies[which].rotate(&Vec3::new(0.3, -0.1, 0.2));
        }
        if step == 3 {
            waters.push(Water::new(Vec3::new(0.0, 0.0, 20.0)));
            partial.state_manager().modified_hydration_layer();
        }

        let h_partial = partial.calculate(&bodies, &waters);
        let mut simple = SimpleHistogramManager::<WeightedDistribution1D>::new(&options, 3);
        let h_simple = simple.calculate(&bodies, &waters);
        assert_histograms_equal(h_simple.p(), h_partial.p(), 1e-6, "mutation sequence");
        assert!(partial.validate_master(1e-6));
    }
}

#[test]
fn test_unmodified_bodies_are_not_recomputed_wrongly() {
    // two calculate() calls with no mutations in between must agree exactly
    let options = test_options();
    let mut bodies = vec![random_body(15, 10, 0.0), random_body(15, 11, 10.0)];
    let mut partial = PartialHistogramManager::<Distribution1D>::new(&options, 2);
    install_probes(&mut partial, &mut bodies);

    let first = partial.calculate(&bodies, &[]);
    let second = partial.calculate(&bodies, &[]);
    assert_histograms_equal(first.p(), second.p(), 0.0, "idle recalculation");
}

#[test]
fn test_empty_molecule() {
    let options = test_options();
    let mut simple = SimpleHistogramManager::<WeightedDistribution1D>::new(&options, 0);
    let h = simple.calculate(&[], &[]);
    assert_eq!(h.p().len(), 10);     // the truncation floor
    assert!(h.p().iter().all(|v| *v == 0.0));
}

#[test]
fn test_ff_manager_total_matches_unresolved() {
    use saxshell_scatter::managers::PartialHistogramManagerFF;
    use saxshell_scatter::FormFactorSet;

    let options = test_options();
    let bodies = vec![random_body(20, 12, 0.0), random_body(15, 13, 10.0)];
    let waters: Vec<Water> = (0..6).map(|i| Water::new(Vec3::new(12.0, i as f64, 5.0))).collect();

    let mut ff = PartialHistogramManagerFF::new(&options, 2, FormFactorSet::Standard);
    let mut plain = SimpleHistogramManager::<Distribution1D>::new(&options, 2);

    let h_ff = ff.calculate(&bodies, &waters);
    let h_plain = plain.calculate(&bodies, &waters);
    assert_histograms_equal(h_ff.p(), h_plain.p(), 1e-7, "ff total vs unresolved");
}

#[test]
fn test_symmetry_manager_expands_copies() {
    use saxshell_scatter::managers::SymmetryManager;

    let options = test_options();
    // one atom with a single translational copy is equivalent to two atoms
    let mut body = Body::from_atoms(vec![Atom::from_coordinates(Vec3::new(0.0, 0.0, 0.0), 6.0, Element::C)]);
    body.add_symmetry(Symmetry::translational(Vec3::new(3.0, 0.0, 0.0), 1));

    let mut manager = SymmetryManager::<Distribution1D>::new(&options, 1);
    let h = manager.calculate(&[body], &[]);

    let atoms = vec![
        Atom::from_coordinates(Vec3::new(0.0, 0.0, 0.0), 6.0, Element::C),
        Atom::from_coordinates(Vec3::new(3.0, 0.0, 0.0), 6.0, Element::C),
    ];
    let mut reference = SimpleHistogramManager::<Distribution1D>::new(&options, 1);
    let h_ref = reference.calculate(&[Body::from_atoms(atoms)], &[]);
    assert_histograms_equal(h.p(), h_ref.p(), 1e-9, "translational symmetry");
}

#[test]
fn test_factory_respects_the_choice() {
    use saxshell_scatter::managers::create_manager;

    let mut options = test_options();
    for choice in [HistogramManagerChoice::Simple, HistogramManagerChoice::Partial,
                   HistogramManagerChoice::PartialFF, HistogramManagerChoice::PartialSymmetry,
                   HistogramManagerChoice::FoXS, HistogramManagerChoice::Crysol] {
        options.hist.manager_choice = choice;
        let mut manager = create_manager(&options, 1);
        let body = random_body(5, 99, 0.0);
        let h = manager.calculate(&[body], &[]);
        assert!(h.p()[0] > 0.0, "manager {:?} produced an empty histogram", choice);
    }
}
