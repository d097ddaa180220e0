use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use saxshell_pdb::calc::Vec3;
use saxshell_pdb::Element;
use saxshell_scatter::managers::{HistogramManager, SimpleHistogramManager};
use saxshell_scatter::{Atom, Body, CompositeHistogram, RuntimeOptions, Water, WeightedDistribution1D};
use saxshell_fitter::{FitOptions, SaxsData, SmartFitter};

fn random_assembly(seed: u64) -> (Vec<Body>, Vec<Water>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let atoms: Vec<Atom> = (0..30).map(|_| Atom::from_coordinates(
        Vec3::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)),
        6.0, Element::C,
    )).collect();
    let waters: Vec<Water> = (0..8).map(|_| Water::new(
        Vec3::new(rng.gen_range(11.0..14.0), rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)),
    )).collect();
    return (vec![Body::from_atoms(atoms)], waters);
}

fn options() -> RuntimeOptions {
    let mut options = RuntimeOptions::default();
    options.axes.distance_bin_width = 0.5;
    options.axes.max_distance = 100.0;
    return options;
}

#[test]
fn test_identity_recovery_on_synthetic_data() {
    // a dataset generated by the model itself must fit back with a = 1, b = 0, c = 1
    let (bodies, waters) = random_assembly(31);
    let mut manager = SimpleHistogramManager::<WeightedDistribution1D>::new(&options(), 1);
    let composite = manager.calculate_all(&bodies, &waters);
    let curve = composite.debye_transform();

    let data = SaxsData::from_model(&curve.q, &curve.i, 0.01);
    let mut fitter = SmartFitter::new(data, manager.calculate_all(&bodies, &waters));
    let result = fitter.fit();

    assert_eq!(result.status, 0);
    let a = result.parameter("a").unwrap().value;
    let b = result.parameter("b").unwrap().value;
    let c = result.parameter("c").unwrap().value;
    assert!((a - 1.0).abs() < 0.01, "a = {}", a);
    assert!(b.abs() < 0.01 * curve.i[0], "b = {}", b);
    assert!((c - 1.0).abs() < 0.01, "c = {}", c);
    assert!(result.reduced_chi2() <= 1.05, "chi2/dof = {}", result.reduced_chi2());
}

#[test]
fn test_known_water_scaling_is_recovered() {
    // generate data with the hydration layer upweighted, then ask the fitter to find it
    let (bodies, waters) = random_assembly(32);
    let mut manager = SimpleHistogramManager::<WeightedDistribution1D>::new(&options(), 1);
    let mut composite = manager.calculate_all(&bodies, &waters);
    composite.apply_water_scaling_factor(2.5);
    let curve = composite.debye_transform();

    let data = SaxsData::from_model(&curve.q, &curve.i, 0.01);
    let mut fitter = SmartFitter::new(data, manager.calculate_all(&bodies, &waters));
    let result = fitter.fit();

    let c = result.parameter("c").unwrap().value;
    assert!((c - 2.5).abs() < 0.05, "c = {}", c);
}

#[test]
fn test_fit_is_reproducible() {
    let (bodies, waters) = random_assembly(33);
    let mut manager = SimpleHistogramManager::<WeightedDistribution1D>::new(&options(), 1);
    let curve = manager.calculate_all(&bodies, &waters).debye_transform();
    let data = SaxsData::from_model(&curve.q, &curve.i, 0.02);

    let mut fitter = SmartFitter::new(data.clone(), manager.calculate_all(&bodies, &waters));
    let chi2_first = fitter.fit_chi2_only();

    let mut fitter_again = SmartFitter::new(data, manager.calculate_all(&bodies, &waters));
    let chi2_second = fitter_again.fit_chi2_only();
    assert!((chi2_first - chi2_second).abs() < 1e-9);
}

#[test]
fn test_scaled_and_shifted_data() {
    // the linear stage must absorb an overall scale and a flat background
    let (bodies, waters) = random_assembly(34);
    let mut manager = SimpleHistogramManager::<WeightedDistribution1D>::new(&options(), 1);
    let curve = manager.calculate_all(&bodies, &waters).debye_transform();

    let scaled: Vec<f64> = curve.i.iter().map(|v| 3.5 * v + 100.0).collect();
    let data = SaxsData::from_model(&curve.q, &scaled, 0.01);
    let mut fitter = SmartFitter::new(data, manager.calculate_all(&bodies, &waters));
    let result = fitter.fit();

    let a = result.parameter("a").unwrap().value;
    let b = result.parameter("b").unwrap().value;
    assert!((a - 3.5).abs() < 0.05, "a = {}", a);
    assert!((b - 100.0).abs() < 2.0, "b = {}", b);
}

#[test]
fn test_exhausted_budget_sets_the_status_flag() {
    let (bodies, waters) = random_assembly(35);
    let mut manager = SimpleHistogramManager::<WeightedDistribution1D>::new(&options(), 1);
    let curve = manager.calculate_all(&bodies, &waters).debye_transform();
    let data = SaxsData::from_model(&curve.q, &curve.i, 0.01);

    let starved = FitOptions { max_iterations: 1, verbose: false };
    let mut fitter = SmartFitter::with_options(data, manager.calculate_all(&bodies, &waters), starved);
    let result = fitter.fit();
    assert_ne!(result.status, 0);
}

#[test]
fn test_report_lists_every_parameter() {
    let (bodies, waters) = random_assembly(36);
    let mut manager = SimpleHistogramManager::<WeightedDistribution1D>::new(&options(), 1);
    let curve = manager.calculate_all(&bodies, &waters).debye_transform();
    let data = SaxsData::from_model(&curve.q, &curve.i, 0.01);
    let mut fitter = SmartFitter::new(data, manager.calculate_all(&bodies, &waters));
    let result = fitter.fit();

    let report = format!("{}", result);
    for name in ["a", "b", "c", "chi2", "dof", "evaluations"] {
        assert!(report.contains(name), "report lacks '{}'", name);
    }
}
