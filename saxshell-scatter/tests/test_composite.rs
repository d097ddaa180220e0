use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use saxshell_pdb::calc::Vec3;
use saxshell_pdb::Element;
use saxshell_scatter::managers::{HistogramManager, SimpleHistogramManager};
use saxshell_scatter::{Atom, Body, CompositeHistogram, RuntimeOptions, Water, WeightedDistribution1D};

fn random_assembly(seed: u64) -> (Vec<Body>, Vec<Water>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let atoms: Vec<Atom> = (0..25).map(|_| Atom::from_coordinates(
        Vec3::new(rng.gen_range(-8.0..8.0), rng.gen_range(-8.0..8.0), rng.gen_range(-8.0..8.0)),
        7.0, Element::N,
    )).collect();
    let waters: Vec<Water> = (0..10).map(|_| Water::new(
        Vec3::new(rng.gen_range(9.0..12.0), rng.gen_range(-8.0..8.0), rng.gen_range(-8.0..8.0)),
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
fn test_total_is_sum_of_components() {
    let (bodies, waters) = random_assembly(21);
    let mut manager = SimpleHistogramManager::<WeightedDistribution1D>::new(&options(), 1);
    let composite = manager.calculate_all(&bodies, &waters);

    let total = composite.total();
    let h_total = manager.calculate(&bodies, &waters);
    assert_eq!(total.len(), h_total.p().len());
    for k in 0..total.len() {
        assert!((total[k] - h_total.p()[k]).abs() < 1e-8,
                "P_total != P_aa + 2 P_aw + P_ww at bin {}", k);
    }
}

#[test]
fn test_water_scaling_updates_the_total() {
    let (bodies, waters) = random_assembly(22);
    let mut manager = SimpleHistogramManager::<WeightedDistribution1D>::new(&options(), 1);
    let mut composite = manager.calculate_all(&bodies, &waters);

    let before = composite.total();
    composite.apply_water_scaling_factor(0.0);
    let after = composite.total();
    // with the hydration layer scaled away, the total shrinks wherever waters contributed
    assert!(after.iter().sum::<f64>() < before.iter().sum::<f64>());
    assert_eq!(composite.water_scaling_factor(), 0.0);
}

#[test]
fn test_water_scaling_is_idempotent_in_effect() {
    // applying c1 then c2 equals applying c2 to a fresh histogram
    let (bodies, waters) = random_assembly(23);
    let mut manager = SimpleHistogramManager::<WeightedDistribution1D>::new(&options(), 1);

    let mut scaled_twice = manager.calculate_all(&bodies, &waters);
    scaled_twice.apply_water_scaling_factor(2.0);
    scaled_twice.apply_water_scaling_factor(3.0);

    let mut scaled_once = manager.calculate_all(&bodies, &waters);
    scaled_once.apply_water_scaling_factor(3.0);

    let i_twice = scaled_twice.debye_transform();
    let i_once = scaled_once.debye_transform();
    for m in 0..i_twice.i.len() {
        assert!((i_twice.i[m] - i_once.i[m]).abs() < 1e-6 * i_once.i[m].abs().max(1.0),
                "intensities differ at q index {}", m);
    }
}

#[test]
fn test_scaling_matches_reweighted_waters() {
    // scaling by c must equal building the histogram with water weights scaled by c
    let (bodies, waters) = random_assembly(24);
    let mut manager = SimpleHistogramManager::<WeightedDistribution1D>::new(&options(), 1);
    let mut scaled = manager.calculate_all(&bodies, &waters);
    scaled.apply_water_scaling_factor(3.0);

    let reweighted: Vec<Water> = waters.iter()
        .map(|w| Water { pos: w.pos.clone(), weight: 3.0 * w.weight })
        .collect();
    let fresh = manager.calculate_all(&bodies, &reweighted);

    let i_scaled = scaled.debye_transform();
    let i_fresh = fresh.debye_transform();
    for m in 0..i_scaled.i.len() {
        assert!((i_scaled.i[m] - i_fresh.i[m]).abs() < 1e-6 * i_fresh.i[m].abs().max(1.0));
    }
}

#[test]
fn test_tail_truncation() {
    // a compact two-atom system: the last retained bin must be the last non-zero one,
    // but never below ten bins
    let atoms = vec![
        Atom::from_coordinates(Vec3::new(0.0, 0.0, 0.0), 6.0, Element::C),
        Atom::from_coordinates(Vec3::new(30.0, 0.0, 0.0), 6.0, Element::C),
    ];
    let mut opts = RuntimeOptions::default();
    opts.axes.distance_bin_width = 1.0;
    let mut manager = SimpleHistogramManager::<WeightedDistribution1D>::new(&opts, 1);
    let h = manager.calculate(&[Body::from_atoms(atoms)], &[]);
    assert_eq!(h.p().len(), 31);
    assert_eq!(h.p()[30], 72.0);

    // everything within the floor
    let atoms = vec![Atom::from_coordinates(Vec3::new(0.0, 0.0, 0.0), 6.0, Element::C)];
    let h = manager.calculate(&[Body::from_atoms(atoms)], &[]);
    assert_eq!(h.p().len(), 10);
}

#[test]
fn test_ff_composite_excluded_volume_scaling() {
    use saxshell_scatter::managers::PartialHistogramManagerFF;
    use saxshell_scatter::FormFactorSet;

    let (bodies, waters) = random_assembly(25);
    let mut manager = PartialHistogramManagerFF::new(&options(), 1, FormFactorSet::Standard);
    let mut composite = manager.calculate_all(&bodies, &waters);
    assert!(composite.has_excluded_volume());

    // more excluded volume displaces more solvent: the forward intensity must drop
    composite.apply_excluded_volume_scaling_factor(1.0);
    let i_base = composite.debye_transform().i[0];
    composite.apply_excluded_volume_scaling_factor(1.5);
    let i_more = composite.debye_transform().i[0];
    assert!(i_more < i_base);

    // and the scaling must replace, not compound
    composite.apply_excluded_volume_scaling_factor(1.0);
    let i_back = composite.debye_transform().i[0];
    assert!((i_back - i_base).abs() < 1e-9 * i_base.abs().max(1.0));
}

#[test]
fn test_ff_grid_composite() {
    use saxshell_scatter::{CompositeDistanceHistogramFFGrid, DistanceAxis, ExvDummy,
                           ExvFormFactorTable, FormFactorSet};

    let (bodies, waters) = random_assembly(26);
    // one dummy per atomic site, the way a coarse grid would carve the volume
    let dummies: Vec<ExvDummy> = bodies[0].atoms().iter()
        .map(|a| ExvDummy { pos: a.pos.clone(), volume: 15.0 })
        .collect();
    let opts = options();
    let exv = ExvFormFactorTable::new(FormFactorSet::Standard, opts.molecule.displaced_volume_set);
    let axis = DistanceAxis::new(0.5, 100.0);
    let exv_axis = opts.grid.exv_axis(100.0);

    let mut composite = CompositeDistanceHistogramFFGrid::calculate(
        &bodies, &waters, &dummies, &axis, exv_axis, opts.axes.q_axis(), exv);
    assert!(composite.has_excluded_volume());

    let i_with = composite.debye_transform().i[0];
    composite.apply_excluded_volume_scaling_factor(0.0);
    let i_without = composite.debye_transform().i[0];
    // removing the excluded volume term increases the forward scattering
    assert!(i_without > i_with);
}
