use saxshell_pdb::calc::Vec3;
use saxshell_pdb::Element;
use saxshell_scatter::managers::{DebugDistanceHistogram, HistogramManager, SimpleHistogramManager};
use saxshell_scatter::{Atom, Body, RuntimeOptions, Water, WeightedDistribution1D};

fn carbon(x: f64, y: f64, z: f64) -> Atom {
    Atom::from_coordinates(Vec3::new(x, y, z), 6.0, Element::C)
}

#[test]
fn test_forward_intensity_is_the_histogram_sum() {
    // two carbons 3 A apart: P[0] = 72, P[3] = 72, so I(0) = 144
    let mut opts = RuntimeOptions::default();
    opts.axes.distance_bin_width = 1.0;
    opts.axes.q_min = 0.0;

    let body = Body::from_atoms(vec![carbon(0.0, 0.0, 0.0), carbon(3.0, 0.0, 0.0)]);
    let mut manager = SimpleHistogramManager::<WeightedDistribution1D>::new(&opts, 1);
    let h = manager.calculate(&[body], &[]);

    assert_eq!(h.p()[0], 72.0);
    assert_eq!(h.p()[3], 72.0);

    let curve = h.debye_transform();
    assert!((curve.i[0] - 144.0).abs() < 1e-9);
    // the histogram sum bounds the intensity from above for q > 0
    assert!(curve.i[20] < 144.0);
}

#[test]
fn test_transform_matches_direct_sum() {
    // distinct, well-separated pair distances: with weighted bins the effective centres
    // recover the exact geometry, so the reference double sum must agree closely
    let atoms = vec![
        carbon(0.0, 0.0, 0.0),
        carbon(3.3, 0.0, 0.0),
        carbon(0.0, 7.1, 0.0),
        carbon(0.0, 0.0, 12.6),
        carbon(5.0, 9.0, 2.0),
    ];
    let waters = vec![Water::new(Vec3::new(20.0, 20.0, 20.0))];
    let mut opts = RuntimeOptions::default();
    opts.axes.distance_bin_width = 0.5;

    let body = Body::from_atoms(atoms);
    let mut manager = SimpleHistogramManager::<WeightedDistribution1D>::new(&opts, 1);
    let h = manager.calculate(&[body.clone()], &waters);
    let curve = h.debye_transform();

    let reference = DebugDistanceHistogram::new(opts.axes.q_axis());
    let curve_ref = reference.debye_transform(&[body], &waters);

    for m in 0..curve.i.len() {
        let rel = (curve.i[m] - curve_ref.i[m]).abs() / curve_ref.i[m].abs().max(1e-30);
        assert!(rel < 1e-6, "relative deviation {} at q = {}", rel, curve.q[m]);
    }
}

#[test]
fn test_intensity_decreases_from_the_forward_limit() {
    let atoms: Vec<Atom> = (0..8).map(|i| carbon(1.9 * i as f64, 0.4 * i as f64, 0.0)).collect();
    let mut opts = RuntimeOptions::default();
    opts.axes.q_min = 0.0;
    let mut manager = SimpleHistogramManager::<WeightedDistribution1D>::new(&opts, 1);
    let h = manager.calculate(&[Body::from_atoms(atoms)], &[]);
    let curve = h.debye_transform();

    let i0 = curve.i[0];
    for m in 1..curve.i.len() {
        assert!(curve.i[m] <= i0 + 1e-9);
    }
}

#[test]
fn test_output_axis_covers_the_configured_range() {
    let mut opts = RuntimeOptions::default();
    opts.axes.q_min = 0.01;
    opts.axes.q_max = 0.3;
    opts.axes.q_bins = 61;
    let mut manager = SimpleHistogramManager::<WeightedDistribution1D>::new(&opts, 1);
    let h = manager.calculate(&[Body::from_atoms(vec![carbon(0.0, 0.0, 0.0)])], &[]);
    let curve = h.debye_transform();

    assert_eq!(curve.q.len(), 61);
    assert!((curve.q[0] - 0.01).abs() < 1e-12);
    assert!((curve.q[60] - 0.3).abs() < 1e-12);
}
