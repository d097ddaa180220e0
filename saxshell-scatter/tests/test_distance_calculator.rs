use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use saxshell_pdb::calc::Vec3;
use saxshell_pdb::Element;
use saxshell_scatter::distance_calculator::{cross_correlation, self_correlation};
use saxshell_scatter::{Atom, CompactCoordinates, DistanceAxis, Distribution1D, PairDistribution,
                       WeightedDistribution1D};

fn carbon(x: f64, y: f64, z: f64) -> Atom {
    Atom::from_coordinates(Vec3::new(x, y, z), 6.0, Element::C)
}

fn random_atoms(n: usize, seed: u64) -> Vec<Atom> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n).map(|_| carbon(
        rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0),
    )).collect()
}

#[test]
fn test_two_carbons() {
    let atoms = vec![carbon(0.0, 0.0, 0.0), carbon(3.0, 0.0, 0.0)];
    let data = CompactCoordinates::from_atoms(&atoms);
    let axis = DistanceAxis::new(1.0, 500.0);
    let p: Distribution1D = self_correlation(&data, &axis);

    assert_eq!(p.weight(0), 2.0 * 36.0);    // the diagonal
    assert_eq!(p.weight(1), 0.0);
    assert_eq!(p.weight(2), 0.0);
    assert_eq!(p.weight(3), 2.0 * 36.0);    // the pair, both orientations
    assert_eq!(p.weights()[4..].iter().sum::<f64>(), 0.0);
}

#[test]
fn test_single_atom() {
    let atoms = vec![carbon(1.0, 2.0, 3.0)];
    let data = CompactCoordinates::from_atoms(&atoms);
    let axis = DistanceAxis::new(1.0, 500.0);
    let p: Distribution1D = self_correlation(&data, &axis);

    assert_eq!(p.weight(0), 36.0);
    assert_eq!(p.weights()[1..].iter().sum::<f64>(), 0.0);
}

#[test]
fn test_empty_set_yields_zero_histogram() {
    let data = CompactCoordinates::from_atoms(&[]);
    let axis = DistanceAxis::new(1.0, 500.0);
    let p: Distribution1D = self_correlation(&data, &axis);
    assert_eq!(p.bins(), 500);
    assert_eq!(p.weights().iter().sum::<f64>(), 0.0);
}

#[test]
fn test_distance_at_max_is_discarded() {
    // exactly max_distance: must be dropped, not wrapped or clamped
    let atoms = vec![carbon(0.0, 0.0, 0.0), carbon(10.0, 0.0, 0.0)];
    let data = CompactCoordinates::from_atoms(&atoms);
    let axis = DistanceAxis::new(1.0, 10.0);
    let p: Distribution1D = self_correlation(&data, &axis);
    assert_eq!(p.weight(0), 72.0);              // diagonal only
    assert_eq!(p.weights().iter().sum::<f64>(), 72.0);

    // just inside the last retained bin centre: must land in that bin
    let atoms = vec![carbon(0.0, 0.0, 0.0), carbon(9.0, 0.0, 0.0)];
    let data = CompactCoordinates::from_atoms(&atoms);
    let p: Distribution1D = self_correlation(&data, &axis);
    assert_eq!(p.weight(9), 72.0);
}

#[test]
fn test_permutation_invariance() {
    let atoms = random_atoms(40, 17);
    let axis = DistanceAxis::new(0.5, 500.0);
    let data = CompactCoordinates::from_atoms(&atoms);
    let p: Distribution1D = self_correlation(&data, &axis);

    let mut shuffled = atoms.clone();
    shuffled.reverse();
    shuffled.swap(0, 20);
    let data_shuffled = CompactCoordinates::from_atoms(&shuffled);
    let p_shuffled: Distribution1D = self_correlation(&data_shuffled, &axis);

    for k in 0..axis_bins(&axis) {
        assert!((p.weight(k) - p_shuffled.weight(k)).abs() < 1e-9,
                "histograms differ at bin {}", k);
    }
}

fn axis_bins(axis: &DistanceAxis) -> usize {
    use saxshell_scatter::BinAxis;
    axis.bins()
}

#[test]
fn test_self_correlation_total_weight() {
    // the sum over all bins must equal (sum w)^2 when no distance exceeds the axis
    let atoms = random_atoms(25, 3);
    let data = CompactCoordinates::from_atoms(&atoms);
    let axis = DistanceAxis::new(0.5, 500.0);
    let p: Distribution1D = self_correlation(&data, &axis);

    let total_weight: f64 = atoms.iter().map(|a| a.weight).sum();
    let histogram_sum: f64 = p.weights().iter().sum();
    assert!((histogram_sum - total_weight * total_weight).abs() < 1e-6);
}

#[test]
fn test_cross_correlation_total_weight() {
    let a = random_atoms(12, 5);
    let b = random_atoms(30, 6);
    let data_a = CompactCoordinates::from_atoms(&a);
    let data_b = CompactCoordinates::from_atoms(&b);
    let axis = DistanceAxis::new(0.5, 500.0);
    let p: Distribution1D = cross_correlation(&data_a, &data_b, &axis);

    let wa: f64 = a.iter().map(|x| x.weight).sum();
    let wb: f64 = b.iter().map(|x| x.weight).sum();
    assert!((p.weights().iter().sum::<f64>() - wa * wb).abs() < 1e-6);
}

#[test]
fn test_weighted_bins_track_effective_centres() {
    use saxshell_scatter::BinAxis;
    let atoms = vec![carbon(0.0, 0.0, 0.0), carbon(3.2, 0.0, 0.0)];
    let data = CompactCoordinates::from_atoms(&atoms);
    let axis = DistanceAxis::new(1.0, 500.0);
    let p: WeightedDistribution1D = self_correlation(&data, &axis);

    // 3.2 rounds into bin 3, but the effective centre remembers the true distance
    assert_eq!(p.weight(3), 72.0);
    assert!((p.effective_centre(3, &axis) - 3.2).abs() < 1e-9);
    // untouched bins fall back to the axis centre
    assert!((p.effective_centre(7, &axis) - 7.0).abs() < 1e-9);
}

#[test]
fn test_weighted_and_plain_weights_agree() {
    let atoms = random_atoms(33, 11);
    let data = CompactCoordinates::from_atoms(&atoms);
    let axis = DistanceAxis::new(0.5, 500.0);
    let plain: Distribution1D = self_correlation(&data, &axis);
    let weighted: WeightedDistribution1D = self_correlation(&data, &axis);

    for k in 0..plain.bins() {
        assert!((plain.weight(k) - weighted.weight(k)).abs() < 1e-9);
    }
}

#[test]
fn test_batch_evaluators_match_scalar() {
    let atoms = random_atoms(20, 42);
    let data = CompactCoordinates::from_atoms(&atoms);

    let (d8, w8) = data.evaluate8(0, &data, 4);
    let (d4, w4) = data.evaluate4(0, &data, 4);
    for k in 0..4 {
        let (d, w) = data.data()[0].evaluate(&data.data()[4 + k]);
        assert!((d8[k] - d).abs() < 1e-12);
        assert!((d4[k] - d).abs() < 1e-12);
        assert!((w8[k] - w).abs() < 1e-12);
        assert!((w4[k] - w).abs() < 1e-12);
    }

    let axis = DistanceAxis::new(0.5, 500.0);
    let (bins, _) = data.evaluate8_rounded(0, &data, 4, &axis);
    use saxshell_scatter::BinAxis;
    for k in 0..8 {
        assert_eq!(bins[k], axis.bin(d8[k]));
    }
}
