use crate::axis::{BinAxis, DistanceAxis, QAxis};
use crate::body::Body;
use crate::compact::CompactCoordinates;
use crate::composite::{CompositeDistanceHistogram, CompositeHistogram, DistanceHistogram};
use crate::distance_calculator::{cross_correlation, self_correlation};
use crate::distribution::PairDistribution;
use crate::managers::HistogramManager;
use crate::options::RuntimeOptions;
use crate::site::Water;
use crate::state::StateManager;

/// State-change-driven incremental histogram builder.
///
/// The manager caches one self-correlation block per body, one cross-correlation block per
/// body pair, the hydration self-correlation and one body-hydration cross block per body.
/// On every call it consults its [`StateManager`](StateManager): blocks involving an
/// unmodified body are reused; for every affected block the previous value is subtracted
/// from the master sum, the block is recomputed and the new value added back. After the
/// call the master equals the sum of all blocks.
///
/// Cross-body blocks are accumulated twice into the atom-atom master, once per pair
/// orientation, so the master matches what one self-correlation over the concatenated
/// bodies would produce.
pub struct PartialHistogramManager<D: PairDistribution> {
    axis: DistanceAxis,
    q_axis: QAxis,
    state: StateManager,
    n: usize,
    coords: Vec<CompactCoordinates>,
    coords_w: CompactCoordinates,
    self_corr: Vec<D>,
    cross: Vec<Vec<D>>,     // cross[i][j - i - 1] holds the block of bodies (i, j), i < j
    self_w: D,
    cross_w: Vec<D>,
    master_aa: D,
    master_aw: D,
    master_ww: D,
}

impl<D: PairDistribution> PartialHistogramManager<D> {
    pub fn new(options: &RuntimeOptions, n_bodies: usize) -> PartialHistogramManager<D> {
        let axis = options.axes.distance_axis();
        let bins = axis.bins();
        PartialHistogramManager {
            axis,
            q_axis: options.axes.q_axis(),
            state: StateManager::new(n_bodies),
            n: n_bodies,
            coords: vec![CompactCoordinates::default(); n_bodies],
            coords_w: CompactCoordinates::default(),
            self_corr: vec![D::with_bins(bins); n_bodies],
            cross: (0..n_bodies).map(|i| vec![D::with_bins(bins); n_bodies - i - 1]).collect(),
            self_w: D::with_bins(bins),
            cross_w: vec![D::with_bins(bins); n_bodies],
            master_aa: D::with_bins(bins),
            master_aw: D::with_bins(bins),
            master_ww: D::with_bins(bins),
        }
    }

    /// Rebuilds every block affected by the changes recorded since the previous call.
    fn update_blocks(&mut self, bodies: &[Body], waters: &[Water]) {
        assert_eq!(bodies.len(), self.n,
                   "the manager observes {} bodies but was asked about {}", self.n, bodies.len());

        let external = self.state.externally_modified_bodies();
        let internal = self.state.internally_modified_bodies();
        let modified: Vec<bool> = external.iter().zip(internal.iter()).map(|(e, i)| *e || *i).collect();
        let hydration = self.state.is_modified_hydration();

        // regenerate the coordinate buffers of everything that moved
        for i in 0..self.n {
            if modified[i] { self.coords[i] = CompactCoordinates::from_atoms(bodies[i].atoms()); }
        }
        if hydration { self.coords_w = CompactCoordinates::from_waters(waters); }

        for i in 0..self.n {
            if modified[i] {
                let fresh: D = self_correlation(&self.coords[i], &self.axis);
                self.master_aa.sub_assign(&self.self_corr[i]);
                self.master_aa.add_assign(&fresh);
                self.self_corr[i] = fresh;
            }
        }

        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if modified[i] || modified[j] {
                    let fresh: D = cross_correlation(&self.coords[i], &self.coords[j], &self.axis);
                    let old = &self.cross[i][j - i - 1];
                    self.master_aa.sub_assign(old);
                    self.master_aa.sub_assign(old);
                    self.master_aa.add_assign(&fresh);
                    self.master_aa.add_assign(&fresh);
                    self.cross[i][j - i - 1] = fresh;
                }
            }
        }

        for i in 0..self.n {
            if modified[i] || hydration {
                let fresh: D = cross_correlation(&self.coords[i], &self.coords_w, &self.axis);
                self.master_aw.sub_assign(&self.cross_w[i]);
                self.master_aw.add_assign(&fresh);
                self.cross_w[i] = fresh;
            }
        }

        if hydration {
            let fresh: D = self_correlation(&self.coords_w, &self.axis);
            self.master_ww.sub_assign(&self.self_w);
            self.master_ww.add_assign(&fresh);
            self.self_w = fresh;
        }

        self.state.reset_to_false();
    }

    /// Says whether the master sums still equal the sum over all cached blocks, within
    /// an absolute tolerance; meant for the test suite.
    pub fn validate_master(&self, tolerance: f64) -> bool {
        let bins = self.axis.bins();
        let mut sum_aa = D::with_bins(bins);
        for block in &self.self_corr { sum_aa.add_assign(block); }
        for row in &self.cross {
            for block in row {
                sum_aa.add_assign(block);
                sum_aa.add_assign(block);
            }
        }
        let mut sum_aw = D::with_bins(bins);
        for block in &self.cross_w { sum_aw.add_assign(block); }

        for k in 0..bins {
            if (sum_aa.weight(k) - self.master_aa.weight(k)).abs() > tolerance { return false; }
            if (sum_aw.weight(k) - self.master_aw.weight(k)).abs() > tolerance { return false; }
            if (self.self_w.weight(k) - self.master_ww.weight(k)).abs() > tolerance { return false; }
        }
        return true;
    }
}

impl<D: PairDistribution> HistogramManager for PartialHistogramManager<D> {
    fn calculate(&mut self, bodies: &[Body], waters: &[Water]) -> DistanceHistogram {
        self.update_blocks(bodies, waters);
        let mut total = self.master_aa.clone();
        total.add_assign(&self.master_aw);
        total.add_assign(&self.master_aw);
        total.add_assign(&self.master_ww);
        return DistanceHistogram::from_distribution(&total, &self.axis, self.q_axis);
    }

    fn calculate_all(&mut self, bodies: &[Body], waters: &[Water]) -> Box<dyn CompositeHistogram> {
        self.update_blocks(bodies, waters);
        return Box::new(CompositeDistanceHistogram::new(
            &self.master_aa, &self.master_aw, &self.master_ww, &self.axis, self.q_axis));
    }

    fn state_manager(&mut self) -> &mut StateManager { &mut self.state }
}
