use crate::axis::{BinAxis, DistanceAxis, QAxis};
use crate::body::Body;
use crate::compact::{CompactCoordinates, CompactCoordinatesFF};
use crate::composite::{CompositeHistogram, DistanceHistogram};
use crate::composite_ff::CompositeDistanceHistogramFFAvg;
use crate::distance_calculator::{cross_correlation_ff, cross_correlation_ff_pair, self_correlation, self_correlation_ff};
use crate::distribution::{Distribution1D, Distribution2D, Distribution3D, PairDistribution};
use crate::form_factor::{ExvFormFactorTable, FormFactorSet, FormFactorType};
use crate::managers::HistogramManager;
use crate::options::RuntimeOptions;
use crate::site::Water;
use crate::state::StateManager;

/// Incremental histogram builder with form-factor-resolved channels.
///
/// Follows the same block bookkeeping as
/// [`PartialHistogramManager`](crate::managers::PartialHistogramManager), but the blocks
/// are keyed by species: atom-atom blocks are three-dimensional, atom-water blocks
/// two-dimensional. The excluded-volume channel rides along in the reserved
/// `EXCLUDED_VOLUME` rows of those tables. Bins are rounded; the distance-weighted
/// refinement applies to the unresolved managers only.
pub struct PartialHistogramManagerFF {
    axis: DistanceAxis,
    q_axis: QAxis,
    state: StateManager,
    exv: ExvFormFactorTable,
    n: usize,
    coords: Vec<CompactCoordinatesFF>,
    coords_w: CompactCoordinates,
    self_corr: Vec<Distribution3D>,
    cross: Vec<Vec<Distribution3D>>,    // cross[i][j - i - 1], pair orientation already folded in
    self_w: Distribution1D,
    cross_w: Vec<Distribution2D>,
    master_aa: Distribution3D,
    master_aw: Distribution2D,
    master_ww: Distribution1D,
}

impl PartialHistogramManagerFF {
    pub fn new(options: &RuntimeOptions, n_bodies: usize, set: FormFactorSet) -> PartialHistogramManagerFF {
        let axis = options.axes.distance_axis();
        let bins = axis.bins();
        let exv = ExvFormFactorTable::new(set, options.molecule.displaced_volume_set);
        PartialHistogramManagerFF {
            axis,
            q_axis: options.axes.q_axis(),
            state: StateManager::new(n_bodies),
            exv,
            n: n_bodies,
            coords: vec![CompactCoordinatesFF::from_bodies_without_exv(&[]); n_bodies],
            coords_w: CompactCoordinates::default(),
            self_corr: vec![Distribution3D::with_bins(bins); n_bodies],
            cross: (0..n_bodies).map(|i| vec![Distribution3D::with_bins(bins); n_bodies - i - 1]).collect(),
            self_w: Distribution1D::with_bins(bins),
            cross_w: vec![Distribution2D::with_bins(bins); n_bodies],
            master_aa: Distribution3D::with_bins(bins),
            master_aw: Distribution2D::with_bins(bins),
            master_ww: Distribution1D::with_bins(bins),
        }
    }

    fn update_blocks(&mut self, bodies: &[Body], waters: &[Water]) {
        assert_eq!(bodies.len(), self.n,
                   "the manager observes {} bodies but was asked about {}", self.n, bodies.len());

        let external = self.state.externally_modified_bodies();
        let internal = self.state.internally_modified_bodies();
        let modified: Vec<bool> = external.iter().zip(internal.iter()).map(|(e, i)| *e || *i).collect();
        let hydration = self.state.is_modified_hydration();

        for i in 0..self.n {
            if modified[i] {
                self.coords[i] = CompactCoordinatesFF::from_atoms(bodies[i].atoms(), &self.exv);
            }
        }
        if hydration { self.coords_w = CompactCoordinates::from_waters(waters); }

        for i in 0..self.n {
            if modified[i] {
                let fresh = self_correlation_ff(&self.coords[i], &self.axis);
                self.master_aa.sub_assign(&self.self_corr[i]);
                self.master_aa.add_assign(&fresh);
                self.self_corr[i] = fresh;
            }
        }

        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if modified[i] || modified[j] {
                    let fresh = cross_correlation_ff_pair(&self.coords[i], &self.coords[j], &self.axis);
                    self.master_aa.sub_assign(&self.cross[i][j - i - 1]);
                    self.master_aa.add_assign(&fresh);
                    self.cross[i][j - i - 1] = fresh;
                }
            }
        }

        for i in 0..self.n {
            if modified[i] || hydration {
                let fresh = cross_correlation_ff(&self.coords[i], &self.coords_w, &self.axis);
                self.master_aw.sub_assign(&self.cross_w[i]);
                self.master_aw.add_assign(&fresh);
                self.cross_w[i] = fresh;
            }
        }

        if hydration {
            let fresh: Distribution1D = self_correlation(&self.coords_w, &self.axis);
            self.master_ww.sub_assign(&self.self_w);
            self.master_ww.add_assign(&fresh);
            self.self_w = fresh;
        }

        self.state.reset_to_false();
    }

    /// the total pair counts of the atomic channels, excluding the excluded-volume rows
    fn total_distribution(&self) -> Distribution1D {
        let bins = self.axis.bins();
        let mut total = Distribution1D::with_bins(bins);
        for a in 0..FormFactorType::COUNT - 1 {
            let ff_a = FormFactorType::from_index(a);
            for b in 0..FormFactorType::COUNT - 1 {
                let channel = self.master_aa.channel(ff_a, FormFactorType::from_index(b));
                for (k, v) in channel.iter().enumerate() {
                    if *v != 0.0 { total.add_to_bin(k, 0.0, *v); }
                }
            }
            for (k, v) in self.master_aw.channel(ff_a).iter().enumerate() {
                if *v != 0.0 { total.add_to_bin(k, 0.0, 2.0 * v); }
            }
        }
        for k in 0..bins {
            let v = self.master_ww.weight(k);
            if v != 0.0 { total.add_to_bin(k, 0.0, v); }
        }
        return total;
    }
}

impl HistogramManager for PartialHistogramManagerFF {
    fn calculate(&mut self, bodies: &[Body], waters: &[Water]) -> DistanceHistogram {
        self.update_blocks(bodies, waters);
        return DistanceHistogram::from_distribution(&self.total_distribution(), &self.axis, self.q_axis);
    }

    fn calculate_all(&mut self, bodies: &[Body], waters: &[Water]) -> Box<dyn CompositeHistogram> {
        self.update_blocks(bodies, waters);
        return Box::new(CompositeDistanceHistogramFFAvg::new(
            self.master_aa.clone(), self.master_aw.clone(), self.master_ww.clone(),
            self.axis.width(), self.q_axis, self.exv.clone()));
    }

    fn state_manager(&mut self) -> &mut StateManager { &mut self.state }
}
