use std::marker::PhantomData;
use crate::axis::{DistanceAxis, QAxis};
use crate::body::Body;
use crate::compact::{CompactCoordinates, CompactCoordinatesData};
use crate::composite::{CompositeDistanceHistogram, CompositeHistogram, DistanceHistogram};
use crate::distance_calculator::{cross_correlation, self_correlation};
use crate::distribution::PairDistribution;
use crate::managers::HistogramManager;
use crate::options::RuntimeOptions;
use crate::site::Water;
use crate::state::StateManager;

/// Expands the symmetry operations attached to the bodies into virtual coordinate copies
/// before accumulating the histogram.
///
/// The symmetric copies contribute to the scattering without ever being materialised as
/// separate [`Body`](Body) instances; only their packed coordinates exist, for the duration
/// of one call. Everything is recomputed on every call.
pub struct SymmetryManager<D: PairDistribution> {
    axis: DistanceAxis,
    q_axis: QAxis,
    state: StateManager,
    _mode: PhantomData<D>,
}

impl<D: PairDistribution> SymmetryManager<D> {
    pub fn new(options: &RuntimeOptions, n_bodies: usize) -> SymmetryManager<D> {
        SymmetryManager {
            axis: options.axes.distance_axis(),
            q_axis: options.axes.q_axis(),
            state: StateManager::new(n_bodies),
            _mode: PhantomData,
        }
    }

    /// Packs all bodies plus every virtual copy their symmetries describe.
    fn expanded_coordinates(bodies: &[Body]) -> CompactCoordinates {
        let mut data: Vec<CompactCoordinatesData> = Vec::new();
        for body in bodies {
            for a in body.atoms() {
                data.push(CompactCoordinatesData { x: a.pos.x, y: a.pos.y, z: a.pos.z, w: a.weight });
            }
            let cm = body.center_of_mass();
            for symmetry in body.symmetries() {
                for k in 1..=symmetry.repetitions {
                    for a in body.atoms() {
                        let p = symmetry.apply(&cm, &a.pos, k);
                        data.push(CompactCoordinatesData { x: p.x, y: p.y, z: p.z, w: a.weight });
                    }
                }
            }
        }
        return CompactCoordinates::from_raw(data);
    }

    fn components(&mut self, bodies: &[Body], waters: &[Water]) -> (D, D, D) {
        let data_a = Self::expanded_coordinates(bodies);
        let data_w = CompactCoordinates::from_waters(waters);
        let aa: D = self_correlation(&data_a, &self.axis);
        let aw: D = cross_correlation(&data_a, &data_w, &self.axis);
        let ww: D = self_correlation(&data_w, &self.axis);
        self.state.reset_to_false();
        return (aa, aw, ww);
    }
}

impl<D: PairDistribution> HistogramManager for SymmetryManager<D> {
    fn calculate(&mut self, bodies: &[Body], waters: &[Water]) -> DistanceHistogram {
        let (aa, aw, ww) = self.components(bodies, waters);
        let mut total = aa;
        total.add_assign(&aw);
        total.add_assign(&aw);
        total.add_assign(&ww);
        return DistanceHistogram::from_distribution(&total, &self.axis, self.q_axis);
    }

    fn calculate_all(&mut self, bodies: &[Body], waters: &[Water]) -> Box<dyn CompositeHistogram> {
        let (aa, aw, ww) = self.components(bodies, waters);
        return Box::new(CompositeDistanceHistogram::new(&aa, &aw, &ww, &self.axis, self.q_axis));
    }

    fn state_manager(&mut self) -> &mut StateManager { &mut self.state }
}
