use std::marker::PhantomData;
use crate::axis::DistanceAxis;
use crate::axis::QAxis;
use crate::body::Body;
use crate::compact::CompactCoordinates;
use crate::composite::{CompositeDistanceHistogram, CompositeHistogram, DistanceHistogram};
use crate::distance_calculator::{cross_correlation, self_correlation};
use crate::distribution::PairDistribution;
use crate::managers::HistogramManager;
use crate::options::RuntimeOptions;
use crate::site::Water;
use crate::state::StateManager;

/// Recomputes the full histogram from scratch on every call.
///
/// The reference implementation against which the partial managers are validated:
/// whatever mutation sequence the bodies went through, this manager's result only
/// depends on the current coordinates.
pub struct SimpleHistogramManager<D: PairDistribution> {
    axis: DistanceAxis,
    q_axis: QAxis,
    state: StateManager,
    _mode: PhantomData<D>,
}

impl<D: PairDistribution> SimpleHistogramManager<D> {
    pub fn new(options: &RuntimeOptions, n_bodies: usize) -> SimpleHistogramManager<D> {
        SimpleHistogramManager {
            axis: options.axes.distance_axis(),
            q_axis: options.axes.q_axis(),
            state: StateManager::new(n_bodies),
            _mode: PhantomData,
        }
    }

    fn components(&mut self, bodies: &[Body], waters: &[Water]) -> (D, D, D) {
        let data_a = CompactCoordinates::from_bodies(bodies);
        let data_w = CompactCoordinates::from_waters(waters);

        let aa: D = self_correlation(&data_a, &self.axis);
        let aw: D = cross_correlation(&data_a, &data_w, &self.axis);
        let ww: D = self_correlation(&data_w, &self.axis);
        self.state.reset_to_false();
        return (aa, aw, ww);
    }
}

impl<D: PairDistribution> HistogramManager for SimpleHistogramManager<D> {
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
