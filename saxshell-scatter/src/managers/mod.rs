//! Histogram manager implementations.
//!
//! One interface, several strategies: the [`SimpleHistogramManager`](SimpleHistogramManager)
//! recomputes everything on every call; the [`PartialHistogramManager`](PartialHistogramManager)
//! consults its [`StateManager`](crate::state::StateManager) and rebuilds only the blocks
//! touched since the previous call; the form-factor and symmetry variants extend those two.
//! The [`create_manager`](create_manager) factory maps the configured
//! [`HistogramManagerChoice`](crate::HistogramManagerChoice) onto a concrete implementation.

mod simple;
mod partial;
mod partial_ff;
mod symmetry_manager;
mod debug;

pub use simple::SimpleHistogramManager;
pub use partial::PartialHistogramManager;
pub use partial_ff::PartialHistogramManagerFF;
pub use symmetry_manager::SymmetryManager;
pub use debug::DebugDistanceHistogram;

use crate::body::Body;
use crate::composite::{CompositeHistogram, DistanceHistogram};
use crate::form_factor::FormFactorSet;
use crate::options::{HistogramManagerChoice, RuntimeOptions};
use crate::site::Water;
use crate::state::StateManager;
use crate::distribution::{Distribution1D, WeightedDistribution1D};

/// Builds per-body and body-hydration distance histograms for a molecule.
///
/// Implementations own a [`StateManager`](StateManager); its probes must be installed
/// into the observed bodies so that partial implementations see their mutations.
pub trait HistogramManager: Send {
    /// The total distance histogram of the given configuration
    fn calculate(&mut self, bodies: &[Body], waters: &[Water]) -> DistanceHistogram;

    /// The {atom-atom, atom-water, water-water} decomposition of the same blocks
    fn calculate_all(&mut self, bodies: &[Body], waters: &[Water]) -> Box<dyn CompositeHistogram>;

    /// The state manager tracking which bodies changed since the last call
    fn state_manager(&mut self) -> &mut StateManager;
}

/// Creates the histogram manager selected by the configuration.
pub fn create_manager(options: &RuntimeOptions, n_bodies: usize) -> Box<dyn HistogramManager> {
    let weighted = options.hist.weighted_bins;
    match options.hist.manager_choice {
        HistogramManagerChoice::Simple => {
            if weighted {
                Box::new(SimpleHistogramManager::<WeightedDistribution1D>::new(options, n_bodies))
            } else {
                Box::new(SimpleHistogramManager::<Distribution1D>::new(options, n_bodies))
            }
        }
        HistogramManagerChoice::Partial => {
            if weighted {
                Box::new(PartialHistogramManager::<WeightedDistribution1D>::new(options, n_bodies))
            } else {
                Box::new(PartialHistogramManager::<Distribution1D>::new(options, n_bodies))
            }
        }
        HistogramManagerChoice::PartialFF => {
            Box::new(PartialHistogramManagerFF::new(options, n_bodies, FormFactorSet::Standard))
        }
        HistogramManagerChoice::FoXS => {
            Box::new(PartialHistogramManagerFF::new(options, n_bodies, FormFactorSet::FoXS))
        }
        HistogramManagerChoice::Crysol => {
            Box::new(PartialHistogramManagerFF::new(options, n_bodies, FormFactorSet::Crysol))
        }
        HistogramManagerChoice::PartialSymmetry => {
            if weighted {
                Box::new(SymmetryManager::<WeightedDistribution1D>::new(options, n_bodies))
            } else {
                Box::new(SymmetryManager::<Distribution1D>::new(options, n_bodies))
            }
        }
    }
}
